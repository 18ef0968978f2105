use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::{
        args::{CommonArgs, RouteView, RoutesArgs, RoutesCommand},
        commands::{CommandSummary, routes::routes},
    },
    config::load_config,
    issues::Severity,
};

use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, GetRoutesParams, IssueItem, RoutesResult,
    parent_items, path_items,
};

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[derive(Clone)]
pub struct RouteMapMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for RouteMapMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl RouteMapMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current routemap configuration
    #[tool(description = "Get the current routemap configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Build the route table of the project's entry file
    #[tool(
        description = "Build the route table of the app's entry file: the path each route ref is mounted at, its parent route ref, and the nested route objects. Route configuration errors and scan warnings are returned alongside."
    )]
    pub async fn get_routes(
        &self,
        params: Parameters<GetRoutesParams>,
    ) -> Result<CallToolResult, McpError> {
        let GetRoutesParams {
            project_root_path,
            view,
            filter,
        } = params.0;

        let view = view
            .as_deref()
            .map(|v| RouteView::from_str(v, true))
            .transpose()
            .map_err(|e| McpError::invalid_params(format!("Invalid view: {}", e), None))?;

        let cmd = RoutesCommand {
            args: RoutesArgs {
                common: CommonArgs {
                    source_root: Some(PathBuf::from(&project_root_path)),
                    entry: None,
                    verbose: false,
                },
                view: view.unwrap_or_default(),
                json: true,
                filter,
            },
        };
        let result = routes(cmd)
            .map_err(|e| McpError::internal_error(format!("Failed to build routes: {:#}", e), None))?;

        let CommandSummary::Routes(summary) = result.summary else {
            return Err(McpError::internal_error("Unexpected command result", None));
        };

        let mut output = RoutesResult {
            entry: summary.entry,
            source_file_count: result.source_files_checked,
            ..Default::default()
        };
        for issue in &result.issues {
            match issue.severity() {
                Severity::Error => output.errors.push(IssueItem::from(issue)),
                Severity::Warning => output.warnings.push(IssueItem::from(issue)),
            }
        }

        if let Some(table) = summary.table {
            output.route_count = table.len();
            let all = view.is_none();
            if all || view == Some(RouteView::Paths) {
                output.paths = Some(path_items(&table));
            }
            if all || view == Some(RouteView::Parents) {
                output.parents = Some(parent_items(&table));
            }
            if all || view == Some(RouteView::Tree) {
                output.routes = Some(table.routes);
            }
        }

        json_result(&output)
    }
}

#[tool_handler]
impl ServerHandler for RouteMapMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "routemap MCP reports the route table of a plugin-based React app by statically walking its JSX.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration (entry file, includes, mountPoints overrides)\n\
                 2. get_routes - Get route paths, parents and nested route objects\n\n\
                 If get_routes reports unresolved mount points, map the component to a route ref id\n\
                 under mountPoints in .routemaprc.json."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = RouteMapMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
