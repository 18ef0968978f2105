use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    core::{RouteObject, RouteTable},
    issues::{Issue, Report},
};

// ============================================================
// Tool parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root (where the config search starts)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetRoutesParams {
    /// Absolute path to the project root (where the config search starts)
    pub project_root_path: String,
    /// One of "tree", "paths" or "parents". Omit to get all three.
    pub view: Option<String>,
    /// Regular expression; only route refs whose id matches are returned
    pub filter: Option<String>,
}

// ============================================================
// Tool results
// ============================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub ignore_test_files: bool,
    pub entry: String,
    pub root_element: Option<String>,
    pub mount_points: IndexMap<String, String>,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            includes: c.includes,
            ignores: c.ignores,
            ignore_test_files: c.ignore_test_files,
            entry: c.entry,
            root_element: c.root_element,
            mount_points: c.mount_points,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePathItem {
    pub route_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub path: String,
    /// Path joined with the paths of all parent routes.
    pub full_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParentItem {
    pub route_ref: String,
    pub parent: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub severity: String,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let location = issue.location();
        let (file_path, line, col) = location.parts();
        Self {
            severity: issue.severity().to_string(),
            rule: issue.rule().to_string(),
            message: issue.message(),
            file_path: (!file_path.is_empty()).then(|| file_path.to_string()),
            line: (line > 0).then_some(line),
            col: (col > 0).then_some(col),
            details: issue.details(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResult {
    pub entry: String,
    pub route_count: usize,
    pub source_file_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<RoutePathItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<RouteParentItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RouteObject>>,
    pub errors: Vec<IssueItem>,
    pub warnings: Vec<IssueItem>,
}

pub fn path_items(table: &RouteTable) -> Vec<RoutePathItem> {
    table
        .paths
        .iter()
        .map(|(route_ref, path)| RoutePathItem {
            route_ref: route_ref.id().to_string(),
            title: route_ref.title().map(String::from),
            path: path.clone(),
            full_path: table.full_path(route_ref).unwrap_or_else(|| path.clone()),
        })
        .collect()
}

pub fn parent_items(table: &RouteTable) -> Vec<RouteParentItem> {
    table
        .parents
        .iter()
        .map(|(route_ref, parent)| RouteParentItem {
            route_ref: route_ref.id().to_string(),
            parent: parent.as_ref().map(|p| p.id().to_string()),
        })
        .collect()
}
