use rmcp::handler::server::wrapper::Parameters;
use routemap::mcp::{RouteMapMcpServer, types::GetRoutesParams};
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

fn params(fixture: &McpTestFixture, view: Option<&str>) -> Parameters<GetRoutesParams> {
    Parameters(GetRoutesParams {
        project_root_path: fixture.root(),
        view: view.map(String::from),
        filter: None,
    })
}

#[tokio::test]
async fn test_get_routes_all_views() {
    let fixture = McpTestFixture::with_app().unwrap();
    let server = RouteMapMcpServer::new();

    let result = server.get_routes(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result["entry"].as_str().unwrap().ends_with("src/App.tsx"));
    assert_eq!(json_result["routeCount"], 2);
    assert_eq!(json_result["sourceFileCount"], 3);
    assert_eq!(
        json_result["paths"],
        json!([
            { "routeRef": "catalog", "title": "Catalog", "path": "/catalog", "fullPath": "/catalog" },
            { "routeRef": "catalog.entity", "path": ":name", "fullPath": "/catalog/:name" }
        ])
    );
    assert_eq!(
        json_result["parents"],
        json!([
            { "routeRef": "catalog", "parent": null },
            { "routeRef": "catalog.entity", "parent": "catalog" }
        ])
    );
    assert_eq!(json_result["routes"][0]["children"][0]["routeRef"], "catalog.entity");
    assert_eq!(json_result["errors"], json!([]));
    assert_eq!(json_result["warnings"], json!([]));
}

#[tokio::test]
async fn test_get_routes_single_view() {
    let fixture = McpTestFixture::with_app().unwrap();
    let server = RouteMapMcpServer::new();

    let result = server
        .get_routes(params(&fixture, Some("Parents")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert!(json_result.get("parents").is_some());
    assert!(json_result.get("paths").is_none());
    assert!(json_result.get("routes").is_none());
}

#[tokio::test]
async fn test_get_routes_filter() {
    let fixture = McpTestFixture::with_app().unwrap();
    let server = RouteMapMcpServer::new();

    let result = server
        .get_routes(Parameters(GetRoutesParams {
            project_root_path: fixture.root(),
            view: Some("paths".to_string()),
            filter: Some("entity".to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["routeCount"], 1);
    assert_eq!(json_result["paths"][0]["fullPath"], "/catalog/:name");
}

#[tokio::test]
async fn test_get_routes_reports_route_config_errors() {
    let fixture = McpTestFixture::with_app().unwrap();
    fixture
        .write_file(
            "src/App.tsx",
            r#"
export const App = () => (
  <FlatRoutes>
    <Route element={<CatalogIndexPage />} />
  </FlatRoutes>
);
"#,
        )
        .unwrap();
    let server = RouteMapMcpServer::new();

    let result = server.get_routes(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["routeCount"], 0);
    assert!(json_result.get("paths").is_none());
    let errors = json_result["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["rule"], "missing-path");
    assert_eq!(errors[0]["severity"], "error");
    assert!(errors[0]["filePath"].as_str().unwrap().ends_with("src/App.tsx"));
}

#[tokio::test]
async fn test_get_routes_reports_warnings() {
    let fixture = McpTestFixture::with_app().unwrap();
    fixture
        .write_file(
            "src/legacy.ts",
            "export const LegacyPage = createRoutableExtension({ mountPoint: legacyRouteRef });\n",
        )
        .unwrap();
    let server = RouteMapMcpServer::new();

    let result = server.get_routes(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["routeCount"], 2);
    let warnings = json_result["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["rule"], "unresolved-mount-point");
    assert_eq!(warnings[0]["line"], 1);
    assert_eq!(warnings[0]["col"], 14);
}

#[tokio::test]
async fn test_get_routes_invalid_view() {
    let fixture = McpTestFixture::with_app().unwrap();
    let server = RouteMapMcpServer::new();

    let err = server
        .get_routes(params(&fixture, Some("flat")))
        .await
        .unwrap_err();
    assert!(err.message.contains("Invalid view"));
}

#[tokio::test]
async fn test_get_routes_missing_entry() {
    let fixture = McpTestFixture::new().unwrap();
    let server = RouteMapMcpServer::new();

    let err = server.get_routes(params(&fixture, None)).await.unwrap_err();
    assert!(err.message.contains("Cannot load entry file"));
}
