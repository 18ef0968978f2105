use rmcp::handler::server::wrapper::Parameters;
use routemap::mcp::{RouteMapMcpServer, types::GetConfigParams};
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::create_dir(fixture.root_path().join(".git")).unwrap();
    let server = RouteMapMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["entry"], "src/App.tsx");
    assert_eq!(json_result["config"]["includes"], json!(["src"]));
    assert_eq!(json_result["config"]["ignoreTestFiles"], true);
    assert_eq!(json_result["config"]["rootElement"], json!(null));
    assert_eq!(json_result["config"]["mountPoints"], json!({}));
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "entry": "packages/app/src/App.tsx",
            "rootElement": "routes",
            "mountPoints": { "LegacyPage": "legacy" }
        }))
        .unwrap();

    let server = RouteMapMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["entry"], "packages/app/src/App.tsx");
    assert_eq!(json_result["config"]["rootElement"], "routes");
    assert_eq!(json_result["config"]["mountPoints"]["LegacyPage"], "legacy");
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_config(&json!({ "entry": "" })).unwrap();

    let server = RouteMapMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let err = server.get_config(params).await.unwrap_err();
    assert!(err.message.contains("'entry' must not be empty"));
}
