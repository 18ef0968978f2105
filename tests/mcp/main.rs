use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with a plugin that declares route refs and
/// an app entry file that mounts them.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a project with a catalog plugin mounted under `/catalog`
    pub fn with_app() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_file(
            "src/routes.ts",
            r#"
export const catalogRouteRef = createRouteRef({ id: 'catalog', title: 'Catalog' });
export const entityRouteRef = createRouteRef({ id: 'catalog.entity' });
"#,
        )?;
        fixture.write_file(
            "src/plugin.ts",
            r#"
import { catalogRouteRef, entityRouteRef } from './routes';

export const CatalogIndexPage = createRoutableExtension({
  component: () => null,
  mountPoint: catalogRouteRef,
});
export const CatalogEntityPage = createRoutableExtension({
  component: () => null,
  mountPoint: entityRouteRef,
});
"#,
        )?;
        fixture.write_file(
            "src/App.tsx",
            r#"
export const App = () => (
  <FlatRoutes>
    <Route path="/catalog" element={<CatalogIndexPage />}>
      <Route path=":name" element={<CatalogEntityPage />} />
    </Route>
  </FlatRoutes>
);
"#,
        )?;
        Ok(fixture)
    }

    /// Write a source file relative to the project root
    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .routemaprc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".routemaprc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
