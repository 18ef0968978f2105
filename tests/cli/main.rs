use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod init;
mod routes;

const BIN_NAME: &str = "routemap";

pub const ROUTE_REFS: &str = r#"
import { createRouteRef, createSubRouteRef } from '@backstage/core-plugin-api';

export const catalogRouteRef = createRouteRef({ id: 'catalog' });
export const entityRouteRef = createRouteRef({ id: 'catalog.entity' });
export const docsRouteRef = createRouteRef({ id: 'techdocs' });
"#;

pub const PLUGIN: &str = r#"
import { catalogRouteRef, entityRouteRef, docsRouteRef } from './routes';

export const CatalogIndexPage = catalogPlugin.provide(
  createRoutableExtension({
    name: 'CatalogIndexPage',
    component: () => import('./CatalogPage').then(m => m.CatalogPage),
    mountPoint: catalogRouteRef,
  }),
);

export const CatalogEntityPage = catalogPlugin.provide(
  createRoutableExtension({ component: () => null, mountPoint: entityRouteRef }),
);

export const TechDocsPage = catalogPlugin.provide(
  createRoutableExtension({ component: () => null, mountPoint: docsRouteRef }),
);
"#;

pub const APP: &str = r#"
import { CatalogIndexPage, CatalogEntityPage, TechDocsPage } from './plugin';

const routes = (
  <FlatRoutes>
    <Route path="/catalog" element={<CatalogIndexPage />}>
      <Route path=":kind/:name" element={<CatalogEntityPage />} />
    </Route>
    <Route path="/docs" caseSensitive element={<TechDocsPage />} />
  </FlatRoutes>
);

export const App = () => <AppRouter>{routes}</AppRouter>;
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A small app: three route refs, their extensions and the routes in `src/App.tsx`.
    pub fn app() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("src/routes.ts", ROUTE_REFS)?;
        test.write_file("src/plugin.ts", PLUGIN)?;
        test.write_file("src/App.tsx", APP)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn routes_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("routes");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
