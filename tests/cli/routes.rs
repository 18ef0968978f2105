use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

#[test]
fn test_routes_tree_view() -> Result<()> {
    let test = CliTest::app()?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r"
    /catalog  catalog
    └── :kind/:name  catalog.entity
    /docs  techdocs [case-sensitive]
    ✓ Collected 3 routes from 3 source files
    ");
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_routes_paths_view() -> Result<()> {
    let test = CliTest::app()?;

    let output = test.routes_command().args(["--view", "paths"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r"
    catalog         /catalog
    catalog.entity  /catalog/:kind/:name
    techdocs        /docs
    ✓ Collected 3 routes from 3 source files
    ");

    Ok(())
}

#[test]
fn test_routes_parents_view() -> Result<()> {
    let test = CliTest::app()?;

    let output = test.routes_command().args(["--view", "parents"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r"
    catalog         -
    catalog.entity  catalog
    techdocs        -
    ✓ Collected 3 routes from 3 source files
    ");

    Ok(())
}

#[test]
fn test_routes_json() -> Result<()> {
    let test = CliTest::app()?;

    let output = test.routes_command().arg("--json").output()?;
    assert_eq!(output.status.code(), Some(0));

    let parsed: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        parsed,
        json!({
            "paths": {
                "catalog": "/catalog",
                "catalog.entity": ":kind/:name",
                "techdocs": "/docs"
            },
            "parents": {
                "catalog": null,
                "catalog.entity": "catalog",
                "techdocs": null
            },
            "routes": [
                {
                    "path": "/catalog",
                    "caseSensitive": false,
                    "routeRef": "catalog",
                    "children": [
                        {
                            "path": ":kind/:name",
                            "caseSensitive": false,
                            "routeRef": "catalog.entity",
                            "children": []
                        }
                    ]
                },
                {
                    "path": "/docs",
                    "caseSensitive": true,
                    "routeRef": "techdocs",
                    "children": []
                }
            ]
        })
    );

    Ok(())
}

#[test]
fn test_routes_filter_keeps_parents() -> Result<()> {
    let test = CliTest::app()?;

    let output = test
        .routes_command()
        .args(["--filter", "entity$"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r"
    /catalog  catalog
    └── :kind/:name  catalog.entity
    ");

    Ok(())
}

#[test]
fn test_routes_filter_paths_view_keeps_full_paths() -> Result<()> {
    let test = CliTest::app()?;

    let output = test
        .routes_command()
        .args(["--view", "paths", "--filter", "entity$"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "catalog.entity  /catalog/:kind/:name\n");

    Ok(())
}

#[test]
fn test_routes_invalid_filter() -> Result<()> {
    let test = CliTest::app()?;

    let output = test.routes_command().args(["--filter", "("]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid --filter pattern"));

    Ok(())
}

#[test]
fn test_routes_missing_path_fails() -> Result<()> {
    let test = CliTest::app()?;
    test.write_file(
        "src/App.tsx",
        r#"
import { CatalogIndexPage } from './plugin';

export const App = () => (
  <FlatRoutes>
    <Route element={<CatalogIndexPage />} />
  </FlatRoutes>
);
"#,
    )?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");

    let err = stderr(&output);
    assert!(err.starts_with("error: "), "stderr: {err}");
    assert!(err.contains("  --> src/App.tsx:"), "stderr: {err}");
    assert!(err.contains("mounted at routeRef{id=catalog}"), "stderr: {err}");
    assert!(err.ends_with("1 problems (1 error, 0 warnings)\n"), "stderr: {err}");

    Ok(())
}

#[test]
fn test_routes_unresolved_mount_point_warns() -> Result<()> {
    let test = CliTest::app()?;
    test.write_file(
        "src/legacy.ts",
        r#"
import { legacyRouteRef } from 'legacy-plugin';

export const LegacyPage = createRoutableExtension({
  component: () => null,
  mountPoint: legacyRouteRef,
});
"#,
    )?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Collected 3 routes from 4 source files"));
    assert_snapshot!(stderr(&output), @r"
    warning: LegacyPage mounts unknown route ref `legacyRouteRef`  unresolved-mount-point
      --> src/legacy.ts:4:14
       = note: add it to `mountPoints` in the config file to map it by id

    ✘ 1 problems (0 errors, 1 warning)
    ");

    Ok(())
}

#[test]
fn test_routes_mount_points_from_config() -> Result<()> {
    let test = CliTest::app()?;
    test.write_file(
        ".routemaprc.json",
        r#"{ "mountPoints": { "SettingsPage": "user-settings" } }"#,
    )?;
    test.write_file(
        "src/App.tsx",
        r#"
export const App = () => (
  <FlatRoutes>
    <Route path="/settings" element={<SettingsPage />} />
  </FlatRoutes>
);
"#,
    )?;

    let output = test.routes_command().args(["--view", "paths"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("user-settings  /settings\n"));

    Ok(())
}

#[test]
fn test_routes_entry_override() -> Result<()> {
    let test = CliTest::app()?;
    test.write_file(
        "src/Other.tsx",
        r#"
import { TechDocsPage } from './plugin';

export const Other = () => <Route path="/techdocs" element={<TechDocsPage />} />;
"#,
    )?;

    let output = test
        .routes_command()
        .args(["--entry", "src/Other.tsx", "--view", "paths"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("techdocs  /techdocs\n"));

    Ok(())
}

#[test]
fn test_routes_missing_entry_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/routes.ts", crate::ROUTE_REFS)?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Cannot load entry file src/App.tsx"));

    Ok(())
}

#[test]
fn test_routes_parse_errors_are_summarized() -> Result<()> {
    let test = CliTest::app()?;
    test.write_file("src/broken.ts", "export const broken = (;")?;

    let output = test.routes_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stderr(&output),
        "warning: 1 file(s) could not be parsed (use -v for details)\n"
    );

    let verbose = test.routes_command().arg("-v").output()?;
    let err = stderr(&verbose);
    assert!(err.contains("  --> src/broken.ts\n"), "stderr: {err}");
    assert!(err.contains("parse-error"), "stderr: {err}");

    Ok(())
}

#[test]
fn test_routes_source_root() -> Result<()> {
    let test = CliTest::app()?;

    let mut cmd = test.routes_command();
    cmd.current_dir(std::env::temp_dir());
    cmd.arg("--source-root").arg(test.root());
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Collected 3 routes from 3 source files"));

    Ok(())
}
