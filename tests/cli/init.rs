use anyhow::{Context, Result};
use serde_json::Value;

use crate::{APP, CliTest, PLUGIN, ROUTE_REFS, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "\u{2713} Created .routemaprc.json\n");

    let content = test.read_file(".routemaprc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["entry"], "src/App.tsx");
    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert!(parsed["mountPoints"].as_object().unwrap().is_empty());
    assert!(content.contains("\n  \"includes\""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".routemaprc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: .routemaprc.json already exists\n");
    assert_eq!(test.read_file(".routemaprc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/routes.ts", ROUTE_REFS)?;
    test.write_file("src/plugin.ts", PLUGIN)?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.routes_command().output()?;
    assert!(
        output.status.success(),
        "routes should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("Collected 3 routes from 3 source files"));

    Ok(())
}
