use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"], serde_json::json!(["."]));
    assert_eq!(parsed["ignores"], serde_json::json!(["**/node_modules/**"]));
    assert_eq!(parsed["removeAll"], Value::Bool(false));
    assert_eq!(parsed["removeAllButFirst"], Value::Bool(false));
    assert_eq!(parsed["removePatterns"], serde_json::json!([]));

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .csscrubrc.json\n");

    assert!(test.root().join(".csscrubrc.json").exists());
    let content = test.read_file(".csscrubrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".csscrubrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .csscrubrc.json already exists\n");
    assert_eq!(test.read_file(".csscrubrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("styles/app.css", "/* note */a{color:red}")?;
    test.write_file("node_modules/pkg/vendor.css", "/* vendor */b{}")?;

    let output = test.strip_command().arg("--apply").output()?;
    assert!(
        output.status.success(),
        "Strip should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(test.read_file("styles/app.css")?, "a{color:red}");
    assert_eq!(
        test.read_file("node_modules/pkg/vendor.css")?,
        "/* vendor */b{}"
    );

    Ok(())
}
