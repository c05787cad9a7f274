use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const APP_CSS: &str = "/*! license */\n/* layout */\n.a {\n  margin: 10px /* top */ 20px;\n}\n";

#[test]
fn test_strip_dry_run_leaves_files() -> Result<()> {
    let test = CliTest::with_file("styles/app.css", APP_CSS)?;
    test.write_file("styles/clean.css", "a{color:red}")?;

    let output = test.strip_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "  styles/app.css (2 comments)\n\
         Would remove 2 comments from 1 file (run with --apply to rewrite)\n"
    );
    assert_eq!(test.read_file("styles/app.css")?, APP_CSS);

    Ok(())
}

#[test]
fn test_strip_apply_rewrites_files() -> Result<()> {
    let test = CliTest::with_file("styles/app.css", APP_CSS)?;

    let output = test.strip_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("✓ Removed 2 comments from 1 file\n"));
    assert_eq!(
        test.read_file("styles/app.css")?,
        "/*! license */\n.a {\n  margin: 10px 20px;\n}\n"
    );

    // A second run finds nothing left.
    let output = test.strip_command().output()?;
    assert_eq!(
        stdout(&output),
        "✓ Checked 1 stylesheet - no comments to remove\n"
    );

    Ok(())
}

#[test]
fn test_strip_explicit_paths() -> Result<()> {
    let test = CliTest::with_file("a.css", "/*x*/a{}")?;
    test.write_file("b.css", "/*x*/b{}")?;

    let output = test.strip_command().args(["a.css", "--apply"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("a.css")?, "a{}");
    assert_eq!(test.read_file("b.css")?, "/*x*/b{}");

    Ok(())
}

#[test]
fn test_strip_remove_all_flags() -> Result<()> {
    let test = CliTest::with_file("a.css", "/*!a*/h1{c:1}/*!b*/h2{c:2}")?;

    test.strip_command()
        .args(["--apply", "--remove-all-but-first"])
        .output()?;
    assert_eq!(test.read_file("a.css")?, "/*!a*/h1{c:1}h2{c:2}");

    test.strip_command()
        .args(["--apply", "--remove-all"])
        .output()?;
    assert_eq!(test.read_file("a.css")?, "h1{c:1}h2{c:2}");

    Ok(())
}

#[test]
fn test_strip_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".csscrubrc.json",
        r#"{ "includes": ["src"], "removePatterns": ["^!\\s*@"] }"#,
    )?;
    test.write_file("src/a.css", "/*!license*//*! @generated */a{}")?;
    test.write_file("other/b.css", "/*x*/b{}")?;

    let output = test.strip_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(test.read_file("src/a.css")?, "/*!license*/a{}");
    assert_eq!(test.read_file("other/b.css")?, "/*x*/b{}");

    Ok(())
}

#[test]
fn test_strip_remove_pattern_flag() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.strip_stdin(&["--remove", "^!drop"], "/*!keep*//*!drop me*/a{}")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "/*!keep*/a{}");

    Ok(())
}

#[test]
fn test_strip_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.strip_stdin(&[], "h1,/*comment*/ h2, h3/*comment*/{margin:20px}\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "h1, h2, h3{margin:20px}\n");
    assert!(stderr(&output).is_empty());

    Ok(())
}

#[test]
fn test_strip_stdin_parse_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.strip_stdin(&[], "a{b:c")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "✘ <stdin>: Unclosed block at 1:2\n");

    Ok(())
}

#[test]
fn test_strip_parse_error_continues() -> Result<()> {
    let test = CliTest::with_file("broken.css", "a{b:c")?;
    test.write_file("ok.css", "/*x*/a{}")?;

    let output = test.strip_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "✘ broken.css: Unclosed block at 1:2\n");
    assert_eq!(test.read_file("ok.css")?, "a{}");
    assert_eq!(test.read_file("broken.css")?, "a{b:c");

    Ok(())
}

#[test]
fn test_strip_invalid_regex() -> Result<()> {
    let test = CliTest::with_file("a.css", "/*x*/a{}")?;

    let output = test.strip_command().args(["--remove", "("]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).starts_with("Error: Invalid regex in 'removePatterns': \"(\""),
        "{}",
        stderr(&output)
    );
    assert_eq!(test.read_file("a.css")?, "/*x*/a{}");

    Ok(())
}

#[test]
fn test_strip_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".csscrubrc.json", "{ nope")?;

    let output = test.strip_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to parse config file"));

    Ok(())
}
