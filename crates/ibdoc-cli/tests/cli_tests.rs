//! End-to-end tests for the ibdoc binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EMPTY_CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<document launchScreen="YES">
  <scenes>
    <scene sceneID="EXPO-SCENE-1">
      <objects>
        <viewController id="EXPO-VIEWCONTROLLER-1">
          <view key="view" id="EXPO-ContainerView">
            <subviews/>
            <constraints/>
          </view>
        </viewController>
      </objects>
    </scene>
  </scenes>
  <resources/>
</document>
"#;

#[allow(deprecated)]
fn cli() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("ibdoc")?)
}

#[test]
fn test_help_lists_subcommands() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("attach"))
        .stdout(predicate::str::contains("detach"))
        .stdout(predicate::str::contains("template"));
    Ok(())
}

#[test]
fn test_id_prints_sha1_of_joined_fields() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .args(["id", "X", "top", "Y", "top"])
        .assert()
        .success()
        .stdout("53bd9992c560787e42115942fc54b663fdfe372f\n");
    Ok(())
}

#[test]
fn test_template_renders_launch_screen() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .arg("template")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document ",
        ))
        .stdout(predicate::str::contains("id=\"EXPO-ContainerView\""))
        .stdout(predicate::str::contains("\n    <scenes>\n"));
    Ok(())
}

#[test]
fn test_indent_flag() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .args(["template", "--indent", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  <scenes>\n"));
    Ok(())
}

#[test]
fn test_attach_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .args(["attach", "--image", "Splash", "--content-mode", "center"])
        .write_stdin(EMPTY_CONTAINER)
        .assert()
        .success()
        .stdout(predicate::str::contains("id=\"EXPO-SplashScreen\""))
        .stdout(predicate::str::contains("contentMode=\"center\""))
        .stdout(predicate::str::contains(
            "id=\"83fcb9b545b870ba44c24f0feeb116490c499c52\"",
        ))
        .stdout(predicate::str::contains(
            "<image name=\"Splash\" width=\"414\" height=\"736\"/>",
        ));
    Ok(())
}

#[test]
fn test_attach_then_detach_with_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("LaunchScreen.storyboard");
    let attached = dir.path().join("attached.storyboard");
    let detached = dir.path().join("detached.storyboard");
    fs::write(&input, EMPTY_CONTAINER)?;

    cli()?
        .arg("attach")
        .args(["--image", "Splash", "--background", "#ff0000"])
        .arg(&input)
        .arg("-o")
        .arg(&attached)
        .assert()
        .success();
    let contents = fs::read_to_string(&attached)?;
    assert!(contents.contains("EXPO-SplashScreen"));
    assert!(contents.contains("<color key=\"backgroundColor\" red=\"1\""));

    cli()?
        .args(["detach", "--image", "Splash"])
        .arg(&attached)
        .arg("-o")
        .arg(&detached)
        .assert()
        .success();
    let contents = fs::read_to_string(&detached)?;
    assert!(!contents.contains("EXPO-SplashScreen"));
    assert!(!contents.contains("name=\"Splash\""));
    // Detach leaves the background color in place
    assert!(contents.contains("<color key=\"backgroundColor\" red=\"1\""));
    Ok(())
}

#[test]
fn test_unknown_content_mode_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .args(["attach", "--image", "Splash", "--content-mode", "stretch"])
        .write_stdin(EMPTY_CONTAINER)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown content mode: stretch"));
    Ok(())
}

#[test]
fn test_attach_on_unexpected_document_fails() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .args(["attach", "--image", "Splash"])
        .write_stdin("<document/>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("element not found: document/scenes"));
    Ok(())
}

#[test]
fn test_malformed_input_reports_position() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .arg("fmt")
        .write_stdin("<document>\n  <scenes>\n</document>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse stdin"))
        .stderr(predicate::str::contains("error at 3:1"));
    Ok(())
}

#[test]
fn test_dump_normalize_restores_key() -> Result<(), Box<dyn std::error::Error>> {
    let output = cli()?
        .args(["dump", "--normalize"])
        .write_stdin(r#"<document><view xKey="view" id="a"/></document>"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(json["document"]["view"][0]["$"]["key"], "view");
    assert!(json["document"]["view"][0]["$"].get("xKey").is_none());
    Ok(())
}

#[test]
fn test_empty_stdin_fails() -> Result<(), Box<dyn std::error::Error>> {
    cli()?
        .arg("fmt")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input provided on stdin"));
    Ok(())
}
