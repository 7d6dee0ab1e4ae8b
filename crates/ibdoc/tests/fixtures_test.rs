use std::fs;
use std::path::PathBuf;

use ibdoc::{from_str, to_string, Category};

fn fixtures(kind: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(kind);
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

#[test]
fn test_valid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    for path in fixtures("valid")? {
        let content = fs::read_to_string(&path)?;
        if let Err(err) = from_str(&content) {
            return Err(
                std::io::Error::other(format!("Failed to parse valid file {path:?}: {err}")).into(),
            );
        }
    }
    Ok(())
}

#[test]
fn test_invalid_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    for path in fixtures("invalid")? {
        let content = fs::read_to_string(&path)?;
        match from_str(&content) {
            Err(err) if err.category() == Category::Parse => {}
            other => {
                return Err(std::io::Error::other(format!(
                    "Should fail to parse invalid file {path:?}, got {other:?}"
                ))
                .into());
            }
        }
    }
    Ok(())
}

#[test]
fn test_fixtures_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    for path in fixtures("valid")? {
        let doc = from_str(&fs::read_to_string(&path)?)?;
        let rendered = to_string(&doc);
        let reparsed = from_str(&rendered)?;
        assert_eq!(reparsed, doc, "round trip changed {path:?}");

        // A rendered document is already in canonical layout
        assert_eq!(to_string(&reparsed), rendered, "render not stable for {path:?}");
    }
    Ok(())
}

#[test]
fn test_render_keeps_xcode_layout() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixtures("valid")?
        .into_iter()
        .find(|p| p.ends_with("LaunchScreen.storyboard"))
        .ok_or("missing LaunchScreen fixture")?;
    let rendered = to_string(&from_str(&fs::read_to_string(path)?)?);

    assert!(rendered.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document "));
    assert!(rendered.contains(
        "\n                        <rect key=\"frame\" x=\"0.0\" y=\"0.0\" width=\"414\" height=\"736\"/>\n"
    ));
    assert!(rendered.ends_with("</document>\n"));
    Ok(())
}

#[test]
fn test_entities_and_cdata_become_text() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixtures("valid")?
        .into_iter()
        .find(|p| p.ends_with("Entities.xib"))
        .ok_or("missing Entities fixture")?;
    let doc = from_str(&fs::read_to_string(path)?)?;
    let objects = doc.root.first_child("objects").ok_or("missing objects")?;

    let label = objects.first_child("label").ok_or("missing label")?;
    assert!(label.attr_matches("text", "Fish & Chips \u{2014} \"daily\""));
    assert!(label.attr_matches("opaque", "NO"));

    let note = objects.first_child("string").ok_or("missing string")?;
    assert_eq!(note.text.as_deref(), Some("<b>bold</b>"));
    Ok(())
}
