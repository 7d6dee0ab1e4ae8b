use ibdoc::normalize::RESERVED_KEY_ALIAS;
use ibdoc::{
    from_str, normalize_keys, restore_reserved_key, to_string, Document, Element, Result, Value,
};

/// Tree as a declarative builder would emit it, with `xKey` in place of `key`
fn builder_tree() -> Document {
    let frame = Element::new()
        .with_attr(RESERVED_KEY_ALIAS, "frame")
        .with_attr("x", 0)
        .with_attr("y", 0)
        .with_attr("width", 414)
        .with_attr("height", 736);
    let view = Element::new()
        .with_attr(RESERVED_KEY_ALIAS, "view")
        .with_attr("id", "EXPO-ContainerView")
        .with_child("rect", frame)
        .with_child(
            "color",
            Element::new()
                .with_attr(RESERVED_KEY_ALIAS, "backgroundColor")
                .with_attr("systemColor", "systemBackgroundColor"),
        );
    Document::new(
        "document",
        Element::new().with_attr("launchScreen", true).with_child("view", view),
    )
}

#[test]
fn test_restored_tree_renders_key_attributes() -> Result<()> {
    let xml = to_string(&builder_tree().restore_reserved_keys()?);

    assert!(!xml.contains("xKey"));
    assert!(xml.contains(r#"<view key="view" id="EXPO-ContainerView">"#));
    assert!(xml.contains(r#"<rect key="frame" x="0" y="0" width="414" height="736"/>"#));
    assert!(xml.contains(r#"<color key="backgroundColor" systemColor="systemBackgroundColor"/>"#));
    Ok(())
}

#[test]
fn test_restored_tree_round_trips() -> Result<()> {
    let doc = builder_tree().restore_reserved_keys()?;
    assert_eq!(from_str(&to_string(&doc))?, doc);
    Ok(())
}

#[test]
fn test_restore_is_idempotent() -> Result<()> {
    let once = builder_tree().restore_reserved_keys()?;
    let twice = once.restore_reserved_keys()?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_generic_rename_over_parsed_document() -> Result<()> {
    let doc = from_str(r#"<document><scenes><scene sceneID="s1"/></scenes></document>"#)?;
    let upper_first = |key: &str, value: &Value| {
        if value.is_array() {
            let mut chars = key.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        } else {
            key.to_string()
        }
    };

    let renamed = normalize_keys(&doc.to_value(), &upper_first);
    let scenes = renamed
        .as_object()
        .and_then(|o| o.get("document"))
        .and_then(Value::as_object)
        .and_then(|o| o.get("Scenes"));
    assert!(scenes.is_some_and(Value::is_array));

    let untouched = normalize_keys(&doc.to_value(), &restore_reserved_key);
    assert_eq!(untouched, doc.to_value());
    Ok(())
}
