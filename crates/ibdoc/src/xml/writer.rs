//! XML rendering of a [`Document`]

use std::fmt::Write as _;

use crate::tree::{Document, Element};

/// XML declaration emitted on the first line
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Rendering options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl Config {
    pub const fn with_indent(indent: usize) -> Self {
        Self { indent }
    }
}

/// Formats a document as indented XML text.
///
/// Elements without children or text are self-closing. Text-only elements
/// keep their text inline. Child sequences appear in insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Writer {
    config: Config,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(DECLARATION);
        out.push('\n');
        self.write_element(&mut out, &doc.name, &doc.root, 0);
        out
    }

    fn write_element(&self, out: &mut String, name: &str, element: &Element, depth: usize) {
        self.write_indent(out, depth);
        out.push('<');
        out.push_str(name);
        for (key, value) in &element.attributes {
            // Writing into a String cannot fail
            let _ = write!(out, " {key}=\"{}\"", escape_attribute(&value.to_wire()));
        }

        let has_children = element.children.values().any(|seq| !seq.is_empty());
        match (&element.text, has_children) {
            (None, false) => {
                out.push_str("/>\n");
                return;
            }
            (Some(text), false) => {
                out.push('>');
                out.push_str(&escape_text(text));
            }
            (text, true) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    self.write_indent(out, depth + 1);
                    out.push_str(&escape_text(text));
                    out.push('\n');
                }
                for (tag, seq) in &element.children {
                    for child in seq {
                        self.write_element(out, tag, child, depth + 1);
                    }
                }
                self.write_indent(out, depth);
            }
        }

        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
    }

    fn write_indent(&self, out: &mut String, depth: usize) {
        out.extend(std::iter::repeat(' ').take(self.config.indent.saturating_mul(depth)));
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
