//! XML parser producing a [`Document`]

use std::borrow::Cow;

use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::tree::{Attributes, Document, Element, ATTRIBUTES_KEY, TEXT_KEY};
use crate::value::Scalar;
use crate::xml::cursor::Cursor;

/// Nesting bound applied even when [`Config::max_depth`] is 0
pub const DEPTH_CEILING: u16 = 512;

/// Limits applied while parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means [`DEPTH_CEILING`])
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// No size limit; depth is still bounded by [`DEPTH_CEILING`] so deep
    /// input fails with an error instead of exhausting the stack
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// XML parser.
///
/// Attributes land in [`Element::attributes`]; child elements are grouped by
/// tag into ordered sequences. The XML declaration, processing
/// instructions, comments and doctype are skipped. Text and CDATA are
/// concatenated, trimmed, and kept as [`Element::text`].
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
    depth: u16,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            depth: 0,
        }
    }

    /// Parse a complete document
    pub fn parse(&mut self) -> Result<Document> {
        let size = self.cursor.remaining().len();
        if self.config.max_size > 0 && size > self.config.max_size {
            return Err(Error::detached(ErrorKind::MaxSizeExceeded {
                max: self.config.max_size,
            }));
        }

        self.skip_misc()?;
        if self.cursor.current() != Some(b'<') {
            return Err(self.expected("root element"));
        }
        let (name, root) = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::TrailingContent));
        }

        Ok(Document::new(name, root))
    }

    /// Skip whitespace, declarations, processing instructions and comments
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.take_until(b"?>")?;
            } else if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.take_until(b"-->")?;
            } else if self.cursor.starts_with(b"<!") {
                self.cursor.advance_by(2);
                self.take_until(b">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self) -> Result<(String, Element)> {
        self.expect_byte(b'<')?;
        self.enter()?;

        let name_pos = self.cursor.position();
        let name = self.parse_name()?;
        if name == TEXT_KEY || name == ATTRIBUTES_KEY {
            return Err(Error::at(ErrorKind::ReservedName { name }, name_pos));
        }
        let mut element = Element {
            attributes: self.parse_attributes()?,
            ..Element::default()
        };

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            self.depth -= 1;
            return Ok((name, element));
        }
        self.expect_byte(b'>')?;

        let mut text = String::new();
        loop {
            if self.cursor.starts_with(b"</") {
                let close_pos = self.cursor.position();
                self.cursor.advance_by(2);
                let close = self.parse_name()?;
                if close != name {
                    return Err(Error::at(
                        ErrorKind::MismatchedTag { open: name, close },
                        close_pos,
                    ));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.take_until(b"-->")?;
            } else if self.cursor.starts_with(b"<![CDATA[") {
                self.cursor.advance_by(9);
                let pos = self.cursor.position();
                let raw = self.take_until(b"]]>")?;
                text.push_str(to_text(raw, pos)?);
            } else if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.take_until(b"?>")?;
            } else if self.cursor.current() == Some(b'<') {
                let (tag, child) = self.parse_element()?;
                element.push_child(tag, child);
            } else if self.cursor.is_eof() {
                return Err(self.error_here(ErrorKind::UnterminatedMarkup));
            } else {
                text.push_str(&self.parse_text()?);
            }
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            element.text = Some(trimmed.to_string());
        }

        self.depth -= 1;
        Ok((name, element))
    }

    fn enter(&mut self) -> Result<()> {
        let max = match self.config.max_depth {
            0 => DEPTH_CEILING,
            max => max.min(DEPTH_CEILING),
        };
        self.depth += 1;
        if self.depth > max {
            return Err(self.error_here(ErrorKind::MaxDepthExceeded { max }));
        }
        Ok(())
    }

    fn parse_attributes(&mut self) -> Result<Attributes> {
        let mut attrs = Attributes::new();

        loop {
            let before = self.cursor.pos();
            self.cursor.skip_whitespace();
            let separated = self.cursor.pos() > before;
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) if separated => {}
                Some(_) => return Err(self.expected("whitespace before attribute")),
                None => return Err(self.error_here(ErrorKind::UnterminatedMarkup)),
            }

            let name_pos = self.cursor.position();
            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(Error::at(ErrorKind::DuplicateAttribute { name }, name_pos));
            }
            attrs.insert(name, Scalar::from_wire(value));
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.expected("quoted attribute value")),
        };
        self.cursor.advance();

        let pos = self.cursor.position();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let decoded = decode_entities(to_text(raw, pos)?)
                    .map_err(|kind| Error::at(kind, pos))?;
                return Ok(decoded.into_owned());
            }
            if b == b'<' {
                return Err(Error::with_message(
                    ErrorKind::InvalidToken,
                    Span::at(self.cursor.position()),
                    "'<' is not allowed in attribute values",
                ));
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn parse_text(&mut self) -> Result<String> {
        let pos = self.cursor.position();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = to_text(self.cursor.slice_from(start), pos)?;
        if raw.contains("]]>") {
            return Err(Error::with_message(
                ErrorKind::InvalidToken,
                Span::at(pos),
                "']]>' is not allowed in text",
            ));
        }
        let decoded = decode_entities(raw).map_err(|kind| Error::at(kind, pos))?;
        Ok(decoded.into_owned())
    }

    fn parse_name(&mut self) -> Result<String> {
        let pos = self.cursor.position();
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(b) if is_name_start(b) => self.cursor.advance(),
            _ => return Err(self.expected("name")),
        }
        while let Some(b) = self.cursor.current() {
            if !is_name_char(b) {
                break;
            }
            self.cursor.advance();
        }

        Ok(to_str(self.cursor.slice_from(start), pos)?.to_string())
    }

    /// Consume through `pattern`, returning the bytes before it
    fn take_until(&mut self, pattern: &[u8]) -> Result<&'a [u8]> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                let body = self.cursor.slice_from(start);
                self.cursor.advance_by(pattern.len());
                return Ok(body);
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.expected(&char::from(expected).to_string()))
        }
    }

    fn expected(&self, what: &str) -> Error {
        let found = match self.cursor.current() {
            Some(b) => format!("'{}'", char::from(b).escape_default()),
            None => "end of input".to_string(),
        };
        self.error_here(ErrorKind::Expected {
            expected: what.to_string(),
            found,
        })
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position())
    }
}

fn to_str(bytes: &[u8], pos: Pos) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| Error::at(ErrorKind::InvalidUtf8, pos))
}

/// UTF-8 text made only of XML `Char`s
fn to_text(bytes: &[u8], pos: Pos) -> Result<&str> {
    let text = to_str(bytes, pos)?;
    match text.chars().find(|&ch| !is_xml_char(ch)) {
        Some(ch) => Err(Error::at(ErrorKind::InvalidChar { code: u32::from(ch) }, pos)),
        None => Ok(text),
    }
}

fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> std::result::Result<Cow<'_, str>, ErrorKind> {
    if !input.contains('&') {
        return Ok(Cow::Borrowed(input));
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);

        let after = after.get(1..).unwrap_or_default();
        let Some(end) = after.find(';') else {
            return Err(ErrorKind::InvalidEntity {
                entity: after.to_string(),
            });
        };
        let entity = after.get(..end).unwrap_or_default();

        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => result.push(ch),
            None => {
                return Err(ErrorKind::InvalidEntity {
                    entity: entity.to_string(),
                })
            }
        }
        rest = after.get(end + 1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(Cow::Owned(result))
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let (digits, radix) = match entity.strip_prefix("#x") {
        Some(hex) => (hex, 16),
        None => (entity.strip_prefix('#')?, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .filter(|&ch| is_xml_char(ch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Category;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    #[test]
    fn test_parse_declaration_and_attributes() -> Result<()> {
        let doc = parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <document version=\"3.0\" launchScreen='YES'/>",
        )?;

        assert_eq!(doc.name, "document");
        assert!(doc.root.attr_matches("version", "3.0"));
        assert_eq!(doc.root.attr("launchScreen").and_then(Scalar::as_bool), Some(true));
        Ok(())
    }

    #[test]
    fn test_single_children_become_sequences() -> Result<()> {
        let doc = parse("<view><rect key=\"frame\"/><subviews><label id=\"a\"/><label id=\"b\"/></subviews></view>")?;

        assert_eq!(doc.root.children("rect").len(), 1);
        let labels = doc
            .root
            .first_child("subviews")
            .map(|s| s.children("label").len());
        assert_eq!(labels, Some(2));
        Ok(())
    }

    #[test]
    fn test_sequence_order_is_document_order() -> Result<()> {
        let doc = parse("<c><constraint id=\"3\"/><constraint id=\"1\"/><constraint id=\"2\"/></c>")?;
        let ids: Vec<_> = doc
            .root
            .children("constraint")
            .iter()
            .filter_map(|c| c.id().map(|id| id.into_owned()))
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);
        Ok(())
    }

    #[test]
    fn test_comments_doctype_and_text() -> Result<()> {
        let doc = parse(
            "<!DOCTYPE plist>\n<!-- head -->\n<string key=\"text\">\n  Tap &amp; hold <![CDATA[<now>]]>\n<!-- tail --></string>",
        )?;
        assert_eq!(doc.root.text.as_deref(), Some("Tap & hold <now>"));
        Ok(())
    }

    #[test]
    fn test_entities_in_attributes() -> Result<()> {
        let doc = parse("<label text=\"&lt;&#65;&#x42;&quot;\"/>")?;
        assert!(doc.root.attr_matches("text", "<AB\""));
        Ok(())
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = parse("<view><rect></view>").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::MismatchedTag { open, close }) if open == "rect" && close == "view"
        ));
        assert_eq!(err.map(|e| e.category()), Some(Category::Parse));
    }

    #[test]
    fn test_malformed_inputs_fail() {
        for input in [
            "",
            "plain text",
            "<view",
            "<view id=\"a>",
            "<view id=a/>",
            "<view></view><extra/>",
            "<view>",
            "<view id=\"a\" id=\"b\"/>",
            "<view text=\"&bogus;\"/>",
            "<!-- never closed",
        ] {
            let result = parse(input);
            assert!(
                result.as_ref().is_err_and(|e| e.category() == Category::Parse),
                "expected parse error for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_error_position() {
        let err = parse("<a>\n  <b></c>\n</a>").err();
        let start = err.map(|e| e.span().start);
        assert_eq!(start.map(|p| (p.line, p.col)), Some((2, 6)));
    }

    #[test]
    fn test_depth_limit() {
        let mut parser = Parser::with_config(b"<a><b><c/></b></a>", Config::new(2, 0));
        let err = parser.parse().err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::MaxDepthExceeded { max: 2 })
        ));

        let mut parser = Parser::with_config(b"<a><b><c/></b></a>", Config::unlimited());
        assert!(parser.parse().is_ok());
    }

    #[test]
    fn test_not_well_formed_inputs() {
        let cases: [(&str, fn(&ErrorKind) -> bool); 7] = [
            ("<a b=\"<\"/>", |k| matches!(k, ErrorKind::InvalidToken)),
            ("<a b=\"1\"c=\"2\"/>", |k| matches!(k, ErrorKind::Expected { .. })),
            ("<a>x ]]> y</a>", |k| matches!(k, ErrorKind::InvalidToken)),
            ("<a>&#0;</a>", |k| matches!(k, ErrorKind::InvalidEntity { .. })),
            ("<a b=\"&#xFFFE;\"/>", |k| matches!(k, ErrorKind::InvalidEntity { .. })),
            ("<a>&#+65;</a>", |k| matches!(k, ErrorKind::InvalidEntity { .. })),
            ("<a>\u{1}</a>", |k| matches!(k, ErrorKind::InvalidChar { code: 1 })),
        ];
        for (input, expected) in cases {
            let err = parse(input).err();
            assert!(
                err.as_ref().map(Error::kind).is_some_and(expected),
                "unexpected result for {input:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_escaped_forms_are_accepted() -> Result<()> {
        let doc = parse("<a b=\"&lt;\" c='\"'>x ]]&gt; y&#9;&#x10000;</a>")?;
        assert!(doc.root.attr_matches("b", "<"));
        assert!(doc.root.attr_matches("c", "\""));
        assert_eq!(doc.root.text.as_deref(), Some("x ]]> y\t\u{10000}"));
        Ok(())
    }

    #[test]
    fn test_reserved_element_names() {
        let err = parse("<document><_ id=\"x\"/></document>").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::ReservedName { name }) if name == "_"
        ));
        assert!(parse("<document><_x/></document>").is_ok());
    }

    #[test]
    fn test_unlimited_depth_still_has_ceiling() {
        let depth = usize::from(DEPTH_CEILING) + 1;
        let input = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let outcome = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(move || {
                let mut parser = Parser::with_config(input.as_bytes(), Config::unlimited());
                parser.parse().err().map(|e| e.kind().clone())
            })
            .ok()
            .and_then(|handle| handle.join().ok())
            .flatten();

        assert_eq!(outcome, Some(ErrorKind::MaxDepthExceeded { max: DEPTH_CEILING }));
    }

    #[test]
    fn test_size_limit() {
        let mut parser = Parser::with_config(b"<document/>", Config::new(0, 4));
        assert!(matches!(
            parser.parse().err().as_ref().map(Error::kind),
            Some(ErrorKind::MaxSizeExceeded { max: 4 })
        ));
    }
}
