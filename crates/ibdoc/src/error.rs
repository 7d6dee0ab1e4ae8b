//! Error types for ibdoc

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    /// True for errors that did not come from source text
    pub const fn is_empty(&self) -> bool {
        self.start.line == 0 && self.end.line == 0
    }
}

/// Broad classes of failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Input text is not well-formed XML
    Parse,
    /// An expected element is missing from an otherwise valid document
    NotFound,
    /// A sequence ended up with two elements sharing an identifier
    InvariantViolation,
    /// A caller supplied a value outside the accepted vocabulary
    InvalidArgument,
    /// A generic tree does not have the element shape
    Shape,
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidToken,
    Expected { expected: String, found: String },
    UnterminatedMarkup,
    MismatchedTag { open: String, close: String },
    DuplicateAttribute { name: String },
    InvalidEntity { entity: String },
    InvalidUtf8,
    InvalidChar { code: u32 },
    ReservedName { name: String },
    TrailingContent,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    NotFound { path: String },
    DuplicateId { id: String },
    InvalidBoolean { value: String },
    InvalidColor { value: String },
    UnknownVariant { kind: &'static str, value: String },
    InvalidShape { path: String, expected: &'static str },
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::InvalidToken
            | Self::Expected { .. }
            | Self::UnterminatedMarkup
            | Self::MismatchedTag { .. }
            | Self::DuplicateAttribute { .. }
            | Self::InvalidEntity { .. }
            | Self::InvalidUtf8
            | Self::InvalidChar { .. }
            | Self::ReservedName { .. }
            | Self::TrailingContent
            | Self::MaxDepthExceeded { .. }
            | Self::MaxSizeExceeded { .. } => Category::Parse,
            Self::NotFound { .. } => Category::NotFound,
            Self::DuplicateId { .. } => Category::InvariantViolation,
            Self::InvalidBoolean { .. }
            | Self::InvalidColor { .. }
            | Self::UnknownVariant { .. } => Category::InvalidArgument,
            Self::InvalidShape { .. } => Category::Shape,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => write!(f, "invalid token"),
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnterminatedMarkup => write!(f, "unterminated markup"),
            Self::MismatchedTag { open, close } => {
                write!(f, "closing tag </{close}> does not match <{open}>")
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidEntity { entity } => write!(f, "invalid xml entity: &{entity};"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::InvalidChar { code } => write!(f, "character U+{code:04X} is not allowed"),
            Self::ReservedName { name } => write!(f, "reserved element name: {name}"),
            Self::TrailingContent => write!(f, "content after root element"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::NotFound { path } => write!(f, "element not found: {path}"),
            Self::DuplicateId { id } => write!(f, "duplicate id in sequence: {id}"),
            Self::InvalidBoolean { value } => write!(f, "invalid boolean argument: {value}"),
            Self::InvalidColor { value } => write!(f, "invalid color: {value}"),
            Self::UnknownVariant { kind, value } => write!(f, "unknown {kind}: {value}"),
            Self::InvalidShape { path, expected } => {
                write!(f, "expected {expected} at {path}")
            }
        }
    }
}

/// Main error type for ibdoc
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Error that is not tied to a source location
    pub fn detached(kind: ErrorKind) -> Self {
        Self::new(kind, Span::empty())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::detached(ErrorKind::NotFound { path: path.into() })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "error at {}: {}", self.span.start, self.message)
        }
    }
}

/// Result type alias for ibdoc
pub type Result<T> = std::result::Result<T, Error>;
