//! ibdoc - Interface Builder storyboard documents with stable identifiers
//!
//! # Quick Start
//!
//! ```
//! use ibdoc::{navigate, ContentMode, Editor};
//! # fn main() -> Result<(), ibdoc::Error> {
//! let mut doc = ibdoc::template::launch_screen();
//! Editor::new(&mut doc).attach_image("SplashScreen", ContentMode::ScaleAspectFit)?;
//!
//! let xml = ibdoc::to_string(&doc);
//! let parsed = ibdoc::from_str(&xml)?;
//! assert_eq!(parsed, doc);
//! assert_eq!(navigate::constraints(&parsed)?.len(), 8);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Category, Error, ErrorKind, Pos, Result, Span};

pub mod value;
pub use value::{bool_literal, parse_bool_literal, Array, Object, Scalar, Value};

pub mod tree;
pub use tree::{Document, Element};

pub mod id;
pub use id::{constraint_id, generate_id};

pub mod mutate;
pub use mutate::{check_unique_ids, remove_by_id, upsert_by_id};

pub mod normalize;
pub use normalize::{normalize_keys, restore_reserved_key};

pub mod observe;
pub use observe::{Event, NoopObserver, Observer, TracingObserver};

pub mod xml;
pub use xml::{ParseConfig, Parser, RenderConfig, Writer};

pub mod navigate;

pub mod schema;
pub use schema::{ConstraintAttribute, ContentMode, ElementKind, IntoElement, Record};

pub mod color;
pub use color::{css_color, custom_color_from_css, CustomColor};

pub mod splash;
pub use splash::Editor;

pub mod template;

/// Parse a document from string
pub fn from_str(s: &str) -> Result<Document> {
    Parser::new(s.as_bytes()).parse()
}

/// Parse a document from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
    Parser::new(bytes).parse()
}

/// Parse with custom limits
pub fn from_str_with_config(s: &str, config: ParseConfig) -> Result<Document> {
    Parser::with_config(s.as_bytes(), config).parse()
}

/// Render with the default four-space indent
pub fn to_string(doc: &Document) -> String {
    Writer::new().render(doc)
}

/// Render with custom options
pub fn to_string_with_config(doc: &Document, config: RenderConfig) -> String {
    Writer::with_config(config).render(doc)
}
