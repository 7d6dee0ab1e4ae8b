//! XML parsing and rendering

pub mod cursor;
pub mod parser;
pub mod writer;

pub use parser::{Config as ParseConfig, Parser, DEPTH_CEILING};
pub use writer::{Config as RenderConfig, Writer, DECLARATION};
