//! Key rewriting over the generic tree
//!
//! Declarative builders cannot pass an attribute literally named `key`, so
//! they emit it as `xKey`. Before rendering, [`normalize_keys`] with
//! [`restore_reserved_key`] turns every `xKey` back into `key`.

use crate::error::Result;
use crate::tree::Document;
use crate::value::{Object, Value};

/// Name builders use in place of `key`
pub const RESERVED_KEY_ALIAS: &str = "xKey";
/// Attribute name the alias stands for
pub const RESERVED_KEY: &str = "key";

/// Deep copy of `value` with every object key passed through `rename`.
///
/// Keys are renamed at every depth, including inside arrays, attribute
/// objects and the root wrapper. Scalar values are copied as-is. When two
/// keys of one object rename to the same name, the later entry wins.
pub fn normalize_keys<F>(value: &Value, rename: &F) -> Value
where
    F: Fn(&str, &Value) -> String,
{
    match value {
        Value::Object(obj) => {
            let mut out = Object::with_capacity(obj.len());
            for (key, child) in obj {
                out.insert(rename(key, child), normalize_keys(child, rename));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize_keys(item, rename))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Rename function mapping [`RESERVED_KEY_ALIAS`] to [`RESERVED_KEY`]
pub fn restore_reserved_key(key: &str, _value: &Value) -> String {
    if key == RESERVED_KEY_ALIAS {
        RESERVED_KEY.to_string()
    } else {
        key.to_string()
    }
}

impl Document {
    /// Rename keys through the generic shape and rebuild the document
    pub fn normalize_keys<F>(&self, rename: &F) -> Result<Self>
    where
        F: Fn(&str, &Value) -> String,
    {
        Self::from_value(&normalize_keys(&self.to_value(), rename))
    }

    /// Apply [`restore_reserved_key`] to the whole document
    pub fn restore_reserved_keys(&self) -> Result<Self> {
        self.normalize_keys(&restore_reserved_key)
    }
}
