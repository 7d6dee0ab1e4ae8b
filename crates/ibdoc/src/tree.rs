//! Typed document tree
//!
//! An [`Element`] keeps its attributes apart from its child collections, and
//! every child collection is an ordered sequence even when it holds a single
//! element. [`Element::to_value`] and [`Element::from_value`] convert to and
//! from the generic [`Value`] shape, where attributes live under `"$"` and
//! text under `"_"`.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::value::{Array, Object, Scalar, Value};

/// Key holding the attribute object in the generic shape
pub const ATTRIBUTES_KEY: &str = "$";
/// Key holding text content in the generic shape
pub const TEXT_KEY: &str = "_";
/// Attribute carrying element identity
pub const ID_ATTRIBUTE: &str = "id";

pub type Attributes = IndexMap<String, Scalar>;
pub type Children = IndexMap<String, Vec<Element>>;

/// One node of a document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub attributes: Attributes,
    pub children: Children,
    pub text: Option<String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style setter that skips `None`
    pub fn with_opt_attr<V: Into<Scalar>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }

    /// Builder-style child append
    pub fn with_child(mut self, tag: impl Into<String>, child: Self) -> Self {
        self.push_child(tag, child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Scalar> {
        self.attributes.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.attributes.insert(key.into(), value.into())
    }

    /// True when attribute `key` is present with wire text `wire`
    pub fn attr_matches(&self, key: &str, wire: &str) -> bool {
        self.attr(key).is_some_and(|value| value.matches(wire))
    }

    /// The `id` attribute in wire form
    pub fn id(&self) -> Option<Cow<'_, str>> {
        self.attr(ID_ATTRIBUTE).map(Scalar::to_wire)
    }

    /// Child sequence for `tag`; empty when absent
    pub fn children(&self, tag: &str) -> &[Self] {
        self.children.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn children_mut(&mut self, tag: &str) -> Option<&mut Vec<Self>> {
        self.children.get_mut(tag)
    }

    /// Child sequence for `tag`, created empty when absent
    pub fn sequence_mut(&mut self, tag: &str) -> &mut Vec<Self> {
        self.children.entry(tag.to_string()).or_default()
    }

    pub fn push_child(&mut self, tag: impl Into<String>, child: Self) {
        self.children.entry(tag.into()).or_default().push(child);
    }

    pub fn first_child(&self, tag: &str) -> Option<&Self> {
        self.children.get(tag).and_then(|seq| seq.first())
    }

    pub fn first_child_mut(&mut self, tag: &str) -> Option<&mut Self> {
        self.children.get_mut(tag).and_then(|seq| seq.first_mut())
    }

    /// Remove the sequence for `tag` if it holds no elements
    pub fn drop_empty(&mut self, tag: &str) -> bool {
        if self.children.get(tag).is_some_and(Vec::is_empty) {
            self.children.shift_remove(tag);
            true
        } else {
            false
        }
    }

    /// No attributes, children or text
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty() && self.text.is_none()
    }

    /// Convert into the generic shape
    pub fn to_value(&self) -> Value {
        let mut obj = Object::with_capacity(self.children.len() + 2);

        if !self.attributes.is_empty() {
            let attrs: Object = self
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                .collect();
            obj.insert(ATTRIBUTES_KEY, attrs);
        }

        if let Some(text) = &self.text {
            obj.insert(TEXT_KEY, text.as_str());
        }

        for (tag, seq) in &self.children {
            let items: Array = seq.iter().map(Self::to_value).collect();
            obj.insert(tag.clone(), items);
        }

        Value::Object(obj)
    }

    /// Build from the generic shape.
    ///
    /// A child given as a bare object becomes a one-element sequence, and a
    /// scalar sequence item becomes a text-only element.
    pub fn from_value(value: &Value, path: &str) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| shape_error(path, "object"))?;
        let mut element = Self::new();

        for (key, value) in obj {
            match key.as_str() {
                ATTRIBUTES_KEY => {
                    let attrs = value
                        .as_object()
                        .ok_or_else(|| shape_error(&child_path(path, key), "attribute object"))?;
                    for (name, value) in attrs {
                        let scalar = value.to_scalar().ok_or_else(|| {
                            shape_error(&child_path(path, name), "scalar attribute")
                        })?;
                        element.attributes.insert(name.clone(), scalar);
                    }
                }
                TEXT_KEY => {
                    let text = value
                        .to_scalar()
                        .ok_or_else(|| shape_error(&child_path(path, key), "text"))?;
                    element.text = Some(text.to_wire().into_owned());
                }
                tag => {
                    let tag_path = child_path(path, tag);
                    let seq = match value {
                        Value::Array(items) => items
                            .iter()
                            .map(|item| child_from_value(item, &tag_path))
                            .collect::<Result<Vec<_>>>()?,
                        Value::Object(_) => vec![Self::from_value(value, &tag_path)?],
                        _ => return Err(shape_error(&tag_path, "element sequence")),
                    };
                    element.children.insert(tag.to_string(), seq);
                }
            }
        }

        Ok(element)
    }
}

fn child_from_value(item: &Value, path: &str) -> Result<Element> {
    match item.to_scalar() {
        Some(text) => Ok(Element::new().with_text(text.to_wire())),
        None => Element::from_value(item, path),
    }
}

fn child_path(parent: &str, key: &str) -> String {
    format!("{parent}/{key}")
}

fn shape_error(path: &str, expected: &'static str) -> Error {
    Error::detached(ErrorKind::InvalidShape {
        path: path.to_string(),
        expected,
    })
}

/// A whole document: the root tag name plus the root element
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    pub root: Element,
}

impl Document {
    pub fn new(name: impl Into<String>, root: Element) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Generic shape, wrapped in a single-key object named after the root
    pub fn to_value(&self) -> Value {
        let mut wrapper = Object::with_capacity(1);
        wrapper.insert(self.name.clone(), self.root.to_value());
        Value::Object(wrapper)
    }

    /// Inverse of [`Document::to_value`]
    pub fn from_value(value: &Value) -> Result<Self> {
        let wrapper = value
            .as_object()
            .filter(|obj| obj.len() == 1)
            .ok_or_else(|| shape_error("", "single-key root object"))?;
        let Some((name, root)) = wrapper.iter().next() else {
            return Err(shape_error("", "single-key root object"));
        };
        let root = match root {
            Value::Array(items) if items.len() == 1 => items.get(0).unwrap_or(root),
            _ => root,
        };
        Ok(Self::new(name.clone(), Element::from_value(root, name)?))
    }
}
