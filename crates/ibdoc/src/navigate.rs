//! Named locations inside a launch screen document
//!
//! Wrapper elements along a path must exist; a missing one is
//! [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) carrying the path
//! walked so far. The leaf sequence at the end of a path may be absent and
//! reads as empty. Mutable accessors create it.

use crate::error::{Error, Result};
use crate::tree::{Document, Element};

/// Tags from the root to the main view; the first element of each is taken
pub const MAIN_VIEW_PATH: [&str; 5] = ["scenes", "scene", "objects", "viewController", "view"];
pub const SUBVIEWS: &str = "subviews";
pub const CONSTRAINTS: &str = "constraints";
pub const CONSTRAINT: &str = "constraint";
pub const RESOURCES: &str = "resources";
pub const RESOURCE_IMAGE: &str = "image";

fn descend<'a>(from: &'a Element, start: &str, tags: &[&str]) -> Result<&'a Element> {
    let mut path = start.to_string();
    let mut current = from;
    for tag in tags {
        path.push('/');
        path.push_str(tag);
        current = current
            .first_child(tag)
            .ok_or_else(|| Error::not_found(path.clone()))?;
    }
    Ok(current)
}

fn descend_mut<'a>(from: &'a mut Element, start: &str, tags: &[&str]) -> Result<&'a mut Element> {
    let mut path = start.to_string();
    let mut current = from;
    for tag in tags {
        path.push('/');
        path.push_str(tag);
        current = current
            .first_child_mut(tag)
            .ok_or_else(|| Error::not_found(path.clone()))?;
    }
    Ok(current)
}

fn main_view_path(doc: &Document) -> String {
    format!("{}/{}", doc.name, MAIN_VIEW_PATH.join("/"))
}

/// The container view of the first scene
pub fn main_view(doc: &Document) -> Result<&Element> {
    descend(&doc.root, &doc.name, &MAIN_VIEW_PATH)
}

pub fn main_view_mut(doc: &mut Document) -> Result<&mut Element> {
    descend_mut(&mut doc.root, &doc.name, &MAIN_VIEW_PATH)
}

/// Main view subviews of kind `tag`
pub fn subviews<'a>(doc: &'a Document, tag: &str) -> Result<&'a [Element]> {
    let path = main_view_path(doc);
    let view = main_view(doc)?;
    Ok(descend(view, &path, &[SUBVIEWS])?.children(tag))
}

pub fn subviews_mut<'a>(doc: &'a mut Document, tag: &str) -> Result<&'a mut Vec<Element>> {
    let path = main_view_path(doc);
    let view = main_view_mut(doc)?;
    Ok(descend_mut(view, &path, &[SUBVIEWS])?.sequence_mut(tag))
}

/// Main view layout constraints
pub fn constraints(doc: &Document) -> Result<&[Element]> {
    let path = main_view_path(doc);
    let view = main_view(doc)?;
    Ok(descend(view, &path, &[CONSTRAINTS])?.children(CONSTRAINT))
}

pub fn constraints_mut(doc: &mut Document) -> Result<&mut Vec<Element>> {
    let path = main_view_path(doc);
    let view = main_view_mut(doc)?;
    Ok(descend_mut(view, &path, &[CONSTRAINTS])?.sequence_mut(CONSTRAINT))
}

/// Image entries of the document resources
pub fn resource_images(doc: &Document) -> Result<&[Element]> {
    Ok(descend(&doc.root, &doc.name, &[RESOURCES])?.children(RESOURCE_IMAGE))
}

pub fn resource_images_mut(doc: &mut Document) -> Result<&mut Vec<Element>> {
    Ok(descend_mut(&mut doc.root, &doc.name, &[RESOURCES])?.sequence_mut(RESOURCE_IMAGE))
}

/// Drop leaf sequences a removal left empty
pub(crate) fn prune_empty(doc: &mut Document, subview_tag: &str) {
    if let Ok(view) = main_view_mut(doc) {
        if let Some(subviews) = view.first_child_mut(SUBVIEWS) {
            subviews.drop_empty(subview_tag);
        }
        if let Some(constraints) = view.first_child_mut(CONSTRAINTS) {
            constraints.drop_empty(CONSTRAINT);
        }
    }
    if let Some(resources) = doc.root.first_child_mut(RESOURCES) {
        resources.drop_empty(RESOURCE_IMAGE);
    }
}
