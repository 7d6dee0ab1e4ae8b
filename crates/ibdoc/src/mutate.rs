//! Keyed insert and removal over element sequences
//!
//! Interface Builder rejects documents in which two siblings share an `id`.
//! Every operation here keeps that invariant: an upsert first drops every
//! element carrying the incoming key, then appends. Removal of a missing key
//! is a no-op. Sequences are short, so all lookups are linear scans.

use std::collections::HashSet;

use crate::error::{Error, ErrorKind, Result};
use crate::tree::{Element, ID_ATTRIBUTE};

/// Identifier accepted by [`remove_by_id`]: a literal id or an element
/// whose `id` attribute is used
pub trait IdRef {
    fn id_ref(&self) -> Option<String>;
}

impl IdRef for str {
    fn id_ref(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IdRef for String {
    fn id_ref(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl IdRef for Element {
    fn id_ref(&self) -> Option<String> {
        self.id().map(|id| id.into_owned())
    }
}

impl<T: IdRef + ?Sized> IdRef for &T {
    fn id_ref(&self) -> Option<String> {
        (**self).id_ref()
    }
}

/// Replace-or-append keyed on `attribute`.
///
/// Returns the first element that was replaced. An item without the
/// attribute is appended unconditionally.
pub fn upsert_by(seq: &mut Vec<Element>, attribute: &str, item: Element) -> Option<Element> {
    let Some(key) = item.attr(attribute).map(|value| value.to_wire().into_owned()) else {
        seq.push(item);
        return None;
    };

    let mut replaced = None;
    let mut index = 0;
    while index < seq.len() {
        if seq.get(index).is_some_and(|e| e.attr_matches(attribute, &key)) {
            let removed = seq.remove(index);
            if replaced.is_none() {
                replaced = Some(removed);
            }
        } else {
            index += 1;
        }
    }
    seq.push(item);

    debug_assert_eq!(
        seq.iter().filter(|e| e.attr_matches(attribute, &key)).count(),
        1,
        "upsert left more than one element keyed {attribute}={key}"
    );
    replaced
}

/// Remove the first element whose `attribute` equals `value`
pub fn remove_by(seq: &mut Vec<Element>, attribute: &str, value: &str) -> Option<Element> {
    let index = seq.iter().position(|e| e.attr_matches(attribute, value))?;
    Some(seq.remove(index))
}

/// Insert `item`, replacing any element with the same `id`
pub fn upsert_by_id(seq: &mut Vec<Element>, item: Element) -> Option<Element> {
    upsert_by(seq, ID_ATTRIBUTE, item)
}

/// Remove the first element matching a literal id or another element's id
pub fn remove_by_id<R: IdRef + ?Sized>(seq: &mut Vec<Element>, id: &R) -> Option<Element> {
    let id = id.id_ref()?;
    remove_by(seq, ID_ATTRIBUTE, &id)
}

/// First id that occurs twice in `seq`, if any
pub fn find_duplicate_id(seq: &[Element]) -> Option<String> {
    let mut seen = HashSet::with_capacity(seq.len());
    seq.iter()
        .filter_map(Element::id)
        .find(|id| !seen.insert(id.clone()))
        .map(|id| id.into_owned())
}

/// Fail with [`ErrorKind::DuplicateId`] if two elements share an id
pub fn check_unique_ids(seq: &[Element]) -> Result<()> {
    match find_duplicate_id(seq) {
        Some(id) => Err(Error::detached(ErrorKind::DuplicateId { id })),
        None => Ok(()),
    }
}
