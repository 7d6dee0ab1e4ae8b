//! Mutation events and the observers that receive them
//!
//! Library code never logs through global state. Callers hand an
//! [`Observer`] to the editor; the default drops everything.

use tracing::{debug, warn};

/// Something the editor did to a document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    /// An element with the same key was replaced by a fresh one
    Replaced { sequence: &'a str, key: &'a str },
    /// An element was appended to a sequence
    Appended { sequence: &'a str, key: &'a str },
    /// An element was removed from a sequence
    Removed { sequence: &'a str, key: &'a str },
    /// A sequence holds two elements with the same id
    DuplicateId { sequence: &'a str, id: &'a str },
}

pub trait Observer {
    fn on_event(&self, event: &Event<'_>);
}

/// Discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&self, _event: &Event<'_>) {}
}

/// Forwards events to `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: &Event<'_>) {
        match event {
            Event::Replaced { sequence, key } => {
                debug!(sequence, key, "replaced existing item");
            }
            Event::Appended { sequence, key } => debug!(sequence, key, "appended item"),
            Event::Removed { sequence, key } => debug!(sequence, key, "removed item"),
            Event::DuplicateId { sequence, id } => {
                warn!(sequence, id, "duplicate id left in sequence");
            }
        }
    }
}

impl<F> Observer for F
where
    F: Fn(&Event<'_>),
{
    fn on_event(&self, event: &Event<'_>) {
        self(event);
    }
}
