//! Entry handles.
//!
//! An [`Entry`] is the caller's ticket to a stored interval: a copyable handle
//! carrying the arena key plus the normalized start time and duration. Entry
//! identity is the key, never structural equality — two entries created with
//! identical payloads and times are distinct, and both can live on the
//! timeline at once.
//!
//! The handle keeps its own copy of the times so that identity-based seeks
//! can fall back to a plain time seek after the entry has been removed.

use slotmap::new_key_type;

new_key_type! {
    /// Stable arena key identifying a live timeline entry.
    ///
    /// Keys are generational: once an entry is removed, its key never
    /// resolves again, even if the slot is reused.
    pub struct EntryId;
}

/// A stored interval on a [`Timeline`](crate::Timeline).
///
/// Returned by [`Timeline::add`](crate::Timeline::add). The handle is `Copy`
/// and remains valid for lookups until the entry is removed; afterwards it is
/// stale (lookups return `None`, removal returns `false`) but its recorded
/// times are still readable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry {
    pub(crate) id: EntryId,
    pub(crate) start_time: f64,
    pub(crate) duration: f64,
}

impl Entry {
    /// The arena key. This is the entry's identity.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Start time, after negative-duration normalization.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Duration. Always ≥ 0.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// End time: `start_time + duration`.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}
