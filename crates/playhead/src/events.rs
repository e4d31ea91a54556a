//! Notification channels and dispatch.
//!
//! Four channels, one per boundary crossing direction: `Started`/`Ended`
//! while seeking forward, `Reverted`/`Rewound` while seeking backward.
//! Handlers are plain boxed closures delivered synchronously, inline, in
//! exactly the order the seek engine fires boundaries — a handler observes a
//! fully consistent playhead for the step just taken.
//!
//! Mutating the timeline from inside a handler is not supported; the
//! timeline is mutably borrowed for the duration of the dispatching call.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::entry::{Entry, EntryId};
use crate::list::Boundary;
use crate::timeline::Timeline;

/// Which notification channel an event was delivered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum EventKind {
    /// An entry's start was crossed while seeking forward.
    Started,
    /// An entry's end was crossed while seeking forward.
    Ended,
    /// An entry's end was crossed while seeking backward, undoing its `Ended`.
    Reverted,
    /// An entry's start was crossed while seeking backward, undoing its `Started`.
    Rewound,
}

impl EventKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::Ended => "ended",
            EventKind::Reverted => "reverted",
            EventKind::Rewound => "rewound",
        }
    }

    /// The boundary this notification crosses: starts for
    /// `Started`/`Rewound`, ends for `Ended`/`Reverted`.
    pub(crate) fn boundary(&self) -> Boundary {
        match self {
            EventKind::Started | EventKind::Rewound => Boundary::Start,
            EventKind::Ended | EventKind::Reverted => Boundary::End,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub(crate) type Callback<T> = Box<dyn FnMut(Entry, &T)>;
pub(crate) type AnyCallback<T> = Box<dyn FnMut(EventKind, Entry, &T)>;

/// Registered observers, one list per channel plus the combined feed.
pub(crate) struct Handlers<T: 'static> {
    pub(crate) started: Vec<Callback<T>>,
    pub(crate) ended: Vec<Callback<T>>,
    pub(crate) reverted: Vec<Callback<T>>,
    pub(crate) rewound: Vec<Callback<T>>,
    pub(crate) any: Vec<AnyCallback<T>>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            started: Vec::new(),
            ended: Vec::new(),
            reverted: Vec::new(),
            rewound: Vec::new(),
            any: Vec::new(),
        }
    }
}

impl<T: 'static> Timeline<T> {
    /// Deliver one notification to the matching channel, then to the
    /// combined feed. Called after the playhead state for the step has been
    /// committed.
    pub(crate) fn emit(&mut self, kind: EventKind, id: EntryId) {
        let Self { slots, handlers, .. } = self;
        let slot = &slots[id];
        let entry = Entry {
            id,
            start_time: slot.start,
            duration: slot.duration,
        };
        tracing::trace!(%kind, id = ?entry.id, time = slot.time(kind.boundary()), "notify");

        let channel = match kind {
            EventKind::Started => &mut handlers.started,
            EventKind::Ended => &mut handlers.ended,
            EventKind::Reverted => &mut handlers.reverted,
            EventKind::Rewound => &mut handlers.rewound,
        };
        for handler in channel {
            handler(entry, &slot.value);
        }
        for handler in &mut handlers.any {
            handler(kind, entry, &slot.value);
        }
    }
}
