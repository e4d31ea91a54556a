//! Interval timeline with a movable, event-emitting playhead.
//!
//! A [`Timeline`] stores entries — opaque payload + start time + duration —
//! and a playhead ("current time"). Seeking the playhead across an entry's
//! start or end instant fires a notification: [`Started`](EventKind::Started)
//! / [`Ended`](EventKind::Ended) going forward,
//! [`Reverted`](EventKind::Reverted) / [`Rewound`](EventKind::Rewound) going
//! backward. Order and multiplicity are deterministic no matter how the
//! playhead jumps or how entries are added and removed mid-timeline.
//!
//! # Ordering rules
//!
//! - Boundaries fire in time order; at equal times a Start fires before an
//!   End, so back-to-back entries overlap for an instant rather than gap.
//! - Entries sharing identical boundary times fire in insertion order.
//! - Seeking backward undoes notifications in exact LIFO order: the most
//!   recently fired boundary is always the first one reverted or rewound.
//! - Zero-duration entries fire Started immediately followed by Ended.
//!
//! # Mutating behind the playhead
//!
//! Adding or removing an entry at a time the playhead has already passed is
//! governed by [`ModifiedBehaviour`]: silently patch the fired state
//! (`Ignore`), rewind to the mutation point (`Rewind`), or rewind and replay
//! back to the original time (`Reapply`).
//!
//! # Example
//!
//! ```rust
//! use playhead::Timeline;
//!
//! let mut timeline = Timeline::new();
//! timeline.on_started(|_, name: &&str| println!("{name} started"));
//! timeline.on_ended(|_, name| println!("{name} ended"));
//!
//! let intro = timeline.add("intro", 0.0, 10.0);
//! timeline.add("outro", 10.0, 5.0);
//!
//! timeline.set_current_time(12.0); // intro started/ended, outro started
//! timeline.seek_to_before_start(intro); // everything undone again
//! ```
//!
//! Delivery is synchronous and single-threaded; handlers run inline during
//! the seek that fires them and must not mutate the timeline.

mod behaviour;
mod entry;
mod events;
mod list;
mod seek;
mod timeline;

pub use behaviour::ModifiedBehaviour;
pub use entry::{Entry, EntryId};
pub use events::EventKind;
pub use timeline::Timeline;
