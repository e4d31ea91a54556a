//! The timeline container: entry storage, mutation, and observer registry.

use slotmap::SlotMap;

use crate::behaviour::ModifiedBehaviour;
use crate::entry::{Entry, EntryId};
use crate::events::{EventKind, Handlers};
use crate::list::{Boundary, Links, Slot};

/// A timeline of interval entries with a movable playhead.
///
/// Entries are opaque payloads with a start time and a non-negative duration.
/// Seeking the playhead across an entry's start or end instant fires a
/// notification; the order and multiplicity of notifications is deterministic
/// regardless of how the playhead jumps or how entries are inserted and
/// removed mid-timeline. See the crate docs for the ordering rules.
///
/// All operations are synchronous and single-threaded. Handlers run inline
/// during seeks; mutating the timeline from inside a handler is not
/// supported.
pub struct Timeline<T: 'static> {
    pub(crate) slots: SlotMap<EntryId, Slot<T>>,
    /// First node of the start and end lists.
    pub(crate) head: [Option<EntryId>; 2],
    /// Node of the most recently fired Started / Ended event.
    pub(crate) fired: [Option<EntryId>; 2],
    pub(crate) current_time: f64,
    pub(crate) handlers: Handlers<T>,

    /// What happens when an entry is added or removed at a time the playhead
    /// has already passed.
    pub modified_behaviour: ModifiedBehaviour,
}

impl<T: 'static> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Timeline<T> {
    /// Create an empty timeline with the playhead at time 0.
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            head: [None; 2],
            fired: [None; 2],
            current_time: 0.0,
            handlers: Handlers::default(),
            modified_behaviour: ModifiedBehaviour::default(),
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert an entry starting at `time` with the given `duration`.
    ///
    /// A negative duration is normalized: the entry starts that much earlier
    /// instead. If the playhead has already passed `time`, the effect on
    /// fired notifications is governed by [`Self::modified_behaviour`].
    pub fn add(&mut self, value: T, time: f64, duration: f64) -> Entry {
        let (time, duration) = if duration < 0.0 {
            (time + duration, -duration)
        } else {
            (time, duration)
        };
        let end_time = time + duration;

        let at = self.current_time;
        let fired_start = self.previous_start();

        let id = self.slots.insert(Slot {
            value,
            start: time,
            duration,
            links: [Links::default(); 2],
        });
        let entry = Entry {
            id,
            start_time: time,
            duration,
        };
        tracing::debug!(?id, start = time, end = end_time, "add entry");

        // Undo everything that logically happens after the new entry, so
        // those events are not left fired "too early" relative to it.
        if self.modified_behaviour.rewinds() && at > time {
            self.seek_to_after(time);
        }

        self.splice(id, Boundary::Start);
        self.splice(id, Boundary::End);

        if self.modified_behaviour == ModifiedBehaviour::Ignore {
            // If the playhead already passed the new node, silently count it
            // as fired. Strictly-greater: a node at exactly the fired node's
            // time stays pending.
            if let Some(fired) = self.fired[Boundary::Start as usize]
                && at >= time
                && time > self.time_of(fired, Boundary::Start)
            {
                self.fired[Boundary::Start as usize] = Some(id);
            }
            if let Some(fired) = self.fired[Boundary::End as usize]
                && at >= end_time
                && end_time > self.time_of(fired, Boundary::End)
            {
                self.fired[Boundary::End as usize] = Some(id);
            }
        } else if self.modified_behaviour == ModifiedBehaviour::Reapply && at > time {
            self.replay_to(at, fired_start);
        }

        entry
    }

    /// Insert an entry with zero duration: its start and end fire
    /// back-to-back at the same instant.
    pub fn add_instant(&mut self, value: T, time: f64) -> Entry {
        self.add(value, time, 0.0)
    }

    /// Remove an entry.
    ///
    /// Returns `false` if the handle is stale (the entry was never added or
    /// was already removed). If the playhead has already passed the entry's
    /// start, [`Self::modified_behaviour`] governs whether its notifications
    /// are undone and replayed.
    pub fn remove(&mut self, entry: Entry) -> bool {
        if !self.slots.contains_key(entry.id) {
            return false;
        }

        let at = self.current_time;
        let fired_start = self.previous_start();
        let started = at >= self.slots[entry.id].start;

        // Undo this entry's own notifications (and any later ones) before
        // its nodes disappear from the lists.
        if started && self.modified_behaviour.rewinds() {
            self.seek_to_before_start(entry);
        }

        for boundary in Boundary::BOTH {
            if self.head[boundary as usize] == Some(entry.id) {
                self.head[boundary as usize] = self.links(entry.id, boundary).next;
            }
            if self.fired[boundary as usize] == Some(entry.id) {
                self.fired[boundary as usize] = self.links(entry.id, boundary).prev;
            }
            self.unlink(entry.id, boundary);
        }
        self.slots.remove(entry.id);
        tracing::debug!(id = ?entry.id, "remove entry");

        if started && self.modified_behaviour == ModifiedBehaviour::Reapply {
            self.replay_to(at, fired_start);
        }

        true
    }

    /// Replay forward to the pre-mutation time. When the entry that had most
    /// recently started sits exactly at that time, reseek by its identity so
    /// equal-time ties resolve the same way they originally fired.
    fn replay_to(&mut self, at: f64, fired_start: Option<Entry>) {
        match fired_start {
            Some(previous) if previous.start_time == at => {
                self.seek_to_after_start(previous);
            }
            _ => {
                self.seek_to_after(at);
            }
        }
    }

    // =========================================================================
    // Playhead accessors
    // =========================================================================

    /// The playhead's current time.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Move the playhead, firing events on the way. Equivalent to
    /// [`Self::seek_to_after`]; returns the signed boundary step count.
    ///
    /// Setting the same time twice is not always a no-op: a seek that landed
    /// via an exclusive or identity method may have left equal-time
    /// boundaries unfired.
    pub fn set_current_time(&mut self, time: f64) -> i64 {
        self.seek_to_after(time)
    }

    /// The next entry whose start the playhead will cross seeking forward.
    pub fn next_start(&self) -> Option<Entry> {
        self.next_unfired(Boundary::Start).map(|id| self.handle(id))
    }

    /// The next entry whose end the playhead will cross seeking forward.
    pub fn next_end(&self) -> Option<Entry> {
        self.next_unfired(Boundary::End).map(|id| self.handle(id))
    }

    /// The last entry that started.
    pub fn previous_start(&self) -> Option<Entry> {
        self.last_fired(Boundary::Start).map(|id| self.handle(id))
    }

    /// The last entry that ended.
    pub fn previous_end(&self) -> Option<Entry> {
        self.last_fired(Boundary::End).map(|id| self.handle(id))
    }

    // =========================================================================
    // Entry accessors
    // =========================================================================

    /// The payload of a live entry, or `None` for a stale handle.
    pub fn get(&self, entry: Entry) -> Option<&T> {
        self.slots.get(entry.id).map(|slot| &slot.value)
    }

    /// Whether the handle refers to a live entry.
    pub fn contains(&self, entry: Entry) -> bool {
        self.slots.contains_key(entry.id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the timeline holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handles of all live entries, in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.slots.iter().map(|(id, slot)| Entry {
            id,
            start_time: slot.start,
            duration: slot.duration,
        })
    }

    pub(crate) fn handle(&self, id: EntryId) -> Entry {
        let slot = &self.slots[id];
        Entry {
            id,
            start_time: slot.start,
            duration: slot.duration,
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Observe entries starting while seeking forward. Handlers stay
    /// registered for the timeline's lifetime.
    pub fn on_started(&mut self, handler: impl FnMut(Entry, &T) + 'static) {
        self.handlers.started.push(Box::new(handler));
    }

    /// Observe entries ending while seeking forward.
    pub fn on_ended(&mut self, handler: impl FnMut(Entry, &T) + 'static) {
        self.handlers.ended.push(Box::new(handler));
    }

    /// Observe entry ends being undone while seeking backward.
    pub fn on_reverted(&mut self, handler: impl FnMut(Entry, &T) + 'static) {
        self.handlers.reverted.push(Box::new(handler));
    }

    /// Observe entry starts being undone while seeking backward.
    pub fn on_rewound(&mut self, handler: impl FnMut(Entry, &T) + 'static) {
        self.handlers.rewound.push(Box::new(handler));
    }

    /// Observe every notification with its [`EventKind`], after the
    /// channel-specific handlers for that notification have run.
    pub fn on_event(&mut self, handler: impl FnMut(EventKind, Entry, &T) + 'static) {
        self.handlers.any.push(Box::new(handler));
    }
}
