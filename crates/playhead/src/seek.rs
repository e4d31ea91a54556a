//! The seek engine: single boundary steps and ranged / identity seeks.
//!
//! All multi-step seeks are built from two primitives that fire exactly one
//! boundary each. Tie-breaking is fixed: at equal times a Start fires before
//! an End going forward, and the mirror rule going backward (the End is
//! reverted before the Start is rewound), so undo is always LIFO with
//! respect to the forward firing order.
//!
//! Ranged seeks return the signed number of boundary steps taken — positive
//! seeking forward, negative seeking backward.

use crate::entry::Entry;
use crate::events::EventKind;
use crate::list::Boundary;
use crate::timeline::Timeline;

impl<T: 'static> Timeline<T> {
    /// Fire the single nearest unfired boundary ahead of the playhead.
    ///
    /// Moves `current_time` onto that boundary, advances the corresponding
    /// fired pointer, and emits `Started` or `Ended`. Returns `false` when
    /// the playhead is fully advanced.
    pub fn step_forward(&mut self) -> bool {
        let mut next_start = self.next_unfired(Boundary::Start);
        let mut next_end = self.next_unfired(Boundary::End);

        // Start wins ties.
        if let (Some(start), Some(end)) = (next_start, next_end) {
            if self.time_of(start, Boundary::Start) <= self.time_of(end, Boundary::End) {
                next_end = None;
            } else {
                next_start = None;
            }
        }

        if let Some(start) = next_start {
            self.current_time = self.time_of(start, Boundary::Start);
            self.fired[Boundary::Start as usize] = Some(start);
            self.emit(EventKind::Started, start);
            true
        } else if let Some(end) = next_end {
            self.current_time = self.time_of(end, Boundary::End);
            self.fired[Boundary::End as usize] = Some(end);
            self.emit(EventKind::Ended, end);
            true
        } else {
            false
        }
    }

    /// Undo the single most recently fired boundary behind the playhead.
    ///
    /// Moves `current_time` onto that boundary, retargets the corresponding
    /// fired pointer to the node's predecessor, and emits `Reverted` or
    /// `Rewound`. Returns `false` when nothing remains to undo.
    pub fn step_backward(&mut self) -> bool {
        let mut prev_start = self.last_fired(Boundary::Start);
        let mut prev_end = self.last_fired(Boundary::End);

        // Mirror of the forward tie: the end reverts before the start rewinds.
        if let (Some(start), Some(end)) = (prev_start, prev_end) {
            if self.time_of(start, Boundary::Start) <= self.time_of(end, Boundary::End) {
                prev_start = None;
            } else {
                prev_end = None;
            }
        }

        if let Some(end) = prev_end {
            self.current_time = self.time_of(end, Boundary::End);
            self.fired[Boundary::End as usize] = self.links(end, Boundary::End).prev;
            self.emit(EventKind::Reverted, end);
            true
        } else if let Some(start) = prev_start {
            self.current_time = self.time_of(start, Boundary::Start);
            self.fired[Boundary::Start as usize] = self.links(start, Boundary::Start).prev;
            self.emit(EventKind::Rewound, start);
            true
        } else {
            false
        }
    }

    /// Seek to `time`, firing every boundary on the way, **including**
    /// boundaries exactly at `time`. Always finishes with
    /// `current_time == time`, even when no boundary sits there.
    pub fn seek_to_after(&mut self, time: f64) -> i64 {
        let mut count = 0;
        while time < self.current_time
            && (self
                .last_fired(Boundary::Start)
                .is_some_and(|id| self.time_of(id, Boundary::Start) > time)
                || self
                    .last_fired(Boundary::End)
                    .is_some_and(|id| self.time_of(id, Boundary::End) > time))
        {
            self.step_backward();
            count -= 1;
        }
        while time >= self.current_time
            && (self
                .next_unfired(Boundary::Start)
                .is_some_and(|id| self.time_of(id, Boundary::Start) <= time)
                || self
                    .next_unfired(Boundary::End)
                    .is_some_and(|id| self.time_of(id, Boundary::End) <= time))
        {
            self.step_forward();
            count += 1;
        }

        self.current_time = time;
        count
    }

    /// Seek to `time`, firing every boundary on the way, **excluding**
    /// boundaries exactly at `time` (going backward, those are undone).
    /// Always finishes with `current_time == time`.
    pub fn seek_to_before(&mut self, time: f64) -> i64 {
        let mut count = 0;
        while time <= self.current_time
            && (self
                .last_fired(Boundary::Start)
                .is_some_and(|id| self.time_of(id, Boundary::Start) >= time)
                || self
                    .last_fired(Boundary::End)
                    .is_some_and(|id| self.time_of(id, Boundary::End) >= time))
        {
            self.step_backward();
            count -= 1;
        }
        while time > self.current_time
            && (self
                .next_unfired(Boundary::Start)
                .is_some_and(|id| self.time_of(id, Boundary::Start) < time)
                || self
                    .next_unfired(Boundary::End)
                    .is_some_and(|id| self.time_of(id, Boundary::End) < time))
        {
            self.step_forward();
            count += 1;
        }

        self.current_time = time;
        count
    }

    /// Seek until this entry's start has fired. Identity-based: among entries
    /// sharing the same start instant, seeking stops right after this one.
    /// Falls back to [`Self::seek_to_after`] on the handle's recorded start
    /// time when the entry is no longer on the timeline.
    pub fn seek_to_after_start(&mut self, entry: Entry) -> i64 {
        self.seek_to_node(entry, Boundary::Start, true)
    }

    /// Seek until this entry's start is the next boundary to fire, without
    /// firing it. Falls back to [`Self::seek_to_before`] on the handle's
    /// recorded start time when the entry is no longer on the timeline.
    pub fn seek_to_before_start(&mut self, entry: Entry) -> i64 {
        self.seek_to_node(entry, Boundary::Start, false)
    }

    /// Seek until this entry's end has fired. Identity-based, like
    /// [`Self::seek_to_after_start`].
    pub fn seek_to_after_end(&mut self, entry: Entry) -> i64 {
        self.seek_to_node(entry, Boundary::End, true)
    }

    /// Seek until this entry's end is the next boundary to fire, without
    /// firing it. Identity-based, like [`Self::seek_to_before_start`].
    pub fn seek_to_before_end(&mut self, entry: Entry) -> i64 {
        self.seek_to_node(entry, Boundary::End, false)
    }

    /// Identity seek toward one node. Inclusive stops once the node has
    /// fired; exclusive stops once the node is the next to fire. Unlike the
    /// ranged seeks this leaves `current_time` on the last fired boundary.
    fn seek_to_node(&mut self, entry: Entry, boundary: Boundary, inclusive: bool) -> i64 {
        if !self.slots.contains_key(entry.id) {
            let time = match boundary {
                Boundary::Start => entry.start_time(),
                Boundary::End => entry.end_time(),
            };
            return if inclusive {
                self.seek_to_after(time)
            } else {
                self.seek_to_before(time)
            };
        }

        let node = entry.id;
        let time = self.time_of(node, boundary);
        let mut count = 0;

        if inclusive {
            while self.last_fired(boundary) != Some(node) && self.current_time > time {
                if !self.step_backward() {
                    break;
                }
                count -= 1;
            }
            while self.last_fired(boundary) != Some(node) && self.current_time <= time {
                if !self.step_forward() {
                    break;
                }
                count += 1;
            }
        } else {
            while self.next_unfired(boundary) != Some(node) && self.current_time >= time {
                if !self.step_backward() {
                    break;
                }
                count -= 1;
            }
            while self.next_unfired(boundary) != Some(node) && self.current_time < time {
                if !self.step_forward() {
                    break;
                }
                count += 1;
            }
        }

        count
    }
}
