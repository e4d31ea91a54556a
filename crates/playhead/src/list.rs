//! Intrusive boundary lists.
//!
//! Every entry is a node in two independent doubly-linked lists at once: the
//! start list (ordered by start times) and the end list (ordered by end
//! times). Rather than heap-allocated nodes, the links live inside the arena
//! slot itself, one [`Links`] pair per [`Boundary`], addressed by stable
//! [`EntryId`] keys.
//!
//! Insertion walks from an anchor — the fired cursor node when seeking has
//! already progressed, else the list head — so entries added near the
//! playhead splice in O(distance) instead of O(n). Among nodes sharing the
//! exact same time, a new node lands after all of them, which is what makes
//! equal-time notification order follow insertion order.

use crate::entry::EntryId;
use crate::timeline::Timeline;

/// Selects one of the two boundary lists an entry is linked into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Boundary {
    Start = 0,
    End = 1,
}

impl Boundary {
    pub(crate) const BOTH: [Boundary; 2] = [Boundary::Start, Boundary::End];
}

/// Neighbor links for one boundary list.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Links {
    pub(crate) prev: Option<EntryId>,
    pub(crate) next: Option<EntryId>,
}

/// Arena slot: the entry's payload, normalized interval, and both link pairs.
pub(crate) struct Slot<T> {
    pub(crate) value: T,
    pub(crate) start: f64,
    pub(crate) duration: f64,
    pub(crate) links: [Links; 2],
}

impl<T> Slot<T> {
    /// The slot's time on the given boundary list.
    pub(crate) fn time(&self, boundary: Boundary) -> f64 {
        match boundary {
            Boundary::Start => self.start,
            Boundary::End => self.start + self.duration,
        }
    }
}

impl<T: 'static> Timeline<T> {
    pub(crate) fn time_of(&self, id: EntryId, boundary: Boundary) -> f64 {
        self.slots[id].time(boundary)
    }

    pub(crate) fn links(&self, id: EntryId, boundary: Boundary) -> Links {
        self.slots[id].links[boundary as usize]
    }

    fn links_mut(&mut self, id: EntryId, boundary: Boundary) -> &mut Links {
        &mut self.slots[id].links[boundary as usize]
    }

    /// The node of the most recently fired event on this list, if any.
    pub(crate) fn last_fired(&self, boundary: Boundary) -> Option<EntryId> {
        self.fired[boundary as usize]
    }

    /// The next node on this list that has not fired yet.
    pub(crate) fn next_unfired(&self, boundary: Boundary) -> Option<EntryId> {
        match self.fired[boundary as usize] {
            None => self.head[boundary as usize],
            Some(id) => self.links(id, boundary).next,
        }
    }

    /// Link a freshly inserted slot into one boundary list at its sorted
    /// position. Equal-time nodes keep their existing order; the new node
    /// goes after them.
    pub(crate) fn splice(&mut self, id: EntryId, boundary: Boundary) {
        let time = self.time_of(id, boundary);
        match self.head[boundary as usize] {
            None => {
                self.head[boundary as usize] = Some(id);
            }
            Some(head) if time < self.time_of(head, boundary) => {
                self.links_mut(id, boundary).next = Some(head);
                self.links_mut(head, boundary).prev = Some(id);
                self.head[boundary as usize] = Some(id);
            }
            Some(head) => {
                let anchor = self.fired[boundary as usize].unwrap_or(head);
                self.splice_from(anchor, id, boundary, time);
            }
        }
    }

    /// Walk from `anchor` to the splice position: forward over nodes with
    /// time ≤ `time`, then backward over nodes with time > `time`, and link
    /// the new node right after where the walk settles.
    fn splice_from(&mut self, anchor: EntryId, id: EntryId, boundary: Boundary, time: f64) {
        let mut at = anchor;
        while let Some(next) = self.links(at, boundary).next {
            if time >= self.time_of(next, boundary) {
                at = next;
            } else {
                break;
            }
        }
        while let Some(prev) = self.links(at, boundary).prev {
            if time < self.time_of(prev, boundary) {
                at = prev;
            } else {
                break;
            }
        }

        let next = self.links(at, boundary).next;
        if let Some(next) = next {
            self.links_mut(next, boundary).prev = Some(id);
        }
        self.links_mut(id, boundary).next = next;
        self.links_mut(at, boundary).next = Some(id);
        self.links_mut(id, boundary).prev = Some(at);
    }

    /// Unlink a node from one boundary list in O(1). The caller must have
    /// already retargeted the head and fired pointers off this node.
    pub(crate) fn unlink(&mut self, id: EntryId, boundary: Boundary) {
        let Links { prev, next } = self.links(id, boundary);
        if let Some(prev) = prev {
            self.links_mut(prev, boundary).next = next;
        }
        if let Some(next) = next {
            self.links_mut(next, boundary).prev = prev;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect the times of one boundary list, head to tail.
    fn lane_times<T: 'static>(timeline: &Timeline<T>, boundary: Boundary) -> Vec<f64> {
        let mut times = Vec::new();
        let mut at = timeline.head[boundary as usize];
        while let Some(id) = at {
            times.push(timeline.time_of(id, boundary));
            at = timeline.links(id, boundary).next;
        }
        times
    }

    #[test]
    fn test_splice_sorts_both_lanes() {
        let mut timeline = Timeline::new();
        timeline.add('a', 30.0, 10.0);
        timeline.add('b', 10.0, 50.0);
        timeline.add('c', 20.0, 5.0);

        assert_eq!(lane_times(&timeline, Boundary::Start), vec![10.0, 20.0, 30.0]);
        assert_eq!(lane_times(&timeline, Boundary::End), vec![25.0, 40.0, 60.0]);
    }

    #[test]
    fn test_equal_times_keep_insertion_order() {
        let mut timeline = Timeline::new();
        let a = timeline.add(1, 10.0, 0.0);
        let b = timeline.add(2, 10.0, 0.0);
        let c = timeline.add(3, 10.0, 0.0);

        let mut order = Vec::new();
        let mut at = timeline.head[Boundary::Start as usize];
        while let Some(id) = at {
            order.push(id);
            at = timeline.links(id, Boundary::Start).next;
        }
        assert_eq!(order, vec![a.id(), b.id(), c.id()]);
    }

    #[test]
    fn test_earlier_entry_becomes_head() {
        let mut timeline = Timeline::new();
        let late = timeline.add('x', 50.0, 0.0);
        let early = timeline.add('y', 5.0, 0.0);

        assert_eq!(timeline.head[Boundary::Start as usize], Some(early.id()));
        assert_eq!(timeline.links(early.id(), Boundary::Start).next, Some(late.id()));
    }

    #[test]
    fn test_unlink_bridges_neighbors() {
        let mut timeline = Timeline::new();
        let a = timeline.add(1, 0.0, 0.0);
        let b = timeline.add(2, 10.0, 0.0);
        let c = timeline.add(3, 20.0, 0.0);

        assert!(timeline.remove(b));
        assert_eq!(timeline.links(a.id(), Boundary::Start).next, Some(c.id()));
        assert_eq!(timeline.links(c.id(), Boundary::Start).prev, Some(a.id()));
        assert_eq!(lane_times(&timeline, Boundary::Start), vec![0.0, 20.0]);
    }
}
