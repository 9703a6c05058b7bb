//! Timed event queue driving every animation channel.
//!
//! Entries are `(fire_time, event)` pairs tagged with the channel that owns
//! them. Cancelling a channel removes all of its pending entries, which is
//! the only cancellation primitive the player needs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

/// Independent animation channels. Only same-channel starts cancel each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Looping idle eye expression.
    Preset,
    /// Looping mouth cycle.
    Talk,
    /// Pending reset of a one-shot reaction.
    Reaction,
    /// Delayed restore after an instant expression.
    Expression,
    /// Hair overlay loop.
    Wind,
    /// Floating dialogue label expiry.
    Dialogue,
}

struct Entry<E> {
    fire_at: OrderedFloat<f64>,
    seq: u64,
    channel: Channel,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap: earliest fire time (then insertion order) must
// compare greatest.
impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of channel-tagged events keyed by fire time (seconds).
pub struct Scheduler<E> {
    heap: BinaryHeap<Entry<E>>,
    next_seq: u64,
}

impl<E> std::fmt::Debug for Scheduler<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.heap.len())
            .finish_non_exhaustive()
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> Scheduler<E> {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` on `channel` to fire at `fire_at`.
    pub fn schedule(&mut self, fire_at: f64, channel: Channel, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            fire_at: OrderedFloat(fire_at),
            seq,
            channel,
            event,
        });
    }

    /// Drop every pending entry of `channel`. Returns how many were removed.
    pub fn cancel(&mut self, channel: Channel) -> usize {
        let before = self.heap.len();
        self.heap.retain(|e| e.channel != channel);
        before - self.heap.len()
    }

    /// Remove and return every pending event of `channel`, earliest first.
    pub fn take(&mut self, channel: Channel) -> Vec<E> {
        let mut taken = Vec::new();
        let mut kept = BinaryHeap::with_capacity(self.heap.len());
        // Ascending `Ord` is latest first.
        for entry in std::mem::take(&mut self.heap).into_sorted_vec().into_iter().rev() {
            if entry.channel == channel {
                taken.push(entry.event);
            } else {
                kept.push(entry);
            }
        }
        self.heap = kept;
        taken
    }

    /// Pop the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, Channel, E)> {
        if self.heap.peek()?.fire_at.0 > now {
            return None;
        }
        self.heap
            .pop()
            .map(|entry| (entry.fire_at.0, entry.channel, entry.event))
    }

    /// Pending entries on `channel`.
    #[must_use]
    pub fn pending(&self, channel: Channel) -> usize {
        self.heap.iter().filter(|e| e.channel == channel).count()
    }

    /// Total pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Fire time of the next entry.
    #[must_use]
    pub fn next_fire_time(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.fire_at.0)
    }
}
