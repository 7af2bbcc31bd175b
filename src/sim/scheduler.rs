//! Timer queue for spawn and expiry callbacks
//!
//! All timers of a session live in one queue ordered by due time, then by
//! insertion order, and are fired from the frame step on the simulation
//! clock. Nothing runs outside `tick`, so a hit and an expiry for the same
//! node are always processed one after the other.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Recurring spawn; stale once the session's spawn generation moves on
    Spawn { generation: u32 },
    /// One-shot lifetime end for a node
    Expire { node_id: u32 },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    kind: TimerKind,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest timer first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-ordered timer queue on simulation time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a timer firing at `due_ms`
    pub fn schedule(&mut self, due_ms: f64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due_ms, seq, kind });
    }

    /// Pop the earliest timer if it is due at `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, TimerKind)> {
        if self.queue.peek()?.due_ms > now_ms {
            return None;
        }
        self.queue.pop().map(|s| (s.due_ms, s.kind))
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|s| s.due_ms)
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
