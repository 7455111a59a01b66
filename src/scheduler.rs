use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Single logical timer queue. Nothing here reads the wall clock: callers
/// move time forward and get back whatever fell due.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_seq: u64,
    // (due, seq) ordering keeps same-instant tasks in scheduling order
    heap: BinaryHeap<Reverse<(u64, u64)>>,
    payloads: HashMap<u64, T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self { now_ms: 0, next_seq: 0, heap: BinaryHeap::new(), payloads: HashMap::new() }
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Returns the due time.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> u64 {
        let due = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((due, seq)));
        self.payloads.insert(seq, payload);
        due
    }

    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due, _))| *due)
    }

    /// Moves the clock to `t` (never backwards) and pops everything due.
    pub fn advance_to(&mut self, t: u64) -> Vec<T> {
        self.now_ms = self.now_ms.max(t);
        let mut fired = Vec::new();
        while let Some(Reverse((due, seq))) = self.heap.peek().copied() {
            if due > self.now_ms {
                break;
            }
            self.heap.pop();
            if let Some(payload) = self.payloads.remove(&seq) {
                fired.push(payload);
            }
        }
        fired
    }

    pub fn advance_by(&mut self, delta_ms: u64) -> Vec<T> {
        self.advance_to(self.now_ms.saturating_add(delta_ms))
    }

    /// Fast-forwards past the last pending task and returns everything.
    pub fn drain_all(&mut self) -> Vec<T> {
        match self.heap.iter().map(|Reverse((due, _))| *due).max() {
            Some(last) => self.advance_to(last),
            None => Vec::new(),
        }
    }

    /// Pops the earliest pending task, moving the clock to its due time.
    pub fn pop_next(&mut self) -> Option<T> {
        let Reverse((due, seq)) = self.heap.pop()?;
        self.now_ms = self.now_ms.max(due);
        self.payloads.remove(&seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(2000, "push");
        q.schedule(1000, "tests");
        q.schedule(800, "step");
        assert_eq!(q.next_due(), Some(800));
        assert_eq!(q.advance_by(999), vec!["step"]);
        assert_eq!(q.advance_by(1), vec!["tests"]);
        assert_eq!(q.now(), 1000);
        assert_eq!(q.advance_to(5000), vec!["push"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(10, 1);
        q.schedule(10, 2);
        q.schedule(0, 0);
        assert_eq!(q.advance_by(10), vec![0, 1, 2]);
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut q = TimerQueue::new();
        q.advance_to(500);
        q.advance_to(100);
        assert_eq!(q.now(), 500);
        assert_eq!(q.schedule(10, ()), 510);
    }

    #[test]
    fn test_drain_all() {
        let mut q = TimerQueue::new();
        assert!(q.drain_all().is_empty());
        q.schedule(3200, "done");
        q.schedule(0, "first");
        q.schedule(800, "second");
        assert_eq!(q.drain_all(), vec!["first", "second", "done"]);
        assert_eq!(q.now(), 3200);
        assert!(q.is_empty());
    }

    #[test]
    fn test_pop_next_fast_forwards() {
        let mut q = TimerQueue::new();
        q.schedule(300, 'a');
        q.schedule(100, 'b');
        assert_eq!(q.pop_next(), Some('b'));
        assert_eq!(q.now(), 100);
        assert_eq!(q.pop_next(), Some('a'));
        assert_eq!(q.now(), 300);
        assert_eq!(q.pop_next(), None);
    }
}
