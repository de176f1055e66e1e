//! Priority queues backing the event loop and the waiting line.
//!
//! [`PriorityQueue`] is a hand-maintained binary min-heap in a dense vector:
//! enqueue appends and sifts up, dequeue swaps the last element into the root
//! and sifts down, O(log n) per operation. Only the numeric priority and the
//! insertion sequence participate in ordering: equal priorities pop in FIFO
//! order.
//!
//! [`TimeTrackedQueue`] decorates the heap with a time-stamped length history
//! so callers can ask for the running maximum and the time-weighted average
//! length over an interval.

use crate::error::{SimError, SimResult};
use crate::types::SimTime;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn rank(&self) -> (f64, u64) {
        (self.priority, self.seq)
    }
}

fn rank_cmp(a: (f64, u64), b: (f64, u64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Binary min-heap keyed by an f64 priority, FIFO on ties.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Priority of the element that would dequeue next.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.first().map(|entry| entry.priority)
    }

    pub fn enqueue(&mut self, priority: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the lowest-priority element.
    /// Dequeuing an empty queue is always a logic bug and fails loudly.
    pub fn dequeue(&mut self) -> SimResult<T> {
        if self.heap.is_empty() {
            return Err(SimError::EmptyQueue);
        }
        let entry = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(entry.item)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    fn less(&self, i: usize, j: usize) -> bool {
        rank_cmp(self.heap[i].rank(), self.heap[j].rank()) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= self.heap.len() {
                break;
            }
            let mut smallest = index;
            if self.less(left, smallest) {
                smallest = left;
            }
            let right = left + 1;
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LengthSample {
    time: SimTime,
    len: usize,
}

/// Priority queue that records a (time, resulting length) sample on every
/// enqueue and dequeue. Samples must arrive in non-decreasing time order,
/// which holds whenever the caller's clock is monotonic.
#[derive(Debug, Clone)]
pub struct TimeTrackedQueue<T> {
    inner: PriorityQueue<T>,
    samples: Vec<LengthSample>,
    max_len: usize,
}

impl<T> TimeTrackedQueue<T> {
    pub fn new() -> Self {
        Self {
            inner: PriorityQueue::new(),
            samples: vec![LengthSample { time: 0.0, len: 0 }],
            max_len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn enqueue(&mut self, time: SimTime, priority: f64, item: T) {
        self.inner.enqueue(priority, item);
        self.record(time);
    }

    pub fn dequeue(&mut self, time: SimTime) -> SimResult<T> {
        let item = self.inner.dequeue()?;
        self.record(time);
        Ok(item)
    }

    /// Reset history to a single zero-length sample at time 0.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.samples.clear();
        self.samples.push(LengthSample { time: 0.0, len: 0 });
        self.max_len = 0;
    }

    /// Running maximum length over the queue's recorded history.
    pub fn max_length(&self) -> usize {
        self.max_len
    }

    /// Time-weighted average length over [start, end], by piecewise-constant
    /// integration: each sample's length persists until the next sample, and
    /// boundary partial spans take the nearest surrounding sample's length.
    /// A zero-width interval yields the length at that instant.
    pub fn average_length_over_interval(&self, start: SimTime, end: SimTime) -> SimResult<f64> {
        if start > end || start < 0.0 || end < 0.0 {
            return Err(SimError::InvalidRange { start, end });
        }
        if start == end {
            return Ok(self.length_at(start) as f64);
        }

        let mut total = 0.0;
        let mut prev_time = start;
        let mut level = self.length_at(start);
        for sample in &self.samples {
            if sample.time <= start {
                continue;
            }
            if sample.time > end {
                break;
            }
            total += level as f64 * (sample.time - prev_time);
            prev_time = sample.time;
            level = sample.len;
        }
        total += level as f64 * (end - prev_time);
        Ok(total / (end - start))
    }

    fn record(&mut self, time: SimTime) {
        let len = self.inner.len();
        self.max_len = self.max_len.max(len);
        self.samples.push(LengthSample { time, len });
    }

    fn length_at(&self, time: SimTime) -> usize {
        let mut len = self.samples[0].len;
        for sample in &self.samples {
            if sample.time > time {
                break;
            }
            len = sample.len;
        }
        len
    }
}

impl<T> Default for TimeTrackedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sift_down_restores_heap_after_root_removal() {
        let mut queue = PriorityQueue::new();
        for &p in &[5.0, 1.0, 4.0, 2.0, 3.0] {
            queue.enqueue(p, p as i32);
        }
        assert_eq!(queue.dequeue().unwrap(), 1);
        assert_eq!(queue.peek_priority(), Some(2.0));
    }

    #[test]
    fn clear_resets_history_to_time_zero() {
        let mut queue = TimeTrackedQueue::new();
        queue.enqueue(1.0, 0.5, "a");
        queue.enqueue(2.0, 0.5, "b");
        queue.clear();
        assert_eq!(queue.max_length(), 0);
        assert_eq!(queue.average_length_over_interval(0.0, 5.0).unwrap(), 0.0);
    }
}
