//! Heap and length-tracking invariants for the two queue types.

use casesim_core::error::SimError;
use casesim_core::queue::{PriorityQueue, TimeTrackedQueue};
use casesim_core::rng::ReplicationRng;

#[test]
fn dequeue_order_is_non_decreasing_after_any_operation_sequence() {
    let mut rng = ReplicationRng::new(0xC0FFEE, 0);
    let mut queue = PriorityQueue::new();

    // Mixed enqueues and dequeues, then drain.
    for round in 0..200 {
        let priority = rng.next_f64() * 1000.0;
        queue.enqueue(priority, priority);
        if round % 3 == 0 && !queue.is_empty() {
            queue.dequeue().unwrap();
        }
    }

    let mut previous = f64::NEG_INFINITY;
    while !queue.is_empty() {
        let value = queue.dequeue().unwrap();
        assert!(
            value >= previous,
            "heap order violated: {value} after {previous}"
        );
        previous = value;
    }
}

#[test]
fn equal_priorities_dequeue_in_insertion_order() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(1.0, "first");
    queue.enqueue(1.0, "second");
    queue.enqueue(0.5, "ahead");
    queue.enqueue(1.0, "third");

    assert_eq!(queue.peek_priority(), Some(0.5));
    assert_eq!(queue.dequeue().unwrap(), "ahead");
    assert_eq!(queue.dequeue().unwrap(), "first");
    assert_eq!(queue.dequeue().unwrap(), "second");
    assert_eq!(queue.dequeue().unwrap(), "third");
}

#[test]
fn dequeue_on_empty_queue_fails_loudly() {
    let mut queue: PriorityQueue<i32> = PriorityQueue::new();
    assert!(matches!(queue.dequeue(), Err(SimError::EmptyQueue)));

    queue.enqueue(1.0, 1);
    queue.dequeue().unwrap();
    assert!(matches!(queue.dequeue(), Err(SimError::EmptyQueue)));
}

#[test]
fn max_length_matches_true_maximum_prefix_sum() {
    let mut queue = TimeTrackedQueue::new();
    // +1 +1 +1 -1 +1 -1 -1: prefix sums 1 2 3 2 3 2 1, maximum 3.
    let ops: [i32; 7] = [1, 1, 1, -1, 1, -1, -1];
    let mut time = 0.0;
    for &op in &ops {
        time += 1.0;
        if op > 0 {
            queue.enqueue(time, 1.0, ());
        } else {
            queue.dequeue(time).unwrap();
        }
    }
    assert_eq!(queue.max_length(), 3);
}

#[test]
fn constant_length_yields_that_average() {
    let mut queue = TimeTrackedQueue::new();
    queue.enqueue(10.0, 1.0, "a");
    queue.enqueue(10.0, 1.0, "b");
    // Held at length 2 from t=10 onward.
    let avg = queue.average_length_over_interval(10.0, 50.0).unwrap();
    assert_eq!(avg, 2.0);
}

#[test]
fn piecewise_average_weights_each_span_by_its_duration() {
    let mut queue = TimeTrackedQueue::new();
    queue.enqueue(0.0, 1.0, "a"); // length 1 over [0, 10)
    queue.enqueue(10.0, 1.0, "b");
    queue.enqueue(10.0, 1.0, "c"); // length 3 over [10, 20)
    let avg = queue.average_length_over_interval(0.0, 20.0).unwrap();
    assert!((avg - 2.0).abs() < 1e-12, "expected 2.0, got {avg}");
}

#[test]
fn invalid_ranges_are_rejected() {
    let queue: TimeTrackedQueue<()> = TimeTrackedQueue::new();
    assert!(matches!(
        queue.average_length_over_interval(5.0, 1.0),
        Err(SimError::InvalidRange { .. })
    ));
    assert!(matches!(
        queue.average_length_over_interval(-1.0, 1.0),
        Err(SimError::InvalidRange { .. })
    ));
}

#[test]
fn clear_resets_length_history() {
    let mut queue = TimeTrackedQueue::new();
    queue.enqueue(1.0, 1.0, ());
    queue.enqueue(2.0, 1.0, ());
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.max_length(), 0);
    assert_eq!(queue.average_length_over_interval(0.0, 10.0).unwrap(), 0.0);
}
