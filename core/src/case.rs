//! Case contracts and the discrete-event execution core.
//!
//! A case is used by exactly one logical call: construct, `run()`, discard.
//! `run()` replicates `simulate()` and folds the replication outputs into a
//! single [`SimulationResult`]. Discrete-event cases additionally own a
//! monotonic clock and a time-keyed event queue via [`EventLoop`].

use crate::error::{SimError, SimResult};
use crate::queue::PriorityQueue;
use crate::result::SimulationResult;
use crate::types::SimTime;

/// Replication count used when the caller does not specify one.
pub const DEFAULT_ITERATIONS: u32 = 100;

/// Contract shared by every simulation case.
pub trait SimulationCase {
    /// Output of one replication.
    type Replication;

    /// Execute one replication. Mutable per-replication state is fully
    /// rebuilt through the case's reset protocol before the replication
    /// begins.
    fn simulate(&mut self) -> SimResult<Self::Replication>;

    /// Collapse replication outputs into the single evaluation metric.
    fn score(&self, replications: &[Self::Replication]) -> f64;

    /// Replicate `simulate()` and aggregate into one result. Blocking; no
    /// partial or streaming output.
    fn run(&mut self, iterations: u32) -> SimResult<SimulationResult>;
}

/// Simulated clock plus the time-keyed event queue of a discrete-event case.
///
/// Time only moves forward; scheduling into the past or rewinding the clock
/// is a runtime-consistency error.
#[derive(Debug, Clone)]
pub struct EventLoop<E> {
    now: SimTime,
    queue: PriorityQueue<(SimTime, E)>,
}

impl<E> EventLoop<E> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            queue: PriorityQueue::new(),
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn advance_to(&mut self, time: SimTime) -> SimResult<()> {
        if time < self.now {
            return Err(SimError::TimeReversal {
                now: self.now,
                requested: time,
            });
        }
        self.now = time;
        Ok(())
    }

    pub fn schedule(&mut self, time: SimTime, event: E) -> SimResult<()> {
        if time < self.now {
            return Err(SimError::EventInPast {
                now: self.now,
                time,
            });
        }
        self.queue.enqueue(time, (time, event));
        Ok(())
    }

    /// Pop the earliest pending event with its timestamp.
    pub fn pop(&mut self) -> SimResult<(SimTime, E)> {
        self.queue.dequeue()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop all pending events and rewind the clock to zero. The sole
    /// cross-replication boundary.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.now = 0.0;
    }
}

impl<E> Default for EventLoop<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A simulation case driven by discrete events.
pub trait DiscreteEventCase: SimulationCase {
    type Event;

    fn events(&self) -> &EventLoop<Self::Event>;

    fn events_mut(&mut self) -> &mut EventLoop<Self::Event>;

    /// True once the simulated clock has reached the case's time horizon.
    fn horizon_reached(&self) -> bool;

    /// An exhausted queue or a reached horizon ends the replication; the
    /// queue half keeps the provided drive loop terminating.
    fn should_stop(&self) -> bool {
        self.events().is_empty() || self.horizon_reached()
    }

    /// Apply one event's effect. May schedule future events.
    fn execute(&mut self, event: Self::Event) -> SimResult<()>;

    /// Rebuild all per-replication state.
    fn reset(&mut self) -> SimResult<()>;

    /// Shared execution shape: pop the earliest event, advance the clock to
    /// its timestamp, then execute the effect. Only the horizon is
    /// re-checked after advancing: popping may have emptied the queue, and
    /// a popped event at or past the horizon must be dropped, not run.
    fn drive(&mut self) -> SimResult<()> {
        while !self.should_stop() {
            let (time, event) = self.events_mut().pop()?;
            self.events_mut().advance_to(time)?;
            if self.horizon_reached() {
                break;
            }
            self.execute(event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingCase {
        events: EventLoop<u32>,
        executed: Vec<u32>,
    }

    impl CountingCase {
        fn new() -> Self {
            Self {
                events: EventLoop::new(),
                executed: Vec::new(),
            }
        }
    }

    impl SimulationCase for CountingCase {
        type Replication = ();

        fn simulate(&mut self) -> SimResult<()> {
            self.drive()
        }

        fn score(&self, _replications: &[()]) -> f64 {
            0.0
        }

        fn run(&mut self, _iterations: u32) -> SimResult<SimulationResult> {
            Err(SimError::Inconsistent("not exercised".into()))
        }
    }

    impl DiscreteEventCase for CountingCase {
        type Event = u32;

        fn events(&self) -> &EventLoop<u32> {
            &self.events
        }

        fn events_mut(&mut self) -> &mut EventLoop<u32> {
            &mut self.events
        }

        fn horizon_reached(&self) -> bool {
            self.events.now() >= 100.0
        }

        fn execute(&mut self, event: u32) -> SimResult<()> {
            self.executed.push(event);
            Ok(())
        }

        fn reset(&mut self) -> SimResult<()> {
            self.events.clear();
            self.executed.clear();
            Ok(())
        }
    }

    #[test]
    fn drive_executes_the_final_queued_event() {
        let mut case = CountingCase::new();
        case.events.schedule(10.0, 1).unwrap();
        case.events.schedule(20.0, 2).unwrap();
        assert_eq!(case.events.len(), 2);
        case.drive().unwrap();
        assert_eq!(case.executed, vec![1, 2]);
    }

    #[test]
    fn drive_drops_events_at_or_past_the_horizon() {
        let mut case = CountingCase::new();
        case.events.schedule(10.0, 1).unwrap();
        case.events.schedule(150.0, 2).unwrap();
        case.drive().unwrap();
        assert_eq!(case.executed, vec![1]);
        assert_eq!(case.events.now(), 150.0);
    }

    #[test]
    fn clock_rejects_backward_motion() {
        let mut events: EventLoop<()> = EventLoop::new();
        events.advance_to(10.0).unwrap();
        assert!(matches!(
            events.advance_to(5.0),
            Err(SimError::TimeReversal { .. })
        ));
    }

    #[test]
    fn scheduling_into_the_past_fails() {
        let mut events: EventLoop<&str> = EventLoop::new();
        events.advance_to(100.0).unwrap();
        assert!(matches!(
            events.schedule(99.0, "late"),
            Err(SimError::EventInPast { .. })
        ));
    }
}
