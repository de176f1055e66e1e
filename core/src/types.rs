//! Shared primitive types used across the entire simulation.

/// Simulated time in seconds from the start of the day.
pub type SimTime = f64;

/// Arena index of a customer within one replication.
pub type CustomerId = usize;

/// Arena index of an agent within one replication.
pub type AgentId = usize;
