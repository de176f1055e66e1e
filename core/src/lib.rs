//! casesim-core — the discrete-event simulation engine behind the course
//! platform's two worked cases: call-center staffing and multi-location
//! inventory replenishment.
//!
//! RULES:
//!   - Single-threaded and synchronous: one case instance per logical call.
//!   - All randomness flows through per-replication `ReplicationRng` streams.
//!   - Every failure propagates as a `SimError`; nothing is retried or
//!     swallowed.
//!   - The engine produces bytes and maps; persistence belongs to the
//!     caller.

pub mod call_center;
pub mod case;
pub mod error;
pub mod inventory;
pub mod queue;
pub mod result;
pub mod rng;
pub mod schedule;
pub mod types;
