use thiserror::Error;

/// The single error family crossing the engine boundary.
///
/// Configuration variants are raised at case construction and are fatal to
/// that construction. Runtime-consistency variants abort the whole `run()`;
/// no partial result is returned and nothing is retried or swallowed.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid decision: {0}")]
    InvalidDecision(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("simulation time cannot move backward: now {now}, requested {requested}")]
    TimeReversal { now: f64, requested: f64 },

    #[error("event scheduled in the past: now {now}, event time {time}")]
    EventInPast { now: f64, time: f64 },

    #[error("arrival rate lookup out of range at time {time}")]
    ArrivalRateOutOfRange { time: f64 },

    #[error("invalid sample interval [{start}, {end}]")]
    InvalidRange { start: f64, end: f64 },

    #[error("dequeue on an empty queue")]
    EmptyQueue,

    #[error("timestamp {field} already set on customer {customer}")]
    TimestampRewrite { field: &'static str, customer: u32 },

    #[error("timestamp {field} on customer {customer} violates ordering: {value} < {floor}")]
    TimestampOrder {
        field: &'static str,
        customer: u32,
        value: f64,
        floor: f64,
    },

    #[error("negative quantity: {0}")]
    NegativeQuantity(String),

    #[error("internal consistency violation: {0}")]
    Inconsistent(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
