//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through ReplicationRng instances derived from the
//! master seed a case is constructed with.
//!
//! Each replication gets its own stream, seeded deterministically by mixing
//! the replication index into the master seed. This means:
//!   - Replications never share generator state.
//!   - Any single replication is reproducible in isolation.

use crate::error::{SimError, SimResult};
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Exp, StandardNormal, Triangular};
use rand_pcg::Pcg64Mcg;

/// The deterministic RNG stream for a single replication.
pub struct ReplicationRng {
    pub replication: u32,
    inner: Pcg64Mcg,
}

impl ReplicationRng {
    /// Derive the stream for one replication from the master seed.
    /// The replication index must be stable across runs.
    pub fn new(master_seed: u64, replication: u32) -> Self {
        let derived_seed =
            master_seed ^ (u64::from(replication).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            replication,
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Exponential draw with the given mean.
    pub fn exponential(&mut self, mean: f64) -> SimResult<f64> {
        let dist = Exp::new(1.0 / mean).map_err(|_| {
            SimError::InvalidConfiguration(format!(
                "exponential mean must be positive and finite, got {mean}"
            ))
        })?;
        Ok(dist.sample(&mut self.inner))
    }

    /// Triangular draw over [min, max] with the given mode.
    pub fn triangular(&mut self, min: f64, mode: f64, max: f64) -> SimResult<f64> {
        let dist = Triangular::new(min, max, mode).map_err(|_| {
            SimError::InvalidConfiguration(format!(
                "invalid triangular parameters ({min}, {mode}, {max})"
            ))
        })?;
        Ok(dist.sample(&mut self.inner))
    }

    /// Standard normal draw.
    pub fn standard_normal(&mut self) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.inner);
        z
    }

    /// Index of the first entry in a cumulative distribution table covering
    /// a uniform roll. The table must be non-decreasing and end at 1.0.
    pub fn categorical(&mut self, cumulative: &[f64]) -> usize {
        let roll = self.next_f64();
        for (index, &cum) in cumulative.iter().enumerate() {
            if roll <= cum {
                return index;
            }
        }
        cumulative.len() - 1
    }
}
