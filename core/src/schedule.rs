//! Agent schedules and the decision-vector decomposition.
//!
//! A staffing decision arrives as one integer per 30-minute slot over the
//! 9-hour day. The decomposition converts it losslessly into the smallest
//! set of (schedule, head-count) groups: one group per distinct staffing
//! level, each covering the slots staffed at least that high.

use crate::error::{SimError, SimResult};
use crate::types::SimTime;

/// Length of one staffing slot in seconds (30 simulated minutes).
pub const SLOT_SECONDS: f64 = 1800.0;

/// Number of staffing slots over the simulated day.
pub const SLOTS_PER_DAY: usize = 18;

/// End of the simulated day in seconds (9 hours).
pub const HORIZON_SECONDS: f64 = SLOT_SECONDS * SLOTS_PER_DAY as f64;

/// Ordered, non-overlapping `[start, end)` work intervals within one day.
///
/// Containment is half-open throughout: an agent is on schedule at an
/// interval's start instant and off at its end instant.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSchedule {
    intervals: Vec<(SimTime, SimTime)>,
}

impl AgentSchedule {
    pub fn new(intervals: Vec<(SimTime, SimTime)>) -> SimResult<Self> {
        if intervals.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "schedule must contain at least one interval".into(),
            ));
        }
        let mut prev_end: Option<SimTime> = None;
        for &(start, end) in &intervals {
            if start < 0.0 || end < 0.0 {
                return Err(SimError::InvalidConfiguration(format!(
                    "schedule interval [{start}, {end}) has a negative bound"
                )));
            }
            if start > end {
                return Err(SimError::InvalidConfiguration(format!(
                    "schedule interval [{start}, {end}) starts after it ends"
                )));
            }
            if let Some(prev) = prev_end {
                if start < prev {
                    return Err(SimError::InvalidConfiguration(format!(
                        "schedule interval starting at {start} overlaps the previous interval ending at {prev}"
                    )));
                }
            }
            prev_end = Some(end);
        }
        Ok(Self { intervals })
    }

    pub fn intervals(&self) -> &[(SimTime, SimTime)] {
        &self.intervals
    }

    /// Half-open containment: `start <= t < end` for any interval.
    pub fn contains(&self, time: SimTime) -> bool {
        self.intervals
            .iter()
            .any(|&(start, end)| start <= time && time < end)
    }

    pub fn total_time(&self) -> f64 {
        self.intervals.iter().map(|&(start, end)| end - start).sum()
    }

    pub fn interval_starts(&self) -> impl Iterator<Item = SimTime> + '_ {
        self.intervals.iter().map(|&(start, _)| start)
    }
}

/// A schedule shared by `count` identical agents.
#[derive(Debug, Clone)]
pub struct StaffGroup {
    pub schedule: AgentSchedule,
    pub count: u32,
}

/// Decompose a per-slot staffing vector into minimal (schedule, count)
/// groups by level bands: for each distinct staffing level, the slots
/// staffed at least that high form one group's intervals, with count equal
/// to the step up from the previous level. Summing count × coverage per
/// slot reproduces the vector exactly.
pub fn decompose_decision(decision: &[u32]) -> SimResult<Vec<StaffGroup>> {
    let mut levels: Vec<u32> = decision.iter().copied().filter(|&d| d > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut groups = Vec::with_capacity(levels.len());
    let mut prev_level = 0u32;
    for &level in &levels {
        let mut intervals = Vec::new();
        let mut run_start: Option<usize> = None;
        for (slot, &staffed) in decision.iter().enumerate() {
            match (staffed >= level, run_start) {
                (true, None) => run_start = Some(slot),
                (false, Some(first)) => {
                    intervals.push((first as f64 * SLOT_SECONDS, slot as f64 * SLOT_SECONDS));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(first) = run_start {
            intervals.push((
                first as f64 * SLOT_SECONDS,
                decision.len() as f64 * SLOT_SECONDS,
            ));
        }
        groups.push(StaffGroup {
            schedule: AgentSchedule::new(intervals)?,
            count: level - prev_level,
        });
        prev_level = level;
    }

    debug_assert_eq!(recompose(&groups, decision.len()), decision);
    Ok(groups)
}

/// Re-sum count × slot coverage per slot; inverse of [`decompose_decision`].
pub fn recompose(groups: &[StaffGroup], slots: usize) -> Vec<u32> {
    let mut out = vec![0u32; slots];
    for group in groups {
        for &(start, end) in group.schedule.intervals() {
            let first = (start / SLOT_SECONDS) as usize;
            let last = (end / SLOT_SECONDS) as usize;
            for slot_count in out.iter_mut().take(last).skip(first) {
                *slot_count += group.count;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposition_groups_one_per_distinct_level() {
        let decision = vec![2, 3, 2];
        let groups = decompose_decision(&decision).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(recompose(&groups, 3), decision);
    }

    #[test]
    fn disjoint_runs_share_a_group() {
        let decision = vec![1, 0, 2];
        let groups = decompose_decision(&decision).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].schedule.intervals().len(), 2);
        assert_eq!(recompose(&groups, 3), decision);
    }

    #[test]
    fn containment_is_half_open() {
        let schedule = AgentSchedule::new(vec![(0.0, 3600.0)]).unwrap();
        assert!(schedule.contains(0.0));
        assert!(schedule.contains(3599.9));
        assert!(!schedule.contains(3600.0));
    }
}
