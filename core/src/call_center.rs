//! Call-center staffing case: a discrete-event simulation of one 9-hour day,
//! replicated Monte-Carlo style for stable aggregate metrics.
//!
//! State lives in per-replication arenas (customers, agents) referenced by
//! index; events are a tagged union dispatched by pattern matching in the
//! drive loop. Identity counters are scoped to the replication so runs stay
//! reproducible.

use crate::case::{DiscreteEventCase, EventLoop, SimulationCase};
use crate::error::{SimError, SimResult};
use crate::queue::TimeTrackedQueue;
use crate::result::{Cell, DetailTable, SimulationResult};
use crate::rng::ReplicationRng;
use crate::schedule::{
    decompose_decision, AgentSchedule, StaffGroup, HORIZON_SECONDS, SLOTS_PER_DAY, SLOT_SECONDS,
};
use crate::types::{AgentId, CustomerId, SimTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Cumulative distribution of customer priority classes 1..=5.
/// Lower class is served first.
pub const PRIORITY_CUM_DIST: [f64; 5] = [0.03, 0.06, 0.57, 0.98, 1.0];

/// Cumulative distribution of service-type classes 1..=3.
pub const SERVICE_TYPE_CUM_DIST: [f64; 3] = [0.5, 0.8, 1.0];

/// Arrival-rate weight for each 30-minute slot. Multiplied by the estimated
/// daily total to get the per-slot arrival rate.
pub const ARRIVAL_RATE_WEIGHT_BY_SLOT: [f64; SLOTS_PER_DAY] = [
    0.0391, 0.0901, 0.0781, 0.0641, 0.0981, 0.0811, 0.024, 0.03, 0.0451, 0.019, 0.03, 0.0701,
    0.0751, 0.0776, 0.0861, 0.032, 0.026, 0.0381,
];

pub const ESTIMATED_DAILY_ARRIVALS: f64 = 534.0;

/// Per-slot staffing bound.
pub const MAX_AGENTS_PER_SLOT: u32 = 10;

/// Total roster bound across the day.
pub const FLEET_MAX_AGENTS: u32 = 15;

/// A served call counts toward quality of service when its wait stays
/// within this many seconds.
pub const QOS_WAIT_THRESHOLD: f64 = 300.0;

/// The three canonical shift templates, in seconds: 8am-12pm, 11am-3pm,
/// 1pm-5pm on a day starting at 8am.
pub const SHIFT_TEMPLATES: [(SimTime, SimTime); 3] = [
    (0.0, 4.0 * 3600.0),
    (3.0 * 3600.0, 7.0 * 3600.0),
    (5.0 * 3600.0, 9.0 * 3600.0),
];

const SERVICE_TIME_MEAN: f64 = 228.98;
const SERVICE_TIME_SHIFT: f64 = 77.02;
const SERVICE_TIME_CAP: f64 = 2000.0;

/// One caller, scoped to a single replication. Timestamps are write-once
/// and ordered: arrival <= enqueue <= service start <= exit.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: u32,
    priority_class: u8,
    service_class: u8,
    arrival_time: SimTime,
    enqueue_time: Option<SimTime>,
    service_start_time: Option<SimTime>,
    exit_time: Option<SimTime>,
    service_time: Option<f64>,
}

impl Customer {
    fn new(id: u32, arrival_time: SimTime, priority_class: u8, service_class: u8) -> Self {
        Self {
            id,
            priority_class,
            service_class,
            arrival_time,
            enqueue_time: None,
            service_start_time: None,
            exit_time: None,
            service_time: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Priority class the waiting line orders by; lower is served first.
    pub fn priority_class(&self) -> u8 {
        self.priority_class
    }

    pub fn service_class(&self) -> u8 {
        self.service_class
    }

    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    pub fn enqueue_time(&self) -> Option<SimTime> {
        self.enqueue_time
    }

    pub fn service_start_time(&self) -> Option<SimTime> {
        self.service_start_time
    }

    pub fn exit_time(&self) -> Option<SimTime> {
        self.exit_time
    }

    pub fn service_time(&self) -> Option<f64> {
        self.service_time
    }

    pub fn wait_time(&self) -> Option<f64> {
        match (self.enqueue_time, self.service_start_time) {
            (Some(enqueue), Some(start)) => Some(start - enqueue),
            _ => None,
        }
    }

    pub fn set_enqueue_time(&mut self, time: SimTime) -> SimResult<()> {
        if self.enqueue_time.is_some() {
            return Err(SimError::TimestampRewrite {
                field: "enqueue_time",
                customer: self.id,
            });
        }
        if time < self.arrival_time {
            return Err(SimError::TimestampOrder {
                field: "enqueue_time",
                customer: self.id,
                value: time,
                floor: self.arrival_time,
            });
        }
        self.enqueue_time = Some(time);
        Ok(())
    }

    pub fn set_service_start_time(&mut self, time: SimTime) -> SimResult<()> {
        if self.service_start_time.is_some() {
            return Err(SimError::TimestampRewrite {
                field: "service_start_time",
                customer: self.id,
            });
        }
        let floor = self.enqueue_time.ok_or_else(|| {
            SimError::Inconsistent(format!(
                "customer {} started service before being enqueued",
                self.id
            ))
        })?;
        if time < floor {
            return Err(SimError::TimestampOrder {
                field: "service_start_time",
                customer: self.id,
                value: time,
                floor,
            });
        }
        self.service_start_time = Some(time);
        Ok(())
    }

    pub fn set_exit_time(&mut self, time: SimTime) -> SimResult<()> {
        if self.exit_time.is_some() {
            return Err(SimError::TimestampRewrite {
                field: "exit_time",
                customer: self.id,
            });
        }
        if time < self.arrival_time {
            return Err(SimError::TimestampOrder {
                field: "exit_time",
                customer: self.id,
                value: time,
                floor: self.arrival_time,
            });
        }
        self.exit_time = Some(time);
        Ok(())
    }

    pub fn set_service_time(&mut self, duration: f64) -> SimResult<()> {
        if self.service_time.is_some() {
            return Err(SimError::TimestampRewrite {
                field: "service_time",
                customer: self.id,
            });
        }
        if duration < 0.0 {
            return Err(SimError::NegativeQuantity(format!(
                "service time {duration} on customer {}",
                self.id
            )));
        }
        self.service_time = Some(duration);
        Ok(())
    }
}

/// One agent of the day's roster, rebuilt fully every replication.
#[derive(Debug, Clone)]
pub struct Agent {
    id: u32,
    tier: u8,
    schedule: AgentSchedule,
    busy: bool,
    total_service_time: f64,
}

impl Agent {
    fn new(id: u32, tier: u8, schedule: AgentSchedule) -> Self {
        Self {
            id,
            tier,
            schedule,
            busy: false,
            total_service_time: 0.0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn schedule(&self) -> &AgentSchedule {
        &self.schedule
    }

    pub fn is_on_schedule(&self, time: SimTime) -> bool {
        self.schedule.contains(time)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn total_service_time(&self) -> f64 {
        self.total_service_time
    }

    pub fn total_schedule_time(&self) -> f64 {
        self.schedule.total_time()
    }

    fn add_service_time(&mut self, duration: f64) -> SimResult<()> {
        if duration < 0.0 {
            return Err(SimError::NegativeQuantity(format!(
                "service duration {duration} on agent {}",
                self.id
            )));
        }
        self.total_service_time += duration;
        Ok(())
    }
}

/// The three event kinds of the call-center day.
#[derive(Debug, Clone)]
pub enum CallEvent {
    Arrival,
    ServiceCompletion {
        agent: AgentId,
        customer: CustomerId,
        duration: f64,
    },
    AgentOnSchedule {
        agent: AgentId,
    },
}

/// Statistics collected from one replication.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationStats {
    pub max_wait_time: f64,
    pub avg_wait_time: f64,
    pub max_service_time: f64,
    pub avg_service_time: f64,
    pub quality_of_service: f64,
    pub agent_utilization: f64,
    pub customers_arrived: u32,
    pub customers_served: u32,
    pub max_queue_length: u32,
    pub avg_queue_length: f64,
}

/// The call-center staffing simulator.
pub struct CallCenterCase {
    decision: Vec<u32>,
    groups: Vec<StaffGroup>,
    master_seed: u64,
    replication: u32,
    rng: ReplicationRng,
    events: EventLoop<CallEvent>,
    agents: Vec<Agent>,
    customers: Vec<Customer>,
    waiting: TimeTrackedQueue<CustomerId>,
}

impl CallCenterCase {
    /// Build a case from a per-slot staffing vector: one non-negative entry
    /// per 30-minute slot, each at most [`MAX_AGENTS_PER_SLOT`], summing to
    /// at most [`FLEET_MAX_AGENTS`]. The vector is decomposed into minimal
    /// (schedule, count) groups before any agent is allocated.
    pub fn new(decision: Vec<u32>, master_seed: u64) -> SimResult<Self> {
        if decision.len() != SLOTS_PER_DAY {
            return Err(SimError::InvalidDecision(format!(
                "expected {} staffing slots, got {}",
                SLOTS_PER_DAY,
                decision.len()
            )));
        }
        for (slot, &staffed) in decision.iter().enumerate() {
            if staffed > MAX_AGENTS_PER_SLOT {
                return Err(SimError::InvalidDecision(format!(
                    "slot {slot} staffs {staffed} agents, above the per-slot maximum {MAX_AGENTS_PER_SLOT}"
                )));
            }
        }
        let total: u32 = decision.iter().sum();
        if total > FLEET_MAX_AGENTS {
            return Err(SimError::InvalidDecision(format!(
                "decision vector sums to {total}, above the fleet maximum {FLEET_MAX_AGENTS}"
            )));
        }
        let groups = decompose_decision(&decision)?;
        Ok(Self::from_groups(decision, groups, master_seed))
    }

    /// Build a case staffing the three canonical [`SHIFT_TEMPLATES`]
    /// directly: `counts[i]` agents work template `i`. Bounds mirror
    /// [`CallCenterCase::new`]: each count at most the per-slot maximum and
    /// the roster at most the fleet maximum.
    pub fn from_shift_counts(counts: [u32; 3], master_seed: u64) -> SimResult<Self> {
        for (template, &count) in counts.iter().enumerate() {
            if count > MAX_AGENTS_PER_SLOT {
                return Err(SimError::InvalidDecision(format!(
                    "shift template {template} staffs {count} agents, above the per-template maximum {MAX_AGENTS_PER_SLOT}"
                )));
            }
        }
        let total: u32 = counts.iter().sum();
        if total > FLEET_MAX_AGENTS {
            return Err(SimError::InvalidDecision(format!(
                "shift counts sum to {total}, above the fleet maximum {FLEET_MAX_AGENTS}"
            )));
        }

        let mut decision = vec![0u32; SLOTS_PER_DAY];
        let mut groups = Vec::new();
        for (&(start, end), &count) in SHIFT_TEMPLATES.iter().zip(counts.iter()) {
            if count == 0 {
                continue;
            }
            let first = (start / SLOT_SECONDS) as usize;
            let last = (end / SLOT_SECONDS) as usize;
            for slot in first..last {
                decision[slot] += count;
            }
            groups.push(StaffGroup {
                schedule: AgentSchedule::new(vec![(start, end)])?,
                count,
            });
        }
        Ok(Self::from_groups(decision, groups, master_seed))
    }

    fn from_groups(decision: Vec<u32>, groups: Vec<StaffGroup>, master_seed: u64) -> Self {
        Self {
            decision,
            groups,
            master_seed,
            replication: 0,
            rng: ReplicationRng::new(master_seed, 0),
            events: EventLoop::new(),
            agents: Vec::new(),
            customers: Vec::new(),
            waiting: TimeTrackedQueue::new(),
        }
    }

    pub fn decision(&self) -> &[u32] {
        &self.decision
    }

    pub fn roster_size(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Inter-arrival sample from the slot-indexed exponential: rate = slot
    /// weight × estimated daily total, slot looked up from the current time.
    fn inter_arrival_sample(&mut self, now: SimTime) -> SimResult<f64> {
        let slot = (now / SLOT_SECONDS) as usize;
        let weight = ARRIVAL_RATE_WEIGHT_BY_SLOT
            .get(slot)
            .copied()
            .ok_or(SimError::ArrivalRateOutOfRange { time: now })?;
        let arrivals_per_slot = weight * ESTIMATED_DAILY_ARRIVALS;
        self.rng.exponential(SLOT_SECONDS / arrivals_per_slot)
    }

    /// Capped shifted-exponential service duration.
    fn service_time_sample(&mut self) -> SimResult<f64> {
        let raw = self.rng.exponential(SERVICE_TIME_MEAN)? + SERVICE_TIME_SHIFT;
        Ok(raw.min(SERVICE_TIME_CAP))
    }

    fn idle_on_shift_agent(&self, now: SimTime) -> Option<AgentId> {
        self.agents
            .iter()
            .position(|agent| agent.is_on_schedule(now) && !agent.is_busy())
    }

    /// Start serving `customer` with `agent` at the current time and
    /// schedule the matching completion.
    fn begin_service(&mut self, agent: AgentId, customer: CustomerId) -> SimResult<()> {
        let now = self.events.now();
        self.customers[customer].set_service_start_time(now)?;
        let duration = self.service_time_sample()?;
        self.agents[agent].set_busy(true);
        self.events.schedule(
            now + duration,
            CallEvent::ServiceCompletion {
                agent,
                customer,
                duration,
            },
        )
    }

    fn on_arrival(&mut self) -> SimResult<()> {
        let now = self.events.now();

        let delta = self.inter_arrival_sample(now)?;
        let next_arrival = now + delta;
        if next_arrival < HORIZON_SECONDS {
            self.events.schedule(next_arrival, CallEvent::Arrival)?;
        }

        let id = self.customers.len();
        let priority_class = (self.rng.categorical(&PRIORITY_CUM_DIST) + 1) as u8;
        let service_class = (self.rng.categorical(&SERVICE_TYPE_CUM_DIST) + 1) as u8;
        let mut customer = Customer::new(id as u32, now, priority_class, service_class);
        // An incoming call is enqueued the moment it arrives.
        customer.set_enqueue_time(now)?;
        self.customers.push(customer);

        if self.waiting.is_empty() {
            if let Some(agent) = self.idle_on_shift_agent(now) {
                return self.begin_service(agent, id);
            }
        }
        self.waiting.enqueue(now, f64::from(priority_class), id);
        Ok(())
    }

    fn on_service_completion(
        &mut self,
        agent: AgentId,
        customer: CustomerId,
        duration: f64,
    ) -> SimResult<()> {
        let now = self.events.now();

        let customer_ref = &mut self.customers[customer];
        customer_ref.set_service_time(duration)?;
        customer_ref.set_exit_time(now)?;

        let agent_ref = &mut self.agents[agent];
        agent_ref.set_busy(false);
        agent_ref.add_service_time(duration)?;

        // Pull the next caller only while the day and the shift both last.
        if now < HORIZON_SECONDS && self.agents[agent].is_on_schedule(now) && !self.waiting.is_empty()
        {
            let next = self.waiting.dequeue(now)?;
            self.begin_service(agent, next)?;
        }
        Ok(())
    }

    fn on_agent_on_schedule(&mut self, agent: AgentId) -> SimResult<()> {
        let now = self.events.now();
        if !self.agents[agent].is_on_schedule(now) {
            return Err(SimError::Inconsistent(format!(
                "agent {} fired an on-schedule event at {now} while off schedule",
                self.agents[agent].id()
            )));
        }
        if self.agents[agent].is_busy() {
            return Ok(());
        }
        if !self.waiting.is_empty() {
            let next = self.waiting.dequeue(now)?;
            self.begin_service(agent, next)?;
        }
        Ok(())
    }

    /// Percentage of arrived customers whose wait stayed within the
    /// threshold.
    fn quality_of_service(&self, threshold: f64) -> f64 {
        let total = self.customers.len();
        if total == 0 {
            return 0.0;
        }
        let qualified = self
            .customers
            .iter()
            .filter(|c| c.wait_time().is_some_and(|w| w <= threshold))
            .count();
        round4(qualified as f64 / total as f64 * 100.0)
    }

    /// Tier-1 service time over tier-1 scheduled time, as a percentage
    /// capped at 100 (an agent may finish its last call past shift end).
    fn agent_utilization(&self) -> f64 {
        let (service, scheduled) = self
            .agents
            .iter()
            .filter(|a| a.tier() == 1)
            .fold((0.0, 0.0), |(service, scheduled), agent| {
                (
                    service + agent.total_service_time(),
                    scheduled + agent.total_schedule_time(),
                )
            });
        if scheduled == 0.0 {
            return 0.0;
        }
        round4((service / scheduled * 100.0).min(100.0))
    }

    fn collect_stats(&self) -> SimResult<ReplicationStats> {
        let waits: Vec<f64> = self.customers.iter().filter_map(Customer::wait_time).collect();
        let services: Vec<f64> = self
            .customers
            .iter()
            .filter_map(Customer::service_time)
            .collect();
        let served = self
            .customers
            .iter()
            .filter(|c| c.service_time().is_some())
            .count() as u32;

        Ok(ReplicationStats {
            max_wait_time: max_of(&waits),
            avg_wait_time: mean_of(&waits),
            max_service_time: max_of(&services),
            avg_service_time: mean_of(&services),
            quality_of_service: self.quality_of_service(QOS_WAIT_THRESHOLD),
            agent_utilization: self.agent_utilization(),
            customers_arrived: self.customers.len() as u32,
            customers_served: served,
            max_queue_length: self.waiting.max_length() as u32,
            avg_queue_length: self
                .waiting
                .average_length_over_interval(0.0, HORIZON_SECONDS)?,
        })
    }
}

impl DiscreteEventCase for CallCenterCase {
    type Event = CallEvent;

    fn events(&self) -> &EventLoop<CallEvent> {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventLoop<CallEvent> {
        &mut self.events
    }

    fn horizon_reached(&self) -> bool {
        self.events.now() >= HORIZON_SECONDS
    }

    fn execute(&mut self, event: CallEvent) -> SimResult<()> {
        match event {
            CallEvent::Arrival => self.on_arrival(),
            CallEvent::ServiceCompletion {
                agent,
                customer,
                duration,
            } => self.on_service_completion(agent, customer, duration),
            CallEvent::AgentOnSchedule { agent } => self.on_agent_on_schedule(agent),
        }
    }

    fn reset(&mut self) -> SimResult<()> {
        self.events.clear();
        self.waiting.clear();
        self.customers.clear();
        self.agents.clear();
        let mut next_id = 0u32;
        for group in &self.groups {
            for _ in 0..group.count {
                self.agents
                    .push(Agent::new(next_id, 1, group.schedule.clone()));
                next_id += 1;
            }
        }
        self.rng = ReplicationRng::new(self.master_seed, self.replication);
        Ok(())
    }
}

impl SimulationCase for CallCenterCase {
    type Replication = ReplicationStats;

    fn simulate(&mut self) -> SimResult<ReplicationStats> {
        self.reset()?;

        self.events.schedule(0.0, CallEvent::Arrival)?;
        let late_starts: Vec<(AgentId, SimTime)> = self
            .agents
            .iter()
            .enumerate()
            .flat_map(|(index, agent)| {
                agent
                    .schedule()
                    .interval_starts()
                    .filter(|&start| start > 0.0)
                    .map(move |start| (index, start))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (agent, start) in late_starts {
            self.events
                .schedule(start, CallEvent::AgentOnSchedule { agent })?;
        }

        self.drive()?;

        let stats = self.collect_stats()?;
        self.replication += 1;
        Ok(stats)
    }

    fn score(&self, replications: &[ReplicationStats]) -> f64 {
        let qos = mean_by(replications, |r| r.quality_of_service);
        let utilization = mean_by(replications, |r| r.agent_utilization);
        0.5 * qos + 0.5 * utilization
    }

    fn run(&mut self, iterations: u32) -> SimResult<SimulationResult> {
        if iterations == 0 {
            return Err(SimError::InvalidConfiguration(
                "iteration count must be positive".into(),
            ));
        }

        let mut replications = Vec::with_capacity(iterations as usize);
        for i in 0..iterations {
            let stats = self.simulate()?;
            log::debug!(
                "replication {i}: served {}/{} customers, qos {:.2}",
                stats.customers_served,
                stats.customers_arrived,
                stats.quality_of_service
            );
            replications.push(stats);
        }

        let score = self.score(&replications);
        let mut summary = BTreeMap::new();
        summary.insert(
            "avg_quality_of_service".into(),
            mean_by(&replications, |r| r.quality_of_service),
        );
        summary.insert(
            "avg_agent_utilization".into(),
            mean_by(&replications, |r| r.agent_utilization),
        );
        summary.insert(
            "avg_max_wait_time".into(),
            mean_by(&replications, |r| r.max_wait_time),
        );
        summary.insert(
            "avg_avg_wait_time".into(),
            mean_by(&replications, |r| r.avg_wait_time),
        );
        summary.insert(
            "avg_max_service_time".into(),
            mean_by(&replications, |r| r.max_service_time),
        );
        summary.insert(
            "avg_avg_service_time".into(),
            mean_by(&replications, |r| r.avg_service_time),
        );
        summary.insert(
            "avg_customers_arrived".into(),
            mean_by(&replications, |r| f64::from(r.customers_arrived)),
        );
        summary.insert(
            "avg_customers_served".into(),
            mean_by(&replications, |r| f64::from(r.customers_served)),
        );
        summary.insert(
            "avg_max_queue_length".into(),
            mean_by(&replications, |r| f64::from(r.max_queue_length)),
        );
        summary.insert(
            "avg_avg_queue_length".into(),
            mean_by(&replications, |r| r.avg_queue_length),
        );

        let mut detail = DetailTable::new(&[
            "replication",
            "max_wait_time",
            "avg_wait_time",
            "max_service_time",
            "avg_service_time",
            "quality_of_service",
            "agent_utilization",
            "customers_arrived",
            "customers_served",
            "max_queue_length",
            "avg_queue_length",
        ]);
        for (i, stats) in replications.iter().enumerate() {
            detail.push_row(vec![
                Cell::Int(i as i64),
                stats.max_wait_time.into(),
                stats.avg_wait_time.into(),
                stats.max_service_time.into(),
                stats.avg_service_time.into(),
                stats.quality_of_service.into(),
                stats.agent_utilization.into(),
                stats.customers_arrived.into(),
                stats.customers_served.into(),
                stats.max_queue_length.into(),
                stats.avg_queue_length.into(),
            ]);
        }

        log::info!(
            "call center run complete: {iterations} replications, score {score:.3}"
        );
        Ok(SimulationResult::new(score, summary, detail))
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        0.0
    } else {
        items.iter().map(f).sum::<f64>() / items.len() as f64
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_carries_its_sampled_classes() {
        let customer = Customer::new(4, 0.0, 2, 3);
        assert_eq!(customer.priority_class(), 2);
        assert_eq!(customer.service_class(), 3);
        assert_eq!(customer.arrival_time(), 0.0);
    }

    #[test]
    fn customer_rejects_double_enqueue() {
        let mut customer = Customer::new(0, 10.0, 3, 1);
        customer.set_enqueue_time(10.0).unwrap();
        assert!(matches!(
            customer.set_enqueue_time(11.0),
            Err(SimError::TimestampRewrite { .. })
        ));
    }

    #[test]
    fn service_start_requires_prior_enqueue() {
        let mut customer = Customer::new(0, 10.0, 3, 1);
        assert!(matches!(
            customer.set_service_start_time(12.0),
            Err(SimError::Inconsistent(_))
        ));
    }

    #[test]
    fn shift_counts_produce_one_group_per_staffed_template() {
        let case = CallCenterCase::from_shift_counts([2, 0, 1], 7).unwrap();
        assert_eq!(case.roster_size(), 3);
    }
}
