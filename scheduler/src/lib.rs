//! A CPU scheduling simulator library.
//!
//! This library reproduces, tick by tick, how a fixed set of processes is
//! scheduled under First-Come-First-Served, Round Robin and preemptive
//! Priority with Aging, and derives waiting, response and turnaround
//! times plus CPU utilization for each run.
//!

use std::num::NonZeroUsize;

mod scheduler;

pub use crate::scheduler::{
    Event, Pid, Policy, Process, ProcessState, Scheduler, SchedulingDecision, Tick, TraceEvent,
};

mod config;
pub use config::{AgingFactor, SimulationConfig};

mod error;
pub use error::SchedulerError;

mod metrics;
pub use metrics::Metrics;

mod process;
pub use process::{Completion, ProcessInfo};

mod processor;
pub use processor::{validate_workload, Processor, Report};

mod ready_queue;
pub use ready_queue::ReadyQueue;

mod schedulers;

use schedulers::{Fcfs, PriorityAging, RoundRobin};

/// Returns a structure that implements the `Scheduler` trait with a first-come, first-served policy
///
/// Processes run to completion in the order they arrived, later arrivals
/// never interrupt the running process.
pub fn fcfs() -> impl Scheduler {
    Fcfs::new()
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the number of consecutive ticks a process can run before it
///               is sent to the back of the ready queue
pub fn round_robin(quantum: NonZeroUsize) -> impl Scheduler {
    RoundRobin::new(quantum)
}

/// Returns a structure that implements the `Scheduler` trait with a preemptive priority policy
///
/// * `aging` - the effective priority gained per tick since arrival; a
///             ready process preempts the running one when its effective
///             priority is strictly greater
pub fn priority_aging(aging: AgingFactor) -> impl Scheduler {
    PriorityAging::new(aging)
}

/// Runs a single discipline over its own copy of `processes`.
pub fn run_policy(policy: Policy, processes: Vec<ProcessInfo>) -> Result<Report, SchedulerError> {
    match policy {
        Policy::Fcfs => Processor::run(fcfs(), processes),
        Policy::RoundRobin { quantum } => Processor::run(round_robin(quantum), processes),
        Policy::PriorityAging { aging } => Processor::run(priority_aging(aging), processes),
    }
}

/// Runs FCFS, Round Robin and Priority with Aging, in that order, each
/// against an independent copy of `processes`.
pub fn simulate_all(
    processes: &[ProcessInfo],
    config: &SimulationConfig,
) -> Result<Vec<Report>, SchedulerError> {
    config
        .policies()
        .into_iter()
        .map(|policy| run_policy(policy, processes.to_vec()))
        .collect()
}
