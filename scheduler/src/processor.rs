//! The simulated CPU: owns the clock, feeds arrivals to a scheduler and
//! records what happens on every tick.

use std::collections::{HashSet, VecDeque};

use log::{info, trace};
use serde::Serialize;

use crate::{
    Completion, Event, Metrics, Pid, Policy, Process, ProcessInfo, ProcessState, Scheduler,
    SchedulerError, SchedulingDecision, TraceEvent,
};

/// Everything observed during one run of a scheduling discipline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub policy: Policy,
    /// One `Running` or `Idle` event per tick, preceded by that tick's arrivals.
    pub trace: Vec<TraceEvent>,
    /// Per-process statistics, in workload order.
    pub completions: Vec<Completion>,
    pub metrics: Metrics,
    /// Number of ticks simulated.
    pub total_time: usize,
}

/// Checks that a workload can be simulated: at least one process, unique
/// pids, non-empty bursts and a schedule that fits the clock.
pub fn validate_workload(processes: &[ProcessInfo]) -> Result<(), SchedulerError> {
    if processes.is_empty() {
        return Err(SchedulerError::EmptyWorkload);
    }

    let mut seen = HashSet::with_capacity(processes.len());
    for p in processes {
        if !seen.insert(p.pid()) {
            return Err(SchedulerError::DuplicatePid(p.pid()));
        }
        if p.burst_time() == 0 {
            return Err(SchedulerError::ZeroBurst(p.pid()));
        }
        if p.state() != ProcessState::Created {
            return Err(SchedulerError::Invariant(format!(
                "process {} was already scheduled",
                p.pid()
            )));
        }
    }
    tick_limit(processes)?;
    Ok(())
}

/// Latest tick by which every process must have finished: every tick either
/// executes work or waits for the next arrival, and round robin needs one
/// extra tick to notice the last completion.
fn tick_limit(processes: &[ProcessInfo]) -> Result<usize, SchedulerError> {
    let last_arrival = processes.iter().map(ProcessInfo::arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(0usize, |work, p| work.checked_add(p.burst_time()))
        .and_then(|work| last_arrival.checked_add(work))
        .and_then(|limit| limit.checked_add(1))
        // the clock steps once past the limit before giving up
        .filter(|limit| limit.checked_add(1).is_some())
        .ok_or(SchedulerError::TimeOverflow)
}

pub struct Processor;

impl Processor {
    /// Runs `scheduler` over `processes` until every process has finished.
    ///
    /// The workload order is significant: processes arriving on the same
    /// tick are admitted in that order.
    pub fn run<S: Scheduler>(
        mut scheduler: S,
        processes: Vec<ProcessInfo>,
    ) -> Result<Report, SchedulerError> {
        validate_workload(&processes)?;

        let policy = scheduler.policy();
        let order: Vec<Pid> = processes.iter().map(|p| p.pid()).collect();
        let total = processes.len();
        let tick_limit = tick_limit(&processes)?;

        let mut pending: Vec<ProcessInfo> = processes;
        pending.sort_by_key(ProcessInfo::arrival_time);
        let mut pending = VecDeque::from(pending);

        let mut trace = Vec::new();
        let mut finished: Vec<ProcessInfo> = Vec::with_capacity(total);
        let mut clock = 0;

        while finished.len() < total {
            if clock > tick_limit {
                return Err(SchedulerError::Invariant(format!(
                    "{policy} did not finish within {tick_limit} ticks"
                )));
            }

            while pending.front().map_or(false, |p| p.arrival_time() == clock) {
                if let Some(process) = pending.pop_front() {
                    trace.push(TraceEvent {
                        tick: clock,
                        event: Event::Arrival(process.pid()),
                    });
                    scheduler.admit(process);
                }
            }

            let tick = scheduler.tick(clock)?;
            check_single_running(&scheduler, clock)?;

            let event = match tick.decision {
                SchedulingDecision::Run(pid) => Event::Running(pid),
                SchedulingDecision::Idle => Event::Idle,
            };
            trace!("tick {clock}: {event:?}");
            trace.push(TraceEvent { tick: clock, event });

            if let Some(done) = tick.completed {
                if done.state() != ProcessState::Finished {
                    return Err(SchedulerError::Invariant(format!(
                        "process {} reported complete while {:?}",
                        done.pid(),
                        done.state()
                    )));
                }
                if finished.iter().any(|p| p.pid() == done.pid()) {
                    return Err(SchedulerError::Invariant(format!(
                        "process {} completed twice",
                        done.pid()
                    )));
                }
                finished.push(done);
            }

            clock += 1;
        }

        let completions = order
            .iter()
            .map(|pid| {
                finished
                    .iter()
                    .find(|p| p.pid() == *pid)
                    .and_then(ProcessInfo::completion)
                    .ok_or_else(|| {
                        SchedulerError::Invariant(format!("process {pid} has no completion"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let metrics = Metrics::from_completions(&completions, clock)?;

        info!(
            "{policy}: {total} processes in {clock} ticks, cpu {:.2}%, avg wait {:.1}",
            metrics.cpu_utilization, metrics.avg_waiting_time
        );

        Ok(Report {
            policy,
            trace,
            completions,
            metrics,
            total_time: clock,
        })
    }
}

fn check_single_running<S: Scheduler>(scheduler: &S, clock: usize) -> Result<(), SchedulerError> {
    let running = scheduler
        .list()
        .iter()
        .filter(|p| p.state() == ProcessState::Running)
        .count();
    if running > 1 {
        return Err(SchedulerError::Invariant(format!(
            "{running} processes running at tick {clock}"
        )));
    }
    Ok(())
}
