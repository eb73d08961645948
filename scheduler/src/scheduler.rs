//! Types shared by every scheduling policy and the `Scheduler` trait
//! each policy implements.

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

use crate::{AgingFactor, ProcessInfo, SchedulerError};

/// Process identifier, as read from the workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Pid(usize);

impl Pid {
    pub const fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    /// Loaded, but its arrival tick has not been reached yet.
    Created,
    /// Waiting in the ready queue.
    Ready,
    /// Holding the CPU.
    Running,
    /// All of its burst has been executed.
    Finished,
}

/// Read-only view of a process record.
pub trait Process {
    fn pid(&self) -> Pid;

    fn state(&self) -> ProcessState;

    /// Static priority, a higher value is more urgent.
    fn priority(&self) -> i32;

    /// Returns `(arrival_time, burst_time, remaining_time)`.
    fn timings(&self) -> (usize, usize, usize);
}

/// Something that happened during one tick of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pid", rename_all = "snake_case")]
pub enum Event {
    Arrival(Pid),
    Running(Pid),
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub tick: usize,
    pub event: Event,
}

/// What the CPU did during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// `pid` executed one unit of its burst.
    Run(Pid),
    /// Nothing was ready.
    Idle,
}

/// Outcome of [`Scheduler::tick`].
#[derive(Debug)]
pub struct Tick {
    pub decision: SchedulingDecision,
    /// A process that reached the end of its burst during this tick. The
    /// scheduler gives up ownership of it.
    pub completed: Option<ProcessInfo>,
}

impl Tick {
    pub fn run(pid: Pid, completed: Option<ProcessInfo>) -> Tick {
        Tick {
            decision: SchedulingDecision::Run(pid),
            completed,
        }
    }

    pub fn idle(completed: Option<ProcessInfo>) -> Tick {
        Tick {
            decision: SchedulingDecision::Idle,
            completed,
        }
    }
}

/// The scheduling discipline a run used, together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    Fcfs,
    RoundRobin { quantum: NonZeroUsize },
    PriorityAging { aging: AgingFactor },
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::RoundRobin { quantum } => write!(f, "Round Robin (Time Quantum = {quantum})"),
            Policy::PriorityAging { aging } => {
                write!(f, "Preemptive Priority with Aging (alpha = {aging})")
            }
        }
    }
}

/// A scheduling discipline driven one tick at a time by the
/// [`Processor`](crate::Processor).
///
/// Once admitted, a process is owned by the scheduler (either queued or
/// running) until it is handed back through [`Tick::completed`].
pub trait Scheduler {
    fn policy(&self) -> Policy;

    /// Hands over a process whose arrival tick is the current tick.
    fn admit(&mut self, process: ProcessInfo);

    /// Chooses the process that holds the CPU at `clock`, executes one
    /// tick of it and reports any completion.
    fn tick(&mut self, clock: usize) -> Result<Tick, SchedulerError>;

    /// Lists the processes currently owned by the scheduler.
    fn list(&self) -> Vec<&dyn Process>;
}
