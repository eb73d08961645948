use crate::Pid;

/// Errors reported by the simulation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    #[error("Workload contains no processes")]
    EmptyWorkload,

    #[error("Process {0} appears more than once in the workload")]
    DuplicatePid(Pid),

    #[error("Process {0} has a zero-length burst")]
    ZeroBurst(Pid),

    #[error("Workload arrival and burst times overflow the simulation clock")]
    TimeOverflow,

    #[error("Round robin quantum must be at least 1")]
    InvalidQuantum,

    #[error("Aging factor must be finite and non-negative, got {0}")]
    InvalidAgingFactor(f64),

    #[error("Scheduler invariant violated: {0}")]
    Invariant(String),
}
