use serde::Serialize;

use crate::{Completion, SchedulerError};

/// Aggregate performance of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Percentage of ticks in which some process was executing.
    pub cpu_utilization: f64,
    pub avg_waiting_time: f64,
    pub avg_response_time: f64,
    pub avg_turnaround_time: f64,
}

impl Metrics {
    /// Reduces the completions of a run that lasted `total_time` ticks.
    pub fn from_completions(
        completions: &[Completion],
        total_time: usize,
    ) -> Result<Metrics, SchedulerError> {
        if completions.is_empty() {
            return Err(SchedulerError::EmptyWorkload);
        }
        if total_time == 0 {
            return Err(SchedulerError::Invariant(
                "run finished without advancing the clock".to_string(),
            ));
        }

        let count = completions.len() as f64;
        let mean = |field: fn(&Completion) -> usize| {
            completions.iter().map(field).sum::<usize>() as f64 / count
        };
        let busy: usize = completions.iter().map(|c| c.burst_time).sum();

        Ok(Metrics {
            cpu_utilization: 100.0 * busy as f64 / total_time as f64,
            avg_waiting_time: mean(|c| c.waiting_time),
            avg_response_time: mean(|c| c.response_time),
            avg_turnaround_time: mean(|c| c.turnaround_time),
        })
    }
}
