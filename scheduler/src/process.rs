use serde::Serialize;

use crate::{AgingFactor, Pid, Process, ProcessState, SchedulerError};

/// Static descriptor and runtime state of one simulated process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pid: Pid,
    priority: i32,
    arrival_time: usize,
    burst_time: usize,

    state: ProcessState,
    remaining_time: usize,
    start_time: Option<usize>,
    finish_time: Option<usize>,

    response_time: Option<usize>,
    waiting_time: Option<usize>,
    turnaround_time: Option<usize>,
}

/// Per-process statistics of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub pid: Pid,
    pub arrival_time: usize,
    pub burst_time: usize,
    pub start_time: usize,
    pub finish_time: usize,
    pub response_time: usize,
    pub waiting_time: usize,
    pub turnaround_time: usize,
}

impl ProcessInfo {
    pub fn new(pid: Pid, priority: i32, arrival_time: usize, burst_time: usize) -> ProcessInfo {
        ProcessInfo {
            pid,
            priority,
            arrival_time,
            burst_time,
            state: ProcessState::Created,
            remaining_time: burst_time,
            start_time: None,
            finish_time: None,
            response_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn burst_time(&self) -> usize {
        self.burst_time
    }

    pub fn remaining_time(&self) -> usize {
        self.remaining_time
    }

    pub fn start_time(&self) -> Option<usize> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<usize> {
        self.finish_time
    }

    /// True once the process has executed at least one tick.
    pub fn started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Base priority plus the truncated aging bonus for the time elapsed
    /// since arrival.
    pub fn effective_priority(&self, aging: AgingFactor, clock: usize) -> i64 {
        i64::from(self.priority) + aging.bonus(clock.saturating_sub(self.arrival_time))
    }

    /// Summary of a finished process, `None` until it completes.
    pub fn completion(&self) -> Option<Completion> {
        Some(Completion {
            pid: self.pid,
            arrival_time: self.arrival_time,
            burst_time: self.burst_time,
            start_time: self.start_time?,
            finish_time: self.finish_time?,
            response_time: self.response_time?,
            waiting_time: self.waiting_time?,
            turnaround_time: self.turnaround_time?,
        })
    }

    pub(crate) fn make_ready(&mut self) {
        self.state = ProcessState::Ready;
    }

    /// Gives the CPU to this process, recording the response time on its
    /// first dispatch.
    pub(crate) fn dispatch(&mut self, clock: usize) -> Result<(), SchedulerError> {
        self.state = ProcessState::Running;
        if self.started() {
            return Ok(());
        }

        let response = clock.checked_sub(self.arrival_time).ok_or_else(|| {
            SchedulerError::Invariant(format!(
                "process {} dispatched at tick {clock} before its arrival at tick {}",
                self.pid, self.arrival_time
            ))
        })?;
        self.start_time = Some(clock);
        self.response_time = Some(response);
        Ok(())
    }

    /// Executes one tick of the burst.
    pub(crate) fn execute(&mut self) -> Result<(), SchedulerError> {
        if self.state != ProcessState::Running {
            return Err(SchedulerError::Invariant(format!(
                "process {} executed while {:?}",
                self.pid, self.state
            )));
        }
        self.remaining_time = self.remaining_time.checked_sub(1).ok_or_else(|| {
            SchedulerError::Invariant(format!("process {} executed past its burst", self.pid))
        })?;
        Ok(())
    }

    /// Marks the process finished at `finish_time` and derives its
    /// turnaround and waiting times.
    pub(crate) fn finish(&mut self, finish_time: usize) -> Result<(), SchedulerError> {
        if self.remaining_time != 0 {
            return Err(SchedulerError::Invariant(format!(
                "process {} finished with {} ticks of work left",
                self.pid, self.remaining_time
            )));
        }

        let turnaround = finish_time
            .checked_sub(self.arrival_time)
            .filter(|turnaround| *turnaround >= self.burst_time)
            .ok_or_else(|| {
                SchedulerError::Invariant(format!(
                    "process {} finished at tick {finish_time}, too early for arrival {} and burst {}",
                    self.pid, self.arrival_time, self.burst_time
                ))
            })?;

        self.state = ProcessState::Finished;
        self.finish_time = Some(finish_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
        Ok(())
    }
}

impl Process for ProcessInfo {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn timings(&self) -> (usize, usize, usize) {
        (self.arrival_time, self.burst_time, self.remaining_time)
    }
}
