use log::debug;

use crate::ready_queue::ReadyQueue;
use crate::schedulers::{execute_running, list_owned};
use crate::{Policy, Process, ProcessInfo, Scheduler, SchedulerError, Tick};

/// First-come, first-served: non-preemptive, dispatches in arrival order.
#[derive(Debug, Default)]
pub struct Fcfs {
	ready_q: ReadyQueue,
	running: Option<ProcessInfo>,
}

impl Fcfs {
	pub fn new() -> Fcfs {
		Fcfs::default()
	}
}

impl Scheduler for Fcfs {
	fn policy(&self) -> Policy {
		Policy::Fcfs
	}

	fn admit(&mut self, process: ProcessInfo) {
		self.ready_q.insert(process);
	}

	fn tick(&mut self, clock: usize) -> Result<Tick, SchedulerError> {
		// the CPU is only given up when the burst completes
		if self.running.is_none() {
			if let Some(mut next) = self.ready_q.remove_front() {
				next.dispatch(clock)?;
				debug!("tick {clock}: dispatch process {}", next.pid());
				self.running = Some(next);
			}
		}

		execute_running(&mut self.running, clock)
	}

	fn list(&self) -> Vec<&dyn Process> {
		list_owned(&self.running, self.ready_q.iter())
	}
}
