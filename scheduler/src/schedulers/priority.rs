use log::debug;

use crate::ready_queue::ReadyQueue;
use crate::schedulers::{execute_running, list_owned};
use crate::{AgingFactor, Policy, Process, ProcessInfo, Scheduler, SchedulerError, Tick};

/// Preemptive priority scheduling with aging.
///
/// Every tick the best ready candidate is compared against the running
/// process; it takes over only when its effective priority is strictly
/// greater, so ties keep the incumbent on the CPU. Effective priority is
/// `base + trunc(aging * (clock - arrival))` for queued and running
/// processes alike.
#[derive(Debug)]
pub struct PriorityAging {
	ready_q: ReadyQueue,
	running: Option<ProcessInfo>,
	aging: AgingFactor,
}

impl PriorityAging {
	pub fn new(aging: AgingFactor) -> PriorityAging {
		PriorityAging {
			ready_q: ReadyQueue::new(),
			running: None,
			aging,
		}
	}

	fn preempts(&self, candidate: &ProcessInfo, clock: usize) -> bool {
		match &self.running {
			Some(current) => {
				candidate.effective_priority(self.aging, clock)
					> current.effective_priority(self.aging, clock)
			}
			None => true,
		}
	}
}

impl Scheduler for PriorityAging {
	fn policy(&self) -> Policy {
		Policy::PriorityAging { aging: self.aging }
	}

	fn admit(&mut self, process: ProcessInfo) {
		self.ready_q.insert(process);
	}

	fn tick(&mut self, clock: usize) -> Result<Tick, SchedulerError> {
		if let Some(mut candidate) = self
			.ready_q
			.remove_highest_effective_priority(self.aging, clock)
		{
			if self.preempts(&candidate, clock) {
				if let Some(current) = self.running.take() {
					debug!(
						"tick {clock}: process {} preempts process {}",
						candidate.pid(),
						current.pid()
					);
					self.ready_q.insert(current);
				}
				candidate.dispatch(clock)?;
				self.running = Some(candidate);
			} else {
				// goes to the tail, losing its place among equal scores
				self.ready_q.insert(candidate);
			}
		}

		execute_running(&mut self.running, clock)
	}

	fn list(&self) -> Vec<&dyn Process> {
		list_owned(&self.running, self.ready_q.iter())
	}
}
