use std::num::NonZeroUsize;

use log::debug;

use crate::ready_queue::ReadyQueue;
use crate::schedulers::list_owned;
use crate::{Policy, Process, ProcessInfo, Scheduler, SchedulerError, Tick};

/// Round Robin scheduler struct
#[derive(Debug)]
pub struct RoundRobin {
	ready_q: ReadyQueue,
	running: Option<ProcessInfo>,
	quantum: NonZeroUsize,
	/// ticks the running process has had since it was dispatched
	time_slice: usize,
}

impl RoundRobin {
	pub fn new(quantum: NonZeroUsize) -> RoundRobin {
		RoundRobin {
			ready_q: ReadyQueue::new(),
			running: None,
			quantum,
			time_slice: 0,
		}
	}

	/// Takes the CPU away from the running process if its quantum is used
	/// up or its burst is done. A finished process is returned.
	///
	/// Completion is only noticed here, at the start of the tick after the
	/// last unit of work, so `clock` is the finish time.
	fn release(&mut self, clock: usize) -> Result<Option<ProcessInfo>, SchedulerError> {
		let expired = match &self.running {
			Some(proc) => self.time_slice == self.quantum.get() || proc.remaining_time() == 0,
			None => false,
		};
		if !expired {
			return Ok(None);
		}

		self.time_slice = 0;
		let Some(mut proc) = self.running.take() else {
			return Ok(None);
		};

		if proc.remaining_time() > 0 {
			debug!("tick {clock}: quantum expired for process {}", proc.pid());
			// back of the line, behind everything that arrived meanwhile
			self.ready_q.insert(proc);
			return Ok(None);
		}

		proc.finish(clock)?;
		debug!("process {} finished at tick {clock}", proc.pid());
		Ok(Some(proc))
	}
}

impl Scheduler for RoundRobin {
	fn policy(&self) -> Policy {
		Policy::RoundRobin {
			quantum: self.quantum,
		}
	}

	fn admit(&mut self, process: ProcessInfo) {
		self.ready_q.insert(process);
	}

	fn tick(&mut self, clock: usize) -> Result<Tick, SchedulerError> {
		let completed = self.release(clock)?;

		if self.running.is_none() {
			if let Some(mut next) = self.ready_q.remove_front() {
				next.dispatch(clock)?;
				debug!("tick {clock}: dispatch process {}", next.pid());
				self.running = Some(next);
			}
		}

		match self.running.as_mut() {
			Some(proc) => {
				proc.execute()?;
				self.time_slice += 1;
				Ok(Tick::run(proc.pid(), completed))
			}
			None => Ok(Tick::idle(completed)),
		}
	}

	fn list(&self) -> Vec<&dyn Process> {
		list_owned(&self.running, self.ready_q.iter())
	}
}
