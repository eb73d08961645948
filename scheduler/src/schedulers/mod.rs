//! Scheduling disciplines.
//!
//! Each discipline lives in its own file and is exported here; the
//! factory functions in the crate root construct them.
//!

use log::debug;

use crate::{Process, ProcessInfo, SchedulerError, Tick};

mod fcfs;
pub use fcfs::Fcfs;

mod round_robin;
pub use round_robin::RoundRobin;

mod priority;
pub use priority::PriorityAging;

/// Executes one tick of the running process, if any. A process that
/// exhausts its burst finishes at the end of this tick and leaves `running`.
pub(crate) fn execute_running(
	running: &mut Option<ProcessInfo>,
	clock: usize,
) -> Result<Tick, SchedulerError> {
	let Some(process) = running.as_mut() else {
		return Ok(Tick::idle(None));
	};

	let pid = process.pid();
	process.execute()?;
	if process.remaining_time() > 0 {
		return Ok(Tick::run(pid, None));
	}

	let mut done = running.take();
	if let Some(process) = done.as_mut() {
		process.finish(clock + 1)?;
		debug!("process {pid} finished at tick {}", clock + 1);
	}
	Ok(Tick::run(pid, done))
}

/// The running process first, then the ready queue in order.
pub(crate) fn list_owned<'a>(
	running: &'a Option<ProcessInfo>,
	queued: impl Iterator<Item = &'a ProcessInfo>,
) -> Vec<&'a dyn Process> {
	running
		.iter()
		.chain(queued)
		.map(|p| p as &dyn Process)
		.collect()
}
