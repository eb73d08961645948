//! Plain-text trace logs, one per scheduling run.

use std::fmt;
use std::io;

use scheduler::{Event, Policy, Report, TraceEvent};

const RULE: &str = "==============================";

/// Name of the file a policy's trace log is written to.
pub fn output_file_name(policy: &Policy) -> &'static str {
    match policy {
        Policy::Fcfs => "fcfs_output.txt",
        Policy::RoundRobin { .. } => "rr_output.txt",
        Policy::PriorityAging { .. } => "priority_output.txt",
    }
}

/// Displays a [`Report`] as a trace log: header, one line per event,
/// a per-process table and the averages.
pub struct TraceLog<'a>(pub &'a Report);

impl fmt::Display for TraceLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Scheduling : {}", report.policy)?;
        writeln!(f, "{RULE}")?;
        for TraceEvent { tick, event } in &report.trace {
            match event {
                Event::Arrival(pid) => writeln!(f, "<time {tick}> [new arrival] process {pid}")?,
                Event::Running(pid) => writeln!(f, "<time {tick}> process {pid} is running")?,
                Event::Idle => writeln!(f, "<time {tick}> ---- system is idle ----")?,
            }
        }
        writeln!(f, "<time {}> all processes finish", report.total_time)?;
        writeln!(f, "{RULE}")?;

        writeln!(
            f,
            "{:>7} {:>7} {:>5} {:>5} {:>6} {:>8} {:>7} {:>10}",
            "Process", "Arrival", "Burst", "Start", "Finish", "Response", "Waiting", "Turnaround"
        )?;
        for c in &report.completions {
            writeln!(
                f,
                "{:>7} {:>7} {:>5} {:>5} {:>6} {:>8} {:>7} {:>10}",
                c.pid,
                c.arrival_time,
                c.burst_time,
                c.start_time,
                c.finish_time,
                c.response_time,
                c.waiting_time,
                c.turnaround_time
            )?;
        }
        writeln!(f, "{RULE}")?;

        let m = &report.metrics;
        writeln!(f, "Average CPU usage : {:.2} %", m.cpu_utilization)?;
        writeln!(f, "Average waiting time : {:.1}", m.avg_waiting_time)?;
        writeln!(f, "Average response time : {:.1}", m.avg_response_time)?;
        writeln!(f, "Average turnaround time : {:.1}", m.avg_turnaround_time)
    }
}

pub fn write_report<W: io::Write>(out: &mut W, report: &Report) -> io::Result<()> {
    write!(out, "{}", TraceLog(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheduler::{fcfs, priority_aging, AgingFactor, Pid, ProcessInfo, Processor};

    fn workload() -> Vec<ProcessInfo> {
        vec![
            ProcessInfo::new(Pid::new(1), 1, 0, 3),
            ProcessInfo::new(Pid::new(2), 5, 1, 2),
        ]
    }

    #[test]
    fn test_fcfs_trace_log() {
        let report = Processor::run(fcfs(), workload()).unwrap();
        let text = TraceLog(&report).to_string();

        assert!(text.starts_with(
            "Scheduling : FCFS
==============================
<time 0> [new arrival] process 1
<time 0> process 1 is running
<time 1> [new arrival] process 2
<time 1> process 1 is running
<time 2> process 1 is running
<time 3> process 2 is running
<time 4> process 2 is running
<time 5> all processes finish
==============================
"
        ));
        assert!(text.ends_with(
            "==============================
Average CPU usage : 100.00 %
Average waiting time : 1.0
Average response time : 1.0
Average turnaround time : 3.5
"
        ));

        let row: Vec<&str> = text
            .lines()
            .find(|line| line.trim_start().starts_with("2 "))
            .unwrap()
            .split_whitespace()
            .collect();
        assert_eq!(row, ["2", "1", "2", "3", "5", "2", "2", "4"]);
    }

    #[test]
    fn test_priority_header_and_idle_line() {
        let processes = vec![ProcessInfo::new(Pid::new(9), 0, 1, 1)];
        let report = Processor::run(priority_aging(AgingFactor::new(0.5).unwrap()), processes)
            .unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Scheduling : Preemptive Priority with Aging (alpha = 0.50)\n"));
        assert!(text.contains("<time 0> ---- system is idle ----\n"));
        assert!(text.contains("Average CPU usage : 50.00 %\n"));
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(output_file_name(&Policy::Fcfs), "fcfs_output.txt");
        assert_eq!(
            output_file_name(&Policy::PriorityAging {
                aging: AgingFactor::NONE
            }),
            "priority_output.txt"
        );
    }
}
