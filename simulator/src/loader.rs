//! Reads process lists: one process per line, `id priority arrival burst`.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use scheduler::{validate_workload, Pid, ProcessInfo, SchedulerError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: unexpected data after the burst length")]
    TrailingField { line: usize },

    #[error("Line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid workload: {0}")]
    Workload(#[from] SchedulerError),
}

pub fn load_processes(path: &Path) -> Result<Vec<ProcessInfo>, LoadError> {
    let input = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let processes = parse_processes(&input)?;
    debug!("loaded {} processes from {}", processes.len(), path.display());
    Ok(processes)
}

/// Parses a process list. Blank lines and lines starting with `#` are
/// skipped; the result keeps the order of the input.
pub fn parse_processes(input: &str) -> Result<Vec<ProcessInfo>, LoadError> {
    let mut processes = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let mut fields = text.split_whitespace();
        let pid: usize = field(&mut fields, line, "id")?;
        let priority: i32 = field(&mut fields, line, "priority")?;
        let arrival: usize = field(&mut fields, line, "arrival time")?;
        let burst: usize = field(&mut fields, line, "burst time")?;
        if fields.next().is_some() {
            return Err(LoadError::TrailingField { line });
        }

        processes.push(ProcessInfo::new(Pid::new(pid), priority, arrival, burst));
    }

    validate_workload(&processes)?;
    Ok(processes)
}

fn field<'a, T: FromStr>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &'static str,
) -> Result<T, LoadError> {
    let value = fields
        .next()
        .ok_or(LoadError::MissingField { line, field: name })?;
    value.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        field: name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheduler::Process;

    const WORKLOAD: &str = "\
# id priority arrival burst
1 3 0 5
2 1 2 3

3 -1 2 1
";

    #[test]
    fn test_parse_keeps_file_order() {
        let processes = parse_processes(WORKLOAD).unwrap();

        let pids: Vec<usize> = processes.iter().map(|p| p.pid().as_usize()).collect();
        assert_eq!(pids, [1, 2, 3]);
        assert_eq!(processes[2].priority(), -1);
        assert_eq!(processes[1].timings(), (2, 3, 3));
    }

    #[test]
    fn test_loading_twice_gives_identical_records() {
        let path = std::env::temp_dir().join(format!("schedsim-load-{}.txt", std::process::id()));
        fs::write(&path, WORKLOAD).unwrap();

        let first = load_processes(&path).unwrap();
        let second = load_processes(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_field() {
        let err = parse_processes("1 3 0 5\n2 1 4\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField { line: 2, field: "burst time" }
        ));
    }

    #[test]
    fn test_trailing_field() {
        let err = parse_processes("1 3 0 5 9\n").unwrap_err();
        assert!(matches!(err, LoadError::TrailingField { line: 1 }));
    }

    #[test]
    fn test_negative_arrival_is_invalid() {
        let err = parse_processes("1 3 -2 5\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidNumber { line: 1, field: "arrival time", .. }
        ));
        assert_eq!(err.to_string(), "Line 1: invalid arrival time \"-2\"");
    }

    #[test]
    fn test_workload_errors_are_reported() {
        assert!(matches!(
            parse_processes("# nothing here\n"),
            Err(LoadError::Workload(SchedulerError::EmptyWorkload))
        ));
        assert!(matches!(
            parse_processes("1 0 0 0\n"),
            Err(LoadError::Workload(SchedulerError::ZeroBurst(_)))
        ));
        assert!(matches!(
            parse_processes("4 0 0 1\n4 0 1 1\n"),
            Err(LoadError::Workload(SchedulerError::DuplicatePid(_)))
        ));
        assert!(matches!(
            parse_processes(&format!("1 0 {} 1\n", usize::MAX)),
            Err(LoadError::Workload(SchedulerError::TimeOverflow))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_processes(Path::new("/nonexistent/schedsim/input.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
