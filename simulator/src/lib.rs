//! Input and output around the `scheduler` core: process list loading,
//! trace log rendering and logging setup for the `schedsim` binary.

pub mod format;
pub mod loader;
pub mod logger;

pub use format::{output_file_name, write_report, TraceLog};
pub use loader::{load_processes, parse_processes, LoadError};
