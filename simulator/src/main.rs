//! schedsim — runs FCFS, Round Robin and Priority with Aging over a
//! process list and writes one trace log per discipline.
//!
//! # Usage
//!
//! ```bash
//! schedsim processes.txt --quantum 2 --alpha 0.5 --out-dir traces/
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use scheduler::{run_policy, Policy, SimulationConfig};
use simulator::{load_processes, logger, output_file_name, write_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// First-come, first-served
    Fcfs,
    /// Round robin with the given quantum
    Rr,
    /// Preemptive priority with aging
    Priority,
    /// All three, one after another
    All,
}

impl PolicyArg {
    fn select(self, config: &SimulationConfig) -> Vec<Policy> {
        let [fcfs, rr, priority] = config.policies();
        match self {
            PolicyArg::Fcfs => vec![fcfs],
            PolicyArg::Rr => vec![rr],
            PolicyArg::Priority => vec![priority],
            PolicyArg::All => vec![fcfs, rr, priority],
        }
    }
}

/// Discrete-time CPU scheduling simulator.
#[derive(Parser, Debug)]
#[command(name = "schedsim")]
#[command(about = "Simulate FCFS, Round Robin and Priority-with-Aging scheduling")]
struct Cli {
    /// Process list: one `id priority arrival burst` record per line.
    input: PathBuf,

    /// Directory the trace logs are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Round robin time quantum, in ticks.
    #[arg(short, long, default_value_t = 2)]
    quantum: usize,

    /// Aging factor for priority scheduling.
    #[arg(short, long, default_value_t = 0.5)]
    alpha: f64,

    /// Which discipline to simulate.
    #[arg(short, long, value_enum, default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Print the reports as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).context("failed to install logger")?;

    let config = SimulationConfig::new(cli.quantum, cli.alpha).context("invalid configuration")?;
    let processes = load_processes(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let mut reports = Vec::new();
    for policy in cli.policy.select(&config) {
        let report = run_policy(policy, processes.clone())
            .with_context(|| format!("{policy} simulation failed"))?;

        let path = cli.out_dir.join(output_file_name(&report.policy));
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_report(&mut out, &report)
            .and_then(|_| out.flush())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());

        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
