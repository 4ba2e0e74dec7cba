//! Command-line definitions for `cpusched`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use u_cpu_sched::models::Ticks;

/// Deterministic CPU scheduling simulator.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Non-preemptive Shortest-Job-First.
    Sjf {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Round-Robin with a fixed quantum.
    Rr {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        rr: RoundRobinArgs,
    },
    /// Run both disciplines on the same workload.
    Compare {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        rr: RoundRobinArgs,
    },
    /// Write a seeded random workload as JSON.
    Generate {
        /// RNG seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of processes.
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Quantum stored in the workload.
        #[arg(short, long)]
        quantum: Option<Ticks>,
        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Workload JSON file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Enforce the reference tool's 3 to 10 process limit.
    #[arg(long)]
    pub reference_limits: bool,
}

#[derive(Args, Debug)]
pub struct RoundRobinArgs {
    /// Time quantum; overrides the workload's "quantum".
    #[arg(short, long)]
    pub quantum: Option<Ticks>,

    /// Divide Round-Robin averages by process count instead of segment count.
    #[arg(long)]
    pub per_process_average: bool,
}
