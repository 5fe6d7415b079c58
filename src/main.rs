use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use cpu_schedule::dispatching::TieBreaker;
use cpu_schedule::models::Process;
use cpu_schedule::parser::parse_file;
use cpu_schedule::report::{self, BarChart, ComparisonTable, RunReport};
use cpu_schedule::scheduler::{compare_all, Algorithm, SimulationRequest};
use cpu_schedule::validation::{describe, ValidationError};

/// Quantum used by `compare` when none is given.
const DEFAULT_COMPARE_QUANTUM: i64 = 4;

/// Deterministic CPU scheduling simulator.
///
/// Reads a process list (`id arrival burst priority` per line, `#` starts a
/// comment) and simulates one or all scheduling disciplines over it.
#[derive(Debug, Parser)]
#[clap(name = "cpu-schedule", version, about)]
struct Opts {
    #[clap(subcommand)]
    command: Command,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a single algorithm and print its full report.
    Run {
        #[clap(flatten)]
        common: CommonArgs,

        /// Scheduling algorithm: FCFS, SJF, SRTF, RR, PRIO_NP or PRIO_P.
        #[clap(short = 'a', long)]
        algo: Algorithm,

        /// Time quantum (required for RR).
        #[clap(short = 'q', long)]
        quantum: Option<i64>,
    },
    /// Simulate every algorithm on the same input and compare them.
    Compare {
        #[clap(flatten)]
        common: CommonArgs,

        /// Time quantum for the round-robin run.
        #[clap(short = 'q', long, default_value_t = DEFAULT_COMPARE_QUANTUM)]
        quantum: i64,
    },
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// Path to the process file.
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// Output format.
    #[clap(short = 'f', long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Final tie-breaker once every selection key is equal.
    #[clap(short = 't', long, value_enum, default_value_t = TieBreakArg::Order)]
    tie_break: TieBreakArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Earlier line in the input file wins.
    Order,
    /// Lexicographically smaller process ID wins.
    Id,
}

impl From<TieBreakArg> for TieBreaker {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Order => TieBreaker::DeclarationOrder,
            TieBreakArg::Id => TieBreaker::ById,
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Off)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn load(input: &Path) -> Result<Vec<Process>> {
    let processes = parse_file(input)?;
    info!("loaded {} processes from {}", processes.len(), input.display());
    if processes.is_empty() {
        warn!("{} contains no processes", input.display());
    }
    Ok(processes)
}

fn invalid(errors: Vec<ValidationError>) -> anyhow::Error {
    anyhow!("invalid input:\n{}", describe(&errors))
}

fn run(common: &CommonArgs, algorithm: Algorithm, quantum: Option<i64>) -> Result<()> {
    if algorithm.needs_quantum() && quantum.is_none() {
        bail!("--quantum is required for the RR algorithm");
    }

    let processes = load(&common.input)?;
    let mut request = SimulationRequest::new(processes, algorithm)
        .with_tie_breaker(common.tie_break.into());
    if let Some(q) = quantum {
        request = request.with_quantum(q);
    }

    let result = request.run().map_err(invalid)?;
    match common.format {
        Format::Text => print!("{}", RunReport(&result)),
        Format::Json => println!(
            "{}",
            report::run_to_json(&result).context("Failed to serialize result")?
        ),
    }
    Ok(())
}

fn compare(common: &CommonArgs, quantum: i64) -> Result<()> {
    let processes = load(&common.input)?;
    let results = compare_all(&processes, quantum, common.tie_break.into()).map_err(invalid)?;

    match common.format {
        Format::Text => {
            print!("{}", ComparisonTable(&results));
            println!();
            print!("{}", BarChart::average_waiting(&results));
            println!();
            print!("{}", BarChart::average_turnaround(&results));
        }
        Format::Json => println!(
            "{}",
            report::comparison_to_json(&results).context("Failed to serialize comparison")?
        ),
    }
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    match &opts.command {
        Command::Run {
            common,
            algo,
            quantum,
        } => run(common, *algo, *quantum),
        Command::Compare { common, quantum } => compare(common, *quantum),
    }
}
