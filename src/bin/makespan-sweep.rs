//! makespan-sweep: runs a slice-size sweep and prints averaged job makespans.
//!
//! Settings come from an optional JSON config (`--config`), then individual
//! flags override it. Results go to stdout (or `--output`) as `;`-delimited
//! rows; progress is logged to stderr, filtered by `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use u_makespan::config::ExperimentConfig;
use u_makespan::dispatching::{DispatchStrategy, ProcessorOrder, TaskOrder};
use u_makespan::report::{write_event_log, write_sweep};
use u_makespan::sweep::{run_sweep, SweepPlan};
use u_makespan::workload::MatrixWorkload;

/// Simulates block matrix-multiplication workloads on heterogeneous processors.
#[derive(Parser, Debug)]
#[command(name = "makespan-sweep", version, about)]
struct Cli {
    /// Path to a JSON experiment config.
    #[arg(long, env = "MAKESPAN_CONFIG")]
    config: Option<PathBuf>,

    /// Matrix dimension.
    #[arg(long)]
    problem_size: Option<usize>,

    /// Slice sizes; two or more are compared pairwise.
    #[arg(long, value_delimiter = ',')]
    slices: Vec<usize>,

    /// Rate of a processor with multiplier 1.
    #[arg(long)]
    nominal_rate: Option<f64>,

    /// Per-processor rate multipliers.
    #[arg(long, value_delimiter = ',')]
    multipliers: Vec<f64>,

    /// Task order (smallest_first, largest_first).
    #[arg(long)]
    task_order: Option<TaskOrder>,

    /// Processor order (slowest_first, fastest_first).
    #[arg(long)]
    processor_order: Option<ProcessorOrder>,

    /// Dispatch strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Tick period; required by the ticker strategy.
    #[arg(long, required_if_eq("strategy", "ticker"))]
    tick_period: Option<f64>,

    /// Transfer bandwidth in elements per unit time.
    #[arg(long, default_value_t = 1.0)]
    bandwidth: f64,

    /// Fixed connection setup time per transfer.
    #[arg(long, default_value_t = 0.0)]
    connection_setup: f64,

    /// Runs per grid point.
    #[arg(long, env = "MAKESPAN_REPETITIONS")]
    repetitions: Option<usize>,

    /// Shuffle tasks before sorting, seeding every run from this value.
    #[arg(long, env = "MAKESPAN_SEED")]
    seed: Option<u64>,

    /// Write sweep results here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the completion log of the first grid point here.
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyKind {
    Immediate,
    Ticker,
    Transfer,
}

impl Cli {
    fn strategy(&self) -> Option<DispatchStrategy> {
        self.strategy.map(|kind| match kind {
            StrategyKind::Immediate => DispatchStrategy::Immediate,
            StrategyKind::Ticker => DispatchStrategy::Ticker {
                tick_period: self.tick_period.unwrap_or_default(),
            },
            StrategyKind::Transfer => DispatchStrategy::TransferAugmented {
                bandwidth: self.bandwidth,
                connection_setup: self.connection_setup,
            },
        })
    }

    /// Config file (or defaults) with command-line overrides applied.
    fn experiment(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(size) = self.problem_size {
            config.problem_size = size;
        }
        match self.slices.len() {
            0 => {}
            1 => config.grid = vec![self.slices.clone()],
            _ => config.grid = SweepPlan::pairwise(config.problem_size, &self.slices).grid,
        }
        if let Some(rate) = self.nominal_rate {
            config.nominal_rate = rate;
        }
        if !self.multipliers.is_empty() {
            config.multipliers = self.multipliers.clone();
        }
        if let Some(order) = self.task_order {
            config.task_order = order;
        }
        if let Some(order) = self.processor_order {
            config.processor_order = order;
        }
        if let Some(strategy) = self.strategy() {
            config.strategy = strategy;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(seed) = self.seed {
            config.shuffle = true;
            config.base_seed = seed;
        }
        if self.events.is_some() {
            config.log_events = true;
        }

        config.validate().context("invalid experiment")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.experiment()?;
    let processors = config.processors();
    let plan = config.sweep_plan();

    let points = run_sweep(&plan, &processors, &config.simulator()).context("sweep failed")?;
    match &cli.output {
        Some(path) => write_to_file(path, |out| write_sweep(out, &points))?,
        None => write_sweep(&mut io::stdout().lock(), &points).context("failed to write results")?,
    }

    if config.log_events {
        let path = cli
            .events
            .clone()
            .unwrap_or_else(|| PathBuf::from("events.log"));
        let slices = &plan.grid[0];
        let tasks = MatrixWorkload::new(config.problem_size).create_tasks(slices)?;
        let outcome = config
            .simulator()
            .with_job_count(slices.len())
            .with_shuffle_seed(plan.seed_for(0, 0))
            .with_event_log(true)
            .run(&processors, tasks)?;
        if let Some(log) = &outcome.log {
            write_to_file(&path, |out| write_event_log(out, log))?;
            info!(events = log.len(), path = %path.display(), "wrote completion log");
        }
    }

    Ok(())
}

fn write_to_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()?;
    Ok(())
}
