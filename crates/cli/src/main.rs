//! Cache prefetch simulator CLI.
//!
//! This binary drives the engine as an external caller. It performs:
//! 1. **Run:** Configure from flags or a JSON file, step to completion, print a report.
//! 2. **Config:** Print the resolved configuration as JSON without running it.
//!
//! Per-step output is either a trace table (`--trace`) or one JSON document per
//! step (`--json`); `--delay-ms` paces steps for live demonstrations. A run
//! stops early once stdout is closed, e.g. when piped into `head`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use std::{process, thread};

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use prefetchsim_core::config::{AccessPattern, PrefetchType};
use prefetchsim_core::sim::CancelToken;
use prefetchsim_core::{ConfigError, Configuration, RunHandle, StepResult};

#[derive(Parser, Debug)]
#[command(
    name = "prefetchsim",
    author,
    version,
    about = "Single-level cache simulator with pluggable prefetchers",
    long_about = "Step a fully-associative LRU cache through a synthetic access stream and report hit, miss and prefetch statistics.\n\nExamples:\n  prefetchsim run --prefetch sequential --pattern sequential --steps 10 --trace\n  prefetchsim run --prefetch stride --pattern stride --stride 3 --json\n  prefetchsim run --config lesson.json\n  prefetchsim config --prefetch stream --window 4"
)]
struct Cli {
    /// Log filter (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation and print its statistics.
    Run {
        #[command(flatten)]
        source: ConfigArgs,

        /// Print one line per step.
        #[arg(long, conflicts_with = "json")]
        trace: bool,

        /// Print every step result as a JSON line.
        #[arg(long)]
        json: bool,

        /// Pause between steps, in milliseconds.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },

    /// Print the resolved configuration as JSON.
    Config {
        #[command(flatten)]
        source: ConfigArgs,
    },
}

/// Configuration sources: a JSON file, overridden field by field by flags.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cache size in bytes.
    #[arg(long)]
    cache_size: Option<u64>,

    /// Line size in bytes.
    #[arg(long)]
    line_size: Option<u64>,

    /// Prefetcher: none, sequential, stride, stream.
    #[arg(long)]
    prefetch: Option<PrefetchType>,

    /// Access pattern: sequential, random, stride, pointerChase.
    #[arg(long)]
    pattern: Option<AccessPattern>,

    /// Stride in lines.
    #[arg(long)]
    stride: Option<u64>,

    /// Stream window width.
    #[arg(long)]
    window: Option<u64>,

    /// Pointer-chase cycle length.
    #[arg(long)]
    chase_length: Option<u64>,

    /// Number of steps.
    #[arg(long)]
    steps: Option<u64>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,
}

impl ConfigArgs {
    /// Loads the file (or defaults), applies flag overrides, then validates.
    fn resolve(&self) -> Result<Configuration, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Configuration::load(path)?,
            None => Configuration::default(),
        };

        let overrides = [
            (&mut config.cache_size_bytes, self.cache_size),
            (&mut config.line_size_bytes, self.line_size),
            (&mut config.stride_distance, self.stride),
            (&mut config.stream_window_size, self.window),
            (&mut config.pointer_chase_length, self.chase_length),
            (&mut config.step_count, self.steps),
            (&mut config.seed, self.seed),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(prefetch) = self.prefetch {
            config.prefetch_type = prefetch;
        }
        if let Some(pattern) = self.pattern {
            config.access_pattern = pattern;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Run {
            source,
            trace,
            json,
            delay_ms,
        } => cmd_run(&source, trace, json, delay_ms),
        Commands::Config { source } => cmd_config(&source),
    }
}

/// Installs the stderr subscriber; `RUST_LOG` takes precedence over `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the configuration or exits with status 1.
fn resolve_or_exit(source: &ConfigArgs) -> Configuration {
    match source.resolve() {
        Ok(config) => {
            info!(
                lines = config.num_lines(),
                prefetch = %config.prefetch_type,
                pattern = %config.access_pattern,
                "configuration resolved"
            );
            config
        }
        Err(e) => {
            warn!(file = ?source.config, error = %e, "configuration rejected");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Runs every step of the configured simulation and prints the final report.
fn cmd_run(source: &ConfigArgs, trace: bool, json: bool, delay_ms: u64) {
    let config = resolve_or_exit(source);
    let mut run = RunHandle::configure(config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let cfg = run.config();
    println!(
        "[*] {} lines x {} B, prefetch={}, pattern={}, steps={}",
        cfg.num_lines(),
        cfg.line_size_bytes,
        cfg.prefetch_type,
        cfg.access_pattern,
        cfg.step_count
    );
    if trace {
        println!("{}", trace_header());
    }

    let delay = Duration::from_millis(delay_ms);
    let steps = run.config().step_count;
    let stop = CancelToken::new();
    let outcome = {
        let mut out = io::stdout().lock();
        run.run_paced(steps, &stop, |result| {
            let line = if json {
                json_line(result)
                    .map_err(|e| warn!(step = result.step_index, error = %e, "cannot encode step"))
                    .ok()
            } else if trace {
                Some(trace_row(result))
            } else {
                None
            };
            if let Some(line) = line {
                if !emit(&mut out, &line, &stop) {
                    return;
                }
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        })
    };

    if outcome.cancelled {
        info!(steps = outcome.steps, "run stopped early");
        return;
    }
    println!();
    println!("[*] {} steps", outcome.steps);
    println!("{}", run.statistics());
}

/// Column headings of the per-step trace table.
fn trace_header() -> String {
    format!("{:>6}  {:>10}  {:>8}  {:<14}  prefetched", "step", "address", "block", "result")
}

/// One row of the per-step trace table.
fn trace_row(result: &StepResult) -> String {
    let verdict = match (result.hit, result.was_prefetched) {
        (true, true) => "HIT (prefetch)",
        (true, false) => "HIT",
        (false, _) => "MISS",
    };
    let fills = result
        .prefetched_blocks
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{:>6}  {:>#10x}  {:>8}  {:<14}  {}",
        result.step_index, result.generated_address, result.block, verdict, fills
    )
}

/// Writes one output line, raising `stop` if the reader has gone away.
fn emit(out: &mut impl Write, line: &str, stop: &CancelToken) -> bool {
    match writeln!(out, "{line}") {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "stdout closed, stopping run");
            stop.cancel();
            false
        }
    }
}

/// One step result as a single-line JSON document.
fn json_line(result: &StepResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Prints the resolved configuration.
fn cmd_config(source: &ConfigArgs) {
    let config = resolve_or_exit(source);
    match serde_json::to_string_pretty(&config) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
