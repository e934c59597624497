use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

use lv_sim::{run_simulation, Settings, SimError};
use lv_tune::{autotune, TuneError};

#[derive(Parser)]
#[command(name = "lv-cli")]
#[command(about = "Liquid-level PID simulation and autotuning tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and export the per-tick series as CSV
    Run {
        #[command(flatten)]
        opts: SettingsArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search PID gains with the autotuner
    Tune {
        #[command(flatten)]
        opts: SettingsArgs,
        /// Export the per-generation trace as CSV to this path
        #[arg(long)]
        trace_output: Option<PathBuf>,
    },
}

/// Settings sources, lowest precedence first: defaults, YAML file, flags.
#[derive(Args)]
struct SettingsArgs {
    /// Path to a settings YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Proportional gain
    #[arg(long)]
    p: Option<f64>,
    /// Integral gain
    #[arg(long)]
    i: Option<f64>,
    /// Derivative gain
    #[arg(long)]
    d: Option<f64>,
    /// Target tank level
    #[arg(long)]
    setpoint: Option<f64>,
    /// Tick count per run
    #[arg(long)]
    length: Option<usize>,
    /// Step the setpoint at 1/3 and 2/3 of the run
    #[arg(long)]
    variable_setpoint: Option<bool>,
    /// Use the stochastic drain model
    #[arg(long)]
    variable_drain: Option<bool>,
    /// Use the reproducible seeded generator
    #[arg(long)]
    use_prng: Option<bool>,
    /// Seed for the reproducible generator
    #[arg(long)]
    seed: Option<u32>,
    /// Pump per-tick speed-change cap
    #[arg(long)]
    acceleration: Option<f64>,
    /// Measurement delay in ticks
    #[arg(long)]
    process_delay: Option<usize>,
    /// Autotuner generation count
    #[arg(long)]
    generations: Option<usize>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error(transparent)]
    Tune(#[from] TuneError),
}

type CliResult<T> = Result<T, CliError>;

impl SettingsArgs {
    fn resolve(&self) -> CliResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            None => Settings::default(),
        };
        if let Some(v) = self.p {
            settings.p = v;
        }
        if let Some(v) = self.i {
            settings.i = v;
        }
        if let Some(v) = self.d {
            settings.d = v;
        }
        if let Some(v) = self.setpoint {
            settings.setpoint = v;
        }
        if let Some(v) = self.length {
            settings.simulation_length = v;
        }
        if let Some(v) = self.variable_setpoint {
            settings.variable_setpoint = v;
        }
        if let Some(v) = self.variable_drain {
            settings.variable_drain = v;
        }
        if let Some(v) = self.use_prng {
            settings.use_prng = v;
        }
        if let Some(v) = self.seed {
            settings.seed = v;
        }
        if let Some(v) = self.acceleration {
            settings.acceleration = v;
        }
        if let Some(v) = self.process_delay {
            settings.process_delay = v;
        }
        if let Some(v) = self.generations {
            settings.at_generations = v;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { opts, output } => cmd_run(&opts, output.as_deref()),
        Commands::Tune { opts, trace_output } => cmd_tune(&opts, trace_output.as_deref()),
    }
}

fn cmd_run(opts: &SettingsArgs, output: Option<&Path>) -> CliResult<()> {
    let settings = opts.resolve()?;
    let start = Instant::now();
    let series = run_simulation(&settings);
    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "run finished");

    let mut csv = String::from("tick,drain,level,pump_speed,setpoint,integral\n");
    for t in 0..series.len() {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            t,
            series.drain[t],
            series.level[t],
            series.pump_speed[t],
            series.setpoint[t],
            series.integral[t]
        ));
    }
    write_csv(&csv, series.len(), output)
}

fn cmd_tune(opts: &SettingsArgs, trace_output: Option<&Path>) -> CliResult<()> {
    let settings = opts.resolve()?;
    let start = Instant::now();
    let outcome = autotune(&settings)?;

    println!(
        "Tuned in {:.1}s over {} generations",
        start.elapsed().as_secs_f64(),
        outcome.trace.len()
    );
    println!(
        "P: {} I: {} D: {} (score {})",
        outcome.gains.p, outcome.gains.i, outcome.gains.d, outcome.best_score
    );

    if trace_output.is_some() {
        let mut csv = String::from("generation,best_score_ever,best_score,p,i,d\n");
        for (idx, rec) in outcome.trace.iter().enumerate() {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                idx,
                rec.best_score_ever,
                rec.best_score,
                rec.gains.p,
                rec.gains.i,
                rec.gains.d
            ));
        }
        write_csv(&csv, outcome.trace.len(), trace_output)?;
    }
    Ok(())
}

fn write_csv(csv: &str, rows: usize, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{csv}");
    }
    Ok(())
}
