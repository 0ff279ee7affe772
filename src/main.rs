// src/main.rs
// Entry point for Pathbench: runs an instruction script against an
// environment, or generates a random obstacle layout into one.

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use pathbench::config::{load_instructions, write_obstacles};
use pathbench::render::LogSink;
use pathbench::{Benchmark, EnvConfig, SamplerConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Scripted robot path benchmark
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute an instruction script and write path metrics
    Run(RunArgs),
    /// Randomize the obstacles of an environment file
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Environment file
    #[arg(long, default_value = "environment.txt")]
    env: PathBuf,

    /// Instruction script
    #[arg(long, default_value = "instructions.txt")]
    instructions: PathBuf,

    /// Where to save the metrics JSON
    #[arg(long, default_value = "metrics.json")]
    metrics_out: PathBuf,

    /// Spacing between clearance samples, cm
    #[arg(long, default_value_t = pathbench::navigation::DEFAULT_SAMPLE_STEP_CM)]
    step: f64,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Environment file to read start, goal and robot from
    #[arg(long, default_value = "environment.txt")]
    env: PathBuf,

    /// Write to another file instead of rewriting the environment in place
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for reproducible layouts
    #[arg(long)]
    seed: Option<u64>,

    /// YAML sampler profile; flags below override it
    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long)]
    count_min: Option<u32>,

    #[arg(long)]
    count_max: Option<u32>,

    /// Probability an obstacle is a circle (else polygon)
    #[arg(long)]
    circle_prob: Option<f64>,

    #[arg(long)]
    faces_min: Option<u32>,

    #[arg(long)]
    faces_max: Option<u32>,

    #[arg(long)]
    radius_min: Option<f64>,

    #[arg(long)]
    radius_max: Option<f64>,

    /// Allow random rotation for polygons
    #[arg(long)]
    rotation: bool,

    /// Keep obstacles from overlapping
    #[arg(long)]
    nonoverlap: bool,

    #[arg(long)]
    tries_per_obstacle: Option<u32>,

    /// Padding (cm) around the start/goal bounding box for placement
    #[arg(long)]
    pad: Option<f64>,

    /// Start/goal keepout multiplier on robot inflation
    #[arg(long)]
    keepout_scale: Option<f64>,
}

impl GenerateArgs {
    /// Profile (or defaults) with command line overrides applied
    fn sampler_config(&self) -> Result<SamplerConfig, Box<dyn Error>> {
        let mut config = match &self.profile {
            Some(path) => SamplerConfig::load(path)?,
            None => SamplerConfig::default(),
        };

        if let Some(v) = self.count_min {
            config.count_min = v;
        }
        if let Some(v) = self.count_max {
            config.count_max = v;
        }
        if let Some(v) = self.circle_prob {
            config.circle_prob = v;
        }
        if let Some(v) = self.faces_min {
            config.faces_min = v;
        }
        if let Some(v) = self.faces_max {
            config.faces_max = v;
        }
        if let Some(v) = self.radius_min {
            config.radius_min = v;
        }
        if let Some(v) = self.radius_max {
            config.radius_max = v;
        }
        if let Some(v) = self.tries_per_obstacle {
            config.tries_per_obstacle = v;
        }
        if let Some(v) = self.pad {
            config.pad = v;
        }
        if let Some(v) = self.keepout_scale {
            config.keepout_scale = v;
        }
        config.rotation |= self.rotation;
        config.non_overlap |= self.nonoverlap;

        Ok(config)
    }
}

fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let (env, report) = EnvConfig::load(&args.env)?;
    if !report.unknown.is_empty() {
        info!("Ignored {} unknown keys", report.unknown.len());
    }
    let instructions = load_instructions(&args.instructions)?;
    let convention = env.turn_convention;

    let bench = Benchmark::new(env);
    let mut sink = LogSink::new(bench.viewport());
    let result = bench.run(&instructions, args.step, &mut sink)?;

    let metrics = serde_json::to_string_pretty(&result.report(convention))?;
    fs::write(&args.metrics_out, &metrics)?;
    info!("Metrics written to {}", args.metrics_out.display());
    println!("{}", metrics);
    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let (env, _) = EnvConfig::load_with_base(&args.env, EnvConfig::generator_default())?;
    let bench = Benchmark::new(env);
    let sampler = bench.sampler(args.sampler_config()?)?;

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let outcome = sampler.generate(&mut rng);

    let written = write_obstacles(&args.env, &outcome.obstacles, args.out.as_deref())?;
    match &written.backup {
        Some(backup) => println!(
            "Updated: {} (backup at {})",
            written.written.display(),
            backup.display()
        ),
        None => println!("Wrote: {}", written.written.display()),
    }
    println!("Placed {} obstacles.", outcome.obstacles.len());
    Ok(())
}

/// Main function: parses the command line and dispatches.
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging; verbosity via RUST_LOG
    env_logger::init();

    let cli = Cli::parse();
    let outcome = match &cli.command {
        Command::Run(args) => run(args),
        Command::Generate(args) => generate(args),
    };

    if let Err(e) = &outcome {
        error!("{}", e);
    }
    outcome
}
