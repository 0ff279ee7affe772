//! Pathbench - Scripted Robot Path Benchmark
//!
//! This library scores a scripted sequence of move/turn commands against a 2D
//! world of circular and regular-polygon obstacles: how long the path is, how
//! close it gets to any obstacle once the robot footprint is accounted for,
//! and whether it ends in the goal. It also generates randomized obstacle
//! layouts that keep clear of the start and goal.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod config;
pub mod core;
pub mod navigation;
pub mod render;

// Re-export commonly used items for easier access
pub use crate::config::{EnvConfig, ParseReport};
pub use crate::core::{Footprint, Obstacle, RobotConfig, RobotShape};
pub use crate::navigation::{
    ClearanceResult, Goal, Instruction, MetricsReport, ObstacleSampler, PathSimulator, Pose,
    SampleOutcome, SamplerConfig, SimulatorConfig, TurnConvention,
};
pub use crate::render::{RenderSink, Viewport, WorldBounds};

/// One benchmark environment with its resolved robot envelope
pub struct Benchmark {
    env: EnvConfig,
    footprint: Footprint,
    inflation: f64,
}

impl Benchmark {
    /// Resolve the robot footprint and inflation radius for an environment
    pub fn new(env: EnvConfig) -> Self {
        let footprint = Footprint::from_config(&env.robot);
        let inflation = footprint.inflation_radius(env.robot.clearance_cm);
        log::info!(
            "Robot footprint {:?}, inflation radius {:.3} cm",
            footprint,
            inflation
        );
        Benchmark {
            env,
            footprint,
            inflation,
        }
    }

    /// Environment this benchmark was built from
    pub fn env(&self) -> &EnvConfig {
        &self.env
    }

    /// Resolved robot footprint, after any shape fallback
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Radius added to every obstacle
    pub fn inflation(&self) -> f64 {
        self.inflation
    }

    /// World rectangle covering start, goal and inflated obstacles
    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds::fit(
            &self.env.start.position(),
            &self.env.goal.position,
            &self.env.obstacles,
            self.inflation,
        )
    }

    /// Viewport fitting the world onto the configured screen
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.world_bounds(),
            self.env.screen_width,
            self.env.screen_height,
        )
    }

    /// Draw the scene into `sink`, then execute the script
    pub fn run(
        &self,
        instructions: &[Instruction],
        sample_step_cm: f64,
        sink: &mut dyn RenderSink,
    ) -> Result<ClearanceResult, BenchError> {
        let simulator = PathSimulator::new(
            &self.env.obstacles,
            self.inflation,
            self.env.goal,
            SimulatorConfig {
                sample_step_cm,
                turn_convention: self.env.turn_convention,
            },
        )?;
        simulator.check_script(instructions)?;
        render::draw_scene(sink, &self.env.obstacles, self.inflation, simulator.goal());
        Ok(simulator.run_with_sink(self.env.start, instructions, sink))
    }

    /// Obstacle sampler keeping clear of this environment's start and goal
    pub fn sampler(&self, config: SamplerConfig) -> Result<ObstacleSampler, BenchError> {
        ObstacleSampler::new(
            config,
            self.env.start.position(),
            self.env.goal.position,
            self.inflation,
        )
    }
}

/// Pathbench error types
#[derive(Debug)]
pub enum BenchError {
    /// Malformed environment line
    Config {
        /// 1-based line number
        line: usize,
        /// The offending line as written
        content: String,
        /// What was wrong with it
        reason: String,
    },
    /// Malformed instruction line
    Instruction {
        /// 1-based line number
        line: usize,
        /// The offending line as written
        content: String,
        /// What was wrong with it
        reason: String,
    },
    /// Parameter outside its valid range
    InvalidValue(String),
    /// File system error
    Io(std::io::Error),
    /// Sampler profile could not be read
    Profile(String),
    /// Metrics report could not be serialized
    Report(String),
}

impl std::fmt::Display for BenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BenchError::Config { line, content, reason } => {
                write!(f, "Environment error on line {}: {} ({})", line, reason, content.trim())
            }
            BenchError::Instruction { line, content, reason } => {
                write!(f, "Invalid instruction on line {}: {} ({})", line, reason, content.trim())
            }
            BenchError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            BenchError::Io(err) => write!(f, "I/O error: {}", err),
            BenchError::Profile(msg) => write!(f, "Profile error: {}", msg),
            BenchError::Report(msg) => write!(f, "Report error: {}", msg),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err)
    }
}

impl From<serde_yaml::Error> for BenchError {
    fn from(err: serde_yaml::Error) -> Self {
        BenchError::Profile(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Report(err.to_string())
    }
}
