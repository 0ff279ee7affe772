//! Navigation evaluation for Pathbench
//!
//! This module scores scripted robot paths against an obstacle set and
//! generates randomized obstacle layouts to score them in.

/// Signed clearance to inflated obstacles
pub mod clearance;
/// Randomized obstacle layouts
pub mod sampler;
/// Scripted path execution and metrics
pub mod simulator;

pub use clearance::{min_clearance, obstacle_clearance};
pub use sampler::{
    ObstacleSampler, PlacementArea, SampleOutcome, SamplerConfig, MAX_OBSTACLE_COUNT,
    MAX_POLYGON_FACES,
};
pub use simulator::{
    ClearanceResult, Goal, Instruction, MetricsReport, PathSimulator, Pose, SimulatorConfig,
    TurnConvention, DEFAULT_SAMPLE_STEP_CM, MAX_SUBSTEPS_PER_MOVE,
};
