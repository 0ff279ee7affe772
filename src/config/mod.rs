//! Text inputs of a benchmark run
//!
//! The environment file and the instruction script. Both are line based and
//! report failures with their line number.

/// Environment file parsing and obstacle merge-back
pub mod environment;
/// Instruction script parsing
pub mod instructions;

pub use environment::{
    merge_obstacle_block, write_obstacles, EnvConfig, ParseReport, WriteOutcome,
    GENERATOR_GOAL_X_CM, OBSTACLE_BLOCK_HEADER,
};
pub use instructions::{load_instructions, parse_instructions, MAX_MOVE_CM};
