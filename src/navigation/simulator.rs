// src/navigation/simulator.rs
// Executes a scripted move/turn sequence from a start pose and measures the
// resulting path: length, minimum clearance, collision samples, goal arrival.

use super::clearance::min_clearance;
use crate::core::{distance, Obstacle};
use crate::render::{NullSink, RenderSink};
use crate::BenchError;
use log::{debug, info};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default spacing between clearance samples along a move
pub const DEFAULT_SAMPLE_STEP_CM: f64 = 2.0;

/// Upper bound on clearance samples taken along a single move
pub const MAX_SUBSTEPS_PER_MOVE: u64 = 1_000_000;

/// Robot pose; heading in degrees counter-clockwise from +x, kept in [0, 360)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// x, cm
    pub x: f64,
    /// y, cm
    pub y: f64,
    /// Heading, degrees
    pub heading_deg: f64,
}

impl Pose {
    /// Pose with the heading wrapped into [0, 360)
    pub fn new(x: f64, y: f64, heading_deg: f64) -> Self {
        Pose {
            x,
            y,
            heading_deg: wrap_degrees(heading_deg),
        }
    }

    /// Position without the heading
    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Moves along the current heading; negative lengths move backward
    fn advance(&mut self, length: f64) {
        let heading = self.heading_deg.to_radians();
        let next = self.position() + Vector2::new(heading.cos(), heading.sin()) * length;
        self.x = next.x;
        self.y = next.y;
    }

    /// Rotates counter-clockwise by `delta_deg`
    fn rotate(&mut self, delta_deg: f64) {
        self.heading_deg = wrap_degrees(self.heading_deg + delta_deg);
    }
}

fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// One scripted command
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Signed distance in cm; negative drives backward
    Move(f64),
    /// Signed angle in degrees, interpreted through the turn convention
    Turn(f64),
}

/// Which rotation a positive turn angle means
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnConvention {
    /// Positive angles turn clockwise
    #[default]
    RightPositive,
    /// Positive angles turn counter-clockwise
    LeftPositive,
}

impl TurnConvention {
    /// Counter-clockwise rotation in degrees for a scripted turn
    pub fn to_ccw(self, angle_deg: f64) -> f64 {
        match self {
            TurnConvention::RightPositive => -angle_deg,
            TurnConvention::LeftPositive => angle_deg,
        }
    }
}

impl FromStr for TurnConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "right_positive" => Ok(TurnConvention::RightPositive),
            "left_positive" => Ok(TurnConvention::LeftPositive),
            other => Err(format!(
                "turn convention must be right_positive or left_positive, got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for TurnConvention {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TurnConvention::RightPositive => write!(f, "right_positive"),
            TurnConvention::LeftPositive => write!(f, "left_positive"),
        }
    }
}

/// Goal disc the robot has to finish in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    /// Goal center
    pub position: Point2<f64>,
    /// Arrival tolerance
    pub radius_cm: f64,
}

impl Goal {
    /// True when `point` lies in the goal disc, boundary included
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        distance(point, &self.position) <= self.radius_cm
    }
}

/// Simulator tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatorConfig {
    /// Target spacing between clearance samples
    pub sample_step_cm: f64,
    /// Meaning of a positive turn angle
    pub turn_convention: TurnConvention,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            sample_step_cm: DEFAULT_SAMPLE_STEP_CM,
            turn_convention: TurnConvention::default(),
        }
    }
}

/// Outcome of one scripted run
#[derive(Clone, Debug, PartialEq)]
pub struct ClearanceResult {
    /// Sum of absolute move distances, cm
    pub total_path_length: f64,
    /// Pose after the last instruction
    pub final_pose: Pose,
    /// Whether the final position is inside the goal disc
    pub reached_goal: bool,
    /// Absent when no finite clearance was ever sampled
    pub min_clearance: Option<f64>,
    /// Samples with negative clearance
    pub collision_sample_count: usize,
}

/// Display form of a [`ClearanceResult`], distances rounded to 3 decimals
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Path length, cm
    pub total_path_length_cm: f64,
    /// Final x, cm
    pub final_x: f64,
    /// Final y, cm
    pub final_y: f64,
    /// Final heading, degrees
    pub final_heading_deg: f64,
    /// Goal arrival
    pub reached_goal: bool,
    /// Minimum clearance, `null` when nothing was sampled near an obstacle
    pub min_clearance_cm: Option<f64>,
    /// Samples with negative clearance
    pub collision_samples: usize,
    /// Convention the script was interpreted with
    pub turn_convention: TurnConvention,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl ClearanceResult {
    /// Display form with distances and heading rounded to 3 decimals
    pub fn report(&self, turn_convention: TurnConvention) -> MetricsReport {
        MetricsReport {
            total_path_length_cm: round3(self.total_path_length),
            final_x: round3(self.final_pose.x),
            final_y: round3(self.final_pose.y),
            final_heading_deg: round3(self.final_pose.heading_deg),
            reached_goal: self.reached_goal,
            min_clearance_cm: self.min_clearance.map(round3),
            collision_samples: self.collision_sample_count,
            turn_convention,
        }
    }
}

/// Running totals while a script executes
struct Accumulator {
    total_path_length: f64,
    min_clearance: f64,
    collision_sample_count: usize,
}

/// Path simulator over a fixed obstacle set
pub struct PathSimulator<'a> {
    obstacles: &'a [Obstacle],
    inflation: f64,
    goal: Goal,
    config: SimulatorConfig,
}

impl<'a> PathSimulator<'a> {
    /// Create a simulator; the sample step must be a positive finite length
    pub fn new(
        obstacles: &'a [Obstacle],
        inflation: f64,
        goal: Goal,
        config: SimulatorConfig,
    ) -> Result<Self, BenchError> {
        if !(config.sample_step_cm.is_finite() && config.sample_step_cm > 0.0) {
            return Err(BenchError::InvalidValue(format!(
                "sample step must be positive, got {}",
                config.sample_step_cm
            )));
        }
        Ok(PathSimulator {
            obstacles,
            inflation,
            goal,
            config,
        })
    }

    /// Goal the run is judged against
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Number of equal sub-steps a move of `dist` cm is split into
    pub fn substep_count(&self, dist: f64) -> u64 {
        ((dist.abs() / self.config.sample_step_cm).round() as u64).max(1)
    }

    /// Rejects scripts containing a move that needs more than
    /// [`MAX_SUBSTEPS_PER_MOVE`] samples at the configured step
    pub fn check_script(&self, instructions: &[Instruction]) -> Result<(), BenchError> {
        for (index, instruction) in instructions.iter().enumerate() {
            if let Instruction::Move(dist) = *instruction {
                let steps = self.substep_count(dist);
                if steps > MAX_SUBSTEPS_PER_MOVE {
                    return Err(BenchError::InvalidValue(format!(
                        "instruction {} moves {} cm, {} samples at {} cm exceeds the limit of {}",
                        index + 1,
                        dist,
                        steps,
                        self.config.sample_step_cm,
                        MAX_SUBSTEPS_PER_MOVE
                    )));
                }
            }
        }
        Ok(())
    }

    /// Run the script without rendering
    pub fn run(&self, start: Pose, instructions: &[Instruction]) -> ClearanceResult {
        self.run_with_sink(start, instructions, &mut NullSink)
    }

    /// Run the script, reporting every sampled sub-step to `sink`
    pub fn run_with_sink(
        &self,
        start: Pose,
        instructions: &[Instruction],
        sink: &mut dyn RenderSink,
    ) -> ClearanceResult {
        info!(
            "Running {} instructions from ({:.2}, {:.2}) heading {:.2}",
            instructions.len(),
            start.x,
            start.y,
            start.heading_deg
        );

        let mut pose = start;
        let mut acc = Accumulator {
            total_path_length: 0.0,
            min_clearance: f64::INFINITY,
            collision_sample_count: 0,
        };

        for instruction in instructions {
            match *instruction {
                Instruction::Turn(angle) => pose.rotate(self.config.turn_convention.to_ccw(angle)),
                Instruction::Move(dist) => self.sample_move(&mut pose, dist, &mut acc, sink),
            }
        }

        let reached_goal = self.goal.contains(&pose.position());
        let min_clearance = acc.min_clearance.is_finite().then_some(acc.min_clearance);

        info!(
            "Run finished at ({:.2}, {:.2}), length {:.2}, goal reached: {}, collision samples: {}",
            pose.x, pose.y, acc.total_path_length, reached_goal, acc.collision_sample_count
        );

        ClearanceResult {
            total_path_length: acc.total_path_length,
            final_pose: pose,
            reached_goal,
            min_clearance,
            collision_sample_count: acc.collision_sample_count,
        }
    }

    /// Splits a move into equal sub-steps and samples clearance after each one
    fn sample_move(
        &self,
        pose: &mut Pose,
        dist: f64,
        acc: &mut Accumulator,
        sink: &mut dyn RenderSink,
    ) {
        let steps = self.substep_count(dist);
        let step_length = dist / steps as f64;

        for _ in 0..steps {
            let from = pose.position();
            pose.advance(step_length);
            let to = pose.position();
            acc.total_path_length += step_length.abs();

            let clearance = min_clearance(&to, self.obstacles, self.inflation);
            acc.min_clearance = acc.min_clearance.min(clearance);
            if clearance < 0.0 {
                acc.collision_sample_count += 1;
                debug!("Collision sample at ({:.2}, {:.2}): clearance {:.3}", to.x, to.y, clearance);
            }
            sink.draw_path_segment(from, to, clearance);
        }
    }
}
