// src/navigation/sampler.rs
// Randomized obstacle layouts. Obstacles are placed by rejection sampling in
// the padded bounding box of start and goal, keeping clear of both and,
// optionally, of each other. The random generator is always supplied by the
// caller so a seeded run is reproducible.

use crate::core::{distance, Obstacle};
use crate::BenchError;
use log::{debug, info, warn};
use nalgebra::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Largest obstacle count a layout may request
pub const MAX_OBSTACLE_COUNT: u32 = 10_000;

/// Largest polygon face count the sampler draws
pub const MAX_POLYGON_FACES: u32 = 1_024;

/// Obstacle generation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Fewest obstacles per layout
    pub count_min: u32,
    /// Most obstacles per layout
    pub count_max: u32,
    /// Probability that an obstacle is a circle rather than a polygon
    pub circle_prob: f64,
    /// Fewest polygon faces, clamped to 3
    pub faces_min: u32,
    /// Most polygon faces
    pub faces_max: u32,
    /// Smallest radius or circumradius, cm
    pub radius_min: f64,
    /// Largest radius or circumradius, cm
    pub radius_max: f64,
    /// Draw a random polygon rotation in [0, 360)
    pub rotation: bool,
    /// Keep obstacle discs (grown by the robot inflation) apart
    pub non_overlap: bool,
    /// Placement attempts before an obstacle is dropped
    pub tries_per_obstacle: u32,
    /// Padding around the start/goal bounding box, cm
    pub pad: f64,
    /// Multiplier on the robot inflation radius for the start/goal keepout
    pub keepout_scale: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            count_min: 1,
            count_max: 5,
            circle_prob: 0.5,
            faces_min: 3,
            faces_max: 8,
            radius_min: 30.0,
            radius_max: 120.0,
            rotation: false,
            non_overlap: false,
            tries_per_obstacle: 200,
            pad: 50.0,
            keepout_scale: 1.5,
        }
    }
}

impl SamplerConfig {
    /// Loads a sampler profile from YAML; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let file = File::open(path)?;
        let config: SamplerConfig = serde_yaml::from_reader(file)?;
        info!("Loaded sampler profile from {}", path.display());
        Ok(config)
    }

    /// Rejects parameter combinations the sampler cannot draw from
    pub fn validate(&self) -> Result<(), BenchError> {
        let invalid = |msg: String| Err(BenchError::InvalidValue(msg));

        if self.count_min > self.count_max {
            return invalid(format!(
                "count range is empty: {}..{}",
                self.count_min, self.count_max
            ));
        }
        if self.count_max > MAX_OBSTACLE_COUNT {
            return invalid(format!(
                "count_max {} exceeds the limit of {}",
                self.count_max, MAX_OBSTACLE_COUNT
            ));
        }
        if self.faces_max > MAX_POLYGON_FACES {
            return invalid(format!(
                "faces_max {} exceeds the limit of {}",
                self.faces_max, MAX_POLYGON_FACES
            ));
        }
        if !(0.0..=1.0).contains(&self.circle_prob) {
            return invalid(format!("circle probability {} outside [0, 1]", self.circle_prob));
        }
        if !(self.radius_min.is_finite() && self.radius_max.is_finite())
            || self.radius_min <= 0.0
            || self.radius_min > self.radius_max
        {
            return invalid(format!(
                "radius range must be positive and ordered: {}..{}",
                self.radius_min, self.radius_max
            ));
        }
        if self.tries_per_obstacle == 0 {
            return invalid("tries per obstacle must be at least 1".to_string());
        }
        if !self.pad.is_finite() || self.pad < 0.0 {
            return invalid(format!("pad must be non-negative, got {}", self.pad));
        }
        if !self.keepout_scale.is_finite() || self.keepout_scale < 0.0 {
            return invalid(format!(
                "keepout scale must be non-negative, got {}",
                self.keepout_scale
            ));
        }
        Ok(())
    }

    /// Inclusive face range, clamped so polygons always have 3+ faces
    fn face_range(&self) -> (u32, u32) {
        let lo = self.faces_min.max(3);
        let hi = self.faces_max.max(lo);
        (lo, hi)
    }
}

/// Accepted placement, kept for overlap tests against later obstacles
struct PlacementRecord {
    center: Point2<f64>,
    effective_radius: f64,
}

/// Axis aligned placement area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementArea {
    /// Lower-left corner
    pub min: Point2<f64>,
    /// Upper-right corner
    pub max: Point2<f64>,
}

impl PlacementArea {
    /// Bounding box of start and goal grown by `pad` on every side
    pub fn around(start: &Point2<f64>, goal: &Point2<f64>, pad: f64) -> Self {
        PlacementArea {
            min: Point2::new(start.x.min(goal.x) - pad, start.y.min(goal.y) - pad),
            max: Point2::new(start.x.max(goal.x) + pad, start.y.max(goal.y) + pad),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point2<f64> {
        Point2::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

/// Shape and size drawn for one obstacle before it gets a position
enum Draft {
    Circle { radius: f64 },
    Polygon { circumradius: f64, faces: u32, rotation_deg: f64 },
}

impl Draft {
    fn effective_radius(&self) -> f64 {
        match *self {
            Draft::Circle { radius } => radius,
            Draft::Polygon { circumradius, .. } => circumradius,
        }
    }

    fn place(&self, center: Point2<f64>) -> Obstacle {
        match *self {
            Draft::Circle { radius } => Obstacle::Circle { center, radius },
            Draft::Polygon {
                circumradius,
                faces,
                rotation_deg,
            } => Obstacle::Polygon {
                center,
                circumradius,
                faces,
                rotation_deg,
            },
        }
    }
}

/// Result of one generation run
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOutcome {
    /// Obstacle count drawn from the configured range
    pub requested: usize,
    /// Obstacles actually placed, in placement order
    pub obstacles: Vec<Obstacle>,
}

impl SampleOutcome {
    /// Number of obstacles that ran out of retries
    pub fn dropped(&self) -> usize {
        self.requested - self.obstacles.len()
    }
}

/// Rejection sampler for obstacle layouts
pub struct ObstacleSampler {
    config: SamplerConfig,
    start: Point2<f64>,
    goal: Point2<f64>,
    inflation: f64,
}

impl ObstacleSampler {
    /// Creates a sampler for the given start/goal and robot inflation radius
    pub fn new(
        config: SamplerConfig,
        start: Point2<f64>,
        goal: Point2<f64>,
        inflation: f64,
    ) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(ObstacleSampler {
            config,
            start,
            goal,
            inflation,
        })
    }

    /// Validated generation parameters
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Area candidate centers are drawn from
    pub fn placement_area(&self) -> PlacementArea {
        PlacementArea::around(&self.start, &self.goal, self.config.pad)
    }

    /// Keepout disc radius around start and goal
    pub fn keepout_radius(&self) -> f64 {
        self.inflation * self.config.keepout_scale
    }

    /// Draws a full layout. Obstacles that cannot be placed within the retry
    /// budget are left out; compare `requested` with the obstacle count.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleOutcome {
        let requested = rng.gen_range(self.config.count_min..=self.config.count_max) as usize;
        let area = self.placement_area();
        let keepout = self.keepout_radius();

        let mut placed: Vec<PlacementRecord> = Vec::new();
        let mut obstacles = Vec::new();

        for index in 0..requested {
            let draft = self.draft(rng);
            let radius = draft.effective_radius();

            let mut accepted = None;
            for attempt in 0..self.config.tries_per_obstacle {
                let center = area.sample(rng);
                if self.violates_keepout(&center, radius, keepout) {
                    continue;
                }
                if self.config.non_overlap && self.overlaps(&center, radius, &placed) {
                    continue;
                }
                debug!(
                    "Obstacle {} placed at ({:.2}, {:.2}) after {} attempts",
                    index,
                    center.x,
                    center.y,
                    attempt + 1
                );
                accepted = Some(center);
                break;
            }

            match accepted {
                Some(center) => {
                    obstacles.push(draft.place(center));
                    placed.push(PlacementRecord {
                        center,
                        effective_radius: radius,
                    });
                }
                None => debug!(
                    "Obstacle {} dropped after {} attempts",
                    index, self.config.tries_per_obstacle
                ),
            }
        }

        let outcome = SampleOutcome {
            requested,
            obstacles,
        };
        if outcome.dropped() > 0 {
            warn!(
                "Placed {} of {} obstacles; {} ran out of retries",
                outcome.obstacles.len(),
                requested,
                outcome.dropped()
            );
        } else {
            info!("Placed {} obstacles", requested);
        }
        outcome
    }

    /// Shape, size, face count and rotation for the next obstacle
    fn draft<R: Rng + ?Sized>(&self, rng: &mut R) -> Draft {
        let is_circle = rng.gen_bool(self.config.circle_prob);
        let size = rng.gen_range(self.config.radius_min..=self.config.radius_max);
        if is_circle {
            return Draft::Circle { radius: size };
        }

        let (faces_lo, faces_hi) = self.config.face_range();
        let faces = rng.gen_range(faces_lo..=faces_hi);
        let rotation_deg = if self.config.rotation {
            rng.gen_range(0.0..360.0)
        } else {
            0.0
        };
        Draft::Polygon {
            circumradius: size,
            faces,
            rotation_deg,
        }
    }

    /// True when the candidate disc touches the start or goal keepout
    fn violates_keepout(&self, center: &Point2<f64>, radius: f64, keepout: f64) -> bool {
        distance(center, &self.start) <= radius + keepout
            || distance(center, &self.goal) <= radius + keepout
    }

    /// True when the candidate disc comes closer than the robot inflation to
    /// any accepted obstacle
    fn overlaps(&self, center: &Point2<f64>, radius: f64, placed: &[PlacementRecord]) -> bool {
        placed.iter().any(|record| {
            distance(center, &record.center) < radius + record.effective_radius + self.inflation
        })
    }
}
