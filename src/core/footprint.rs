// core/footprint.rs

// Robot footprint and the inflation model. The footprint collapses to a single
// radius so the robot can be treated as a point; every obstacle is grown by
// that radius plus the configured safety clearance.

// Dependencies
use log::warn;
use serde::{Deserialize, Serialize};

/// Width used when an invalid polygon footprint is built directly
pub const DEFAULT_ROBOT_WIDTH_CM: f64 = 20.0;
/// Height used when an invalid polygon footprint is built directly
pub const DEFAULT_ROBOT_HEIGHT_CM: f64 = 20.0;

/// Robot outline used for its collision envelope
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    /// Round robot
    Circle {
        /// Body radius, cm
        radius: f64,
    },
    /// Rectangular robot; the envelope is its half diagonal
    Rect {
        /// Side along the heading, cm
        width: f64,
        /// Side across the heading, cm
        height: f64,
    },
    /// Regular polygon robot; the envelope is its circumradius
    Polygon {
        /// Number of sides, at least 3
        faces: u32,
        /// Center to vertex distance, cm
        circumradius: f64,
    },
}

/// Footprint shape as named in the environment file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotShape {
    /// `rect`
    Rect,
    /// `circle`
    Circle,
    /// `polygon`
    Polygon,
    /// Unrecognised shape name, kept for reporting
    Other(String),
}

impl RobotShape {
    /// Maps a lowercase shape name; never fails
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rect" => RobotShape::Rect,
            "circle" => RobotShape::Circle,
            "polygon" => RobotShape::Polygon,
            other => RobotShape::Other(other.to_string()),
        }
    }
}

/// Robot fields from the environment file, all shapes side by side
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// `ROBOT_SHAPE`
    pub shape: RobotShape,
    /// `ROBOT_WIDTH_CM`
    pub width_cm: f64,
    /// `ROBOT_HEIGHT_CM`
    pub height_cm: f64,
    /// `ROBOT_RADIUS_CM`, circle robots only
    pub radius_cm: f64,
    /// `ROBOT_POLY_FACES`, polygon robots only
    pub poly_faces: u32,
    /// `ROBOT_POLY_RADIUS_CM`, polygon robots only
    pub poly_radius_cm: f64,
    /// `CLEARANCE_CM`, safety margin added on top of the footprint
    pub clearance_cm: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            shape: RobotShape::Rect,
            width_cm: DEFAULT_ROBOT_WIDTH_CM,
            height_cm: DEFAULT_ROBOT_HEIGHT_CM,
            radius_cm: 0.0,
            poly_faces: 0,
            poly_radius_cm: 0.0,
            clearance_cm: 5.0,
        }
    }
}

impl Footprint {
    /// Builds a polygon footprint, falling back to the rectangle when the
    /// polygon is unusable (fewer than 3 faces or non-positive radius)
    pub fn polygon(faces: u32, circumradius: f64, width: f64, height: f64) -> Self {
        if faces >= 3 && circumradius > 0.0 {
            Footprint::Polygon { faces, circumradius }
        } else {
            warn!(
                "Polygon footprint (faces={}, radius={}) unusable, using {}x{} rectangle",
                faces, circumradius, width, height
            );
            Footprint::Rect { width, height }
        }
    }

    /// Resolves the configured robot fields into a single footprint
    pub fn from_config(robot: &RobotConfig) -> Self {
        match &robot.shape {
            RobotShape::Circle => Footprint::Circle { radius: robot.radius_cm },
            RobotShape::Rect => Footprint::Rect {
                width: robot.width_cm,
                height: robot.height_cm,
            },
            RobotShape::Polygon => Footprint::polygon(
                robot.poly_faces,
                robot.poly_radius_cm,
                robot.width_cm,
                robot.height_cm,
            ),
            RobotShape::Other(name) => {
                warn!("Unknown robot shape '{}', using rectangle footprint", name);
                Footprint::Rect {
                    width: robot.width_cm,
                    height: robot.height_cm,
                }
            }
        }
    }

    /// Worst-case distance from the robot center to its outline
    pub fn circumradius(&self) -> f64 {
        match *self {
            Footprint::Circle { radius } => radius,
            Footprint::Rect { width, height } => 0.5 * width.hypot(height),
            Footprint::Polygon { faces, circumradius } if faces >= 3 && circumradius > 0.0 => {
                circumradius
            }
            Footprint::Polygon { .. } => {
                0.5 * DEFAULT_ROBOT_WIDTH_CM.hypot(DEFAULT_ROBOT_HEIGHT_CM)
            }
        }
    }

    /// Radius added to every obstacle so the robot reduces to a point
    pub fn inflation_radius(&self, clearance_cm: f64) -> f64 {
        self.circumradius() + clearance_cm
    }
}

/// Inflation radius straight from the configured robot fields
pub fn inflation_radius(robot: &RobotConfig) -> f64 {
    Footprint::from_config(robot).inflation_radius(robot.clearance_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_adds_clearance() {
        let fp = Footprint::Circle { radius: 10.0 };
        assert_eq!(fp.inflation_radius(5.0), 15.0);
    }

    #[test]
    fn rect_uses_half_diagonal() {
        let fp = Footprint::Rect { width: 20.0, height: 20.0 };
        let expected = 5.0 + 10.0 * std::f64::consts::SQRT_2;
        assert!((fp.inflation_radius(5.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn bad_polygon_falls_back_to_configured_rect() {
        let robot = RobotConfig {
            shape: RobotShape::Polygon,
            width_cm: 30.0,
            height_cm: 40.0,
            poly_faces: 2,
            poly_radius_cm: 12.0,
            clearance_cm: 0.0,
            ..RobotConfig::default()
        };
        assert_eq!(Footprint::from_config(&robot), Footprint::Rect { width: 30.0, height: 40.0 });
        assert!((inflation_radius(&robot) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_shape_is_rect() {
        let robot = RobotConfig {
            shape: RobotShape::from_name("Blob"),
            clearance_cm: 1.0,
            ..RobotConfig::default()
        };
        assert_eq!(robot.shape, RobotShape::Other("blob".to_string()));
        let expected = 1.0 + 10.0 * std::f64::consts::SQRT_2;
        assert!((inflation_radius(&robot) - expected).abs() < 1e-9);
    }
}
