// core/obstacle.rs

// Static obstacles: circles and regular polygons. Obstacles never change once
// parsed or generated. This module also owns their one-line text form,
// `circle:cx,cy,r` and `polygon:cx,cy,R,faces,rot_deg`.

// Dependencies
use nalgebra::Point2;
use std::fmt;
use std::str::FromStr;

/// Circular or regular-polygon obstacle, all lengths in cm
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle {
    /// Disc
    Circle {
        /// Disc center
        center: Point2<f64>,
        /// Disc radius
        radius: f64,
    },
    /// Convex regular polygon
    Polygon {
        /// Polygon center
        center: Point2<f64>,
        /// Center to vertex distance
        circumradius: f64,
        /// Number of sides, at least 3
        faces: u32,
        /// Angle of the first vertex, degrees counter-clockwise from +x
        rotation_deg: f64,
    },
}

impl Obstacle {
    /// Circle centered at (`cx`, `cy`)
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Obstacle::Circle {
            center: Point2::new(cx, cy),
            radius,
        }
    }

    /// Regular polygon centered at (`cx`, `cy`)
    pub fn polygon(cx: f64, cy: f64, circumradius: f64, faces: u32, rotation_deg: f64) -> Self {
        Obstacle::Polygon {
            center: Point2::new(cx, cy),
            circumradius,
            faces,
            rotation_deg,
        }
    }

    /// Center of either shape
    pub fn center(&self) -> Point2<f64> {
        match *self {
            Obstacle::Circle { center, .. } | Obstacle::Polygon { center, .. } => center,
        }
    }

    /// Radius of the enclosing disc; circumradius for polygons
    pub fn effective_radius(&self) -> f64 {
        match *self {
            Obstacle::Circle { radius, .. } => radius,
            Obstacle::Polygon { circumradius, .. } => circumradius,
        }
    }

    /// `circle` or `polygon`, as used in the line form
    pub fn kind(&self) -> &'static str {
        match self {
            Obstacle::Circle { .. } => "circle",
            Obstacle::Polygon { .. } => "polygon",
        }
    }
}

/// Two-decimal line form used in environment files
impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Obstacle::Circle { center, radius } => {
                write!(f, "circle:{:.2},{:.2},{:.2}", center.x, center.y, radius)
            }
            Obstacle::Polygon {
                center,
                circumradius,
                faces,
                rotation_deg,
            } => write!(
                f,
                "polygon:{:.2},{:.2},{:.2},{},{:.2}",
                center.x, center.y, circumradius, faces, rotation_deg
            ),
        }
    }
}

/// Parses the value part of an `OBSTACLE=` line. The error is a
/// human-readable reason; the caller attaches the line number.
impl FromStr for Obstacle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <kind>:<values>, got '{}'", s.trim()))?;

        let nums = rest
            .split(',')
            .map(|field| {
                let field = field.trim();
                match field.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(format!("'{}' is not a finite number", field)),
                }
            })
            .collect::<Result<Vec<f64>, String>>()?;

        match kind.trim().to_lowercase().as_str() {
            "circle" => match nums.as_slice() {
                [_, _, r] if *r < 0.0 => Err(format!("circle radius must be >= 0, got {}", r)),
                [cx, cy, r] => Ok(Obstacle::circle(*cx, *cy, *r)),
                _ => Err(format!("circle expects cx,cy,r but got {} values", nums.len())),
            },
            "polygon" => {
                let (cx, cy, r, faces, rot) = match nums.as_slice() {
                    [cx, cy, r, faces] => (*cx, *cy, *r, *faces, 0.0),
                    [cx, cy, r, faces, rot] => (*cx, *cy, *r, *faces, *rot),
                    _ => {
                        return Err(format!(
                            "polygon expects cx,cy,R,faces[,rot_deg] but got {} values",
                            nums.len()
                        ));
                    }
                };
                if r < 0.0 {
                    return Err(format!("polygon circumradius must be >= 0, got {}", r));
                }
                if faces.fract() != 0.0 || faces < 3.0 || faces > f64::from(u32::MAX) {
                    return Err(format!("polygon faces must be an integer >= 3, got {}", faces));
                }
                Ok(Obstacle::polygon(cx, cy, r, faces as u32, rot))
            }
            other => Err(format!("unknown obstacle type '{}'", other)),
        }
    }
}
