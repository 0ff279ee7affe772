// src/navigation/clearance.rs
// Minimum signed clearance from a point to a set of inflated obstacles.

use crate::core::{distance, signed_distance_to_polygon, Obstacle};
use nalgebra::Point2;

/// Signed distance from `point` to the boundary of one obstacle after it has
/// been grown by `inflation`. Negative means the point is inside the keepout.
pub fn obstacle_clearance(point: &Point2<f64>, obstacle: &Obstacle, inflation: f64) -> f64 {
    match *obstacle {
        Obstacle::Circle { center, radius } => distance(point, &center) - (radius + inflation),
        Obstacle::Polygon {
            center,
            circumradius,
            faces,
            rotation_deg,
        } => {
            signed_distance_to_polygon(point, &center, circumradius, faces, rotation_deg)
                - inflation
        }
    }
}

/// Minimum clearance over all obstacles; `f64::INFINITY` when there are none.
pub fn min_clearance(point: &Point2<f64>, obstacles: &[Obstacle], inflation: f64) -> f64 {
    obstacles
        .iter()
        .map(|obstacle| obstacle_clearance(point, obstacle, inflation))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_circle() {
        let obstacles = [Obstacle::circle(10.0, 10.0, 50.0)];
        assert_eq!(min_clearance(&Point2::new(10.0, 10.0), &obstacles, 0.0), -50.0);
    }

    #[test]
    fn empty_set_is_unconstrained() {
        assert_eq!(min_clearance(&Point2::origin(), &[], 25.0), f64::INFINITY);
    }

    #[test]
    fn takes_the_nearest_obstacle() {
        let obstacles = [
            Obstacle::circle(100.0, 0.0, 10.0),
            Obstacle::polygon(0.0, 40.0, 10.0, 4, 45.0),
        ];
        // Square edge at y = 40 - 10/sqrt(2)
        let expected = 40.0 - 10.0 / std::f64::consts::SQRT_2 - 5.0;
        let d = min_clearance(&Point2::origin(), &obstacles, 5.0);
        assert!((d - expected).abs() < 1e-9);
    }
}
