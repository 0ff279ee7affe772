//! Geometric leaves of Pathbench
//!
//! Shape primitives, the robot footprint with its inflation model, and the
//! obstacle types. Nothing in here keeps state; every function is pure.

/// Robot footprint and inflation radius
pub mod footprint;
/// Polygon and distance primitives
pub mod geometry;
/// Circle and polygon obstacles with their line form
pub mod obstacle;

// Re-export key types and functions for a unified API
pub use footprint::{inflation_radius, Footprint, RobotConfig, RobotShape};
pub use geometry::{
    distance, is_inside_convex_polygon, point_segment_distance, regular_polygon_vertices,
    signed_distance_to_polygon,
};
pub use obstacle::Obstacle;
