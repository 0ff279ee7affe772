// core/geometry.rs

// Pure 2D primitives used by clearance evaluation: regular polygon vertex
// generation, point-to-segment distance, the convex containment test and the
// signed distance to a regular polygon boundary. All coordinates are in cm.

// Dependencies
use nalgebra::{Point2, Vector2};

/// Euclidean distance between two points
pub fn distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// Generates the vertices of a regular polygon, counter-clockwise.
/// Vertex `k` sits at angle `rotation_deg + 360°·k/faces` measured from +x.
///
/// Panics if `faces < 3`; parsing and sampling never produce such a polygon.
pub fn regular_polygon_vertices(
    center: &Point2<f64>,
    circumradius: f64,
    faces: u32,
    rotation_deg: f64,
) -> Vec<Point2<f64>> {
    assert!(faces >= 3, "regular polygon needs at least 3 faces, got {}", faces);

    let rotation = rotation_deg.to_radians();
    (0..faces)
        .map(|k| {
            let angle = rotation + std::f64::consts::TAU * f64::from(k) / f64::from(faces);
            center + Vector2::new(angle.cos(), angle.sin()) * circumradius
        })
        .collect()
}

/// Distance from `p` to the closed segment `ab`.
/// A degenerate segment (a == b) yields the point-to-point distance.
pub fn point_segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let denom = ab.norm_squared();
    if denom == 0.0 {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / denom).clamp(0.0, 1.0);
    let closest = a + ab * t;
    distance(p, &closest)
}

/// Iterates the closed edge loop `(v0,v1), (v1,v2), ..., (vn-1,v0)`
fn edges(vertices: &[Point2<f64>]) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
}

/// Containment test for a counter-clockwise convex polygon.
/// Boundary points count as inside.
pub fn is_inside_convex_polygon(p: &Point2<f64>, vertices: &[Point2<f64>]) -> bool {
    edges(vertices).all(|(a, b)| {
        let edge = b - a;
        let to_point = p - a;
        edge.perp(&to_point) >= 0.0
    })
}

/// Signed distance from `p` to the boundary of a regular polygon.
///
/// The magnitude is the distance to the nearest edge, negated when the point
/// is inside. For interior points away from the center this is the nearest-edge
/// distance rather than an exact distance transform; callers rely on exactly
/// this value.
pub fn signed_distance_to_polygon(
    p: &Point2<f64>,
    center: &Point2<f64>,
    circumradius: f64,
    faces: u32,
    rotation_deg: f64,
) -> f64 {
    let vertices = regular_polygon_vertices(center, circumradius, faces, rotation_deg);
    let edge_distance = edges(&vertices)
        .map(|(a, b)| point_segment_distance(p, a, b))
        .fold(f64::INFINITY, f64::min);

    if is_inside_convex_polygon(p, &vertices) {
        -edge_distance
    } else {
        edge_distance
    }
}
