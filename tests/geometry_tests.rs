use nalgebra::Point2;
use pathbench::core::{
    is_inside_convex_polygon, regular_polygon_vertices, signed_distance_to_polygon, Footprint,
};
use pathbench::navigation::min_clearance;
use pathbench::Obstacle;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const TOLERANCE: f64 = 1e-9;

#[rstest]
#[case(3, 0.0)]
#[case(4, 45.0)]
#[case(6, 10.0)]
#[case(12, 200.0)]
fn boundary_points_have_zero_distance(#[case] faces: u32, #[case] rotation: f64) {
    let center = Point2::new(-20.0, 35.0);
    let verts = regular_polygon_vertices(&center, 40.0, faces, rotation);
    for (i, a) in verts.iter().enumerate() {
        let b = verts[(i + 1) % verts.len()];
        let midpoint = Point2::new(0.5 * (a.x + b.x), 0.5 * (a.y + b.y));
        let d = signed_distance_to_polygon(&midpoint, &center, 40.0, faces, rotation);
        assert!(d.abs() < 1e-6, "edge midpoint {} gave {}", i, d);
    }
}

#[rstest]
#[case(3)]
#[case(5)]
#[case(8)]
fn center_is_inside_and_far_point_outside(#[case] faces: u32) {
    let center = Point2::new(100.0, 100.0);
    assert!(signed_distance_to_polygon(&center, &center, 25.0, faces, 0.0) < 0.0);
    let far = Point2::new(200.0, 100.0);
    let d = signed_distance_to_polygon(&far, &center, 25.0, faces, 0.0);
    assert!(d > 0.0);
    // Far point lies beyond the vertex on +x, 75 cm away
    assert!((d - 75.0).abs() < TOLERANCE);
}

#[test]
fn containment_agrees_with_signed_distance() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for _ in 0..200 {
        let faces = rng.gen_range(3..=12);
        let radius = rng.gen_range(5.0..80.0);
        let rotation = rng.gen_range(0.0..360.0);
        let center = Point2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        let verts = regular_polygon_vertices(&center, radius, faces, rotation);

        for _ in 0..50 {
            let p = Point2::new(
                center.x + rng.gen_range(-1.5 * radius..1.5 * radius),
                center.y + rng.gen_range(-1.5 * radius..1.5 * radius),
            );
            let d = signed_distance_to_polygon(&p, &center, radius, faces, rotation);
            if d.abs() < 1e-9 {
                continue;
            }
            assert_eq!(
                is_inside_convex_polygon(&p, &verts),
                d < 0.0,
                "faces={} p=({}, {}) d={}",
                faces,
                p.x,
                p.y,
                d
            );
        }
    }
}

#[test]
fn circle_footprint_inflation() {
    assert_eq!(Footprint::Circle { radius: 10.0 }.inflation_radius(5.0), 15.0);
}

#[test]
fn square_footprint_inflation() {
    let r = Footprint::Rect { width: 20.0, height: 20.0 }.inflation_radius(5.0);
    assert!((r - 19.142).abs() < 1e-3);
}

#[test]
fn polygon_footprint_uses_circumradius() {
    let fp = Footprint::polygon(6, 12.0, 20.0, 20.0);
    assert_eq!(fp, Footprint::Polygon { faces: 6, circumradius: 12.0 });
    assert_eq!(fp.inflation_radius(3.0), 15.0);
}

#[test]
fn polygon_footprint_with_zero_radius_falls_back() {
    let fp = Footprint::polygon(6, 0.0, 30.0, 40.0);
    assert_eq!(fp, Footprint::Rect { width: 30.0, height: 40.0 });
}

#[test]
fn clearance_at_circle_center() {
    let obstacles = [Obstacle::circle(0.0, 0.0, 50.0)];
    assert_eq!(min_clearance(&Point2::new(0.0, 0.0), &obstacles, 0.0), -50.0);
}

#[rstest]
#[case(Point2::new(0.0, 0.0), -40.0)]
#[case(Point2::new(45.0, 0.0), 5.0)]
#[case(Point2::new(0.0, -40.0), 0.0)]
fn circle_clearance_includes_inflation(#[case] point: Point2<f64>, #[case] expected: f64) {
    let obstacles = [Obstacle::circle(0.0, 0.0, 25.0)];
    let d = min_clearance(&point, &obstacles, 15.0);
    assert!((d - expected).abs() < TOLERANCE);
}

#[test]
fn polygon_clearance_subtracts_inflation() {
    let obstacles = [Obstacle::polygon(0.0, 0.0, 10.0, 4, 0.0)];
    // Vertex at (10, 0); point 20 cm further along +x
    let d = min_clearance(&Point2::new(30.0, 0.0), &obstacles, 5.0);
    assert!((d - 15.0).abs() < TOLERANCE);
}
