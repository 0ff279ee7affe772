use nalgebra::Point2;
use pathbench::core::distance;
use pathbench::navigation::{
    Goal, Instruction, ObstacleSampler, PathSimulator, Pose, SamplerConfig, SimulatorConfig,
    TurnConvention,
};
use pathbench::render::NullSink;
use pathbench::{BenchError, Benchmark, EnvConfig, Obstacle};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rstest::rstest;

fn goal(x: f64, y: f64, radius_cm: f64) -> Goal {
    Goal {
        position: Point2::new(x, y),
        radius_cm,
    }
}

#[test]
fn straight_move_reaches_goal() {
    let sim = PathSimulator::new(&[], 0.0, goal(100.0, 0.0, 0.0), SimulatorConfig::default())
        .unwrap();
    let result = sim.run(Pose::new(0.0, 0.0, 0.0), &[Instruction::Move(100.0)]);

    assert!((result.final_pose.x - 100.0).abs() < 1e-9);
    assert!(result.final_pose.y.abs() < 1e-9);
    assert!((result.total_path_length - 100.0).abs() < 1e-9);
    assert!(result.reached_goal);
    assert_eq!(result.min_clearance, None);
    assert_eq!(result.collision_sample_count, 0);
}

#[rstest]
#[case(TurnConvention::RightPositive, Point2::new(0.0, -60.0))]
#[case(TurnConvention::LeftPositive, Point2::new(0.0, 60.0))]
fn turn_convention_decides_direction(
    #[case] convention: TurnConvention,
    #[case] expected: Point2<f64>,
) {
    let config = SimulatorConfig {
        turn_convention: convention,
        ..SimulatorConfig::default()
    };
    let sim = PathSimulator::new(&[], 0.0, goal(expected.x, expected.y, 1.0), config).unwrap();
    let result = sim.run(
        Pose::new(0.0, 0.0, 0.0),
        &[Instruction::Turn(90.0), Instruction::Move(60.0)],
    );
    assert!(distance(&result.final_pose.position(), &expected) < 1e-9);
    assert!(result.reached_goal);
}

#[test]
fn backward_move_counts_positive_length() {
    let sim = PathSimulator::new(&[], 0.0, goal(-30.0, 0.0, 0.5), SimulatorConfig::default())
        .unwrap();
    let result = sim.run(Pose::new(0.0, 0.0, 0.0), &[Instruction::Move(-30.0)]);
    assert!((result.final_pose.x + 30.0).abs() < 1e-9);
    assert!((result.total_path_length - 30.0).abs() < 1e-9);
    assert_eq!(result.final_pose.heading_deg, 0.0);
}

#[test]
fn driving_through_obstacle_counts_collisions() {
    // Circle of radius 10 at x=50, inflated by 5: keepout spans x in [35, 65]
    let obstacles = [Obstacle::circle(50.0, 0.0, 10.0)];
    let sim = PathSimulator::new(&obstacles, 5.0, goal(100.0, 0.0, 1.0), SimulatorConfig::default())
        .unwrap();
    let result = sim.run(Pose::new(0.0, 0.0, 0.0), &[Instruction::Move(100.0)]);

    // Samples at x = 36, 38, ..., 64 lie strictly inside
    assert_eq!(result.collision_sample_count, 15);
    assert_eq!(result.min_clearance, Some(-15.0));
    assert!(result.reached_goal);
}

#[test]
fn missed_goal_is_reported() {
    let sim = PathSimulator::new(&[], 0.0, goal(100.0, 0.0, 10.0), SimulatorConfig::default())
        .unwrap();
    let result = sim.run(Pose::new(0.0, 0.0, 0.0), &[Instruction::Move(80.0)]);
    assert!(!result.reached_goal);
}

#[test]
fn sub_steps_round_to_nearest_count() {
    // 5 cm at 2 cm spacing rounds to 3 samples of 5/3 cm
    let obstacles = [Obstacle::circle(1000.0, 0.0, 1.0)];
    let sim = PathSimulator::new(&obstacles, 0.0, goal(5.0, 0.0, 0.1), SimulatorConfig::default())
        .unwrap();
    let result = sim.run(Pose::new(0.0, 0.0, 0.0), &[Instruction::Move(5.0)]);
    assert!((result.total_path_length - 5.0).abs() < 1e-9);
    assert!((result.min_clearance.unwrap() - (1000.0 - 5.0 - 1.0)).abs() < 1e-9);
}

fn wide_open_sampler(seed_config: SamplerConfig) -> ObstacleSampler {
    ObstacleSampler::new(
        seed_config,
        Point2::new(0.0, 0.0),
        Point2::new(500.0, 0.0),
        19.142,
    )
    .unwrap()
}

#[rstest]
#[case(1)]
#[case(17)]
#[case(99)]
#[case(12345)]
fn non_overlapping_layout_respects_keepouts(#[case] seed: u64) {
    let config = SamplerConfig {
        count_min: 3,
        count_max: 3,
        radius_min: 10.0,
        radius_max: 40.0,
        non_overlap: true,
        rotation: true,
        pad: 1500.0,
        ..SamplerConfig::default()
    };
    let sampler = wide_open_sampler(config);
    let inflation = 19.142;
    let keepout = sampler.keepout_radius();
    let outcome = sampler.generate(&mut SmallRng::seed_from_u64(seed));

    assert_eq!(outcome.requested, 3);
    assert_eq!(outcome.obstacles.len(), 3);

    for (i, a) in outcome.obstacles.iter().enumerate() {
        for anchor in [Point2::new(0.0, 0.0), Point2::new(500.0, 0.0)] {
            assert!(distance(&a.center(), &anchor) > a.effective_radius() + keepout);
        }
        for b in &outcome.obstacles[i + 1..] {
            let gap = distance(&a.center(), &b.center());
            assert!(gap >= a.effective_radius() + b.effective_radius() + inflation);
        }
    }
}

#[test]
fn obstacles_stay_inside_placement_area() {
    let config = SamplerConfig {
        count_min: 5,
        count_max: 5,
        pad: 300.0,
        ..SamplerConfig::default()
    };
    let sampler = wide_open_sampler(config);
    let area = sampler.placement_area();
    let outcome = sampler.generate(&mut SmallRng::seed_from_u64(5));
    for obstacle in &outcome.obstacles {
        let c = obstacle.center();
        assert!(c.x >= area.min.x && c.x <= area.max.x);
        assert!(c.y >= area.min.y && c.y <= area.max.y);
    }
}

#[test]
fn same_seed_same_layout() {
    let config = SamplerConfig {
        count_min: 2,
        count_max: 8,
        rotation: true,
        non_overlap: true,
        ..SamplerConfig::default()
    };
    let sampler = wide_open_sampler(config);
    let first = sampler.generate(&mut SmallRng::seed_from_u64(42));
    let second = sampler.generate(&mut SmallRng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn benchmark_runs_parsed_environment() {
    let text = "\
START_X=0
START_Y=0
GOAL_X=100
GOAL_Y=0
GOAL_RADIUS_CM=5
ROBOT_SHAPE=circle
ROBOT_RADIUS_CM=10
CLEARANCE_CM=5
OBSTACLE=circle:50,100,20
";
    let (env, _) = EnvConfig::parse(text).unwrap();
    let bench = Benchmark::new(env);
    assert_eq!(bench.inflation(), 15.0);

    let result = bench
        .run(&[Instruction::Move(100.0)], 2.0, &mut NullSink)
        .unwrap();
    assert!(result.reached_goal);
    assert_eq!(result.collision_sample_count, 0);
    // Closest sample at (50, 0): 100 - 20 - 15
    assert!((result.min_clearance.unwrap() - 65.0).abs() < 1e-9);

    let report = result.report(bench.env().turn_convention);
    assert_eq!(report.total_path_length_cm, 100.0);
    assert_eq!(report.min_clearance_cm, Some(65.0));
}

#[test]
fn benchmark_rejects_zero_step() {
    let bench = Benchmark::new(EnvConfig::default());
    assert!(bench.run(&[], 0.0, &mut NullSink).is_err());
}

#[test]
fn benchmark_rejects_move_beyond_sample_limit() {
    let bench = Benchmark::new(EnvConfig::default());
    let result = bench.run(&[Instruction::Move(1e15)], 2.0, &mut NullSink);
    assert!(matches!(result, Err(BenchError::InvalidValue(_))));
    // A fine step can push an otherwise acceptable move over the limit
    assert!(bench.run(&[Instruction::Move(5000.0)], 0.001, &mut NullSink).is_err());
    assert!(bench.run(&[Instruction::Move(5000.0)], 2.0, &mut NullSink).is_ok());
}
