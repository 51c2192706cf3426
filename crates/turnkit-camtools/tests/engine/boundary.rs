use turnkit_camtools::{
    extract_boundary, BoundaryPoint, DemoProfile, TurningMachine, TurningParameters,
    WalkTermination,
};

fn machine(demo: DemoProfile, angular_step_deg: f64) -> TurningMachine {
    let params = TurningParameters {
        angular_step_deg,
        ..Default::default()
    };
    TurningMachine::new(demo.bitmap(), params).unwrap()
}

fn longest_edge(points: &[BoundaryPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].distance(&w[1]))
        .fold(0.0, f64::max)
}

#[test]
fn test_disk_contour_at_coarse_steps() {
    for step in [5.0, 10.0, 30.0] {
        let contour = machine(DemoProfile::Disk, step).boundary().unwrap();
        assert_eq!(contour.termination, WalkTermination::Closed, "step {}", step);
        assert!(contour.points.len() >= 4, "step {}", step);
        for p in &contour.points {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(
                (r - 0.5).abs() < 0.03,
                "step {}: point ({}, {}) at radius {}",
                step,
                p.x,
                p.y,
                r
            );
        }
    }
}

#[test]
fn test_disk_contour_closes_without_repeating_start() {
    let contour = machine(DemoProfile::Disk, 10.0).boundary().unwrap();
    let points = &contour.points;
    let first = points[0];
    let last = points[points.len() - 1];

    assert_ne!(first, last);
    // The implicit closing edge is an ordinary edge of the ring
    assert!(first.distance(&last) <= 2.0 * longest_edge(points));
}

#[test]
fn test_offset_part_keeps_image_orientation() {
    // The twist disk sits above the axis in the image
    let contour = machine(DemoProfile::Twist, 10.0).boundary().unwrap();
    let mean_y =
        contour.points.iter().map(|p| p.y).sum::<f64>() / contour.points.len() as f64;
    assert!(mean_y < -0.1, "mean y {}", mean_y);
}

#[test]
fn test_square_contour_corners() {
    let bitmap = DemoProfile::Square.bitmap();
    let contour = extract_boundary(&bitmap, 200.0, 0.005).unwrap();

    assert_ne!(contour.points.first(), contour.points.last());
    assert_eq!(contour.unvisited_edge_pixels, 0);
    for p in &contour.points {
        assert!(p.x.abs() <= 0.5 && p.y.abs() <= 0.5);
        let on_edge = (p.x.abs() - 0.5).abs() < 0.01 || (p.y.abs() - 0.5).abs() < 0.01;
        assert!(on_edge, "({}, {}) is not on the square", p.x, p.y);
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let machine = machine(DemoProfile::Disk, 10.0);
    let a = machine.boundary().unwrap();
    let b = machine.boundary().unwrap();
    assert_eq!(a.points, b.points);
}

#[test]
fn test_contour_serializes() {
    let bitmap = DemoProfile::Square.bitmap();
    let contour = extract_boundary(&bitmap, 200.0, 0.005).unwrap();
    let json = serde_json::to_string(&contour).unwrap();
    assert!(json.contains("\"points\""));
}
