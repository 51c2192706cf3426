//! Polyline simplification.
//!
//! A cheap radial-distance pass drops points crowded closer than the
//! tolerance, then Douglas-Peucker removes points that deviate less than the
//! tolerance from the simplified path. First and last points always survive.

use crate::boundary::BoundaryPoint;

/// Squared distance from `p` to the segment `a`-`b`
fn segment_distance_sq(p: BoundaryPoint, a: BoundaryPoint, b: BoundaryPoint) -> f64 {
    let (mut x, mut y) = (a.x, a.y);
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.x - x) * dx + (p.y - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b.x;
            y = b.y;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    (p.x - x).powi(2) + (p.y - y).powi(2)
}

/// Drop points closer than `tolerance` to the previously kept point
pub fn radial_distance(points: &[BoundaryPoint], tolerance: f64) -> Vec<BoundaryPoint> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let tolerance_sq = tolerance * tolerance;
    let mut result = vec![first];
    let mut prev = first;

    for &point in rest {
        if point.distance_sq(&prev) > tolerance_sq {
            result.push(point);
            prev = point;
        }
    }

    if let Some(&last) = points.last() {
        if prev != last {
            result.push(last);
        }
    }
    result
}

/// Douglas-Peucker line simplification
pub fn douglas_peucker(points: &[BoundaryPoint], tolerance: f64) -> Vec<BoundaryPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let tolerance_sq = tolerance * tolerance;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack instead of recursion; boundaries can be long
    let mut stack = vec![(0, points.len() - 1)];
    while let Some((anchor, floater)) = stack.pop() {
        if anchor + 1 >= floater {
            continue;
        }

        let mut max_dist_sq = 0.0;
        let mut furthest = anchor;
        for i in (anchor + 1)..floater {
            let d = segment_distance_sq(points[i], points[anchor], points[floater]);
            if d > max_dist_sq {
                max_dist_sq = d;
                furthest = i;
            }
        }

        if max_dist_sq > tolerance_sq {
            keep[furthest] = true;
            stack.push((anchor, furthest));
            stack.push((furthest, floater));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Radial-distance pass followed by Douglas-Peucker
pub fn simplify(points: &[BoundaryPoint], tolerance: f64) -> Vec<BoundaryPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    douglas_peucker(&radial_distance(points, tolerance), tolerance)
}
