//! Boundary extraction
//!
//! Turns a cross-section bitmap into an ordered contour in physical units:
//!
//! 1. Edge pixels are material pixels with at least one empty 4-neighbour.
//! 2. A single cursor walks from edge pixel to unvisited edge pixel through
//!    the 8-neighbourhood, which orders the otherwise unordered set.
//! 3. Pixels are converted to physical coordinates around the bitmap center,
//!    keeping the image orientation (y grows downward, as rows do).
//! 4. The seam left by the arbitrary start pixel is hidden by simplifying
//!    three laps of the contour and keeping only the middle one.
//!
//! The walk assumes the edge is one simple closed curve. Branches or separate
//! islands end the walk early; that is reported as
//! [`WalkTermination::Truncated`] rather than corrected.

use crate::error::{TurningError, TurningResult};
use crate::profile::ProfileBitmap;
use crate::simplify::simplify;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Neighbour search order for the walk: +x, -x, +y, -y, then the diagonals
const WALK_ORDER: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// A contour point in physical units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub x: f64,
    pub y: f64,
}

impl BoundaryPoint {
    pub fn distance_sq(&self, other: &BoundaryPoint) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn distance(&self, other: &BoundaryPoint) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

/// How the boundary walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkTermination {
    /// The walk came back next to its start pixel
    Closed,
    /// The walk ran out of neighbours away from its start pixel; the edge
    /// is not a single closed curve
    Truncated,
}

/// Edge pixels in walk order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryWalk {
    pub pixels: Vec<(i64, i64)>,
    pub termination: WalkTermination,
    /// Edge pixels the walk never reached
    pub unvisited: usize,
}

/// Ordered as-cut contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryContour {
    /// Closed polyline: the last point repeats the first
    pub points: Vec<BoundaryPoint>,
    pub termination: WalkTermination,
    pub unvisited_edge_pixels: usize,
}

/// Material pixels with an empty 4-neighbour, in column-major scan order.
///
/// The outermost rows and columns are not considered.
pub fn edge_pixels(bitmap: &ProfileBitmap) -> Vec<(i64, i64)> {
    let width = bitmap.width() as i64;
    let height = bitmap.height() as i64;
    let mut edges = Vec::new();

    for x in 1..width - 1 {
        for y in 1..height - 1 {
            if !bitmap.is_opaque(x, y) {
                continue;
            }
            let exposed = [(x - 1, y), (x + 1, y), (x, y + 1), (x, y - 1)]
                .iter()
                .any(|&(nx, ny)| !bitmap.is_opaque(nx, ny));
            if exposed {
                edges.push((x, y));
            }
        }
    }
    edges
}

/// Order the edge pixels of `bitmap` by adjacency.
///
/// Starts at the first edge pixel of the scan. Returns `None` when the bitmap
/// has no edge at all.
pub fn walk_boundary(bitmap: &ProfileBitmap) -> Option<BoundaryWalk> {
    let edges = edge_pixels(bitmap);
    let &start = edges.first()?;

    let mut unvisited: HashSet<(i64, i64)> = edges.iter().copied().collect();
    unvisited.remove(&start);

    let mut cursor = start;
    let mut pixels = vec![start];
    while let Some(next) = WALK_ORDER
        .iter()
        .map(|&(dx, dy)| (cursor.0 + dx, cursor.1 + dy))
        .find(|p| unvisited.contains(p))
    {
        unvisited.remove(&next);
        pixels.push(next);
        cursor = next;
    }

    let back_at_start = (cursor.0 - start.0).abs() <= 1 && (cursor.1 - start.1).abs() <= 1;
    let termination = if pixels.len() > 2 && back_at_start {
        WalkTermination::Closed
    } else {
        WalkTermination::Truncated
    };

    Some(BoundaryWalk {
        pixels,
        termination,
        unvisited: unvisited.len(),
    })
}

/// Extract the ordered contour of `bitmap` in physical units.
///
/// `tolerance` is the simplification tolerance in physical units.
pub fn extract_boundary(
    bitmap: &ProfileBitmap,
    pixels_per_unit: f64,
    tolerance: f64,
) -> TurningResult<BoundaryContour> {
    let walk = walk_boundary(bitmap).ok_or(TurningError::EmptyProfile {
        threshold: bitmap.threshold(),
    })?;

    if walk.termination == WalkTermination::Truncated {
        warn!(
            "Boundary walk stopped after {} pixels away from its start ({} edge pixels unvisited)",
            walk.pixels.len(),
            walk.unvisited
        );
    }

    let (cx, cy) = bitmap.center();
    let points: Vec<BoundaryPoint> = walk
        .pixels
        .iter()
        .map(|&(x, y)| BoundaryPoint {
            x: (x as f64 - cx) / pixels_per_unit,
            y: (y as f64 - cy) / pixels_per_unit,
        })
        .collect();

    let contour = trim_seam(&points, tolerance);
    debug!(
        "Boundary: {} edge pixels -> {} contour points",
        walk.pixels.len(),
        contour.len()
    );

    Ok(BoundaryContour {
        points: contour,
        termination: walk.termination,
        unvisited_edge_pixels: walk.unvisited,
    })
}

/// Simplify a closed contour without leaving artifacts at its start point.
///
/// The contour (minus its last point) is repeated three times and simplified
/// as one polyline. The lap returned runs from the point nearest the contour
/// start in `[n/6, n/2)` up to (not including) the nearest one in
/// `[n/2, n - n/6)`. The ring is implicitly closed: the last point connects
/// back to the first, which is not repeated.
pub fn trim_seam(points: &[BoundaryPoint], tolerance: f64) -> Vec<BoundaryPoint> {
    let Some(&start) = points.first() else {
        return Vec::new();
    };
    if points.len() < 4 {
        return points.to_vec();
    }

    let open = &points[..points.len() - 1];
    let tripled: Vec<BoundaryPoint> = open.iter().chain(open).chain(open).copied().collect();
    let simp = simplify(&tripled, tolerance);

    let n = simp.len();
    if n < 3 {
        return simp;
    }
    let sixth = n / 6;
    let half = n / 2;

    let closest = |range: std::ops::Range<usize>, fallback: usize| -> usize {
        let mut best = fallback;
        let mut best_dist = f64::INFINITY;
        for i in range {
            let d = simp[i].distance(&start);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    };
    let start_idx = closest(sixth..half, sixth);
    let end_idx = closest(half..n - sixth, half);

    simp[start_idx..end_idx].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn square(size: u32, lo: u32, hi: u32) -> ProfileBitmap {
        let image = GrayImage::from_fn(size, size, |x, y| {
            if (lo..=hi).contains(&x) && (lo..=hi).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        ProfileBitmap::new(image, 1)
    }

    #[test]
    fn test_edge_pixels_of_square() {
        let bitmap = square(20, 5, 14);
        let edges = edge_pixels(&bitmap);
        // 10x10 square has 36 perimeter pixels
        assert_eq!(edges.len(), 36);
        assert_eq!(edges[0], (5, 5));
        assert!(!edges.contains(&(8, 8)));
    }

    #[test]
    fn test_walk_visits_whole_square() {
        let bitmap = square(20, 5, 14);
        let walk = walk_boundary(&bitmap).unwrap();
        assert_eq!(walk.pixels.len(), 36);
        assert_eq!(walk.unvisited, 0);
        assert_eq!(walk.termination, WalkTermination::Closed);
        // +x has priority from the start pixel
        assert_eq!(walk.pixels[1], (6, 5));
        for pair in walk.pixels.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
        }
    }

    #[test]
    fn test_walk_reports_separate_islands() {
        let mut image = GrayImage::new(30, 30);
        for (x, y) in [(5u32, 5u32), (6, 5), (20, 20), (21, 20)] {
            image.put_pixel(x, y, Luma([255]));
        }
        let walk = walk_boundary(&ProfileBitmap::new(image, 1)).unwrap();
        assert_eq!(walk.pixels.len(), 2);
        assert_eq!(walk.unvisited, 2);
        assert_eq!(walk.termination, WalkTermination::Truncated);
    }

    #[test]
    fn test_empty_bitmap_has_no_boundary() {
        let bitmap = ProfileBitmap::empty(10, 10, 1);
        assert!(walk_boundary(&bitmap).is_none());
        assert!(extract_boundary(&bitmap, 10.0, 0.005).is_err());
    }

    #[test]
    fn test_square_contour_is_open_ring_and_simplified() {
        let bitmap = square(20, 5, 14);
        let contour = extract_boundary(&bitmap, 10.0, 0.005).unwrap();
        let first = *contour.points.first().unwrap();
        let last = *contour.points.last().unwrap();
        // Open ring: the start is not repeated, and the closing edge is no
        // longer than a side of the square
        assert_ne!(first, last);
        assert!(first.distance(&last) <= 0.9 + 1e-9);
        // Starts on the top-left corner, in image orientation
        assert_eq!(first, BoundaryPoint { x: -0.5, y: -0.5 });
        // The straight sides collapse to little more than the corners
        assert!(contour.points.len() >= 4 && contour.points.len() <= 8);
        for p in &contour.points {
            let on_side = [p.x, p.y].iter().any(|&c| c == -0.5 || c == 0.4);
            assert!(on_side, "({}, {}) is off the square", p.x, p.y);
        }
    }

    #[test]
    fn test_rows_above_center_have_negative_y() {
        let bitmap = square(20, 2, 6);
        let contour = extract_boundary(&bitmap, 10.0, 0.005).unwrap();
        assert!(contour.points.iter().all(|p| p.y < 0.0));
        assert!(contour.points.iter().any(|p| (p.y + 0.8).abs() < 1e-9));
    }

    #[test]
    fn test_trim_seam_does_not_repeat_start() {
        let ring: Vec<BoundaryPoint> = (0..=40)
            .map(|i| {
                let a = i as f64 / 40.0 * std::f64::consts::TAU;
                BoundaryPoint {
                    x: a.cos(),
                    y: a.sin(),
                }
            })
            .collect();
        let trimmed = trim_seam(&ring, 0.001);
        assert_eq!(trimmed.len(), 40);
        assert_eq!(trimmed[0], ring[0]);
        assert_ne!(trimmed[0], trimmed[39]);
    }
}
