//! Cutter silhouettes
//!
//! A cutter is described by its side-on silhouette: for a point at horizontal
//! offset `dx` from the cutter axis and `height` above the tip, does the cutter
//! occupy it? Everything downstream (overlap tests, depth search, as-cut
//! rendering) only asks that question, so any shape can be plugged in by
//! implementing [`CutterSilhouette`].

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Side-on silhouette of a rotating cutter
pub trait CutterSilhouette: Debug + Send + Sync {
    /// Whether the cutter covers the point `dx` from its axis and `height`
    /// above its tip. `radius` is half the cutting diameter. Heights below
    /// zero are never covered.
    fn contains(&self, dx: f64, height: f64, radius: f64) -> bool;
}

/// Built-in cutter shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CutterShape {
    /// Cylindrical shaft capped by a hemisphere
    BallNose,
    /// Cylindrical shaft with a flat tip
    FlatEnd,
    /// Conical tip widening to the full diameter
    VBit {
        /// Included angle of the cone in degrees (e.g. 60, 90)
        included_angle_deg: f64,
    },
}

impl Default for CutterShape {
    fn default() -> Self {
        Self::BallNose
    }
}

impl CutterShape {
    /// Validate shape-specific parameters
    pub fn validate(&self) -> ParameterResult<()> {
        if let Self::VBit { included_angle_deg } = *self {
            if !(included_angle_deg > 0.0 && included_angle_deg < 180.0) {
                return Err(ParameterError::OutOfRange {
                    name: "included_angle_deg".to_string(),
                    value: included_angle_deg,
                    min: 0.0,
                    max: 180.0,
                });
            }
        }
        Ok(())
    }
}

impl CutterSilhouette for CutterShape {
    fn contains(&self, dx: f64, height: f64, radius: f64) -> bool {
        if height < 0.0 || dx.abs() > radius {
            return false;
        }
        match *self {
            Self::BallNose => {
                if height >= radius {
                    true
                } else {
                    let dy = radius - height;
                    dx * dx + dy * dy <= radius * radius
                }
            }
            Self::FlatEnd => true,
            Self::VBit { included_angle_deg } => {
                let half_angle = (included_angle_deg / 2.0).to_radians();
                dx.abs() <= height * half_angle.tan()
            }
        }
    }
}

/// Raster of a cutter plunged to a given depth from the top edge of a bitmap
///
/// Columns are absolute bitmap columns `first_column..first_column + width`
/// straddling `center_x`; rows run from the top edge (row 0) down to the tip
/// at row `depth`.
#[derive(Debug, Clone)]
pub struct CutterMask {
    first_column: i64,
    width: usize,
    cells: Vec<bool>,
}

impl CutterMask {
    /// Rasterize `silhouette` of `diameter_px` centered on `center_x` with
    /// its tip at row `depth_px`
    pub fn new(
        silhouette: &dyn CutterSilhouette,
        center_x: f64,
        diameter_px: f64,
        depth_px: u32,
    ) -> Self {
        let radius = diameter_px / 2.0;
        let first_column = (center_x - radius).ceil() as i64;
        let last_column = (center_x + radius).floor() as i64;
        let width = (last_column - first_column + 1).max(0) as usize;
        let rows = depth_px as usize + 1;

        let mut cells = vec![false; width * rows];
        for row in 0..rows {
            let height = depth_px as f64 - row as f64;
            for col in 0..width {
                let dx = (first_column + col as i64) as f64 - center_x;
                cells[row * width + col] = silhouette.contains(dx, height, radius);
            }
        }

        Self {
            first_column,
            width,
            cells,
        }
    }

    /// Iterate over the bitmap coordinates covered by the cutter
    pub fn covered(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, &on)| {
            on.then(|| {
                (
                    self.first_column + (i % self.width) as i64,
                    (i / self.width) as i64,
                )
            })
        })
    }
}
