//! Cut simulation and depth search
//!
//! The cutter always approaches from the top edge of the (pre-rotated)
//! material bitmap, straight down toward the stock axis. A plunge depth is the
//! row of the cutter tip counted from the top edge.

use crate::cutter::{CutterMask, CutterSilhouette};
use crate::profile::ProfileBitmap;
use tracing::trace;

/// Outcome of a depth search at one rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthSearch {
    /// The cutter first touches material with its tip at this row
    Contact(u32),
    /// No plunge down to the axis touches material
    NoContact,
}

impl DepthSearch {
    /// Tip row for this outcome. A miss reports the axis row, so the derived
    /// radius is zero.
    pub fn depth_px(&self, bitmap_height: u32) -> u32 {
        match *self {
            Self::Contact(depth) => depth,
            Self::NoContact => bitmap_height / 2,
        }
    }

    /// Distance in pixels from the stock axis to the cutter tip
    pub fn radius_px(&self, bitmap_height: u32) -> f64 {
        bitmap_height as f64 / 2.0 - self.depth_px(bitmap_height) as f64
    }
}

/// Whether `mask` intersects any material pixel of `material`
pub fn overlaps(material: &ProfileBitmap, mask: &CutterMask) -> bool {
    mask.covered().any(|(x, y)| material.is_opaque(x, y))
}

/// Whether a cutter of `diameter_px` plunged to `depth_px` hits material
pub fn test_cut(
    material: &ProfileBitmap,
    silhouette: &dyn CutterSilhouette,
    diameter_px: f64,
    depth_px: u32,
) -> bool {
    let (cx, _) = material.center();
    let mask = CutterMask::new(silhouette, cx, diameter_px, depth_px);
    overlaps(material, &mask)
}

/// Binary search for the shallowest plunge at which the cutter touches
/// material.
///
/// Depths are searched in `1..=height/2 + 1`. Deeper plunges cover a superset
/// of shallower ones, so contact is monotonic in depth.
pub fn solve_depth(
    material: &ProfileBitmap,
    silhouette: &dyn CutterSilhouette,
    diameter_px: f64,
) -> DepthSearch {
    let mut low: u32 = 1;
    let mut high: u32 = material.height() / 2 + 1;
    let mut found = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        if test_cut(material, silhouette, diameter_px, mid) {
            found = Some(mid);
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }

    trace!("Depth search result: {:?}", found);
    match found {
        Some(depth) => DepthSearch::Contact(depth),
        None => DepthSearch::NoContact,
    }
}
