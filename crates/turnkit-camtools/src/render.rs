//! As-cut cross-section rendering
//!
//! Replays the sampled toolpath: the cutter is stamped around the stock at its
//! contact radius for every render step, clearing whatever it sweeps. What is
//! left is the cross section the cutter can actually produce, with corners and
//! undercuts it cannot reach filled in.
//!
//! The render step is fixed and independent of the sampling step; radii in
//! between samples come from interpolating the table.

use crate::cross_section::CrossSectionTable;
use crate::cutter::CutterSilhouette;
use crate::error::{ParameterError, TurningResult};
use crate::profile::ProfileBitmap;
use image::{GrayImage, Luma};
use tracing::debug;

/// Largest angle between two cutter stamps (degrees)
pub const RENDER_STEP_DEG: f64 = 0.5;

/// Raster geometry shared by the source profile and the rendered output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGeometry {
    pub width: u32,
    pub height: u32,
    pub pixels_per_unit: f64,
    pub bit_diameter_px: f64,
    /// Radius of the round stock; nothing outside it is material
    pub stock_radius_px: f64,
}

impl RenderGeometry {
    /// Stamp spacing for this geometry: [`RENDER_STEP_DEG`], tightened so
    /// neighbouring stamps still overlap at the stock surface for small bits
    pub fn render_step_deg(&self) -> f64 {
        let span = (self.bit_diameter_px / self.stock_radius_px).to_degrees();
        if span.is_finite() && span > 0.0 {
            RENDER_STEP_DEG.min(span)
        } else {
            RENDER_STEP_DEG
        }
    }
}

/// Render the cross section achievable with `silhouette` following `table`,
/// stamping every `angular_step_deg`.
///
/// Material starts as the stock disk. The result is fully opaque (255) where
/// material remains and 0 where the cutter passed or the stock never was. Any
/// non-zero pixel counts as material.
pub fn render_as_cut(
    table: &CrossSectionTable,
    silhouette: &dyn CutterSilhouette,
    geometry: &RenderGeometry,
    angular_step_deg: f64,
) -> TurningResult<ProfileBitmap> {
    if !(angular_step_deg > 0.0 && angular_step_deg.is_finite()) {
        return Err(ParameterError::InvalidValue {
            name: "angular_step_deg".to_string(),
            reason: format!("must be positive, got {}", angular_step_deg),
        }
        .into());
    }

    let cx = geometry.width as f64 / 2.0;
    let cy = geometry.height as f64 / 2.0;
    let stock_sq = geometry.stock_radius_px * geometry.stock_radius_px;
    let mut image = GrayImage::from_fn(geometry.width, geometry.height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        if dx * dx + dy * dy <= stock_sq {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    let steps = (360.0 / angular_step_deg).ceil() as usize;
    for i in 0..steps {
        let theta = (i as f64 * angular_step_deg).to_radians();
        let radius_px = table.depth_at(theta)? * geometry.pixels_per_unit;
        stamp(&mut image, silhouette, geometry, theta, radius_px);
    }

    debug!(
        "Rendered as-cut cross section with {} stamps at {}°",
        steps, angular_step_deg
    );
    Ok(ProfileBitmap::new(image, 1))
}

/// Clear every pixel covered by the cutter approaching from angle `theta`
/// with its tip `radius_px` from the center.
fn stamp(
    image: &mut GrayImage,
    silhouette: &dyn CutterSilhouette,
    geometry: &RenderGeometry,
    theta: f64,
    radius_px: f64,
) {
    let cx = geometry.width as f64 / 2.0;
    let cy = geometry.height as f64 / 2.0;
    let half_width = geometry.bit_diameter_px / 2.0;
    let (sin, cos) = theta.sin_cos();
    // Direction the cutter comes from, and the cutter's own x axis
    let (ux, uy) = (-sin, -cos);
    let (vx, vy) = (cos, -sin);
    let far = (geometry.width as f64).hypot(geometry.height as f64);

    let corners = [
        (radius_px, -half_width),
        (radius_px, half_width),
        (far, -half_width),
        (far, half_width),
    ]
    .map(|(along, lateral)| (cx + along * ux + lateral * vx, cy + along * uy + lateral * vy));

    let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max).ceil();
    let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max).ceil();
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let max_x = (max_x as u32).min(geometry.width.saturating_sub(1));
    let max_y = (max_y as u32).min(geometry.height.saturating_sub(1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let pixel = image.get_pixel_mut(x, y);
            if pixel.0[0] == 0 {
                continue;
            }
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let along = dx * ux + dy * uy;
            let lateral = dx * vx + dy * vy;
            if silhouette.contains(lateral, along - radius_px, half_width) {
                *pixel = Luma([0]);
            }
        }
    }
}
