//! Turning machine
//!
//! Ties the pipeline together for one profile: scale detection, cross-section
//! sampling, and the outputs derived from the sampled table.

use crate::boundary::{extract_boundary, BoundaryContour};
use crate::cross_section::{sample_cross_section, CrossSectionTable};
use crate::error::TurningResult;
use crate::params::TurningParameters;
use crate::profile::ProfileBitmap;
use crate::render::{render_as_cut, RenderGeometry};
use crate::sbp::{generate_program, MotionProgram};
use tracing::info;

/// A profile prepared for turning with a fixed set of parameters
#[derive(Debug, Clone)]
pub struct TurningMachine {
    profile: ProfileBitmap,
    params: TurningParameters,
    pixels_per_unit: f64,
    bit_diameter_px: f64,
    cross_section: CrossSectionTable,
}

impl TurningMachine {
    /// Validate `params`, derive the pixel scale from the profile's extent and
    /// sample the cross section.
    pub fn new(profile: ProfileBitmap, params: TurningParameters) -> TurningResult<Self> {
        params.validate()?;

        let diameter_px = profile.source_diameter_px()?;
        let pixels_per_unit = diameter_px / params.stock_diameter;
        let bit_diameter_px = params.bit_diameter * pixels_per_unit;
        info!(
            "Profile {}x{}: diameter {:.1}px, {:.2}px/unit, bit {:.2}px",
            profile.width(),
            profile.height(),
            diameter_px,
            pixels_per_unit,
            bit_diameter_px
        );

        let cross_section = sample_cross_section(
            &profile,
            &params.cutter,
            bit_diameter_px,
            pixels_per_unit,
            params.angular_step_deg,
        )?;
        info!("Sampled {} cross-section angles", cross_section.len());

        Ok(Self {
            profile,
            params,
            pixels_per_unit,
            bit_diameter_px,
            cross_section,
        })
    }

    pub fn profile(&self) -> &ProfileBitmap {
        &self.profile
    }

    pub fn params(&self) -> &TurningParameters {
        &self.params
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    pub fn bit_diameter_px(&self) -> f64 {
        self.bit_diameter_px
    }

    pub fn cross_section(&self) -> &CrossSectionTable {
        &self.cross_section
    }

    /// Render the cross section the cutter can produce. Stamps are spaced by
    /// the render step, not the sampling step.
    pub fn render(&self) -> TurningResult<ProfileBitmap> {
        let geometry = RenderGeometry {
            width: self.profile.width(),
            height: self.profile.height(),
            pixels_per_unit: self.pixels_per_unit,
            bit_diameter_px: self.bit_diameter_px,
            stock_radius_px: self.params.stock_diameter / 2.0 * self.pixels_per_unit,
        };
        render_as_cut(
            &self.cross_section,
            &self.params.cutter,
            &geometry,
            geometry.render_step_deg(),
        )
    }

    /// Contour of the achievable cross section in physical units
    pub fn boundary(&self) -> TurningResult<BoundaryContour> {
        let as_cut = self.render()?;
        extract_boundary(
            &as_cut,
            self.pixels_per_unit,
            self.params.simplify_tolerance,
        )
    }

    /// Generate the OpenSBP program for this job
    pub fn post_sbp(&self) -> TurningResult<MotionProgram> {
        let program = generate_program(&self.cross_section, &self.params)?;
        info!(
            "Generated OpenSBP program: {} lines, {} passes",
            program.len(),
            self.params.pass_count()
        );
        Ok(program)
    }
}
