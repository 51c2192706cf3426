//! Turning job parameters.
//!
//! All lengths are in the job's physical unit (inches for the OpenSBP
//! output this crate produces). Angles are in degrees unless noted.

use crate::cutter::CutterShape;
use crate::error::{ParameterError, ParameterResult};
use crate::sbp::Axis;
use serde::{Deserialize, Serialize};

/// Parameters for a rotary turning job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurningParameters {
    /// Diameter of the cutter
    pub bit_diameter: f64,
    /// Diameter of the round stock; Z zero is the stock axis
    pub stock_diameter: f64,
    /// Number of turns the cross section makes over the length (signed, can be fractional)
    pub turns: f64,
    /// Length of the stock along the linear axis
    pub length: f64,
    /// Axis that runs along the stock
    pub linear_axis: Axis,
    /// Axis that rotates the stock
    pub rotary_axis: Axis,
    /// Angular step between cross-section samples (degrees)
    pub angular_step_deg: f64,
    /// Linear step-over at the stock surface between passes
    pub step_over: f64,
    /// Opacity at or above which a profile pixel counts as material
    pub opacity_threshold: u8,
    /// Boundary simplification tolerance
    pub simplify_tolerance: f64,
    /// Cutter silhouette used for simulation and rendering
    pub cutter: CutterShape,
}

impl Default for TurningParameters {
    fn default() -> Self {
        Self {
            bit_diameter: 0.125,
            stock_diameter: 1.0,
            turns: 0.0,
            length: 6.0,
            linear_axis: Axis::Y,
            rotary_axis: Axis::B,
            angular_step_deg: 0.5,
            step_over: 0.005,
            opacity_threshold: 128,
            simplify_tolerance: 0.005,
            cutter: CutterShape::BallNose,
        }
    }
}

impl TurningParameters {
    /// Number of passes around the stock at the configured step-over
    pub fn pass_count(&self) -> usize {
        (std::f64::consts::PI * self.stock_diameter / self.step_over).ceil() as usize
    }

    /// Validate the parameters
    pub fn validate(&self) -> ParameterResult<()> {
        positive("bit_diameter", self.bit_diameter)?;
        positive("stock_diameter", self.stock_diameter)?;
        positive("length", self.length)?;
        positive("step_over", self.step_over)?;
        positive("simplify_tolerance", self.simplify_tolerance)?;

        if !self.turns.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "turns".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        if !(self.angular_step_deg > 0.0 && self.angular_step_deg <= 90.0) {
            return Err(ParameterError::OutOfRange {
                name: "angular_step_deg".to_string(),
                value: self.angular_step_deg,
                min: 0.0,
                max: 90.0,
            });
        }

        if self.bit_diameter >= self.stock_diameter {
            return Err(ParameterError::Incompatible(format!(
                "bit diameter {} must be smaller than stock diameter {}",
                self.bit_diameter, self.stock_diameter
            )));
        }

        if self.linear_axis == self.rotary_axis {
            return Err(ParameterError::Incompatible(format!(
                "linear and rotary axis are both {}",
                self.linear_axis
            )));
        }

        for (name, axis) in [
            ("linear_axis", self.linear_axis),
            ("rotary_axis", self.rotary_axis),
        ] {
            if axis == Axis::Z {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: "Z is reserved for the plunge".to_string(),
                });
            }
        }

        self.cutter.validate()?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> ParameterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must be a positive number, got {}", value),
        })
    }
}
