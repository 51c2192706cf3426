//! Error types for the turning toolpath engine.
//!
//! This module provides structured error types for profile loading,
//! parameter validation and cross-section lookups.

use std::io;
use thiserror::Error;

/// Errors that can occur while computing a turning toolpath.
#[derive(Error, Debug)]
pub enum TurningError {
    /// No pixel of the profile reaches the opacity threshold, so the
    /// pixels-per-unit scale is undefined.
    #[error("Profile has no opaque pixels at or above opacity {threshold}")]
    EmptyProfile { threshold: u8 },

    /// A cross-section lookup fell outside the sampled range.
    #[error("No cross-section sample covers angle {theta} rad")]
    Lookup { theta: f64 },

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The profile image could not be decoded or encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors related to turning parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Result type alias for turning operations.
pub type TurningResult<T> = Result<T, TurningError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turning_error_display() {
        let err = TurningError::EmptyProfile { threshold: 128 };
        assert_eq!(
            err.to_string(),
            "Profile has no opaque pixels at or above opacity 128"
        );

        let err = TurningError::Lookup { theta: 1.5 };
        assert_eq!(err.to_string(), "No cross-section sample covers angle 1.5 rad");
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "step_over".to_string(),
            value: -1.0,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'step_over' out of range: -1 (valid: 0..1)"
        );

        let err = ParameterError::Incompatible("linear and rotary axis are both B".to_string());
        assert_eq!(
            err.to_string(),
            "Incompatible parameters: linear and rotary axis are both B"
        );
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidValue {
            name: "bit_diameter".to_string(),
            reason: "must be positive".to_string(),
        };
        let err: TurningError = param_err.into();
        assert!(matches!(err, TurningError::Parameter(_)));

        let io_err = io::Error::new(io::ErrorKind::NotFound, "profile.png");
        let err: TurningError = io_err.into();
        assert!(matches!(err, TurningError::Io(_)));
    }
}
