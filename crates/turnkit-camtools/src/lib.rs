//! # Turnkit CAM Tools
//!
//! Toolpath engine for rotary (4th axis) turning. A cross-section profile
//! image is swept around the stock axis; the cutter is simulated against the
//! rotated profile at every angle step to find how deep it can plunge, and the
//! resulting table drives both the machine program and a preview of the
//! achievable cross section.
//!
//! ## Pipeline
//!
//! - **Profile**: Load the cross section and detect its diameter in pixels
//! - **Simulator**: Binary search for the cutter contact depth
//! - **Cross Section**: Sample every angle and interpolate between samples
//! - **Render**: Replay the cutter to produce the as-cut cross section
//! - **Boundary**: Trace and simplify the as-cut contour
//! - **SBP**: Emit the OpenSBP motion program
//!
//! [`TurningMachine`] runs the whole pipeline for one profile.

pub mod boundary;
pub mod cross_section;
pub mod cutter;
pub mod demo_profiles;
pub mod error;
pub mod machine;
pub mod params;
pub mod profile;
pub mod render;
pub mod sbp;
pub mod simplify;
pub mod simulator;

// Re-export commonly used items
pub use boundary::{extract_boundary, BoundaryContour, BoundaryPoint, WalkTermination};
pub use cross_section::{sample_cross_section, CrossSectionSample, CrossSectionTable};
pub use cutter::{CutterShape, CutterSilhouette};
pub use demo_profiles::DemoProfile;
pub use error::{ParameterError, ParameterResult, TurningError, TurningResult};
pub use machine::TurningMachine;
pub use params::TurningParameters;
pub use profile::ProfileBitmap;
pub use render::{render_as_cut, RenderGeometry};
pub use sbp::{generate_program, Axis, MotionProgram, SbpCommand, SbpJob};
pub use simulator::{solve_depth, DepthSearch};
