//! # Turnkit
//!
//! Rotary (4th axis) turning toolpaths from a cross-section profile image.
//!
//! ## Architecture
//!
//! Turnkit is organized as a workspace with multiple crates:
//!
//! 1. **turnkit-camtools** - Profile loading, cutter simulation, cross-section
//!    sampling, as-cut rendering, contour extraction, OpenSBP output
//! 2. **turnkit-settings** - Job configuration persisted as JSON or TOML
//! 3. **turnkit** - Main binary that integrates all crates

use std::path::Path;
use turnkit_camtools::demo_profiles::DEMO_CANVAS_SIZE;

pub use turnkit_camtools::{
    Axis, BoundaryContour, BoundaryPoint, CrossSectionSample, CrossSectionTable, CutterShape,
    DemoProfile, MotionProgram, ParameterError, ProfileBitmap, SbpJob, TurningError,
    TurningMachine, TurningParameters, TurningResult,
};
pub use turnkit_settings::{Config, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Prefix selecting a built-in profile instead of an image file
pub const DEMO_PREFIX: &str = "demo:";

/// Load a profile from an image path, or a built-in one written as
/// `demo:<name>`
pub fn load_profile(source: &str, threshold: u8) -> TurningResult<ProfileBitmap> {
    match source.strip_prefix(DEMO_PREFIX) {
        Some(name) => {
            let demo: DemoProfile = name.parse()?;
            Ok(demo.render(DEMO_CANVAS_SIZE, DEMO_CANVAS_SIZE, threshold))
        }
        None => ProfileBitmap::from_file(Path::new(source), threshold),
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output (stderr) with pretty formatting
/// - RUST_LOG environment variable support
/// - `verbose` lowers the default level from INFO to DEBUG
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
