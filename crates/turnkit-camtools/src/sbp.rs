//! OpenSBP motion program generation
//!
//! Walks the cross-section table once around the stock at a fixed linear
//! step-over. Each pass indexes the rotary axis, plunges to the contact
//! radius, runs to the far end of the stock while the rotary axis follows the
//! twist, and returns.
//!
//! Axis assignment is configurable, so every multi-axis command goes through
//! [`axis_fields`].

use crate::cross_section::CrossSectionTable;
use crate::error::{ParameterError, TurningResult};
use crate::params::TurningParameters;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Height added above the first sample's radius when pulling up to clear
pub const CLEARANCE: f64 = 0.5;

/// Machine axes, in OpenSBP positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
}

impl Axis {
    /// Positional order used by `M5`/`J5`
    pub const ALL: [Axis; 5] = [Axis::X, Axis::Y, Axis::Z, Axis::A, Axis::B];

    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::A => 3,
            Self::B => 4,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::A => "A",
            Self::B => "B",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Axis {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParameterError::InvalidValue {
                name: "axis".to_string(),
                reason: format!("unknown axis '{}'", s),
            })
    }
}

/// Target positions for a subset of the five axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisValues([Option<f64>; 5]);

impl AxisValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `axis` to `value`
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.0[axis.index()] = Some(value);
        self
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        self.0[axis.index()]
    }
}

/// Format `tag` followed by the X,Y,Z,A,B fields: five decimals for set axes,
/// empty for the rest
pub fn axis_fields(tag: &str, values: &AxisValues) -> String {
    let mut fields = vec![tag.to_string()];
    fields.extend(
        Axis::ALL
            .iter()
            .map(|&axis| values.get(axis).map_or(String::new(), |v| format!("{:.5}", v))),
    );
    fields.join(",")
}

/// One line of an OpenSBP program
#[derive(Debug, Clone, PartialEq)]
pub enum SbpCommand {
    /// Move speeds
    SetSpeeds,
    /// Spindle on
    SpindleOn,
    /// Dwell for the given number of seconds
    Pause(u32),
    /// Jog Z to a clearance height
    JogZ(f64),
    /// Jog several axes at once
    Jog5(AxisValues),
    /// Move a single axis: a rotary step, or a plunge when the axis is Z
    MoveAxis { axis: Axis, value: f64 },
    /// Move several axes at once
    Move5(AxisValues),
}

impl fmt::Display for SbpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetSpeeds => write!(f, "MS,4,,,270 ' Set Speeds"),
            Self::SpindleOn => write!(f, "SO,1,1 ' Spindle on"),
            Self::Pause(seconds) => write!(f, "PAUSE {} ' Spin up", seconds),
            Self::JogZ(z) => write!(f, "JZ,{:.3} ' Pull up to clear", z),
            Self::Jog5(values) => write!(f, "{} ' Jog home", axis_fields("J5", values)),
            Self::MoveAxis { axis, value } => {
                let note = if *axis == Axis::Z { "Plunge" } else { "Step" };
                write!(f, "M{},{:.4} ' {}", axis, value, note)
            }
            Self::Move5(values) => write!(f, "{}", axis_fields("M5", values)),
        }
    }
}

/// A generated OpenSBP program
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProgram {
    commands: Vec<SbpCommand>,
    aborted_at: Option<f64>,
}

impl MotionProgram {
    pub fn commands(&self) -> &[SbpCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// False when pass generation stopped early. The program still ends with
    /// the retract and home moves.
    pub fn is_complete(&self) -> bool {
        self.aborted_at.is_none()
    }

    /// Angle (radians) of the first pass that could not be generated
    pub fn aborted_at(&self) -> Option<f64> {
        self.aborted_at
    }

    /// Program text, one command per line
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.to_string()).collect()
    }

    pub fn to_sbp_string(&self) -> String {
        self.lines().join("\n")
    }

    /// Write the program text to `path`
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> TurningResult<()> {
        let mut text = self.to_sbp_string();
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// A program packaged for hand-off to a job submitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbpJob {
    pub file_name: String,
    pub description: String,
    pub file: String,
}

impl SbpJob {
    pub fn new(program: &MotionProgram) -> Self {
        Self {
            file_name: "turning-machine.sbp".to_string(),
            description: "Indexer project from the universal turning machine".to_string(),
            file: program.to_sbp_string(),
        }
    }
}

/// Generate the motion program for `table`.
pub fn generate_program(
    table: &CrossSectionTable,
    params: &TurningParameters,
) -> TurningResult<MotionProgram> {
    let start_radius = table.first().map_or(0.0, |s| s.r);
    generate_program_with(|theta| table.depth_at(theta), start_radius, params)
}

/// Generate a motion program from any angle → radius lookup.
///
/// A failed lookup stops pass generation; the retract and home moves are
/// still appended and the program is flagged incomplete.
pub fn generate_program_with<F>(
    depth_at: F,
    start_radius: f64,
    params: &TurningParameters,
) -> TurningResult<MotionProgram>
where
    F: Fn(f64) -> TurningResult<f64>,
{
    if !(params.step_over > 0.0 && params.stock_diameter > 0.0) {
        return Err(ParameterError::InvalidValue {
            name: "step_over".to_string(),
            reason: "step-over and stock diameter must be positive".to_string(),
        }
        .into());
    }

    let steps = params.pass_count();
    let angular_step = TAU / steps as f64;
    let linear = params.linear_axis;
    let rotary = params.rotary_axis;
    let clear_z = start_radius + CLEARANCE;
    let home = AxisValues::new().with(linear, 0.0).with(rotary, 0.0);

    let mut commands = Vec::with_capacity(7 + 4 * steps);
    commands.push(SbpCommand::SetSpeeds);
    commands.push(SbpCommand::SpindleOn);
    commands.push(SbpCommand::Pause(3));
    commands.push(SbpCommand::JogZ(clear_z));
    commands.push(SbpCommand::Jog5(home));

    let mut aborted_at = None;
    for i in 0..steps {
        let theta = i as f64 * angular_step;
        let depth = match depth_at(theta) {
            Ok(depth) => depth,
            Err(e) => {
                warn!("Stopping motion program at pass {} of {}: {}", i, steps, e);
                aborted_at = Some(theta);
                break;
            }
        };
        let degrees = theta.to_degrees();

        commands.push(SbpCommand::MoveAxis {
            axis: rotary,
            value: degrees,
        });
        commands.push(SbpCommand::MoveAxis {
            axis: Axis::Z,
            value: depth,
        });
        commands.push(SbpCommand::Move5(
            AxisValues::new()
                .with(linear, params.length)
                .with(rotary, degrees + params.turns * 360.0),
        ));
        commands.push(SbpCommand::Move5(
            AxisValues::new().with(linear, 0.0).with(rotary, degrees),
        ));
    }

    commands.push(SbpCommand::JogZ(clear_z));
    commands.push(SbpCommand::Move5(home));

    debug!(
        "Generated {} commands for {} passes (complete: {})",
        commands.len(),
        steps,
        aborted_at.is_none()
    );
    Ok(MotionProgram {
        commands,
        aborted_at,
    })
}
