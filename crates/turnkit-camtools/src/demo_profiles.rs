//! Built-in demonstration profiles
//!
//! The classic turning demos, drawn on a square canvas around the stock axis.

use crate::error::{ParameterError, ParameterResult};
use crate::profile::ProfileBitmap;
use image::{GrayImage, Luma};
use std::fmt;
use std::str::FromStr;

/// Canvas size used by the demo profiles
pub const DEMO_CANVAS_SIZE: u32 = 400;

/// Built-in demo profile shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoProfile {
    /// Two overlapping disks above and below the axis
    Helix,
    /// A single disk offset above the axis
    Twist,
    /// A 200px square
    Square,
    /// A 200x20px bar through the axis
    Corkscrew,
    /// A single disk centered on the axis
    Disk,
}

impl DemoProfile {
    /// All demo profiles
    pub const ALL: [DemoProfile; 5] = [
        DemoProfile::Helix,
        DemoProfile::Twist,
        DemoProfile::Square,
        DemoProfile::Corkscrew,
        DemoProfile::Disk,
    ];

    /// Draw this profile on a `width` x `height` canvas
    pub fn render(&self, width: u32, height: u32, threshold: u8) -> ProfileBitmap {
        let cx = (width / 2) as i64;
        let cy = (height / 2) as i64;

        let inside = |x: i64, y: i64| -> bool {
            let disk = |ox: i64, oy: i64, r: i64| {
                let dx = x - ox;
                let dy = y - oy;
                dx * dx + dy * dy <= r * r
            };
            let rect = |left: i64, top: i64, w: i64, h: i64| {
                x >= left && x < left + w && y >= top && y < top + h
            };
            match self {
                Self::Helix => disk(cx, cy - 50, 55) || disk(cx, cy + 50, 55),
                Self::Twist => disk(cx, cy - 50, 55),
                Self::Square => rect(cx - 100, cy - 100, 200, 200),
                Self::Corkscrew => rect(cx - 100, cy - 10, 200, 20),
                Self::Disk => disk(cx, cy, 55),
            }
        };

        let image = GrayImage::from_fn(width, height, |x, y| {
            if inside(x as i64, y as i64) {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        ProfileBitmap::new(image, threshold)
    }

    /// Draw this profile on the standard demo canvas
    pub fn bitmap(&self) -> ProfileBitmap {
        self.render(DEMO_CANVAS_SIZE, DEMO_CANVAS_SIZE, 128)
    }
}

impl fmt::Display for DemoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Helix => write!(f, "helix"),
            Self::Twist => write!(f, "twist"),
            Self::Square => write!(f, "square"),
            Self::Corkscrew => write!(f, "corkscrew"),
            Self::Disk => write!(f, "disk"),
        }
    }
}

impl FromStr for DemoProfile {
    type Err = ParameterError;

    fn from_str(s: &str) -> ParameterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParameterError::InvalidValue {
                name: "profile".to_string(),
                reason: format!("unknown demo profile '{}'", s),
            })
    }
}
