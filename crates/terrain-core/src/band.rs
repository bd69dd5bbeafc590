//! Discrete color tiers for contribution counts.
//!
//! The same banding drives the 2D heatmap legend and the 3D terrain, so a
//! day's color is always derived from its count here rather than taken from
//! whatever the remote source reported.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of five fixed color tiers, lowest activity first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    None,
    Low,
    Medium,
    High,
    Peak,
}

impl ColorBand {
    pub const ALL: [ColorBand; 5] = [
        ColorBand::None,
        ColorBand::Low,
        ColorBand::Medium,
        ColorBand::High,
        ColorBand::Peak,
    ];

    /// Band for a daily contribution count. Total over `u32` and monotonic
    /// non-decreasing.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => ColorBand::None,
            1..=3 => ColorBand::Low,
            4..=7 => ColorBand::Medium,
            8..=11 => ColorBand::High,
            _ => ColorBand::Peak,
        }
    }

    /// 1-based tier number.
    pub fn level(self) -> u8 {
        self as u8 + 1
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorBand::None => "#161b22",
            ColorBand::Low => "#0e4429",
            ColorBand::Medium => "#26a641",
            ColorBand::High => "#39d353",
            ColorBand::Peak => "#006d32",
        }
    }

    /// Linear RGB in `[0, 1]`, for instanced color buffers.
    pub fn rgb(self) -> [f32; 3] {
        let hex = &self.hex()[1..];
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_or(0.0, |v| f32::from(v) / 255.0)
        };
        [channel(0), channel(2), channel(4)]
    }

    /// Legend label for the count range this band covers.
    pub fn range_label(self) -> &'static str {
        match self {
            ColorBand::None => "0",
            ColorBand::Low => "1-3",
            ColorBand::Medium => "4-7",
            ColorBand::High => "8-11",
            ColorBand::Peak => "12+",
        }
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}
