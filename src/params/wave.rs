//! Simulation parameters owned by the UI layer and read once per frame.

use std::fmt;
use std::ops::RangeInclusive;

/// Valid slit/source separation (normalized, 0 = coincident sources)
pub const SEPARATION_RANGE: RangeInclusive<f32> = 0.0..=100.0;

/// Valid drive frequency (normalized units, scaled to a wave number downstream)
pub const FREQUENCY_RANGE: RangeInclusive<f32> = 1.0..=20.0;

/// Valid phase offset of source 2 (degrees)
pub const PHASE_RANGE: RangeInclusive<f32> = 0.0..=360.0;

/// Color palette used for the field and the projection screen.
///
/// Closed set: every palette is a pure function of the amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ColorTheme {
    #[default]
    LaserRed,
    LaserGreen,
    CyanMagenta,
    GoldenFire,
    ElectricBlue,
    Sunset,
    Rainbow,
    Grayscale,
}

impl ColorTheme {
    /// All themes in selector order
    pub const ALL: [ColorTheme; 8] = [
        ColorTheme::LaserRed,
        ColorTheme::LaserGreen,
        ColorTheme::CyanMagenta,
        ColorTheme::GoldenFire,
        ColorTheme::ElectricBlue,
        ColorTheme::Sunset,
        ColorTheme::Rainbow,
        ColorTheme::Grayscale,
    ];

    /// Stable string tag (as used on the command line)
    pub fn tag(self) -> &'static str {
        match self {
            ColorTheme::LaserRed => "laser-red",
            ColorTheme::LaserGreen => "laser-green",
            ColorTheme::CyanMagenta => "cyan-magenta",
            ColorTheme::GoldenFire => "golden-fire",
            ColorTheme::ElectricBlue => "electric-blue",
            ColorTheme::Sunset => "sunset",
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Grayscale => "grayscale",
        }
    }

    /// Parse a string tag, `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.tag() == tag)
    }

    /// Next theme in selector order (wraps)
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous theme in selector order (wraps)
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Immutable per-frame snapshot of the interference controls.
///
/// Captured once before a frame starts; the renderer only reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Source spacing (normalized 0-100)
    pub separation: f32,

    /// Drive rate (normalized 1-20)
    pub frequency: f32,

    /// Phase offset of source 2 (degrees, 0-360)
    pub phase_deg: f32,

    /// true = wall with two slits lit by a plane wave, false = free point-source pair
    pub barrier_mode: bool,

    /// Master enable; false renders the "no signal" state
    pub torch_on: bool,

    /// Palette for field and screen
    pub color_theme: ColorTheme,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            separation: 50.0,
            frequency: 10.0,
            phase_deg: 0.0,
            barrier_mode: true,
            torch_on: true,
            color_theme: ColorTheme::LaserRed,
        }
    }
}

impl WaveParams {
    /// Clamp every numeric field into its declared range.
    ///
    /// NaN inputs fall back to the range minimum.
    pub fn clamped(self) -> Self {
        Self {
            separation: clamp_range(self.separation, &SEPARATION_RANGE),
            frequency: clamp_range(self.frequency, &FREQUENCY_RANGE),
            phase_deg: clamp_range(self.phase_deg, &PHASE_RANGE),
            ..self
        }
    }

    /// Phase offset in radians, normalized so 0° and 360° are identical
    pub fn phase_rad(&self) -> f32 {
        self.phase_deg.rem_euclid(360.0).to_radians()
    }

    /// Short human-readable summary (window title, log lines)
    pub fn summary(&self) -> String {
        if !self.torch_on {
            return format!("laser off | {}", self.color_theme);
        }
        format!(
            "sep {:.0} | freq {:.0} | phase {:.0}° | {} | {}",
            self.separation,
            self.frequency,
            self.phase_deg,
            if self.barrier_mode { "double slit" } else { "free sources" },
            self.color_theme
        )
    }
}

fn clamp_range(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}
