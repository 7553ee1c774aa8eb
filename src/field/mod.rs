//! Wave field buffer, source placement and per-pixel evaluation.

mod evaluator;
mod sources;

pub use evaluator::{evaluate, WaveSetup};
pub use sources::{wall_x, SourcePair};

use crate::palette;
use crate::params::{colors, ColorTheme};
use crate::surface::Surface;

/// Classification of one field sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSample {
    /// Opaque barrier material; drawn in a fixed color, never palette-mapped
    Wall,

    /// Superposed wave amplitude
    Amplitude(f32),
}

impl FieldSample {
    /// Amplitude value, with walls reading as zero
    pub fn amplitude(self) -> f32 {
        match self {
            FieldSample::Wall => 0.0,
            FieldSample::Amplitude(value) => value,
        }
    }
}

/// Low-resolution grid of wave samples plus its rendered colors.
///
/// Logically one frame long; the allocations are reused.
#[derive(Debug, Clone, Default)]
pub struct FieldBuffer {
    samples: Vec<FieldSample>,
    surface: Surface,
}

impl FieldBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            samples: vec![FieldSample::Amplitude(0.0); (width as usize) * (height as usize)],
            surface: Surface::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Resize in place. Returns true if the dimensions changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.surface.resize(width, height) {
            return false;
        }
        self.samples.resize(
            (width as usize) * (height as usize),
            FieldSample::Amplitude(0.0),
        );
        true
    }

    /// Rendered colors
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn sample(&self, x: u32, y: u32) -> FieldSample {
        self.samples[y as usize * self.width() as usize + x as usize]
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [FieldSample] {
        &mut self.samples
    }

    /// Paint every sample through the palette; walls get the fixed wall color
    pub fn colorize(&mut self, theme: ColorTheme, gain: f32) {
        for (pixel, sample) in self.surface.pixels_mut().iter_mut().zip(&self.samples) {
            *pixel = match *sample {
                FieldSample::Wall => colors::WALL,
                FieldSample::Amplitude(value) => palette::map(theme, value, gain),
            };
        }
    }

    /// Overwrite samples and colors with grey static.
    ///
    /// `level` returns a brightness in [0, 1) for each pixel; samples hold
    /// the equivalent amplitude so they stay below `ceiling / gain`.
    pub fn fill_static(&mut self, ceiling: f32, gain: f32, mut level: impl FnMut(u32, u32) -> f32) {
        let width = self.width();
        let pixels = self.surface.pixels_mut();
        for (index, (pixel, sample)) in pixels.iter_mut().zip(self.samples.iter_mut()).enumerate() {
            let x = (index % width.max(1) as usize) as u32;
            let y = (index / width.max(1) as usize) as u32;
            let grey = (level(x, y).clamp(0.0, 1.0) * ceiling).min(ceiling - 1.0).max(0.0);
            let value = grey.floor() as u8;
            *pixel = [value, value, value, 255];
            *sample = FieldSample::Amplitude(value as f32 / gain);
        }
    }
}

/// One amplitude per field row, taken from the rightmost column.
///
/// Drives both the projection screen and the intensity graph.
#[derive(Debug, Clone, Default)]
pub struct IntensityProfile {
    values: Vec<f32>,
}

impl IntensityProfile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Resize to `rows` entries and zero everything
    pub fn reset(&mut self, rows: usize) {
        self.values.clear();
        self.values.resize(rows, 0.0);
    }

    pub(crate) fn set(&mut self, row: usize, value: f32) {
        self.values[row] = value;
    }

    /// Amplitude for a native-resolution row, nearest-neighbor mapped
    /// through the field resolution scale
    pub fn at_scaled_row(&self, row: u32, resolution_scale: f32) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let source = (row as f32 * resolution_scale).floor().max(0.0) as usize;
        self.values[source.min(self.values.len() - 1)]
    }

    /// Number of strict sign changes along the profile (zeros skipped)
    pub fn sign_changes(&self) -> usize {
        let mut previous: Option<bool> = None;
        let mut changes = 0;
        for &value in &self.values {
            if value == 0.0 || value.is_nan() {
                continue;
            }
            let positive = value > 0.0;
            if let Some(prev) = previous {
                if prev != positive {
                    changes += 1;
                }
            }
            previous = Some(positive);
        }
        changes
    }
}
