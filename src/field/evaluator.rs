//! Per-pixel superposition of the two sources.
//!
//! Steady-state closed form: each pixel depends only on the parameters
//! and the clock, never on neighbours or previous frames.

use glam::Vec2;

use super::sources::{wall_x, SourcePair};
use super::{FieldBuffer, FieldSample, IntensityProfile};
use crate::params::{FieldTuning, WaveParams};

/// Frame-local constants for evaluating one field
#[derive(Debug, Clone)]
pub struct WaveSetup {
    pub sources: SourcePair,
    /// Wall x-coordinate, present in barrier mode only
    pub wall_x: Option<f32>,
    /// Wave number (radians per pixel)
    pub k: f32,
    /// Phase offset of the second source (radians)
    pub phase: f32,
    /// Clock value (radians)
    pub t: f32,
    wall_half_width: f32,
    slit_half_height: f32,
    attenuation: f32,
    beam_sharpness: f32,
}

impl WaveSetup {
    pub fn new(params: &WaveParams, tuning: &FieldTuning, width: u32, height: u32, t: f32) -> Self {
        Self {
            sources: SourcePair::place(params, tuning, width, height),
            wall_x: params.barrier_mode.then(|| wall_x(tuning, width)),
            k: tuning.wave_number(params.frequency),
            phase: params.phase_rad(),
            t,
            wall_half_width: tuning.wall_half_width_px,
            slit_half_height: tuning.slit_half_height_px,
            attenuation: tuning.attenuation,
            beam_sharpness: tuning.beam_sharpness,
        }
    }

    /// Evaluate one sample point
    pub fn sample(&self, x: f32, y: f32) -> FieldSample {
        if let Some(wall_x) = self.wall_x {
            if self.is_wall(x, y, wall_x) {
                return FieldSample::Wall;
            }
            if x < wall_x {
                // Incident plane wave before the slits
                return FieldSample::Amplitude(((x - wall_x) * self.k - self.t).sin());
            }
        }

        let point = Vec2::new(x, y);
        FieldSample::Amplitude(
            self.contribution(self.sources.first, point, 0.0)
                + self.contribution(self.sources.second, point, self.phase),
        )
    }

    /// Single-source term: sin(d·k − t + φ) · attenuation(d) · envelope(θ)
    pub fn contribution(&self, source: Vec2, point: Vec2, phase: f32) -> f32 {
        let offset = point - source;
        let distance = offset.length();
        let attenuation = 1.0 / (1.0 + distance * self.attenuation);

        // cos(θ) from the forward (+x) axis; a zero-length offset counts as θ = 0
        let cos_angle = if distance > f32::EPSILON {
            offset.x / distance
        } else {
            1.0
        };
        let envelope = cos_angle.max(0.0).powf(self.beam_sharpness);

        (distance * self.k - self.t + phase).sin() * attenuation * envelope
    }

    fn is_wall(&self, x: f32, y: f32, wall_x: f32) -> bool {
        (x - wall_x).abs() < self.wall_half_width
            && (y - self.sources.first.y).abs() > self.slit_half_height
            && (y - self.sources.second.y).abs() > self.slit_half_height
    }
}

/// Fill every sample of `field` and capture its rightmost column into `profile`
pub fn evaluate(field: &mut FieldBuffer, profile: &mut IntensityProfile, setup: &WaveSetup) {
    let width = field.width();
    let height = field.height();
    profile.reset(height as usize);
    if width == 0 {
        return;
    }

    for (row, samples) in field
        .samples_mut()
        .chunks_exact_mut(width as usize)
        .enumerate()
    {
        let y = row as f32;
        for (column, sample) in samples.iter_mut().enumerate() {
            *sample = setup.sample(column as f32, y);
        }
        if let Some(last) = samples.last() {
            profile.set(row, last.amplitude());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColorTheme;

    const EPS: f32 = 1e-5;

    fn free_params(separation: f32) -> WaveParams {
        WaveParams {
            separation,
            barrier_mode: false,
            ..WaveParams::default()
        }
    }

    fn render(params: &WaveParams, width: u32, height: u32, t: f32) -> (FieldBuffer, IntensityProfile) {
        let tuning = FieldTuning::default();
        let mut field = FieldBuffer::new(width, height);
        let mut profile = IntensityProfile::default();
        let setup = WaveSetup::new(params, &tuning, width, height, t);
        evaluate(&mut field, &mut profile, &setup);
        (field, profile)
    }

    #[test]
    fn test_amplitude_is_sum_of_single_sources() {
        let tuning = FieldTuning::default();
        let params = WaveParams {
            phase_deg: 45.0,
            ..free_params(40.0)
        };
        let setup = WaveSetup::new(&params, &tuning, 320, 200, 1.3);

        for &(x, y) in &[(10.0, 20.0), (160.0, 100.0), (300.0, 7.0), (250.0, 180.0)] {
            let point = Vec2::new(x, y);
            let expected = setup.contribution(setup.sources.first, point, 0.0)
                + setup.contribution(setup.sources.second, point, setup.phase);
            assert_eq!(setup.sample(x, y), FieldSample::Amplitude(expected));
        }
    }

    #[test]
    fn test_symmetric_about_source_axis() {
        // Sources on row 100; rows 100 ± dy mirror each other at phase 0
        let (field, _) = render(&free_params(30.0), 320, 200, 0.7);
        for dy in [1, 13, 40, 99] {
            for x in [0, 90, 161, 319] {
                let above = field.sample(x, 100 - dy).amplitude();
                let below = field.sample(x, 100 + dy).amplitude();
                assert!((above - below).abs() < EPS, "x={} dy={}", x, dy);
            }
        }
    }

    #[test]
    fn test_phase_full_turn_is_identical() {
        let a = WaveParams {
            phase_deg: 0.0,
            ..WaveParams::default()
        };
        let b = WaveParams {
            phase_deg: 360.0,
            ..a
        };
        let (field_a, profile_a) = render(&a, 200, 120, 2.0);
        let (field_b, profile_b) = render(&b, 200, 120, 2.0);

        for y in 0..120 {
            for x in 0..200 {
                assert_eq!(field_a.sample(x, y), field_b.sample(x, y));
            }
        }
        assert_eq!(profile_a.values(), profile_b.values());
    }

    #[test]
    fn test_coincident_sources_double_single_source() {
        let tuning = FieldTuning::default();
        let params = free_params(0.0);
        let setup = WaveSetup::new(&params, &tuning, 240, 160, 0.4);

        for y in (0..160).step_by(7) {
            for x in (0..240).step_by(11) {
                let point = Vec2::new(x as f32, y as f32);
                let single = setup.contribution(setup.sources.first, point, 0.0);
                let value = setup.sample(x as f32, y as f32).amplitude();
                assert!((value - 2.0 * single).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_degenerate_distance_is_finite() {
        let tuning = FieldTuning::default();
        let params = free_params(0.0);
        let setup = WaveSetup::new(&params, &tuning, 100, 100, 0.0);
        let source = setup.sources.first;

        let value = setup.contribution(source, source, 0.0);
        assert!(value.is_finite());
        assert!(setup.sample(source.x, source.y).amplitude().is_finite());
    }

    #[test]
    fn test_wall_band_and_slits() {
        let tuning = FieldTuning::default();
        let params = WaveParams::default();
        // wall at 0.15 * 400 = 60, sources at rows 100 ∓ 40
        let setup = WaveSetup::new(&params, &tuning, 400, 200, 0.0);

        assert_eq!(setup.sample(60.0, 0.0), FieldSample::Wall);
        assert_eq!(setup.sample(61.0, 100.0), FieldSample::Wall);
        assert_ne!(setup.sample(60.0, 60.0), FieldSample::Wall);
        assert_ne!(setup.sample(60.0, 141.0), FieldSample::Wall);
        assert_ne!(setup.sample(63.0, 0.0), FieldSample::Wall);
    }

    #[test]
    fn test_plane_wave_left_of_wall() {
        let tuning = FieldTuning::default();
        let params = WaveParams::default();
        let setup = WaveSetup::new(&params, &tuning, 400, 200, 0.25);

        let wall_x = setup.wall_x.expect("barrier mode places a wall");
        let expected = ((10.0 - wall_x) * setup.k - 0.25).sin();
        assert_eq!(setup.sample(10.0, 3.0), FieldSample::Amplitude(expected));
        // Plane wave does not depend on the row
        assert_eq!(setup.sample(10.0, 3.0), setup.sample(10.0, 177.0));
    }

    #[test]
    fn test_profile_matches_last_column() {
        let (field, profile) = render(&WaveParams::default(), 300, 150, 0.9);
        assert_eq!(profile.len(), 150);
        for y in 0..150 {
            assert_eq!(profile.values()[y as usize], field.sample(299, y).amplitude());
        }
    }

    #[test]
    fn test_wider_separation_gives_denser_fringes() {
        let narrow = WaveParams {
            separation: 10.0,
            frequency: 5.0,
            ..WaveParams::default()
        };
        let wide = WaveParams {
            separation: 90.0,
            ..narrow
        };
        let (_, narrow_profile) = render(&narrow, 600, 400, 0.0);
        let (_, wide_profile) = render(&wide, 600, 400, 0.0);

        assert!(
            wide_profile.sign_changes() > narrow_profile.sign_changes(),
            "wide {} vs narrow {}",
            wide_profile.sign_changes(),
            narrow_profile.sign_changes()
        );
    }

    #[test]
    fn test_constructive_interference_on_center_row() {
        let params = WaveParams {
            frequency: 10.0,
            separation: 50.0,
            phase_deg: 0.0,
            barrier_mode: true,
            torch_on: true,
            color_theme: ColorTheme::Grayscale,
        };
        let tuning = FieldTuning::default();
        let setup = WaveSetup::new(&params, &tuning, 800, 400, 0.0);

        let y = setup.sources.mid_row();
        let x = 120.0 + 380.0;
        let point = Vec2::new(x, y);
        let first = setup.contribution(setup.sources.first, point, 0.0);
        let second = setup.contribution(setup.sources.second, point, 0.0);
        let value = setup.sample(x, y).amplitude();

        assert!((first - second).abs() < EPS);
        assert!((value.abs() - (first.abs() + second.abs())).abs() < EPS);
    }
}
