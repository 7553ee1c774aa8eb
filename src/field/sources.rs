//! Placement of the two coherent sources.

use glam::Vec2;

use crate::params::{FieldTuning, WaveParams};

/// Positions of the two emitters in field-buffer pixels.
///
/// Recomputed from the parameters every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePair {
    pub first: Vec2,
    pub second: Vec2,
}

impl SourcePair {
    /// Place the sources for a field of `width` x `height` pixels.
    ///
    /// Barrier mode: both sit on the wall line, spread vertically around
    /// the center row. Free mode: both sit on the center row, spread
    /// horizontally around the center column.
    pub fn place(params: &WaveParams, tuning: &FieldTuning, width: u32, height: u32) -> Self {
        let size = Vec2::new(width as f32, height as f32);
        let center = size / 2.0;
        let spread = params.separation / 100.0 * tuning.max_offset_fraction;

        if params.barrier_mode {
            let wall_x = wall_x(tuning, width);
            let offset = spread * size.y;
            Self {
                first: Vec2::new(wall_x, center.y - offset),
                second: Vec2::new(wall_x, center.y + offset),
            }
        } else {
            let offset = spread * size.x;
            Self {
                first: Vec2::new(center.x - offset, center.y),
                second: Vec2::new(center.x + offset, center.y),
            }
        }
    }

    /// Row halfway between the two sources
    pub fn mid_row(&self) -> f32 {
        (self.first.y + self.second.y) / 2.0
    }
}

/// Wall x-coordinate for a field of the given width
pub fn wall_x(tuning: &FieldTuning, width: u32) -> f32 {
    width as f32 * tuning.wall_fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrier_sources_on_wall_symmetric() {
        let tuning = FieldTuning::default();
        let params = WaveParams::default();
        let pair = SourcePair::place(&params, &tuning, 800, 400);

        assert!((pair.first.x - 120.0).abs() < 1e-4);
        assert_eq!(pair.first.x, pair.second.x);
        // separation 50 → 0.5 * 400 / 2.5 = 80 px each side
        assert!((pair.first.y - 120.0).abs() < 1e-4);
        assert!((pair.second.y - 280.0).abs() < 1e-4);
        assert!((pair.mid_row() - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_free_sources_centered_horizontally() {
        let tuning = FieldTuning::default();
        let params = WaveParams {
            barrier_mode: false,
            separation: 100.0,
            ..WaveParams::default()
        };
        let pair = SourcePair::place(&params, &tuning, 500, 300);

        assert_eq!(pair.first.y, 150.0);
        assert_eq!(pair.second.y, 150.0);
        assert!((pair.first.x - 50.0).abs() < 1e-4);
        assert!((pair.second.x - 450.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_separation_coincides() {
        let tuning = FieldTuning::default();
        let params = WaveParams {
            barrier_mode: false,
            separation: 0.0,
            ..WaveParams::default()
        };
        let pair = SourcePair::place(&params, &tuning, 640, 360);
        assert_eq!(pair.first, pair.second);
    }
}
