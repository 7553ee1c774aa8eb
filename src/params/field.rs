//! Wave-field tuning constants (all distances in field-buffer pixels).

/// Tuning for the field evaluator, color mapper and projector.
///
/// These are not user controls; they shape how the normalized
/// parameters map onto the pixel grid.
#[derive(Debug, Clone)]
pub struct FieldTuning {
    /// Wave number per unit of normalized frequency (radians per pixel)
    /// Formula: k = frequency * this_scale
    pub wave_number_scale: f32,

    /// Wall position as a fraction of field width
    pub wall_fraction: f32,

    /// Half-width of the opaque wall band (pixels)
    pub wall_half_width_px: f32,

    /// Half-height of each slit opening around its source row (pixels)
    pub slit_half_height_px: f32,

    /// Source offset from center at separation = 100, as a fraction of
    /// the relevant field dimension (height in barrier mode, width otherwise)
    pub max_offset_fraction: f32,

    /// Geometric spreading constant c in 1 / (1 + d * c)
    pub attenuation: f32,

    /// Exponent p of the forward emission lobe max(0, cos θ)^p
    pub beam_sharpness: f32,

    /// Amplitude → 0-255 intensity gain for the field surface
    pub field_gain: f32,

    /// Amplitude → 0-255 intensity gain for the projection screen
    pub screen_gain: f32,

    /// Graph trace reach as a fraction of graph width at |amplitude| = 1
    pub graph_reach: f32,

    /// Graph stroke width (pixels)
    pub graph_stroke_px: u32,

    /// Brightest grey level of the "no signal" static
    pub noise_ceiling: f32,

    /// Seed for the "no signal" static
    pub noise_seed: u32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            wave_number_scale: 0.08,
            wall_fraction: 0.15,
            wall_half_width_px: 2.0,
            slit_half_height_px: 2.0,
            max_offset_fraction: 1.0 / 2.5,
            attenuation: 0.005,
            beam_sharpness: 1.5,
            field_gain: 120.0,
            screen_gain: 200.0,
            graph_reach: 0.8,
            graph_stroke_px: 2,
            noise_ceiling: 10.0,
            noise_seed: 7,
        }
    }
}

impl FieldTuning {
    /// Wave number for a normalized frequency
    pub fn wave_number(&self, frequency: f32) -> f32 {
        frequency * self.wave_number_scale
    }
}

/// Fixed pixel colors that bypass the palette
pub mod colors {
    /// Opaque wall material
    pub const WALL: [u8; 4] = [20, 20, 25, 255];

    /// Projection screen with the laser off
    pub const SCREEN_OFF: [u8; 4] = [5, 5, 5, 255];

    /// Graph trace for the laser-red theme
    pub const GRAPH_RED: [u8; 4] = [255, 51, 51, 255];

    /// Graph trace for every other theme
    pub const GRAPH_YELLOW: [u8; 4] = [255, 255, 0, 255];

    /// Graph background (fully transparent, composited over the field)
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}
