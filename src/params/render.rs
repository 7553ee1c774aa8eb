//! Rendering, frame-loop and recording configuration.

use std::path::PathBuf;

/// Smallest field resolution scale the pipeline will use
const MIN_RESOLUTION_SCALE: f32 = 0.01;

/// What happens to the time accumulator when the parameters change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimePolicy {
    /// Restart the clock at 0: a given parameter set always starts from the same frame
    #[default]
    Reset,

    /// Keep the clock running: no visual phase jump on parameter changes
    Continue,
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,

    /// Field buffer size relative to the viewport (linear factor)
    /// 0.5 = half width, half height = quarter pixel count
    pub resolution_scale: f32,

    /// Projection screen strip width (pixels, native resolution)
    pub screen_width_px: u32,

    /// Intensity graph width (pixels, native resolution)
    pub graph_width_px: u32,

    /// Time accumulator advance per rendered frame (radians)
    pub time_step: f32,

    /// Clock behaviour across parameter changes
    pub time_policy: TimePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            resolution_scale: 0.5,
            screen_width_px: 50,
            graph_width_px: 180,
            time_step: 0.05,
            time_policy: TimePolicy::Reset,
        }
    }
}

impl RenderConfig {
    /// Resolution scale actually applied to the field buffer.
    ///
    /// Both buffer sizing and row mapping for the screen and graph go
    /// through this, so they always agree.
    pub fn effective_scale(&self) -> f32 {
        if self.resolution_scale.is_nan() {
            return Self::default().resolution_scale;
        }
        self.resolution_scale.clamp(MIN_RESOLUTION_SCALE, 1.0)
    }

    /// Field buffer dimensions for a viewport (floor of the scaled size)
    pub fn field_size(&self, viewport: (u32, u32)) -> (u32, u32) {
        let scale = self.effective_scale();
        (
            (viewport.0 as f32 * scale).floor() as u32,
            (viewport.1 as f32 * scale).floor() as u32,
        )
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,

    /// Viewport the frames are rendered at (pixels)
    pub viewport: (u32, u32),
}

impl RecordingConfig {
    pub fn new(duration_secs: f32, output_dir: impl Into<PathBuf>, viewport: (u32, u32)) -> Self {
        Self {
            duration_secs,
            output_dir: output_dir.into(),
            fps: 60,
            viewport,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of a single numbered frame
    pub fn frame_path(&self, frame_num: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame_num))
    }
}
