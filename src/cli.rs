//! Command-line argument parsing.

use clap::Parser;

use wavelab::params::{ColorTheme, RecordingConfig, RenderConfig, TimePolicy, WaveParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavelab")]
#[command(about = "Real-time double-slit wave interference", long_about = None)]
pub struct Args {
    /// Slit/source separation (0-100)
    #[arg(long, default_value_t = 50.0)]
    pub separation: f32,

    /// Drive frequency (1-20)
    #[arg(long, default_value_t = 10.0)]
    pub frequency: f32,

    /// Phase offset of the second source (degrees, 0-360)
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0)]
    pub phase: f32,

    /// Free point-source pair instead of the double-slit wall
    #[arg(long)]
    pub no_barrier: bool,

    /// Start with the laser switched off
    #[arg(long)]
    pub torch_off: bool,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ColorTheme::LaserRed)]
    pub theme: ColorTheme,

    /// Field buffer size relative to the window (linear factor)
    #[arg(long, value_name = "FACTOR", default_value_t = 0.5)]
    pub resolution_scale: f32,

    /// Clock behaviour when parameters change
    #[arg(long, value_enum, default_value_t = TimePolicy::Reset)]
    pub time_policy: TimePolicy,

    /// Window (or recording) width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window (or recording) height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Record headless to PNG frames (duration in seconds) instead of opening a window
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Output directory for recorded frames
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: String,
}

impl Args {
    /// Initial parameter snapshot, clamped to the valid ranges
    pub fn initial_params(&self) -> WaveParams {
        let requested = WaveParams {
            separation: self.separation,
            frequency: self.frequency,
            phase_deg: self.phase,
            barrier_mode: !self.no_barrier,
            torch_on: !self.torch_off,
            color_theme: self.theme,
        };
        let params = requested.clamped();
        if params != requested {
            log::warn!("Parameters clamped to valid ranges: {}", params.summary());
        }
        params
    }

    /// Rendering configuration from the size and tuning flags
    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        let resolution_scale = if self.resolution_scale > 0.0 && self.resolution_scale <= 1.0 {
            self.resolution_scale
        } else {
            log::warn!(
                "Resolution scale {} outside (0, 1], using {}",
                self.resolution_scale,
                defaults.resolution_scale
            );
            defaults.resolution_scale
        };
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            resolution_scale,
            time_policy: self.time_policy,
            ..defaults
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| {
            RecordingConfig::new(
                duration,
                self.output.as_str(),
                (self.width.max(1), self.height.max(1)),
            )
        })
    }
}
