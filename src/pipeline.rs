//! Per-frame render pipeline.
//!
//! One call to [`FramePipeline::render_frame`] is one frame: size the
//! buffers to the viewport, evaluate (or fill with static), project the
//! right-edge profile, then advance the clock. Frames always run to
//! completion; stopping the loop is simply not calling it again.

use noise::{NoiseFn, Value};

use crate::clock::PhaseClock;
use crate::field::{evaluate, FieldBuffer, IntensityProfile, WaveSetup};
use crate::params::{FieldTuning, RenderConfig, TimePolicy, WaveParams};
use crate::projector;
use crate::surface::Surface;

/// Owns every per-frame buffer and the time accumulator
pub struct FramePipeline {
    config: RenderConfig,
    tuning: FieldTuning,
    field: FieldBuffer,
    profile: IntensityProfile,
    screen: Surface,
    graph: Surface,
    clock: PhaseClock,
    static_noise: Value,
    viewport: (u32, u32),
    last_params: Option<WaveParams>,
    restarts: u64,
}

impl FramePipeline {
    pub fn new(config: RenderConfig, tuning: FieldTuning) -> Self {
        let clock = PhaseClock::new(config.time_step);
        let static_noise = Value::new(tuning.noise_seed);
        Self {
            config,
            tuning,
            field: FieldBuffer::default(),
            profile: IntensityProfile::default(),
            screen: Surface::default(),
            graph: Surface::default(),
            clock,
            static_noise,
            viewport: (0, 0),
            last_params: None,
            restarts: 0,
        }
    }

    /// Render one frame for a parameter snapshot and viewport size.
    ///
    /// The snapshot is clamped to the valid ranges before use.
    pub fn render_frame(&mut self, params: &WaveParams, viewport: (u32, u32)) {
        let params = &params.clamped();
        self.restart_if_changed(params);
        self.fit_viewport(viewport);

        if params.torch_on {
            let setup = WaveSetup::new(
                params,
                &self.tuning,
                self.field.width(),
                self.field.height(),
                self.clock.now(),
            );
            evaluate(&mut self.field, &mut self.profile, &setup);
            self.field.colorize(params.color_theme, self.tuning.field_gain);

            let scale = self.config.effective_scale();
            projector::project_screen(
                &self.profile,
                &mut self.screen,
                params.color_theme,
                &self.tuning,
                scale,
            );
            projector::project_graph(
                &self.profile,
                &mut self.graph,
                params.color_theme,
                &self.tuning,
                scale,
            );
        } else {
            self.render_static();
        }

        self.clock.advance();
    }

    /// Low-resolution field colors (stretched to the viewport by the display)
    pub fn field(&self) -> &Surface {
        self.field.surface()
    }

    /// Projection screen strip (native height)
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Intensity graph (native height, transparent background)
    pub fn graph(&self) -> &Surface {
        &self.graph
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clock value the next frame will use
    pub fn time(&self) -> f32 {
        self.clock.now()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Times the loop restarted because the parameters changed
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    #[cfg(test)]
    pub(crate) fn field_buffer(&self) -> &FieldBuffer {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn profile(&self) -> &IntensityProfile {
        &self.profile
    }

    fn restart_if_changed(&mut self, params: &WaveParams) {
        match self.last_params {
            Some(previous) if previous == *params => return,
            Some(_) => {
                self.restarts += 1;
                if self.config.time_policy == TimePolicy::Reset {
                    self.clock.reset();
                }
                log::debug!("parameters changed, restarting loop ({})", params.summary());
            }
            None => {}
        }
        self.last_params = Some(*params);
    }

    fn fit_viewport(&mut self, viewport: (u32, u32)) {
        if self.viewport == viewport && !self.screen.is_empty() {
            return;
        }
        let (field_width, field_height) = self.config.field_size(viewport);
        self.field.resize(field_width, field_height);
        self.screen.resize(self.config.screen_width_px, viewport.1);
        self.graph.resize(self.config.graph_width_px, viewport.1);
        self.viewport = viewport;
        log::debug!(
            "viewport {}x{} → field {}x{}",
            viewport.0,
            viewport.1,
            field_width,
            field_height
        );
    }

    fn render_static(&mut self) {
        let frame = self.clock.frames() as f64;
        let noise = &self.static_noise;
        self.field.fill_static(
            self.tuning.noise_ceiling,
            self.tuning.field_gain,
            |x, y| (noise.get([x as f64, y as f64, frame]) as f32 + 1.0) / 2.0,
        );
        self.profile.reset(self.field.height() as usize);
        projector::clear_outputs(&mut self.screen, &mut self.graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{colors, ColorTheme};

    fn pipeline(policy: TimePolicy) -> FramePipeline {
        let config = RenderConfig {
            time_policy: policy,
            ..RenderConfig::default()
        };
        FramePipeline::new(config, FieldTuning::default())
    }

    #[test]
    fn test_buffers_follow_viewport() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams::default();

        pipeline.render_frame(&params, (400, 300));
        assert_eq!((pipeline.field().width(), pipeline.field().height()), (200, 150));
        assert_eq!((pipeline.screen().width(), pipeline.screen().height()), (50, 300));
        assert_eq!((pipeline.graph().width(), pipeline.graph().height()), (180, 300));
        assert_eq!(pipeline.profile().len(), 150);

        pipeline.render_frame(&params, (321, 99));
        assert_eq!((pipeline.field().width(), pipeline.field().height()), (160, 49));
        assert_eq!(pipeline.screen().height(), 99);
        assert_eq!(pipeline.profile().len(), 49);
    }

    #[test]
    fn test_clock_advances_once_per_frame() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams::default();
        for _ in 0..4 {
            pipeline.render_frame(&params, (64, 64));
        }
        assert_eq!(pipeline.frames(), 4);
        assert!((pipeline.time() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_change_resets_clock() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams::default();
        pipeline.render_frame(&params, (64, 64));
        pipeline.render_frame(&params, (64, 64));

        let changed = WaveParams {
            separation: 20.0,
            ..params
        };
        pipeline.render_frame(&changed, (64, 64));
        assert_eq!(pipeline.restarts(), 1);
        // Reset to 0 before the frame, then advanced once
        assert!((pipeline.time() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_change_can_keep_clock() {
        let mut pipeline = pipeline(TimePolicy::Continue);
        let params = WaveParams::default();
        pipeline.render_frame(&params, (64, 64));
        pipeline.render_frame(&params, (64, 64));

        let changed = WaveParams {
            color_theme: ColorTheme::Rainbow,
            ..params
        };
        pipeline.render_frame(&changed, (64, 64));
        assert_eq!(pipeline.restarts(), 1);
        assert!((pipeline.time() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_torch_off_renders_static_and_blank_outputs() {
        for theme in ColorTheme::ALL {
            for barrier_mode in [true, false] {
                let mut pipeline = pipeline(TimePolicy::Reset);
                let params = WaveParams {
                    torch_on: false,
                    barrier_mode,
                    color_theme: theme,
                    ..WaveParams::default()
                };
                pipeline.render_frame(&params, (120, 80));

                for pixel in pipeline.field().pixels() {
                    assert!(pixel[0] < 10);
                    assert_eq!(pixel[0], pixel[1]);
                    assert_eq!(pixel[1], pixel[2]);
                }
                let field = pipeline.field_buffer();
                for y in 0..field.height() {
                    for x in 0..field.width() {
                        assert!(field.sample(x, y).amplitude().abs() < 0.1);
                    }
                }
                assert!(pipeline.screen().pixels().iter().all(|p| *p == colors::SCREEN_OFF));
                assert!(pipeline.graph().pixels().iter().all(|p| *p == colors::CLEAR));
                assert!(pipeline.profile().values().iter().all(|v| *v == 0.0));
            }
        }
    }

    #[test]
    fn test_wall_pixels_ignore_theme() {
        let viewport = (400, 200);
        for theme in ColorTheme::ALL {
            let mut pipeline = pipeline(TimePolicy::Reset);
            let params = WaveParams {
                color_theme: theme,
                ..WaveParams::default()
            };
            pipeline.render_frame(&params, viewport);

            // field 200x100: wall at x = 30, slits at rows 30 and 70
            let field = pipeline.field();
            for y in [0, 10, 50, 90, 99] {
                assert_eq!(field.pixel(30, y), colors::WALL, "{} row {}", theme, y);
            }
            assert_ne!(field.pixel(30, 30), colors::WALL);
        }
    }

    #[test]
    fn test_screen_tracks_profile() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams {
            color_theme: ColorTheme::Grayscale,
            ..WaveParams::default()
        };
        pipeline.render_frame(&params, (300, 200));

        let tuning = FieldTuning::default();
        for y in [0u32, 37, 120, 199] {
            let amplitude = pipeline.profile().at_scaled_row(y, 0.5);
            let expected = crate::palette::map(ColorTheme::Grayscale, amplitude, tuning.screen_gain);
            assert_eq!(pipeline.screen().pixel(0, y), expected);
            assert_eq!(pipeline.screen().pixel(49, y), expected);
        }
    }

    #[test]
    fn test_screen_rows_follow_field_scale() {
        for (resolution_scale, field_side) in [(0.005, 10), (2.0, 1000), (0.25, 250)] {
            let config = RenderConfig {
                resolution_scale,
                ..RenderConfig::default()
            };
            let scale = config.effective_scale();
            let mut pipeline = FramePipeline::new(config, FieldTuning::default());
            let params = WaveParams {
                color_theme: ColorTheme::Grayscale,
                ..WaveParams::default()
            };
            pipeline.render_frame(&params, (1000, 1000));
            assert_eq!(pipeline.field().height(), field_side);

            let tuning = FieldTuning::default();
            let values = pipeline.profile().values();
            for y in [0u32, 333, 500, 999] {
                let row = ((y as f32 * scale).floor() as usize).min(values.len() - 1);
                let expected = crate::palette::map(ColorTheme::Grayscale, values[row], tuning.screen_gain);
                assert_eq!(pipeline.screen().pixel(0, y), expected, "scale {} row {}", resolution_scale, y);
            }
            // Bottom screen row reaches the last profile row
            assert_eq!(((999.0 * scale).floor() as usize).min(values.len() - 1), values.len() - 1);
        }
    }

    #[test]
    fn test_unclamped_snapshot_keeps_clock_running() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams {
            separation: f32::NAN,
            frequency: 50.0,
            ..WaveParams::default()
        };
        for _ in 0..3 {
            pipeline.render_frame(&params, (64, 64));
        }
        assert_eq!(pipeline.restarts(), 0);
        assert!((pipeline.time() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut pipeline = pipeline(TimePolicy::Reset);
        let params = WaveParams::default();
        pipeline.render_frame(&params, (1, 1));
        pipeline.render_frame(&params, (0, 0));
        pipeline.render_frame(&WaveParams { torch_on: false, ..params }, (3, 0));
        assert_eq!(pipeline.frames(), 3);
    }
}
