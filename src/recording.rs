//! Headless recording: run the pipeline at a fixed frame rate and write
//! every composed frame to a numbered PNG.

use std::fs;

use crate::compositor::{compose, Layout};
use crate::error::RecordingError;
use crate::params::{FieldTuning, RecordingConfig, RenderConfig, WaveParams};
use crate::pipeline::FramePipeline;

/// Record `config.total_frames()` frames for a fixed parameter snapshot.
///
/// Returns the number of frames written.
pub fn record(
    config: &RecordingConfig,
    render_config: RenderConfig,
    tuning: FieldTuning,
    params: &WaveParams,
) -> Result<usize, RecordingError> {
    fs::create_dir_all(config.frames_dir())?;

    let total = config.total_frames();
    let layout = Layout::for_viewport(config.viewport, &render_config);
    let mut pipeline = FramePipeline::new(render_config, tuning);

    log::info!(
        "Recording {} frames at {}x{} ({})",
        total,
        config.viewport.0,
        config.viewport.1,
        params.summary()
    );

    for frame_num in 0..total {
        pipeline.render_frame(params, config.viewport);
        let image = compose(pipeline.field(), pipeline.screen(), pipeline.graph(), &layout);
        image.save(config.frame_path(frame_num))?;

        if (frame_num + 1) % config.fps.max(1) as usize == 0 {
            log::info!("  {}/{} frames", frame_num + 1, total);
        }
    }

    log::info!("Frames written to {}", config.frames_dir().display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_writes_numbered_frames() {
        let dir = std::env::temp_dir().join(format!("wavelab-record-{}", std::process::id()));
        let mut config = RecordingConfig::new(0.5, &dir, (64, 48));
        config.fps = 4;

        let written = record(
            &config,
            RenderConfig::default(),
            FieldTuning::default(),
            &WaveParams::default(),
        )
        .expect("recording succeeds");

        assert_eq!(written, 2);
        let first = image::open(config.frame_path(0)).expect("frame 0 readable");
        assert_eq!((first.width(), first.height()), (64, 48));
        assert!(config.frame_path(1).exists());
        assert!(!config.frame_path(2).exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
