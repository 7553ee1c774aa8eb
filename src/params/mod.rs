//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (pixels, radians, degrees)
//! - Documented ranges and meanings
//! - Type safety where possible

mod field;
mod render;
mod wave;

// Re-export all types
pub use field::{colors, FieldTuning};
pub use render::{RecordingConfig, RenderConfig, TimePolicy};
pub use wave::{ColorTheme, WaveParams, FREQUENCY_RANGE, PHASE_RANGE, SEPARATION_RANGE};
