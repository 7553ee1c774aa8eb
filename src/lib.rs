//! Wavelab library - Real-time double-slit wave interference renderer

pub mod clock;
pub mod compositor;
pub mod controls;
pub mod error;
pub mod field;
pub mod palette;
pub mod params;
pub mod pipeline;
pub mod projector;
pub mod recording;
pub mod rendering;
pub mod surface;
