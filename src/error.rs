//! Error types for display setup and frame recording.
//!
//! The per-frame core is infallible; only GPU/window setup and writing
//! frames to disk can fail.

use std::fmt;

/// Errors that can occur while setting up the window and GPU display.
#[derive(Debug)]
pub enum DisplayError {
    /// Failed to create the window.
    WindowCreation(winit::error::OsError),
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::WindowCreation(e) => write!(f, "Failed to create window: {}", e),
            DisplayError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            DisplayError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            DisplayError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DisplayError::WindowCreation(e) => Some(e),
            DisplayError::SurfaceCreation(e) => Some(e),
            DisplayError::DeviceCreation(e) => Some(e),
            DisplayError::NoAdapter => None,
        }
    }
}

impl From<winit::error::OsError> for DisplayError {
    fn from(e: winit::error::OsError) -> Self {
        DisplayError::WindowCreation(e)
    }
}

impl From<wgpu::CreateSurfaceError> for DisplayError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        DisplayError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for DisplayError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        DisplayError::DeviceCreation(e)
    }
}

/// Errors that can occur while recording frames to disk.
#[derive(Debug)]
pub enum RecordingError {
    /// Failed to create the output directory.
    Io(std::io::Error),
    /// Failed to encode or write a frame image.
    Image(image::ImageError),
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::Io(e) => write!(f, "Failed to prepare recording directory: {}", e),
            RecordingError::Image(e) => write!(f, "Failed to write frame: {}", e),
        }
    }
}

impl std::error::Error for RecordingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordingError::Io(e) => Some(e),
            RecordingError::Image(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RecordingError {
    fn from(e: std::io::Error) -> Self {
        RecordingError::Io(e)
    }
}

impl From<image::ImageError> for RecordingError {
    fn from(e: image::ImageError) -> Self {
        RecordingError::Image(e)
    }
}
