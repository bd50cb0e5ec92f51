//! Fatal setup errors
//!
//! Nothing in the per-frame simulation can fail; every variant here is a
//! one-time setup failure that leaves the environment unusable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagnifierError {
    #[error("Could not open display: {0}")]
    DisplayUnavailable(String),
    #[error("Failed to capture screen: {0}")]
    CaptureFailed(String),
    #[error("Unsupported pixel depth: {bits} bits per pixel (expected 32)")]
    UnsupportedPixelDepth { bits: u8 },
    #[error("Capture buffer is {actual} bytes, expected {expected}")]
    InvalidCapture { expected: usize, actual: usize },
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error("Failed to create window: {0}")]
    WindowCreation(String),
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),
    #[error("No suitable graphics adapter found")]
    NoAdapter,
    #[error("Failed to create device: {0}")]
    DeviceCreation(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Failed to export image: {0}")]
    ImageExport(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MagnifierError>;
