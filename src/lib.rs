//! Magnifier - an on-screen magnifying glass
//!
//! Captures a still image of the desktop once, then lets the user pan and
//! zoom it with inertia and toggle a circular spotlight ("lamp") that dims
//! everything outside a radius around the pointer.
//!
//! # Layout
//! - [`math`]: 2D vector arithmetic
//! - [`input`]: window events to semantic input, and their effect on state
//! - [`scene`]: camera, lamp, decaying impulses and the navigation simulator
//! - [`frame`]: frame clock, scheduler and the per-frame snapshot
//! - [`capture`]: one-time X11 screen capture and PPM export
//! - [`backend`]: renderer trait and the wgpu implementation
//! - [`window`]: the winit overlay and frame loop

pub mod args;
pub mod backend;
pub mod capture;
pub mod error;
pub mod frame;
pub mod input;
pub mod math;
pub mod scene;
pub mod window;

pub use args::Args;
pub use capture::{ScreenCapture, Screenshot, X11Capture};
pub use error::{MagnifierError, Result};
pub use frame::FrameSnapshot;
pub use math::Vector2;
pub use scene::{NavigationController, NavigationParams};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Call once after the logger is installed.
pub fn init() {
    log::info!("Magnifier v{} initialized", VERSION);
}

/// How the overlay window is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Borderless fullscreen, always on top
    #[default]
    Borderless,
    /// Regular decorated window sized to the capture
    Windowed,
}

/// Configuration for the overlay
#[derive(Debug, Clone)]
pub struct MagnifierConfig {
    /// Window title
    pub title: String,
    /// Enable vsync
    pub vsync: bool,
    pub window_mode: WindowMode,
    /// Exit after this many frames, if set
    pub max_frames: Option<u64>,
    /// Simulation and input tuning
    pub navigation: NavigationParams,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            title: "Magnifier".to_string(),
            vsync: true,
            window_mode: WindowMode::Borderless,
            max_frames: None,
            navigation: NavigationParams::default(),
        }
    }
}
