//! Rendering backend
//!
//! Provides the [`Renderer`] trait and the wgpu implementation that draws
//! the captured desktop through the camera transform.

pub mod traits;
pub mod wgpu_backend;

pub use traits::*;
pub use wgpu_backend::WgpuRenderer;
