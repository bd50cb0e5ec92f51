//! Renderer abstraction
//!
//! The navigation core only hands out [`FrameSnapshot`]s; a renderer turns
//! them into draw calls. The wgpu renderer is the only implementation, but
//! the window loop talks to it through this trait.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::error::Result;
use crate::frame::FrameSnapshot;

/// Consumer of per-frame snapshots
pub trait Renderer {
    /// Called when the output surface changes size (physical pixels)
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame
    fn render(&mut self, snapshot: &FrameSnapshot) -> Result<()>;
}

/// Uniform block for the magnifier shader
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MagnifierUniforms {
    pub camera: Vec2,
    pub image_size: Vec2,
    pub lamp_position: Vec2,
    pub scale: f32,
    pub lamp_radius: f32,
    pub lamp_shadow: f32,
    pub time: f32,
    pub _padding: [f32; 2],
}

impl MagnifierUniforms {
    pub fn new(snapshot: &FrameSnapshot, image_width: u32, image_height: u32) -> Self {
        Self {
            camera: snapshot.camera_position.as_vec2(),
            image_size: Vec2::new(image_width as f32, image_height as f32),
            lamp_position: snapshot.lamp_position.as_vec2(),
            scale: snapshot.camera_scale as f32,
            lamp_radius: snapshot.lamp_radius as f32,
            lamp_shadow: snapshot.lamp_shadow as f32,
            time: snapshot.elapsed_time as f32,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn uniforms_are_sixteen_byte_sized() {
        assert_eq!(std::mem::size_of::<MagnifierUniforms>(), 48);
    }

    #[test]
    fn uniforms_mirror_snapshot() {
        let snapshot = FrameSnapshot {
            camera_position: Vector2::new(-12.0, 8.0),
            camera_scale: 2.5,
            lamp_position: Vector2::new(300.0, 200.0),
            lamp_radius: 75.0,
            lamp_shadow: 0.4,
            elapsed_time: 3.0,
        };
        let uniforms = MagnifierUniforms::new(&snapshot, 1920, 1080);
        assert_eq!(uniforms.camera, Vec2::new(-12.0, 8.0));
        assert_eq!(uniforms.image_size, Vec2::new(1920.0, 1080.0));
        assert_eq!(uniforms.lamp_position, Vec2::new(300.0, 200.0));
        assert_eq!(uniforms.scale, 2.5);
        assert_eq!(uniforms.lamp_radius, 75.0);
        assert_eq!(uniforms.lamp_shadow, 0.4);
        assert_eq!(uniforms.time, 3.0);
    }
}
