//! Camera state for the captured desktop image

use crate::math::Vector2;

/// Camera over the captured image.
///
/// `position` is the screen-space offset at which the image's top-left
/// corner is drawn, `scale` is the magnification factor and `velocity` is the
/// pan momentum carried over after a drag ends (screen units per second).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vector2,
    pub scale: f64,
    pub velocity: Vector2,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            scale: 1.0,
            velocity: Vector2::ZERO,
        }
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a screen point to image (world) coordinates
    pub fn screen_to_world(&self, point: Vector2) -> Vector2 {
        (point - self.position) / self.scale
    }

    /// Shift the camera so that a world-space drift measured at the current
    /// scale is cancelled on screen.
    pub fn shift_by_world(&mut self, world_delta: Vector2) {
        self.position += world_delta * self.scale;
    }

    /// Restore position, scale and velocity to their startup values
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
