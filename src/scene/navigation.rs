//! Navigation simulator
//!
//! Advances the camera and lamp once per frame. Every update is
//! frame-rate independent: impulses are applied scaled by `dt` and then
//! decayed themselves, see [`ImpulseDecay`].

use super::impulse::ImpulseDecay;
use super::{CameraState, LampState, INITIAL_LAMP_RADIUS};
use crate::input::InputAccumulator;

/// Tuning constants for navigation and input translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationParams {
    /// Lowest scale the simulator will drive the camera to
    pub min_scale: f64,
    /// Zoom impulses at or below this magnitude are settled
    pub zoom_dead_zone: f64,
    /// Linear zoom impulse decay per second
    pub zoom_decay: f64,
    /// Zoom impulse added per wheel notch
    pub wheel_zoom_step: f64,
    /// Pan velocities at or below this speed no longer move the camera
    pub pan_dead_zone: f64,
    /// Multiplier from velocity to per-second position change
    pub pan_gain: f64,
    /// Linear velocity decay per second
    pub pan_decay: f64,
    /// Multiplier from per-event drag delta to release velocity
    pub drag_velocity_gain: f64,
    /// Radius impulses at or below this magnitude are settled
    pub radius_dead_zone: f64,
    /// Fraction of the radius impulse removed per second
    pub radius_decay: f64,
    /// Radius impulse added per ctrl+wheel notch
    pub wheel_radius_step: f64,
    pub initial_radius: f64,
    /// Shadow change per second while fading in or out
    pub shadow_ease_rate: f64,
    pub max_shadow: f64,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            zoom_dead_zone: 0.5,
            zoom_decay: 5.0,
            wheel_zoom_step: 1.0,
            pan_dead_zone: 20.0,
            pan_gain: 5.0,
            pan_decay: 100.0,
            drag_velocity_gain: 20.0,
            radius_dead_zone: 1.0,
            radius_decay: 10.0,
            wheel_radius_step: INITIAL_LAMP_RADIUS,
            initial_radius: INITIAL_LAMP_RADIUS,
            shadow_ease_rate: 6.0,
            max_shadow: 0.8,
        }
    }
}

impl NavigationParams {
    pub fn zoom_impulse(&self) -> ImpulseDecay {
        ImpulseDecay::linear(self.zoom_dead_zone, self.zoom_decay)
    }

    pub fn pan_impulse(&self) -> ImpulseDecay {
        ImpulseDecay::linear(self.pan_dead_zone, self.pan_decay)
    }

    pub fn radius_impulse(&self) -> ImpulseDecay {
        ImpulseDecay::proportional(self.radius_dead_zone, self.radius_decay)
    }
}

/// Steps camera and lamp state forward in time
#[derive(Debug, Clone, Default)]
pub struct NavigationSimulator {
    params: NavigationParams,
}

impl NavigationSimulator {
    pub fn new(params: NavigationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &NavigationParams {
        &self.params
    }

    /// Advance everything by `dt` seconds. A `dt` of zero changes nothing.
    pub fn step(
        &self,
        dt: f64,
        camera: &mut CameraState,
        lamp: &mut LampState,
        input: &mut InputAccumulator,
    ) {
        self.step_zoom(dt, camera, input);
        self.step_pan(dt, camera, input.dragging);
        self.step_lamp_radius(dt, lamp);
        self.step_lamp_shadow(dt, lamp);
    }

    /// Apply the pending zoom impulse, keeping the image point under the
    /// cursor fixed on screen.
    fn step_zoom(&self, dt: f64, camera: &mut CameraState, input: &mut InputAccumulator) {
        let zoom = self.params.zoom_impulse();
        if !zoom.is_active(input.zoom_impulse) {
            return;
        }

        let world_before = camera.screen_to_world(input.cursor);
        camera.scale += input.zoom_impulse * dt;

        if camera.scale < self.params.min_scale {
            // Clamping skips the re-anchor, so the image jumps once here.
            // Discard the rest so it cannot re-accelerate later.
            camera.scale = self.params.min_scale;
            input.zoom_impulse = 0.0;
            return;
        }

        let world_after = camera.screen_to_world(input.cursor);
        camera.shift_by_world(world_after - world_before);
        zoom.decay(&mut input.zoom_impulse, dt);
    }

    /// Coast on the velocity left by the last drag
    fn step_pan(&self, dt: f64, camera: &mut CameraState, dragging: bool) {
        let pan = self.params.pan_impulse();
        if dragging || !pan.is_active(camera.velocity) {
            return;
        }

        camera.position += camera.velocity * (self.params.pan_gain * dt);
        pan.decay(&mut camera.velocity, dt);
    }

    fn step_lamp_radius(&self, dt: f64, lamp: &mut LampState) {
        let radius = self.params.radius_impulse();
        if !radius.is_active(lamp.delta_radius) {
            return;
        }

        lamp.radius = (lamp.radius + lamp.delta_radius * dt).max(0.0);
        radius.decay(&mut lamp.delta_radius, dt);
    }

    fn step_lamp_shadow(&self, dt: f64, lamp: &mut LampState) {
        let ease = self.params.shadow_ease_rate * dt;
        lamp.shadow = if lamp.enabled {
            (lamp.shadow + ease).min(self.params.max_shadow)
        } else {
            (lamp.shadow - ease).max(0.0)
        };
    }
}
