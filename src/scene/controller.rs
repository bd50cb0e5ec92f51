//! Navigation controller
//!
//! Owns the camera, lamp and input state by value and ties the input
//! translator and the simulator together into a per-frame update.

use super::{CameraState, LampState, NavigationParams, NavigationSimulator};
use crate::frame::FrameSnapshot;
use crate::input::{InputAccumulator, InputEvent, InputTranslator};

/// Single owner of all navigation state.
///
/// Events are queued with [`push_event`](Self::push_event) as they arrive
/// and only applied at the start of [`update`](Self::update), so an event
/// that arrives mid-frame affects the next step, never the current one.
#[derive(Debug, Clone)]
pub struct NavigationController {
    camera: CameraState,
    lamp: LampState,
    input: InputAccumulator,
    translator: InputTranslator,
    simulator: NavigationSimulator,
    pending: Vec<InputEvent>,
    elapsed_time: f64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavigationParams::default())
    }
}

impl NavigationController {
    pub fn new(params: NavigationParams) -> Self {
        Self {
            camera: CameraState::default(),
            lamp: LampState::new(params.initial_radius),
            input: InputAccumulator::default(),
            translator: InputTranslator::new(params),
            simulator: NavigationSimulator::new(params),
            pending: Vec::new(),
            elapsed_time: 0.0,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn lamp(&self) -> &LampState {
        &self.lamp
    }

    pub fn input(&self) -> &InputAccumulator {
        &self.input
    }

    pub fn params(&self) -> &NavigationParams {
        self.simulator.params()
    }

    /// Queue an event for the next frame
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn quit_requested(&self) -> bool {
        self.input.quit_requested
    }

    /// Run one frame: drain queued input, then step the simulation by `dt`
    /// seconds. Negative `dt` is treated as zero.
    pub fn update(&mut self, dt: f64) -> FrameSnapshot {
        for event in self.pending.drain(..) {
            self.translator
                .apply(event, &mut self.input, &mut self.camera, &mut self.lamp);
        }

        let dt = dt.max(0.0);
        self.simulator
            .step(dt, &mut self.camera, &mut self.lamp, &mut self.input);
        self.elapsed_time += dt;

        self.snapshot()
    }

    /// Read-only view of the state the renderer needs
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            camera_position: self.camera.position,
            camera_scale: self.camera.scale,
            lamp_position: self.input.cursor,
            lamp_radius: self.lamp.radius,
            lamp_shadow: self.lamp.shadow,
            elapsed_time: self.elapsed_time,
        }
    }
}
