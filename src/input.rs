//! Input translation
//!
//! Raw window events are first mapped to engine-agnostic [`InputEvent`]s
//! (see [`map_window_event`]), queued, and then applied by the
//! [`InputTranslator`] at the start of the next frame. Applying an event
//! mutates the [`InputAccumulator`] and, for drags and commands, the camera
//! and lamp directly.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::math::Vector2;
use crate::scene::{CameraState, LampState, NavigationParams};

/// Single-key commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Restore camera and pointer state to startup values
    Reset,
    ToggleLamp,
}

/// A semantic input event, independent of the windowing backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a screen position (physical pixels)
    PointerMoved(Vector2),
    PointerPressed,
    PointerReleased,
    /// Vertical wheel motion; positive is away from the user
    Wheel(f64),
    /// Control modifier state changed
    ControlChanged(bool),
    Command(Command),
}

/// Per-frame input state, drained by the navigation simulator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputAccumulator {
    /// Pending zoom impulse from the wheel
    pub zoom_impulse: f64,
    /// Current pointer position in screen space
    pub cursor: Vector2,
    /// Pointer position at the previous move event
    pub previous: Vector2,
    pub dragging: bool,
    pub control: bool,
    pub quit_requested: bool,
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero pointer positions and any pending zoom
    pub fn reset_pointer(&mut self) {
        self.cursor = Vector2::ZERO;
        self.previous = Vector2::ZERO;
        self.zoom_impulse = 0.0;
    }
}

/// Applies [`InputEvent`]s to the accumulator, camera and lamp
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    params: NavigationParams,
}

impl InputTranslator {
    pub fn new(params: NavigationParams) -> Self {
        Self { params }
    }

    pub fn apply(
        &self,
        event: InputEvent,
        input: &mut InputAccumulator,
        camera: &mut CameraState,
        lamp: &mut LampState,
    ) {
        match event {
            InputEvent::PointerMoved(position) => {
                input.cursor = position;
                if input.dragging {
                    let world_delta =
                        camera.screen_to_world(input.cursor) - camera.screen_to_world(input.previous);
                    camera.shift_by_world(world_delta);
                    camera.velocity = (input.cursor - input.previous) * self.params.drag_velocity_gain;
                }
                input.previous = input.cursor;
            }
            InputEvent::PointerPressed => {
                input.previous = input.cursor;
                input.dragging = true;
            }
            InputEvent::PointerReleased => {
                input.dragging = false;
            }
            InputEvent::Wheel(delta) => {
                let direction = if delta > 0.0 {
                    1.0
                } else if delta < 0.0 {
                    -1.0
                } else {
                    return;
                };
                if input.control && lamp.enabled {
                    lamp.delta_radius += direction * self.params.wheel_radius_step;
                } else {
                    input.zoom_impulse += direction * self.params.wheel_zoom_step;
                }
            }
            InputEvent::ControlChanged(held) => {
                input.control = held;
            }
            InputEvent::Command(Command::Quit) => {
                log::debug!("Quit requested");
                input.quit_requested = true;
            }
            InputEvent::Command(Command::Reset) => {
                log::debug!("Camera reset");
                camera.reset();
                input.reset_pointer();
            }
            InputEvent::Command(Command::ToggleLamp) => {
                lamp.toggle();
                log::debug!("Lamp {}", if lamp.enabled { "on" } else { "off" });
            }
        }
    }
}

/// Map a winit window event to an [`InputEvent`], if it is one we react to.
pub fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            Some(InputEvent::PointerMoved(Vector2::new(position.x, position.y)))
        }
        WindowEvent::MouseInput { state, .. } => Some(match state {
            ElementState::Pressed => InputEvent::PointerPressed,
            ElementState::Released => InputEvent::PointerReleased,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y as f64,
                MouseScrollDelta::PixelDelta(pos) => pos.y,
            };
            Some(InputEvent::Wheel(dy))
        }
        WindowEvent::ModifiersChanged(modifiers) => {
            Some(InputEvent::ControlChanged(modifiers.state().control_key()))
        }
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            map_key(&event.logical_key).map(InputEvent::Command)
        }
        WindowEvent::CloseRequested => Some(InputEvent::Command(Command::Quit)),
        _ => None,
    }
}

/// Map a logical key to a [`Command`]
pub fn map_key(key: &Key) -> Option<Command> {
    match key {
        Key::Character(text) => match text.as_str() {
            "q" | "Q" => Some(Command::Quit),
            "0" => Some(Command::Reset),
            "f" | "F" => Some(Command::ToggleLamp),
            _ => None,
        },
        Key::Named(NamedKey::Escape) => Some(Command::Quit),
        _ => None,
    }
}
