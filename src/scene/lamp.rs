//! Spotlight ("lamp") overlay state

/// Radius of the lamp at startup, in screen pixels
pub const INITIAL_LAMP_RADIUS: f64 = 60.0;

/// Circular spotlight that dims everything outside `radius` around the
/// pointer.
///
/// `delta_radius` is the pending radius impulse fed by the wheel; `shadow`
/// is the current dimming strength, eased toward the configured maximum
/// while the lamp is enabled and toward zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LampState {
    pub enabled: bool,
    pub radius: f64,
    pub delta_radius: f64,
    pub shadow: f64,
}

impl Default for LampState {
    fn default() -> Self {
        Self::new(INITIAL_LAMP_RADIUS)
    }
}

impl LampState {
    pub fn new(radius: f64) -> Self {
        Self {
            enabled: false,
            radius: radius.max(0.0),
            delta_radius: 0.0,
            shadow: 0.0,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled_and_unshadowed() {
        let lamp = LampState::default();
        assert!(!lamp.enabled);
        assert_eq!(lamp.radius, INITIAL_LAMP_RADIUS);
        assert_eq!(lamp.shadow, 0.0);
        assert_eq!(lamp.delta_radius, 0.0);
    }

    #[test]
    fn negative_radius_is_clamped() {
        assert_eq!(LampState::new(-5.0).radius, 0.0);
    }

    #[test]
    fn toggle_flips_enabled() {
        let mut lamp = LampState::default();
        lamp.toggle();
        assert!(lamp.enabled);
        lamp.toggle();
        assert!(!lamp.enabled);
    }
}
