//! Decaying impulses
//!
//! Zoom, pan inertia and lamp radius all follow the same pattern: discrete
//! input accumulates a delta, the simulator applies it scaled by the frame
//! time and then decays the delta itself toward zero. [`ImpulseDecay`] holds
//! the dead-zone and decay policy for one such delta; the delta itself stays
//! plain data on the owning state struct.

use crate::math::{NormalizeOrZero, Vector2};

/// A value that can be driven by an [`ImpulseDecay`]
pub trait ImpulseValue: Copy {
    const ZERO: Self;

    /// Size compared against the dead-zone
    fn magnitude(self) -> f64;

    /// Unit direction used by linear decay
    fn direction(self) -> Self;

    fn scaled(self, factor: f64) -> Self;

    fn minus(self, other: Self) -> Self;
}

impl ImpulseValue for f64 {
    const ZERO: Self = 0.0;

    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn direction(self) -> Self {
        if self >= 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }

    fn minus(self, other: Self) -> Self {
        self - other
    }
}

impl ImpulseValue for Vector2 {
    const ZERO: Self = Vector2::ZERO;

    fn magnitude(self) -> f64 {
        self.length()
    }

    fn direction(self) -> Self {
        self.normalized_or_zero_eps()
    }

    fn scaled(self, factor: f64) -> Self {
        self * factor
    }

    fn minus(self, other: Self) -> Self {
        self - other
    }
}

/// How an impulse shrinks each step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// Shrink by `rate * dt` along the impulse direction.
    Linear(f64),
    /// Shrink by the fraction `rate * dt` of the current value.
    Proportional(f64),
}

/// Dead-zone and decay policy for one kind of impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseDecay {
    /// Impulses at or below this magnitude are settled.
    pub dead_zone: f64,
    pub decay: Decay,
}

impl ImpulseDecay {
    pub const fn linear(dead_zone: f64, rate: f64) -> Self {
        Self {
            dead_zone,
            decay: Decay::Linear(rate),
        }
    }

    pub const fn proportional(dead_zone: f64, rate: f64) -> Self {
        Self {
            dead_zone,
            decay: Decay::Proportional(rate),
        }
    }

    /// Whether the impulse is still large enough to be applied
    pub fn is_active<T: ImpulseValue>(&self, value: T) -> bool {
        value.magnitude() > self.dead_zone
    }

    /// Shrink `value` toward zero for a step of `dt` seconds.
    ///
    /// The result never crosses zero: a step larger than the remaining
    /// magnitude settles the impulse at exactly zero.
    pub fn decay<T: ImpulseValue>(&self, value: &mut T, dt: f64) {
        match self.decay {
            Decay::Linear(rate) => {
                let step = rate * dt;
                if step >= value.magnitude() {
                    *value = T::ZERO;
                } else {
                    *value = value.minus(value.direction().scaled(step));
                }
            }
            Decay::Proportional(rate) => {
                let fraction = (rate * dt).min(1.0);
                *value = value.minus(value.scaled(fraction));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_zone_is_exclusive() {
        let policy = ImpulseDecay::linear(0.5, 5.0);
        assert!(!policy.is_active(0.5));
        assert!(!policy.is_active(-0.5));
        assert!(policy.is_active(0.51));
        assert!(policy.is_active(-0.51));
    }

    #[test]
    fn linear_decay_preserves_sign() {
        let policy = ImpulseDecay::linear(0.5, 5.0);
        let mut up = 3.0;
        let mut down = -3.0;
        policy.decay(&mut up, 0.1);
        policy.decay(&mut down, 0.1);
        assert!((up - 2.5).abs() < 1e-12);
        assert!((down + 2.5).abs() < 1e-12);
    }

    #[test]
    fn linear_decay_stops_at_zero() {
        let policy = ImpulseDecay::linear(0.5, 5.0);
        let mut value = 1.0;
        policy.decay(&mut value, 1.0);
        assert_eq!(value, 0.0);

        let mut value = -0.2;
        policy.decay(&mut value, 1.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn linear_decay_on_vectors_follows_direction() {
        let policy = ImpulseDecay::linear(20.0, 100.0);
        let mut velocity = Vector2::new(30.0, 40.0);
        policy.decay(&mut velocity, 0.1);
        assert!((velocity.x - 24.0).abs() < 1e-9);
        assert!((velocity.y - 32.0).abs() < 1e-9);
    }

    #[test]
    fn proportional_decay_shrinks_by_fraction() {
        let policy = ImpulseDecay::proportional(1.0, 10.0);
        let mut value = 60.0;
        policy.decay(&mut value, 0.05);
        assert!((value - 30.0).abs() < 1e-12);
    }

    #[test]
    fn proportional_decay_never_flips() {
        let policy = ImpulseDecay::proportional(1.0, 10.0);
        let mut value = 60.0;
        policy.decay(&mut value, 0.5);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let linear = ImpulseDecay::linear(0.5, 5.0);
        let proportional = ImpulseDecay::proportional(1.0, 10.0);
        let mut a = 2.0;
        let mut b = 2.0;
        linear.decay(&mut a, 0.0);
        proportional.decay(&mut b, 0.0);
        assert_eq!(a, 2.0);
        assert_eq!(b, 2.0);
    }
}
