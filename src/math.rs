//! Math type aliases and helper functions for the navigation core

/// 2D point or vector in double precision.
///
/// Screen positions, world positions and pan velocities all use this type.
/// `*` and `/` between two vectors are component-wise.
pub type Vector2 = glam::DVec2;

/// Vectors shorter than this normalize to zero.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Normalization with the navigation core's zero threshold
pub trait NormalizeOrZero {
    /// Unit vector in the same direction, or zero when the length is below
    /// [`NORMALIZE_EPSILON`].
    fn normalized_or_zero_eps(self) -> Self;
}

impl NormalizeOrZero for Vector2 {
    fn normalized_or_zero_eps(self) -> Self {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            return Vector2::ZERO;
        }
        self / len
    }
}
