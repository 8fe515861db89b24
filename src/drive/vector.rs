// Planar helpers over nalgebra used to rotate drive commands into the robot frame.
// Radians, counter-clockwise positive.

use nalgebra::{Rotation2, Vector2};

/// Rotate `v` counter-clockwise by `angle` radians
pub fn rotate(v: &Vector2<f64>, angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * v
}

/// Polar form `(angle in radians, magnitude)`. The zero vector reports angle 0.0.
pub fn polar(v: &Vector2<f64>) -> (f64, f64) {
    (v.y.atan2(v.x), v.norm())
}
