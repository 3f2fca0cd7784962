use std::f64::consts::FRAC_PI_2;

use nalgebra::{Rotation2, Vector2};

/// Planar displacement, velocity or acceleration, in consistent units.
pub type Vector = Vector2<f64>;

pub fn vector_magnitude(v: &Vector) -> f64 {
    v.norm()
}

/// Heading of `v` in radians, measured so that +y ("up") is zero.
pub fn vector_angle(v: &Vector) -> f64 {
    v.y.atan2(v.x) - FRAC_PI_2
}

/// Rotate `v` counter-clockwise by `rads`.
pub fn rotate_vector(v: &Vector, rads: f64) -> Vector {
    Rotation2::new(rads) * *v
}

// Unit vectors of a body frame whose forward axis follows `v`.
// A zero `v` has heading -π/2, so forward is +x.
pub fn heading_frame(v: &Vector) -> (Vector, Vector) {
    let heading = vector_angle(v);
    let forward = rotate_vector(&Vector::y(), heading);
    let right = rotate_vector(&Vector::x(), heading);
    (forward, right)
}
