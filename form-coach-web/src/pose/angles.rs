//! Joint angle calculation using dot product
//!
//! Calculates the angle at a joint from the two limb vectors
//! vertex→a and vertex→b, in full 3D.

use nalgebra::Vector3;

use super::landmarks::Point3D;
use crate::error::GeometryError;

/// Limb vectors shorter than this are treated as coincident points
const MIN_LIMB_LENGTH: f32 = 1e-6;

fn to_vector(p: Point3D) -> Vector3<f32> {
    Vector3::new(p.x, p.y, p.z)
}

/// Calculate the angle ∠(a, vertex, b) in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns a value in [0, 180]:
/// - 180° = fully straight (a, vertex, b collinear)
/// - small = fully bent
pub fn angle_at_vertex(a: Point3D, vertex: Point3D, b: Point3D) -> Result<f32, GeometryError> {
    let v1 = to_vector(a) - to_vector(vertex);
    let v2 = to_vector(b) - to_vector(vertex);

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if !(mag1 >= MIN_LIMB_LENGTH && mag2 >= MIN_LIMB_LENGTH) {
        return Err(GeometryError::Degenerate);
    }

    // Overflowed magnitudes or dot product make the ratio meaningless
    let dot = v1.dot(&v2);
    let denom = mag1 * mag2;
    if !(mag1.is_finite() && mag2.is_finite() && dot.is_finite() && denom.is_finite()) {
        return Err(GeometryError::Degenerate);
    }

    // Clamp: rounding can push the ratio just past ±1
    let cos_angle = (dot / denom).clamp(-1.0, 1.0);
    let angle = cos_angle.acos().to_degrees();
    if !angle.is_finite() {
        return Err(GeometryError::Degenerate);
    }

    Ok(angle)
}
