//! Various geometry related helpers.

use crate::math::{vector, Vector};

/// Rotate a vector by 90 degrees counterclockwise: the *left normal* of a
/// heading in a y-up frame.
///
/// Transverse offsets throughout the engine are measured along this
/// direction, so a positive offset lands on the left-hand side of the path.
#[inline]
pub fn tangent(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

#[test]
fn left_normal() {
    // Heading +x, the left side is +y.
    assert_eq!(tangent(vector(1.0, 0.0)), vector(0.0, 1.0));
    // Heading +y, the left side is -x.
    assert_eq!(tangent(vector(0.0, 1.0)), vector(-1.0, 0.0));
}
