//! Circular arc related maths and tools.

use crate::math::{point, vector, Angle, Point, Vector};

use core::ops::Range;

/// A circular arc, stored as center, radius and a directed angular sweep.
///
/// The parameterization is by angular fraction: `t = 0` maps to `start_angle`
/// and `t = 1` to `start_angle + sweep_angle`. A positive `sweep_angle`
/// travels counterclockwise (a left turn in a y-up frame).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CircularArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
}

impl CircularArc {
    /// Build the arc passing through three points, traversed `from → mid → to`.
    ///
    /// Returns `None` when `mid` deviates from the `from`/`to` chord by no
    /// more than `tolerance` (including exactly collinear input): such an arc
    /// has a near-infinite radius and callers are expected to fall back to a
    /// line segment instead of letting the center computation blow up.
    pub fn from_three_points(from: Point, mid: Point, to: Point, tolerance: f64) -> Option<Self> {
        let v1 = mid - from;
        let v2 = to - from;
        let cross = v1.cross(v2);

        let chord = v2.length();
        if chord == 0.0 || cross.abs() <= tolerance * chord {
            // The deviation of `mid` from the chord is `cross / chord`.
            return None;
        }

        let d = 2.0 * cross;
        let sq1 = v1.square_length();
        let sq2 = v2.square_length();
        let center = point(
            from.x + (v2.y * sq1 - v1.y * sq2) / d,
            from.y + (v1.x * sq2 - v2.x * sq1) / d,
        );

        let radius = (from - center).length();
        let start_angle = (from - center).angle_from_x_axis();
        let end_angle = (to - center).angle_from_x_axis();

        // `cross` tells the traversal orientation; the positive modulo picks
        // the sweep that passes through `mid`.
        let sweep_angle = if cross > 0.0 {
            (end_angle - start_angle).positive()
        } else {
            -(start_angle - end_angle).positive()
        };

        Some(CircularArc {
            center,
            radius,
            start_angle,
            sweep_angle,
        })
    }

    /// The angle at parameter t (expecting t between 0 and 1).
    #[inline]
    pub fn angle_at(&self, t: f64) -> Angle {
        self.start_angle + self.sweep_angle * t
    }

    /// The point of the circle at a given angle.
    #[inline]
    pub fn point_at_angle(&self, angle: Angle) -> Point {
        let (sin, cos) = angle.sin_cos();
        self.center + vector(cos, sin) * self.radius
    }

    /// The unit tangent (in the direction of travel) at a given angle.
    pub fn tangent_at_angle(&self, angle: Angle) -> Vector {
        let (sin, cos) = angle.sin_cos();
        if self.sweep_angle.get() >= 0.0 {
            vector(-sin, cos)
        } else {
            vector(sin, -cos)
        }
    }

    /// Sample the arc at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.point_at_angle(self.angle_at(t))
    }

    /// Sample the arc's unit tangent at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample_tangent(&self, t: f64) -> Vector {
        self.tangent_at_angle(self.angle_at(t))
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }

    /// The arc length, `radius · |sweep|`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep_angle.get().abs()
    }

    /// The signed curvature: `+1/radius` for a counterclockwise (left turning)
    /// sweep, `-1/radius` for a clockwise one.
    #[inline]
    pub fn curvature(&self) -> f64 {
        if self.sweep_angle.get() >= 0.0 {
            1.0 / self.radius
        } else {
            -1.0 / self.radius
        }
    }

    /// Return the sub-arc inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let angle_1 = self.sweep_angle * t_range.start;
        let angle_2 = self.sweep_angle * t_range.end;

        CircularArc {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle + angle_1,
            sweep_angle: angle_2 - angle_1,
        }
    }
}

#[cfg(test)]
use core::f64::consts::PI;

#[test]
fn three_points_ccw() {
    let arc = CircularArc::from_three_points(
        point(1.0, 0.0),
        point(0.0, 1.0),
        point(-1.0, 0.0),
        1e-9,
    )
    .unwrap();

    assert!((arc.center - point(0.0, 0.0)).length() < 1e-12);
    assert!((arc.radius - 1.0).abs() < 1e-12);
    assert!((arc.sweep_angle.get() - PI).abs() < 1e-12);
    assert!(arc.curvature() > 0.0);
    assert!((arc.length() - PI).abs() < 1e-12);

    assert!((arc.sample(0.0) - point(1.0, 0.0)).length() < 1e-12);
    assert!((arc.sample(0.5) - point(0.0, 1.0)).length() < 1e-12);
    assert!((arc.sample(1.0) - point(-1.0, 0.0)).length() < 1e-12);

    // Traveling counterclockwise from (1, 0) means heading +y.
    assert!((arc.sample_tangent(0.0) - vector(0.0, 1.0)).length() < 1e-12);
}

#[test]
fn three_points_cw() {
    let arc = CircularArc::from_three_points(
        point(-1.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 0.0),
        1e-9,
    )
    .unwrap();

    assert!((arc.sweep_angle.get() + PI).abs() < 1e-12);
    assert!(arc.curvature() < 0.0);
    assert!((arc.sample_tangent(0.0) - vector(0.0, 1.0)).length() < 1e-12);
    assert!((arc.to() - point(1.0, 0.0)).length() < 1e-12);
}

#[test]
fn collinear_is_rejected() {
    assert!(CircularArc::from_three_points(
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        1e-9,
    )
    .is_none());

    // Deviation below the tolerance counts as collinear too.
    assert!(CircularArc::from_three_points(
        point(0.0, 0.0),
        point(1.0, 1e-7),
        point(2.0, 0.0),
        1e-6,
    )
    .is_none());
}

#[test]
fn split_range_preserves_angles() {
    let arc = CircularArc {
        center: point(0.0, 0.0),
        radius: 2.0,
        start_angle: Angle::radians(0.0),
        sweep_angle: Angle::radians(PI),
    };

    let sub = arc.split_range(0.25..0.75);
    assert!((sub.start_angle.get() - PI * 0.25).abs() < 1e-12);
    assert!((sub.sweep_angle.get() - PI * 0.5).abs() < 1e-12);
    assert!((sub.length() - arc.length() * 0.5).abs() < 1e-12);
}
