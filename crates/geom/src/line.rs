use crate::math::{Point, Vector};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.from.lerp(self.to, t)
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Return the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn basic() {
    let s = LineSegment {
        from: point(1.0, 1.0),
        to: point(3.0, 1.0),
    };

    assert_eq!(s.length(), 2.0);
    assert_eq!(s.sample(0.0), s.from);
    assert_eq!(s.sample(0.5), point(2.0, 1.0));
    assert_eq!(s.sample(1.0), s.to);
}

#[test]
fn split_range() {
    let s = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    };

    let sub = s.split_range(0.2..0.7);
    assert_eq!(sub.from, point(2.0, 0.0));
    assert_eq!(sub.to, point(7.0, 0.0));
}
