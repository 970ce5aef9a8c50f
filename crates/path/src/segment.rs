//! The straight/arc segment variants a guide path is made of.

use crate::geom::math::{Point, Vector};
use crate::geom::utils::tangent;
use crate::geom::{CircularArc, LineSegment};
use crate::PathError;

use core::ops::Range;

/// One segment of a guide path: a straight line or a circular arc.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum GuideSegment {
    Line(LineSegment),
    Arc(CircularArc),
}

impl GuideSegment {
    /// A validated straight segment. Fails if the end points are closer than
    /// `tolerance`. Callers building a whole path attach the segment index
    /// themselves (see [`PathError::CoincidentPoints`]).
    pub fn line(from: Point, to: Point, tolerance: f64) -> Result<Self, PathError> {
        if (to - from).length() <= tolerance {
            return Err(PathError::DegenerateSegment);
        }

        Ok(GuideSegment::Line(LineSegment { from, to }))
    }

    /// A validated arc segment in the three-point form.
    ///
    /// If `mid` deviates from the chord by no more than `tolerance` the
    /// segment degrades to a straight line rather than producing an arc of
    /// near-infinite radius.
    pub fn arc(from: Point, mid: Point, to: Point, tolerance: f64) -> Result<Self, PathError> {
        if (to - from).length() <= tolerance {
            return Err(PathError::DegenerateSegment);
        }

        match CircularArc::from_three_points(from, mid, to, tolerance) {
            Some(arc) => Ok(GuideSegment::Arc(arc)),
            None => Ok(GuideSegment::Line(LineSegment { from, to })),
        }
    }

    /// The arc length of the segment.
    pub fn length(&self) -> f64 {
        match self {
            GuideSegment::Line(line) => line.length(),
            GuideSegment::Arc(arc) => arc.length(),
        }
    }

    /// The segment's start point.
    pub fn from(&self) -> Point {
        match self {
            GuideSegment::Line(line) => line.from,
            GuideSegment::Arc(arc) => arc.from(),
        }
    }

    /// The segment's end point.
    pub fn to(&self) -> Point {
        match self {
            GuideSegment::Line(line) => line.to,
            GuideSegment::Arc(arc) => arc.to(),
        }
    }

    /// Sample the segment at t (expecting t between 0 and 1).
    ///
    /// On arcs, t is the *angular* fraction of the sweep rather than a
    /// fraction of some offset track's arc length. This is what keeps tracks
    /// at different transverse offsets angularly synchronized.
    pub fn sample(&self, t: f64) -> Point {
        match self {
            GuideSegment::Line(line) => line.sample(t),
            GuideSegment::Arc(arc) => arc.sample(t),
        }
    }

    /// The unit tangent (direction of travel) at t.
    pub fn sample_tangent(&self, t: f64) -> Vector {
        match self {
            GuideSegment::Line(line) => line.to_vector().normalize(),
            GuideSegment::Arc(arc) => arc.sample_tangent(t),
        }
    }

    /// The signed curvature: zero on lines, `±1/radius` on arcs
    /// (positive turning left).
    pub fn curvature(&self) -> f64 {
        match self {
            GuideSegment::Line(_) => 0.0,
            GuideSegment::Arc(arc) => arc.curvature(),
        }
    }

    /// The sub-segment covering a range of t.
    ///
    /// On arcs the range is angular, so the sub-arc's end points coincide
    /// with samples of the whole segment at the range bounds.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        match self {
            GuideSegment::Line(line) => GuideSegment::Line(line.split_range(t_range)),
            GuideSegment::Arc(arc) => GuideSegment::Arc(arc.split_range(t_range)),
        }
    }

    /// The point at transverse `offset` from the centerline position t,
    /// measured along the local left normal.
    ///
    /// On an arc this lands at radius `radius - offset` (left turn) or
    /// `radius + offset` (right turn) from the arc center, at the *same
    /// angle* as the centerline point, which reproduces the foreshortening
    /// of offset tracks on the inside of a curve.
    pub fn point_at_offset(&self, t: f64, offset: f64) -> Point {
        let position = self.sample(t);
        if offset == 0.0 {
            return position;
        }

        position + tangent(self.sample_tangent(t)) * offset
    }
}

#[cfg(test)]
use crate::geom::math::{point, vector};
#[cfg(test)]
use core::f64::consts::FRAC_PI_2;

#[test]
fn line_rejects_coincident_points() {
    assert_eq!(
        GuideSegment::line(point(1.0, 1.0), point(1.0, 1.0), 1e-6),
        Err(PathError::DegenerateSegment)
    );
    assert_eq!(
        GuideSegment::arc(point(2.0, 2.0), point(3.0, 3.0), point(2.0, 2.0), 1e-6),
        Err(PathError::DegenerateSegment)
    );
    assert!(GuideSegment::line(point(1.0, 1.0), point(2.0, 1.0), 1e-6).is_ok());
}

#[test]
fn flat_arc_degrades_to_line() {
    let seg = GuideSegment::arc(
        point(0.0, 0.0),
        point(5.0, 1e-9),
        point(10.0, 0.0),
        1e-6,
    )
    .unwrap();

    match seg {
        GuideSegment::Line(line) => assert_eq!(line.to, point(10.0, 0.0)),
        GuideSegment::Arc(_) => panic!("expected a line fallback"),
    }
}

#[test]
fn offset_points_on_an_arc() {
    // Quarter circle of radius 10 around the origin, left turning.
    let seg = GuideSegment::arc(
        point(10.0, 0.0),
        point(10.0 / 2f64.sqrt(), 10.0 / 2f64.sqrt()),
        point(0.0, 10.0),
        1e-9,
    )
    .unwrap();

    assert!((seg.length() - 10.0 * FRAC_PI_2).abs() < 1e-9);
    assert!(seg.curvature() > 0.0);

    // At t = 0 the heading is +y, so the left normal points to -x and a
    // positive offset moves toward the arc center.
    let inside = seg.point_at_offset(0.0, 2.0);
    assert!((inside - point(8.0, 0.0)).length() < 1e-9);

    let outside = seg.point_at_offset(0.0, -2.0);
    assert!((outside - point(12.0, 0.0)).length() < 1e-9);

    // Half way through the sweep the offset point sits at the same angle as
    // the centerline point, at the reduced radius.
    let mid_inside = seg.point_at_offset(0.5, 2.0);
    assert!((mid_inside - point(8.0 / 2f64.sqrt(), 8.0 / 2f64.sqrt())).length() < 1e-9);
}

#[test]
fn split_range_matches_whole_segment_samples() {
    let line = GuideSegment::line(point(0.0, 0.0), point(10.0, 0.0), 1e-6).unwrap();
    let sub = line.split_range(0.2..0.7);
    assert!((sub.from() - point(2.0, 0.0)).length() < 1e-12);
    assert!((sub.to() - point(7.0, 0.0)).length() < 1e-12);

    let seg = GuideSegment::arc(
        point(10.0, 0.0),
        point(10.0 / 2f64.sqrt(), 10.0 / 2f64.sqrt()),
        point(0.0, 10.0),
        1e-9,
    )
    .unwrap();
    let sub = seg.split_range(0.25..0.75);
    assert!((sub.from() - seg.sample(0.25)).length() < 1e-12);
    assert!((sub.to() - seg.sample(0.75)).length() < 1e-12);
    // The middle of the sub-range is the middle of the whole arc, so the
    // offset points agree too.
    assert!((sub.point_at_offset(0.5, 2.0) - seg.point_at_offset(0.5, 2.0)).length() < 1e-12);
}

#[test]
fn offset_points_on_a_line() {
    let seg = GuideSegment::line(point(0.0, 0.0), point(10.0, 0.0), 1e-6).unwrap();
    assert_eq!(seg.sample_tangent(0.3), vector(1.0, 0.0));
    assert_eq!(seg.point_at_offset(0.5, 3.0), point(5.0, 3.0));
    assert_eq!(seg.point_at_offset(0.5, -3.0), point(5.0, -3.0));
}
