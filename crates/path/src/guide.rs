//! The guide path: contiguous segments with cached arc-length measurements.

use crate::geom::math::{Point, Vector};
use crate::segment::GuideSegment;
use crate::{PathError, DEFAULT_TOLERANCE};

use core::ops::Range;

/// The result of sampling a guide path at an arc-length position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathSample {
    position: Point,
    tangent: Vector,
    curvature: f64,
}

impl PathSample {
    /// The point on the centerline.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The unit tangent (direction of travel).
    #[inline]
    pub fn tangent(&self) -> Vector {
        self.tangent
    }

    /// The signed curvature: zero on straight segments, `±1/radius` on arcs
    /// (positive turning left).
    #[inline]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }
}

/// An immutable sequence of contiguous guide segments with memoized
/// cumulative arc lengths.
///
/// Built once (from a [`GuidePathBuilder`] or [`GuidePath::from_segments`])
/// and consumed read-only afterwards. Only the segments travel over the
/// wire: deserialization routes through [`GuidePath::from_segments`], which
/// re-checks continuity and rebuilds the cumulative lengths.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<GuideSegment>", into = "Vec<GuideSegment>")
)]
pub struct GuidePath {
    segments: Vec<GuideSegment>,
    // cumulative[i] is the distance from the path start to the start of
    // segment i; the last entry is the total length.
    cumulative: Vec<f64>,
}

impl core::convert::TryFrom<Vec<GuideSegment>> for GuidePath {
    type Error = PathError;

    fn try_from(segments: Vec<GuideSegment>) -> Result<Self, PathError> {
        GuidePath::from_segments(segments, DEFAULT_TOLERANCE)
    }
}

impl From<GuidePath> for Vec<GuideSegment> {
    fn from(path: GuidePath) -> Self {
        path.segments
    }
}

impl GuidePath {
    /// Start building a path from scratch.
    pub fn builder() -> GuidePathBuilder {
        GuidePathBuilder::new()
    }

    /// Build a path from an already-parsed segment list, e.g. the output of
    /// a CAD drawing importer.
    ///
    /// Every segment must start where the previous one ends, within
    /// `tolerance`; zero-length segments are rejected.
    pub fn from_segments(
        segments: Vec<GuideSegment>,
        tolerance: f64,
    ) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        for (index, segment) in segments.iter().enumerate() {
            if segment.length() <= tolerance {
                return Err(PathError::CoincidentPoints { index });
            }
            if index > 0 {
                let gap = (segment.from() - segments[index - 1].to()).length();
                if gap > tolerance {
                    return Err(PathError::Discontinuity { index, gap });
                }
            }
        }

        Ok(Self::finish(segments))
    }

    fn finish(segments: Vec<GuideSegment>) -> Self {
        let mut cumulative = Vec::with_capacity(segments.len() + 1);
        let mut distance = 0.0;
        cumulative.push(0.0);
        for segment in &segments {
            distance += segment.length();
            cumulative.push(distance);
        }

        GuidePath {
            segments,
            cumulative,
        }
    }

    /// Total arc length, memoized at construction.
    #[inline]
    pub fn length(&self) -> f64 {
        self.cumulative[self.segments.len()]
    }

    /// The segments of the path.
    #[inline]
    pub fn segments(&self) -> &[GuideSegment] {
        &self.segments
    }

    /// The arc-length range `start..end` that segment `index` covers.
    ///
    /// The bounds are the memoized cumulative values, so adjacent spans share
    /// bit-identical boundary positions.
    #[inline]
    pub fn segment_span(&self, index: usize) -> Range<f64> {
        self.cumulative[index]..self.cumulative[index + 1]
    }

    /// Map an arc-length position to `(segment index, t)` where t is the
    /// segment-local parameter in `[0, 1]`.
    ///
    /// A position exactly on a joint maps to the earlier segment's end
    /// (`t = 1`). Guide paths have tens of segments at most, so this is a
    /// linear scan over the cumulative lengths.
    pub fn locate(&self, position: f64) -> Result<(usize, f64), PathError> {
        let length = self.length();
        if !position.is_finite() || position < 0.0 || position > length {
            return Err(PathError::OutOfRange { position, length });
        }

        for index in 0..self.segments.len() {
            let span = self.segment_span(index);
            if position <= span.end {
                let t = (position - span.start) / (span.end - span.start);
                return Ok((index, t.min(1.0)));
            }
        }

        // Rounding in the cumulative sum can leave `position == length`
        // marginally past the last entry.
        Ok((self.segments.len() - 1, 1.0))
    }

    /// Sample the path at an arc-length position in `[0, length]`.
    ///
    /// Fails with [`PathError::OutOfRange`] outside of that range; callers
    /// holding positions derived from float arithmetic are expected to clamp
    /// before querying.
    pub fn sample(&self, position: f64) -> Result<PathSample, PathError> {
        let (index, t) = self.locate(position)?;
        let segment = &self.segments[index];

        Ok(PathSample {
            position: segment.sample(t),
            tangent: segment.sample_tangent(t),
            curvature: segment.curvature(),
        })
    }

    /// The point at transverse `offset` (positive left) from the centerline
    /// position, projected through the local normal.
    pub fn point_at_offset(&self, position: f64, offset: f64) -> Result<Point, PathError> {
        let (index, t) = self.locate(position)?;
        Ok(self.segments[index].point_at_offset(t, offset))
    }
}

enum Command {
    LineTo(Point),
    ArcTo { mid: Point, to: Point },
}

/// Builds a [`GuidePath`] segment by segment.
///
/// All validation happens in [`build`](GuidePathBuilder::build); the `*_to`
/// methods only record commands. Continuity holds by construction since each
/// segment starts at the previous end point.
pub struct GuidePathBuilder {
    start: Option<Point>,
    commands: Vec<Command>,
    tolerance: f64,
}

impl GuidePathBuilder {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// A builder using `tolerance` for degeneracy checks instead of
    /// [`DEFAULT_TOLERANCE`].
    pub fn with_tolerance(tolerance: f64) -> Self {
        GuidePathBuilder {
            start: None,
            commands: Vec::new(),
            tolerance,
        }
    }

    /// Set the path's start point. Must be called before any `*_to` method.
    pub fn begin(&mut self, at: Point) {
        debug_assert!(self.commands.is_empty());
        self.start = Some(at);
    }

    /// Add a straight segment from the current end point.
    pub fn line_to(&mut self, to: Point) {
        debug_assert!(self.start.is_some());
        self.commands.push(Command::LineTo(to));
    }

    /// Add a circular arc from the current end point, passing through `mid`.
    pub fn arc_to(&mut self, mid: Point, to: Point) {
        debug_assert!(self.start.is_some());
        self.commands.push(Command::ArcTo { mid, to });
    }

    /// Validate and build the path.
    pub fn build(self) -> Result<GuidePath, PathError> {
        let mut current = match self.start {
            Some(at) if !self.commands.is_empty() => at,
            _ => return Err(PathError::Empty),
        };

        let mut segments = Vec::with_capacity(self.commands.len());
        for (index, command) in self.commands.into_iter().enumerate() {
            let segment = match command {
                Command::LineTo(to) => GuideSegment::line(current, to, self.tolerance),
                Command::ArcTo { mid, to } => {
                    GuideSegment::arc(current, mid, to, self.tolerance)
                }
            }
            .map_err(|_| PathError::CoincidentPoints { index })?;

            current = segment.to();
            segments.push(segment);
        }

        Ok(GuidePath::finish(segments))
    }
}

impl Default for GuidePathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
use crate::geom::math::{point, vector};
#[cfg(test)]
use core::f64::consts::FRAC_PI_2;

#[test]
fn sample_straight() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    let path = builder.build().unwrap();

    assert_eq!(path.length(), 20.0);

    let s = path.sample(5.0).unwrap();
    assert_eq!(s.position(), point(5.0, 0.0));
    assert_eq!(s.tangent(), vector(1.0, 0.0));
    assert_eq!(s.curvature(), 0.0);

    let s = path.sample(15.0).unwrap();
    assert_eq!(s.position(), point(10.0, 5.0));
    assert_eq!(s.tangent(), vector(0.0, 1.0));

    // A joint position belongs to the earlier segment's end.
    let (index, t) = path.locate(10.0).unwrap();
    assert_eq!((index, t), (0, 1.0));
}

#[test]
fn sample_arc() {
    // Straight run, then a left quarter turn of radius 10 around (10, 10).
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.arc_to(
        point(10.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt()),
        point(20.0, 10.0),
    );
    let path = builder.build().unwrap();

    let arc_length = 10.0 * FRAC_PI_2;
    assert!((path.length() - (10.0 + arc_length)).abs() < 1e-9);

    // Half way through the arc the heading is 45 degrees up.
    let s = path.sample(10.0 + arc_length * 0.5).unwrap();
    let expected = point(10.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt());
    assert!((s.position() - expected).length() < 1e-9);
    assert!((s.tangent() - vector(1.0 / 2f64.sqrt(), 1.0 / 2f64.sqrt())).length() < 1e-9);
    assert!((s.curvature() - 0.1).abs() < 1e-12);

    // End of the arc.
    let s = path.sample(path.length()).unwrap();
    assert!((s.position() - point(20.0, 10.0)).length() < 1e-9);
    assert!((s.tangent() - vector(0.0, 1.0)).length() < 1e-9);
}

#[test]
fn out_of_range() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    let path = builder.build().unwrap();

    assert_eq!(
        path.sample(-1.0),
        Err(PathError::OutOfRange {
            position: -1.0,
            length: 10.0
        })
    );
    assert!(path.sample(10.0).is_ok());
    assert!(path.sample(10.5).is_err());
}

#[test]
fn from_segments_validates_continuity() {
    let tolerance = 1e-6;
    let a = GuideSegment::line(point(0.0, 0.0), point(10.0, 0.0), tolerance).unwrap();
    let b = GuideSegment::line(point(10.0, 0.0), point(10.0, 10.0), tolerance).unwrap();
    let disconnected = GuideSegment::line(point(11.0, 0.0), point(20.0, 0.0), tolerance).unwrap();

    assert!(GuidePath::from_segments(vec![a, b], tolerance).is_ok());

    assert_eq!(
        GuidePath::from_segments(vec![a, disconnected], tolerance),
        Err(PathError::Discontinuity { index: 1, gap: 1.0 })
    );

    assert_eq!(
        GuidePath::from_segments(Vec::new(), tolerance),
        Err(PathError::Empty)
    );
}

#[test]
fn empty_builder() {
    assert!(GuidePath::builder().build().is_err());
}

#[test]
fn offset_across_a_joint() {
    // Straight run then a left quarter turn of radius 10 around (10, 10).
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.arc_to(
        point(10.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt()),
        point(20.0, 10.0),
    );
    let path = builder.build().unwrap();

    // On the straight part a positive offset moves left of the +x heading.
    let p = path.point_at_offset(5.0, 2.0).unwrap();
    assert!((p - point(5.0, 2.0)).length() < 1e-9);

    // At the joint, both the line's end and the arc's start agree on the
    // offset point.
    let p = path.point_at_offset(10.0, 2.0).unwrap();
    assert!((p - point(10.0, 2.0)).length() < 1e-9);

    // At the end of the arc the heading is +y, so the offset moves to -x,
    // toward the arc center.
    let p = path.point_at_offset(path.length(), 2.0).unwrap();
    assert!((p - point(18.0, 10.0)).length() < 1e-9);

    assert!(path.point_at_offset(-1.0, 2.0).is_err());
}

#[cfg(feature = "serialization")]
#[test]
fn deserialization_rebuilds_measurements() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.arc_to(
        point(10.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt()),
        point(20.0, 10.0),
    );
    let path = builder.build().unwrap();

    let json = serde_json::to_string(&path).unwrap();
    let decoded: GuidePath = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, path);
    assert_eq!(decoded.length(), path.length());

    // Disconnected segments on the wire are rejected the same way
    // from_segments rejects them.
    let tolerance = 1e-6;
    let segments = vec![
        GuideSegment::line(point(0.0, 0.0), point(10.0, 0.0), tolerance).unwrap(),
        GuideSegment::line(point(11.0, 0.0), point(20.0, 0.0), tolerance).unwrap(),
    ];
    let json = serde_json::to_string(&segments).unwrap();
    assert!(serde_json::from_str::<GuidePath>(&json).is_err());
}
