#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Guide path data structure for the curvetrack engine.
//!
//! A [`GuidePath`] is an immutable sequence of contiguous straight and
//! circular-arc segments, typically traced from a CAD drawing, along which a
//! periodic track pattern is projected. The path knows its total arc length
//! and maps an arc-length position to a point, unit tangent and signed
//! curvature (see [`GuidePath::sample`]).
//!
//! Paths are built either with the [`GuidePathBuilder`]
//! (`begin`/`line_to`/`arc_to`/`build`) or from an already-parsed segment
//! list via [`GuidePath::from_segments`]. Both construction routes perform
//! all degeneracy and continuity validation eagerly, so a `GuidePath` value
//! is always well formed.
//!
//! This crate is reexported in [curvetrack](https://docs.rs/curvetrack/).
//!
//! # Examples
//!
//! ```
//! use curvetrack_path::GuidePath;
//! use curvetrack_path::geom::math::point;
//!
//! let mut builder = GuidePath::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(50.0, 0.0));
//! builder.arc_to(point(85.355, 14.645), point(100.0, 50.0));
//! let path = builder.build().unwrap();
//!
//! let sample = path.sample(25.0).unwrap();
//! assert_eq!(sample.position(), point(25.0, 0.0));
//! ```

pub use curvetrack_geom as geom;

mod guide;
mod segment;

#[doc(inline)]
pub use crate::guide::{GuidePath, GuidePathBuilder, PathSample};
#[doc(inline)]
pub use crate::segment::GuideSegment;

use thiserror::Error;

/// Default tolerance, in board units (mm), below which two points are
/// considered coincident and an arc's deviation from its chord is considered
/// zero curvature.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// The errors of guide path construction and sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// The path contains no segments.
    #[error("guide path has no segments")]
    Empty,

    /// A standalone segment's end points are coincident (within tolerance).
    #[error("segment end points are coincident")]
    DegenerateSegment,

    /// A segment's end points are coincident (within tolerance).
    #[error("segment {index} has coincident end points")]
    CoincidentPoints { index: usize },

    /// A segment does not start where the previous one ends.
    #[error("segment {index} does not join the end of the previous segment (gap of {gap} mm)")]
    Discontinuity { index: usize, gap: f64 },

    /// An arc-length query outside of `[0, length]`.
    #[error("position {position} is outside of the path range [0, {length}]")]
    OutOfRange { position: f64, length: f64 },
}
