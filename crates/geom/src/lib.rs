#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Geometric primitives for the curvetrack engine.
//!
//! This crate implements the small amount of 2D math the engine needs on top
//! of euclid:
//!
//! - line segments,
//! - circular arcs (center/radius/angles, with a three-point constructor),
//! - transverse offset helpers (the "left normal" of a heading).
//!
//! All coordinates are `f64` board units (millimeters). Angles follow the
//! usual mathematical convention: radians, counterclockwise positive in a
//! y-up frame.
//!
//! This crate is reexported in [curvetrack](https://docs.rs/curvetrack/).

// Reexport dependencies.
pub use euclid;

pub mod arc;
mod line;
pub mod utils;

#[doc(inline)]
pub use crate::arc::CircularArc;
#[doc(inline)]
pub use crate::line::LineSegment;

pub mod math {
    //! f64 versions of the euclid types used everywhere. The other curvetrack
    //! crates reexport them.

    use euclid;

    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for `euclid::default::Rotation2D<f64>`.
    pub type Rotation = euclid::default::Rotation2D<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}
