#![deny(bare_trait_objects)]
#![allow(clippy::too_many_arguments)]

//! Projection of periodic track patterns along guide paths.
//!
//! A [`Pattern`] describes one period's worth of copper and silkscreen
//! features in pattern space: `u` along the path in `[0, 1]`, transverse
//! offsets in board units (positive to the path's left). [`project`] tiles
//! the pattern along a [`GuidePath`](path::GuidePath) and feeds the resulting
//! board-space primitives to an [`Emitter`].
//!
//! ```
//! use curvetrack_project::path::geom::math::point;
//! use curvetrack_project::path::GuidePath;
//! use curvetrack_project::{project, BufferEmitter, Layer, Pattern, PatternElement};
//!
//! let mut builder = GuidePath::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(50.0, 0.0));
//! let guide = builder.build().unwrap();
//!
//! let copper = Layer::routing(0);
//! let pattern = Pattern::new(vec![
//!     PatternElement::parallel_line(0.0, 1.0, 1.0, 0.25, copper),
//! ]).unwrap();
//!
//! let mut emitter = BufferEmitter::new();
//! let summary = project(&guide, &pattern, 5.0, &mut emitter).unwrap();
//! assert_eq!(summary.periods, 10);
//! ```

pub extern crate curvetrack_path as path;

mod emitter;
mod pattern;
mod projector;

pub use crate::emitter::{BufferEmitter, EmitError, Emitter, Primitive};
pub use crate::pattern::{Layer, Pattern, PatternElement, PatternError};
pub use crate::projector::{
    project, project_with_options, PitchMode, ProjectError, ProjectionOptions, ProjectionSummary,
};
