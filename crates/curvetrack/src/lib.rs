#![deny(bare_trait_objects)]

//! Projection of periodic track patterns along curved guide paths, for
//! synthesizing PCB tracks such as linear-motor windings.
//!
//! # Crates
//!
//! This meta-crate (`curvetrack`) reexports the following sub-crates for
//! convenience:
//!
//! * **curvetrack_project** - The pattern model, the projection engine and
//!   the emitter interface.
//! * **curvetrack_path** - Guide paths built from line segments and circular
//!   arcs, with arc-length sampling.
//! * **curvetrack_geom** - 2d line/arc primitives and math type aliases.
//!
//! Each `curvetrack_<name>` crate is reexported as a `<name>` module.
//!
//! # Example
//!
//! Tiling a simple two-trace pattern ten times along a straight path:
//!
//! ```
//! use curvetrack::math::point;
//! use curvetrack::path::GuidePath;
//! use curvetrack::project::{
//!     project, BufferEmitter, Layer, Pattern, PatternElement,
//! };
//!
//! fn main() {
//!     let mut builder = GuidePath::builder();
//!     builder.begin(point(0.0, 0.0));
//!     builder.line_to(point(100.0, 0.0));
//!     let guide = builder.build().unwrap();
//!
//!     let copper = Layer::routing(0);
//!     let pattern = Pattern::new(vec![
//!         PatternElement::parallel_line(0.0, 1.0, 2.0, 0.25, copper),
//!         PatternElement::parallel_line(0.0, 1.0, -2.0, 0.25, copper),
//!         PatternElement::via(0.0, 2.0),
//!     ])
//!     .unwrap();
//!
//!     let mut emitter = BufferEmitter::new();
//!     let summary = project(&guide, &pattern, 10.0, &mut emitter).unwrap();
//!
//!     println!(
//!         " -- {} periods, {} primitives",
//!         summary.periods,
//!         emitter.primitives().len()
//!     );
//! }
//! ```
//!
//! # Feature flags
//!
//! Serialization of patterns and guide paths using serde can be enabled on
//! each crate with the `serialization` feature flag (disabled by default).

pub extern crate curvetrack_project;

pub use curvetrack_project as project;
pub use project::path;
pub use path::geom;

pub use geom::math;
