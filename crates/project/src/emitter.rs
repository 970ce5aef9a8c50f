//! The sink side of a projection: an abstract host board model.

use crate::pattern::Layer;
use curvetrack_path::geom::math::Point;

use std::error::Error;
use std::fmt;

/// A failure reported by an emitter, wrapping the host's own error.
#[derive(Debug)]
pub struct EmitError {
    source: Box<dyn Error + Send + Sync>,
}

impl EmitError {
    pub fn new<E: Into<Box<dyn Error + Send + Sync>>>(source: E) -> Self {
        EmitError {
            source: source.into(),
        }
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "emitter rejected a primitive: {}", self.source)
    }
}

impl Error for EmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Receives the projected primitives, one call per primitive, in board
/// coordinates.
///
/// `connected` is true when the geometry lives on a routing layer and must
/// become an electrically connected track in the host; otherwise it is a
/// drawn shape with the same geometry. The projector stops at the first
/// error an emitter returns.
pub trait Emitter {
    fn emit_line(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    ) -> Result<(), EmitError>;

    /// A circular arc through three points (start, on-arc midpoint, end).
    fn emit_arc(
        &mut self,
        from: Point,
        mid: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    ) -> Result<(), EmitError>;

    fn emit_via(&mut self, center: Point, drill: f64, pad: f64) -> Result<(), EmitError>;
}

/// A board-space primitive as captured by [`BufferEmitter`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    },
    Arc {
        from: Point,
        mid: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    },
    Via {
        center: Point,
        drill: f64,
        pad: f64,
    },
}

/// An emitter that records every primitive into a `Vec`.
///
/// Useful for tests and for hosts that want to post-process the whole
/// projection output at once.
#[derive(Clone, Debug, Default)]
pub struct BufferEmitter {
    primitives: Vec<Primitive>,
}

impl BufferEmitter {
    pub fn new() -> Self {
        BufferEmitter::default()
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }
}

impl Emitter for BufferEmitter {
    fn emit_line(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    ) -> Result<(), EmitError> {
        self.primitives.push(Primitive::Line {
            from,
            to,
            width,
            layer,
            connected,
        });
        Ok(())
    }

    fn emit_arc(
        &mut self,
        from: Point,
        mid: Point,
        to: Point,
        width: f64,
        layer: Layer,
        connected: bool,
    ) -> Result<(), EmitError> {
        self.primitives.push(Primitive::Arc {
            from,
            mid,
            to,
            width,
            layer,
            connected,
        });
        Ok(())
    }

    fn emit_via(&mut self, center: Point, drill: f64, pad: f64) -> Result<(), EmitError> {
        self.primitives.push(Primitive::Via { center, drill, pad });
        Ok(())
    }
}

#[test]
fn buffer_emitter_records_in_order() {
    use curvetrack_path::geom::math::point;

    let layer = Layer::routing(0);
    let mut emitter = BufferEmitter::new();
    emitter
        .emit_line(point(0.0, 0.0), point(1.0, 0.0), 0.25, layer, true)
        .unwrap();
    emitter.emit_via(point(1.0, 0.0), 0.3, 0.6).unwrap();

    assert_eq!(emitter.primitives().len(), 2);
    assert_eq!(
        emitter.primitives()[1],
        Primitive::Via {
            center: point(1.0, 0.0),
            drill: 0.3,
            pad: 0.6,
        }
    );
}
