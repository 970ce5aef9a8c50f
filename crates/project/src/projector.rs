//! Tiles a pattern along a guide path and streams board-space primitives.

use crate::emitter::{EmitError, Emitter};
use crate::pattern::{Layer, Pattern, PatternElement};
use curvetrack_path::{GuidePath, GuideSegment, PathError};

use thiserror::Error;

/// How the pattern pitch relates to the path length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PitchMode {
    /// Tile whole periods at exactly the requested pitch and leave the
    /// remainder of the path bare.
    Fixed,
    /// Round the period count to the nearest whole number and stretch the
    /// pitch to `length / count` so the pattern covers the full path.
    Stretch,
}

impl Default for PitchMode {
    fn default() -> Self {
        PitchMode::Fixed
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ProjectionOptions {
    pub pitch_mode: PitchMode,
}

/// What a successful projection produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProjectionSummary {
    /// Whole pattern periods tiled along the path.
    pub periods: usize,
    /// Primitives accepted by the emitter.
    pub primitives: usize,
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("pitch {pitch} is not positive")]
    NonPositivePitch { pitch: f64 },
    #[error("guide path length {length} is shorter than one pitch {pitch}")]
    PathTooShort { length: f64, pitch: f64 },
    #[error("transverse offset {offset} reaches the center of an arc of radius {radius}")]
    OffsetExceedsRadius { offset: f64, radius: f64 },
    /// A sampling failure while emitting. The projector clamps every
    /// position it derives, so surfacing this indicates a bug here rather
    /// than bad input.
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("emitter failed after {emitted} primitives")]
    Emit {
        emitted: usize,
        #[source]
        source: EmitError,
    },
}

/// Project `pattern` along `guide` at the given `pitch`, feeding every
/// generated primitive to `emitter`.
///
/// Whole periods only: `floor(length / pitch)` of them, failing with
/// [`ProjectError::PathTooShort`] when none fit. All input validation
/// happens before the first emitter call, so a failing projection either
/// emitted nothing or stopped at an emitter error
/// ([`ProjectError::Emit`] carries the partial count).
pub fn project<E: Emitter>(
    guide: &GuidePath,
    pattern: &Pattern,
    pitch: f64,
    emitter: &mut E,
) -> Result<ProjectionSummary, ProjectError> {
    project_with_options(guide, pattern, pitch, emitter, &ProjectionOptions::default())
}

pub fn project_with_options<E: Emitter>(
    guide: &GuidePath,
    pattern: &Pattern,
    pitch: f64,
    emitter: &mut E,
    options: &ProjectionOptions,
) -> Result<ProjectionSummary, ProjectError> {
    if !(pitch > 0.0) || !pitch.is_finite() {
        return Err(ProjectError::NonPositivePitch { pitch });
    }

    let length = guide.length();
    let (periods, pitch) = match options.pitch_mode {
        PitchMode::Fixed => {
            let mut periods = (length / pitch).floor() as usize;
            // The division can round up across a period boundary.
            if periods > 0 && periods as f64 * pitch > length {
                periods -= 1;
            }
            (periods, pitch)
        }
        PitchMode::Stretch => {
            let periods = (length / pitch).round() as usize;
            if periods == 0 {
                return Err(ProjectError::PathTooShort { length, pitch });
            }
            (periods, length / periods as f64)
        }
    };
    if periods == 0 {
        return Err(ProjectError::PathTooShort { length, pitch });
    }

    check_offsets_against_arcs(guide, pattern)?;

    let mut projector = Projector {
        guide,
        pitch,
        length,
        emitter,
        emitted: 0,
    };

    for period in 0..periods {
        for element in pattern.elements() {
            projector.emit_element(period, element)?;
        }
    }

    Ok(ProjectionSummary {
        periods,
        primitives: projector.emitted,
    })
}

// A parallel track at offset d from an arc of signed curvature c has radius
// (1 - c*d) / |c|; it degenerates at the arc center when c*d reaches 1.
fn check_offsets_against_arcs(guide: &GuidePath, pattern: &Pattern) -> Result<(), ProjectError> {
    for segment in guide.segments() {
        let curvature = segment.curvature();
        if curvature == 0.0 {
            continue;
        }
        for element in pattern.elements() {
            if let PatternElement::ParallelLine { offset, .. } = *element {
                if curvature * offset >= 1.0 {
                    return Err(ProjectError::OffsetExceedsRadius {
                        offset,
                        radius: 1.0 / curvature.abs(),
                    });
                }
            }
        }
    }

    Ok(())
}

struct Projector<'l, E> {
    guide: &'l GuidePath,
    pitch: f64,
    length: f64,
    emitter: &'l mut E,
    emitted: usize,
}

impl<'l, E: Emitter> Projector<'l, E> {
    // Period boundaries tile exactly because u = 1 of period k and u = 0 of
    // period k + 1 both evaluate (k + 1) * pitch.
    fn position(&self, period: usize, u: f64) -> f64 {
        let position = (period as f64 + u) * self.pitch;
        position.min(self.length).max(0.0)
    }

    fn emit_element(&mut self, period: usize, element: &PatternElement) -> Result<(), ProjectError> {
        match *element {
            PatternElement::ParallelLine {
                u_start,
                u_end,
                offset,
                width,
                layer,
            } => {
                let start = self.position(period, u_start);
                let end = self.position(period, u_end);
                self.emit_parallel(start, end, offset, width, layer)
            }
            PatternElement::TransverseLine {
                offset_start,
                offset_end,
                u,
                width,
                layer,
            } => {
                let position = self.position(period, u);
                let from = self.guide.point_at_offset(position, offset_start)?;
                let to = self.guide.point_at_offset(position, offset_end)?;
                self.emit(|e| e.emit_line(from, to, width, layer, layer.is_routing()))
            }
            PatternElement::Via {
                u,
                offset,
                drill,
                pad,
            } => {
                let position = self.position(period, u);
                let center = self.guide.point_at_offset(position, offset)?;
                self.emit(|e| e.emit_via(center, drill, pad))
            }
        }
    }

    /// Walk the guide segments covered by the path interval `[start, end]`
    /// and emit one primitive per covered segment, so that arc portions come
    /// out as arcs and straight portions as lines.
    fn emit_parallel(
        &mut self,
        start: f64,
        end: f64,
        offset: f64,
        width: f64,
        layer: Layer,
    ) -> Result<(), ProjectError> {
        if end <= start {
            return Ok(());
        }

        let connected = layer.is_routing();
        let (mut index, _) = self.guide.locate(start)?;

        loop {
            let span = self.guide.segment_span(index);
            let a = start.max(span.start);
            let b = end.min(span.end);

            // Zero-length slivers occur when `start` sits exactly on the
            // joint `locate` attributes to the earlier segment.
            if b > a {
                let span_length = span.end - span.start;
                let t_a = (a - span.start) / span_length;
                let t_b = ((b - span.start) / span_length).min(1.0);
                let sub = self.guide.segments()[index].split_range(t_a..t_b);

                match sub {
                    GuideSegment::Line(..) => {
                        let from = sub.point_at_offset(0.0, offset);
                        let to = sub.point_at_offset(1.0, offset);
                        self.emit(|e| e.emit_line(from, to, width, layer, connected))?;
                    }
                    GuideSegment::Arc(..) => {
                        let from = sub.point_at_offset(0.0, offset);
                        let mid = sub.point_at_offset(0.5, offset);
                        let to = sub.point_at_offset(1.0, offset);
                        self.emit(|e| e.emit_arc(from, mid, to, width, layer, connected))?;
                    }
                }
            }

            if span.end >= end || index + 1 == self.guide.segments().len() {
                return Ok(());
            }
            index += 1;
        }
    }

    fn emit<F>(&mut self, f: F) -> Result<(), ProjectError>
    where
        F: FnOnce(&mut E) -> Result<(), EmitError>,
    {
        f(self.emitter).map_err(|source| ProjectError::Emit {
            emitted: self.emitted,
            source,
        })?;
        self.emitted += 1;

        Ok(())
    }
}

#[cfg(test)]
use crate::emitter::{BufferEmitter, Primitive};
#[cfg(test)]
use curvetrack_path::geom::math::point;

#[test]
fn too_short_emits_nothing() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(3.0, 0.0));
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0,
        1.0,
        0.0,
        0.25,
        Layer::routing(0),
    )])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    let result = project(&guide, &pattern, 5.0, &mut emitter);
    assert!(matches!(result, Err(ProjectError::PathTooShort { .. })));
    assert!(emitter.primitives().is_empty());
}

#[test]
fn non_positive_pitch() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    let guide = builder.build().unwrap();
    let pattern = Pattern::new(Vec::new()).unwrap();

    let mut emitter = BufferEmitter::new();
    assert!(matches!(
        project(&guide, &pattern, 0.0, &mut emitter),
        Err(ProjectError::NonPositivePitch { .. })
    ));
    assert!(matches!(
        project(&guide, &pattern, -1.0, &mut emitter),
        Err(ProjectError::NonPositivePitch { .. })
    ));
}

#[test]
fn offset_reaching_arc_center_is_rejected() {
    // Left quarter turn of radius 5 around (0, 5).
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.arc_to(
        point(5.0 / 2f64.sqrt(), 5.0 - 5.0 / 2f64.sqrt()),
        point(5.0, 5.0),
    );
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0,
        1.0,
        5.0,
        0.25,
        Layer::routing(0),
    )])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    let result = project(&guide, &pattern, 2.0, &mut emitter);
    assert!(matches!(
        result,
        Err(ProjectError::OffsetExceedsRadius { .. })
    ));
    assert!(emitter.primitives().is_empty());

    // The same offset on the outside of the turn is fine.
    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0,
        1.0,
        -5.0,
        0.25,
        Layer::routing(0),
    )])
    .unwrap();
    assert!(project(&guide, &pattern, 2.0, &mut emitter).is_ok());
}

#[test]
fn emit_failure_reports_partial_count() {
    struct FailingEmitter {
        accepted: usize,
        budget: usize,
    }

    impl Emitter for FailingEmitter {
        fn emit_line(
            &mut self,
            _from: curvetrack_path::geom::math::Point,
            _to: curvetrack_path::geom::math::Point,
            _width: f64,
            _layer: Layer,
            _connected: bool,
        ) -> Result<(), EmitError> {
            if self.accepted == self.budget {
                return Err(EmitError::new("board is full"));
            }
            self.accepted += 1;
            Ok(())
        }

        fn emit_arc(
            &mut self,
            _from: curvetrack_path::geom::math::Point,
            _mid: curvetrack_path::geom::math::Point,
            _to: curvetrack_path::geom::math::Point,
            _width: f64,
            _layer: Layer,
            _connected: bool,
        ) -> Result<(), EmitError> {
            Err(EmitError::new("no arcs"))
        }

        fn emit_via(
            &mut self,
            _center: curvetrack_path::geom::math::Point,
            _drill: f64,
            _pad: f64,
        ) -> Result<(), EmitError> {
            Err(EmitError::new("no vias"))
        }
    }

    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(50.0, 0.0));
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0,
        1.0,
        0.0,
        0.25,
        Layer::routing(0),
    )])
    .unwrap();

    let mut emitter = FailingEmitter {
        accepted: 0,
        budget: 3,
    };
    match project(&guide, &pattern, 5.0, &mut emitter) {
        Err(ProjectError::Emit { emitted, .. }) => assert_eq!(emitted, 3),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn stretch_covers_the_whole_path() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(23.0, 0.0));
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0,
        1.0,
        0.0,
        0.25,
        Layer::routing(0),
    )])
    .unwrap();

    let options = ProjectionOptions {
        pitch_mode: PitchMode::Stretch,
    };
    let mut emitter = BufferEmitter::new();
    let summary = project_with_options(&guide, &pattern, 5.0, &mut emitter, &options).unwrap();

    // round(23 / 5) = 5 periods at a stretched pitch of 4.6.
    assert_eq!(summary.periods, 5);
    match emitter.primitives()[4] {
        Primitive::Line { to, .. } => assert!((to - point(23.0, 0.0)).length() < 1e-9),
        ref other => panic!("unexpected primitive: {:?}", other),
    }
}
