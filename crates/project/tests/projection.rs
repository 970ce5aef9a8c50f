use curvetrack_project::path::geom::math::{point, Point};
use curvetrack_project::path::geom::CircularArc;
use curvetrack_project::path::GuidePath;
use curvetrack_project::{
    project, project_with_options, BufferEmitter, Layer, Pattern, PatternElement, PitchMode,
    Primitive, ProjectionOptions,
};

use std::f64::consts::FRAC_PI_2;

const COPPER: Layer = Layer::routing(0);
const SILK: Layer = Layer::graphic(7);

fn straight_guide(length: f64) -> GuidePath {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(length, 0.0));
    builder.build().unwrap()
}

// A left quarter turn of the given radius, starting at the origin heading +x.
fn quarter_turn(radius: f64) -> GuidePath {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.arc_to(
        point(
            radius / 2f64.sqrt(),
            radius - radius / 2f64.sqrt(),
        ),
        point(radius, radius),
    );
    builder.build().unwrap()
}

#[test]
fn straight_tiling_has_no_gaps() {
    let guide = straight_guide(50.0);
    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0, 1.0, 0.0, 0.25, COPPER,
    )])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    let summary = project(&guide, &pattern, 5.0, &mut emitter).unwrap();

    assert_eq!(summary.periods, 10);
    assert_eq!(summary.primitives, 10);

    let mut previous_end: Option<Point> = None;
    for primitive in emitter.primitives() {
        match *primitive {
            Primitive::Line {
                from,
                to,
                width,
                layer,
                connected,
            } => {
                assert_eq!(width, 0.25);
                assert_eq!(layer, COPPER);
                assert!(connected);
                if let Some(end) = previous_end {
                    assert!((from - end).length() < 1e-9);
                }
                previous_end = Some(to);
            }
            ref other => panic!("expected a line, got {:?}", other),
        }
    }
    assert!((previous_end.unwrap() - point(50.0, 0.0)).length() < 1e-9);
}

#[test]
fn offset_track_length_on_an_arc() {
    // Radius 50 mm, 90 degree left turn. The track at offset +5 (inside the
    // turn) must measure (50 - 5) * pi/2, not 50 * pi/2.
    let radius = 50.0;
    let offset = 5.0;
    let guide = quarter_turn(radius);

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0, 1.0, offset, 0.25, COPPER,
    )])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    let options = ProjectionOptions {
        pitch_mode: PitchMode::Stretch,
    };
    let summary =
        project_with_options(&guide, &pattern, guide.length() / 5.0, &mut emitter, &options)
            .unwrap();
    assert_eq!(summary.periods, 5);

    let mut track_length = 0.0;
    for primitive in emitter.primitives() {
        match *primitive {
            Primitive::Arc { from, mid, to, .. } => {
                let arc = CircularArc::from_three_points(from, mid, to, 1e-9).unwrap();
                assert!((arc.radius - (radius - offset)).abs() < 1e-6);
                track_length += arc.length();
            }
            ref other => panic!("expected an arc, got {:?}", other),
        }
    }
    assert!((track_length - (radius - offset) * FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn projection_is_deterministic() {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(20.0, 0.0));
    builder.arc_to(
        point(20.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt()),
        point(30.0, 10.0),
    );
    builder.line_to(point(30.0, 40.0));
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![
        PatternElement::parallel_line(0.0, 1.0, 2.0, 0.25, COPPER),
        PatternElement::parallel_line(0.0, 1.0, -2.0, 0.25, COPPER),
        PatternElement::transverse_line(-2.0, 2.0, 0.5, 0.15, SILK),
        PatternElement::via(0.0, 2.0),
    ])
    .unwrap();

    let mut first = BufferEmitter::new();
    let mut second = BufferEmitter::new();
    project(&guide, &pattern, 4.0, &mut first).unwrap();
    project(&guide, &pattern, 4.0, &mut second).unwrap();

    assert_eq!(first.primitives(), second.primitives());
}

#[test]
fn vias_align_across_period_boundaries() {
    let guide = quarter_turn(30.0);
    let pitch = guide.length() / 4.0;

    let at_start = Pattern::new(vec![PatternElement::via(0.0, 3.0)]).unwrap();
    let at_end = Pattern::new(vec![PatternElement::via(1.0, 3.0)]).unwrap();

    let mut starts = BufferEmitter::new();
    let mut ends = BufferEmitter::new();
    project(&guide, &at_start, pitch, &mut starts).unwrap();
    project(&guide, &at_end, pitch, &mut ends).unwrap();

    // The u = 1 via of period k sits exactly where the u = 0 via of period
    // k + 1 does.
    for k in 0..3 {
        let end = match ends.primitives()[k] {
            Primitive::Via { center, .. } => center,
            ref other => panic!("expected a via, got {:?}", other),
        };
        let next_start = match starts.primitives()[k + 1] {
            Primitive::Via { center, .. } => center,
            ref other => panic!("expected a via, got {:?}", other),
        };
        assert!((end - next_start).length() < 1e-9);
    }
}

#[test]
fn parallel_lines_split_at_segment_boundaries() {
    // Straight run, quarter turn, straight run; a single pattern period
    // covering the whole path must come out as line + arc + line.
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.arc_to(
        point(10.0 + 10.0 / 2f64.sqrt(), 10.0 - 10.0 / 2f64.sqrt()),
        point(20.0, 10.0),
    );
    builder.line_to(point(20.0, 20.0));
    let guide = builder.build().unwrap();

    let pattern = Pattern::new(vec![PatternElement::parallel_line(
        0.0, 1.0, 0.0, 0.25, COPPER,
    )])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    let options = ProjectionOptions {
        pitch_mode: PitchMode::Stretch,
    };
    let summary =
        project_with_options(&guide, &pattern, guide.length(), &mut emitter, &options).unwrap();

    assert_eq!(summary.periods, 1);
    assert_eq!(summary.primitives, 3);

    let endpoints: Vec<(Point, Point)> = emitter
        .primitives()
        .iter()
        .map(|primitive| match *primitive {
            Primitive::Line { from, to, .. } => (from, to),
            Primitive::Arc { from, to, .. } => (from, to),
            ref other => panic!("unexpected primitive: {:?}", other),
        })
        .collect();

    assert!(matches!(emitter.primitives()[0], Primitive::Line { .. }));
    assert!(matches!(emitter.primitives()[1], Primitive::Arc { .. }));
    assert!(matches!(emitter.primitives()[2], Primitive::Line { .. }));

    assert!((endpoints[0].1 - endpoints[1].0).length() < 1e-9);
    assert!((endpoints[1].1 - endpoints[2].0).length() < 1e-9);
    assert!((endpoints[0].0 - point(0.0, 0.0)).length() < 1e-9);
    assert!((endpoints[2].1 - point(20.0, 20.0)).length() < 1e-9);
}

#[test]
fn graphic_layers_are_not_connected() {
    let guide = straight_guide(10.0);
    let pattern = Pattern::new(vec![
        PatternElement::parallel_line(0.0, 1.0, 1.0, 0.15, SILK),
        PatternElement::transverse_line(-1.0, 1.0, 0.5, 0.15, SILK),
    ])
    .unwrap();

    let mut emitter = BufferEmitter::new();
    project(&guide, &pattern, 10.0, &mut emitter).unwrap();

    for primitive in emitter.primitives() {
        match *primitive {
            Primitive::Line { connected, layer, .. } => {
                assert_eq!(layer, SILK);
                assert!(!connected);
            }
            ref other => panic!("expected a line, got {:?}", other),
        }
    }
}
