//! Projects a two-phase linear-motor winding along a stadium-shaped guide
//! path and prints a summary of the generated board geometry.
//!
//! The pattern is one period of a magnetic propulsion track: two copper
//! guard rails, two drive phases that swap between inner layers through
//! vias, and silkscreen markings along the outer edges.

use curvetrack::math::point;
use curvetrack::path::GuidePath;
use curvetrack::project::{
    project_with_options, BufferEmitter, Layer, Pattern, PatternElement, PitchMode, Primitive,
    ProjectionOptions,
};

const F_CU: Layer = Layer::routing(0);
const IN1_CU: Layer = Layer::routing(1);
const IN2_CU: Layer = Layer::routing(2);
const F_SILK: Layer = Layer::graphic(37);

const PITCH: f64 = 4.0;
const WIDTH: f64 = 10.0;
const LINE_WIDTH: f64 = 0.45;
const VIA_DRILL: f64 = 0.2;
const VIA_PAD: f64 = 0.45;
const GUIDE_RAIL_WIDTH: f64 = 1.25;
const GUIDE_RAIL_SPACE: f64 = 6.0 + GUIDE_RAIL_WIDTH;
const CU_CLEARANCE: f64 = 0.2;
const OUTER_MARKING_WIDTH: f64 = 2.0;

fn drive_pattern() -> Pattern {
    let minor = WIDTH / 2.0;
    let major = WIDTH / 2.0 + VIA_PAD / 2.0 + CU_CLEARANCE + LINE_WIDTH / 2.0;
    let marking = major + OUTER_MARKING_WIDTH / 2.0;

    Pattern::new(vec![
        // Silkscreen along both outer edges.
        PatternElement::parallel_line(0.0, 1.0, marking, OUTER_MARKING_WIDTH, F_SILK),
        PatternElement::parallel_line(0.0, 1.0, -marking, OUTER_MARKING_WIDTH, F_SILK),
        // Guard rails.
        PatternElement::parallel_line(0.0, 1.0, -GUIDE_RAIL_SPACE / 2.0, GUIDE_RAIL_WIDTH, F_CU),
        PatternElement::parallel_line(0.0, 1.0, GUIDE_RAIL_SPACE / 2.0, GUIDE_RAIL_WIDTH, F_CU),
        // Phase A: out along the major offset, back along the minor one,
        // changing layers half way through the period.
        PatternElement::transverse_line(minor, -major, 0.0, LINE_WIDTH, IN1_CU),
        PatternElement::parallel_line(0.0, 0.5, -major, LINE_WIDTH, IN1_CU),
        PatternElement::transverse_line(-major, minor, 0.5, LINE_WIDTH, IN1_CU),
        PatternElement::via_with_diameters(0.5, minor, VIA_DRILL, VIA_PAD),
        PatternElement::parallel_line(0.5, 1.0, minor, LINE_WIDTH, IN2_CU),
        PatternElement::via_with_diameters(1.0, minor, VIA_DRILL, VIA_PAD),
        // Phase B, a quarter period out of phase with A.
        PatternElement::parallel_line(0.0, 0.25, major, LINE_WIDTH, IN1_CU),
        PatternElement::transverse_line(major, -minor, 0.25, LINE_WIDTH, IN1_CU),
        PatternElement::via_with_diameters(0.25, -minor, VIA_DRILL, VIA_PAD),
        PatternElement::parallel_line(0.25, 0.75, -minor, LINE_WIDTH, IN2_CU),
        PatternElement::via_with_diameters(0.75, -minor, VIA_DRILL, VIA_PAD),
        PatternElement::transverse_line(-minor, major, 0.75, LINE_WIDTH, IN1_CU),
        PatternElement::parallel_line(0.75, 1.0, major, LINE_WIDTH, IN1_CU),
    ])
    .unwrap()
}

// A closed stadium: two straights joined by two left half-turns.
fn stadium_guide() -> GuidePath {
    let mut builder = GuidePath::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(80.0, 0.0));
    builder.arc_to(point(100.0, 20.0), point(80.0, 40.0));
    builder.line_to(point(0.0, 40.0));
    builder.arc_to(point(-20.0, 20.0), point(0.0, 0.0));
    builder.build().unwrap()
}

fn main() {
    let guide = stadium_guide();
    let pattern = drive_pattern();

    // Stretch the pitch so a whole number of periods closes the loop.
    let options = ProjectionOptions {
        pitch_mode: PitchMode::Stretch,
    };

    let mut emitter = BufferEmitter::new();
    let summary = project_with_options(&guide, &pattern, PITCH, &mut emitter, &options)
        .expect("projection failed");

    let mut lines = 0;
    let mut arcs = 0;
    let mut vias = 0;
    for primitive in emitter.primitives() {
        match primitive {
            Primitive::Line { .. } => lines += 1,
            Primitive::Arc { .. } => arcs += 1,
            Primitive::Via { .. } => vias += 1,
        }
    }

    println!(
        " -- path length {:.2} mm, {} periods",
        guide.length(),
        summary.periods
    );
    println!(
        " -- emitted {} primitives: {} lines, {} arcs, {} vias",
        summary.primitives, lines, arcs, vias
    );
}
