//! One period of track cross-section geometry, in pattern space.

use thiserror::Error;

/// A board layer tag: an opaque id plus a routing/graphic classification.
///
/// Geometry on a routing layer is emitted as electrically connected copper;
/// everything else is drawn as a non-connected shape (silkscreen, markings).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Layer {
    id: u16,
    routing: bool,
}

impl Layer {
    /// A conductive layer carrying current-bearing traces and vias.
    #[inline]
    pub const fn routing(id: u16) -> Self {
        Layer { id, routing: true }
    }

    /// A graphical layer (silkscreen, fabrication markings).
    #[inline]
    pub const fn graphic(id: u16) -> Self {
        Layer { id, routing: false }
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn is_routing(&self) -> bool {
        self.routing
    }
}

/// One element of a pattern period.
///
/// Longitudinal coordinates (`u`) are normalized to `[0, 1]` within the
/// period; transverse offsets, widths and diameters are in board units,
/// offsets positive to the path's left.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum PatternElement {
    /// A trace running along the path at a constant transverse offset.
    ParallelLine {
        u_start: f64,
        u_end: f64,
        offset: f64,
        width: f64,
        layer: Layer,
    },
    /// A trace running across the path at a fixed longitudinal position.
    TransverseLine {
        offset_start: f64,
        offset_end: f64,
        u: f64,
        width: f64,
        layer: Layer,
    },
    /// A through-hole connecting the conventional top/bottom copper layers.
    Via {
        u: f64,
        offset: f64,
        drill: f64,
        pad: f64,
    },
}

impl PatternElement {
    /// Default via drill diameter, in millimeters.
    pub const DEFAULT_DRILL: f64 = 0.3;
    /// Default via pad diameter, in millimeters.
    pub const DEFAULT_PAD: f64 = 0.6;

    #[inline]
    pub fn parallel_line(u_start: f64, u_end: f64, offset: f64, width: f64, layer: Layer) -> Self {
        PatternElement::ParallelLine {
            u_start,
            u_end,
            offset,
            width,
            layer,
        }
    }

    #[inline]
    pub fn transverse_line(
        offset_start: f64,
        offset_end: f64,
        u: f64,
        width: f64,
        layer: Layer,
    ) -> Self {
        PatternElement::TransverseLine {
            offset_start,
            offset_end,
            u,
            width,
            layer,
        }
    }

    /// A via with the default drill and pad diameters.
    #[inline]
    pub fn via(u: f64, offset: f64) -> Self {
        Self::via_with_diameters(u, offset, Self::DEFAULT_DRILL, Self::DEFAULT_PAD)
    }

    #[inline]
    pub fn via_with_diameters(u: f64, offset: f64, drill: f64, pad: f64) -> Self {
        PatternElement::Via {
            u,
            offset,
            drill,
            pad,
        }
    }

    fn validate(&self, index: usize) -> Result<(), PatternError> {
        let u_in_range = |u: f64| (0.0..=1.0).contains(&u);
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());

        match *self {
            PatternElement::ParallelLine {
                u_start,
                u_end,
                offset,
                width,
                ..
            } => {
                if !finite(&[u_start, u_end, offset, width]) {
                    return Err(PatternError::NonFiniteCoordinate { index });
                }
                if !u_in_range(u_start) || !u_in_range(u_end) {
                    return Err(PatternError::LongitudinalOutOfRange { index });
                }
                if u_start > u_end {
                    return Err(PatternError::ReversedInterval {
                        index,
                        u_start,
                        u_end,
                    });
                }
                if width <= 0.0 {
                    return Err(PatternError::NonPositiveWidth { index, width });
                }
            }
            PatternElement::TransverseLine {
                offset_start,
                offset_end,
                u,
                width,
                ..
            } => {
                if !finite(&[offset_start, offset_end, u, width]) {
                    return Err(PatternError::NonFiniteCoordinate { index });
                }
                if !u_in_range(u) {
                    return Err(PatternError::LongitudinalOutOfRange { index });
                }
                if width <= 0.0 {
                    return Err(PatternError::NonPositiveWidth { index, width });
                }
            }
            PatternElement::Via {
                u,
                offset,
                drill,
                pad,
            } => {
                if !finite(&[u, offset, drill, pad]) {
                    return Err(PatternError::NonFiniteCoordinate { index });
                }
                if !u_in_range(u) {
                    return Err(PatternError::LongitudinalOutOfRange { index });
                }
                if drill <= 0.0 {
                    return Err(PatternError::NonPositiveWidth {
                        index,
                        width: drill,
                    });
                }
                if pad <= 0.0 {
                    return Err(PatternError::NonPositiveWidth { index, width: pad });
                }
            }
        }

        Ok(())
    }
}

/// An ordered sequence of elements describing exactly one period.
///
/// Validated eagerly at construction; a `Pattern` value is always
/// well-formed. Deserialization goes through the same validation, so a
/// pattern loaded from a declarative file cannot bypass it. Element order is
/// the emission order and carries no other meaning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<PatternElement>", into = "Vec<PatternElement>")
)]
pub struct Pattern {
    elements: Vec<PatternElement>,
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>) -> Result<Self, PatternError> {
        for (index, element) in elements.iter().enumerate() {
            element.validate(index)?;
        }

        Ok(Pattern { elements })
    }

    #[inline]
    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }
}

impl core::convert::TryFrom<Vec<PatternElement>> for Pattern {
    type Error = PatternError;

    fn try_from(elements: Vec<PatternElement>) -> Result<Self, PatternError> {
        Pattern::new(elements)
    }
}

impl From<Pattern> for Vec<PatternElement> {
    fn from(pattern: Pattern) -> Self {
        pattern.elements
    }
}

/// A pattern authoring error, caught at construction before any projection
/// work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("element {index}: longitudinal coordinate outside [0, 1]")]
    LongitudinalOutOfRange { index: usize },
    #[error("element {index}: u_start {u_start} is greater than u_end {u_end}")]
    ReversedInterval {
        index: usize,
        u_start: f64,
        u_end: f64,
    },
    #[error("element {index}: width or diameter {width} is not positive")]
    NonPositiveWidth { index: usize, width: f64 },
    #[error("element {index}: non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

#[test]
fn reversed_interval_is_rejected() {
    let layer = Layer::routing(0);
    let result = Pattern::new(vec![PatternElement::parallel_line(
        0.6, 0.4, 1.0, 0.25, layer,
    )]);

    assert_eq!(
        result,
        Err(PatternError::ReversedInterval {
            index: 0,
            u_start: 0.6,
            u_end: 0.4,
        })
    );
}

#[test]
fn out_of_range_u_is_rejected() {
    let layer = Layer::graphic(3);
    assert!(Pattern::new(vec![PatternElement::transverse_line(
        -1.0, 1.0, 1.2, 0.15, layer
    )])
    .is_err());
    assert!(Pattern::new(vec![PatternElement::via(-0.1, 0.0)]).is_err());
}

#[test]
fn widths_must_be_positive() {
    let layer = Layer::routing(0);
    assert!(Pattern::new(vec![PatternElement::parallel_line(
        0.0, 1.0, 0.0, 0.0, layer
    )])
    .is_err());
    assert!(Pattern::new(vec![PatternElement::via_with_diameters(0.5, 0.0, 0.3, 0.0)]).is_err());
}

#[cfg(feature = "serialization")]
#[test]
fn deserialization_validates() {
    // A wire pattern must go through the same checks as Pattern::new; this
    // one has u values far outside [0, 1].
    let out_of_range = r#"[{"ParallelLine":{
        "u_start": 3.0, "u_end": 5.0, "offset": 0.0, "width": 0.25,
        "layer": {"id": 0, "routing": true}
    }}]"#;
    assert!(serde_json::from_str::<Pattern>(out_of_range).is_err());

    let pattern = Pattern::new(vec![
        PatternElement::parallel_line(0.0, 1.0, 2.0, 0.25, Layer::routing(0)),
        PatternElement::via(0.5, 2.0),
    ])
    .unwrap();
    let json = serde_json::to_string(&pattern).unwrap();
    assert_eq!(serde_json::from_str::<Pattern>(&json).unwrap(), pattern);
}

#[test]
fn valid_pattern() {
    let copper = Layer::routing(0);
    let silk = Layer::graphic(7);
    let pattern = Pattern::new(vec![
        PatternElement::parallel_line(0.0, 1.0, 2.0, 0.25, copper),
        PatternElement::transverse_line(-2.0, 2.0, 0.5, 0.15, silk),
        PatternElement::via(0.0, 2.0),
    ])
    .unwrap();

    assert_eq!(pattern.elements().len(), 3);
    assert!(copper.is_routing());
    assert!(!silk.is_routing());
}
