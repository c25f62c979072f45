use super::SectionDims;
use crate::config::FoundationKind;
use crate::geometry::{Footprint, InterfaceKind, InterfaceSegment, InterfaceSelection, Polyline};
use crate::math::Point2;

/// Foundation-specific geometry: the structure itself and the fill that
/// wraps it.
pub trait FoundationShape {
    /// Structure polygon between two foundation breakpoints, or `None` for
    /// shapes without area.
    fn structure_vertices(&self, top: f64, bottom: f64) -> Option<Vec<Point2>>;

    /// Fill wedge between two fill breakpoints.
    fn fill_vertices(&self, top: f64, bottom: f64) -> Vec<Point2>;

    fn footprint(&self) -> Footprint;

    /// Contact segments between structure and soil, filtered by `selection`.
    fn interfaces(&self, selection: InterfaceSelection) -> Vec<InterfaceSegment>;
}

/// Returns the shape strategy for `kind`.
#[must_use]
pub fn shape_for(kind: FoundationKind, dims: SectionDims) -> Box<dyn FoundationShape> {
    match kind {
        FoundationKind::Plate => Box::new(PlateShape::new(dims)),
        FoundationKind::Solid => Box::new(SolidShape::new(dims)),
    }
}

/// Zero-thickness plate at the foundation depth.
#[derive(Debug, Clone, Copy)]
pub struct PlateShape {
    dims: SectionDims,
}

impl PlateShape {
    #[must_use]
    pub fn new(dims: SectionDims) -> Self {
        Self { dims }
    }
}

impl FoundationShape for PlateShape {
    fn structure_vertices(&self, _top: f64, _bottom: f64) -> Option<Vec<Point2>> {
        None
    }

    fn fill_vertices(&self, top: f64, bottom: f64) -> Vec<Point2> {
        let dims = &self.dims;
        vec![
            Point2::new(0.0, top),
            Point2::new(dims.x_fill(top), top),
            Point2::new(dims.x_fill(bottom), bottom),
            Point2::new(0.0, bottom),
        ]
    }

    fn footprint(&self) -> Footprint {
        let (hb, d) = (self.dims.half_width, self.dims.depth);
        let footing = Polyline::open(vec![Point2::new(0.0, -d), Point2::new(hb, -d)]);
        if self.dims.is_surface() {
            return Footprint {
                outline: footing.clone(),
                footing,
                column: None,
            };
        }
        Footprint {
            outline: Polyline::open(vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, -d),
                Point2::new(hb, -d),
            ]),
            footing,
            column: Some(Polyline::open(vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, -d),
            ])),
        }
    }

    fn interfaces(&self, selection: InterfaceSelection) -> Vec<InterfaceSegment> {
        let (hb, d) = (self.dims.half_width, self.dims.depth);
        let base = (Point2::new(0.0, -d), Point2::new(hb, -d));
        let buried = !self.dims.is_surface();
        let mut segments = Vec::new();
        if selection.bottom {
            segments.push(InterfaceSegment::new(InterfaceKind::Bottom, base.0, base.1));
        }
        if selection.top && buried {
            segments.push(InterfaceSegment::new(InterfaceKind::Top, base.0, base.1));
        }
        if selection.column && buried {
            segments.push(InterfaceSegment::new(
                InterfaceKind::Column,
                Point2::new(0.0, -d),
                Point2::new(0.0, 0.0),
            ));
        }
        segments
    }
}

/// Footing slab of thickness `d1` carrying a column up to the ground.
#[derive(Debug, Clone, Copy)]
pub struct SolidShape {
    dims: SectionDims,
}

impl SolidShape {
    #[must_use]
    pub fn new(dims: SectionDims) -> Self {
        Self { dims }
    }
}

impl FoundationShape for SolidShape {
    fn structure_vertices(&self, top: f64, bottom: f64) -> Option<Vec<Point2>> {
        let (hb, hb1, zt) = (
            self.dims.half_width,
            self.dims.half_column,
            self.dims.transition,
        );
        let mut v = vec![Point2::new(0.0, top)];
        if top > zt {
            v.push(Point2::new(hb1, top));
            if bottom >= zt {
                v.push(Point2::new(hb1, bottom));
            } else {
                v.extend([
                    Point2::new(hb1, zt),
                    Point2::new(hb, zt),
                    Point2::new(hb, bottom),
                ]);
            }
        } else {
            v.extend([Point2::new(hb, top), Point2::new(hb, bottom)]);
        }
        v.push(Point2::new(0.0, bottom));
        Some(v)
    }

    fn fill_vertices(&self, top: f64, bottom: f64) -> Vec<Point2> {
        let dims = &self.dims;
        let (hb, hb1, zt) = (dims.half_width, dims.half_column, dims.transition);
        let inner = if top > zt { hb1 } else { hb };
        let mut v = vec![
            Point2::new(inner, top),
            Point2::new(dims.x_fill(top), top),
            Point2::new(dims.x_fill(bottom), bottom),
        ];
        if bottom >= zt {
            v.push(Point2::new(hb1, bottom));
        } else {
            v.push(Point2::new(hb, bottom));
            if top > zt {
                v.extend([Point2::new(hb, zt), Point2::new(hb1, zt)]);
            }
        }
        v
    }

    fn footprint(&self) -> Footprint {
        let (hb, hb1, d, zt) = (
            self.dims.half_width,
            self.dims.half_column,
            self.dims.depth,
            self.dims.transition,
        );
        if zt < 0.0 {
            return Footprint {
                outline: Polyline::closed(vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(hb1, 0.0),
                    Point2::new(hb1, zt),
                    Point2::new(hb, zt),
                    Point2::new(hb, -d),
                    Point2::new(0.0, -d),
                ]),
                footing: rectangle(hb, zt, -d),
                column: Some(rectangle(hb1, 0.0, zt)),
            };
        }
        let footing = rectangle(hb, zt, -d);
        Footprint {
            outline: footing.clone(),
            footing,
            column: None,
        }
    }

    fn interfaces(&self, selection: InterfaceSelection) -> Vec<InterfaceSegment> {
        let (hb, hb1, d, zt) = (
            self.dims.half_width,
            self.dims.half_column,
            self.dims.depth,
            self.dims.transition,
        );
        let mut segments = Vec::new();
        if selection.bottom {
            segments.push(InterfaceSegment::new(
                InterfaceKind::Bottom,
                Point2::new(0.0, -d),
                Point2::new(hb, -d),
            ));
        }
        if selection.lateral && !self.dims.is_surface() {
            segments.push(InterfaceSegment::new(
                InterfaceKind::Lateral,
                Point2::new(hb, -d),
                Point2::new(hb, zt.min(0.0)),
            ));
        }
        if zt < 0.0 {
            if selection.top {
                segments.push(InterfaceSegment::new(
                    InterfaceKind::Top,
                    Point2::new(hb, zt),
                    Point2::new(hb1, zt),
                ));
            }
            if selection.column {
                segments.push(InterfaceSegment::new(
                    InterfaceKind::Column,
                    Point2::new(hb1, zt),
                    Point2::new(hb1, 0.0),
                ));
            }
        }
        segments
    }
}

/// Closed rectangle from the axis to `x` between two elevations.
fn rectangle(x: f64, top: f64, bottom: f64) -> Polyline {
    Polyline::closed(vec![
        Point2::new(0.0, top),
        Point2::new(x, top),
        Point2::new(x, bottom),
        Point2::new(0.0, bottom),
    ])
}
