//! Vertex rules for the local strata polygons.
//!
//! Each rule receives the interval `(bottom, top]` between two consecutive
//! strata breakpoints and traces the soil that remains once the structure,
//! fill and ratchetting zones are carved out. Vertices start at the top-left
//! corner and run clockwise; the right edge is always the model boundary.
//! Exact equality with a transition elevation routes to the branch below it.

use super::SectionDims;
use crate::math::Point2;
use crate::operations::classify::TopologyCase;

/// Dispatches to the vertex rule of `case`.
#[must_use]
pub fn strata_vertices(case: TopologyCase, dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    match case {
        TopologyCase::Open => open(dims, top, bottom),
        TopologyCase::SurfaceRatchetting => surface_ratchetting(dims, top, bottom),
        TopologyCase::BuriedSolid => buried_solid(dims, top, bottom),
        TopologyCase::BuriedPlateRatchetting => buried_plate_ratchetting(dims, top, bottom),
        TopologyCase::BuriedSolidRatchetting => buried_solid_ratchetting(dims, top, bottom),
        TopologyCase::Fill => fill(dims, top, bottom),
        TopologyCase::FillRatchetting => fill_ratchetting(dims, top, bottom),
    }
}

/// Strip from `x_left` to the model boundary.
fn strip(dims: &SectionDims, x_left: f64, top: f64, bottom: f64) -> Vec<Point2> {
    vec![
        Point2::new(x_left, top),
        Point2::new(dims.model_width, top),
        Point2::new(dims.model_width, bottom),
        Point2::new(x_left, bottom),
    ]
}

/// Top edge from `x_left` to the model boundary and down the right edge.
fn right_side(dims: &SectionDims, x_left: f64, top: f64, bottom: f64) -> Vec<Point2> {
    vec![
        Point2::new(x_left, top),
        Point2::new(dims.model_width, top),
        Point2::new(dims.model_width, bottom),
    ]
}

fn open(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    strip(dims, 0.0, top, bottom)
}

fn surface_ratchetting(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (toe, rb) = (dims.fill_toe, dims.ratchetting_bottom);
    if top <= rb {
        return open(dims, top, bottom);
    }
    if bottom >= rb {
        return strip(dims, toe, top, bottom);
    }
    let mut v = right_side(dims, toe, top, bottom);
    v.extend([
        Point2::new(0.0, bottom),
        Point2::new(0.0, rb),
        Point2::new(toe, rb),
    ]);
    v
}

fn buried_solid(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (hb, hb1, zt, zf) = (dims.half_width, dims.half_column, dims.transition, -dims.depth);
    if top > zt {
        if bottom >= zt {
            return strip(dims, hb1, top, bottom);
        }
        let mut v = right_side(dims, hb1, top, bottom);
        if bottom >= zf {
            v.push(Point2::new(hb, bottom));
        } else {
            v.extend([
                Point2::new(0.0, bottom),
                Point2::new(0.0, zf),
                Point2::new(hb, zf),
            ]);
        }
        v.extend([Point2::new(hb, zt), Point2::new(hb1, zt)]);
        v
    } else if top > zf {
        if bottom >= zf {
            return strip(dims, hb, top, bottom);
        }
        let mut v = right_side(dims, hb, top, bottom);
        v.extend([
            Point2::new(0.0, bottom),
            Point2::new(0.0, zf),
            Point2::new(hb, zf),
        ]);
        v
    } else {
        open(dims, top, bottom)
    }
}

fn buried_plate_ratchetting(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (toe, zf, rb) = (dims.fill_toe, -dims.depth, dims.ratchetting_bottom);
    if top > zf {
        if bottom >= zf {
            return open(dims, top, bottom);
        }
        let mut v = right_side(dims, 0.0, top, bottom);
        if bottom >= rb {
            v.push(Point2::new(toe, bottom));
        } else {
            v.extend([
                Point2::new(0.0, bottom),
                Point2::new(0.0, rb),
                Point2::new(toe, rb),
            ]);
        }
        v.extend([Point2::new(toe, zf), Point2::new(0.0, zf)]);
        v
    } else if top > rb {
        if bottom >= rb {
            return strip(dims, toe, top, bottom);
        }
        let mut v = right_side(dims, toe, top, bottom);
        v.extend([
            Point2::new(0.0, bottom),
            Point2::new(0.0, rb),
            Point2::new(toe, rb),
        ]);
        v
    } else {
        open(dims, top, bottom)
    }
}

fn buried_solid_ratchetting(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (hb, hb1, zt, rb) = (
        dims.half_width,
        dims.half_column,
        dims.transition,
        dims.ratchetting_bottom,
    );
    if top > zt {
        if bottom >= zt {
            return strip(dims, hb1, top, bottom);
        }
        let mut v = right_side(dims, hb1, top, bottom);
        if bottom >= rb {
            v.push(Point2::new(hb, bottom));
        } else {
            v.extend([
                Point2::new(0.0, bottom),
                Point2::new(0.0, rb),
                Point2::new(hb, rb),
            ]);
        }
        v.extend([Point2::new(hb, zt), Point2::new(hb1, zt)]);
        v
    } else if top > rb {
        if bottom >= rb {
            return strip(dims, hb, top, bottom);
        }
        let mut v = right_side(dims, hb, top, bottom);
        v.extend([
            Point2::new(0.0, bottom),
            Point2::new(0.0, rb),
            Point2::new(hb, rb),
        ]);
        v
    } else {
        open(dims, top, bottom)
    }
}

fn fill(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (toe, zf) = (dims.fill_toe, -dims.depth);
    if top <= zf {
        return open(dims, top, bottom);
    }
    let mut v = right_side(dims, dims.x_fill(top), top, bottom);
    if bottom >= zf {
        v.push(Point2::new(dims.x_fill(bottom), bottom));
    } else {
        v.extend([
            Point2::new(0.0, bottom),
            Point2::new(0.0, zf),
            Point2::new(toe, zf),
        ]);
    }
    v
}

fn fill_ratchetting(dims: &SectionDims, top: f64, bottom: f64) -> Vec<Point2> {
    let (toe, zf, rb) = (dims.fill_toe, -dims.depth, dims.ratchetting_bottom);
    if top > zf {
        let mut v = right_side(dims, dims.x_fill(top), top, bottom);
        if bottom >= zf {
            v.push(Point2::new(dims.x_fill(bottom), bottom));
            return v;
        }
        if bottom >= rb {
            v.push(Point2::new(toe, bottom));
        } else {
            v.extend([
                Point2::new(0.0, bottom),
                Point2::new(0.0, rb),
                Point2::new(toe, rb),
            ]);
        }
        v.push(Point2::new(toe, zf));
        v
    } else if top > rb {
        if bottom >= rb {
            return strip(dims, toe, top, bottom);
        }
        let mut v = right_side(dims, toe, top, bottom);
        v.extend([
            Point2::new(0.0, bottom),
            Point2::new(0.0, rb),
            Point2::new(toe, rb),
        ]);
        v
    } else {
        open(dims, top, bottom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use approx::assert_relative_eq;

    /// b = 2, d = 3, b1 = 1, d1 = 1, 0.5 m ratchetting, W = 6.
    fn solid_dims() -> SectionDims {
        SectionDims {
            half_width: 1.0,
            depth: 3.0,
            half_column: 0.5,
            transition: -2.0,
            fill_toe: 1.0,
            fill_tan: f64::INFINITY,
            ratchetting_bottom: -3.5,
            model_width: 6.0,
        }
    }

    /// b = 2, d = 2, 45 degree fill with 0.5 m offset, 0.5 m ratchetting.
    fn fill_dims() -> SectionDims {
        SectionDims {
            half_width: 1.0,
            depth: 2.0,
            half_column: 0.0,
            transition: 0.0,
            fill_toe: 1.5,
            fill_tan: 1.0,
            ratchetting_bottom: -2.5,
            model_width: 6.0,
        }
    }

    fn area(v: &[Point2]) -> f64 {
        Polygon::new(v).unwrap().area()
    }

    #[test]
    fn open_is_full_width_rectangle() {
        let v = strata_vertices(TopologyCase::Open, &solid_dims(), 0.0, -4.0);
        assert_eq!(v.len(), 4);
        assert_relative_eq!(area(&v), 24.0);
    }

    #[test]
    fn buried_solid_steps_at_transition() {
        let dims = solid_dims();
        let v = strata_vertices(TopologyCase::BuriedSolid, &dims, 0.0, -10.0);
        assert_eq!(v.len(), 8);
        assert!(v.iter().any(|p| (p.y + 2.0).abs() < 1e-12 && (p.x - 0.5).abs() < 1e-12));
        // Full envelope minus the concrete (0.5 * 2 + 1.0 * 1).
        assert_relative_eq!(area(&v), 60.0 - 2.0);
    }

    #[test]
    fn buried_solid_interval_inside_column_zone() {
        let v = strata_vertices(TopologyCase::BuriedSolid, &solid_dims(), 0.0, -1.0);
        assert_eq!(v[0], Point2::new(0.5, 0.0));
        assert_relative_eq!(area(&v), 5.5);
    }

    #[test]
    fn buried_solid_bottom_on_footing_base() {
        let v = strata_vertices(TopologyCase::BuriedSolid, &solid_dims(), -1.0, -3.0);
        // Column zone down to -2, footing zone down to -3.
        assert_eq!(v.len(), 6);
        assert_relative_eq!(area(&v), 5.5 + 5.0);
    }

    #[test]
    fn top_on_transition_routes_below() {
        let v = strata_vertices(TopologyCase::BuriedSolid, &solid_dims(), -2.0, -3.0);
        assert_eq!(v[0], Point2::new(1.0, -2.0));
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn plate_ratchetting_notch() {
        let dims = SectionDims {
            half_column: 0.0,
            transition: 0.0,
            depth: 1.0,
            ratchetting_bottom: -1.5,
            ..solid_dims()
        };
        let v = strata_vertices(TopologyCase::BuriedPlateRatchetting, &dims, 0.0, -5.0);
        assert_eq!(v.len(), 8);
        assert_relative_eq!(area(&v), 30.0 - 0.5);

        let v = strata_vertices(TopologyCase::BuriedPlateRatchetting, &dims, 0.0, -1.2);
        assert_relative_eq!(area(&v), 6.0 * 1.2 - 0.2);

        let v = strata_vertices(TopologyCase::BuriedPlateRatchetting, &dims, -1.2, -5.0);
        assert_relative_eq!(area(&v), 6.0 * 3.8 - 0.3);
    }

    #[test]
    fn solid_ratchetting_spans_column_footing_and_band() {
        let v = strata_vertices(TopologyCase::BuriedSolidRatchetting, &solid_dims(), 0.0, -10.0);
        assert_relative_eq!(area(&v), 60.0 - 2.0 - 0.5);
    }

    #[test]
    fn surface_ratchetting_band() {
        let dims = SectionDims {
            depth: 0.0,
            ratchetting_bottom: -0.4,
            ..solid_dims()
        };
        let v = strata_vertices(TopologyCase::SurfaceRatchetting, &dims, 0.0, -2.0);
        assert_eq!(v.len(), 6);
        assert_relative_eq!(area(&v), 12.0 - 0.4);
        let v = strata_vertices(TopologyCase::SurfaceRatchetting, &dims, -0.4, -2.0);
        assert_eq!(v[0], Point2::new(0.0, -0.4));
    }

    #[test]
    fn fill_follows_slope() {
        let dims = fill_dims();
        let v = strata_vertices(TopologyCase::Fill, &dims, 0.0, -1.0);
        assert_eq!(v[0], Point2::new(3.5, 0.0));
        assert_eq!(v[3], Point2::new(2.5, -1.0));
        // Trapezoid between the slope and the boundary.
        assert_relative_eq!(area(&v), 3.0);

        let v = strata_vertices(TopologyCase::Fill, &dims, 0.0, -4.0);
        // Envelope minus the fill wedge (1.5 * 2 + 2 * 2 / 2 = 5).
        assert_relative_eq!(area(&v), 24.0 - 5.0);
    }

    #[test]
    fn fill_ratchetting_wraps_band() {
        let dims = fill_dims();
        let v = strata_vertices(TopologyCase::FillRatchetting, &dims, 0.0, -4.0);
        assert_eq!(v.len(), 7);
        assert_relative_eq!(area(&v), 24.0 - 5.0 - 0.75);

        let v = strata_vertices(TopologyCase::FillRatchetting, &dims, -1.0, -2.2);
        assert_eq!(v.len(), 5);
        assert_relative_eq!(area(&v), 6.0 * 1.2 - 2.0 - 0.3);

        let v = strata_vertices(TopologyCase::FillRatchetting, &dims, -2.2, -3.0);
        assert_relative_eq!(area(&v), 6.0 * 0.8 - 0.45);
    }
}
