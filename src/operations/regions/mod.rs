//! Construction of the section polygons, one family at a time.

pub mod shape;
pub mod strata;

use std::fmt;

use serde::Serialize;
use tracing::debug;

pub use shape::{shape_for, FoundationShape, PlateShape, SolidShape};
pub use strata::strata_vertices;

use crate::config::FoundationConfig;
use crate::error::{GeometryError, Result};
use crate::geometry::Polygon;
use crate::math::{Point2, TOLERANCE};
use crate::operations::boundaries::BoundaryPlan;
use crate::operations::classify::TopologyCase;

/// Horizontal and vertical section dimensions shared by every vertex rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionDims {
    /// Half footing width `b / 2`.
    pub half_width: f64,
    /// Foundation depth `d`.
    pub depth: f64,
    /// Half column width `b1 / 2`; zero for plates.
    pub half_column: f64,
    /// Column/footing transition `-d + d1`; zero for plates.
    pub transition: f64,
    /// Horizontal position of the fill toe at the foundation depth.
    pub fill_toe: f64,
    /// Tangent of the fill slope; infinite without fill.
    pub fill_tan: f64,
    /// Bottom of the ratchetting band, `-d` without ratchetting.
    pub ratchetting_bottom: f64,
    pub model_width: f64,
}

impl SectionDims {
    /// Collects the dimensions of a configuration and its plan.
    #[must_use]
    pub fn new(config: &FoundationConfig, plan: &BoundaryPlan) -> Self {
        let half_width = 0.5 * config.width;
        let (fill_toe, fill_tan) = match &plan.fill {
            Some(fill) => (half_width + fill.offset, fill.angle.to_radians().tan()),
            None => (half_width, f64::INFINITY),
        };
        Self {
            half_width,
            depth: plan.depth,
            half_column: config.column_width.map_or(0.0, |b1| 0.5 * b1),
            transition: plan.transition.unwrap_or(0.0),
            fill_toe,
            fill_tan,
            ratchetting_bottom: plan.ratchetting.map_or(-plan.depth, |band| band.bottom),
            model_width: plan.model_width,
        }
    }

    /// Horizontal position of the fill slope at elevation `z`.
    #[must_use]
    pub fn x_fill(&self, z: f64) -> f64 {
        self.fill_toe + (z + self.depth) / self.fill_tan
    }

    #[must_use]
    pub fn is_surface(&self) -> bool {
        self.depth < TOLERANCE
    }
}

/// Polygon family, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionFamily {
    Foundation,
    Fill,
    Strata,
    Ratchetting,
}

impl RegionFamily {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Fill => "fill",
            Self::Strata => "strata",
            Self::Ratchetting => "ratchetting",
        }
    }
}

impl fmt::Display for RegionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified section polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub family: RegionFamily,
    pub polygon: Polygon,
    /// Fill layer for fill polygons, natural stratum for strata and
    /// ratchetting polygons.
    pub layer: Option<usize>,
    /// Excavated stratum the polygon replaces.
    pub excavation: Option<usize>,
}

/// Builds the polygons of every family for a planned section.
pub struct RegionBuilder<'a> {
    plan: &'a BoundaryPlan,
    case: TopologyCase,
    dims: SectionDims,
    shape: &'a dyn FoundationShape,
}

impl<'a> RegionBuilder<'a> {
    /// Creates a new `RegionBuilder`.
    #[must_use]
    pub fn new(
        plan: &'a BoundaryPlan,
        case: TopologyCase,
        dims: SectionDims,
        shape: &'a dyn FoundationShape,
    ) -> Self {
        Self {
            plan,
            case,
            dims,
            shape,
        }
    }

    /// Executes the build, returning foundation, fill, strata and
    /// ratchetting polygons in that order.
    ///
    /// # Errors
    ///
    /// Returns a `GeometryError` if any polygon is degenerate or cannot be
    /// assigned to a layer.
    pub fn execute(&self) -> Result<Vec<Region>> {
        let mut regions = self.foundation()?;
        regions.extend(self.fill()?);
        regions.extend(self.strata()?);
        regions.extend(self.ratchetting()?);
        Ok(regions)
    }

    /// Structure polygons between consecutive foundation breakpoints.
    ///
    /// # Errors
    ///
    /// Propagates polygon construction and classification failures.
    pub fn foundation(&self) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        for (top, bottom) in intervals(&self.plan.foundation_breakpoints()) {
            let Some(vertices) = self.shape.structure_vertices(top, bottom) else {
                continue;
            };
            let polygon = Polygon::new(&vertices)?;
            let excavation = self.excavation_layer(&polygon)?;
            regions.push(Region {
                family: RegionFamily::Foundation,
                polygon,
                layer: None,
                excavation,
            });
        }
        debug!(count = regions.len(), "built foundation polygons");
        Ok(regions)
    }

    /// Fill wedges between consecutive fill breakpoints.
    ///
    /// # Errors
    ///
    /// Propagates polygon construction and classification failures.
    pub fn fill(&self) -> Result<Vec<Region>> {
        let Some(fill) = &self.plan.fill else {
            return Ok(Vec::new());
        };
        let mut regions = Vec::new();
        for (top, bottom) in intervals(&self.plan.fill_breakpoints()) {
            let polygon = Polygon::new(&self.shape.fill_vertices(top, bottom))?;
            let layer = locate(&polygon, &fill.layers.bottoms, RegionFamily::Fill.as_str())?;
            let excavation = self.excavation_layer(&polygon)?;
            regions.push(Region {
                family: RegionFamily::Fill,
                polygon,
                layer: Some(layer),
                excavation,
            });
        }
        debug!(count = regions.len(), "built fill polygons");
        Ok(regions)
    }

    /// Local strata polygons shaped by the topology case.
    ///
    /// # Errors
    ///
    /// Propagates polygon construction and classification failures.
    pub fn strata(&self) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        for (top, bottom) in intervals(&self.plan.strata_breakpoints()) {
            let vertices = strata_vertices(self.case, &self.dims, top, bottom);
            let polygon = Polygon::new(&vertices)?;
            let layer = locate(&polygon, &self.plan.strata.bottoms, RegionFamily::Strata.as_str())?;
            regions.push(Region {
                family: RegionFamily::Strata,
                polygon,
                layer: Some(layer),
                excavation: None,
            });
        }
        debug!(count = regions.len(), case = %self.case, "built strata polygons");
        Ok(regions)
    }

    /// Rectangles of the ratchetting band, split on stratum boundaries.
    ///
    /// # Errors
    ///
    /// Propagates polygon construction and classification failures.
    pub fn ratchetting(&self) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        let toe = self.dims.fill_toe;
        for (top, bottom) in intervals(&self.plan.ratchetting_breakpoints()) {
            let polygon = Polygon::new(&[
                Point2::new(0.0, top),
                Point2::new(toe, top),
                Point2::new(toe, bottom),
                Point2::new(0.0, bottom),
            ])?;
            let layer = locate(&polygon, &self.plan.strata.bottoms, "ratchetting")?;
            regions.push(Region {
                family: RegionFamily::Ratchetting,
                polygon,
                layer: Some(layer),
                excavation: None,
            });
        }
        debug!(count = regions.len(), "built ratchetting polygons");
        Ok(regions)
    }

    fn excavation_layer(&self, polygon: &Polygon) -> Result<Option<usize>> {
        match &self.plan.excavation {
            Some(excavation) => locate(polygon, &excavation.bottoms, "excavation").map(Some),
            None => Ok(None),
        }
    }
}

/// Consecutive `(top, bottom)` pairs of a descending breakpoint list.
fn intervals(breakpoints: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    breakpoints.windows(2).map(|w| (w[0], w[1]))
}

fn locate(polygon: &Polygon, bottoms: &[f64], family: &'static str) -> Result<usize> {
    polygon.locate_layer(bottoms).ok_or_else(|| {
        GeometryError::UnclassifiedPolygon {
            family,
            z: polygon.centroid().y,
        }
        .into()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::FillConfig;
    use crate::error::SectionError;
    use crate::operations::boundaries::BoundaryPlanner;
    use crate::operations::classify::classify;
    use approx::assert_relative_eq;

    fn build(config: &FoundationConfig) -> Vec<Region> {
        let plan = BoundaryPlanner::new(config).execute().unwrap();
        let kind = classify(
            config.kind == crate::config::FoundationKind::Plate,
            config.is_surface(),
            config.has_ratchetting(),
            config.effective_fill().is_some(),
        )
        .unwrap();
        let dims = SectionDims::new(config, &plan);
        let shape = shape_for(config.kind, dims);
        RegionBuilder::new(&plan, kind.case, dims, shape.as_ref())
            .execute()
            .unwrap()
    }

    fn count(regions: &[Region], family: RegionFamily) -> usize {
        regions.iter().filter(|r| r.family == family).count()
    }

    #[test]
    fn dims_from_fill_plan() {
        let config = FoundationConfig::plate(2.0, 1.0)
            .with_fill(FillConfig::new(45.0))
            .with_ratchetting(0.3);
        let plan = BoundaryPlanner::new(&config).execute().unwrap();
        let dims = SectionDims::new(&config, &plan);
        assert_relative_eq!(dims.fill_toe, 1.5);
        assert_relative_eq!(dims.fill_tan, 1.0, epsilon = 1e-12);
        assert_relative_eq!(dims.ratchetting_bottom, -1.3);
        assert_relative_eq!(dims.x_fill(0.0), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn dims_without_fill_have_vertical_slope() {
        let config = FoundationConfig::solid(2.0, 1.5, 0.4, 0.5);
        let plan = BoundaryPlanner::new(&config).execute().unwrap();
        let dims = SectionDims::new(&config, &plan);
        assert_relative_eq!(dims.x_fill(0.0), 1.0);
        assert_relative_eq!(dims.transition, -1.0);
        assert_relative_eq!(dims.half_column, 0.2);
    }

    #[test]
    fn surface_plate_builds_only_strata() {
        let config = FoundationConfig::plate(2.0, 0.0).with_strata(vec![1.0, 2.0]);
        let regions = build(&config);
        assert_eq!(count(&regions, RegionFamily::Foundation), 0);
        assert_eq!(count(&regions, RegionFamily::Fill), 0);
        // Strata extend to the default depth 3b.
        assert_eq!(count(&regions, RegionFamily::Strata), 2);
        assert_eq!(regions[1].layer, Some(1));
    }

    #[test]
    fn families_come_in_build_order() {
        let config = FoundationConfig::solid(2.0, 1.0, 0.5, 0.4)
            .with_fill(FillConfig::new(60.0))
            .with_ratchetting(0.2);
        let regions = build(&config);
        let order: Vec<RegionFamily> = regions.iter().map(|r| r.family).collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order.last(), Some(&RegionFamily::Ratchetting));
        assert!(regions
            .iter()
            .filter(|r| r.family == RegionFamily::Foundation)
            .all(|r| r.excavation == Some(0)));
    }

    #[test]
    fn ratchetting_split_by_strata() {
        let config = FoundationConfig::plate(2.0, 1.0)
            .with_strata(vec![1.2, 5.0])
            .with_ratchetting(0.5);
        let regions = build(&config);
        let layers: Vec<_> = regions
            .iter()
            .filter(|r| r.family == RegionFamily::Ratchetting)
            .map(|r| r.layer)
            .collect();
        assert_eq!(layers, vec![Some(0), Some(1)]);
    }

    #[test]
    fn unclassified_polygon_is_reported() {
        let poly = Polygon::new(&[
            Point2::new(0.0, -5.0),
            Point2::new(1.0, -5.0),
            Point2::new(1.0, -6.0),
        ])
        .unwrap();
        let err = locate(&poly, &[-1.0, -2.0], "strata").unwrap_err();
        assert!(matches!(
            err,
            SectionError::Geometry(GeometryError::UnclassifiedPolygon { family: "strata", .. })
        ));
    }
}
