mod layer_map;
mod summary;

pub use layer_map::LayerMap;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{FoundationConfig, FoundationKind};
use crate::error::Result;
use crate::geometry::{Footprint, InterfaceSegment, Polygon};
use crate::operations::boundaries::{BoundaryPlan, BoundaryPlanner};
use crate::operations::classify::{classify, FoundationType};
use crate::operations::regions::{shape_for, RegionBuilder, RegionFamily, SectionDims};

/// Layer sets a polygon can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerFamily {
    Strata,
    Fill,
    Excavation,
    Ratchetting,
}

/// The decomposed section: every polygon plus its layer assignments.
///
/// Polygon indices are stable and follow build order: foundation, fill,
/// strata, ratchetting. Layer maps refer to polygons by index only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryAssembly {
    config: FoundationConfig,
    foundation_type: FoundationType,
    plan: BoundaryPlan,
    polygons: Vec<Polygon>,
    families: Vec<RegionFamily>,
    foundation: Vec<usize>,
    strata: LayerMap,
    fill: Option<LayerMap>,
    excavation: Option<LayerMap>,
    ratchetting: Option<LayerMap>,
    footprint: Footprint,
    interfaces: Vec<InterfaceSegment>,
}

impl GeometryAssembly {
    /// Decomposes the section described by `config`.
    ///
    /// Either the whole section is built or nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid or unsupported configurations and a
    /// `GeometryError` if a polygon degenerates or cannot be classified.
    #[instrument(skip_all, fields(kind = config.kind.as_str(), width = config.width, depth = config.depth))]
    pub fn build(config: &FoundationConfig) -> Result<Self> {
        config.validate()?;
        let foundation_type = classify(
            config.kind == FoundationKind::Plate,
            config.is_surface(),
            config.has_ratchetting(),
            config.effective_fill().is_some(),
        )?;
        info!(
            case = %foundation_type.case,
            label = foundation_type.label,
            "classified foundation"
        );

        let plan = BoundaryPlanner::new(config).execute()?;
        let dims = SectionDims::new(config, &plan);
        let shape = shape_for(config.kind, dims);
        let regions =
            RegionBuilder::new(&plan, foundation_type.case, dims, shape.as_ref()).execute()?;

        let mut strata = LayerMap::with_layers(plan.strata.len());
        let mut fill = plan.fill.as_ref().map(|f| LayerMap::with_layers(f.layers.len()));
        let mut excavation = plan.excavation.as_ref().map(|e| LayerMap::with_layers(e.len()));
        let mut ratchetting = plan
            .ratchetting
            .map(|_| LayerMap::with_layers(plan.strata.len()));
        let mut foundation = Vec::new();
        let mut polygons = Vec::with_capacity(regions.len());
        let mut families = Vec::with_capacity(regions.len());

        for (index, region) in regions.into_iter().enumerate() {
            let target = match region.family {
                RegionFamily::Foundation => {
                    foundation.push(index);
                    None
                }
                RegionFamily::Fill => fill.as_mut(),
                RegionFamily::Strata => Some(&mut strata),
                RegionFamily::Ratchetting => ratchetting.as_mut(),
            };
            if let (Some(map), Some(layer)) = (target, region.layer) {
                map.push(layer, index);
            }
            if let (Some(map), Some(layer)) = (excavation.as_mut(), region.excavation) {
                map.push(layer, index);
            }
            families.push(region.family);
            polygons.push(region.polygon);
        }

        let footprint = shape.footprint();
        let interfaces = shape.interfaces(config.interfaces);
        debug!(
            polygons = polygons.len(),
            interfaces = interfaces.len(),
            "assembled section"
        );

        Ok(Self {
            config: config.clone(),
            foundation_type,
            plan,
            polygons,
            families,
            foundation,
            strata,
            fill,
            excavation,
            ratchetting,
            footprint,
            interfaces,
        })
    }

    #[must_use]
    pub fn config(&self) -> &FoundationConfig {
        &self.config
    }

    #[must_use]
    pub fn foundation_type(&self) -> FoundationType {
        self.foundation_type
    }

    /// Model envelope and layer bounds.
    #[must_use]
    pub fn plan(&self) -> &BoundaryPlan {
        &self.plan
    }

    /// All polygons, indexed by the layer maps.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[must_use]
    pub fn polygon(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    /// Family of the polygon at `index`.
    #[must_use]
    pub fn family(&self, index: usize) -> Option<RegionFamily> {
        self.families.get(index).copied()
    }

    /// Indices of the foundation structure polygons.
    #[must_use]
    pub fn foundation(&self) -> &[usize] {
        &self.foundation
    }

    #[must_use]
    pub fn strata(&self) -> &LayerMap {
        &self.strata
    }

    #[must_use]
    pub fn fill(&self) -> Option<&LayerMap> {
        self.fill.as_ref()
    }

    #[must_use]
    pub fn excavation(&self) -> Option<&LayerMap> {
        self.excavation.as_ref()
    }

    #[must_use]
    pub fn ratchetting(&self) -> Option<&LayerMap> {
        self.ratchetting.as_ref()
    }

    /// Layer map of `family`, if the family is present in this section.
    #[must_use]
    pub fn layer_map(&self, family: LayerFamily) -> Option<&LayerMap> {
        match family {
            LayerFamily::Strata => Some(&self.strata),
            LayerFamily::Fill => self.fill.as_ref(),
            LayerFamily::Excavation => self.excavation.as_ref(),
            LayerFamily::Ratchetting => self.ratchetting.as_ref(),
        }
    }

    /// Polygons assigned to `layer` of `family`.
    #[must_use]
    pub fn polygons_in(&self, family: LayerFamily, layer: usize) -> Vec<&Polygon> {
        self.layer_map(family)
            .map(|map| map.get(layer))
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.polygons.get(i))
            .collect()
    }

    /// Total area of the polygons built for `family`.
    #[must_use]
    pub fn family_area(&self, family: RegionFamily) -> f64 {
        self.polygons
            .iter()
            .zip(&self.families)
            .filter(|(_, f)| **f == family)
            .map(|(p, _)| p.area())
            .sum()
    }

    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Interface segments requested by the configuration.
    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceSegment] {
        &self.interfaces
    }

    /// Water table elevation, if configured.
    #[must_use]
    pub fn water_table(&self) -> Option<f64> {
        self.plan.water_table
    }
}
