use serde::Serialize;
use tracing::{debug, info};

use crate::config::{FillLayers, FoundationConfig, FoundationKind};
use crate::error::{ConfigError, Result};
use crate::math::{cumulative_elevations, descending_unique, TOLERANCE};

/// Ordered layer thicknesses with their bottom elevations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layering {
    pub thicknesses: Vec<f64>,
    /// Bottom elevation of each layer, strictly descending.
    pub bottoms: Vec<f64>,
}

impl Layering {
    fn new(thicknesses: Vec<f64>) -> Self {
        let bottoms = cumulative_elevations(&thicknesses);
        Self {
            thicknesses,
            bottoms,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thicknesses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thicknesses.is_empty()
    }

    /// Total thickness.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.thicknesses.iter().sum()
    }
}

/// Fill slope geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillSlope {
    /// Slope angle from the horizontal [deg].
    pub angle: f64,
    /// Horizontal offset of the slope toe from the foundation edge [m].
    pub offset: f64,
    pub layers: Layering,
}

/// Elevation range of the ratchetting band under the footing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub top: f64,
    pub bottom: f64,
}

/// Model envelope and layer bounds derived from a configuration.
///
/// All elevations are `<= 0`, zero at the ground surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryPlan {
    pub model_width: f64,
    pub model_depth: f64,
    /// Foundation depth `d`.
    pub depth: f64,
    /// Column/footing transition `-d + d1` for solid foundations.
    pub transition: Option<f64>,
    pub strata: Layering,
    pub fill: Option<FillSlope>,
    /// Natural strata truncated at the foundation depth; present with fill.
    pub excavation: Option<Layering>,
    pub ratchetting: Option<Band>,
    /// Water table elevation.
    pub water_table: Option<f64>,
}

impl BoundaryPlan {
    /// Breakpoints of the local strata family.
    #[must_use]
    pub fn strata_breakpoints(&self) -> Vec<f64> {
        let mut z = vec![0.0, -self.model_depth];
        z.extend_from_slice(&self.strata.bottoms);
        descending_unique(&z)
    }

    /// Breakpoints of the foundation structure family.
    ///
    /// Empty for plate foundations, which have no area.
    #[must_use]
    pub fn foundation_breakpoints(&self) -> Vec<f64> {
        let Some(transition) = self.transition else {
            return Vec::new();
        };
        let mut z = vec![0.0, -self.depth, transition];
        self.extend_with_fill_bounds(&mut z);
        descending_unique(&z)
    }

    /// Breakpoints of the fill/excavation family.
    ///
    /// Empty when no fill is configured.
    #[must_use]
    pub fn fill_breakpoints(&self) -> Vec<f64> {
        if self.fill.is_none() {
            return Vec::new();
        }
        let mut z = vec![0.0, -self.depth];
        if let Some(t) = self.transition.filter(|&t| t < 0.0 && t > -self.depth) {
            z.push(t);
        }
        self.extend_with_fill_bounds(&mut z);
        descending_unique(&z)
    }

    /// Breakpoints of the ratchetting family: the band limits plus every
    /// stratum boundary that crosses the band.
    #[must_use]
    pub fn ratchetting_breakpoints(&self) -> Vec<f64> {
        let Some(band) = self.ratchetting else {
            return Vec::new();
        };
        let mut z = vec![band.top, band.bottom];
        z.extend(
            self.strata
                .bottoms
                .iter()
                .copied()
                .filter(|&b| b < band.top && b > band.bottom),
        );
        descending_unique(&z)
    }

    fn extend_with_fill_bounds(&self, z: &mut Vec<f64>) {
        if let Some(fill) = &self.fill {
            z.extend_from_slice(&fill.layers.bottoms);
        }
        if let Some(excavation) = &self.excavation {
            z.extend_from_slice(&excavation.bottoms);
        }
    }
}

/// Computes the model envelope and every layer bound from a configuration.
pub struct BoundaryPlanner<'a> {
    config: &'a FoundationConfig,
}

impl<'a> BoundaryPlanner<'a> {
    /// Creates a new `BoundaryPlanner` for a validated configuration.
    #[must_use]
    pub fn new(config: &'a FoundationConfig) -> Self {
        Self { config }
    }

    /// Executes the planning.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a layer set cannot fit its envelope or the
    /// water table lies below the model.
    pub fn execute(&self) -> Result<BoundaryPlan> {
        let config = self.config;
        let depth = config.depth;

        let (model_depth, strata) = self.plan_strata();
        let fill = self.plan_fill()?;
        let excavation = if fill.is_some() {
            Some(plan_excavation(&strata, depth))
        } else {
            None
        };
        let model_width = self.plan_model_width(fill.as_ref());

        let transition = match config.kind {
            FoundationKind::Plate => None,
            FoundationKind::Solid => config.footing_thickness.map(|d1| -depth + d1),
        };

        let ratchetting = config.has_ratchetting().then(|| Band {
            top: -depth,
            bottom: -depth - config.ratchetting,
        });

        let water_table = match config.water_table {
            Some(wt) if wt > model_depth + TOLERANCE => {
                return Err(ConfigError::OutOfRange {
                    parameter: "water_table",
                    value: wt,
                    requirement: "within the model depth",
                }
                .into());
            }
            Some(wt) => Some(-wt),
            None => None,
        };

        let plan = BoundaryPlan {
            model_width,
            model_depth,
            depth,
            transition,
            strata,
            fill,
            excavation,
            ratchetting,
            water_table,
        };
        debug!(
            model_width = plan.model_width,
            model_depth = plan.model_depth,
            strata = ?plan.strata.bottoms,
            fill = ?plan.fill.as_ref().map(|f| &f.layers.bottoms),
            excavation = ?plan.excavation.as_ref().map(|e| &e.bottoms),
            "planned section boundaries"
        );
        Ok(plan)
    }

    /// Resolves the model depth and extends the deepest stratum to reach it.
    fn plan_strata(&self) -> (f64, Layering) {
        let config = self.config;
        let d = config.depth;
        let b = config.width;
        let min_depth = (d + 0.5 * b).max(d + config.ratchetting);
        let default_depth = d + 3.0 * b;
        let supplied: f64 = config.strata.iter().sum();

        let mut model_depth = match config.model_depth {
            Some(requested) if requested < min_depth => {
                info!(requested, min_depth, "model depth raised to the enforced minimum");
                min_depth
            }
            Some(requested) => requested,
            None => default_depth.max(min_depth).max(supplied),
        };
        if supplied > model_depth + TOLERANCE {
            info!(
                model_depth,
                strata_depth = supplied,
                "model depth extended to the supplied strata"
            );
            model_depth = supplied;
        }

        let mut thicknesses = if config.strata.is_empty() {
            vec![model_depth]
        } else {
            config.strata.clone()
        };
        let remainder = model_depth - thicknesses.iter().sum::<f64>();
        if remainder > TOLERANCE {
            if let Some(last) = thicknesses.last_mut() {
                debug!(remainder, "deepest stratum extended to the model depth");
                *last += remainder;
            }
        }
        (model_depth, Layering::new(thicknesses))
    }

    #[allow(clippy::cast_precision_loss)]
    fn plan_fill(&self) -> Result<Option<FillSlope>> {
        let config = self.config;
        if config.is_surface() && config.fill.is_some() {
            info!("fill ignored on a surface foundation");
        }
        let Some(fill) = config.effective_fill() else {
            return Ok(None);
        };
        let d = config.depth;

        let thicknesses = match &fill.layers {
            FillLayers::Single => vec![d],
            FillLayers::Count(n) => vec![d / *n as f64; *n],
            FillLayers::Thicknesses(given) => {
                let mut thicknesses = given.clone();
                let remainder = d - thicknesses.iter().sum::<f64>();
                if remainder < -TOLERANCE {
                    return Err(ConfigError::OutOfRange {
                        parameter: "fill layer thickness sum",
                        value: d - remainder,
                        requirement: "no greater than the foundation depth",
                    }
                    .into());
                }
                if remainder > TOLERANCE {
                    if let Some(last) = thicknesses.last_mut() {
                        *last += remainder;
                    }
                }
                thicknesses
            }
        };

        Ok(Some(FillSlope {
            angle: fill.angle,
            offset: fill.offset,
            layers: Layering::new(thicknesses),
        }))
    }

    fn plan_model_width(&self, fill: Option<&FillSlope>) -> f64 {
        let config = self.config;
        let half_width = config.width / 2.0;
        let mut min_width = 1.1 * half_width;
        let mut default_width = (1.5 * config.depth).max(2.0 * config.width);
        if let Some(fill) = fill {
            let slope_top = half_width + fill.offset + config.depth / fill.angle.to_radians().tan();
            min_width = min_width.max(slope_top + 0.5);
            default_width = default_width.max(min_width);
        }
        match config.model_width {
            Some(requested) if requested < min_width => {
                info!(requested, min_width, "model width raised to the enforced minimum");
                min_width
            }
            Some(requested) => requested,
            None => default_width,
        }
    }
}

/// Truncates the natural strata at the foundation depth. The stratum cut by
/// the footing base contributes its upper part as the last excavated layer.
fn plan_excavation(strata: &Layering, depth: f64) -> Layering {
    let mut thicknesses = Vec::new();
    let mut reached = 0.0;
    for &t in &strata.thicknesses {
        if reached + t > depth + TOLERANCE {
            break;
        }
        reached += t;
        thicknesses.push(t);
    }
    if depth - reached > TOLERANCE {
        thicknesses.push(depth - reached);
    }
    Layering::new(thicknesses)
}
