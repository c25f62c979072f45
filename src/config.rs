//! Foundation geometry configuration.
//!
//! A [`FoundationConfig`] is a plain value record. It can be assembled in code
//! through the `plate`/`solid` constructors and `with_*` builders, or loaded
//! from any serde format by the orchestration layer.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::InterfaceSelection;
use crate::math::TOLERANCE;

/// Default horizontal distance between the foundation edge and the toe of
/// the fill slope [m].
pub const DEFAULT_FILL_OFFSET: f64 = 0.5;

/// How the foundation structure is represented in the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationKind {
    /// Thin structural line (column axis plus footing).
    Plate,
    /// Concrete column on a footing pad, modelled as area.
    Solid,
}

impl FoundationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plate => "plate",
            Self::Solid => "solid",
        }
    }
}

/// Subdivision of the fill into layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFillLayers", into = "RawFillLayers")]
pub enum FillLayers {
    /// One layer spanning the full foundation depth.
    #[default]
    Single,
    /// `n` layers of uniform thickness.
    Count(usize),
    /// Explicit thicknesses from the surface down [m]. The deepest layer
    /// absorbs any remainder up to the foundation depth.
    Thicknesses(Vec<f64>),
}

/// Serialized form of [`FillLayers`], mirroring the `nfill` / `dfill` keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawFillLayers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nfill: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dfill: Option<Vec<f64>>,
}

impl TryFrom<RawFillLayers> for FillLayers {
    type Error = ConfigError;

    fn try_from(raw: RawFillLayers) -> std::result::Result<Self, Self::Error> {
        match (raw.nfill, raw.dfill) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(
                "define either the number of uniform fill layers (nfill) or their \
                 thicknesses (dfill), not both"
                    .to_owned(),
            )),
            (Some(n), None) => Ok(Self::Count(n)),
            (None, Some(d)) => Ok(Self::Thicknesses(d)),
            (None, None) => Ok(Self::Single),
        }
    }
}

impl From<FillLayers> for RawFillLayers {
    fn from(layers: FillLayers) -> Self {
        match layers {
            FillLayers::Single => Self::default(),
            FillLayers::Count(n) => Self {
                nfill: Some(n),
                dfill: None,
            },
            FillLayers::Thicknesses(d) => Self {
                nfill: None,
                dfill: Some(d),
            },
        }
    }
}

/// Backfill placed against the sloped excavation face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Slope angle from the horizontal [deg].
    pub angle: f64,
    /// Distance between the foundation edge and the slope toe [m].
    #[serde(default = "default_fill_offset")]
    pub offset: f64,
    #[serde(flatten)]
    pub layers: FillLayers,
}

fn default_fill_offset() -> f64 {
    DEFAULT_FILL_OFFSET
}

impl FillConfig {
    /// Single-layer fill with the default offset.
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            offset: DEFAULT_FILL_OFFSET,
            layers: FillLayers::Single,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_layers(mut self, layers: FillLayers) -> Self {
        self.layers = layers;
        self
    }
}

/// Geometry of a shallow foundation load test.
///
/// Widths are full widths; the section models the half-plane `x >= 0` so
/// vertex rules work with `width / 2` and `column_width / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationConfig {
    pub kind: FoundationKind,
    /// Footing width `b` [m].
    pub width: f64,
    /// Foundation depth `d`, from the surface to the footing base [m].
    pub depth: f64,
    /// Column width `b1` [m]. Solid foundations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<f64>,
    /// Footing thickness `d1` [m]. Solid foundations only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footing_thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillConfig>,
    /// Thickness of the band replaced under the footing when ratchetting
    /// occurs [m]. Zero disables the band.
    #[serde(default)]
    pub ratchetting: f64,
    /// Natural strata thicknesses from the surface down [m]. Empty means a
    /// single stratum spanning the model depth.
    #[serde(default)]
    pub strata: Vec<f64>,
    /// Global water table depth [m].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_table: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_depth: Option<f64>,
    #[serde(default)]
    pub interfaces: InterfaceSelection,
}

impl FoundationConfig {
    /// Plate foundation of width `b` buried at depth `d`.
    #[must_use]
    pub fn plate(width: f64, depth: f64) -> Self {
        Self::with_kind(FoundationKind::Plate, width, depth)
    }

    /// Solid foundation: footing of width `b` and thickness `d1` at depth `d`,
    /// carried by a column of width `b1`.
    #[must_use]
    pub fn solid(width: f64, depth: f64, column_width: f64, footing_thickness: f64) -> Self {
        let mut config = Self::with_kind(FoundationKind::Solid, width, depth);
        config.column_width = Some(column_width);
        config.footing_thickness = Some(footing_thickness);
        config
    }

    fn with_kind(kind: FoundationKind, width: f64, depth: f64) -> Self {
        Self {
            kind,
            width,
            depth,
            column_width: None,
            footing_thickness: None,
            fill: None,
            ratchetting: 0.0,
            strata: Vec::new(),
            water_table: None,
            model_width: None,
            model_depth: None,
            interfaces: InterfaceSelection::default(),
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: FillConfig) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_ratchetting(mut self, thickness: f64) -> Self {
        self.ratchetting = thickness;
        self
    }

    #[must_use]
    pub fn with_strata(mut self, thicknesses: Vec<f64>) -> Self {
        self.strata = thicknesses;
        self
    }

    #[must_use]
    pub fn with_water_table(mut self, depth: f64) -> Self {
        self.water_table = Some(depth);
        self
    }

    #[must_use]
    pub fn with_model_width(mut self, width: f64) -> Self {
        self.model_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_model_depth(mut self, depth: f64) -> Self {
        self.model_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_interfaces(mut self, interfaces: InterfaceSelection) -> Self {
        self.interfaces = interfaces;
        self
    }

    /// Returns `true` for a foundation resting on the ground surface.
    #[must_use]
    pub fn is_surface(&self) -> bool {
        self.depth < TOLERANCE
    }

    /// Returns `true` when a ratchetting band is configured.
    #[must_use]
    pub fn has_ratchetting(&self) -> bool {
        self.ratchetting > 0.0
    }

    /// The fill that actually takes part in the section.
    ///
    /// A surface foundation has nothing to backfill, so any fill settings are
    /// ignored when `depth == 0`.
    #[must_use]
    pub fn effective_fill(&self) -> Option<&FillConfig> {
        if self.is_surface() {
            None
        } else {
            self.fill.as_ref()
        }
    }

    /// Checks every scalar field before any boundary is planned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` for negative, zero or non-finite
    /// dimensions and `ConfigError::Invalid` for contradictory fields.
    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        non_negative("depth", self.depth)?;
        non_negative("ratchetting", self.ratchetting)?;

        match self.kind {
            FoundationKind::Plate => {
                if self.column_width.is_some() || self.footing_thickness.is_some() {
                    return Err(ConfigError::Invalid(
                        "plate foundations take no column width or footing thickness".to_owned(),
                    )
                    .into());
                }
            }
            FoundationKind::Solid => self.validate_solid()?,
        }

        if let Some(fill) = &self.fill {
            validate_fill(fill, self.depth)?;
        }

        for &t in &self.strata {
            positive("strata thickness", t)?;
        }
        if let Some(wt) = self.water_table {
            non_negative("water_table", wt)?;
        }
        if let Some(w) = self.model_width {
            positive("model_width", w)?;
        }
        if let Some(d) = self.model_depth {
            positive("model_depth", d)?;
        }
        Ok(())
    }

    fn validate_solid(&self) -> Result<()> {
        let (Some(b1), Some(d1)) = (self.column_width, self.footing_thickness) else {
            return Err(ConfigError::Invalid(
                "solid foundations require a column width and a footing thickness".to_owned(),
            )
            .into());
        };
        positive("column_width", b1)?;
        positive("footing_thickness", d1)?;
        if b1 > self.width {
            return Err(ConfigError::OutOfRange {
                parameter: "column_width",
                value: b1,
                requirement: "no wider than the footing",
            }
            .into());
        }
        if self.depth > 0.0 && d1 > self.depth {
            return Err(ConfigError::OutOfRange {
                parameter: "footing_thickness",
                value: d1,
                requirement: "no thicker than the foundation depth",
            }
            .into());
        }
        Ok(())
    }
}

fn validate_fill(fill: &FillConfig, depth: f64) -> Result<()> {
    if !(fill.angle > 0.0 && fill.angle < 90.0) {
        return Err(ConfigError::OutOfRange {
            parameter: "fill angle",
            value: fill.angle,
            requirement: "strictly between 0 and 90 degrees",
        }
        .into());
    }
    non_negative("fill offset", fill.offset)?;
    match &fill.layers {
        FillLayers::Single => {}
        FillLayers::Count(0) => {
            return Err(ConfigError::Invalid("fill layer count must be at least 1".to_owned()).into());
        }
        FillLayers::Count(_) => {}
        FillLayers::Thicknesses(d) => {
            if d.is_empty() {
                return Err(
                    ConfigError::Invalid("fill layer thicknesses must not be empty".to_owned()).into(),
                );
            }
            for &t in d {
                positive("fill layer thickness", t)?;
            }
            let total: f64 = d.iter().sum();
            if depth > 0.0 && total > depth + TOLERANCE {
                return Err(ConfigError::OutOfRange {
                    parameter: "fill layer thickness sum",
                    value: total,
                    requirement: "no greater than the foundation depth",
                }
                .into());
            }
        }
    }
    Ok(())
}

fn positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            requirement: "finite and greater than zero",
        }
        .into())
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            requirement: "finite and not negative",
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SectionError;

    fn config_err(result: Result<()>) -> ConfigError {
        match result.unwrap_err() {
            SectionError::Config(e) => e,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn plate_and_solid_constructors_validate() {
        FoundationConfig::plate(2.0, 1.0).validate().unwrap();
        FoundationConfig::solid(2.0, 3.0, 1.0, 1.0).validate().unwrap();
        FoundationConfig::solid(2.0, 0.0, 1.0, 0.5).validate().unwrap();
    }

    #[test]
    fn solid_without_pedestal_is_invalid() {
        let mut config = FoundationConfig::solid(2.0, 3.0, 1.0, 1.0);
        config.footing_thickness = None;
        assert!(matches!(config_err(config.validate()), ConfigError::Invalid(_)));
    }

    #[test]
    fn plate_with_column_is_invalid() {
        let mut config = FoundationConfig::plate(2.0, 1.0);
        config.column_width = Some(0.5);
        assert!(matches!(config_err(config.validate()), ConfigError::Invalid(_)));
    }

    #[test]
    fn column_wider_than_footing_is_rejected() {
        let config = FoundationConfig::solid(2.0, 3.0, 2.5, 1.0);
        assert!(matches!(
            config_err(config.validate()),
            ConfigError::OutOfRange { parameter: "column_width", .. }
        ));
    }

    #[test]
    fn footing_thicker_than_depth_is_rejected() {
        let config = FoundationConfig::solid(2.0, 1.0, 1.0, 1.5);
        assert!(matches!(
            config_err(config.validate()),
            ConfigError::OutOfRange { parameter: "footing_thickness", .. }
        ));
    }

    #[test]
    fn negative_thicknesses_are_rejected() {
        let config = FoundationConfig::plate(2.0, 1.0).with_strata(vec![1.0, -0.5]);
        assert!(config.validate().is_err());
        let config = FoundationConfig::plate(2.0, 1.0).with_ratchetting(-0.1);
        assert!(config.validate().is_err());
        let config = FoundationConfig::plate(2.0, -1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn fill_angle_must_be_a_slope() {
        let config = FoundationConfig::plate(2.0, 1.0).with_fill(FillConfig::new(90.0));
        assert!(config.validate().is_err());
        let config = FoundationConfig::plate(2.0, 1.0).with_fill(FillConfig::new(0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn fill_thicknesses_may_not_exceed_depth() {
        let fill = FillConfig::new(30.0).with_layers(FillLayers::Thicknesses(vec![1.0, 1.5]));
        let config = FoundationConfig::plate(2.0, 2.0).with_fill(fill);
        assert!(matches!(
            config_err(config.validate()),
            ConfigError::OutOfRange { .. }
        ));
    }

    #[test]
    fn zero_fill_layers_is_invalid() {
        let fill = FillConfig::new(30.0).with_layers(FillLayers::Count(0));
        let config = FoundationConfig::plate(2.0, 2.0).with_fill(fill);
        assert!(config.validate().is_err());
    }

    #[test]
    fn surface_foundation_ignores_fill() {
        let config = FoundationConfig::plate(2.0, 0.0).with_fill(FillConfig::new(30.0));
        assert!(config.effective_fill().is_none());
        let config = FoundationConfig::plate(2.0, 1.0).with_fill(FillConfig::new(30.0));
        assert!(config.effective_fill().is_some());
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "kind": "solid",
            "width": 2.0,
            "depth": 3.0,
            "column_width": 1.0,
            "footing_thickness": 1.0,
            "fill": { "angle": 30.0, "nfill": 2 },
            "strata": [1.0, 4.0],
            "ratchetting": 0.2
        }"#;
        let config: FoundationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, FoundationKind::Solid);
        let fill = config.fill.as_ref().unwrap();
        assert_eq!(fill.layers, FillLayers::Count(2));
        assert!((fill.offset - DEFAULT_FILL_OFFSET).abs() < f64::EPSILON);
        assert_eq!(config.interfaces, InterfaceSelection::default());
        config.validate().unwrap();
    }

    #[test]
    fn both_nfill_and_dfill_is_rejected() {
        let json = r#"{ "angle": 30.0, "nfill": 2, "dfill": [0.5, 0.5] }"#;
        assert!(serde_json::from_str::<FillConfig>(json).is_err());
    }

    #[test]
    fn serialized_config_reloads() {
        let fill = FillConfig::new(35.0).with_layers(FillLayers::Thicknesses(vec![0.5, 0.5]));
        let config = FoundationConfig::plate(2.0, 1.5)
            .with_fill(fill)
            .with_strata(vec![2.0])
            .with_water_table(1.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: FoundationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
