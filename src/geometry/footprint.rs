use serde::{Deserialize, Serialize};

use super::Polyline;
use crate::math::Point2;

/// Which foundation/soil contact surfaces receive interface elements.
///
/// Plate foundations have no lateral face, so `lateral` only affects solid
/// foundations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct InterfaceSelection {
    pub column: bool,
    pub top: bool,
    pub bottom: bool,
    pub lateral: bool,
}

impl Default for InterfaceSelection {
    /// Column interface only.
    fn default() -> Self {
        Self {
            column: true,
            top: false,
            bottom: false,
            lateral: false,
        }
    }
}

impl InterfaceSelection {
    /// Enables or disables every interface at once.
    #[must_use]
    pub fn all(enabled: bool) -> Self {
        Self {
            column: enabled,
            top: enabled,
            bottom: enabled,
            lateral: enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    Column,
    Top,
    Bottom,
    Lateral,
}

/// Straight contact segment between structure and soil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterfaceSegment {
    pub kind: InterfaceKind,
    pub start: Point2,
    pub end: Point2,
}

impl InterfaceSegment {
    #[must_use]
    pub fn new(kind: InterfaceKind, start: Point2, end: Point2) -> Self {
        Self { kind, start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Structural outline of the foundation, independent of the soil partition.
///
/// For a plate the outline is an open polyline along the structural axis;
/// for a solid foundation it is the closed silhouette of the concrete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footprint {
    pub outline: Polyline,
    pub footing: Polyline,
    /// Present when the column rises above the footing.
    pub column: Option<Polyline>,
}
