use std::fmt;

use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Canonical boundary topology of the local soil around the foundation.
///
/// The case decides which vertex rule shapes the local strata polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TopologyCase {
    /// Full-width strata; nothing cuts into the soil.
    Open,
    /// Surface foundation over a ratchetting band.
    SurfaceRatchetting,
    /// Buried solid foundation without fill or ratchetting.
    BuriedSolid,
    /// Buried plate over a ratchetting band, no fill.
    BuriedPlateRatchetting,
    /// Buried solid over a ratchetting band, no fill.
    BuriedSolidRatchetting,
    /// Buried foundation with fill, no ratchetting.
    Fill,
    /// Buried foundation with fill over a ratchetting band.
    FillRatchetting,
}

impl TopologyCase {
    /// Every case, ordered by id.
    pub const ALL: [Self; 7] = [
        Self::Open,
        Self::SurfaceRatchetting,
        Self::BuriedSolid,
        Self::BuriedPlateRatchetting,
        Self::BuriedSolidRatchetting,
        Self::Fill,
        Self::FillRatchetting,
    ];

    /// Numeric case id in `1..=7`.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Self::Open => 1,
            Self::SurfaceRatchetting => 2,
            Self::BuriedSolid => 3,
            Self::BuriedPlateRatchetting => 4,
            Self::BuriedSolidRatchetting => 5,
            Self::Fill => 6,
            Self::FillRatchetting => 7,
        }
    }
}

impl fmt::Display for TopologyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "case {}", self.id())
    }
}

/// Classified foundation type: topology case plus a descriptive label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoundationType {
    pub case: TopologyCase,
    pub label: &'static str,
}

/// Maps the four foundation flags to a topology case.
///
/// # Errors
///
/// Returns `ConfigError::Unsupported` for flag combinations that cannot be
/// built, i.e. fill on a surface foundation.
#[allow(clippy::fn_params_excessive_bools)]
pub fn classify(
    is_plate: bool,
    is_surface: bool,
    has_ratchetting: bool,
    has_fill: bool,
) -> Result<FoundationType> {
    use TopologyCase::{
        BuriedPlateRatchetting, BuriedSolid, BuriedSolidRatchetting, Fill, FillRatchetting, Open,
        SurfaceRatchetting,
    };

    let (case, label) = match (is_plate, is_surface, has_ratchetting, has_fill) {
        (true, true, false, false) => (Open, "surface plate foundation with no ratchetting"),
        (true, true, true, false) => (
            SurfaceRatchetting,
            "surface plate foundation with ratchetting",
        ),
        (true, false, false, false) => (Open, "buried plate foundation with no fill or ratchetting"),
        (true, false, true, false) => (
            BuriedPlateRatchetting,
            "buried plate foundation with ratchetting and no fill",
        ),
        (true, false, false, true) => (Fill, "buried plate foundation with fill and no ratchetting"),
        (true, false, true, true) => (
            FillRatchetting,
            "buried plate foundation with fill and ratchetting",
        ),
        (false, true, false, false) => (Open, "surface solid foundation with no ratchetting"),
        (false, true, true, false) => (
            SurfaceRatchetting,
            "surface solid foundation with ratchetting",
        ),
        (false, false, false, false) => (
            BuriedSolid,
            "buried solid foundation with no fill or ratchetting",
        ),
        (false, false, true, false) => (
            BuriedSolidRatchetting,
            "buried solid foundation with ratchetting and no fill",
        ),
        (false, false, false, true) => (Fill, "buried solid foundation with fill and no ratchetting"),
        (false, false, true, true) => (
            FillRatchetting,
            "buried solid foundation with fill and ratchetting",
        ),
        (plate, surface @ true, ratchetting, fill @ true) => {
            return Err(ConfigError::Unsupported {
                plate,
                surface,
                ratchetting,
                fill,
            }
            .into());
        }
    };
    Ok(FoundationType { case, label })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SectionError;

    fn case_of(plate: bool, surface: bool, ratchetting: bool, fill: bool) -> u8 {
        classify(plate, surface, ratchetting, fill).unwrap().case.id()
    }

    #[test]
    fn table_matches_reference_ids() {
        let table = [
            ((true, true, false, false), 1),
            ((true, true, true, false), 2),
            ((true, false, false, false), 1),
            ((true, false, true, false), 4),
            ((true, false, false, true), 6),
            ((true, false, true, true), 7),
            ((false, true, false, false), 1),
            ((false, true, true, false), 2),
            ((false, false, false, false), 3),
            ((false, false, true, false), 5),
            ((false, false, false, true), 6),
            ((false, false, true, true), 7),
        ];
        for ((plate, surface, ratchetting, fill), id) in table {
            assert_eq!(
                case_of(plate, surface, ratchetting, fill),
                id,
                "flags ({plate}, {surface}, {ratchetting}, {fill})"
            );
        }
    }

    #[test]
    fn surface_fill_is_unsupported() {
        for plate in [true, false] {
            for ratchetting in [true, false] {
                let err = classify(plate, true, ratchetting, true).unwrap_err();
                assert!(matches!(
                    err,
                    SectionError::Config(ConfigError::Unsupported { surface: true, fill: true, .. })
                ));
            }
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels = Vec::new();
        for bits in 0u8..16 {
            let flags = (bits & 8 != 0, bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
            if let Ok(t) = classify(flags.0, flags.1, flags.2, flags.3) {
                labels.push(t.label);
            }
        }
        assert_eq!(labels.len(), 12);
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn ids_cover_one_to_seven() {
        let ids: Vec<u8> = TopologyCase::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(TopologyCase::Fill.to_string(), "case 6");
    }
}
