//! Cross-section decomposition of shallow foundation load tests.
//!
//! A [`FoundationConfig`] describes a plate or solid foundation, its
//! backfill, the ratchetting band under the footing and the natural strata.
//! [`GeometryAssembly::build`] turns it into polygons covering the
//! half-section `x >= 0`, each assigned to the layers an external
//! finite-element engine needs for materials and staged activation.

pub mod assembly;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use assembly::{GeometryAssembly, LayerFamily, LayerMap};
pub use config::{FillConfig, FillLayers, FoundationConfig, FoundationKind};
pub use error::{ConfigError, GeometryError, Result, SectionError};
pub use operations::{RegionFamily, TopologyCase};
