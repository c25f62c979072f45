pub mod boundaries;
pub mod classify;
pub mod regions;

pub use boundaries::{Band, BoundaryPlan, BoundaryPlanner, FillSlope, Layering};
pub use classify::{classify, FoundationType, TopologyCase};
pub use regions::{Region, RegionBuilder, RegionFamily, SectionDims};
