pub mod footprint;
pub mod polygon;
pub mod polyline;

pub use footprint::{Footprint, InterfaceKind, InterfaceSegment, InterfaceSelection};
pub use polygon::{Aabb, Polygon};
pub use polyline::Polyline;
