//! Districts of a planar road network.
//!
//! Build a `Plan` from named nodes with forward connections; the plan traces
//! every face of the planar subdivision ("district") and records which
//! district borders each side of each road. On top of a plan:
//! - `routes`: enumerate simple paths between two nodes;
//! - `tracker`: follow a moving position's closest road, side and district.
//!
//! API Policy
//! - The stable surface is `api` (and `prelude`). Module internals may move.

pub mod api;
pub mod cfg;
pub mod error;
pub mod gen;
pub mod geometry;
pub mod graph;
pub mod plan;
pub mod road;
pub mod routes;
pub mod tracker;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{BuildError, LookupError};
pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::graph::{NodeId, NodeSpec};
    pub use crate::plan::{DistrictId, Plan, Side};
    pub use crate::road::RoadId;
    pub use crate::routes::Route;
    pub use crate::tracker::{Closest, Tracker};
    pub use crate::{BuildError, LookupError, Vec3};
}
