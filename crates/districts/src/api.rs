//! Curated API surface.
//!
//! Important
//! - Prefer these re-exports over reaching into module internals; the module
//!   layout behind them may change.

// Geometry
pub use crate::cfg::UP;
pub use crate::geometry::{clockwise_turn, closest_point_on_segment, sign_of_point_on_axis};
// Roads and graph
pub use crate::graph::{build_graph, Link, Node, NodeId, NodeSpec, RoadGraph};
pub use crate::road::{
    are_connected, are_converging, are_diverging, are_sequential, other_node, shared_node, Road,
    RoadId, RoadShape,
};
// Districts
pub use crate::plan::{District, DistrictId, DistrictSideIndex, Plan, Side};
// Queries
pub use crate::routes::{find_routes, Route};
pub use crate::tracker::{Closest, Tracker};
// Generators
pub use crate::gen::{grid_name, grid_specs, ring_specs, GridCfg};
// Errors
pub use crate::error::{BuildError, LookupError};
