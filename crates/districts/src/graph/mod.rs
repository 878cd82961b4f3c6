//! Road graph: named nodes and the symmetric node → node → road adjacency.
//!
//! `build.rs` turns `NodeSpec`s (forward connections by name) into a
//! `RoadGraph`; `types.rs` holds the arena types.

mod build;
mod types;

pub use build::build_graph;
pub(crate) use build::check_graph;
pub use types::{Link, Node, NodeId, NodeSpec, RoadGraph};

#[cfg(test)]
mod tests;
