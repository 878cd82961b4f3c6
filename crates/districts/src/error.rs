//! Error types for plan construction and plan queries.

use crate::graph::NodeId;
use crate::plan::{DistrictId, Side};
use crate::road::RoadId;

/// Fatal, construction-time errors. A failed build never yields a `Plan`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Two node specs share a name.
    #[error("duplicate node name `{0}`")]
    DuplicateNode(String),
    /// A forward connection names a node outside the supplied collection.
    #[error("node `{from}` connects to unknown node `{to}`")]
    UnknownConnection { from: String, to: String },
    /// A node lists itself as a connection.
    #[error("node `{0}` connects to itself")]
    SelfConnection(String),
    /// Both endpoints of a road sit at the same position.
    #[error("road `{0}` has zero length")]
    DegenerateRoad(String),
    /// A hand-built `RoadGraph` breaks an arena or adjacency invariant.
    #[error("malformed road graph: {0}")]
    InvalidGraph(String),
    /// A trace reached a node with no way forward (degree 1).
    #[error("node `{node}` is a dead end; districts cannot close")]
    DeadEnd { node: String },
    /// A trace ran into an edge owned by another district.
    #[error("trace through road `{road}` does not close on itself")]
    OpenTrace { road: String },
    /// A road side was never reached by any trace.
    #[error("road `{road}` has no district on its {side:?} side")]
    Uncovered { road: String, side: Side },
}

/// Caller errors: asking a plan about something it does not contain.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no node named `{0}`")]
    UnknownNode(String),
    #[error("node id {0:?} is out of range")]
    NodeOutOfRange(NodeId),
    #[error("road id {0:?} is out of range")]
    RoadOutOfRange(RoadId),
    #[error("district id {0:?} is out of range")]
    DistrictOutOfRange(DistrictId),
    /// No road joins the two nodes.
    #[error("nodes {0:?} and {1:?} are not connected by a road")]
    NotConnected(NodeId, NodeId),
    /// The plan has no roads to track against.
    #[error("plan has no roads")]
    EmptyPlan,
}
