//! Data types for the road graph.
//!
//! Nodes and roads live in arenas indexed by `NodeId` / `RoadId`; adjacency
//! stores ids only, so both directions of a connection share one `Road`.

use std::collections::HashMap;

use nalgebra::Vector3;

use crate::road::{Road, RoadId};

/// Identifier of a node inside its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A named point. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Vector3<f64>,
}

/// Builder input: a node plus its forward connections (by name).
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub position: Vector3<f64>,
    pub connections: Vec<String>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            position,
            connections: Vec::new(),
        }
    }

    /// Add a forward connection `self → to`.
    pub fn connect(mut self, to: impl Into<String>) -> Self {
        self.connections.push(to.into());
        self
    }
}

/// One adjacency entry: the neighbour and the road leading to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub to: NodeId,
    pub road: RoadId,
}

/// Symmetric adjacency `node → node → road`.
///
/// Invariants:
/// - `adj[a]` contains `Link { to: b, road: r }` iff `adj[b]` contains
///   `Link { to: a, road: r }`.
/// - Every `Link::to` indexes `nodes` (closed world).
/// - `adj[k]` keeps insertion order; district tracing breaks ties by it.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    pub nodes: Vec<Node>,
    pub roads: Vec<Road>,
    pub adj: Vec<Vec<Link>>,
    pub(crate) by_name: HashMap<String, NodeId>,
}

impl RoadGraph {
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(id.0)
    }

    #[inline]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Adjacency of `id`; empty for unknown ids.
    #[inline]
    pub fn links(&self, id: NodeId) -> &[Link] {
        self.adj.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn degree(&self, id: NodeId) -> usize {
        self.links(id).len()
    }

    /// `graph[a][b]`.
    pub fn road_between(&self, a: NodeId, b: NodeId) -> Option<RoadId> {
        self.links(a).iter().find(|l| l.to == b).map(|l| l.road)
    }
}
