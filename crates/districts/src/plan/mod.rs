//! Plan: road graph, districts and the road/side → district index.
//!
//! Purpose
//! - Build once from `NodeSpec`s, then serve read-only queries: graph lookups,
//!   the district bordering each side of a road, routes (see `crate::routes`)
//!   and position tracking (see `crate::tracker`).
//!
//! Layout
//! - `types.rs` (`Side`, `District`, `DistrictSideIndex`, `Plan`),
//!   `decompose.rs` (face tracing), and the query surface below.
//!
//! Notes
//! - Districts live in an arena; everything else refers to them by
//!   `DistrictId`. A plan is `Send + Sync` and never changes after `new`.

mod decompose;
mod types;

pub use types::{District, DistrictId, DistrictSideIndex, Plan, Side};

use crate::error::{BuildError, LookupError};
use crate::graph::{build_graph, check_graph, Node, NodeId, NodeSpec, RoadGraph};
use crate::road::{Road, RoadId};

impl Plan {
    /// Build the road graph and trace its districts.
    pub fn new(specs: &[NodeSpec]) -> Result<Self, BuildError> {
        Self::from_graph(build_graph(specs)?)
    }

    /// Trace districts of an already built graph. Graphs assembled by hand
    /// are re-checked first; a malformed one yields `BuildError::InvalidGraph`.
    pub fn from_graph(mut graph: RoadGraph) -> Result<Self, BuildError> {
        check_graph(&mut graph)?;
        let (districts, sides) = decompose::decompose(&graph)?;
        Ok(Self {
            graph,
            districts,
            sides,
        })
    }

    #[inline]
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    #[inline]
    pub fn roads(&self) -> &[Road] {
        &self.graph.roads
    }

    #[inline]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    #[inline]
    pub fn side_index(&self) -> &DistrictSideIndex {
        &self.sides
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, LookupError> {
        self.graph.node(id).ok_or(LookupError::NodeOutOfRange(id))
    }

    pub fn road(&self, id: RoadId) -> Result<&Road, LookupError> {
        self.graph.road(id).ok_or(LookupError::RoadOutOfRange(id))
    }

    pub fn district(&self, id: DistrictId) -> Result<&District, LookupError> {
        self.districts
            .get(id.0)
            .ok_or(LookupError::DistrictOutOfRange(id))
    }

    pub fn node_id(&self, name: &str) -> Result<NodeId, LookupError> {
        self.graph
            .node_id(name)
            .ok_or_else(|| LookupError::UnknownNode(name.to_string()))
    }

    /// Neighbours of `node`, in adjacency order.
    pub fn connected_nodes(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = NodeId> + '_, LookupError> {
        self.node(node)?;
        Ok(self.graph.links(node).iter().map(|l| l.to))
    }

    /// Roads touching `node`, in adjacency order.
    pub fn connected_roads(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = &Road> + '_, LookupError> {
        self.node(node)?;
        Ok(self
            .graph
            .links(node)
            .iter()
            .map(move |l| &self.graph.roads[l.road.0]))
    }

    pub fn connecting_road(&self, a: NodeId, b: NodeId) -> Result<&Road, LookupError> {
        self.node(a)?;
        self.node(b)?;
        self.graph
            .road_between(a, b)
            .map(|r| &self.graph.roads[r.0])
            .ok_or(LookupError::NotConnected(a, b))
    }

    /// Roads joining each consecutive pair of `path`.
    pub fn connecting_roads(&self, path: &[NodeId]) -> Result<Vec<&Road>, LookupError> {
        path.windows(2)
            .map(|w| self.connecting_road(w[0], w[1]))
            .collect()
    }

    /// District on `side` of `road`.
    pub fn connected_district(&self, road: RoadId, side: Side) -> Result<&District, LookupError> {
        self.road(road)?;
        let id = self
            .sides
            .get(road, side)
            .ok_or(LookupError::RoadOutOfRange(road))?;
        self.district(id)
    }

    /// Districts enclosing a bounded area (exterior faces excluded).
    pub fn bounded_districts(&self) -> impl Iterator<Item = &District> + '_ {
        self.districts
            .iter()
            .filter(move |d| d.is_bounded(&self.graph))
    }
}
