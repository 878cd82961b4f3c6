//! Route enumeration: backtracking DFS over simple paths between two nodes.
//!
//! Rules
//! - Never step straight back onto the previous node.
//! - Never reuse a road within one trace (a node may be revisited through a
//!   different road).
//! - The search stops at the target; a found route is dropped when an
//!   already-found route has the same length and the same node set.
//! - With `max_nodes = Some(k)` the trace before the target holds at most `k`
//!   nodes, so routes hold at most `k + 1`.

use std::collections::BTreeSet;

use crate::error::LookupError;
use crate::graph::{NodeId, RoadGraph};
use crate::plan::Plan;
use crate::road::RoadId;

/// A path through the graph. `roads[k]` joins `nodes[k]` and `nodes[k + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub roads: Vec<RoadId>,
}

impl Route {
    /// Sum of road lengths.
    pub fn length(&self, graph: &RoadGraph) -> f64 {
        self.roads
            .iter()
            .filter_map(|r| graph.road(*r))
            .map(|r| r.length())
            .sum()
    }
}

/// Enumerate routes from `from` to `to` on `graph`.
///
/// `from == to` yields the single trivial route. Unknown ids yield no routes;
/// use `Plan::all_routes` for checked lookups.
pub fn find_routes(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    max_nodes: Option<usize>,
) -> Vec<Route> {
    if graph.node(from).is_none() || graph.node(to).is_none() {
        return Vec::new();
    }
    if from == to {
        return vec![Route {
            nodes: vec![from],
            roads: Vec::new(),
        }];
    }
    let mut runner = RouteRunner::new(graph, from, to, max_nodes.unwrap_or(usize::MAX));
    runner.recur();
    tracing::trace!(
        from = from.0,
        to = to.0,
        routes = runner.found.len(),
        "routes enumerated"
    );
    runner.found
}

impl Plan {
    /// All routes from `from` to `to`; `None` leaves the length unbounded.
    pub fn all_routes(
        &self,
        from: NodeId,
        to: NodeId,
        max_nodes: Option<usize>,
    ) -> Result<Vec<Route>, LookupError> {
        self.node(from)?;
        self.node(to)?;
        Ok(find_routes(self.graph(), from, to, max_nodes))
    }

    /// Shortest of `all_routes` by summed road length.
    pub fn shortest_route(
        &self,
        from: NodeId,
        to: NodeId,
        max_nodes: Option<usize>,
    ) -> Result<Option<Route>, LookupError> {
        let routes = self.all_routes(from, to, max_nodes)?;
        Ok(routes.into_iter().min_by(|a, b| {
            a.length(self.graph())
                .partial_cmp(&b.length(self.graph()))
                .unwrap_or(std::cmp::Ordering::Equal)
        }))
    }
}

/// DFS runner carrying the trace and the found routes.
struct RouteRunner<'a> {
    g: &'a RoadGraph,
    target: NodeId,
    limit: usize,
    nodes: Vec<NodeId>,
    roads: Vec<RoadId>,
    used: Vec<bool>,
    found: Vec<Route>,
    seen: Vec<(usize, BTreeSet<NodeId>)>,
}

impl<'a> RouteRunner<'a> {
    fn new(g: &'a RoadGraph, from: NodeId, target: NodeId, limit: usize) -> Self {
        Self {
            g,
            target,
            limit,
            nodes: vec![from],
            roads: Vec::new(),
            used: vec![false; g.roads.len()],
            found: Vec::new(),
            seen: Vec::new(),
        }
    }

    fn recur(&mut self) {
        let g = self.g;
        let n = self.nodes.len();
        let cur = self.nodes[n - 1];
        let prev = n.checked_sub(2).map(|k| self.nodes[k]);
        for link in g.links(cur) {
            if Some(link.to) == prev || self.used[link.road.0] {
                continue;
            }
            if link.to == self.target {
                self.record(link.road);
                continue;
            }
            if self.nodes.len() >= self.limit {
                continue;
            }
            self.nodes.push(link.to);
            self.roads.push(link.road);
            self.used[link.road.0] = true;
            self.recur();
            self.used[link.road.0] = false;
            self.roads.pop();
            self.nodes.pop();
        }
    }

    fn record(&mut self, last: RoadId) {
        debug_assert!(self.nodes.len() <= self.limit);
        let mut nodes = self.nodes.clone();
        nodes.push(self.target);
        let key: BTreeSet<NodeId> = nodes.iter().copied().collect();
        if self
            .seen
            .iter()
            .any(|(len, set)| *len == nodes.len() && *set == key)
        {
            return;
        }
        let mut roads = self.roads.clone();
        roads.push(last);
        self.seen.push((nodes.len(), key));
        self.found.push(Route { nodes, roads });
    }
}
