//! Graph construction from node specs with forward connections.

use std::collections::HashMap;

use crate::cfg::LENGTH_EPS;
use crate::error::BuildError;
use crate::road::{Road, RoadId, RoadShape};

use super::types::{Link, Node, NodeId, NodeSpec, RoadGraph};

/// Build the symmetric road graph.
///
/// Every forward connection `u → v` yields one road (start `u`, end `v`)
/// registered under both `adj[u]` and `adj[v]`. A connection already present
/// in the other direction is skipped.
pub fn build_graph(specs: &[NodeSpec]) -> Result<RoadGraph, BuildError> {
    // Register nodes first so connections may point forward in the list.
    let mut nodes = Vec::with_capacity(specs.len());
    let mut by_name: HashMap<String, NodeId> = HashMap::with_capacity(specs.len());
    for (k, spec) in specs.iter().enumerate() {
        let id = NodeId(k);
        if by_name.insert(spec.name.clone(), id).is_some() {
            return Err(BuildError::DuplicateNode(spec.name.clone()));
        }
        nodes.push(Node {
            id,
            name: spec.name.clone(),
            position: spec.position,
        });
    }

    let mut graph = RoadGraph {
        nodes,
        roads: Vec::new(),
        adj: vec![Vec::new(); specs.len()],
        by_name,
    };
    for (k, spec) in specs.iter().enumerate() {
        let u = NodeId(k);
        for target in &spec.connections {
            let v = graph
                .node_id(target)
                .ok_or_else(|| BuildError::UnknownConnection {
                    from: spec.name.clone(),
                    to: target.clone(),
                })?;
            if u == v {
                return Err(BuildError::SelfConnection(spec.name.clone()));
            }
            if graph.road_between(u, v).is_some() {
                tracing::debug!(from = %spec.name, to = %target, "skip duplicate connection");
                continue;
            }
            add_road(&mut graph, u, v)?;
        }
    }
    tracing::debug!(
        nodes = graph.nodes.len(),
        roads = graph.roads.len(),
        "road graph built"
    );
    Ok(graph)
}

fn add_road(graph: &mut RoadGraph, u: NodeId, v: NodeId) -> Result<RoadId, BuildError> {
    let (nu, nv) = (&graph.nodes[u.0], &graph.nodes[v.0]);
    let name = format!("{}-{}", nu.name, nv.name);
    let shape = RoadShape::Straight {
        start: nu.position,
        end: nv.position,
    };
    if shape.length() <= LENGTH_EPS {
        return Err(BuildError::DegenerateRoad(name));
    }
    let id = RoadId(graph.roads.len());
    graph.roads.push(Road {
        id,
        start: u,
        end: v,
        name,
        shape,
    });
    graph.adj[u.0].push(Link { to: v, road: id });
    graph.adj[v.0].push(Link { to: u, road: id });
    Ok(id)
}

/// Re-check a graph that did not come from `build_graph`.
///
/// Ids must match arena positions, every link must name an existing node and
/// a road joining both ends, and adjacency must be symmetric. Rebuilds the
/// name index from `nodes`.
pub(crate) fn check_graph(graph: &mut RoadGraph) -> Result<(), BuildError> {
    let invalid = |msg: String| Err(BuildError::InvalidGraph(msg));
    let n = graph.nodes.len();
    if graph.adj.len() != n {
        return invalid(format!("{} adjacency lists for {} nodes", graph.adj.len(), n));
    }
    for (k, node) in graph.nodes.iter().enumerate() {
        if node.id != NodeId(k) {
            return invalid(format!("node `{}` stored at {k} has id {:?}", node.name, node.id));
        }
    }
    for (k, road) in graph.roads.iter().enumerate() {
        if road.id != RoadId(k) {
            return invalid(format!("road `{}` stored at {k} has id {:?}", road.name, road.id));
        }
        if road.start.0 >= n || road.end.0 >= n || road.start == road.end {
            return invalid(format!("road `{}` has bad endpoints", road.name));
        }
        if road.length() <= LENGTH_EPS {
            return Err(BuildError::DegenerateRoad(road.name.clone()));
        }
    }
    for (k, links) in graph.adj.iter().enumerate() {
        let from = NodeId(k);
        for link in links {
            let Some(road) = graph.roads.get(link.road.0) else {
                return invalid(format!("link from node {k} names missing road {:?}", link.road));
            };
            if link.to.0 >= n || !road.has_node(from) || !road.has_node(link.to) {
                return invalid(format!(
                    "road `{}` does not join node {k} and {:?}",
                    road.name, link.to
                ));
            }
            let back = graph.adj[link.to.0]
                .iter()
                .any(|l| l.to == from && l.road == link.road);
            if !back {
                return invalid(format!("road `{}` is missing its reverse link", road.name));
            }
        }
    }
    for road in &graph.roads {
        if !graph.adj[road.start.0].iter().any(|l| l.road == road.id) {
            return invalid(format!("road `{}` is not linked", road.name));
        }
    }

    let mut by_name = HashMap::with_capacity(n);
    for node in &graph.nodes {
        if by_name.insert(node.name.clone(), node.id).is_some() {
            return Err(BuildError::DuplicateNode(node.name.clone()));
        }
    }
    graph.by_name = by_name;
    Ok(())
}
