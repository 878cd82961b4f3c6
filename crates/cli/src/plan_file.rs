//! JSON plan files for the runner, plus the summaries it prints.
//!
//! Format: `{"nodes": [{"name": "a", "position": [x, y, z], "connections": ["b"]}]}`.
//! `connections` are forward connections and may be omitted.

use anyhow::{Context, Result};
use districts::api::{NodeSpec, Plan, Route, Side};
use districts::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    pub nodes: Vec<NodeRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub connections: Vec<String>,
}

impl PlanFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_specs(specs: &[NodeSpec]) -> Self {
        let nodes = specs
            .iter()
            .map(|s| NodeRecord {
                name: s.name.clone(),
                position: [s.position.x, s.position.y, s.position.z],
                connections: s.connections.clone(),
            })
            .collect();
        Self { nodes }
    }

    pub fn to_specs(&self) -> Vec<NodeSpec> {
        self.nodes
            .iter()
            .map(|n| NodeSpec {
                name: n.name.clone(),
                position: Vec3::from(n.position),
                connections: n.connections.clone(),
            })
            .collect()
    }

    pub fn build(&self) -> Result<Plan> {
        Plan::new(&self.to_specs()).context("building plan")
    }
}

#[derive(Debug, Serialize)]
pub struct DistrictSummary {
    pub id: usize,
    pub bounded: bool,
    pub area: f64,
    pub nodes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RoadSummary {
    pub name: String,
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Serialize)]
pub struct Decomposition {
    pub districts: Vec<DistrictSummary>,
    pub roads: Vec<RoadSummary>,
}

pub fn decomposition(plan: &Plan) -> Result<Decomposition> {
    let districts = plan
        .districts()
        .iter()
        .map(|d| {
            Ok(DistrictSummary {
                id: d.id.0,
                bounded: d.is_bounded(plan.graph()),
                area: d.signed_area(plan.graph()).abs(),
                nodes: node_names(plan, &d.nodes)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let roads = plan
        .roads()
        .iter()
        .map(|r| {
            Ok(RoadSummary {
                name: r.name.clone(),
                left: plan.connected_district(r.id, Side::Left)?.id.0,
                right: plan.connected_district(r.id, Side::Right)?.id.0,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Decomposition { districts, roads })
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub nodes: Vec<String>,
    pub length: f64,
}

pub fn route_summary(plan: &Plan, route: &Route) -> Result<RouteSummary> {
    Ok(RouteSummary {
        nodes: node_names(plan, &route.nodes)?,
        length: route.length(plan.graph()),
    })
}

#[derive(Debug, Serialize)]
pub struct TrackStep {
    pub at: [f64; 3],
    pub road: String,
    pub side: String,
    pub point: [f64; 3],
    pub district: usize,
}

fn node_names(plan: &Plan, ids: &[districts::api::NodeId]) -> Result<Vec<String>> {
    ids.iter()
        .map(|id| Ok(plan.node(*id)?.name.clone()))
        .collect()
}
