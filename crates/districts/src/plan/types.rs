//! Data types for districts, the side index and the plan.

use crate::graph::{NodeId, RoadGraph};
use crate::road::RoadId;

/// Side of a road relative to its forward direction, seen from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Identifier of a district inside its plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistrictId(pub usize);

/// One face of the planar subdivision: a closed walk along roads.
///
/// Invariants:
/// - `nodes.first() == nodes.last()`; consecutive nodes are joined by a road.
/// - `steps[k]` is the road walked from `nodes[k]` to `nodes[k + 1]` and the
///   side of that road this district lies on.
/// - `roads` lists each border road once, in walk order.
#[derive(Clone, Debug, PartialEq)]
pub struct District {
    pub id: DistrictId,
    pub nodes: Vec<NodeId>,
    pub steps: Vec<(RoadId, Side)>,
    pub roads: Vec<RoadId>,
}

impl District {
    /// Number of distinct steps around the border (closing node not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn borders(&self, road: RoadId) -> bool {
        self.roads.contains(&road)
    }

    /// Shoelace area of the walk projected on the XY plane.
    ///
    /// Bounded districts walk clockwise and come out negative; the exterior
    /// district of each connected component comes out positive.
    ///
    /// Pre: `graph` is the graph this district was traced on.
    pub fn signed_area(&self, graph: &RoadGraph) -> f64 {
        self.nodes
            .windows(2)
            .map(|w| {
                let (p, q) = (graph.nodes[w[0].0].position, graph.nodes[w[1].0].position);
                p.x * q.y - q.x * p.y
            })
            .sum::<f64>()
            * 0.5
    }

    #[inline]
    pub fn is_bounded(&self, graph: &RoadGraph) -> bool {
        self.signed_area(graph) < 0.0
    }
}

/// `road → side → district`.
#[derive(Clone, Debug, Default)]
pub struct DistrictSideIndex {
    slots: Vec<[Option<DistrictId>; 2]>,
}

impl DistrictSideIndex {
    pub(crate) fn new(roads: usize) -> Self {
        Self {
            slots: vec![[None; 2]; roads],
        }
    }

    #[inline]
    pub fn get(&self, road: RoadId, side: Side) -> Option<DistrictId> {
        self.slots.get(road.0).and_then(|s| s[side.slot()])
    }

    /// Returns the previous occupant, if any.
    pub(crate) fn set(&mut self, road: RoadId, side: Side, district: DistrictId) -> Option<DistrictId> {
        self.slots[road.0][side.slot()].replace(district)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Road graph + districts + side index. Immutable once built.
#[derive(Clone, Debug)]
pub struct Plan {
    pub(crate) graph: RoadGraph,
    pub(crate) districts: Vec<District>,
    pub(crate) sides: DistrictSideIndex,
}
