//! District decomposition by rightmost-turn face tracing.
//!
//! Each road is walked once in each direction. A walk always leaves a node by
//! the sharpest clockwise turn, so the face it outlines lies on the walker's
//! right; the walk ends when it comes back to its seed edge.

use crate::error::BuildError;
use crate::geometry::clockwise_turn;
use crate::graph::{NodeId, RoadGraph};
use crate::road::{are_converging, are_diverging, Road, RoadId};

use super::types::{District, DistrictId, DistrictSideIndex, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// A road walked in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DirectedEdge {
    road: RoadId,
    dir: Direction,
}

impl DirectedEdge {
    /// Leaving `from` along `road`.
    fn leaving(road: &Road, from: NodeId) -> Self {
        let dir = if road.start == from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Self { road: road.id, dir }
    }

    /// (tail, head) of the walk.
    fn endpoints(self, road: &Road) -> (NodeId, NodeId) {
        match self.dir {
            Direction::Forward => (road.start, road.end),
            Direction::Backward => (road.end, road.start),
        }
    }
}

/// Trace every directed edge of `graph` into districts.
pub(crate) fn decompose(
    graph: &RoadGraph,
) -> Result<(Vec<District>, DistrictSideIndex), BuildError> {
    let mut tracer = Tracer::new(graph);
    for road in &graph.roads {
        for dir in [Direction::Forward, Direction::Backward] {
            let seed = DirectedEdge { road: road.id, dir };
            if !tracer.is_traced(seed) {
                tracer.trace(seed)?;
            }
        }
    }
    tracer.check_coverage()?;
    tracing::debug!(
        roads = graph.roads.len(),
        districts = tracer.districts.len(),
        "districts traced"
    );
    Ok((tracer.districts, tracer.sides))
}

struct Tracer<'a> {
    g: &'a RoadGraph,
    forward: Vec<bool>,
    backward: Vec<bool>,
    districts: Vec<District>,
    sides: DistrictSideIndex,
}

impl<'a> Tracer<'a> {
    fn new(g: &'a RoadGraph) -> Self {
        let n = g.roads.len();
        Self {
            g,
            forward: vec![false; n],
            backward: vec![false; n],
            districts: Vec::new(),
            sides: DistrictSideIndex::new(n),
        }
    }

    fn is_traced(&self, e: DirectedEdge) -> bool {
        match e.dir {
            Direction::Forward => self.forward[e.road.0],
            Direction::Backward => self.backward[e.road.0],
        }
    }

    fn mark(&mut self, e: DirectedEdge) {
        match e.dir {
            Direction::Forward => self.forward[e.road.0] = true,
            Direction::Backward => self.backward[e.road.0] = true,
        }
    }

    fn trace(&mut self, seed: DirectedEdge) -> Result<(), BuildError> {
        let g = self.g;
        let mut nodes = Vec::new();
        let mut walked: Vec<RoadId> = Vec::new();
        let mut cur = seed;
        loop {
            let (a, b) = cur.endpoints(&g.roads[cur.road.0]);
            nodes.push(a);
            walked.push(cur.road);
            self.mark(cur);
            let next = self.rightmost_turn(cur, b)?;
            if self.is_traced(next) {
                if next != seed {
                    return Err(BuildError::OpenTrace {
                        road: g.roads[next.road.0].name.clone(),
                    });
                }
                nodes.push(b);
                break;
            }
            cur = next;
        }

        let id = DistrictId(self.districts.len());
        let steps = self.assign_sides(seed, &walked);
        for &(road, side) in &steps {
            let prev = self.sides.set(road, side, id);
            debug_assert!(prev.is_none(), "side slot filled twice");
        }
        let mut roads = Vec::with_capacity(walked.len());
        for r in walked {
            if !roads.contains(&r) {
                roads.push(r);
            }
        }
        tracing::trace!(district = id.0, steps = steps.len(), "district closed");
        self.districts.push(District {
            id,
            nodes,
            steps,
            roads,
        });
        Ok(())
    }

    /// Among roads at `b` other than the arriving one, the sharpest clockwise
    /// turn. Ties keep the first candidate in adjacency order.
    fn rightmost_turn(&self, arriving: DirectedEdge, b: NodeId) -> Result<DirectedEdge, BuildError> {
        let in_road = &self.g.roads[arriving.road.0];
        let heading = in_road
            .shape
            .heading(arriving.dir == Direction::Backward);
        let mut best: Option<(f64, DirectedEdge)> = None;
        for link in self.g.links(b) {
            if link.road == arriving.road {
                continue;
            }
            let out_road = &self.g.roads[link.road.0];
            let out = DirectedEdge::leaving(out_road, b);
            let turn = clockwise_turn(
                heading,
                out_road.shape.heading(out.dir == Direction::Backward),
            );
            if best.map_or(true, |(t, _)| turn > t) {
                best = Some((turn, out));
            }
        }
        best.map(|(_, e)| e).ok_or_else(|| BuildError::DeadEnd {
            node: self.g.nodes[b.0].name.clone(),
        })
    }

    /// Seed side from the seed direction; afterwards the side flips whenever
    /// two consecutive roads converge or diverge and carries over otherwise.
    fn assign_sides(&self, seed: DirectedEdge, walked: &[RoadId]) -> Vec<(RoadId, Side)> {
        let mut side = match seed.dir {
            Direction::Forward => Side::Right,
            Direction::Backward => Side::Left,
        };
        let mut steps = Vec::with_capacity(walked.len());
        let mut prev: Option<&Road> = None;
        for &r in walked {
            let road = &self.g.roads[r.0];
            if let Some(p) = prev {
                if are_converging(p, road) || are_diverging(p, road) {
                    side = side.opposite();
                }
            }
            steps.push((r, side));
            prev = Some(road);
        }
        steps
    }

    fn check_coverage(&self) -> Result<(), BuildError> {
        for road in &self.g.roads {
            for side in Side::BOTH {
                if self.sides.get(road.id, side).is_none() {
                    return Err(BuildError::Uncovered {
                        road: road.name.clone(),
                        side,
                    });
                }
            }
        }
        Ok(())
    }
}
