//! Roads: directed straight connections between two nodes.
//!
//! A road's direction (start → end) is its "forward" sense; `Side` is always
//! relative to it. Geometry is a closed capability set behind `RoadShape`, so
//! new road kinds extend the enum rather than a trait hierarchy.
//!
//! The relational predicates at the bottom are pure functions of two roads'
//! endpoints and drive side propagation during district tracing.

use nalgebra::Vector3;

use crate::cfg::UP;
use crate::geometry::{closest_point_on_segment, sign_of_point_on_axis};
use crate::graph::NodeId;
use crate::plan::Side;

/// Identifier of a road inside its plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadId(pub usize);

/// Road geometry. Only straight segments exist today.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoadShape {
    Straight {
        start: Vector3<f64>,
        end: Vector3<f64>,
    },
}

impl RoadShape {
    pub fn length(&self) -> f64 {
        match *self {
            RoadShape::Straight { start, end } => (end - start).norm(),
        }
    }

    pub fn closest_point(&self, position: Vector3<f64>) -> Vector3<f64> {
        match *self {
            RoadShape::Straight { start, end } => closest_point_on_segment(position, start, end),
        }
    }

    /// Zero (exactly on the line) maps to `Side::Right`.
    pub fn side_of_point(&self, position: Vector3<f64>) -> Side {
        match *self {
            RoadShape::Straight { start, end } => {
                if sign_of_point_on_axis(position - start, end - start, UP) < 0.0 {
                    Side::Left
                } else {
                    Side::Right
                }
            }
        }
    }

    /// Direction of travel when leaving `start` (forward) or `end` (reversed).
    pub fn heading(&self, reversed: bool) -> Vector3<f64> {
        match *self {
            RoadShape::Straight { start, end } => {
                if reversed {
                    start - end
                } else {
                    end - start
                }
            }
        }
    }

    fn endpoints(&self) -> (Vector3<f64>, Vector3<f64>) {
        match *self {
            RoadShape::Straight { start, end } => (start, end),
        }
    }
}

/// A directed connection `start → end`.
#[derive(Clone, Debug, PartialEq)]
pub struct Road {
    pub id: RoadId,
    pub start: NodeId,
    pub end: NodeId,
    /// `"<start name>-<end name>"`.
    pub name: String,
    pub shape: RoadShape,
}

impl Road {
    #[inline]
    pub fn length(&self) -> f64 {
        self.shape.length()
    }

    #[inline]
    pub fn closest_point(&self, position: Vector3<f64>) -> Vector3<f64> {
        self.shape.closest_point(position)
    }

    #[inline]
    pub fn side_of_point(&self, position: Vector3<f64>) -> Side {
        self.shape.side_of_point(position)
    }

    /// Endpoint nearer to `position`; ties go to `start`.
    pub fn closest_node(&self, position: Vector3<f64>) -> NodeId {
        let (s, e) = self.shape.endpoints();
        if (position - s).norm_squared() <= (position - e).norm_squared() {
            self.start
        } else {
            self.end
        }
    }

    #[inline]
    pub fn has_node(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}

/// Both roads end at the same node.
#[inline]
pub fn are_converging(a: &Road, b: &Road) -> bool {
    a.end == b.end
}

/// Both roads start at the same node.
#[inline]
pub fn are_diverging(a: &Road, b: &Road) -> bool {
    a.start == b.start
}

/// `a` ends where `b` starts.
#[inline]
pub fn are_sequential(a: &Road, b: &Road) -> bool {
    a.end == b.start
}

pub fn are_connected(a: &Road, b: &Road) -> bool {
    are_converging(a, b) || are_diverging(a, b) || are_sequential(a, b) || are_sequential(b, a)
}

/// A node both roads touch, if any. Start of `a` is checked first.
pub fn shared_node(a: &Road, b: &Road) -> Option<NodeId> {
    if b.has_node(a.start) {
        Some(a.start)
    } else if b.has_node(a.end) {
        Some(a.end)
    } else {
        None
    }
}

/// The endpoint of `road` that is not `node`; `None` if `node` is not on it.
pub fn other_node(road: &Road, node: NodeId) -> Option<NodeId> {
    if road.start == node {
        Some(road.end)
    } else if road.end == node {
        Some(road.start)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn road(id: usize, start: usize, end: usize, s: Vector3<f64>, e: Vector3<f64>) -> Road {
        Road {
            id: RoadId(id),
            start: NodeId(start),
            end: NodeId(end),
            name: format!("{start}-{end}"),
            shape: RoadShape::Straight { start: s, end: e },
        }
    }

    fn east() -> Road {
        road(0, 0, 1, vector![0.0, 0.0, 0.0], vector![4.0, 0.0, 0.0])
    }

    #[test]
    fn length_and_closest_point() {
        let r = east();
        assert!((r.length() - 4.0).abs() < 1e-12);
        let p = r.closest_point(vector![1.5, 2.0, 1.0]);
        assert!((p - vector![1.5, 0.0, 0.0]).norm() < 1e-12);
        assert_eq!(r.closest_point(vector![9.0, 1.0, 0.0]), vector![4.0, 0.0, 0.0]);
    }

    #[test]
    fn side_of_point_uses_forward_direction() {
        let r = east();
        assert_eq!(r.side_of_point(vector![2.0, -1.0, 0.0]), Side::Right);
        assert_eq!(r.side_of_point(vector![2.0, 1.0, 0.0]), Side::Left);
        // On the line: tie goes to Right.
        assert_eq!(r.side_of_point(vector![2.0, 0.0, 0.0]), Side::Right);
        let back = road(1, 1, 0, vector![4.0, 0.0, 0.0], vector![0.0, 0.0, 0.0]);
        assert_eq!(back.side_of_point(vector![2.0, 1.0, 0.0]), Side::Right);
    }

    #[test]
    fn closest_node_prefers_start_on_tie() {
        let r = east();
        assert_eq!(r.closest_node(vector![0.5, 0.0, 0.0]), NodeId(0));
        assert_eq!(r.closest_node(vector![3.5, 0.0, 0.0]), NodeId(1));
        assert_eq!(r.closest_node(vector![2.0, 5.0, 0.0]), NodeId(0));
    }

    #[test]
    fn predicates() {
        let z = vector![0.0, 0.0, 0.0];
        let ab = road(0, 0, 1, z, z);
        let bc = road(1, 1, 2, z, z);
        let cb = road(2, 2, 1, z, z);
        let ad = road(3, 0, 3, z, z);
        let cd = road(4, 2, 3, z, z);
        assert!(are_sequential(&ab, &bc));
        assert!(!are_sequential(&bc, &ab));
        assert!(are_converging(&ab, &cb));
        assert!(are_diverging(&ab, &ad));
        assert!(are_connected(&bc, &ab));
        assert!(!are_connected(&ab, &cd));
        assert_eq!(shared_node(&ab, &bc), Some(NodeId(1)));
        assert_eq!(shared_node(&ab, &cd), None);
        assert_eq!(other_node(&ab, NodeId(0)), Some(NodeId(1)));
        assert_eq!(other_node(&ab, NodeId(1)), Some(NodeId(0)));
        assert_eq!(other_node(&ab, NodeId(2)), None);
    }
}
