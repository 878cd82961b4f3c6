//! Position tracker: closest road, side, point and district of a moving point.
//!
//! A tracker keeps the last answer as a hint. A move first rescans only the
//! border of the cached district; a district change is accepted when the road
//! that caused it is also the closest on the new district's border. Anything
//! else (a jump across several districts) falls back to a full scan.
//!
//! The tracker borrows its plan, so it cannot outlive it. `move_to` takes
//! `&mut self`; one tracker per moving entity.

use nalgebra::Vector3;

use crate::error::LookupError;
use crate::plan::{DistrictId, Plan, Side};
use crate::road::{Road, RoadId};

/// Snapshot of the tracked answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Closest {
    pub road: RoadId,
    pub side: Side,
    pub point: Vector3<f64>,
    pub district: DistrictId,
}

#[derive(Clone, Debug)]
pub struct Tracker<'p> {
    plan: &'p Plan,
    position: Vector3<f64>,
    closest: Closest,
    full_scans: u64,
}

impl<'p> Tracker<'p> {
    /// Full scan over every road of `plan`.
    pub fn new(plan: &'p Plan, position: Vector3<f64>) -> Result<Self, LookupError> {
        let closest = full_scan(plan, position)?;
        Ok(Self {
            plan,
            position,
            closest,
            full_scans: 1,
        })
    }

    #[inline]
    pub fn plan(&self) -> &'p Plan {
        self.plan
    }

    #[inline]
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    #[inline]
    pub fn closest(&self) -> Closest {
        self.closest
    }

    /// Number of full scans so far, including the one in `new`.
    #[inline]
    pub fn full_scans(&self) -> u64 {
        self.full_scans
    }

    /// Move to `position` and return the updated answer.
    pub fn move_to(&mut self, position: Vector3<f64>) -> Result<Closest, LookupError> {
        let plan = self.plan;
        self.position = position;

        let cached = plan.district(self.closest.district)?;
        let (road, point, d2) =
            nearest(border(plan, &cached.roads), position).ok_or(LookupError::EmptyPlan)?;
        let next = classify(plan, road, point, position)?;
        if next.district == self.closest.district {
            self.closest = next;
            return Ok(next);
        }

        // Adopt the neighbour, then check the hint still holds there.
        self.closest = next;
        let neighbour = plan.district(next.district)?;
        match nearest(border(plan, &neighbour.roads), position) {
            Some((_, _, d2n)) if d2n >= d2 => {
                tracing::trace!(
                    from = cached.id.0,
                    to = next.district.0,
                    "crossed into neighbour district"
                );
                Ok(next)
            }
            _ => {
                tracing::trace!(district = cached.id.0, "tracker hint lost; full scan");
                self.full_scans += 1;
                self.closest = full_scan(plan, position)?;
                Ok(self.closest)
            }
        }
    }
}

fn border<'a>(plan: &'a Plan, roads: &'a [RoadId]) -> impl Iterator<Item = &'a Road> + 'a {
    roads.iter().filter_map(move |r| plan.road(*r).ok())
}

/// First road with the smallest squared distance to `position`.
fn nearest<'a>(
    roads: impl Iterator<Item = &'a Road>,
    position: Vector3<f64>,
) -> Option<(RoadId, Vector3<f64>, f64)> {
    let mut best: Option<(RoadId, Vector3<f64>, f64)> = None;
    for road in roads {
        let p = road.closest_point(position);
        let d2 = (position - p).norm_squared();
        if best.map_or(true, |(_, _, b)| d2 < b) {
            best = Some((road.id, p, d2));
        }
    }
    best
}

fn classify(
    plan: &Plan,
    road: RoadId,
    point: Vector3<f64>,
    position: Vector3<f64>,
) -> Result<Closest, LookupError> {
    let side = plan.road(road)?.side_of_point(position);
    let district = plan.connected_district(road, side)?.id;
    Ok(Closest {
        road,
        side,
        point,
        district,
    })
}

fn full_scan(plan: &Plan, position: Vector3<f64>) -> Result<Closest, LookupError> {
    let (road, point, _) = nearest(plan.roads().iter(), position).ok_or(LookupError::EmptyPlan)?;
    classify(plan, road, point, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::{grid_specs, GridCfg};
    use crate::graph::NodeSpec;
    use nalgebra::vector;

    /// ```text
    /// d---e---f
    /// |   |   |
    /// a---b---c
    /// ```
    fn domino() -> Plan {
        Plan::new(&[
            NodeSpec::new("a", vector![0.0, 0.0, 0.0]).connect("b").connect("d"),
            NodeSpec::new("b", vector![1.0, 0.0, 0.0]).connect("c").connect("e"),
            NodeSpec::new("c", vector![2.0, 0.0, 0.0]).connect("f"),
            NodeSpec::new("d", vector![0.0, 1.0, 0.0]).connect("e"),
            NodeSpec::new("e", vector![1.0, 1.0, 0.0]).connect("f"),
            NodeSpec::new("f", vector![2.0, 1.0, 0.0]),
        ])
        .unwrap()
    }

    fn district_of(plan: &Plan, a: &str, b: &str, side: Side) -> DistrictId {
        let (a, b) = (plan.node_id(a).unwrap(), plan.node_id(b).unwrap());
        let road = plan.connecting_road(a, b).unwrap();
        plan.connected_district(road.id, side).unwrap().id
    }

    #[test]
    fn new_picks_closest_road_and_district() {
        let plan = domino();
        let t = Tracker::new(&plan, vector![0.5, 0.2, 0.0]).unwrap();
        let c = t.closest();
        assert_eq!(plan.road(c.road).unwrap().name, "a-b");
        assert!((c.point - vector![0.5, 0.0, 0.0]).norm() < 1e-12);
        // North of the eastbound road a-b.
        assert_eq!(c.side, Side::Left);
        assert!(plan.district(c.district).unwrap().is_bounded(plan.graph()));
    }

    #[test]
    fn empty_plan_cannot_be_tracked() {
        let plan = Plan::new(&[NodeSpec::new("lonely", vector![0.0, 0.0, 0.0])]).unwrap();
        assert_eq!(
            Tracker::new(&plan, vector![1.0, 1.0, 0.0]).unwrap_err(),
            LookupError::EmptyPlan
        );
    }

    #[test]
    fn moving_inside_a_district_keeps_it() {
        let plan = domino();
        let mut t = Tracker::new(&plan, vector![0.2, 0.2, 0.0]).unwrap();
        let start = t.closest().district;
        for k in 0..=30 {
            let s = k as f64 / 30.0;
            let p = vector![0.2 + 0.6 * s, 0.2 + 0.6 * (1.0 - s) * s * 4.0 * 0.5, 0.0];
            let c = t.move_to(p).unwrap();
            assert_eq!(c.district, start);
        }
        assert_eq!(t.full_scans(), 1);
    }

    #[test]
    fn crossing_a_shared_road_switches_without_full_scan() {
        let plan = domino();
        let left = district_of(&plan, "b", "e", Side::Left);
        let right = district_of(&plan, "b", "e", Side::Right);
        let mut t = Tracker::new(&plan, vector![0.5, 0.5, 0.0]).unwrap();
        assert_eq!(t.closest().district, left);
        let c = t.move_to(vector![1.1, 0.5, 0.0]).unwrap();
        assert_eq!(c.district, right);
        assert_eq!(plan.road(c.road).unwrap().name, "b-e");
        assert_eq!(t.full_scans(), 1);
    }

    #[test]
    fn jump_falls_back_to_full_scan() {
        let plan = domino();
        let mut t = Tracker::new(&plan, vector![0.5, 0.5, 0.0]).unwrap();
        let far = vector![5.0, 5.0, 0.0];
        let c = t.move_to(far).unwrap();
        let fresh = Tracker::new(&plan, far).unwrap().closest();
        assert_eq!(c, fresh);
        assert_eq!(t.full_scans(), 2);
        assert!(!plan.district(c.district).unwrap().is_bounded(plan.graph()));
    }

    #[test]
    fn walk_across_grid_matches_fresh_scans() {
        let plan = Plan::new(&grid_specs(GridCfg {
            cols: 5,
            rows: 5,
            jitter: 0.0,
            ..GridCfg::default()
        }))
        .unwrap();
        // Cell centres along the diagonal; spacing 10.
        let mut t = Tracker::new(&plan, vector![5.0, 5.0, 0.0]).unwrap();
        for k in 0..40 {
            let s = 5.0 + k as f64;
            let p = vector![s, 5.0 + 0.5 * k as f64, 0.0];
            let c = t.move_to(p).unwrap();
            let fresh = Tracker::new(&plan, p).unwrap().closest();
            let dc = (c.point - p).norm();
            let df = (fresh.point - p).norm();
            assert!((dc - df).abs() < 1e-9, "step {k}: {dc} vs {df}");
        }
    }
}
