use super::*;
use crate::error::BuildError;
use nalgebra::vector;

fn triangle() -> Vec<NodeSpec> {
    vec![
        NodeSpec::new("a", vector![0.0, 0.0, 0.0]).connect("b"),
        NodeSpec::new("b", vector![1.0, 0.0, 0.0]).connect("c"),
        NodeSpec::new("c", vector![0.0, 1.0, 0.0]).connect("a"),
    ]
}

#[test]
fn adjacency_is_symmetric_and_shares_roads() {
    let g = build_graph(&triangle()).unwrap();
    assert_eq!(g.nodes.len(), 3);
    assert_eq!(g.roads.len(), 3);
    for a in &g.nodes {
        for link in g.links(a.id) {
            assert_eq!(g.road_between(link.to, a.id), Some(link.road));
            let road = g.road(link.road).unwrap();
            assert!(road.has_node(a.id) && road.has_node(link.to));
        }
    }
}

#[test]
fn road_direction_and_name_follow_forward_connection() {
    let g = build_graph(&triangle()).unwrap();
    let a = g.node_id("a").unwrap();
    let b = g.node_id("b").unwrap();
    let r = g.road(g.road_between(b, a).unwrap()).unwrap();
    assert_eq!((r.start, r.end), (a, b));
    assert_eq!(r.name, "a-b");
}

#[test]
fn reverse_duplicate_connection_is_one_road() {
    let mut specs = triangle();
    specs[1] = specs[1].clone().connect("a");
    let g = build_graph(&specs).unwrap();
    assert_eq!(g.roads.len(), 3);
    assert_eq!(g.degree(g.node_id("a").unwrap()), 2);
}

#[test]
fn unknown_connection_is_rejected() {
    let mut specs = triangle();
    specs[2] = specs[2].clone().connect("nowhere");
    let err = build_graph(&specs).unwrap_err();
    assert_eq!(
        err,
        BuildError::UnknownConnection {
            from: "c".into(),
            to: "nowhere".into()
        }
    );
}

#[test]
fn duplicate_names_and_self_loops_are_rejected() {
    let mut specs = triangle();
    specs.push(NodeSpec::new("a", vector![5.0, 5.0, 0.0]));
    assert_eq!(
        build_graph(&specs).unwrap_err(),
        BuildError::DuplicateNode("a".into())
    );

    let looped = vec![NodeSpec::new("x", vector![0.0, 0.0, 0.0]).connect("x")];
    assert_eq!(
        build_graph(&looped).unwrap_err(),
        BuildError::SelfConnection("x".into())
    );
}

#[test]
fn coincident_nodes_make_a_degenerate_road() {
    let specs = vec![
        NodeSpec::new("p", vector![1.0, 1.0, 0.0]).connect("q"),
        NodeSpec::new("q", vector![1.0, 1.0, 0.0]),
    ];
    assert_eq!(
        build_graph(&specs).unwrap_err(),
        BuildError::DegenerateRoad("p-q".into())
    );
}

#[test]
fn unknown_ids_have_no_links() {
    let g = build_graph(&triangle()).unwrap();
    assert!(g.links(NodeId(99)).is_empty());
    assert!(g.node(NodeId(99)).is_none());
}
