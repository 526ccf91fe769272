use super::*;
use crate::foundation::core::{Coord, GroupId};
use crate::interaction::hover::{HoverState, focus_nodes};
use crate::interaction::selection::SelectionSet;
use crate::render::scene::{Highlight, NodeSprite};
use crate::scene::model::{GenMethod, Node, Provenance};

fn node(id: u64, parents: &[u64], children: &[u64]) -> Node {
    Node {
        id: NodeId(id),
        group: GroupId::new("g"),
        coord: Coord::Planar {
            x: id as f64,
            y: 0.0,
        },
        parents: parents.iter().copied().map(NodeId).collect(),
        children: children.iter().copied().map(NodeId).collect(),
        method: GenMethod::Batch,
        visible: true,
        payload: vec![],
        provenance: Provenance::default(),
    }
}

fn geometry_for(ids: &[u64]) -> SceneGeometry {
    let sprites = ids
        .iter()
        .enumerate()
        .map(|(z, &id)| {
            let mut sprite = NodeSprite {
                id: NodeId(id),
                coord: Coord::Planar {
                    x: id as f64,
                    y: 0.0,
                },
                center: Point::ZERO,
                half: 20.0,
                hit: kurbo::Rect::ZERO,
                z,
                method: GenMethod::Batch,
                highlight: Highlight::default(),
            };
            sprite.place(Point::new(100.0 * id as f64, 300.0));
            sprite
        })
        .collect();
    let mut geometry = SceneGeometry::default();
    geometry.replace(sprites);
    geometry
}

fn scene_for(nodes: Vec<Node>) -> SceneModel {
    let mut scene = SceneModel::new();
    scene.set_nodes(nodes).unwrap();
    scene
}

#[test]
fn bow_control_point_is_perpendicular_midpoint_offset() {
    let curve = bow_curve(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(curve.p0, Point::new(0.0, 0.0));
    assert_eq!(curve.p2, Point::new(10.0, 0.0));
    // Midpoint (5, 0), displaced by 0.2 of the rotated delta (0, 10).
    assert_eq!(curve.p1, Point::new(5.0, 2.0));
}

#[test]
fn hovered_node_draws_one_curve_per_parent() {
    let scene = scene_for(vec![
        node(1, &[], &[3]),
        node(2, &[], &[3]),
        node(3, &[1, 2], &[]),
    ]);
    let geometry = geometry_for(&[1, 2, 3]);
    let mut hover = HoverState::new();
    hover.set_node(Some(NodeId(3)));

    let focus = focus_nodes(&SelectionSet::new(), &hover);
    let overlay = build_overlay(&focus, &scene, &geometry);

    assert_eq!(overlay.edges.len(), 2);
    assert!(overlay.edges.iter().all(|e| e.role == EdgeRole::Parent));
    let highlighted: Vec<_> = overlay.outlines.iter().map(|&(id, _)| id).collect();
    assert_eq!(highlighted, vec![NodeId(1), NodeId(2)]);
}

#[test]
fn selection_produces_the_same_overlay_as_hover() {
    let scene = scene_for(vec![node(1, &[], &[2]), node(2, &[1], &[])]);
    let geometry = geometry_for(&[1, 2]);

    let mut hover = HoverState::new();
    hover.set_node(Some(NodeId(2)));
    let hovered = build_overlay(&focus_nodes(&SelectionSet::new(), &hover), &scene, &geometry);

    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(2));
    let selected = build_overlay(
        &focus_nodes(&selection, &HoverState::new()),
        &scene,
        &geometry,
    );

    assert_eq!(hovered.edges.len(), selected.edges.len());
    assert_eq!(hovered.edges[0].from, selected.edges[0].from);
    assert_eq!(hovered.edges[0].to, selected.edges[0].to);
}

#[test]
fn selection_suppresses_hover_lineage() {
    let scene = scene_for(vec![
        node(1, &[], &[2]),
        node(2, &[1], &[]),
        node(5, &[], &[6]),
        node(6, &[5], &[]),
    ]);
    let geometry = geometry_for(&[1, 2, 5, 6]);

    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(2));
    let mut hover = HoverState::new();
    hover.set_node(Some(NodeId(6)));

    let overlay = build_overlay(&focus_nodes(&selection, &hover), &scene, &geometry);
    // Only the selected node's lineage appears; hovering node 6 adds nothing.
    assert_eq!(overlay.edges.len(), 1);
    assert_eq!(overlay.edges[0].from, NodeId(1));
    assert_eq!(overlay.edges[0].to, NodeId(2));
}

#[test]
fn shared_edges_merge_additively_without_dedup() {
    let scene = scene_for(vec![node(1, &[], &[2]), node(2, &[1], &[])]);
    let geometry = geometry_for(&[1, 2]);
    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(1));
    selection.toggle(NodeId(2));

    let overlay = build_overlay(
        &focus_nodes(&selection, &HoverState::new()),
        &scene,
        &geometry,
    );
    // Node 1 contributes its child edge, node 2 its parent edge; both span
    // the same pair and both are kept.
    assert_eq!(overlay.edges.len(), 2);
    assert_eq!(overlay.edges[0].role, EdgeRole::Child);
    assert_eq!(overlay.edges[1].role, EdgeRole::Parent);
}

#[test]
fn dangling_parent_reference_draws_nothing() {
    let scene = scene_for(vec![node(3, &[99], &[])]);
    let geometry = geometry_for(&[3]);
    let overlay = build_overlay(&[NodeId(3)], &scene, &geometry);
    assert!(overlay.edges.is_empty());
    assert!(overlay.outlines.is_empty());
}

#[test]
fn parent_and_child_styles_differ() {
    let parent = EdgeRole::Parent.style();
    let child = EdgeRole::Child.style();
    assert!(parent.width > child.width);
    assert_ne!(parent.color, child.color);
    assert_eq!(parent.dash, [8.0, 4.0]);
    assert_eq!(child.dash, [8.0, 4.0]);
}
