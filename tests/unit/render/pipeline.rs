use super::*;
use crate::foundation::core::{CanvasSize, Coord, GroupId, NodeId};
use crate::projection::bounds::{AxisExtent, Bounds};
use crate::projection::project::{DrawRegion, PlanarProjector};
use crate::scene::model::{GenMethod, Node, Provenance};
use crate::viewport::transform::ViewTransform;

fn node(id: u64, x: f64, y: f64) -> Node {
    Node {
        id: NodeId(id),
        group: GroupId::new("g"),
        coord: Coord::Planar { x, y },
        parents: vec![],
        children: vec![],
        method: GenMethod::Batch,
        visible: true,
        payload: vec![],
        provenance: Provenance::default(),
    }
}

fn projector(view: ViewTransform) -> PlanarProjector {
    let bounds = Bounds::Planar([
        AxisExtent { min: 0.0, max: 10.0 },
        AxisExtent { min: 0.0, max: 10.0 },
    ]);
    let region = DrawRegion {
        size: CanvasSize {
            width: 1000,
            height: 500,
        },
        margin: 50.0,
    };
    PlanarProjector::new(&bounds, region, view).unwrap()
}

fn scene_of(nodes: Vec<Node>) -> SceneModel {
    let mut scene = SceneModel::new();
    scene.set_nodes(nodes).unwrap();
    scene
}

#[test]
fn structural_pass_skips_hidden_nodes() {
    let mut scene = scene_of(vec![node(1, 1.0, 1.0), node(2, 2.0, 2.0)]);
    scene.hide(NodeId(2));
    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();
    assert_eq!(pipeline.geometry().len(), 1);
    assert!(pipeline.geometry().sprite(NodeId(2)).is_none());
}

#[test]
fn interaction_pass_leaves_geometry_untouched() {
    let mut scene = scene_of(vec![node(1, 1.0, 1.0), node(2, 9.0, 9.0)]);
    scene.patch_node(NodeId(2), |n| n.parents = vec![NodeId(1)]);
    scene.patch_node(NodeId(1), |n| n.children = vec![NodeId(2)]);

    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();
    let centers: Vec<_> = pipeline.geometry().sprites().iter().map(|s| s.center).collect();

    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(2));
    pipeline.interaction_pass(&scene, &selection, &HoverState::new());

    let after: Vec<_> = pipeline.geometry().sprites().iter().map(|s| s.center).collect();
    assert_eq!(centers, after);
    assert_eq!(pipeline.counters().structural, 1);
    assert_eq!(pipeline.counters().interaction, 1);
}

#[test]
fn interaction_pass_sets_highlights_and_overlay() {
    let mut scene = scene_of(vec![node(1, 1.0, 1.0), node(2, 9.0, 9.0)]);
    scene.patch_node(NodeId(2), |n| n.parents = vec![NodeId(1)]);

    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();

    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(2));
    pipeline.interaction_pass(&scene, &selection, &HoverState::new());

    assert_eq!(pipeline.overlay().edges.len(), 1);
    let focus = pipeline.geometry().sprite(NodeId(2)).unwrap();
    assert!(focus.highlight.selected);
    let parent = pipeline.geometry().sprite(NodeId(1)).unwrap();
    assert!(parent.highlight.lineage_parent);
    assert!(!parent.highlight.selected);
}

#[test]
fn selection_clear_resets_highlights() {
    let scene = scene_of(vec![node(1, 1.0, 1.0)]);
    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();

    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(1));
    pipeline.interaction_pass(&scene, &selection, &HoverState::new());
    assert!(pipeline.geometry().sprite(NodeId(1)).unwrap().highlight.selected);

    selection.clear();
    pipeline.interaction_pass(&scene, &selection, &HoverState::new());
    assert!(!pipeline.geometry().sprite(NodeId(1)).unwrap().highlight.selected);
    assert!(pipeline.overlay().edges.is_empty());
}

#[test]
fn group_hover_flags_member_sprites() {
    let scene = scene_of(vec![node(1, 1.0, 1.0), node(2, 2.0, 2.0)]);
    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();

    let mut hover = HoverState::new();
    hover.set_group(Some(GroupId::new("g")));
    pipeline.interaction_pass(&scene, &SelectionSet::new(), &hover);
    assert!(
        pipeline
            .geometry()
            .sprites()
            .iter()
            .all(|s| s.highlight.group_hovered)
    );
}

#[test]
fn reproject_moves_sprites_and_rebends_curves() {
    let mut scene = scene_of(vec![node(1, 1.0, 1.0), node(2, 9.0, 9.0)]);
    scene.patch_node(NodeId(2), |n| n.parents = vec![NodeId(1)]);

    let mut pipeline = RenderPipeline::new();
    pipeline
        .structural_pass(&scene, &projector(ViewTransform::identity()), &VisualSettings::default())
        .unwrap();
    let mut selection = SelectionSet::new();
    selection.toggle(NodeId(2));
    pipeline.interaction_pass(&scene, &selection, &HoverState::new());

    let before = pipeline.geometry().center(NodeId(1)).unwrap();
    let mut view = ViewTransform::identity();
    view.pan(kurbo::Vec2::new(25.0, 0.0));
    pipeline.reproject(&projector(view));

    let after = pipeline.geometry().center(NodeId(1)).unwrap();
    assert_eq!(after.x, before.x + 25.0);
    assert_eq!(pipeline.overlay().edges[0].curve.p0.x, after.x);
    // Still the same structural generation.
    assert_eq!(pipeline.counters().structural, 1);
    assert_eq!(pipeline.counters().reprojections, 1);
    // Highlight attributes survive the move.
    assert!(pipeline.geometry().sprite(NodeId(2)).unwrap().highlight.selected);
}
