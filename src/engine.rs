use crate::assets::thumbs::ThumbnailStore;
use crate::bridge::axis::{AxisChange, PendingAxisChange};
use crate::bridge::snapshot::{AxisLabels, PushMessage, StateSnapshot, convert_state};
use crate::foundation::core::{CanvasSize, Coord, GroupId, NodeId, Point, SceneDim, Vec2};
use crate::foundation::error::{KindredError, KindredResult};
use crate::interaction::hover::HoverState;
use crate::interaction::selection::{
    AnchorDirective, SelectionSet, SelectionTransition, anchor_for_transition,
};
use crate::projection::bounds::{Bounds, BoundsConfig, StableBounds};
use crate::projection::project::{DrawRegion, PlanarProjector, Projector, SpatialProjector};
use crate::render::backend::{FrameRgba, PaintBackend};
use crate::render::pipeline::{PassCounters, RenderPipeline, VisualSettings};
use crate::render::plan::build_plan;
use crate::scene::model::{CanvasStats, SceneModel};
use crate::scene::store::{ChangeHub, Signal};
use crate::viewport::camera::{OrbitCamera, SnapAnimation, SnapPlane};
use crate::viewport::transform::ViewTransform;

/// Engine-level configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Drawable surface size.
    pub canvas: CanvasSize,
    /// Pixel margin reserved for axis labels on every edge.
    pub label_margin: f64,
    /// Bounds padding policy.
    pub bounds: BoundsConfig,
    /// Node drawing settings.
    pub visual: VisualSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            label_margin: 48.0,
            bounds: BoundsConfig::default(),
            visual: VisualSettings::default(),
        }
    }
}

/// The user-driven viewpoint, planar or spatial for the session lifetime.
#[derive(Clone, Debug)]
pub enum ViewState {
    /// 2D pan/zoom.
    Planar {
        /// The pan/zoom transform.
        transform: ViewTransform,
    },
    /// 3D orbit with an optional in-flight snap animation.
    Spatial {
        /// The orbit camera.
        camera: OrbitCamera,
        /// In-flight snap-to-plane animation, if any.
        snap: Option<SnapAnimation>,
    },
}

/// What a push-channel message amounted to.
#[derive(Clone, Debug, PartialEq)]
pub enum PushEvent {
    /// A state update was applied; a structural pass is pending.
    Applied,
    /// Authoritative progress report in percent.
    Progress(f64),
    /// Non-fatal collaborator failure; engine state is unchanged.
    Failed(String),
}

/// The spatial genealogy canvas engine.
///
/// Owns the scene, selection, hover, bounds, viewpoint, and retained render
/// state, and routes every mutation to the correct dirty line: collaborator
/// snapshots, visual settings, and axis changes raise the structural
/// signal; clicks and hovers raise only the interaction signal. Viewport
/// moves bypass both and reproject the retained geometry in place.
pub struct CanvasEngine {
    config: EngineConfig,
    scene: SceneModel,
    selection: SelectionSet,
    hover: HoverState,
    bounds: StableBounds,
    view: ViewState,
    pipeline: RenderPipeline,
    thumbs: ThumbnailStore,
    hub: ChangeHub,
    axis_labels: AxisLabels,
}

impl CanvasEngine {
    /// Engine hosting a 2D scene.
    pub fn new_planar(config: EngineConfig) -> Self {
        Self::new(
            config,
            ViewState::Planar {
                transform: ViewTransform::identity(),
            },
        )
    }

    /// Engine hosting a 3D scene.
    pub fn new_spatial(config: EngineConfig) -> Self {
        Self::new(
            config,
            ViewState::Spatial {
                camera: OrbitCamera::default(),
                snap: None,
            },
        )
    }

    fn new(config: EngineConfig, view: ViewState) -> Self {
        Self {
            config,
            scene: SceneModel::new(),
            selection: SelectionSet::new(),
            hover: HoverState::new(),
            bounds: StableBounds::new(),
            view,
            pipeline: RenderPipeline::new(),
            thumbs: ThumbnailStore::new(),
            hub: ChangeHub::new(),
            axis_labels: AxisLabels::default(),
        }
    }

    /// Coordinate arity this engine hosts, fixed at construction.
    pub fn dim(&self) -> SceneDim {
        match self.view {
            ViewState::Planar { .. } => SceneDim::Planar,
            ViewState::Spatial { .. } => SceneDim::Spatial,
        }
    }

    /// Apply a full collaborator state snapshot.
    ///
    /// All-or-nothing: conversion and arity validation run before any state
    /// is touched, so a rejected snapshot leaves the engine unchanged and
    /// the user free to retry.
    #[tracing::instrument(skip_all, fields(nodes = snapshot.nodes.len()))]
    pub fn apply_snapshot(&mut self, snapshot: StateSnapshot) -> KindredResult<()> {
        let (nodes, groups) = convert_state(snapshot.nodes, snapshot.groups)?;
        let dim = self.dim();
        if let Some(node) = nodes.iter().find(|n| n.coord.dim() != dim) {
            return Err(KindredError::snapshot(format!(
                "node {} does not match the canvas arity",
                node.id
            )));
        }

        self.scene.set_nodes(nodes)?;
        self.scene.set_groups(groups);
        self.thumbs.prepare(self.scene.nodes());
        self.axis_labels = snapshot.axis_labels;

        let scene = &self.scene;
        self.selection
            .retain(|id| scene.node(id).is_some_and(|n| n.visible));
        self.hover
            .retain(|id| scene.node(id).is_some_and(|n| n.visible));

        self.hub.mark(Signal::Structural);
        Ok(())
    }

    /// Apply one push-channel message. Failure messages are surfaced, not
    /// raised: the collaborator reporting an error is a normal outcome.
    pub fn apply_push(&mut self, message: PushMessage) -> KindredResult<PushEvent> {
        match message {
            PushMessage::StateUpdate { data } => {
                let snapshot = StateSnapshot {
                    nodes: data.nodes,
                    groups: data.groups,
                    axis_labels: self.axis_labels.clone(),
                };
                self.apply_snapshot(snapshot)?;
                Ok(PushEvent::Applied)
            }
            PushMessage::Progress { progress } => {
                Ok(PushEvent::Progress(progress.clamp(0.0, 100.0)))
            }
            PushMessage::Error { error } => Ok(PushEvent::Failed(error)),
        }
    }

    /// Topmost node under a screen point, if any.
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.pipeline.geometry().hit_test(p)
    }

    /// Toggle-select a node and report what the floating panel should do
    /// with its anchor.
    pub fn click_node(&mut self, id: NodeId) -> KindredResult<AnchorDirective> {
        let rect = self
            .pipeline
            .geometry()
            .screen_rect(id)
            .ok_or_else(|| KindredError::validation(format!("node {id} is not on screen")))?;
        let transition = self.selection.toggle(id);
        self.hub.mark(Signal::Interaction);
        Ok(anchor_for_transition(transition, rect))
    }

    /// Clear the selection (background click).
    pub fn click_background(&mut self) -> AnchorDirective {
        if self.selection.clear() {
            self.hub.mark(Signal::Interaction);
        }
        AnchorDirective::Hide
    }

    /// Update the hovered node.
    pub fn hover_node(&mut self, node: Option<NodeId>) {
        if self.hover.set_node(node) {
            self.hub.mark(Signal::Interaction);
        }
    }

    /// Update the hovered history group.
    pub fn hover_group(&mut self, group: Option<GroupId>) {
        if self.hover.set_group(group) {
            self.hub.mark(Signal::Interaction);
        }
    }

    /// Soft-delete a node, dropping it from the selection if present.
    /// Returns the panel directive when the selection changed.
    pub fn hide(&mut self, id: NodeId) -> Option<AnchorDirective> {
        let rect = self.pipeline.geometry().screen_rect(id);
        if !self.scene.hide(id) {
            return None;
        }
        self.hub.mark(Signal::Structural);

        if !self.selection.remove(id) {
            return None;
        }
        self.hub.mark(Signal::Interaction);
        let emptied = self.selection.is_empty();
        Some(match (emptied, rect) {
            (true, _) => AnchorDirective::Hide,
            (false, Some(rect)) => {
                anchor_for_transition(SelectionTransition::Removed { emptied: false }, rect)
            }
            (false, None) => AnchorDirective::Keep,
        })
    }

    /// Show or hide a history group with all of its members.
    pub fn set_group_visible(&mut self, id: &GroupId, visible: bool) -> bool {
        if !self.scene.set_group_visible(id, visible) {
            return false;
        }
        self.hub.mark(Signal::Structural);
        let scene = &self.scene;
        if self
            .selection
            .retain(|id| scene.node(id).is_some_and(|n| n.visible))
        {
            self.hub.mark(Signal::Interaction);
        }
        true
    }

    /// Replace the node drawing settings.
    pub fn set_visual_settings(&mut self, visual: VisualSettings) {
        self.config.visual = visual;
        self.hub.mark(Signal::Structural);
    }

    /// First step of an axis change: validate labels and invalidate bounds,
    /// returning the request to send to the projection collaborator.
    pub fn begin_axis_change(&mut self, labels: &AxisLabels) -> KindredResult<PendingAxisChange> {
        AxisChange::begin(labels, self.dim(), &mut self.bounds)
    }

    /// Second step of an axis change: apply the re-pulled snapshot carrying
    /// recomputed coordinates. Consuming the pending token enforces that
    /// bounds were invalidated before the request went out.
    pub fn commit_axis_change(
        &mut self,
        pending: PendingAxisChange,
        snapshot: StateSnapshot,
    ) -> KindredResult<()> {
        drop(pending);
        self.apply_snapshot(snapshot)
    }

    /// Pan the planar viewport by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        if let ViewState::Planar { transform } = &mut self.view {
            transform.pan(delta);
            self.refresh_projection();
        }
    }

    /// Zoom the planar viewport about an anchor point.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if let ViewState::Planar { transform } = &mut self.view {
            transform.zoom_about(anchor, factor);
            self.refresh_projection();
        }
    }

    /// Orbit the spatial camera. Manual input cancels an in-flight snap.
    pub fn orbit(&mut self, dyaw: f64, dpitch: f64) {
        if let ViewState::Spatial { camera, snap } = &mut self.view {
            *snap = None;
            camera.orbit(dyaw, dpitch);
            self.refresh_projection();
        }
    }

    /// Dolly the spatial camera. Manual input cancels an in-flight snap.
    pub fn dolly(&mut self, factor: f64) {
        if let ViewState::Spatial { camera, snap } = &mut self.view {
            *snap = None;
            camera.dolly(factor);
            self.refresh_projection();
        }
    }

    /// Start (or retarget) a snap-to-plane camera flight at time `now`.
    /// A newly requested target replaces any animation already in flight.
    pub fn snap_to_plane(&mut self, plane: SnapPlane, now: f64) {
        if let ViewState::Spatial { camera, snap } = &mut self.view {
            *snap = Some(SnapAnimation::new(
                camera.pose(),
                camera.snap_target(plane),
                now,
            ));
        }
    }

    /// Advance the snap animation to time `now`. Returns whether the
    /// viewpoint moved (and thus a repaint is due).
    pub fn tick(&mut self, now: f64) -> bool {
        let ViewState::Spatial { camera, snap } = &mut self.view else {
            return false;
        };
        let Some(animation) = snap else {
            return false;
        };
        camera.set_pose(animation.sample(now));
        if animation.finished(now) {
            *snap = None;
        }
        self.refresh_projection();
        true
    }

    /// Run whichever render passes the raised dirty lines call for.
    pub fn flush_passes(&mut self) -> KindredResult<()> {
        let structural = self.hub.take(Signal::Structural);
        let interaction = self.hub.take(Signal::Interaction);

        if structural {
            let coords: Vec<Coord> = self.scene.visible_nodes().map(|n| n.coord).collect();
            let bounds = *self.bounds.resolve(self.dim(), &coords, &self.config.bounds);
            let projector = self.projector_for(&bounds)?;
            self.pipeline
                .structural_pass(&self.scene, &*projector, &self.config.visual)?;
            self.pipeline
                .interaction_pass(&self.scene, &self.selection, &self.hover);
        } else if interaction {
            self.pipeline
                .interaction_pass(&self.scene, &self.selection, &self.hover);
        }
        Ok(())
    }

    /// Flush pending passes and rasterize one frame.
    pub fn paint(&mut self, backend: &mut dyn PaintBackend) -> KindredResult<FrameRgba> {
        self.flush_passes()?;
        let plan = build_plan(
            self.pipeline.geometry(),
            self.pipeline.overlay(),
            &self.config.visual,
            self.config.canvas,
        );
        backend.paint(&plan, &self.thumbs)
    }

    // Reposition retained sprites after a viewport move. With bounds not
    // yet resolved there is nothing on screen to move.
    fn refresh_projection(&mut self) {
        let Some(bounds) = self.bounds.get().copied() else {
            return;
        };
        match self.projector_for(&bounds) {
            Ok(projector) => self.pipeline.reproject(&*projector),
            Err(err) => tracing::warn!(%err, "skipping reprojection"),
        }
    }

    fn projector_for(&self, bounds: &Bounds) -> KindredResult<Box<dyn Projector>> {
        match &self.view {
            ViewState::Planar { transform } => {
                let region = DrawRegion {
                    size: self.config.canvas,
                    margin: self.config.label_margin,
                };
                Ok(Box::new(PlanarProjector::new(bounds, region, *transform)?))
            }
            ViewState::Spatial { camera, .. } => Ok(Box::new(SpatialProjector::new(
                bounds,
                *camera,
                self.config.canvas,
            )?)),
        }
    }

    /// The scene model.
    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// The ordered selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// The stabilized bounds.
    pub fn bounds(&self) -> &StableBounds {
        &self.bounds
    }

    /// The current viewpoint.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The render pipeline (retained geometry, overlay, pass counters).
    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// Pass counters, for asserting the dual-pass triggering contract.
    pub fn pass_counters(&self) -> PassCounters {
        self.pipeline.counters()
    }

    /// Current axis labels.
    pub fn axis_labels(&self) -> &AxisLabels {
        &self.axis_labels
    }

    /// Prepared thumbnails.
    pub fn thumbnails(&self) -> &ThumbnailStore {
        &self.thumbs
    }

    /// Counts for the canvas stats badge.
    pub fn stats(&self) -> CanvasStats {
        self.scene.stats()
    }

    /// Subscribe to dirty-line notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(Signal) + 'static) {
        self.hub.subscribe(listener);
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
