use crate::foundation::error::KindredResult;
use crate::interaction::hover::{HoverState, focus_nodes};
use crate::interaction::selection::SelectionSet;
use crate::lineage::curves::{EdgeRole, Overlay, build_overlay};
use crate::projection::project::Projector;
use crate::render::scene::{Highlight, NodeSprite, SceneGeometry};
use crate::scene::model::SceneModel;

/// Visual knobs that require a structural rebuild when changed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualSettings {
    /// Drawn node side length in pixels.
    pub node_px: f64,
    /// Node image opacity.
    pub opacity: f64,
    /// Size multiplier applied to selected nodes at paint time.
    pub selected_scale: f64,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            node_px: 120.0,
            opacity: 0.9,
            selected_scale: 1.15,
        }
    }
}

/// How often each pass has run; tests pin the triggering contract on these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassCounters {
    /// Full geometry rebuilds.
    pub structural: u64,
    /// Highlight/overlay refreshes.
    pub interaction: u64,
    /// In-place position refreshes after viewport moves.
    pub reprojections: u64,
}

/// The dual-pass render engine.
///
/// The two passes are triggered by disjoint state changes and communicate
/// through the retained [`SceneGeometry`]:
///
/// - the **structural pass** rebuilds all sprite geometry and hit regions
///   from the scene model (node-set replacement, visual settings, bounds or
///   axis changes);
/// - the **interaction pass** only toggles highlight attributes and
///   recomputes the lineage overlay (selection or hover changes).
///
/// Rerunning the structural pass on every click would flicker, discard
/// in-flight hit state, and redraw every image; the split keeps the hot
/// interaction path to attribute writes on existing geometry.
#[derive(Debug, Default)]
pub struct RenderPipeline {
    geometry: SceneGeometry,
    overlay: Overlay,
    counters: PassCounters,
}

impl RenderPipeline {
    /// Pipeline with empty retained state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild all sprites from the visible scene.
    ///
    /// A node whose coordinate currently has no screen position (behind the
    /// 3D camera) is skipped for the frame; any other per-node trouble is a
    /// paint-time concern and never aborts the scene build.
    #[tracing::instrument(skip_all, fields(nodes = scene.nodes().len()))]
    pub fn structural_pass(
        &mut self,
        scene: &SceneModel,
        projector: &dyn Projector,
        settings: &VisualSettings,
    ) -> KindredResult<()> {
        let half = settings.node_px * 0.5;
        let mut sprites = Vec::new();
        for (z, node) in scene.visible_nodes().enumerate() {
            let Some(center) = projector.project(&node.coord) else {
                continue;
            };
            let mut sprite = NodeSprite {
                id: node.id,
                coord: node.coord,
                center,
                half,
                hit: crate::foundation::core::Rect::ZERO,
                z,
                method: node.method,
                highlight: Highlight::default(),
            };
            sprite.place(center);
            sprites.push(sprite);
        }
        self.geometry.replace(sprites);
        self.overlay.clear();
        self.counters.structural += 1;
        Ok(())
    }

    /// Refresh highlight attributes and the lineage overlay in place.
    #[tracing::instrument(skip_all)]
    pub fn interaction_pass(
        &mut self,
        scene: &SceneModel,
        selection: &SelectionSet,
        hover: &HoverState,
    ) {
        self.geometry.clear_highlights();

        let focus = focus_nodes(selection, hover);
        self.overlay = build_overlay(&focus, scene, &self.geometry);

        let outlines = std::mem::take(&mut self.overlay.outlines);
        for sprite in self.geometry.sprites_mut() {
            sprite.highlight.selected = selection.contains(sprite.id);
            sprite.highlight.hovered = hover.node() == Some(sprite.id);
            sprite.highlight.group_hovered = false;
            for &(id, role) in &outlines {
                if id == sprite.id {
                    match role {
                        EdgeRole::Parent => sprite.highlight.lineage_parent = true,
                        EdgeRole::Child => sprite.highlight.lineage_child = true,
                    }
                }
            }
        }
        self.overlay.outlines = outlines;

        if let Some(group) = hover.group() {
            for sprite in self.geometry.sprites_mut() {
                if scene.node(sprite.id).is_some_and(|n| &n.group == group) {
                    sprite.highlight.group_hovered = true;
                }
            }
        }

        self.counters.interaction += 1;
    }

    /// Update sprite positions for a new viewport transform or camera pose
    /// without rebuilding geometry. Existing overlay curves are re-bent to
    /// the moved endpoints; highlight attributes are untouched.
    pub fn reproject(&mut self, projector: &dyn Projector) {
        for sprite in self.geometry.sprites_mut() {
            if let Some(center) = projector.project(&sprite.coord) {
                sprite.place(center);
            }
        }
        for edge in &mut self.overlay.edges {
            if let (Some(from), Some(to)) =
                (self.geometry.center(edge.from), self.geometry.center(edge.to))
            {
                edge.curve = crate::lineage::curves::bow_curve(from, to);
            }
        }
        self.counters.reprojections += 1;
    }

    /// The retained geometry.
    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    /// The current lineage overlay.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Pass counters for contract checks.
    pub fn counters(&self) -> PassCounters {
        self.counters
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
