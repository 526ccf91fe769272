use crate::foundation::core::{NodeId, Point, QuadBez, Rgba8, Vec2};
use crate::render::scene::SceneGeometry;
use crate::scene::model::SceneModel;

/// Fraction of the perpendicular delta used to displace the control point.
/// Every edge bows the same way, so curves between nearby nodes stay
/// readable instead of stacking into straight lines or random arcs.
const BOW_FRACTION: f64 = 0.2;

/// Direction of a lineage edge relative to the focus node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeRole {
    /// Edge from a parent into the focus node.
    Parent,
    /// Edge from the focus node into a child.
    Child,
}

impl EdgeRole {
    /// Stroke styling for this role.
    pub fn style(self) -> EdgeStyle {
        match self {
            // Green, dominant stroke for upstream edges.
            Self::Parent => EdgeStyle {
                color: Rgba8::rgb(0x3f, 0xb9, 0x50),
                width: 3.0,
                dash: [8.0, 4.0],
                alpha: 0.9,
            },
            // Orange, slightly thinner for downstream edges.
            Self::Child => EdgeStyle {
                color: Rgba8::rgb(0xd2, 0x99, 0x22),
                width: 2.5,
                dash: [8.0, 4.0],
                alpha: 0.85,
            },
        }
    }

    /// Outline color applied to the edge's far endpoint node.
    pub fn outline_color(self) -> Rgba8 {
        self.style().color
    }
}

/// Stroke parameters for one edge role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash length / gap length in pixels.
    pub dash: [f64; 2],
    /// Stroke opacity.
    pub alpha: f64,
}

/// One drawable lineage curve.
#[derive(Clone, Copy, Debug)]
pub struct LineageEdge {
    /// Source node (parent end).
    pub from: NodeId,
    /// Destination node (child end).
    pub to: NodeId,
    /// Styling role relative to the focus node.
    pub role: EdgeRole,
    /// Screen-space curve.
    pub curve: QuadBez,
}

/// The lineage overlay for the current focus set: curves plus the colored
/// endpoint outlines they imply. Contributions from multiple focus nodes
/// merge additively and are deliberately not deduplicated.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    /// Curves in draw order.
    pub edges: Vec<LineageEdge>,
    /// Endpoint outline roles, one entry per contributing edge.
    pub outlines: Vec<(NodeId, EdgeRole)>,
}

impl Overlay {
    /// Drop all edges and outlines.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.outlines.clear();
    }
}

/// Quadratic curve from `from` to `to`, bowed perpendicular to the segment.
pub fn bow_curve(from: Point, to: Point) -> QuadBez {
    let delta = to - from;
    let perpendicular = Vec2::new(-delta.y, delta.x);
    let control = from.midpoint(to) + perpendicular * BOW_FRACTION;
    QuadBez::new(from, control, to)
}

/// Build the overlay for `focus` nodes.
///
/// Each focus node contributes a curve per parent (parent to focus) and per
/// child (focus to child). Endpoints are looked up in the projected
/// geometry, so links referencing hidden, unloaded, or off-screen nodes
/// contribute nothing; dangling lineage is tolerated, never an error.
pub fn build_overlay(focus: &[NodeId], scene: &SceneModel, geometry: &SceneGeometry) -> Overlay {
    let mut overlay = Overlay::default();

    for &focus_id in focus {
        let Some(focus_center) = geometry.center(focus_id) else {
            continue;
        };
        let Some(node) = scene.node(focus_id) else {
            continue;
        };

        for &parent in &node.parents {
            match geometry.center(parent) {
                Some(parent_center) => {
                    overlay.edges.push(LineageEdge {
                        from: parent,
                        to: focus_id,
                        role: EdgeRole::Parent,
                        curve: bow_curve(parent_center, focus_center),
                    });
                    overlay.outlines.push((parent, EdgeRole::Parent));
                }
                None => tracing::debug!(%focus_id, %parent, "skipping unresolved parent edge"),
            }
        }

        for &child in &node.children {
            match geometry.center(child) {
                Some(child_center) => {
                    overlay.edges.push(LineageEdge {
                        from: focus_id,
                        to: child,
                        role: EdgeRole::Child,
                        curve: bow_curve(focus_center, child_center),
                    });
                    overlay.outlines.push((child, EdgeRole::Child));
                }
                None => tracing::debug!(%focus_id, %child, "skipping unresolved child edge"),
            }
        }
    }

    overlay
}

#[cfg(test)]
#[path = "../../tests/unit/lineage/curves.rs"]
mod tests;
