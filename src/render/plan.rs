use kurbo::{Circle, Shape, Stroke, StrokeOpts};

use crate::foundation::core::{BezPath, CanvasSize, NodeId, Rect, Rgba8};
use crate::lineage::curves::Overlay;
use crate::render::pipeline::VisualSettings;
use crate::render::scene::{NodeSprite, SceneGeometry};
use crate::scene::model::GenMethod;

/// Canvas background.
const BACKGROUND: Rgba8 = Rgba8::rgb(0x0d, 0x11, 0x17);

/// Selection ring color.
const SELECTION_OUTLINE: Rgba8 = Rgba8::rgb(0xff, 0xa6, 0x57);

/// Hover ring color.
const HOVER_OUTLINE: Rgba8 = Rgba8::rgb(0x58, 0xa6, 0xff);

/// Ring stroke width in pixels.
const RING_WIDTH: f64 = 3.0;

/// Flattening tolerance for stroke expansion.
const STROKE_TOLERANCE: f64 = 0.1;

/// Base tint of a node by how it was produced, used when highlighting a
/// hovered history group.
pub fn method_tint(method: GenMethod) -> Rgba8 {
    match method {
        GenMethod::Batch => Rgba8::rgb(0x58, 0xa6, 0xff),
        GenMethod::Reference => Rgba8::rgb(0xbc, 0x8c, 0xff),
        GenMethod::Interpolation => Rgba8::rgb(0x3f, 0xb9, 0x50),
        GenMethod::External => Rgba8::rgb(0xd2, 0x99, 0x22),
    }
}

/// One backend-agnostic paint operation, already in screen space.
#[derive(Clone, Debug)]
pub enum PaintOp {
    /// Fill an expanded path with a solid color.
    Fill {
        /// Path to fill (strokes are pre-expanded to fills).
        path: BezPath,
        /// Fill color, alpha included.
        color: Rgba8,
    },
    /// Draw a node's thumbnail into a destination rectangle.
    Image {
        /// Node whose prepared thumbnail to draw.
        node: NodeId,
        /// Destination rectangle in screen pixels.
        dst: Rect,
        /// Image opacity.
        opacity: f64,
    },
}

/// Ordered paint operations for one frame.
#[derive(Clone, Debug)]
pub struct PaintPlan {
    /// Target surface size.
    pub size: CanvasSize,
    /// Background clear color.
    pub background: Rgba8,
    /// Operations in draw order.
    pub ops: Vec<PaintOp>,
}

/// Compile the retained scene and overlay into a paint plan.
///
/// Draw order: lineage curves first (beneath the artwork), then node
/// images, then highlight rings on top with the selection ring outermost
/// in priority.
pub fn build_plan(
    geometry: &SceneGeometry,
    overlay: &Overlay,
    settings: &VisualSettings,
    size: CanvasSize,
) -> PaintPlan {
    let mut ops = Vec::new();

    for edge in &overlay.edges {
        let style = edge.role.style();
        ops.push(PaintOp::Fill {
            path: stroke_to_fill(
                edge.curve.path_elements(STROKE_TOLERANCE),
                style.width,
                Some(style.dash),
            ),
            color: style.color.with_alpha(style.alpha),
        });
    }

    for sprite in geometry.sprites() {
        let half = if sprite.highlight.selected {
            sprite.half * settings.selected_scale
        } else {
            sprite.half
        };
        ops.push(PaintOp::Image {
            node: sprite.id,
            dst: Rect::new(
                sprite.center.x - half,
                sprite.center.y - half,
                sprite.center.x + half,
                sprite.center.y + half,
            ),
            opacity: settings.opacity,
        });
    }

    for sprite in geometry.sprites() {
        for color in ring_colors(sprite) {
            ops.push(ring(sprite, settings, color));
        }
    }

    PaintPlan {
        size,
        background: BACKGROUND,
        ops,
    }
}

// Ring priority, innermost first; the selection ring paints last (on top).
fn ring_colors(sprite: &NodeSprite) -> Vec<Rgba8> {
    let h = sprite.highlight;
    let mut colors = Vec::new();
    if h.group_hovered {
        colors.push(method_tint(sprite.method));
    }
    if h.lineage_parent {
        colors.push(crate::lineage::curves::EdgeRole::Parent.outline_color());
    }
    if h.lineage_child {
        colors.push(crate::lineage::curves::EdgeRole::Child.outline_color());
    }
    if h.hovered {
        colors.push(HOVER_OUTLINE);
    }
    if h.selected {
        colors.push(SELECTION_OUTLINE);
    }
    colors
}

fn ring(sprite: &NodeSprite, settings: &VisualSettings, color: Rgba8) -> PaintOp {
    let half = if sprite.highlight.selected {
        sprite.half * settings.selected_scale
    } else {
        sprite.half
    };
    let circle = Circle::new(sprite.center, half + RING_WIDTH);
    PaintOp::Fill {
        path: stroke_to_fill(circle.path_elements(STROKE_TOLERANCE), RING_WIDTH, None),
        color,
    }
}

// Expands a (possibly dashed) stroke into a fillable outline, which keeps
// backends limited to fills and images.
fn stroke_to_fill(
    elements: impl IntoIterator<Item = kurbo::PathEl>,
    width: f64,
    dash: Option<[f64; 2]>,
) -> BezPath {
    let mut style = Stroke::new(width);
    if let Some(pattern) = dash {
        style = style.with_dashes(0.0, pattern);
    }
    kurbo::stroke(elements, &style, &StrokeOpts::default(), STROKE_TOLERANCE)
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
