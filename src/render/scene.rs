use std::collections::HashMap;

use crate::foundation::core::{Coord, NodeId, Point, Rect};
use crate::scene::model::GenMethod;

/// Highlight attributes toggled by the interaction pass. These are the only
/// sprite fields that change between structural rebuilds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    /// Node is in the selection set.
    pub selected: bool,
    /// Node is directly under the pointer.
    pub hovered: bool,
    /// Node is a parent endpoint of the current lineage overlay.
    pub lineage_parent: bool,
    /// Node is a child endpoint of the current lineage overlay.
    pub lineage_child: bool,
    /// Node's history group is hovered in the history chrome.
    pub group_hovered: bool,
}

impl Highlight {
    /// Reset the overlay-derived flags, keeping nothing.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Retained drawable state for one visible node.
#[derive(Clone, Debug)]
pub struct NodeSprite {
    /// Backing node.
    pub id: NodeId,
    /// Data-space position, kept so viewport moves can reproject without a
    /// structural rebuild.
    pub coord: Coord,
    /// Projected screen center.
    pub center: Point,
    /// Half of the drawn side length in pixels.
    pub half: f64,
    /// Screen-space hit-test region.
    pub hit: Rect,
    /// Paint order; later sprites draw and hit-test on top.
    pub z: usize,
    /// Generation method, used for the base tint.
    pub method: GenMethod,
    /// Interaction-pass attributes.
    pub highlight: Highlight,
}

impl NodeSprite {
    /// Recompute the derived screen fields for a new center.
    pub fn place(&mut self, center: Point) {
        self.center = center;
        self.hit = Rect::new(
            center.x - self.half,
            center.y - self.half,
            center.x + self.half,
            center.y + self.half,
        );
    }
}

/// The retained scene built by the structural pass: sprite geometry and
/// hit-test regions, indexed by node id.
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    sprites: Vec<NodeSprite>,
    by_id: HashMap<NodeId, usize>,
}

impl SceneGeometry {
    /// Replace all sprites (structural pass only).
    pub fn replace(&mut self, sprites: Vec<NodeSprite>) {
        self.by_id = sprites
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        self.sprites = sprites;
    }

    /// Sprites in paint order.
    pub fn sprites(&self) -> &[NodeSprite] {
        &self.sprites
    }

    /// Mutable sprites in paint order (interaction/reprojection passes).
    pub fn sprites_mut(&mut self) -> &mut [NodeSprite] {
        &mut self.sprites
    }

    /// Sprite for a node id, if it is on screen this frame.
    pub fn sprite(&self, id: NodeId) -> Option<&NodeSprite> {
        self.by_id.get(&id).map(|&i| &self.sprites[i])
    }

    /// Projected center of a node, if on screen.
    pub fn center(&self, id: NodeId) -> Option<Point> {
        self.sprite(id).map(|s| s.center)
    }

    /// Screen rectangle of a node, if on screen.
    pub fn screen_rect(&self, id: NodeId) -> Option<Rect> {
        self.sprite(id).map(|s| s.hit)
    }

    /// Topmost sprite containing the screen point, if any.
    pub fn hit_test(&self, p: Point) -> Option<NodeId> {
        self.sprites
            .iter()
            .rev()
            .find(|s| s.hit.contains(p))
            .map(|s| s.id)
    }

    /// Number of drawable sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether nothing is drawable.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Reset every sprite's highlight attributes.
    pub fn clear_highlights(&mut self) {
        for sprite in &mut self.sprites {
            sprite.highlight.clear();
        }
    }
}
