use crate::foundation::core::{NodeId, Point, Rect};

/// Result of toggling one node in the selection set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionTransition {
    /// The node was added.
    Added {
        /// Whether the set was empty before this add.
        first: bool,
    },
    /// The node was removed.
    Removed {
        /// Whether the removal emptied the set.
        emptied: bool,
    },
}

/// What the dependent floating panel should do with its anchor after a
/// selection change.
///
/// Re-anchoring on every add would make the panel jump while the user
/// multi-selects in sequence, so `Keep` tells the panel to hold position
/// and only update its displayed count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorDirective {
    /// Place (or move) the panel at this screen point.
    Show(Point),
    /// Keep the existing anchor; only the selection count changed.
    Keep,
    /// The selection emptied; hide the panel.
    Hide,
}

/// Ordered multi-selection with toggle semantics.
///
/// Clicking a node adds it if absent and removes it if present; clicking
/// the canvas background clears the whole set. Insertion order is
/// preserved, which keeps the panel anchor stable while members come and
/// go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<NodeId>,
}

impl SelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Whether `id` is currently selected.
    pub fn contains(&self, id: NodeId) -> bool {
        self.order.contains(&id)
    }

    /// Number of selected nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Toggle membership of `id`.
    pub fn toggle(&mut self, id: NodeId) -> SelectionTransition {
        match self.order.iter().position(|&n| n == id) {
            Some(pos) => {
                self.order.remove(pos);
                SelectionTransition::Removed {
                    emptied: self.order.is_empty(),
                }
            }
            None => {
                let first = self.order.is_empty();
                self.order.push(id);
                SelectionTransition::Added { first }
            }
        }
    }

    /// Remove `id` if present (the hide path). Returns whether it was
    /// removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.order.iter().position(|&n| n == id) {
            Some(pos) => {
                self.order.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop ids rejected by `keep` (stale after a snapshot replace).
    /// Returns whether the set changed.
    pub fn retain(&mut self, keep: impl Fn(NodeId) -> bool) -> bool {
        let before = self.order.len();
        self.order.retain(|&id| keep(id));
        self.order.len() != before
    }

    /// Empty the set. Returns whether it was non-empty.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.order.is_empty();
        self.order.clear();
        had_any
    }
}

/// Anchor policy for the floating panel, driven by the transition and the
/// just-clicked node's screen rectangle.
///
/// The anchor is recomputed only on empty-to-non-empty and on removal
/// (where the prior anchor may have pointed at the removed member); adding
/// to an existing selection keeps the panel where it is.
pub fn anchor_for_transition(
    transition: SelectionTransition,
    clicked_rect: Rect,
) -> AnchorDirective {
    match transition {
        SelectionTransition::Added { first: true } => AnchorDirective::Show(anchor_point(clicked_rect)),
        SelectionTransition::Added { first: false } => AnchorDirective::Keep,
        SelectionTransition::Removed { emptied: false } => {
            AnchorDirective::Show(anchor_point(clicked_rect))
        }
        SelectionTransition::Removed { emptied: true } => AnchorDirective::Hide,
    }
}

// The panel hangs off the top-right corner of the clicked node.
fn anchor_point(rect: Rect) -> Point {
    Point::new(rect.x1, rect.y0)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/selection.rs"]
mod tests;
