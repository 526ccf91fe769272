use crate::foundation::core::{GroupId, NodeId};
use crate::interaction::selection::SelectionSet;

/// Pointer hover state: at most one hovered node, plus the history group
/// the pointer rests on in the history chrome (passed through for member
/// highlighting).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    node: Option<NodeId>,
    group: Option<GroupId>,
}

impl HoverState {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered node, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// The hovered history group, if any.
    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    /// Update the hovered node. Returns whether the state changed.
    pub fn set_node(&mut self, node: Option<NodeId>) -> bool {
        let changed = self.node != node;
        self.node = node;
        changed
    }

    /// Update the hovered group. Returns whether the state changed.
    pub fn set_group(&mut self, group: Option<GroupId>) -> bool {
        let changed = self.group != group;
        self.group = group;
        changed
    }

    /// Drop hover targets rejected by `keep` (stale after a snapshot).
    /// Returns whether the state changed.
    pub fn retain(&mut self, keep: impl Fn(NodeId) -> bool) -> bool {
        match self.node {
            Some(id) if !keep(id) => {
                self.node = None;
                true
            }
            _ => false,
        }
    }
}

/// Nodes whose lineage is drawn: the selection when non-empty, otherwise
/// the single hovered node. Selection takes precedence outright: hover
/// lineage is suppressed entirely while anything is selected, so the two
/// overlays never conflict.
pub fn focus_nodes(selection: &SelectionSet, hover: &HoverState) -> Vec<NodeId> {
    if !selection.is_empty() {
        selection.ids().to_vec()
    } else {
        hover.node().into_iter().collect()
    }
}
