use std::collections::{HashMap, HashSet, VecDeque};

use crate::foundation::core::{Coord, GroupId, NodeId, SceneDim};
use crate::foundation::error::{KindredError, KindredResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How an artifact (or its history group) came to exist.
pub enum GenMethod {
    /// One of several images generated from a single text prompt.
    Batch,
    /// Generated from an existing image used as reference.
    Reference,
    /// Interpolated between two existing images.
    Interpolation,
    /// Loaded from an external dataset rather than generated.
    External,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Opaque provenance metadata carried through for display; the engine never
/// interprets it.
pub struct Provenance {
    /// Prompt text used for generation (empty for external images).
    pub prompt: String,
    /// Creation timestamp as supplied by the collaborator.
    pub timestamp: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One artifact positioned in semantic coordinate space.
///
/// A node is pure data: it is created by external collaborators (batch
/// generation, reference generation, interpolation, external load) and is
/// never mutated afterwards except for its `visible` flag and full
/// coordinate replacement when the semantic axes change.
pub struct Node {
    /// Unique, never-reused identifier.
    pub id: NodeId,
    /// History group this artifact belongs to.
    pub group: GroupId,
    /// Data-space position.
    pub coord: Coord,
    /// Ids of the artifacts this one was generated from. Weak references:
    /// an id may point at a hidden or not-yet-loaded node.
    pub parents: Vec<NodeId>,
    /// Ids of artifacts generated from this one. Weak references.
    pub children: Vec<NodeId>,
    /// How this artifact was produced.
    pub method: GenMethod,
    /// Soft-delete flag; hidden nodes keep their id resolvable.
    pub visible: bool,
    /// Encoded pixel payload (opaque to the engine, used only for drawing).
    #[serde(skip)]
    pub payload: Vec<u8>,
    /// Display-only provenance.
    pub provenance: Provenance,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A named batch of nodes produced by one generation or load operation.
/// Groups are created alongside their first member and never deleted, only
/// hidden.
pub struct HistoryGroup {
    /// Unique group identifier.
    pub id: GroupId,
    /// What kind of operation produced this group.
    pub kind: GenMethod,
    /// Ordered member node ids.
    pub members: Vec<NodeId>,
    /// Node whose image represents the group in history chrome.
    pub thumbnail: Option<NodeId>,
    /// Prompt used for the operation, if any.
    pub prompt: String,
    /// Whether the group's members are shown on the canvas.
    pub visible: bool,
}

/// Counts shown in the canvas stats badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CanvasStats {
    /// Currently visible nodes.
    pub visible_nodes: usize,
    /// Distinct groups with at least one visible member.
    pub visible_groups: usize,
    /// Parent-to-child links originating at visible nodes.
    pub lineage_links: usize,
}

/// In-memory collection of nodes, lineage links, and history groups.
///
/// The model is plain data with no rendering side effects; callers decide
/// which pipeline pass a mutation warrants.
#[derive(Debug, Default)]
pub struct SceneModel {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    groups: Vec<HistoryGroup>,
    dim: Option<SceneDim>,
}

impl SceneModel {
    /// Empty scene with no fixed arity yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full node array, as done for every collaborator snapshot.
    ///
    /// The replacement is all-or-nothing: mixed coordinate arities or
    /// duplicate ids reject the whole list and leave the scene unchanged.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> KindredResult<()> {
        let mut dim = None;
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            match dim {
                None => dim = Some(node.coord.dim()),
                Some(d) if d != node.coord.dim() => {
                    return Err(KindredError::validation(
                        "all nodes in a scene must share one coordinate arity",
                    ));
                }
                Some(_) => {}
            }
            if index.insert(node.id, i).is_some() {
                return Err(KindredError::validation(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        self.nodes = nodes;
        self.index = index;
        if dim.is_some() {
            self.dim = dim;
        }
        Ok(())
    }

    /// Replace the history group list.
    pub fn set_groups(&mut self, groups: Vec<HistoryGroup>) {
        self.groups = groups;
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Apply a partial update to one node. Returns whether the id resolved.
    pub fn patch_node(&mut self, id: NodeId, patch: impl FnOnce(&mut Node)) -> bool {
        match self.index.get(&id) {
            Some(&i) => {
                patch(&mut self.nodes[i]);
                true
            }
            None => false,
        }
    }

    /// Soft-delete a node. Lineage links referencing it stay resolvable.
    /// Returns whether the node was visible before.
    pub fn hide(&mut self, id: NodeId) -> bool {
        let mut was_visible = false;
        self.patch_node(id, |node| {
            was_visible = node.visible;
            node.visible = false;
        });
        was_visible
    }

    /// Show or hide a whole history group together with its member nodes.
    /// Returns whether the group id resolved.
    pub fn set_group_visible(&mut self, id: &GroupId, visible: bool) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| &g.id == id) else {
            return false;
        };
        group.visible = visible;
        let members = group.members.clone();
        for member in members {
            self.patch_node(member, |node| node.visible = visible);
        }
        true
    }

    /// Create a lineage edge, updating both endpoints atomically.
    ///
    /// This is the single authoritative way to add an edge; it keeps the
    /// parent/child back-references symmetric by construction. Self-links
    /// and duplicate links are rejected without touching either node.
    pub fn link(&mut self, parent: NodeId, child: NodeId) -> KindredResult<()> {
        if parent == child {
            return Err(KindredError::validation(format!(
                "node {parent} cannot be its own parent"
            )));
        }
        let (Some(&pi), Some(&ci)) = (self.index.get(&parent), self.index.get(&child)) else {
            return Err(KindredError::validation(format!(
                "cannot link {parent} -> {child}: unknown node id"
            )));
        };
        if self.nodes[pi].children.contains(&child) || self.nodes[ci].parents.contains(&parent) {
            return Err(KindredError::validation(format!(
                "link {parent} -> {child} already exists"
            )));
        }
        self.nodes[pi].children.push(child);
        self.nodes[ci].parents.push(parent);
        Ok(())
    }

    /// All nodes in insertion order, hidden ones included.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Currently visible nodes in insertion order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.visible)
    }

    /// All history groups in insertion order.
    pub fn groups(&self) -> &[HistoryGroup] {
        &self.groups
    }

    /// Coordinate arity of the scene, once at least one node was loaded.
    pub fn dim(&self) -> Option<SceneDim> {
        self.dim
    }

    /// Transitive ancestors of `id` in breadth-first order, excluding `id`
    /// itself. Traversal carries a visited set, so accidental cycles in
    /// collaborator-supplied links terminate instead of looping.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        self.traverse(id, |node| &node.parents)
    }

    /// Transitive descendants of `id` in breadth-first order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.traverse(id, |node| &node.children)
    }

    fn traverse(&self, start: NodeId, edges: impl Fn(&Node) -> &Vec<NodeId>) -> Vec<NodeId> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                continue; // dangling reference, tolerated
            };
            for &next in edges(node) {
                if seen.insert(next) {
                    out.push(next);
                    queue.push_back(next);
                }
            }
        }
        out
    }

    /// Stats for the canvas badge: visible nodes, groups with visible
    /// members, and lineage links counted from visible nodes' child lists.
    pub fn stats(&self) -> CanvasStats {
        let mut groups = HashSet::new();
        let mut visible_nodes = 0;
        let mut lineage_links = 0;
        for node in self.visible_nodes() {
            visible_nodes += 1;
            lineage_links += node.children.len();
            groups.insert(&node.group);
        }
        CanvasStats {
            visible_nodes,
            visible_groups: groups.len(),
            lineage_links,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
