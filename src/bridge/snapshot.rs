use base64::Engine as _;

use crate::foundation::core::{Coord, GroupId, NodeId};
use crate::foundation::error::{KindredError, KindredResult};
use crate::scene::model::{GenMethod, HistoryGroup, Node, Provenance};

/// Per-axis concept labels as `(negative, positive)` pairs; `z` is present
/// only for spatial scenes.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AxisLabels {
    /// First-axis labels.
    pub x: (String, String),
    /// Second-axis labels.
    pub y: (String, String),
    /// Third-axis labels, spatial scenes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<(String, String)>,
}

/// One node as pushed over the wire.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WireNode {
    /// Unique node id.
    pub id: u64,
    /// Owning history group.
    #[serde(rename = "groupId")]
    pub group_id: String,
    /// Base64-encoded image payload; may be empty.
    #[serde(default)]
    pub image: String,
    /// Position with 2 or 3 components.
    pub coordinates: Vec<f64>,
    /// Parent node ids.
    #[serde(default)]
    pub parents: Vec<u64>,
    /// Child node ids.
    #[serde(default)]
    pub children: Vec<u64>,
    /// Generation method.
    pub method: GenMethod,
    /// Prompt text, if any.
    #[serde(default)]
    pub prompt: String,
    /// Opaque creation timestamp.
    #[serde(default)]
    pub timestamp: String,
    /// Visibility flag.
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// One history group as pushed over the wire.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WireGroup {
    /// Unique group id.
    pub id: String,
    /// Operation that produced the group.
    #[serde(rename = "type")]
    pub kind: GenMethod,
    /// Ordered member node ids.
    #[serde(rename = "memberIds", default)]
    pub member_ids: Vec<u64>,
    /// Prompt text, if any.
    #[serde(default)]
    pub prompt: String,
    /// Visibility flag.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Representative thumbnail node.
    #[serde(rename = "thumbnailId", default)]
    pub thumbnail_id: Option<u64>,
}

fn default_true() -> bool {
    true
}

/// Full canvas state as pulled from the collaborator.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StateSnapshot {
    /// All nodes.
    pub nodes: Vec<WireNode>,
    /// All history groups.
    pub groups: Vec<WireGroup>,
    /// Current axis labels.
    #[serde(rename = "axisLabels")]
    pub axis_labels: AxisLabels,
}

/// Node and group payload of a push-channel state update.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StateData {
    /// All nodes.
    pub nodes: Vec<WireNode>,
    /// All history groups.
    pub groups: Vec<WireGroup>,
}

/// Messages arriving on the collaborator push channel.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    /// Full state replacement.
    StateUpdate {
        /// Replacement nodes and groups.
        data: StateData,
    },
    /// Generation progress in percent.
    Progress {
        /// Completion estimate in `0..=100`.
        progress: f64,
    },
    /// Non-fatal collaborator failure.
    Error {
        /// Human-readable failure description.
        error: String,
    },
}

/// Convert a wire node into a scene node.
///
/// Malformed coordinates reject the node (and with it the snapshot);
/// an undecodable payload merely degrades to an empty payload, which the
/// thumbnail store later renders as a placeholder.
pub fn node_from_wire(wire: WireNode) -> KindredResult<Node> {
    let coord = Coord::from_slice(&wire.coordinates).map_err(|err| {
        KindredError::snapshot(format!("node {}: {err}", NodeId(wire.id)))
    })?;

    let payload = if wire.image.is_empty() {
        Vec::new()
    } else {
        match base64::engine::general_purpose::STANDARD.decode(&wire.image) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(id = wire.id, %err, "discarding undecodable image payload");
                Vec::new()
            }
        }
    };

    Ok(Node {
        id: NodeId(wire.id),
        group: GroupId::new(wire.group_id),
        coord,
        parents: wire.parents.into_iter().map(NodeId).collect(),
        children: wire.children.into_iter().map(NodeId).collect(),
        method: wire.method,
        visible: wire.visible,
        payload,
        provenance: Provenance {
            prompt: wire.prompt,
            timestamp: wire.timestamp,
        },
    })
}

/// Convert a wire group into a scene group.
pub fn group_from_wire(wire: WireGroup) -> HistoryGroup {
    HistoryGroup {
        id: GroupId::new(wire.id),
        kind: wire.kind,
        members: wire.member_ids.into_iter().map(NodeId).collect(),
        thumbnail: wire.thumbnail_id.map(NodeId),
        prompt: wire.prompt,
        visible: wire.visible,
    }
}

/// Convert a full wire payload, failing before anything is handed to the
/// scene: a snapshot either converts completely or not at all.
pub fn convert_state(
    nodes: Vec<WireNode>,
    groups: Vec<WireGroup>,
) -> KindredResult<(Vec<Node>, Vec<HistoryGroup>)> {
    let nodes = nodes
        .into_iter()
        .map(node_from_wire)
        .collect::<KindredResult<Vec<_>>>()?;
    let groups = groups.into_iter().map(group_from_wire).collect();
    Ok((nodes, groups))
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/snapshot.rs"]
mod tests;
