use super::*;
use base64::Engine as _;

fn wire_node(id: u64, coordinates: Vec<f64>) -> WireNode {
    WireNode {
        id,
        group_id: "batch_0".into(),
        image: String::new(),
        coordinates,
        parents: vec![],
        children: vec![],
        method: GenMethod::Batch,
        prompt: String::new(),
        timestamp: String::new(),
        visible: true,
    }
}

#[test]
fn push_messages_parse_from_tagged_json() {
    let msg: PushMessage = serde_json::from_str(
        r#"{
            "type": "state_update",
            "data": {
                "nodes": [{
                    "id": 3,
                    "groupId": "batch_1",
                    "coordinates": [0.5, -1.5],
                    "method": "interpolation",
                    "prompt": "a red boot"
                }],
                "groups": [{
                    "id": "batch_1",
                    "type": "interpolation",
                    "memberIds": [3],
                    "thumbnailId": 3
                }]
            }
        }"#,
    )
    .unwrap();
    let PushMessage::StateUpdate { data } = msg else {
        panic!("expected a state update");
    };
    assert_eq!(data.nodes.len(), 1);
    assert_eq!(data.nodes[0].method, GenMethod::Interpolation);
    assert!(data.nodes[0].visible, "visible defaults to true");
    assert_eq!(data.groups[0].thumbnail_id, Some(3));
}

#[test]
fn progress_and_error_messages_parse() {
    let progress: PushMessage =
        serde_json::from_str(r#"{"type": "progress", "progress": 42.5}"#).unwrap();
    assert!(matches!(progress, PushMessage::Progress { progress } if progress == 42.5));

    let error: PushMessage =
        serde_json::from_str(r#"{"type": "error", "error": "generator offline"}"#).unwrap();
    assert!(matches!(error, PushMessage::Error { error } if error == "generator offline"));
}

#[test]
fn wire_node_converts_with_decoded_payload() {
    let payload = b"not-really-png-but-bytes";
    let mut wire = wire_node(7, vec![1.0, 2.0, 3.0]);
    wire.image = base64::engine::general_purpose::STANDARD.encode(payload);
    wire.parents = vec![1, 2];

    let node = node_from_wire(wire).unwrap();
    assert_eq!(node.id, NodeId(7));
    assert_eq!(node.coord.dim(), crate::foundation::core::SceneDim::Spatial);
    assert_eq!(node.payload, payload);
    assert_eq!(node.parents, vec![NodeId(1), NodeId(2)]);
}

#[test]
fn invalid_base64_degrades_to_an_empty_payload() {
    let mut wire = wire_node(1, vec![0.0, 0.0]);
    wire.image = "%%% not base64 %%%".into();
    let node = node_from_wire(wire).unwrap();
    assert!(node.payload.is_empty());
}

#[test]
fn malformed_coordinates_reject_the_node() {
    assert!(node_from_wire(wire_node(1, vec![1.0])).is_err());
    assert!(node_from_wire(wire_node(1, vec![f64::NAN, 0.0])).is_err());
}

#[test]
fn convert_state_is_all_or_nothing() {
    let nodes = vec![wire_node(1, vec![0.0, 0.0]), wire_node(2, vec![1.0])];
    assert!(convert_state(nodes, vec![]).is_err());
}

#[test]
fn axis_labels_round_trip_with_optional_z() {
    let labels = AxisLabels {
        x: ("formal".into(), "sporty".into()),
        y: ("dark".into(), "colorful".into()),
        z: None,
    };
    let json = serde_json::to_string(&labels).unwrap();
    assert!(!json.contains("\"z\""));
    let back: AxisLabels = serde_json::from_str(&json).unwrap();
    assert_eq!(back, labels);
}
