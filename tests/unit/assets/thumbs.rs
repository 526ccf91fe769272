use super::*;
use crate::foundation::core::{Coord, GroupId, NodeId};
use crate::scene::model::{GenMethod, Provenance};

fn node_with_payload(id: u64, payload: Vec<u8>) -> Node {
    Node {
        id: NodeId(id),
        group: GroupId::new("g"),
        coord: Coord::Planar { x: 0.0, y: 0.0 },
        parents: vec![],
        children: vec![],
        method: GenMethod::External,
        visible: true,
        payload,
        provenance: Provenance::default(),
    }
}

fn tiny_png(rgba: [u8; 4]) -> Vec<u8> {
    let mut img = image::RgbaImage::new(4, 4);
    for px in img.pixels_mut() {
        *px = image::Rgba(rgba);
    }
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn valid_payload_decodes_and_premultiplies() {
    let thumb = decode_thumbnail(&tiny_png([200, 100, 50, 128])).unwrap();
    assert!(thumb.width > 0 && thumb.height > 0);
    let px = &thumb.rgba8_premul[..4];
    // Premultiplied channels, alpha preserved.
    assert_eq!(px[3], 128);
    assert_eq!(px[0], ((200u16 * 128 + 127) / 255) as u8);
}

#[test]
fn garbage_payload_fails_decode() {
    assert!(decode_thumbnail(b"definitely not an image").is_err());
    assert!(decode_thumbnail(&[]).is_err());
}

#[test]
fn store_degrades_bad_payloads_to_placeholders() {
    let mut store = ThumbnailStore::new();
    store.prepare(&[
        node_with_payload(1, tiny_png([255, 0, 0, 255])),
        node_with_payload(2, b"corrupt".to_vec()),
        node_with_payload(3, vec![]),
    ]);

    assert_eq!(store.len(), 3);
    for id in [1, 2, 3] {
        let thumb = store.get(NodeId(id)).unwrap();
        assert!(!thumb.rgba8_premul.is_empty());
    }
    // The degraded entries carry the placeholder dimensions.
    assert_eq!(store.get(NodeId(2)).unwrap().width, 8);
    assert_eq!(store.get(NodeId(3)).unwrap().width, 8);
    assert_eq!(store.get(NodeId(1)).unwrap().width, 4);
}

#[test]
fn prepare_is_idempotent_per_id() {
    let mut store = ThumbnailStore::new();
    let nodes = [node_with_payload(1, tiny_png([0, 255, 0, 255]))];
    store.prepare(&nodes);
    store.prepare(&nodes);
    assert_eq!(store.len(), 1);
}

#[test]
fn oversized_images_downscale_to_the_thumbnail_cap() {
    let mut img = image::RgbaImage::new(600, 300);
    for px in img.pixels_mut() {
        *px = image::Rgba([1, 2, 3, 255]);
    }
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let thumb = decode_thumbnail(&bytes).unwrap();
    assert_eq!(thumb.width, THUMB_MAX_PX);
    assert_eq!(thumb.height, THUMB_MAX_PX / 2);
}
