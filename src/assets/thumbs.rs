use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::NodeId;
use crate::foundation::error::{KindredError, KindredResult};
use crate::scene::model::Node;

/// Longest thumbnail side in pixels (double the drawn size, so nodes stay
/// sharp when zoomed in).
pub const THUMB_MAX_PX: u32 = 240;

/// Side length of the generated placeholder square.
const PLACEHOLDER_PX: u32 = 8;

/// Placeholder fill, a neutral border gray.
const PLACEHOLDER_RGBA: [u8; 4] = [0x30, 0x36, 0x3d, 0xff];

/// Prepared node thumbnail in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedThumb {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode-once thumbnail cache keyed by node id.
///
/// All payload IO is front-loaded here so paint backends never decode.
/// Since node ids are never reused and payloads never change, a cached
/// entry stays valid for the lifetime of the session. A node whose payload
/// is missing or undecodable gets a placeholder: one bad image must not
/// take the scene down with it.
#[derive(Debug, Default)]
pub struct ThumbnailStore {
    thumbs: HashMap<NodeId, PreparedThumb>,
}

impl ThumbnailStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure every listed node has a prepared thumbnail.
    pub fn prepare(&mut self, nodes: &[Node]) {
        for node in nodes {
            if self.thumbs.contains_key(&node.id) {
                continue;
            }
            let thumb = decode_thumbnail(&node.payload).unwrap_or_else(|err| {
                tracing::warn!(id = %node.id, %err, "payload not drawable, using placeholder");
                placeholder()
            });
            self.thumbs.insert(node.id, thumb);
        }
    }

    /// Prepared thumbnail for a node, if one was prepared.
    pub fn get(&self, id: NodeId) -> Option<&PreparedThumb> {
        self.thumbs.get(&id)
    }

    /// Number of prepared thumbnails.
    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }
}

/// Decode an encoded image payload into a downscaled premultiplied
/// thumbnail.
pub fn decode_thumbnail(bytes: &[u8]) -> KindredResult<PreparedThumb> {
    if bytes.is_empty() {
        return Err(KindredError::validation("empty image payload"));
    }
    let dyn_img = image::load_from_memory(bytes).context("decode node image payload")?;
    let full = dyn_img.to_rgba8();
    let (w, h) = full.dimensions();
    // Downscale-only: small payloads keep their exact pixels.
    let rgba = if w > THUMB_MAX_PX || h > THUMB_MAX_PX {
        dyn_img
            .resize(
                THUMB_MAX_PX,
                THUMB_MAX_PX,
                image::imageops::FilterType::Lanczos3,
            )
            .to_rgba8()
    } else {
        full
    };
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedThumb {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Flat placeholder square used when a payload cannot be drawn.
pub fn placeholder() -> PreparedThumb {
    let px = PLACEHOLDER_PX as usize;
    let mut data = Vec::with_capacity(px * px * 4);
    for _ in 0..px * px {
        data.extend_from_slice(&PLACEHOLDER_RGBA);
    }
    PreparedThumb {
        width: PLACEHOLDER_PX,
        height: PLACEHOLDER_PX,
        rgba8_premul: Arc::new(data),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/thumbs.rs"]
mod tests;
