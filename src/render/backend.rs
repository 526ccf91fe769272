use crate::assets::thumbs::ThumbnailStore;
use crate::foundation::error::KindredResult;
use crate::render::plan::PaintPlan;

/// One rasterized frame.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

/// Executes paint plans against some raster target.
///
/// Backends receive fully screen-space plans and the prepared thumbnail
/// store; they never touch the scene model or decode payloads.
pub trait PaintBackend {
    /// Rasterize one frame.
    fn paint(&mut self, plan: &PaintPlan, thumbs: &ThumbnailStore) -> KindredResult<FrameRgba>;
}
