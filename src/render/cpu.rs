use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::thumbs::{PreparedThumb, ThumbnailStore};
use crate::foundation::core::{NodeId, Rect};
use crate::foundation::error::{KindredError, KindredResult};
use crate::render::backend::{FrameRgba, PaintBackend};
use crate::render::plan::{PaintOp, PaintPlan};

/// CPU rasterizer for paint plans, producing premultiplied RGBA8 frames.
#[derive(Default)]
pub struct CpuBackend {
    image_cache: HashMap<NodeId, vello_cpu::Image>,
}

impl CpuBackend {
    /// Backend with an empty image cache.
    pub fn new() -> Self {
        Self::default()
    }

    // Node ids are never reused, so a cached paint stays valid forever.
    fn image_paint_for(
        &mut self,
        id: NodeId,
        thumbs: &ThumbnailStore,
    ) -> KindredResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(&id) {
            return Ok(paint.clone());
        }

        let thumb = thumbs
            .get(id)
            .ok_or_else(|| KindredError::render(format!("no prepared thumbnail for node {id}")))?;
        let paint = thumb_to_paint(thumb)?;
        self.image_cache.insert(id, paint.clone());
        Ok(paint)
    }
}

impl PaintBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn paint(&mut self, plan: &PaintPlan, thumbs: &ThumbnailStore) -> KindredResult<FrameRgba> {
        let width: u16 = plan
            .size
            .width
            .try_into()
            .map_err(|_| KindredError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .size
            .height
            .try_into()
            .map_err(|_| KindredError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let bg = plan.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for op in &plan.ops {
            match op {
                PaintOp::Fill { path, color } => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                PaintOp::Image { node, dst, opacity } => {
                    let paint = self.image_paint_for(*node, thumbs)?;
                    let (w, h) = image_paint_size(&paint)?;
                    ctx.set_transform(affine_to_cpu(fit_transform(*dst, w, h)));
                    ctx.set_paint(paint);
                    if *opacity < 1.0 {
                        ctx.push_opacity_layer(*opacity as f32);
                    }
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
                    if *opacity < 1.0 {
                        ctx.pop_layer();
                    }
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: plan.size.width,
            height: plan.size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

// Maps the image's pixel box onto the destination rectangle.
fn fit_transform(dst: Rect, img_w: f64, img_h: f64) -> kurbo::Affine {
    kurbo::Affine::translate((dst.x0, dst.y0))
        * kurbo::Affine::scale_non_uniform(dst.width() / img_w, dst.height() / img_h)
}

fn thumb_to_paint(thumb: &PreparedThumb) -> KindredResult<vello_cpu::Image> {
    let pixmap =
        premul_bytes_to_pixmap(thumb.rgba8_premul.as_slice(), thumb.width, thumb.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> KindredResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KindredError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KindredError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(KindredError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint_size(image: &vello_cpu::Image) -> KindredResult<(f64, f64)> {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => Ok((f64::from(p.width()), f64::from(p.height()))),
        vello_cpu::ImageSource::OpaqueId(_) => Err(KindredError::render(
            "cpu backend does not support opaque image ids",
        )),
    }
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
