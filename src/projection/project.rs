use crate::foundation::core::{CanvasSize, Coord, Point, SceneDim};
use crate::foundation::error::{KindredError, KindredResult};
use crate::projection::bounds::Bounds;
use crate::viewport::camera::{OrbitCamera, Vec3};
use crate::viewport::transform::ViewTransform;

/// Pixel region nodes are drawn into: the full canvas minus a margin
/// reserved for axis labels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawRegion {
    /// Full canvas size.
    pub size: CanvasSize,
    /// Margin in pixels kept free on every edge.
    pub margin: f64,
}

impl DrawRegion {
    fn x_range(&self) -> (f64, f64) {
        (self.margin, f64::from(self.size.width) - self.margin)
    }

    // Data +y points up, screen +y points down, so the range is reversed.
    fn y_range(&self) -> (f64, f64) {
        (f64::from(self.size.height) - self.margin, self.margin)
    }
}

/// Maps data-space coordinates to drawable screen positions.
///
/// Lineage rendering and hit-area construction are written once against
/// this trait; the planar and spatial backends are interchangeable behind
/// it. `None` means the coordinate has no on-screen position (behind the
/// camera) and its node is simply not drawn this frame.
pub trait Projector {
    /// Screen position for a data coordinate, if it is drawable.
    fn project(&self, coord: &Coord) -> Option<Point>;
}

#[derive(Clone, Copy, Debug)]
struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    fn map(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) * (self.r1 - self.r0) / (self.d1 - self.d0)
    }
}

/// 2D projector: one linear scale per axis from the frozen bounds to the
/// draw region, composed with the user's pan/zoom transform.
#[derive(Clone, Debug)]
pub struct PlanarProjector {
    scale_x: LinearScale,
    scale_y: LinearScale,
    view: ViewTransform,
}

impl PlanarProjector {
    /// Build a projector for planar bounds. Bounds are guaranteed
    /// non-degenerate by the padding floor, so the scales are always finite.
    pub fn new(bounds: &Bounds, region: DrawRegion, view: ViewTransform) -> KindredResult<Self> {
        let Bounds::Planar([x, y]) = bounds else {
            return Err(KindredError::projection(
                "planar projector requires 2-axis bounds",
            ));
        };
        Ok(Self {
            scale_x: LinearScale::new((x.min, x.max), region.x_range()),
            scale_y: LinearScale::new((y.min, y.max), region.y_range()),
            view,
        })
    }
}

impl Projector for PlanarProjector {
    fn project(&self, coord: &Coord) -> Option<Point> {
        let Coord::Planar { x, y } = coord else {
            return None;
        };
        let base = Point::new(self.scale_x.map(*x), self.scale_y.map(*y));
        Some(self.view.apply(base))
    }
}

/// 3D projector: normalizes the frozen bounds box to a world cube centered
/// on the origin, then projects through the orbit camera.
#[derive(Clone, Debug)]
pub struct SpatialProjector {
    bounds: [crate::projection::bounds::AxisExtent; 3],
    camera: OrbitCamera,
    viewport: CanvasSize,
}

impl SpatialProjector {
    /// Build a projector for spatial bounds.
    pub fn new(bounds: &Bounds, camera: OrbitCamera, viewport: CanvasSize) -> KindredResult<Self> {
        let Bounds::Spatial(axes) = bounds else {
            return Err(KindredError::projection(
                "spatial projector requires 3-axis bounds",
            ));
        };
        Ok(Self {
            bounds: *axes,
            camera,
            viewport,
        })
    }

    fn normalize(&self, coord: &Coord) -> Vec3 {
        let axis = |i: usize| {
            let extent = self.bounds[i];
            2.0 * (coord.axis(i) - extent.min) / extent.span() - 1.0
        };
        Vec3::new(axis(0), axis(1), axis(2))
    }
}

impl Projector for SpatialProjector {
    fn project(&self, coord: &Coord) -> Option<Point> {
        if coord.dim() != SceneDim::Spatial {
            return None;
        }
        self.camera.project(self.normalize(coord), self.viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/project.rs"]
mod tests;
