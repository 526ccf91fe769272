use crate::foundation::core::{Point, Vec2};

/// Zoom scale limits for the planar viewport.
const MIN_SCALE: f64 = 0.05;
const MAX_SCALE: f64 = 40.0;

/// User-driven pan/zoom transform of the planar canvas.
///
/// The transform is orthogonal to the data bounds: it lives outside the
/// rebuilt geometry and is reapplied through the projector on every
/// structural rebuild, so a full rebuild never resets the user's zoom or
/// pan to identity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewTransform {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Screen-space translation in pixels.
    pub translate: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Whether this transform leaves points unchanged.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate == Vec2::ZERO
    }

    /// Map a base drawable point to its on-screen position.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate.x,
            p.y * self.scale + self.translate.y,
        )
    }

    /// Map an on-screen position back to base drawable space.
    pub fn invert(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.translate.x) / self.scale,
            (p.y - self.translate.y) / self.scale,
        )
    }

    /// Translate the viewport by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Zoom by `factor` keeping the screen-space `anchor` point fixed
    /// (typically the cursor position).
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        let next = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = next / self.scale;
        self.translate = anchor.to_vec2() + (self.translate - anchor.to_vec2()) * applied;
        self.scale = next;
    }
}
