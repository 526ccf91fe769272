use crate::foundation::error::{KindredError, KindredResult};

pub use kurbo::{Affine, BezPath, Point, QuadBez, Rect, Vec2};

/// Stable identifier of one artifact on the canvas. Ids are never reused;
/// removing an artifact hides it instead of freeing its id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a history group (one generation or load operation).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    /// Build a group id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coordinate-space arity of a canvas session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SceneDim {
    /// Two semantic axes.
    Planar,
    /// Three semantic axes.
    Spatial,
}

impl SceneDim {
    /// Number of axes.
    pub fn axes(self) -> usize {
        match self {
            Self::Planar => 2,
            Self::Spatial => 3,
        }
    }
}

/// A data-space position, tagged with its arity. All nodes of one scene share
/// one arity for the lifetime of the session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Coord {
    /// 2D position.
    Planar {
        /// First semantic axis.
        x: f64,
        /// Second semantic axis.
        y: f64,
    },
    /// 3D position.
    Spatial {
        /// First semantic axis.
        x: f64,
        /// Second semantic axis.
        y: f64,
        /// Third semantic axis.
        z: f64,
    },
}

impl Coord {
    /// Parse a coordinate from a wire-format slice of 2 or 3 finite values.
    pub fn from_slice(values: &[f64]) -> KindredResult<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(KindredError::validation("coordinates must be finite"));
        }
        match values {
            [x, y] => Ok(Self::Planar { x: *x, y: *y }),
            [x, y, z] => Ok(Self::Spatial {
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => Err(KindredError::validation(format!(
                "coordinates must have 2 or 3 components, got {}",
                values.len()
            ))),
        }
    }

    /// Arity of this coordinate.
    pub fn dim(self) -> SceneDim {
        match self {
            Self::Planar { .. } => SceneDim::Planar,
            Self::Spatial { .. } => SceneDim::Spatial,
        }
    }

    /// Value along axis `i` (0-based). Axes past the arity read as `0.0`.
    pub fn axis(self, i: usize) -> f64 {
        match (self, i) {
            (Self::Planar { x, .. } | Self::Spatial { x, .. }, 0) => x,
            (Self::Planar { y, .. } | Self::Spatial { y, .. }, 1) => y,
            (Self::Spatial { z, .. }, 2) => z,
            _ => 0.0,
        }
    }
}

/// Drawable surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Center point of the surface.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Copy of this color with alpha scaled by `factor` in `[0, 1]`.
    pub fn with_alpha(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}
