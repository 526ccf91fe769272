use crate::foundation::core::{Coord, SceneDim};

/// Padding applied when bounds are computed from node extents.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundsConfig {
    /// Fraction of each axis span added on both sides.
    pub padding_frac: f64,
    /// Minimum absolute padding, keeping a zero-span axis non-degenerate.
    pub padding_floor: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            padding_frac: 0.1,
            padding_floor: 0.05,
        }
    }
}

/// Closed interval of one data axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisExtent {
    /// Lower edge.
    pub min: f64,
    /// Upper edge.
    pub max: f64,
}

impl AxisExtent {
    /// Interval length.
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Concrete data-space bounds, one extent per axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Bounds {
    /// 2D rectangle.
    Planar([AxisExtent; 2]),
    /// 3D box.
    Spatial([AxisExtent; 3]),
}

impl Bounds {
    /// Extents in axis order.
    pub fn axes(&self) -> &[AxisExtent] {
        match self {
            Self::Planar(a) => a,
            Self::Spatial(a) => a,
        }
    }

    /// Arity of these bounds.
    pub fn dim(&self) -> SceneDim {
        match self {
            Self::Planar(_) => SceneDim::Planar,
            Self::Spatial(_) => SceneDim::Spatial,
        }
    }
}

/// Data-space bounds that freeze once computed.
///
/// While frozen, structural passes reuse the stored bounds verbatim no
/// matter how many nodes were added or hidden since; a new node may render
/// outside the nominal padding area rather than silently rescaling every
/// previously plotted node. Appending an artifact after the user has zoomed
/// around must not shift anything they already placed in spatial memory.
/// Only [`StableBounds::invalidate`] (the axis-change path) re-opens the
/// computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StableBounds {
    current: Option<Bounds>,
}

/// Extent used per axis when a scene has no visible nodes yet.
const EMPTY_SCENE_EXTENT: AxisExtent = AxisExtent {
    min: -10.0,
    max: 10.0,
};

impl StableBounds {
    /// Unresolved bounds; the first resolve computes from node extents.
    pub fn new() -> Self {
        Self::default()
    }

    /// The frozen bounds, if any.
    pub fn get(&self) -> Option<&Bounds> {
        self.current.as_ref()
    }

    /// Whether the next structural pass will recompute from node extents.
    pub fn is_invalidated(&self) -> bool {
        self.current.is_none()
    }

    /// Drop the frozen bounds so the next resolve recomputes them. This is
    /// the required first step of an axis change: stale bounds reused
    /// against a recomputed coordinate distribution render scaled wrong.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Return the frozen bounds, computing them from `coords` first if
    /// invalidated. `dim` decides the arity when `coords` is empty.
    pub fn resolve(&mut self, dim: SceneDim, coords: &[Coord], cfg: &BoundsConfig) -> &Bounds {
        &*self
            .current
            .get_or_insert_with(|| compute_bounds(dim, coords, cfg))
    }
}

fn compute_bounds(dim: SceneDim, coords: &[Coord], cfg: &BoundsConfig) -> Bounds {
    let extent_for = |axis: usize| {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for c in coords {
            let v = c.axis(axis);
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return EMPTY_SCENE_EXTENT;
        }
        let padding = ((max - min) * cfg.padding_frac).max(cfg.padding_floor);
        AxisExtent {
            min: min - padding,
            max: max + padding,
        }
    };

    match dim {
        SceneDim::Planar => Bounds::Planar([extent_for(0), extent_for(1)]),
        SceneDim::Spatial => Bounds::Spatial([extent_for(0), extent_for(1), extent_for(2)]),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/bounds.rs"]
mod tests;
