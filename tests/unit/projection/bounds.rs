use super::*;
use crate::foundation::core::{Coord, SceneDim};

fn planar(points: &[(f64, f64)]) -> Vec<Coord> {
    points.iter().map(|&(x, y)| Coord::Planar { x, y }).collect()
}

#[test]
fn padding_is_fraction_of_span() {
    let mut bounds = StableBounds::new();
    let coords = planar(&[(0.0, -2.0), (10.0, 2.0)]);
    let resolved = bounds.resolve(SceneDim::Planar, &coords, &BoundsConfig::default());
    let [x, y] = match resolved {
        Bounds::Planar(axes) => *axes,
        Bounds::Spatial(_) => panic!("expected planar bounds"),
    };
    assert_eq!(x.min, -1.0);
    assert_eq!(x.max, 11.0);
    assert_eq!(y.min, -2.4);
    assert_eq!(y.max, 2.4);
}

#[test]
fn floor_keeps_single_node_scene_non_degenerate() {
    let mut bounds = StableBounds::new();
    let coords = planar(&[(3.0, 3.0)]);
    let resolved = bounds.resolve(SceneDim::Planar, &coords, &BoundsConfig::default());
    for axis in resolved.axes() {
        assert!(axis.span() > 0.0);
        assert_eq!(axis.span(), 0.1);
    }
}

#[test]
fn frozen_bounds_ignore_later_growth() {
    let mut bounds = StableBounds::new();
    let cfg = BoundsConfig::default();
    let first = *bounds.resolve(SceneDim::Planar, &planar(&[(0.0, 0.0), (1.0, 1.0)]), &cfg);
    // A far-away node arrives; the frozen bounds must be reused verbatim.
    let grown = planar(&[(0.0, 0.0), (1.0, 1.0), (500.0, -500.0)]);
    let second = *bounds.resolve(SceneDim::Planar, &grown, &cfg);
    assert_eq!(first, second);
}

#[test]
fn invalidate_reopens_computation() {
    let mut bounds = StableBounds::new();
    let cfg = BoundsConfig::default();
    bounds.resolve(SceneDim::Planar, &planar(&[(0.0, 0.0), (1.0, 1.0)]), &cfg);
    assert!(!bounds.is_invalidated());
    bounds.invalidate();
    assert!(bounds.is_invalidated());
    assert!(bounds.get().is_none());
    let recomputed = *bounds.resolve(SceneDim::Planar, &planar(&[(-5.0, -5.0), (5.0, 5.0)]), &cfg);
    assert_eq!(recomputed.axes()[0].min, -6.0);
}

#[test]
fn empty_scene_gets_default_extent() {
    let mut bounds = StableBounds::new();
    let resolved = bounds.resolve(SceneDim::Spatial, &[], &BoundsConfig::default());
    assert_eq!(resolved.dim(), SceneDim::Spatial);
    for axis in resolved.axes() {
        assert_eq!((axis.min, axis.max), (-10.0, 10.0));
    }
}

#[test]
fn hidden_heavy_scenes_still_pad_each_axis_independently() {
    let mut bounds = StableBounds::new();
    let coords = planar(&[(0.0, 100.0), (1.0, 100.0)]);
    let resolved = bounds.resolve(SceneDim::Planar, &coords, &BoundsConfig::default());
    let axes = resolved.axes();
    // x span 1.0 -> fractional padding; y span 0 -> floor padding.
    assert!((axes[0].span() - 1.2).abs() < 1e-12);
    assert!((axes[1].span() - 0.1).abs() < 1e-12);
}
