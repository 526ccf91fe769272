use super::*;
use crate::foundation::core::{CanvasSize, Coord};
use crate::projection::bounds::{AxisExtent, Bounds};
use crate::viewport::camera::OrbitCamera;

fn region() -> DrawRegion {
    DrawRegion {
        size: CanvasSize {
            width: 1200,
            height: 600,
        },
        margin: 48.0,
    }
}

fn unit_bounds() -> Bounds {
    Bounds::Planar([
        AxisExtent { min: 0.0, max: 1.0 },
        AxisExtent { min: 0.0, max: 1.0 },
    ])
}

#[test]
fn corners_map_to_draw_region_edges() {
    let projector = PlanarProjector::new(&unit_bounds(), region(), ViewTransform::identity())
        .unwrap();
    let low = projector
        .project(&Coord::Planar { x: 0.0, y: 0.0 })
        .unwrap();
    let high = projector
        .project(&Coord::Planar { x: 1.0, y: 1.0 })
        .unwrap();
    // Data y grows upward, screen y downward.
    assert_eq!(low, kurbo::Point::new(48.0, 552.0));
    assert_eq!(high, kurbo::Point::new(1152.0, 48.0));
}

#[test]
fn projection_is_pixel_exact_for_unchanged_bounds() {
    let coord = Coord::Planar { x: 0.37, y: 0.81 };
    let a = PlanarProjector::new(&unit_bounds(), region(), ViewTransform::identity()).unwrap();
    let b = PlanarProjector::new(&unit_bounds(), region(), ViewTransform::identity()).unwrap();
    assert_eq!(a.project(&coord), b.project(&coord));
}

#[test]
fn view_transform_composes_after_scales() {
    let mut view = ViewTransform::identity();
    view.pan(kurbo::Vec2::new(100.0, -20.0));
    let plain = PlanarProjector::new(&unit_bounds(), region(), ViewTransform::identity()).unwrap();
    let panned = PlanarProjector::new(&unit_bounds(), region(), view).unwrap();
    let coord = Coord::Planar { x: 0.5, y: 0.5 };
    let base = plain.project(&coord).unwrap();
    let moved = panned.project(&coord).unwrap();
    assert_eq!(moved, kurbo::Point::new(base.x + 100.0, base.y - 20.0));
}

#[test]
fn planar_projector_rejects_spatial_bounds() {
    let bounds = Bounds::Spatial([AxisExtent { min: 0.0, max: 1.0 }; 3]);
    assert!(PlanarProjector::new(&bounds, region(), ViewTransform::identity()).is_err());
}

#[test]
fn arity_mismatch_is_not_drawable() {
    let projector =
        PlanarProjector::new(&unit_bounds(), region(), ViewTransform::identity()).unwrap();
    let spatial = Coord::Spatial {
        x: 0.5,
        y: 0.5,
        z: 0.5,
    };
    assert!(projector.project(&spatial).is_none());
}

#[test]
fn spatial_center_projects_to_viewport_center() {
    let bounds = Bounds::Spatial([AxisExtent { min: -1.0, max: 1.0 }; 3]);
    let size = CanvasSize {
        width: 800,
        height: 600,
    };
    let projector = SpatialProjector::new(&bounds, OrbitCamera::default(), size).unwrap();
    // The bounds center normalizes to the world origin, which the default
    // camera looks straight at.
    let center = projector
        .project(&Coord::Spatial {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        })
        .unwrap();
    assert!((center.x - 400.0).abs() < 1e-6);
    assert!((center.y - 300.0).abs() < 1e-6);
}

#[test]
fn points_behind_the_camera_are_skipped() {
    let bounds = Bounds::Spatial([AxisExtent { min: -1.0, max: 1.0 }; 3]);
    let size = CanvasSize {
        width: 800,
        height: 600,
    };
    let projector = SpatialProjector::new(&bounds, OrbitCamera::default(), size).unwrap();
    // Far along the eye direction, well outside the normalized cube.
    let behind = Coord::Spatial {
        x: 1000.0,
        y: 800.0,
        z: 1500.0,
    };
    assert!(projector.project(&behind).is_none());
}
