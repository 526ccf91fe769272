use crate::foundation::core::{CanvasSize, Point};
use crate::viewport::ease::Ease;

/// Snap-to-plane flight time in seconds.
pub const SNAP_DURATION_SECS: f64 = 1.0;

/// Field of view used for the snapped, pseudo-orthographic look. Narrowing
/// the frustum this far (with distance compensation) flattens perspective
/// without a separate orthographic camera type.
pub const PSEUDO_ORTHO_FOV: f64 = 0.03;

/// Default free-orbit field of view.
const DEFAULT_FOV: f64 = std::f64::consts::FRAC_PI_4;

/// Minimum angular distance from the orbit poles.
const POLE_MARGIN: f64 = 0.08;

/// Camera distance limits from the target, in world-cube units.
const MIN_DISTANCE: f64 = 0.4;
const MAX_DISTANCE: f64 = 60.0;

/// Points closer than this to the eye plane are not drawable.
const NEAR: f64 = 1e-3;

/// Minimal 3D vector for camera math.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Unit Y (world up in free orbit).
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    /// Cross product.
    pub fn cross(self, o: Self) -> Self {
        Self::new(
            self.y * o.z - self.z * o.y,
            self.z * o.x - self.x * o.z,
            self.x * o.y - self.y * o.x,
        )
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a degenerate input.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len > 1e-12).then(|| self * (1.0 / len))
    }

    /// Componentwise interpolation with clamped `t`.
    pub fn lerp(self, o: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        self + (o - self) * t
    }

    /// Rotate around a unit `axis` by `angle` radians (Rodrigues).
    fn rotated_about(self, axis: Self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        self * cos + axis.cross(self) * sin + axis * (axis.dot(self) * (1.0 - cos))
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Full camera state: position, orientation, and frustum width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
}

impl CameraPose {
    /// Interpolate toward another pose with clamped `t`.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            eye: self.eye.lerp(to.eye, t),
            target: self.target.lerp(to.target, t),
            up: self.up.lerp(to.up, t).normalized().unwrap_or(to.up),
            fov_y: self.fov_y + (to.fov_y - self.fov_y) * t.clamp(0.0, 1.0),
        }
    }
}

/// Axis-aligned viewing plane of the normalized world cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SnapPlane {
    /// Front view along +Z.
    Xy,
    /// Top view along +Y.
    Xz,
    /// Side view along +X.
    Yz,
}

/// Free-orbit camera around a target point, owning the user's 3D viewpoint.
///
/// Like the planar transform, the camera is orthogonal to the data bounds
/// and persists across structural rebuilds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitCamera {
    pose: CameraPose,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            pose: CameraPose {
                eye: Vec3::new(2.2, 1.6, 3.1),
                target: Vec3::default(),
                up: Vec3::Y,
                fov_y: DEFAULT_FOV,
            },
        }
    }
}

impl OrbitCamera {
    /// Current camera pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Replace the pose outright (animation sampling path).
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Rotate the eye around the target: `dyaw` about world up, `dpitch`
    /// about the camera's right axis. Pitch stops short of the poles so the
    /// view never flips. Orbiting re-levels the up direction.
    pub fn orbit(&mut self, dyaw: f64, dpitch: f64) {
        self.pose.up = Vec3::Y;
        let mut offset = self.pose.eye - self.pose.target;
        offset = offset.rotated_about(Vec3::Y, dyaw);

        if let Some(right) = Vec3::Y.cross(offset).normalized() {
            let candidate = offset.rotated_about(right, dpitch);
            if let Some(dir) = candidate.normalized() {
                let polar = dir.dot(Vec3::Y).clamp(-1.0, 1.0).acos();
                if (POLE_MARGIN..=std::f64::consts::PI - POLE_MARGIN).contains(&polar) {
                    offset = candidate;
                }
            }
        }
        self.pose.eye = self.pose.target + offset;
    }

    /// Move the eye along the view direction by `factor` (< 1 zooms in),
    /// clamped to sane distances.
    pub fn dolly(&mut self, factor: f64) {
        let offset = self.pose.eye - self.pose.target;
        let distance = (offset.length() * factor.max(0.0)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        if let Some(dir) = offset.normalized() {
            self.pose.eye = self.pose.target + dir * distance;
        }
    }

    /// Perspective-project a world point to screen pixels, or `None` when
    /// the point lies at or behind the eye plane.
    pub fn project(&self, world: Vec3, viewport: CanvasSize) -> Option<Point> {
        let forward = (self.pose.target - self.pose.eye).normalized()?;
        let side = forward.cross(self.pose.up).normalized()?;
        let up = side.cross(forward);

        let rel = world - self.pose.eye;
        let depth = rel.dot(forward);
        if depth <= NEAR {
            return None;
        }

        let half_tan = (self.pose.fov_y * 0.5).tan();
        let half_height = f64::from(viewport.height) * 0.5;
        let center = viewport.center();
        Some(Point::new(
            center.x + rel.dot(side) / (depth * half_tan) * half_height,
            center.y - rel.dot(up) / (depth * half_tan) * half_height,
        ))
    }

    /// Target pose for snapping onto an axis-aligned plane. The frustum is
    /// narrowed to [`PSEUDO_ORTHO_FOV`] and the distance grown to keep the
    /// apparent size of the scene unchanged.
    pub fn snap_target(&self, plane: SnapPlane) -> CameraPose {
        let distance = (self.pose.eye - self.pose.target).length().max(MIN_DISTANCE);
        let compensated = distance * (self.pose.fov_y * 0.5).tan() / (PSEUDO_ORTHO_FOV * 0.5).tan();
        let (normal, up) = match plane {
            SnapPlane::Xy => (Vec3::new(0.0, 0.0, 1.0), Vec3::Y),
            SnapPlane::Xz => (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            SnapPlane::Yz => (Vec3::new(1.0, 0.0, 0.0), Vec3::Y),
        };
        CameraPose {
            eye: self.pose.target + normal * compensated,
            target: self.pose.target,
            up,
            fov_y: PSEUDO_ORTHO_FOV,
        }
    }
}

/// Camera flight toward an explicit target pose.
///
/// The animation is a plain finite-state timer: start time, fixed duration,
/// easing curve. Callers inject the clock, sample per frame, and cancel by
/// replacing the whole animation with a new target.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SnapAnimation {
    from: CameraPose,
    to: CameraPose,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl SnapAnimation {
    /// Flight from `from` to `to` starting at `start` seconds.
    pub fn new(from: CameraPose, to: CameraPose, start: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration: SNAP_DURATION_SECS,
            ease: Ease::InOutCubic,
        }
    }

    /// Destination pose.
    pub fn target(&self) -> &CameraPose {
        &self.to
    }

    /// Pose at time `now`, clamped to the endpoints. A finished flight
    /// lands on the target pose exactly.
    pub fn sample(&self, now: f64) -> CameraPose {
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.ease.apply(t))
    }

    /// Whether the flight has reached its destination at time `now`.
    pub fn finished(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/camera.rs"]
mod tests;
