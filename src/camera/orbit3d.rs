use glamx::{Mat4, Pose3, Vec2, Vec3};
use std::f32;

/// Lower clamp of the zoom factor.
pub const ZOOM_MIN: f32 = 0.2;
/// Upper clamp of the zoom factor.
pub const ZOOM_MAX: f32 = 5.0;

/// Per-frame smoothing applied to the pointer-driven orientation.
const ORBIT_EASING: f32 = 0.05;
/// Per-frame smoothing applied to the camera distance.
const DISTANCE_EASING: f32 = 0.1;
/// Wheel sensitivity: one wheel step scales the zoom factor by this ratio.
const WHEEL_STEP: f32 = 0.1;
/// How far the pointer can pitch the orbit, in radians.
const PITCH_RANGE: f32 = 1.2;
/// How far the pointer can yaw the orbit, in radians.
const YAW_RANGE: f32 = f32::consts::PI;

/// The laboratory camera: a perspective orbit around the origin whose
/// orientation follows the pointer and whose distance follows a clamped
/// zoom factor, both with exponential easing — the camera never snaps.
///
/// Inputs ([`set_pointer`](OrbitCamera3d::set_pointer),
/// [`apply_wheel`](OrbitCamera3d::apply_wheel)) only move targets;
/// [`ease`](OrbitCamera3d::ease) advances the actual pose one frame.
#[derive(Clone, Debug)]
pub struct OrbitCamera3d {
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,

    distance: f32,
    base_distance: f32,
    zoom_factor: f32,

    fov: f32,
    znear: f32,
    zfar: f32,
    aspect: f32,
    proj: Mat4,
    view: Mat4,
}

impl OrbitCamera3d {
    /// Creates the camera at `base_distance` from the origin.
    ///
    /// Default frustum: 45° field of view, near plane at 1.0, far plane at
    /// 10 000 (the laboratory works in hundreds of units).
    pub fn new(base_distance: f32) -> OrbitCamera3d {
        let mut res = OrbitCamera3d {
            yaw: 0.0,
            pitch: 0.25,
            target_yaw: 0.0,
            target_pitch: 0.25,
            distance: base_distance,
            base_distance,
            zoom_factor: 1.0,
            fov: f32::consts::PI / 4.0,
            znear: 1.0,
            zfar: 10_000.0,
            aspect: 800.0 / 600.0,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };

        res.update_projviews();
        res
    }

    /// Retargets the orbit from a pointer position normalized to [-1, 1]².
    /// Last writer wins; the pose catches up over the following frames.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.target_yaw = pointer.x * YAW_RANGE;
        self.target_pitch = (pointer.y * PITCH_RANGE).clamp(-PITCH_RANGE, PITCH_RANGE);
    }

    /// Applies one wheel step. Positive steps zoom out. The zoom factor is
    /// clamped to [[`ZOOM_MIN`], [`ZOOM_MAX`]] no matter how much cumulative
    /// input arrives.
    pub fn apply_wheel(&mut self, steps: f32) {
        self.zoom_factor = (self.zoom_factor * (1.0 + steps * WHEEL_STEP)).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// The current zoom factor.
    #[inline]
    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    /// The current eased distance from the origin.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Updates the projection for a new viewport size.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
        self.update_projviews();
    }

    /// Advances orientation and distance one frame toward their targets.
    pub fn ease(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * ORBIT_EASING;
        self.pitch += (self.target_pitch - self.pitch) * ORBIT_EASING;

        let target_distance = self.base_distance * self.zoom_factor;
        self.distance += (target_distance - self.distance) * DISTANCE_EASING;

        self.update_projviews();
    }

    /// The camera's position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        )
    }

    /// The view matrix.
    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// The projection matrix.
    #[inline]
    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    fn update_projviews(&mut self) {
        self.view = Pose3::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y).to_mat4();
        self.proj = Mat4::perspective_rh_gl(self.fov, self.aspect, self.znear, self.zfar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_input_never_escapes_the_zoom_clamp() {
        let mut camera = OrbitCamera3d::new(900.0);
        for _ in 0..10_000 {
            camera.apply_wheel(3.0);
        }
        assert!(camera.zoom_factor() <= ZOOM_MAX);
        for _ in 0..10_000 {
            camera.apply_wheel(-3.0);
        }
        assert!(camera.zoom_factor() >= ZOOM_MIN);
    }

    #[test]
    fn distance_eases_toward_the_zoom_target() {
        let mut camera = OrbitCamera3d::new(900.0);
        camera.apply_wheel(10.0);
        let target = 900.0 * camera.zoom_factor();
        let mut prev_gap = (camera.distance() - target).abs();
        for _ in 0..200 {
            camera.ease();
            let gap = (camera.distance() - target).abs();
            assert!(gap <= prev_gap + 1e-4);
            prev_gap = gap;
        }
        assert!(prev_gap < 1.0);
    }

    #[test]
    fn orientation_follows_the_pointer_without_snapping() {
        let mut camera = OrbitCamera3d::new(900.0);
        camera.set_pointer(Vec2::new(1.0, 0.0));
        let yaw_before = camera.yaw;
        camera.ease();
        assert!(camera.yaw > yaw_before);
        assert!(camera.yaw < camera.target_yaw);
    }

    #[test]
    fn matrices_stay_finite() {
        let mut camera = OrbitCamera3d::new(900.0);
        camera.set_pointer(Vec2::new(-1.0, 1.0));
        for _ in 0..50 {
            camera.ease();
        }
        assert!(camera.view().to_cols_array().iter().all(|v| v.is_finite()));
        assert!(camera.proj().to_cols_array().iter().all(|v| v.is_finite()));
    }
}
