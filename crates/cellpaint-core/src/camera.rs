//! Perspective camera and a small orbit rig around the grid.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::*;
use crate::raycast::Ray;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera looking down -z with a centered field of `field` real units
    /// fully in view.
    pub fn for_grid(field: Vec2, aspect: f32) -> Self {
        let fovy_radians = CAMERA_FOV_DEGREES.to_radians();
        let half_tan = (fovy_radians * 0.5).tan();
        let aspect_fit = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let fit_height = field.y * 0.5 / half_tan;
        let fit_width = field.x * 0.5 / (half_tan * aspect_fit);
        let fit = fit_height.max(fit_width) * VIEW_MARGIN;
        let distance = fit.max(ORBIT_MIN_DISTANCE + CAMERA_NEAR);
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear: CAMERA_NEAR,
            zfar: distance * CAMERA_FAR_MULTIPLIER + field.length(),
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns false (and keeps the old value) for degenerate aspects.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if !aspect.is_finite() || aspect <= 0.0 || aspect == self.aspect {
            return false;
        }
        self.aspect = aspect;
        true
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// Unprojects the point on the near (depth 0) and far (depth 1) planes.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(p0, p1 - p0)
    }
}

/// Yaw/pitch/distance orbit around a target. Disabled while a paint gesture
/// owns the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub max_distance: f32,
    pub enabled: bool,
}

impl OrbitControls {
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().max(ORBIT_MIN_DISTANCE);
        Self {
            target: camera.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            max_distance: (camera.zfar * 0.5).max(distance),
            enabled: ENABLE_ORBIT_CONTROLS,
        }
    }

    /// Rotate by a pointer drag in pixels. Returns whether anything moved.
    pub fn rotate(&mut self, delta_px: Vec2) -> bool {
        if !self.enabled || delta_px == Vec2::ZERO {
            return false;
        }
        self.yaw -= delta_px.x * ORBIT_RADIANS_PER_PIXEL;
        self.pitch = (self.pitch + delta_px.y * ORBIT_RADIANS_PER_PIXEL)
            .clamp(ORBIT_MIN_PITCH, ORBIT_MAX_PITCH);
        true
    }

    /// Move toward (negative) or away from (positive) the target.
    pub fn dolly(&mut self, delta_real: f32) -> bool {
        if !self.enabled || delta_real == 0.0 || !delta_real.is_finite() {
            return false;
        }
        self.distance = (self.distance + delta_real).clamp(ORBIT_MIN_DISTANCE, self.max_distance);
        true
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}
