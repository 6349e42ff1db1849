//! Camera description shared with the renderer.
//!
//! Kept free of platform APIs so the web frontend and tests can build the same
//! matrices.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up vectors, used to expand points into
    /// camera-facing quads.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// Pointer-driven orbit around a fixed target, with zoom and a clamped polar
/// angle. Drags are damped: they accumulate as pending motion that `step`
/// bleeds into the camera over the following frames.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_eye(camera_eye_vec3(), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            FRAC_PI_2
        };
        Self {
            target,
            radius: radius.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
            azimuth: offset.x.atan2(offset.z),
            polar: polar.clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Queue a drag of (`dx`, `dy`) pixels on a viewport `height` pixels tall.
    /// A full viewport height of travel is one full turn.
    pub fn drag(&mut self, dx: f32, dy: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        self.pending_azimuth -= TAU * dx / height;
        self.pending_polar -= TAU * dy / height;
    }

    /// Wheel input: negative `delta_y` zooms in, positive zooms out.
    pub fn zoom(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.pending_scale *= ORBIT_ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.pending_scale /= ORBIT_ZOOM_STEP;
        }
    }

    pub fn step(&mut self, dt_sec: f32) {
        let k = (ORBIT_DAMPING * dt_sec * 60.0).clamp(0.0, 1.0);
        self.azimuth += self.pending_azimuth * k;
        self.pending_azimuth *= 1.0 - k;

        let polar = self.polar + self.pending_polar * k;
        self.polar = polar.clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR);
        if self.polar != polar {
            self.pending_polar = 0.0;
        } else {
            self.pending_polar *= 1.0 - k;
        }

        self.radius = (self.radius * self.pending_scale).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        self.pending_scale = 1.0;
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * s * self.azimuth.cos(),
            )
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }
}
