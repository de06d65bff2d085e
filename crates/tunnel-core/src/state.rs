//! Visual-side state types shared with the web frontend.
//!
//! These types intentionally avoid referencing platform-specific APIs. The
//! renderer consumes the camera to build its matrices; the aspect ratio is
//! supplied by the backend since only it knows the surface size.

use crate::config::CameraConfig;
use crate::path::Curve;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, config.z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: config.fovy_radians,
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Sway the eye with the smoothed pointer (small fixed amplitude) and
    /// look a little way down the curve.
    pub fn follow(&mut self, config: &CameraConfig, smoothed_pointer: Vec2, curve: &Curve<'_>) {
        let sway = Vec2::new(smoothed_pointer.x - 0.5, 0.5 - smoothed_pointer.y)
            * 2.0
            * config.pointer_amplitude;
        self.eye = Vec3::new(sway.x, sway.y, config.z);
        self.target = curve.point_at(config.look_ahead_t);
    }
}
