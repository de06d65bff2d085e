//! Tunnel centerline: a fixed set of control points, some of which chase the
//! pointer, and a Catmull-Rom curve evaluated over them.

use crate::config::PathConfig;
use crate::constants::PATH_POINT_COUNT;
use glam::{Vec2, Vec3};

/// Interior points re-derived from the pointer each frame.
const POINTER_DRIVEN: std::ops::RangeInclusive<usize> = 2..=4;

#[derive(Clone, Debug)]
pub struct PathModel {
    config: PathConfig,
    rest: [Vec3; PATH_POINT_COUNT],
    points: [Vec3; PATH_POINT_COUNT],
    smoothed_pointer: Vec2,
}

impl PathModel {
    /// Points start evenly spaced on a straight line from `near_z` to `far_z`.
    pub fn new(config: &PathConfig) -> Self {
        let mut rest = [Vec3::ZERO; PATH_POINT_COUNT];
        let last = (PATH_POINT_COUNT - 1) as f32;
        for (i, p) in rest.iter_mut().enumerate() {
            let f = i as f32 / last;
            p.z = config.near_z + (config.far_z - config.near_z) * f;
        }
        Self {
            config: config.clone(),
            rest,
            points: rest,
            smoothed_pointer: Vec2::splat(0.5),
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Pointer ratio after the same damping the control points receive.
    pub fn smoothed_pointer(&self) -> Vec2 {
        self.smoothed_pointer
    }

    /// Where the pointer-driven points are heading for a pointer ratio.
    pub fn target_for(&self, pointer: Vec2) -> [Vec3; PATH_POINT_COUNT] {
        let mut targets = self.rest;
        let centered = Vec2::new(pointer.x - 0.5, 0.5 - pointer.y) * 2.0;
        for i in POINTER_DRIVEN {
            let amp = self.config.pointer_amplitude[i - *POINTER_DRIVEN.start()];
            targets[i].x += centered.x * amp;
            targets[i].y += centered.y * amp;
            if i == self.config.floor_bias_index {
                targets[i].y += self.config.floor_bias;
            }
        }
        targets
    }

    /// Damped pursuit of the pointer target. Non-finite input is ignored for
    /// the frame; out-of-range ratios are accepted and simply deflect more.
    pub fn update_from_pointer(&mut self, pointer: Vec2, dt_sec: f32) {
        if !pointer.is_finite() || !dt_sec.is_finite() {
            return;
        }
        let alpha = 1.0 - (-dt_sec.max(0.0) / self.config.smoothing_tau_sec).exp();
        self.smoothed_pointer += (pointer - self.smoothed_pointer) * alpha;
        let targets = self.target_for(pointer);
        for i in POINTER_DRIVEN {
            self.points[i] += (targets[i] - self.points[i]) * alpha;
        }
    }

    pub fn curve(&self) -> Option<Curve<'_>> {
        Curve::new(&self.points)
    }
}

/// Uniform Catmull-Rom spline through a borrowed point list. End segments
/// use mirrored phantom points so the curve passes through both endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Curve<'a> {
    points: &'a [Vec3],
}

impl<'a> Curve<'a> {
    /// `None` when there are too few points to span a segment.
    pub fn new(points: &'a [Vec3]) -> Option<Self> {
        (points.len() >= 2 && points.iter().all(|p| p.is_finite())).then_some(Self { points })
    }

    fn segment(&self, t: f32) -> (usize, f32) {
        let segments = self.points.len() - 1;
        let s = t.clamp(0.0, 1.0) * segments as f32;
        let i = (s.floor() as usize).min(segments - 1);
        (i, s - i as f32)
    }

    fn controls(&self, i: usize) -> [Vec3; 4] {
        let n = self.points.len();
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i == 0 { 2.0 * p1 - p2 } else { self.points[i - 1] };
        let p3 = if i + 2 < n {
            self.points[i + 2]
        } else {
            2.0 * p2 - p1
        };
        [p0, p1, p2, p3]
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        let (i, u) = self.segment(t);
        let [p0, p1, p2, p3] = self.controls(i);
        let u2 = u * u;
        let u3 = u2 * u;
        0.5 * (2.0 * p1
            + (p2 - p0) * u
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
    }

    /// Unit tangent pointing from the mouth toward the far end.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (i, u) = self.segment(t);
        let [p0, p1, p2, p3] = self.controls(i);
        let d = 0.5
            * ((p2 - p0)
                + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u
                + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * u * u);
        d.try_normalize().unwrap_or(Vec3::NEG_Z)
    }
}
