//! Ring-by-ring tube geometry. Topology is built once; every frame the
//! positions are re-derived from the curve, the shape sequence and time.

use crate::config::{GeometryConfig, LayerProfile};
use crate::path::Curve;
use crate::shapes::{polygon_radius, ShapeSequence};
use glam::Vec3;
use std::f32::consts::TAU;

/// Seed for the per-ring frame; must not be parallel to the tangent.
const FRAME_UP: Vec3 = Vec3::Y;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Outer,
    Inner,
}

/// One nested tube: `(ring_count + 1) * radial_segments` vertices whose
/// count never changes after construction.
#[derive(Clone, Debug)]
pub struct TubeLayer {
    kind: LayerKind,
    profile: LayerProfile,
    ring_count: usize,
    radial_segments: usize,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    indices: Vec<u32>,
    opacity: f32,
}

impl TubeLayer {
    pub fn new(
        kind: LayerKind,
        profile: LayerProfile,
        ring_count: usize,
        radial_segments: usize,
    ) -> Self {
        let vertex_count = (ring_count + 1) * radial_segments;
        Self {
            kind,
            profile,
            ring_count,
            radial_segments,
            positions: vec![[0.0; 3]; vertex_count],
            colors: vec![[0.0; 3]; vertex_count],
            indices: quad_strip_indices(ring_count, radial_segments),
            opacity: 0.0,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn profile(&self) -> &LayerProfile {
        &self.profile
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(crate) fn positions_and_colors_mut(&mut self) -> (&[[f32; 3]], &mut [[f32; 3]]) {
        (&self.positions, &mut self.colors)
    }
}

/// Two triangles per quad between neighbouring rings, wrapping at the seam.
pub fn quad_strip_indices(ring_count: usize, radial_segments: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(ring_count * radial_segments * 6);
    for i in 0..ring_count {
        for j in 0..radial_segments {
            let j1 = (j + 1) % radial_segments;
            let a = (i * radial_segments + j) as u32;
            let b = (i * radial_segments + j1) as u32;
            let c = ((i + 1) * radial_segments + j) as u32;
            let d = ((i + 1) * radial_segments + j1) as u32;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    indices
}

/// Orthonormal (tangent, binormal, normal) frame at a point on the curve.
#[inline]
pub fn ring_frame(tangent: Vec3) -> (Vec3, Vec3, Vec3) {
    let binormal = tangent.cross(FRAME_UP).try_normalize().unwrap_or(Vec3::X);
    let normal = binormal.cross(tangent);
    (tangent, binormal, normal)
}

#[inline]
pub fn twist(profile: &LayerProfile, geometry: &GeometryConfig, t: f32, elapsed: f32) -> f32 {
    profile.twist_direction
        * profile.twist_rate
        * (t * geometry.twist_turns * TAU + elapsed * geometry.twist_spin_per_sec)
}

/// Overwrite the layer's positions. Pure in its inputs: identical curve,
/// clock and time give identical buffers.
pub fn rebuild(
    layer: &mut TubeLayer,
    curve: &Curve<'_>,
    shapes: &ShapeSequence,
    geometry: &GeometryConfig,
    shape_clock: f32,
    elapsed: f32,
) {
    let radial = layer.radial_segments;
    let rings = layer.ring_count;
    let profile = &layer.profile;
    let wave = &profile.wave;
    let radius_scale = geometry.base_radius * profile.scale;
    for i in 0..=rings {
        let t = i as f32 / rings as f32;
        let center = curve.point_at(t);
        let (_, binormal, normal) = ring_frame(curve.tangent_at(t));
        let sample = shapes.shape_at_offset(t, shape_clock, profile.shape_offset);
        let ring_twist = twist(profile, geometry, t, elapsed);
        let wobble = 1.0
            + geometry.radial_wave_amplitude
                * (elapsed * wave.radial_freq + t * wave.radial_spatial + wave.radial_phase).sin();
        let drift = geometry.angular_wave_amplitude
            * (elapsed * wave.angular_freq + t * wave.angular_spatial + wave.angular_phase).sin();
        let row = &mut layer.positions[i * radial..(i + 1) * radial];
        for (j, out) in row.iter_mut().enumerate() {
            let angle = j as f32 / radial as f32 * TAU + ring_twist;
            let clamp = geometry.polygon_radius_clamp;
            let from = polygon_radius(sample.current.side_count, angle, clamp);
            let to = polygon_radius(sample.next.side_count, angle, clamp);
            let radius = (from + (to - from) * sample.blend) * radius_scale * wobble;
            let a = angle + drift;
            let p = center + binormal * (a.cos() * radius) + normal * (a.sin() * radius);
            *out = p.to_array();
        }
    }
}
