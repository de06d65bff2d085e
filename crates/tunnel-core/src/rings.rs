//! Flat annulus accents, one per early shape in the sequence, parked along
//! the curve and spinning slowly.

use crate::config::{ColorWaveConfig, GeometryConfig, RingConfig};
use crate::palette::{self, PaletteSet, ShutdownOverride};
use crate::path::Curve;
use crate::render::RingDraw;
use crate::shapes::{polygon_radius, ShapeSequence};
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct RingAccent {
    pub t: f32,
    pub side_count: u32,
    base_rotation: f32,
    spin_per_sec: f32,
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    transform: Mat4,
    color: [f32; 3],
}

impl RingAccent {
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn rotation_at(&self, elapsed: f32) -> f32 {
        self.base_rotation + self.spin_per_sec * elapsed
    }
}

/// Polygonal annulus in the local XY plane, `segments` quads around.
pub fn annulus_mesh(
    side_count: u32,
    inner: f32,
    outer: f32,
    segments: usize,
    clamp: f32,
) -> (Vec<[f32; 3]>, Vec<u32>) {
    let mut positions = Vec::with_capacity(segments * 2);
    for j in 0..segments {
        let angle = j as f32 / segments as f32 * TAU;
        let r = polygon_radius(side_count, angle, clamp);
        let (s, c) = angle.sin_cos();
        positions.push([c * r * inner, s * r * inner, 0.0]);
        positions.push([c * r * outer, s * r * outer, 0.0]);
    }
    let mut indices = Vec::with_capacity(segments * 6);
    for j in 0..segments {
        let k = (j + 1) % segments;
        let (a, b) = ((j * 2) as u32, (j * 2 + 1) as u32);
        let (c, d) = ((k * 2) as u32, (k * 2 + 1) as u32);
        indices.extend_from_slice(&[a, b, c, c, b, d]);
    }
    (positions, indices)
}

#[derive(Clone, Debug)]
pub struct RingSet {
    rings: Vec<RingAccent>,
    opacity: f32,
}

impl RingSet {
    /// One ring per configured position, taking shapes from the front of the
    /// sequence. Spins come from a seeded RNG so runs are repeatable.
    pub fn new(config: &RingConfig, geometry: &GeometryConfig, shapes: &ShapeSequence) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let rings = config
            .positions_t
            .iter()
            .zip(shapes.shapes())
            .map(|(&t, shape)| {
                let (positions, indices) = annulus_mesh(
                    shape.side_count,
                    config.inner_radius * geometry.base_radius,
                    config.outer_radius * geometry.base_radius,
                    config.segments,
                    geometry.polygon_radius_clamp,
                );
                let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                RingAccent {
                    t,
                    side_count: shape.side_count,
                    base_rotation: rng.gen_range(0.0..TAU),
                    spin_per_sec: sign * rng.gen_range(config.spin_min..=config.spin_max),
                    positions,
                    indices,
                    transform: Mat4::IDENTITY,
                    color: [0.0; 3],
                }
            })
            .collect();
        Self {
            rings,
            opacity: 0.0,
        }
    }

    pub fn rings(&self) -> &[RingAccent] {
        &self.rings
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Re-place every ring on the current curve and tint it with the palette
    /// color at its depth.
    pub fn update(
        &mut self,
        curve: &Curve<'_>,
        palettes: &PaletteSet,
        color: &ColorWaveConfig,
        elapsed: f32,
        palette_clock: f32,
        shutdown: Option<ShutdownOverride>,
    ) {
        for ring in &mut self.rings {
            let center = curve.point_at(ring.t);
            let facing = Quat::from_rotation_arc(Vec3::Z, -curve.tangent_at(ring.t));
            let spin = Quat::from_rotation_z(ring.rotation_at(elapsed));
            ring.transform = Mat4::from_rotation_translation(facing * spin, center);
            let depth = palette::depth_of(center.z, color);
            let wave = palette::wave_position(depth, palette_clock, color.wave_speed, color.wave_scale);
            ring.color = palette::shade(palettes, wave, palette_clock, shutdown).to_linear_rgb();
        }
    }

    pub fn draws(&self) -> SmallVec<[RingDraw<'_>; 4]> {
        self.rings
            .iter()
            .map(|r| RingDraw {
                positions: &r.positions,
                indices: &r.indices,
                transform: r.transform,
                color: r.color,
                opacity: self.opacity,
            })
            .collect()
    }
}
