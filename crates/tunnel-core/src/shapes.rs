//! Cyclic sequence of cross-section polygons and the traveling wave that
//! decides which two shapes a given slice of the tunnel is blending between.

use crate::constants::{SHAPE_SPATIAL_FREQUENCY, SHAPE_WAVE_SPEED};
use crate::error::{ensure_positive, ConfigError};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub side_count: u32,
    pub label: String,
}

impl ShapeDescriptor {
    pub fn new(side_count: u32, label: impl Into<String>) -> Self {
        Self {
            side_count,
            label: label.into(),
        }
    }
}

/// Result of resolving a position on the tunnel against the sequence.
#[derive(Clone, Copy, Debug)]
pub struct ShapeSample<'a> {
    pub current: &'a ShapeDescriptor,
    pub next: &'a ShapeDescriptor,
    /// Eased fraction of the way from `current` to `next`, in `[0, 1]`.
    pub blend: f32,
}

#[derive(Clone, Debug)]
pub struct ShapeSequence {
    shapes: Vec<ShapeDescriptor>,
    wave_speed: f32,
    spatial_frequency: f32,
}

impl ShapeSequence {
    /// The last shape must repeat the first so the cycle closes cleanly.
    pub fn new(
        shapes: Vec<ShapeDescriptor>,
        wave_speed: f32,
        spatial_frequency: f32,
    ) -> Result<Self, ConfigError> {
        let (Some(first), Some(last)) = (shapes.first(), shapes.last()) else {
            return Err(ConfigError::EmptyShapeSequence);
        };
        if let Some(bad) = shapes.iter().find(|s| s.side_count < 3) {
            return Err(ConfigError::TooFewSides {
                label: bad.label.clone(),
                side_count: bad.side_count,
            });
        }
        if first.side_count != last.side_count {
            return Err(ConfigError::OpenShapeLoop {
                first: first.label.clone(),
                last: last.label.clone(),
            });
        }
        ensure_positive("shape wave speed", wave_speed)?;
        ensure_positive("shape spatial frequency", spatial_frequency)?;
        Ok(Self {
            shapes,
            wave_speed,
            spatial_frequency,
        })
    }

    pub fn shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// One buffer layout fits every shape: the largest side count.
    pub fn radial_segment_count(&self) -> usize {
        self.shapes
            .iter()
            .map(|s| s.side_count as usize)
            .max()
            .unwrap_or(3)
    }

    pub fn wave_position(&self, t: f32, clock: f32, offset: f32) -> f32 {
        t * self.spatial_frequency + clock * self.wave_speed + offset
    }

    pub fn shape_at(&self, t: f32, clock: f32) -> ShapeSample<'_> {
        self.shape_at_offset(t, clock, 0.0)
    }

    /// Integer part of the wave position picks the shape pair, the eased
    /// fractional part blends them. Boundaries move toward `t = 0` as the
    /// clock advances.
    pub fn shape_at_offset(&self, t: f32, clock: f32, offset: f32) -> ShapeSample<'_> {
        let wave = self.wave_position(t, clock, offset);
        let base = wave.floor();
        let n = self.shapes.len() as i64;
        let i = (base as i64).rem_euclid(n) as usize;
        let j = (i + 1) % self.shapes.len();
        ShapeSample {
            current: &self.shapes[i],
            next: &self.shapes[j],
            blend: sine_ease(wave - base),
        }
    }
}

impl Default for ShapeSequence {
    fn default() -> Self {
        Self {
            shapes: vec![
                ShapeDescriptor::new(32, "circle"),
                ShapeDescriptor::new(3, "triangle"),
                ShapeDescriptor::new(4, "square"),
                ShapeDescriptor::new(5, "pentagon"),
                ShapeDescriptor::new(6, "hexagon"),
                ShapeDescriptor::new(8, "octagon"),
                ShapeDescriptor::new(32, "circle"),
            ],
            wave_speed: SHAPE_WAVE_SPEED,
            spatial_frequency: SHAPE_SPATIAL_FREQUENCY,
        }
    }
}

/// Half-cosine ease; monotonic on `[0, 1]`.
#[inline]
pub fn sine_ease(x: f32) -> f32 {
    (0.5 - 0.5 * (x.clamp(0.0, 1.0) * PI).cos()).clamp(0.0, 1.0)
}

/// Distance from the centre of a regular polygon (apothem 1) to its boundary
/// along `angle`. Corners sit at `k * TAU / sides`; the result never exceeds
/// `clamp`, which tames the long triangle and square corners.
#[inline]
pub fn polygon_radius(sides: u32, angle: f32, clamp: f32) -> f32 {
    let sector = TAU / sides.max(3) as f32;
    let local = angle.rem_euclid(sector) - sector * 0.5;
    (1.0 / local.cos()).min(clamp)
}

/// The largest value `polygon_radius` reaches for a side count.
#[inline]
pub fn polygon_corner_radius(sides: u32, clamp: f32) -> f32 {
    (1.0 / (PI / sides.max(3) as f32).cos()).min(clamp)
}
