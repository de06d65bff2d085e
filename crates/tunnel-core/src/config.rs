//! Construction-time configuration. Everything here is fixed for the life of
//! a tunnel; build a new engine to change it.

use crate::constants::*;
use crate::error::{ensure_positive, ConfigError};
use crate::palette::PaletteSet;
use crate::shapes::ShapeSequence;

#[derive(Clone, Debug, PartialEq)]
pub struct LifecycleConfig {
    pub fade_in_sec: f32,
    pub active_sec: f32,
    pub fade_out_sec: f32,
    /// Opacity of the inner layer relative to the outer one.
    pub inner_opacity_fraction: f32,
    pub ring_opacity_fraction: f32,
}

impl LifecycleConfig {
    pub fn total_sec(&self) -> f32 {
        self.fade_in_sec + self.active_sec + self.fade_out_sec
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            fade_in_sec: FADE_IN_SEC,
            active_sec: ACTIVE_SEC,
            fade_out_sec: FADE_OUT_SEC,
            inner_opacity_fraction: INNER_OPACITY_FRACTION,
            ring_opacity_fraction: RING_OPACITY_FRACTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathConfig {
    pub near_z: f32,
    pub far_z: f32,
    pub smoothing_tau_sec: f32,
    pub pointer_amplitude: [f32; 3],
    pub floor_bias_index: usize,
    pub floor_bias: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            near_z: PATH_NEAR_Z,
            far_z: PATH_FAR_Z,
            smoothing_tau_sec: PATH_SMOOTHING_TAU_SEC,
            pointer_amplitude: PATH_POINTER_AMPLITUDE,
            floor_bias_index: PATH_FLOOR_BIAS_INDEX,
            floor_bias: PATH_FLOOR_BIAS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub z: f32,
    pub pointer_amplitude: f32,
    pub look_ahead_t: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            z: CAMERA_Z,
            pointer_amplitude: CAMERA_POINTER_AMPLITUDE,
            look_ahead_t: CAMERA_LOOK_AHEAD_T,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryConfig {
    pub ring_count: usize,
    pub base_radius: f32,
    pub twist_turns: f32,
    pub twist_spin_per_sec: f32,
    pub radial_wave_amplitude: f32,
    pub angular_wave_amplitude: f32,
    pub polygon_radius_clamp: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            ring_count: RING_COUNT,
            base_radius: BASE_TUBE_RADIUS,
            twist_turns: TWIST_TURNS,
            twist_spin_per_sec: TWIST_SPIN_PER_SEC,
            radial_wave_amplitude: RADIAL_WAVE_AMPLITUDE,
            angular_wave_amplitude: ANGULAR_WAVE_AMPLITUDE,
            polygon_radius_clamp: POLYGON_RADIUS_CLAMP,
        }
    }
}

/// Frequencies and phases of the small per-ring wobble applied on top of the
/// shape radius. Outer and inner use different values so they never lock.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveProfile {
    pub radial_freq: f32,
    pub radial_spatial: f32,
    pub radial_phase: f32,
    pub angular_freq: f32,
    pub angular_spatial: f32,
    pub angular_phase: f32,
}

/// Everything that distinguishes one tube layer from the other.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerProfile {
    pub label: &'static str,
    pub scale: f32,
    /// +1 or -1; the inner layer counter-rotates.
    pub twist_direction: f32,
    pub twist_rate: f32,
    /// Added to the shape wave position.
    pub shape_offset: f32,
    /// Added to the palette clock, in palette time units.
    pub palette_offset_sec: f32,
    pub color_speed_multiplier: f32,
    pub wave: WaveProfile,
}

impl LayerProfile {
    pub fn outer() -> Self {
        Self {
            label: "outer",
            scale: OUTER_LAYER_SCALE,
            twist_direction: 1.0,
            twist_rate: 1.0,
            shape_offset: 0.0,
            palette_offset_sec: 0.0,
            color_speed_multiplier: 1.0,
            wave: WaveProfile {
                radial_freq: 1.7,
                radial_spatial: 9.0,
                radial_phase: 0.0,
                angular_freq: 1.1,
                angular_spatial: 5.0,
                angular_phase: 0.0,
            },
        }
    }

    pub fn inner() -> Self {
        Self {
            label: "inner",
            scale: INNER_LAYER_SCALE,
            twist_direction: -1.0,
            twist_rate: INNER_TWIST_RATE,
            shape_offset: INNER_SHAPE_OFFSET,
            palette_offset_sec: INNER_PALETTE_OFFSET_SEC,
            color_speed_multiplier: INNER_COLOR_SPEED_MULTIPLIER,
            wave: WaveProfile {
                radial_freq: 2.3,
                radial_spatial: 13.0,
                radial_phase: 1.3,
                angular_freq: 1.6,
                angular_spatial: 7.0,
                angular_phase: 2.1,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorWaveConfig {
    pub wave_speed: f32,
    pub wave_scale: f32,
    pub jitter: f32,
    pub noise_scale: f32,
    /// Depth 0 at `near_z`, 1 at `far_z`.
    pub near_z: f32,
    pub far_z: f32,
}

impl Default for ColorWaveConfig {
    fn default() -> Self {
        Self {
            wave_speed: COLOR_WAVE_SPEED,
            wave_scale: COLOR_WAVE_SCALE,
            jitter: COLOR_JITTER,
            noise_scale: COLOR_NOISE_SCALE,
            near_z: PATH_NEAR_Z,
            far_z: PATH_FAR_Z,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    pub positions_t: Vec<f32>,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: usize,
    pub spin_min: f32,
    pub spin_max: f32,
    pub seed: u64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            positions_t: RING_ACCENT_T.to_vec(),
            inner_radius: RING_ACCENT_INNER_RADIUS,
            outer_radius: RING_ACCENT_OUTER_RADIUS,
            segments: RING_ACCENT_SEGMENTS,
            spin_min: RING_ACCENT_SPIN_MIN,
            spin_max: RING_ACCENT_SPIN_MAX,
            seed: RING_ACCENT_SEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TunnelConfig {
    pub lifecycle: LifecycleConfig,
    pub path: PathConfig,
    pub camera: CameraConfig,
    pub geometry: GeometryConfig,
    pub shapes: ShapeSequence,
    pub palettes: PaletteSet,
    pub color: ColorWaveConfig,
    pub outer: LayerProfile,
    pub inner: LayerProfile,
    pub rings: RingConfig,
    pub shape_clock_rate: f32,
    pub palette_clock_rate: f32,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleConfig::default(),
            path: PathConfig::default(),
            camera: CameraConfig::default(),
            geometry: GeometryConfig::default(),
            shapes: ShapeSequence::default(),
            palettes: PaletteSet::default(),
            color: ColorWaveConfig::default(),
            outer: LayerProfile::outer(),
            inner: LayerProfile::inner(),
            rings: RingConfig::default(),
            shape_clock_rate: SHAPE_CLOCK_RATE,
            palette_clock_rate: PALETTE_CLOCK_RATE,
        }
    }
}

impl TunnelConfig {
    /// Shape and palette lists validate themselves on construction; this
    /// covers the scalar knobs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("fade_in_sec", self.lifecycle.fade_in_sec)?;
        ensure_positive("active_sec", self.lifecycle.active_sec)?;
        ensure_positive("fade_out_sec", self.lifecycle.fade_out_sec)?;
        ensure_positive("base_radius", self.geometry.base_radius)?;
        ensure_positive("polygon_radius_clamp", self.geometry.polygon_radius_clamp)?;
        ensure_positive("smoothing_tau_sec", self.path.smoothing_tau_sec)?;
        ensure_positive("outer.scale", self.outer.scale)?;
        ensure_positive("inner.scale", self.inner.scale)?;
        ensure_positive("ring segments", self.rings.segments as f32)?;
        if !(self.rings.spin_min <= self.rings.spin_max) {
            return Err(ConfigError::NonPositive {
                field: "ring spin range",
                value: self.rings.spin_max - self.rings.spin_min,
            });
        }
        if self.geometry.ring_count == 0 {
            return Err(ConfigError::NoRings);
        }
        if (self.color.near_z - self.color.far_z).abs() <= f32::EPSILON {
            return Err(ConfigError::NonPositive {
                field: "color depth span",
                value: 0.0,
            });
        }
        Ok(())
    }
}
