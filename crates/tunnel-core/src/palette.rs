//! Multi-stop HSL palettes, the timed palette rotation, and per-vertex
//! color computation for a tube layer.

use crate::config::{ColorWaveConfig, LayerProfile};
use crate::constants::{PALETTE_CYCLE_SEC, PALETTE_TRANSITION_SEC};
use crate::error::{ensure_positive, ConfigError};
use crate::geometry::TubeLayer;
use crate::noise;

const GREY_EPSILON: f32 = 1e-4;

/// Hue in turns (`[0, 1)`), saturation and lightness in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const BLACK: Hsl = Hsl {
        h: 0.0,
        s: 0.0,
        l: 0.0,
    };

    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn is_black(&self) -> bool {
        self.l <= GREY_EPSILON
    }

    /// Interpolate along the shorter way round the hue circle. A grey end
    /// has no meaningful hue, so the other end's hue is used throughout.
    pub fn lerp(self, other: Hsl, t: f32) -> Hsl {
        let h = if self.s <= GREY_EPSILON || self.is_black() {
            other.h
        } else if other.s <= GREY_EPSILON || other.is_black() {
            self.h
        } else {
            let mut d = other.h - self.h;
            if d > 0.5 {
                d -= 1.0;
            } else if d < -0.5 {
                d += 1.0;
            }
            (self.h + d * t).rem_euclid(1.0)
        };
        Hsl {
            h,
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
        }
    }

    /// HSL is authored in sRGB; the renderer works in linear space.
    pub fn to_linear_rgb(self) -> [f32; 3] {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s <= GREY_EPSILON {
            let v = srgb_to_linear(l);
            return [v, v, v];
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.h.rem_euclid(1.0);
        let channel = |t: f32| srgb_to_linear(hue_to_channel(p, q, t).clamp(0.0, 1.0));
        [
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
        ]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Quintic smoothstep (zero first and second derivative at both ends).
#[inline]
pub fn smootherstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    stops: Vec<Hsl>,
}

impl Palette {
    pub fn new(name: impl Into<String>, stops: Vec<Hsl>) -> Result<Self, ConfigError> {
        let name = name.into();
        if stops.len() < 2 {
            return Err(ConfigError::TooFewStops {
                name,
                stops: stops.len(),
            });
        }
        if !stops[0].is_black() {
            return Err(ConfigError::MissingBlackStop { name });
        }
        Ok(Self { name, stops })
    }

    /// Synthetic shutdown palette.
    pub fn all_black(stop_count: usize) -> Self {
        Self {
            name: "black".to_string(),
            stops: vec![Hsl::BLACK; stop_count.max(2)],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[Hsl] {
        &self.stops
    }

    /// Map `f` in `[0, 1)` onto the stop list, wrapping from the last stop
    /// back to the first, with a quintic ease between neighbours.
    pub fn sample(&self, f: f32) -> Hsl {
        let n = self.stops.len();
        let pos = f.rem_euclid(1.0) * n as f32;
        let base = pos.floor();
        let i = (base as usize) % n;
        let j = (i + 1) % n;
        self.stops[i].lerp(self.stops[j], smootherstep(pos - base))
    }
}

/// Where the rotation stands at a given palette time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteCycle {
    pub current: usize,
    pub next: usize,
    /// 0 for most of the cycle, easing to 1 over the transition window.
    pub transition: f32,
}

#[derive(Clone, Debug)]
pub struct PaletteSet {
    palettes: Vec<Palette>,
    black: Palette,
    cycle_sec: f32,
    transition_sec: f32,
}

impl PaletteSet {
    /// All palettes must share a stop count so the black override lines up.
    pub fn new(
        palettes: Vec<Palette>,
        cycle_sec: f32,
        transition_sec: f32,
    ) -> Result<Self, ConfigError> {
        let Some(first) = palettes.first() else {
            return Err(ConfigError::EmptyPaletteSet);
        };
        let expected = first.stops.len();
        if let Some(odd) = palettes.iter().find(|p| p.stops.len() != expected) {
            return Err(ConfigError::StopCountMismatch {
                name: odd.name.clone(),
                stops: odd.stops.len(),
                expected,
            });
        }
        ensure_positive("palette cycle", cycle_sec)?;
        ensure_positive("palette transition", transition_sec)?;
        if transition_sec > cycle_sec {
            return Err(ConfigError::TransitionTooLong {
                window: transition_sec,
                cycle: cycle_sec,
            });
        }
        Ok(Self {
            black: Palette::all_black(expected),
            palettes,
            cycle_sec,
            transition_sec,
        })
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn black(&self) -> &Palette {
        &self.black
    }

    pub fn cycle_sec(&self) -> f32 {
        self.cycle_sec
    }

    pub fn cycle_at(&self, time: f32) -> PaletteCycle {
        let n = self.palettes.len();
        let index = (time / self.cycle_sec).floor() as i64;
        let current = index.rem_euclid(n as i64) as usize;
        let local = time.rem_euclid(self.cycle_sec);
        let window_start = self.cycle_sec - self.transition_sec;
        PaletteCycle {
            current,
            next: (current + 1) % n,
            transition: smootherstep((local - window_start) / self.transition_sec),
        }
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        let palette = |name: &str, stops: [Hsl; 4]| Palette {
            name: name.to_string(),
            stops: std::iter::once(Hsl::BLACK).chain(stops).collect(),
        };
        let palettes = vec![
            palette(
                "ember",
                [
                    Hsl::new(0.02, 0.85, 0.35),
                    Hsl::new(0.07, 0.9, 0.5),
                    Hsl::new(0.12, 0.95, 0.6),
                    Hsl::new(0.98, 0.8, 0.45),
                ],
            ),
            palette(
                "abyss",
                [
                    Hsl::new(0.55, 0.8, 0.3),
                    Hsl::new(0.6, 0.85, 0.5),
                    Hsl::new(0.5, 0.9, 0.6),
                    Hsl::new(0.67, 0.7, 0.45),
                ],
            ),
            palette(
                "neon",
                [
                    Hsl::new(0.83, 0.9, 0.5),
                    Hsl::new(0.9, 0.95, 0.6),
                    Hsl::new(0.75, 0.8, 0.55),
                    Hsl::new(0.95, 0.85, 0.45),
                ],
            ),
            palette(
                "verdant",
                [
                    Hsl::new(0.33, 0.7, 0.3),
                    Hsl::new(0.4, 0.8, 0.45),
                    Hsl::new(0.28, 0.85, 0.55),
                    Hsl::new(0.45, 0.75, 0.5),
                ],
            ),
        ];
        Self {
            black: Palette::all_black(5),
            palettes,
            cycle_sec: PALETTE_CYCLE_SEC,
            transition_sec: PALETTE_TRANSITION_SEC,
        }
    }
}

/// Forces the palettes toward black while the tunnel fades out.
/// `strength` 1 means both palettes are fully replaced by the black one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShutdownOverride {
    pub strength: f32,
}

/// Normalized depth along the tunnel axis: 0 at the mouth, 1 at the far end.
#[inline]
pub fn depth_of(z: f32, color: &ColorWaveConfig) -> f32 {
    ((color.near_z - z) / (color.near_z - color.far_z)).clamp(0.0, 1.0)
}

/// Color at one depth, before any jitter: the traveling wave position picks
/// a spot in each palette and the rotation cross-fades between them. A
/// shutdown override then fades the result toward the black palette.
pub fn shade(
    palettes: &PaletteSet,
    wave: f32,
    palette_time: f32,
    shutdown: Option<ShutdownOverride>,
) -> Hsl {
    let f = wave.rem_euclid(1.0);
    let cycle = palettes.cycle_at(palette_time);
    let current = &palettes.palettes[cycle.current];
    let next = &palettes.palettes[cycle.next];
    let hsl = current.sample(f).lerp(next.sample(f), cycle.transition);
    match shutdown {
        Some(o) => hsl.lerp(palettes.black().sample(f), o.strength.clamp(0.0, 1.0)),
        None => hsl,
    }
}

#[inline]
pub fn wave_position(depth: f32, palette_time: f32, speed: f32, scale: f32) -> f32 {
    (depth + palette_time * speed) * scale
}

/// Overwrite the layer's color buffer from its current positions.
/// `palette_clock` is the shared clock; the layer profile adds its own
/// offset and speed so the two tubes never show the same bands.
pub fn colorize(
    layer: &mut TubeLayer,
    palettes: &PaletteSet,
    color: &ColorWaveConfig,
    elapsed: f32,
    palette_clock: f32,
    shutdown: Option<ShutdownOverride>,
) {
    let profile: &LayerProfile = layer.profile();
    let palette_time = palette_clock + profile.palette_offset_sec;
    let speed = color.wave_speed * profile.color_speed_multiplier;
    let (positions, colors) = layer.positions_and_colors_mut();
    for (p, out) in positions.iter().zip(colors.iter_mut()) {
        let depth = depth_of(p[2], color);
        let grain = noise::jitter(
            p[0] * color.noise_scale,
            p[1] * color.noise_scale,
            p[2] * color.noise_scale + elapsed,
            color.jitter,
        );
        let wave = wave_position(depth, palette_time, speed, color.wave_scale) + grain;
        *out = shade(palettes, wave, palette_time, shutdown).to_linear_rgb();
    }
}
