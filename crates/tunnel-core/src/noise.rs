//! Cheap deterministic scalar field used for positional and color jitter.

/// Hash three floats into a pseudo-random value in `[0, 1]`.
///
/// This is not gradient noise: nearby inputs are decorrelated on purpose so
/// palette bands pick up a fine grain instead of a smooth drift.
#[inline]
pub fn sample(x: f32, y: f32, z: f32) -> f32 {
    let v = (x * 12.9898 + y * 78.233 + z * 37.719).sin() * 43_758.547;
    (v - v.floor()).clamp(0.0, 1.0)
}

/// Signed jitter in `[-amplitude, amplitude]` centred on zero.
#[inline]
pub fn jitter(x: f32, y: f32, z: f32, amplitude: f32) -> f32 {
    (sample(x, y, z) * 2.0 - 1.0) * amplitude
}
