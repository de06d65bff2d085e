// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn client_ratio_maps_box_corners() {
    let origin = Vec2::new(10.0, 20.0);
    let size = Vec2::new(200.0, 100.0);
    assert_eq!(client_ratio(origin, origin, size), Vec2::ZERO);
    assert_eq!(client_ratio(origin + size, origin, size), Vec2::ONE);
    let mid = client_ratio(Vec2::new(110.0, 70.0), origin, size);
    assert!((mid - Vec2::splat(0.5)).length() < 1e-6);
}

#[test]
fn client_ratio_clamps_outside_points() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(client_ratio(Vec2::new(-50.0, 900.0), Vec2::ZERO, size), Vec2::new(0.0, 1.0));
    assert_eq!(client_ratio(Vec2::new(1e6, -1e6), Vec2::ZERO, size), Vec2::new(1.0, 0.0));
}

#[test]
fn client_ratio_falls_back_to_centre() {
    let centre = Vec2::splat(0.5);
    assert_eq!(client_ratio(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO), centre);
    assert_eq!(client_ratio(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::new(100.0, 0.0)), centre);
    assert_eq!(
        client_ratio(Vec2::new(f32::NAN, 4.0), Vec2::ZERO, Vec2::new(100.0, 100.0)),
        centre
    );
}

#[test]
fn client_ratio_stays_in_unit_square() {
    let size = Vec2::new(1280.0, 720.0);
    for i in -20..40 {
        for j in -20..40 {
            let p = Vec2::new(i as f32 * 50.0, j as f32 * 30.0);
            let r = client_ratio(p, Vec2::ZERO, size);
            assert!((0.0..=1.0).contains(&r.x) && (0.0..=1.0).contains(&r.y));
        }
    }
}

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(400.0, 300.0, 1.5, 2.0, 1), (600, 450));
    // capped ratio
    assert_eq!(backing_size(400.0, 300.0, 3.0, 2.0, 1), (800, 600));
}

#[test]
fn backing_size_never_collapses() {
    assert_eq!(backing_size(0.0, 0.0, 2.0, 2.0, 1), (1, 1));
    assert_eq!(backing_size(-10.0, 50.0, 1.0, 2.0, 1), (1, 50));
    assert_eq!(backing_size(100.0, 100.0, f64::NAN, 2.0, 1), (100, 100));
    assert_eq!(backing_size(100.0, 100.0, 0.0, 2.0, 1), (100, 100));
}
