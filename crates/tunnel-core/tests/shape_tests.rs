// Shape sequence resolution and polygon radius profiles.

use std::f32::consts::{PI, TAU};
use tunnel_core::shapes::{polygon_corner_radius, polygon_radius, sine_ease};
use tunnel_core::{ConfigError, ShapeDescriptor, ShapeSequence};

fn square_triangle_square() -> ShapeSequence {
    ShapeSequence::new(
        vec![
            ShapeDescriptor::new(4, "square"),
            ShapeDescriptor::new(3, "triangle"),
            ShapeDescriptor::new(4, "square"),
        ],
        1.0,
        1.0,
    )
    .unwrap()
}

#[test]
fn blend_stays_in_unit_range() {
    let seq = ShapeSequence::default();
    for clock in [0.0, 0.37, 5.0, 123.4, 1000.0] {
        for i in 0..=200 {
            let t = i as f32 / 200.0;
            let s = seq.shape_at(t, clock);
            assert!(
                (0.0..=1.0).contains(&s.blend),
                "blend {} out of range at t={} clock={}",
                s.blend,
                t,
                clock
            );
        }
    }
}

#[test]
fn blend_rises_with_the_clock_then_wraps_near_zero() {
    let seq = ShapeSequence::default();
    let t = 0.3;
    let mut prev = seq.shape_at(t, 0.0).blend;
    let mut wraps = 0;
    for i in 1..=20_000 {
        let blend = seq.shape_at(t, i as f32 * 0.01).blend;
        if blend < prev - 1e-6 {
            assert!(blend < 0.01, "wrapped to {} at step {}", blend, i);
            assert!(prev > 0.99);
            wraps += 1;
        }
        prev = blend;
    }
    // wave runs from 0.3 to 24.3
    assert_eq!(wraps, 24);
}

#[test]
fn integer_part_selects_pair_and_fraction_is_eased() {
    let seq = square_triangle_square();
    let s = seq.shape_at(0.25, 1.0);
    assert_eq!(s.current.label, "triangle");
    assert_eq!(s.next.label, "square");
    let expected = 0.5 - 0.5 * (0.25 * PI).cos();
    assert!((s.blend - expected).abs() < 1e-5);
}

#[test]
fn last_shape_wraps_to_first() {
    let seq = square_triangle_square();
    // wave = 2.5 lands on the closing square, whose neighbour is index 0
    let s = seq.shape_at(0.5, 2.0);
    assert_eq!(s.current.side_count, 4);
    assert_eq!(s.next.side_count, 4);
    assert_eq!(s.next.label, "square");
}

#[test]
fn negative_wave_positions_wrap_backwards() {
    let seq = square_triangle_square();
    let s = seq.shape_at_offset(0.0, 0.0, -0.5);
    assert_eq!(s.current.label, "square");
    assert!((s.blend - 0.5).abs() < 1e-5);
    let s = seq.shape_at_offset(0.0, 0.0, -1.5);
    assert_eq!(s.current.label, "triangle");
}

#[test]
fn boundaries_travel_toward_the_mouth() {
    let seq = ShapeSequence::default();
    let t = 0.4;
    assert!(seq.wave_position(t, 2.0, 0.0) > seq.wave_position(t, 1.0, 0.0));
    // A boundary at wave = 1 sits at smaller t once the clock has advanced
    let boundary_t = |clock: f32| 1.0 - clock * 0.12;
    assert!(boundary_t(2.0) < boundary_t(1.0));
    let s = seq.shape_at(boundary_t(1.0) + 1e-3, 1.0);
    assert_eq!(s.current.label, "triangle");
}

#[test]
fn sine_ease_is_monotonic_and_pinned() {
    assert_eq!(sine_ease(0.0), 0.0);
    assert!((sine_ease(1.0) - 1.0).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 0..=100 {
        let v = sine_ease(i as f32 / 100.0);
        assert!(v + 1e-6 >= prev);
        prev = v;
    }
}

#[test]
fn polygon_radius_has_unit_apothem_and_corners_on_multiples() {
    let clamp = 1.6;
    // square: corner at 0, edge midpoint at 45 degrees
    assert!((polygon_radius(4, 0.0, clamp) - 2f32.sqrt()).abs() < 1e-4);
    assert!((polygon_radius(4, PI / 4.0, clamp) - 1.0).abs() < 1e-5);
    // hexagon corners at k * 60 degrees
    for k in 0..6 {
        let a = k as f32 * TAU / 6.0;
        assert!((polygon_radius(6, a, clamp) - 1.0 / (PI / 6.0).cos()).abs() < 1e-4);
    }
    // triangle corners reach past the clamp
    assert_eq!(polygon_radius(3, 0.0, clamp), clamp);
    assert!((polygon_radius(3, PI / 3.0, clamp) - 1.0).abs() < 1e-5);
}

#[test]
fn polygon_radius_stays_between_apothem_and_corner() {
    let clamp = 1.6;
    for sides in [3, 4, 5, 6, 8, 32] {
        let corner = polygon_corner_radius(sides, clamp);
        for i in 0..360 {
            let a = i as f32 / 360.0 * TAU;
            let r = polygon_radius(sides, a, clamp);
            assert!(r >= 1.0 - 1e-5 && r <= corner + 1e-5, "sides={sides} r={r}");
        }
    }
    assert!(polygon_corner_radius(32, clamp) < 1.01);
}

#[test]
fn default_sequence_closes_and_sizes_buffers() {
    let seq = ShapeSequence::default();
    let shapes = seq.shapes();
    assert_eq!(shapes.first().unwrap().side_count, shapes.last().unwrap().side_count);
    assert_eq!(seq.radial_segment_count(), 32);
    assert!(shapes.iter().all(|s| s.side_count >= 3));
}

#[test]
fn rejects_malformed_sequences() {
    assert_eq!(
        ShapeSequence::new(vec![], 1.0, 1.0).unwrap_err(),
        ConfigError::EmptyShapeSequence
    );
    let err = ShapeSequence::new(
        vec![ShapeDescriptor::new(2, "line"), ShapeDescriptor::new(2, "line")],
        1.0,
        1.0,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::TooFewSides { side_count: 2, .. }));
    let err = ShapeSequence::new(
        vec![ShapeDescriptor::new(4, "square"), ShapeDescriptor::new(3, "triangle")],
        1.0,
        1.0,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::OpenShapeLoop { .. }));
    let err = ShapeSequence::new(
        vec![ShapeDescriptor::new(4, "square"), ShapeDescriptor::new(4, "square")],
        0.0,
        1.0,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::NonPositive { .. }));
}
