// Tube topology and per-frame vertex rebuilds.

use glam::{Vec2, Vec3};
use tunnel_core::geometry::{self, quad_strip_indices, ring_frame};
use tunnel_core::{
    GeometryConfig, LayerKind, LayerProfile, PathConfig, PathModel, ShapeSequence, TubeLayer,
};

fn layer(kind: LayerKind) -> TubeLayer {
    let geo = GeometryConfig::default();
    let profile = match kind {
        LayerKind::Outer => LayerProfile::outer(),
        LayerKind::Inner => LayerProfile::inner(),
    };
    TubeLayer::new(kind, profile, geo.ring_count, ShapeSequence::default().radial_segment_count())
}

fn mean_radius(layer: &TubeLayer) -> f32 {
    let sum: f32 = layer
        .positions()
        .iter()
        .map(|p| Vec2::new(p[0], p[1]).length())
        .sum();
    sum / layer.vertex_count() as f32
}

#[test]
fn buffer_sizes_follow_ring_and_segment_counts() {
    let l = layer(LayerKind::Outer);
    assert_eq!(l.vertex_count(), (120 + 1) * 32);
    assert_eq!(l.colors().len(), l.vertex_count());
    assert_eq!(l.indices().len(), 120 * 32 * 6);
    let max = *l.indices().iter().max().unwrap() as usize;
    assert!(max < l.vertex_count());
}

#[test]
fn quad_strip_wraps_at_the_seam() {
    let idx = quad_strip_indices(2, 3);
    assert_eq!(idx.len(), 2 * 3 * 6);
    assert_eq!(&idx[0..6], &[0, 3, 1, 1, 3, 4]);
    // last quad of the first ring joins segment 2 back to segment 0
    assert_eq!(&idx[12..18], &[2, 5, 0, 0, 5, 3]);
}

#[test]
fn ring_frame_is_orthonormal() {
    for tangent in [
        Vec3::NEG_Z,
        Vec3::new(0.3, -0.2, -0.9).normalize(),
        Vec3::new(-0.7, 0.1, -0.7).normalize(),
    ] {
        let (t, b, n) = ring_frame(tangent);
        assert!((b.length() - 1.0).abs() < 1e-5);
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(t.dot(b).abs() < 1e-5);
        assert!(t.dot(n).abs() < 1e-5);
        assert!(b.dot(n).abs() < 1e-5);
    }
}

#[test]
fn rebuild_is_deterministic_and_keeps_vertex_count() {
    let path = PathModel::new(&PathConfig::default());
    let curve = path.curve().unwrap();
    let shapes = ShapeSequence::default();
    let geo = GeometryConfig::default();
    let mut a = layer(LayerKind::Outer);
    let mut b = layer(LayerKind::Outer);
    let count = a.vertex_count();
    geometry::rebuild(&mut a, &curve, &shapes, &geo, 3.2, 4.5);
    geometry::rebuild(&mut b, &curve, &shapes, &geo, 3.2, 4.5);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.vertex_count(), count);
    assert!(a.positions().iter().flatten().all(|c| c.is_finite()));
}

#[test]
fn straight_path_rings_stay_within_shape_bounds() {
    let path = PathModel::new(&PathConfig::default());
    let curve = path.curve().unwrap();
    let shapes = ShapeSequence::default();
    let geo = GeometryConfig::default();
    let mut l = layer(LayerKind::Outer);
    geometry::rebuild(&mut l, &curve, &shapes, &geo, 1.0, 2.0);
    let r = geo.base_radius * LayerProfile::outer().scale;
    let min = r * (1.0 - geo.radial_wave_amplitude) - 1e-4;
    let max = r * geo.polygon_radius_clamp * (1.0 + geo.radial_wave_amplitude) + 1e-4;
    let radial = l.radial_segments();
    for (i, row) in l.positions().chunks(radial).enumerate() {
        let center = curve.point_at(i as f32 / l.ring_count() as f32);
        for p in row {
            assert!((p[2] - center.z).abs() < 1e-4, "ring {i} not planar");
            let d = Vec2::new(p[0] - center.x, p[1] - center.y).length();
            assert!(d >= min && d <= max, "ring {i} radius {d}");
        }
    }
}

#[test]
fn inner_layer_nests_inside_outer() {
    let path = PathModel::new(&PathConfig::default());
    let curve = path.curve().unwrap();
    let shapes = ShapeSequence::default();
    let geo = GeometryConfig::default();
    let mut outer = layer(LayerKind::Outer);
    let mut inner = layer(LayerKind::Inner);
    geometry::rebuild(&mut outer, &curve, &shapes, &geo, 0.0, 0.0);
    geometry::rebuild(&mut inner, &curve, &shapes, &geo, 0.0, 0.0);
    assert!(mean_radius(&inner) < mean_radius(&outer));
    assert_ne!(outer.positions(), inner.positions());
}

#[test]
fn geometry_moves_with_time() {
    let path = PathModel::new(&PathConfig::default());
    let curve = path.curve().unwrap();
    let shapes = ShapeSequence::default();
    let geo = GeometryConfig::default();
    let mut l = layer(LayerKind::Outer);
    geometry::rebuild(&mut l, &curve, &shapes, &geo, 0.0, 0.0);
    let first = l.positions().to_vec();
    geometry::rebuild(&mut l, &curve, &shapes, &geo, 0.5, 0.5);
    assert_ne!(l.positions(), &first[..]);
}
