// Host-side tests for meshes, camera and GPU-facing layouts.

use glam::{Vec3, Vec4Swizzles};
use std::mem::size_of;
use tree_core::mesh::{cuboid, uv_sphere, MeshVertex, QUAD_CORNERS};
use tree_core::*;

#[test]
fn sphere_has_expected_topology() {
    let m = uv_sphere(1.0, 16, 12);
    assert_eq!(m.vertices.len(), 17 * 13);
    assert_eq!(m.indices.len(), 16 * 12 * 6);
    assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    for v in &m.vertices {
        let n = Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!((Vec3::from(v.position) - n).length() < 1e-4);
    }
}

#[test]
fn sphere_faces_point_outwards() {
    let m = uv_sphere(1.0, BAUBLE_SEGMENTS, BAUBLE_SEGMENTS);
    let mut checked = 0;
    for tri in m.indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(m.vertices[i as usize].position));
        let face = (b - a).cross(c - a);
        // pole rows collapse one edge
        if face.length() < 1e-7 {
            continue;
        }
        let centroid = (a + b + c) / 3.0;
        assert!(face.dot(centroid) > 0.0, "counter-clockwise from outside");
        checked += 1;
    }
    let rows = BAUBLE_SEGMENTS as usize;
    assert_eq!(checked, rows * rows * 2 - 2 * rows);
}

#[test]
fn cuboid_faces_point_outwards() {
    let m = cuboid(1.0, 2.0, 3.0);
    assert_eq!(m.vertices.len(), 24);
    assert_eq!(m.index_count(), 36);
    for tri in m.indices.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(m.vertices[i as usize].position));
        let n = Vec3::from(m.vertices[tri[0] as usize].normal);
        assert!((b - a).cross(c - a).dot(n) > 0.0, "counter-clockwise from outside");
    }
    let max = m
        .vertices
        .iter()
        .fold(Vec3::ZERO, |acc, v| acc.max(Vec3::from(v.position)));
    assert_eq!(max, Vec3::new(0.5, 1.0, 1.5));
}

#[test]
fn quad_covers_unit_square() {
    assert_eq!(QUAD_CORNERS.len(), 6);
    assert!(QUAD_CORNERS.iter().all(|c| c[0].abs() == 0.5 && c[1].abs() == 0.5));
}

#[test]
fn instance_layouts_match_shader_strides() {
    assert_eq!(size_of::<PointInstance>(), 32);
    assert_eq!(size_of::<MeshInstance>(), 80);
    assert_eq!(size_of::<MeshVertex>(), 32);
    let insts = [PointInstance::new(Vec3::ONE, 0.1, Vec3::X); 4];
    assert_eq!(bytemuck::cast_slice::<_, u8>(&insts).len(), 128);
}

#[test]
fn camera_looks_at_the_tree() {
    let cam = Camera::default();
    assert_eq!(cam.eye, Vec3::new(0.0, 4.0, 20.0));
    let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
    let ndc = clip.xyz() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn billboard_axes_are_orthonormal() {
    let (right, up) = Camera::default().billboard_axes();
    assert!((right.length() - 1.0).abs() < 1e-5);
    assert!((up.length() - 1.0).abs() < 1e-5);
    assert!(right.dot(up).abs() < 1e-5);
}

#[test]
fn viewport_ignores_zero_size() {
    let mut cam = Camera::default();
    cam.set_viewport(800, 400);
    assert_eq!(cam.aspect, 2.0);
    cam.set_viewport(0, 400);
    assert_eq!(cam.aspect, 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_constants_are_sane() {
    assert!(FORMED_THRESHOLD > CHAOS_THRESHOLD);
    assert!(STAGGER_SPAN > 0.0 && STAGGER_SPAN < 1.0);
    assert!(BAUBLE_GOLD_PROBABILITY > 0.0 && BAUBLE_GOLD_PROBABILITY < 1.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert_eq!(srgb_to_linear(0.0), 0.0);
}

#[test]
fn orbit_starts_at_the_default_eye() {
    let orbit = OrbitCamera::default();
    assert!((orbit.eye() - Camera::default().eye).length() < 1e-4);
    assert!(orbit.polar() > ORBIT_MIN_POLAR && orbit.polar() < ORBIT_MAX_POLAR);
}

#[test]
fn orbit_drag_is_damped_and_complete() {
    let mut orbit = OrbitCamera::default();
    let start = orbit.azimuth();
    orbit.drag(-100.0, 0.0, 1000.0);
    orbit.step(1.0 / 60.0);
    let first = orbit.azimuth() - start;
    let total = std::f32::consts::TAU * 0.1;
    assert!((first - total * ORBIT_DAMPING).abs() < 1e-5);
    for _ in 0..600 {
        orbit.step(1.0 / 60.0);
    }
    assert!((orbit.azimuth() - start - total).abs() < 1e-4);
    assert!((orbit.eye().length() - orbit.radius()).abs() < 1e-3);
}

#[test]
fn orbit_polar_angle_is_clamped() {
    let mut orbit = OrbitCamera::default();
    orbit.drag(0.0, 5_000.0, 500.0);
    for _ in 0..300 {
        orbit.step(1.0 / 60.0);
    }
    assert!((orbit.polar() - ORBIT_MIN_POLAR).abs() < 1e-6);
    orbit.drag(0.0, -5_000.0, 500.0);
    for _ in 0..300 {
        orbit.step(1.0 / 60.0);
    }
    assert!((orbit.polar() - ORBIT_MAX_POLAR).abs() < 1e-6);
}

#[test]
fn orbit_zoom_respects_distance_limits() {
    let mut orbit = OrbitCamera::default();
    let start = orbit.radius();
    orbit.zoom(-120.0);
    orbit.step(0.0);
    assert!((orbit.radius() - start * ORBIT_ZOOM_STEP).abs() < 1e-4);
    for _ in 0..200 {
        orbit.zoom(-1.0);
        orbit.step(1.0 / 60.0);
    }
    assert_eq!(orbit.radius(), ORBIT_MIN_DISTANCE);
    for _ in 0..200 {
        orbit.zoom(1.0);
        orbit.step(1.0 / 60.0);
    }
    assert_eq!(orbit.radius(), ORBIT_MAX_DISTANCE);

    let mut cam = Camera::default();
    orbit.apply(&mut cam);
    assert!((cam.eye.length() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
    assert!(cam.zfar > ORBIT_MAX_DISTANCE + STAR_RADIUS + STAR_DEPTH);
}

#[test]
fn orbit_ignores_degenerate_viewport() {
    let mut orbit = OrbitCamera::default();
    let eye = orbit.eye();
    orbit.drag(50.0, 50.0, 0.0);
    orbit.step(1.0);
    assert_eq!(orbit.eye(), eye);
}
