use std::mem::size_of;

use cgmath::{InnerSpace, Vector3};
use ember_ngin::{
    camera::CameraUniform,
    data_structures::{instance::InstanceRaw, model::MaterialUniform},
    lighting::{
        pack_lights, DirectionalLight, LightInstanceRaw, LightsUniform, PointLight,
        MAX_POINT_LIGHTS,
    },
    probes::ProbesUniform,
};

fn point(position: Vector3<f32>) -> PointLight {
    PointLight {
        position,
        radius: 4.0,
        color: Vector3::new(1.0, 0.25, 0.25),
        intensity: 50.0,
        render_mesh: true,
    }
}

// The uniform structs are byte-copied into GPU buffers, so their sizes must
// match the wgsl declarations exactly.
#[test]
fn uniform_layouts_match_wgsl() {
    assert_eq!(size_of::<CameraUniform>(), 144);
    assert_eq!(size_of::<MaterialUniform>(), 32);
    assert_eq!(size_of::<LightsUniform>(), 304);
    assert_eq!(size_of::<ProbesUniform>(), 2064);
    assert_eq!(size_of::<InstanceRaw>(), 104);
    assert_eq!(size_of::<LightInstanceRaw>(), 80);
}

#[test]
fn pack_normalizes_the_directional_direction() {
    let sun = DirectionalLight {
        direction: Vector3::new(0.2, -1.0, 0.25),
        color: Vector3::new(1.0, 0.89, 0.7),
        intensity: 50.0,
    };
    let uniform = pack_lights(Some(&sun), &[]);
    let direction = Vector3::from(uniform.directional.direction);
    assert!((direction.magnitude() - 1.0).abs() < 1e-6);
    assert_eq!(uniform.directional.intensity, 50.0);
    assert_eq!(uniform.point_count, 0);
}

#[test]
fn missing_directional_packs_dark() {
    let uniform = pack_lights(None, &[point(Vector3::new(0.0, 1.0, 0.0))]);
    assert_eq!(uniform.directional.intensity, 0.0);
    assert_eq!(uniform.point_count, 1);
    assert_eq!(uniform.points[0].position, [0.0, 1.0, 0.0]);
    assert_eq!(uniform.points[0].radius, 4.0);
}

#[test]
fn pack_truncates_past_the_point_light_limit() {
    let lights: Vec<PointLight> = (0..MAX_POINT_LIGHTS + 3)
        .map(|i| point(Vector3::new(i as f32, 0.0, 0.0)))
        .collect();
    let uniform = pack_lights(None, &lights);
    assert_eq!(uniform.point_count, MAX_POINT_LIGHTS as u32);
    assert_eq!(
        uniform.points[MAX_POINT_LIGHTS - 1].position,
        [(MAX_POINT_LIGHTS - 1) as f32, 0.0, 0.0]
    );
}

#[test]
fn unused_point_slots_stay_zeroed() {
    let uniform = pack_lights(None, &[point(Vector3::new(0.0, 0.0, 0.0))]);
    for slot in &uniform.points[1..] {
        assert_eq!(slot.intensity, 0.0);
        assert_eq!(slot.radius, 0.0);
    }
}
