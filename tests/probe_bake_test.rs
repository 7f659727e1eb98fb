use std::f32::consts::PI;

use cgmath::{Vector3, Zero};
use ember_ngin::{
    lighting::{DirectionalLight, PointLight},
    probes::{bake_irradiance, IrradianceProbe, ProbeSet, MAX_PROBES},
};

fn red_light(position: Vector3<f32>, radius: f32) -> PointLight {
    PointLight {
        position,
        radius,
        color: Vector3::new(1.0, 0.0, 0.0),
        intensity: 1.0,
        render_mesh: false,
    }
}

#[test]
fn directional_light_bakes_distance_independent() {
    let sun = DirectionalLight {
        direction: Vector3::new(0.2, -1.0, 0.25),
        color: Vector3::new(1.0, 0.89, 0.7),
        intensity: 50.0,
    };
    let near = bake_irradiance(Vector3::zero(), Some(&sun), &[]);
    let far = bake_irradiance(Vector3::new(100.0, 0.0, 0.0), Some(&sun), &[]);
    assert_eq!(near, far);
    assert!((near.x - 50.0 / (4.0 * PI)).abs() < 1e-4);
}

#[test]
fn point_light_contribution_is_clamped_near_the_source() {
    let light = red_light(Vector3::zero(), 4.0);
    let at_source = bake_irradiance(Vector3::zero(), None, &[light]);
    // Window is 1 at the source, denominator clamps at 1e-2.
    assert!((at_source.x - 100.0 / (4.0 * PI)).abs() < 1e-3);
    assert_eq!(at_source.y, 0.0);
    assert_eq!(at_source.z, 0.0);
}

#[test]
fn point_light_reaches_zero_at_its_radius() {
    let light = red_light(Vector3::zero(), 4.0);
    let at_radius = bake_irradiance(Vector3::new(4.0, 0.0, 0.0), None, &[light.clone()]);
    assert_eq!(at_radius, Vector3::zero());
    let beyond = bake_irradiance(Vector3::new(10.0, 0.0, 0.0), None, &[light]);
    assert_eq!(beyond, Vector3::zero());
}

#[test]
fn point_light_falls_off_with_distance() {
    let light = red_light(Vector3::zero(), 8.0);
    let closer = bake_irradiance(Vector3::new(1.0, 0.0, 0.0), None, &[light.clone()]);
    let farther = bake_irradiance(Vector3::new(3.0, 0.0, 0.0), None, &[light]);
    assert!(closer.x > farther.x);
    assert!(farther.x > 0.0);
}

#[test]
fn contributions_accumulate_over_lights() {
    let a = red_light(Vector3::new(-1.0, 0.0, 0.0), 8.0);
    let b = red_light(Vector3::new(1.0, 0.0, 0.0), 8.0);
    let solo = bake_irradiance(Vector3::zero(), None, &[a.clone()]);
    let both = bake_irradiance(Vector3::zero(), None, &[a, b]);
    assert!((both.x - 2.0 * solo.x).abs() < 1e-5);
}

#[test]
fn probe_set_bakes_and_packs() {
    let mut set = ProbeSet::default();
    let near = set
        .add(IrradianceProbe {
            position: Vector3::new(0.5, 0.0, 0.0),
            radius: 3.25,
        })
        .unwrap();
    let far = set
        .add(IrradianceProbe {
            position: Vector3::new(100.0, 0.0, 0.0),
            radius: 4.0,
        })
        .unwrap();

    set.bake(None, &[red_light(Vector3::zero(), 4.0)]);
    assert!(set.irradiance(near).x > 0.0);
    assert_eq!(set.irradiance(far), Vector3::zero());

    let uniform = set.to_uniform();
    assert_eq!(uniform.probe_count, 2);
    assert_eq!(uniform.probes[0].position, [0.5, 0.0, 0.0]);
    assert_eq!(uniform.probes[0].radius, 3.25);
    assert_eq!(uniform.probes[0].irradiance[0], set.irradiance(near).x);
    // Slots past the count stay zeroed.
    assert_eq!(uniform.probes[2].radius, 0.0);
}

#[test]
fn probe_set_rejects_overflow() {
    let mut set = ProbeSet::default();
    for i in 0..MAX_PROBES {
        set.add(IrradianceProbe {
            position: Vector3::new(i as f32, 0.0, 0.0),
            radius: 4.0,
        })
        .unwrap();
    }
    assert_eq!(set.len(), MAX_PROBES);
    assert!(set
        .add(IrradianceProbe {
            position: Vector3::zero(),
            radius: 4.0,
        })
        .is_err());
}

#[test]
fn rebake_tracks_moved_lights() {
    let mut set = ProbeSet::default();
    let probe = set
        .add(IrradianceProbe {
            position: Vector3::zero(),
            radius: 4.0,
        })
        .unwrap();

    set.bake(None, &[red_light(Vector3::new(1.0, 0.0, 0.0), 4.0)]);
    let before = set.irradiance(probe);
    set.bake(None, &[red_light(Vector3::new(3.0, 0.0, 0.0), 4.0)]);
    let after = set.irradiance(probe);
    assert!(before.x > after.x);
}
