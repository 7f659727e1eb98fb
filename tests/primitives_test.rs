use cgmath::{InnerSpace, Vector3};
use ember_ngin::data_structures::primitives;

#[test]
fn plane_is_a_flat_grid_facing_up() {
    let data = primitives::plane(4, 4);
    assert_eq!(data.vertices.len(), 25);
    assert_eq!(data.indices.len(), 4 * 4 * 6);
    for v in &data.vertices {
        assert_eq!(v.position[1], 0.0);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn plane_tangents_follow_the_uv_axes() {
    let data = primitives::plane(4, 4);
    for v in &data.vertices {
        let tangent = Vector3::from(v.tangent).normalize();
        assert!((tangent - Vector3::unit_x()).magnitude() < 1e-4);
    }
}

#[test]
fn sphere_vertices_sit_on_the_unit_sphere() {
    let data = primitives::sphere(8, 8);
    assert_eq!(data.vertices.len(), 81);
    assert_eq!(data.indices.len(), 8 * 8 * 6);
    for v in &data.vertices {
        let p = Vector3::from(v.position);
        assert!((p.magnitude() - 1.0).abs() < 1e-5);
        // On a sphere the normal is the position itself.
        assert!((Vector3::from(v.normal) - p).magnitude() < 1e-5);
    }
}

#[test]
fn torus_vertices_keep_tube_distance() {
    let (r1, r2) = (2.0, 0.4);
    let data = primitives::torus(r1, r2, 16, 16);
    assert_eq!(data.vertices.len(), 17 * 17);
    assert_eq!(data.indices.len(), 16 * 16 * 6);
    for v in &data.vertices {
        let p = Vector3::from(v.position);
        let ring_distance = (p.x * p.x + p.z * p.z).sqrt();
        let tube = ((ring_distance - r1).powi(2) + p.y * p.y).sqrt();
        assert!(
            (tube - r2).abs() < 1e-5,
            "vertex {:?} is {} from the ring, expected {}",
            p,
            tube,
            r2
        );
    }
}

#[test]
fn torus_normals_point_away_from_the_ring() {
    let data = primitives::torus(2.0, 0.4, 8, 8);
    for v in &data.vertices {
        let n = Vector3::from(v.normal);
        assert!((n.magnitude() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn cube_has_four_vertices_per_face() {
    let data = primitives::cube();
    assert_eq!(data.vertices.len(), 24);
    assert_eq!(data.indices.len(), 36);
    for v in &data.vertices {
        for c in v.position {
            assert!(c.abs() <= 0.5 + 1e-6);
        }
        // Face normals are axis aligned.
        let n = Vector3::from(v.normal);
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1.0);
    }
}

#[test]
fn indices_stay_in_bounds() {
    for data in [
        primitives::plane(3, 5),
        primitives::sphere(7, 9),
        primitives::torus(2.0, 0.4, 5, 6),
        primitives::cube(),
    ] {
        let max = data.vertices.len() as u32;
        assert!(data.indices.iter().all(|&i| i < max));
        assert_eq!(data.indices.len() % 3, 0);
    }
}
