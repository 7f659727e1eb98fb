use cgmath::{Deg, InnerSpace, One, Quaternion, Rotation3, SquareMatrix, Vector3};
use ember_ngin::data_structures::instance::Instance;

fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < 1e-5,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn identity_composition_is_identity() {
    let identity = Instance::new();
    let composed = identity.clone() * identity.clone();
    assert_eq!(composed, identity);
}

#[test]
fn parent_translation_and_scale_apply_to_child_position() {
    let parent = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        rotation: Quaternion::one(),
        scale: Vector3::new(2.0, 2.0, 2.0),
    };
    let child = Instance {
        position: Vector3::new(0.0, 1.0, 0.0),
        ..Instance::new()
    };

    let world = parent * child;
    assert_close(world.position, Vector3::new(1.0, 2.0, 0.0));
    assert_close(world.scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn parent_rotation_moves_child_position() {
    let parent = Instance {
        rotation: Quaternion::from_axis_angle(Vector3::unit_y(), Deg(90.0)),
        ..Instance::new()
    };
    let child = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        ..Instance::new()
    };

    let world = parent * child;
    assert_close(world.position, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn composition_is_associative_on_positions() {
    let a = Instance {
        position: Vector3::new(0.0, 2.5, 0.0),
        ..Instance::new()
    };
    let b = Instance {
        rotation: Quaternion::from_axis_angle(Vector3::unit_y(), Deg(90.0)),
        scale: Vector3::new(0.65, 0.65, 0.65),
        ..Instance::new()
    };
    let c = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        ..Instance::new()
    };

    let left = (a.clone() * b.clone()) * c.clone();
    let right = a * (b * c);
    assert_close(left.position, right.position);
    assert_close(left.scale, right.scale);
}

#[test]
fn matrix_carries_translation_and_scale() {
    let instance = Instance {
        position: Vector3::new(3.0, -1.0, 2.0),
        scale: Vector3::new(2.0, 2.0, 2.0),
        ..Instance::new()
    };
    let matrix = instance.to_matrix();
    assert_close(matrix.w.truncate(), Vector3::new(3.0, -1.0, 2.0));
    // Uniform scale 2 gives determinant 8.
    assert!((matrix.determinant() - 8.0).abs() < 1e-4);
}

#[test]
fn mirrored_scale_flips_matrix_handedness() {
    let instance = Instance {
        scale: Vector3::new(-1.0, 1.0, 1.0),
        ..Instance::new()
    };
    assert!(instance.to_matrix().determinant() < 0.0);
}
