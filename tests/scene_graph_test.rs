use cgmath::{Deg, InnerSpace, Quaternion, Rotation3, Vector3};
use ember_ngin::data_structures::{
    instance::Instance,
    scene_graph::{ContainerNode, SceneNode},
};

fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < 1e-5,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn local_setters_touch_the_local_transform() {
    let mut node = ContainerNode::new(Instance::new());
    node.set_position(Vector3::new(0.0, 2.5, 0.0));
    node.set_scale(0.65);

    let (local, world) = &node.instances()[0];
    assert_close(local.position, Vector3::new(0.0, 2.5, 0.0));
    assert_close(local.scale, Vector3::new(0.65, 0.65, 0.65));
    // World stays untouched until an explicit update.
    assert_close(world.position, Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn world_transforms_propagate_down_the_tree() {
    let mut root = ContainerNode::new(Instance::new());
    root.set_position(Vector3::new(0.0, 2.5, 0.0));

    let mut child = ContainerNode::new(Instance::new());
    child.set_position(Vector3::new(1.0, 0.0, 0.0));
    child.set_scale(0.65);

    let mut grandchild = ContainerNode::new(Instance::new());
    grandchild.set_position(Vector3::new(0.0, 1.0, 0.0));

    child.add_child(Box::new(grandchild));
    root.add_child(Box::new(child));
    root.update_world_transform_all();

    let child = &root.children()[0];
    let (_, child_world) = &child.instances()[0];
    assert_close(child_world.position, Vector3::new(1.0, 2.5, 0.0));
    assert_close(child_world.scale, Vector3::new(0.65, 0.65, 0.65));

    let grandchild = &child.children()[0];
    let (_, grand_world) = &grandchild.instances()[0];
    // Child scale shrinks the grandchild offset.
    assert_close(grand_world.position, Vector3::new(1.0, 2.5 + 0.65, 0.0));
    assert_close(grand_world.scale, Vector3::new(0.65, 0.65, 0.65));
}

#[test]
fn parent_rotation_orbits_children() {
    let mut root = ContainerNode::new(Instance::new());
    root.set_rotation(Quaternion::from_axis_angle(Vector3::unit_y(), Deg(90.0)));

    let mut child = ContainerNode::new(Instance::new());
    child.set_position(Vector3::new(1.0, 0.0, 0.0));
    root.add_child(Box::new(child));
    root.update_world_transform_all();

    let (_, world) = &root.children()[0].instances()[0];
    assert_close(world.position, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn re_update_tracks_new_local_transforms() {
    let mut root = ContainerNode::new(Instance::new());
    let child = ContainerNode::new(Instance::new());
    root.add_child(Box::new(child));

    root.set_position(Vector3::new(0.0, 1.0, 0.0));
    root.update_world_transform_all();
    let (_, world) = &root.children()[0].instances()[0];
    assert_close(world.position, Vector3::new(0.0, 1.0, 0.0));

    // Mutate through children_mut, as per-frame animation does.
    root.children_mut()[0].set_position(Vector3::new(2.0, 0.0, 0.0));
    root.update_world_transform_all();
    let (_, world) = &root.children()[0].instances()[0];
    assert_close(world.position, Vector3::new(2.0, 1.0, 0.0));
}

#[test]
fn root_world_equals_local_without_parent() {
    let mut root = ContainerNode::new(Instance {
        position: Vector3::new(3.0, 0.0, -2.0),
        ..Instance::new()
    });
    root.update_world_transform_all();
    let (local, world) = &root.instances()[0];
    assert_eq!(local, world);
}
