//! Hierarchical scene organisation.
//!
//! Nodes keep a pair of transforms per instance: the local transform set by
//! the application and the world transform derived from the parent chain.
//! [`SceneNode::update_world_transform_all`] recomputes the world side after
//! local edits, [`SceneNode::write_to_buffers`] uploads it and
//! [`SceneNode::collect_draws`] hands the node's draw data to the frame
//! queue.

use std::sync::Arc;

use cgmath::{Quaternion, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::instance::Instance;
use crate::data_structures::model::{Material, Mesh, MeshData, Model};
use crate::renderer::FrameQueue;

pub trait SceneNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>);
    fn children(&self) -> &[Box<dyn SceneNode>];
    fn children_mut(&mut self) -> &mut [Box<dyn SceneNode>];

    /// The (local, world) transform pairs, one per instance.
    fn instances(&self) -> &[(Instance, Instance)];
    fn instances_mut(&mut self) -> &mut Vec<(Instance, Instance)>;

    /// Upload world transforms to this node's GPU buffers (if any) and
    /// recurse into the children.
    fn write_to_buffers(&self, queue: &wgpu::Queue);

    /// Append this subtree's draw data to the frame queue.
    fn collect_draws<'a>(&'a self, frame: &mut FrameQueue<'a>);

    /// Set the local position of the first instance.
    fn set_position(&mut self, position: Vector3<f32>) {
        if let Some((local, _)) = self.instances_mut().first_mut() {
            local.position = position;
        }
    }

    /// Set the local rotation of the first instance.
    fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        if let Some((local, _)) = self.instances_mut().first_mut() {
            local.rotation = rotation;
        }
    }

    /// Set a uniform local scale on the first instance.
    fn set_scale(&mut self, scale: f32) {
        if let Some((local, _)) = self.instances_mut().first_mut() {
            local.scale = Vector3::new(scale, scale, scale);
        }
    }

    /// Recompute world transforms for this subtree. Each instance composes
    /// with the matching parent world transform; nodes with more instances
    /// than the parent reuse the parent's last one.
    fn update_world_transforms(&mut self, parent_worlds: &[Instance]) {
        for (i, (local, world)) in self.instances_mut().iter_mut().enumerate() {
            let parent = parent_worlds.get(i).or_else(|| parent_worlds.last());
            *world = match parent {
                Some(parent) => parent * local,
                None => local.clone(),
            };
        }
        let worlds: Vec<Instance> = self
            .instances()
            .iter()
            .map(|(_, world)| world.clone())
            .collect();
        for child in self.children_mut() {
            child.update_world_transforms(&worlds);
        }
    }

    /// Recompute world transforms treating this node as a root.
    fn update_world_transform_all(&mut self) {
        self.update_world_transforms(&[]);
    }
}

/// A transform-only grouping node without geometry.
#[derive(Default)]
pub struct ContainerNode {
    instances: Vec<(Instance, Instance)>,
    children: Vec<Box<dyn SceneNode>>,
}

impl ContainerNode {
    pub fn new(instance: Instance) -> Self {
        Self {
            instances: vec![(instance.clone(), instance)],
            children: Vec::new(),
        }
    }
}

impl SceneNode for ContainerNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn children(&self) -> &[Box<dyn SceneNode>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn SceneNode>] {
        &mut self.children
    }

    fn instances(&self) -> &[(Instance, Instance)] {
        &self.instances
    }

    fn instances_mut(&mut self) -> &mut Vec<(Instance, Instance)> {
        &mut self.instances
    }

    fn write_to_buffers(&self, queue: &wgpu::Queue) {
        for child in &self.children {
            child.write_to_buffers(queue);
        }
    }

    fn collect_draws<'a>(&'a self, frame: &mut FrameQueue<'a>) {
        for child in &self.children {
            child.collect_draws(frame);
        }
    }
}

/// A scene node carrying a model and an instance buffer.
pub struct MeshNode {
    pub model: Model,
    instance_buffer: wgpu::Buffer,
    instances: Vec<(Instance, Instance)>,
    children: Vec<Box<dyn SceneNode>>,
}

impl MeshNode {
    /// A node with a single mesh and material.
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        data: &MeshData,
        material: Arc<Material>,
        amount: u32,
    ) -> Self {
        let model = Model {
            meshes: vec![Mesh::from_data(device, name, data)],
            materials: vec![material],
        };
        Self::from_model(amount, device, model)
    }

    pub fn from_model(amount: u32, device: &wgpu::Device, model: Model) -> Self {
        let instances: Vec<(Instance, Instance)> = (0..amount)
            .map(|_| (Instance::new(), Instance::new()))
            .collect();
        let raw: Vec<_> = instances.iter().map(|(_, world)| world.to_raw()).collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            model,
            instance_buffer,
            instances,
            children: Vec::new(),
        }
    }
}

impl SceneNode for MeshNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn children(&self) -> &[Box<dyn SceneNode>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn SceneNode>] {
        &mut self.children
    }

    fn instances(&self) -> &[(Instance, Instance)] {
        &self.instances
    }

    fn instances_mut(&mut self) -> &mut Vec<(Instance, Instance)> {
        &mut self.instances
    }

    fn write_to_buffers(&self, queue: &wgpu::Queue) {
        let raw: Vec<_> = self
            .instances
            .iter()
            .map(|(_, world)| world.to_raw())
            .collect();
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
        for child in &self.children {
            child.write_to_buffers(queue);
        }
    }

    fn collect_draws<'a>(&'a self, frame: &mut FrameQueue<'a>) {
        frame.push_instanced(
            &self.model,
            &self.instance_buffer,
            self.instances.len() as u32,
        );
        for child in &self.children {
            child.collect_draws(frame);
        }
    }
}
