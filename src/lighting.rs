//! Analytic lights and their GPU representation.
//!
//! One optional directional light plus up to [`MAX_POINT_LIGHTS`] point
//! lights are packed into a single uniform buffer. Point lights can
//! additionally render a small emissive sphere at their position.

use anyhow::{ensure, Result};
use cgmath::{InnerSpace, Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{Mesh, Vertex};
use crate::data_structures::primitives;

pub const MAX_POINT_LIGHTS: usize = 8;

/// Radius of the emissive debug sphere drawn for point lights.
const LIGHT_MESH_SCALE: f32 = 0.25;

#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

#[derive(Clone, Debug)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub radius: f32,
    pub color: Vector3<f32>,
    pub intensity: f32,
    /// Whether to draw an emissive sphere at the light's position.
    pub render_mesh: bool,
}

/// Handle to a registered point light, for per-frame updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointLightHandle(pub(crate) usize);

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalRaw {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointRaw {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Uniform block shared by the shading pipelines, layout mirrored in wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub directional: DirectionalRaw,
    pub points: [PointRaw; MAX_POINT_LIGHTS],
    pub point_count: u32,
    pub _pad: [u32; 3],
}

impl Default for LightsUniform {
    fn default() -> Self {
        Self {
            directional: DirectionalRaw::default(),
            points: [PointRaw::default(); MAX_POINT_LIGHTS],
            point_count: 0,
            _pad: [0; 3],
        }
    }
}

/// Pack the current light set into the uniform layout. A missing
/// directional light packs with zero intensity.
pub fn pack_lights(
    directional: Option<&DirectionalLight>,
    points: &[PointLight],
) -> LightsUniform {
    let mut uniform = LightsUniform::default();
    if let Some(light) = directional {
        uniform.directional = DirectionalRaw {
            direction: light.direction.normalize().into(),
            intensity: light.intensity,
            color: light.color.into(),
            _pad: 0.0,
        };
    }
    for (slot, light) in uniform.points.iter_mut().zip(points) {
        *slot = PointRaw {
            position: light.position.into(),
            radius: light.radius,
            color: light.color.into(),
            intensity: light.intensity,
        };
    }
    uniform.point_count = points.len().min(MAX_POINT_LIGHTS) as u32;
    uniform
}

/// Per-instance data for the emissive light spheres.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightInstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Vertex for LightInstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LightInstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// GPU-side light state: the packed uniform, its bind group and the shared
/// sphere mesh for visualised point lights.
pub struct LightResources {
    pub directional: Option<DirectionalLight>,
    pub points: Vec<PointLight>,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub mesh: Mesh,
    pub instance_buffer: wgpu::Buffer,
    pub mesh_instance_count: u32,
}

impl LightResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightsUniform::default();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = Self::bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Lights Bind Group"),
        });

        let mesh = Mesh::from_data(device, "Light Sphere", &primitives::sphere(16, 16));
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Light Instance Buffer"),
            size: (MAX_POINT_LIGHTS * std::mem::size_of::<LightInstanceRaw>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            directional: None,
            points: Vec::new(),
            buffer,
            bind_group,
            bind_group_layout,
            mesh,
            instance_buffer,
            mesh_instance_count: 0,
        }
    }

    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Lights Bind Group Layout"),
        })
    }

    pub fn set_directional(&mut self, light: DirectionalLight) {
        self.directional = Some(light);
    }

    pub fn add_point_light(&mut self, light: PointLight) -> Result<PointLightHandle> {
        ensure!(
            self.points.len() < MAX_POINT_LIGHTS,
            "point light limit of {} reached",
            MAX_POINT_LIGHTS
        );
        self.points.push(light);
        Ok(PointLightHandle(self.points.len() - 1))
    }

    pub fn point_light_mut(&mut self, handle: PointLightHandle) -> &mut PointLight {
        &mut self.points[handle.0]
    }

    /// Re-pack the uniform and the emissive sphere instances and upload both.
    pub fn upload(&mut self, queue: &wgpu::Queue) {
        let uniform = pack_lights(self.directional.as_ref(), &self.points);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));

        let instances: Vec<LightInstanceRaw> = self
            .points
            .iter()
            .filter(|light| light.render_mesh)
            .map(|light| LightInstanceRaw {
                model: (Matrix4::from_translation(light.position)
                    * Matrix4::from_scale(LIGHT_MESH_SCALE))
                .into(),
                color: [light.color.x, light.color.y, light.color.z, 1.0],
            })
            .collect();
        self.mesh_instance_count = instances.len() as u32;
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
    }
}
