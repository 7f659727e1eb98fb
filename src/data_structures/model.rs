//! Mesh and material definitions plus their GPU resources.
//!
//! [`MeshData`] is the CPU side of a mesh (vertices and indices), [`Mesh`]
//! the uploaded GPU buffers. [`Material`] bundles PBR shading factors with
//! diffuse/normal textures into one bind group; materials are shared across
//! scene nodes via `Arc`. The [`DrawModel`] and [`DrawLight`] extension
//! traits add the actual draw calls to `wgpu::RenderPass`.

use std::{ops::Range, sync::Arc};

use wgpu::util::DeviceExt;

use crate::data_structures::texture::Texture;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 11]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// CPU-side mesh geometry, produced by the primitive generators and the OBJ
/// loader before upload.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Derive per-vertex tangents and bitangents from positions and texture
    /// coordinates, averaged over all triangles sharing a vertex.
    pub fn compute_tangents(&mut self) {
        use cgmath::{Vector2, Vector3, Zero};

        for v in self.vertices.iter_mut() {
            v.tangent = [0.0; 3];
            v.bitangent = [0.0; 3];
        }
        let mut triangles_included = vec![0u32; self.vertices.len()];

        for c in self.indices.chunks(3) {
            let v0 = self.vertices[c[0] as usize];
            let v1 = self.vertices[c[1] as usize];
            let v2 = self.vertices[c[2] as usize];

            let pos0: Vector3<f32> = v0.position.into();
            let pos1: Vector3<f32> = v1.position.into();
            let pos2: Vector3<f32> = v2.position.into();

            let uv0: Vector2<f32> = v0.tex_coords.into();
            let uv1: Vector2<f32> = v1.tex_coords.into();
            let uv2: Vector2<f32> = v2.tex_coords.into();

            let delta_pos1 = pos1 - pos0;
            let delta_pos2 = pos2 - pos0;
            let delta_uv1 = uv1 - uv0;
            let delta_uv2 = uv2 - uv0;

            let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
            // Degenerate UVs contribute nothing.
            let (tangent, bitangent) = if det.abs() > f32::EPSILON {
                let r = 1.0 / det;
                (
                    (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r,
                    (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * r,
                )
            } else {
                (Vector3::zero(), Vector3::zero())
            };

            for i in c {
                let v = &mut self.vertices[*i as usize];
                v.tangent = (tangent + Vector3::from(v.tangent)).into();
                v.bitangent = (bitangent + Vector3::from(v.bitangent)).into();
                triangles_included[*i as usize] += 1;
            }
        }

        for (i, n) in triangles_included.into_iter().enumerate() {
            if n > 0 {
                let denom = 1.0 / n as f32;
                let v = &mut self.vertices[i];
                v.tangent = (Vector3::from(v.tangent) * denom).into();
                v.bitangent = (Vector3::from(v.bitangent) * denom).into();
            }
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    /// Index into the owning model's material list.
    pub material: usize,
}

impl Mesh {
    pub fn from_data(device: &wgpu::Device, name: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
            material: 0,
        }
    }
}

/// Shading parameters for a material. All factors are plain typed fields;
/// they are packed into [`MaterialUniform`] once at material creation.
#[derive(Clone, Copy, Debug)]
pub struct MaterialDesc {
    pub albedo: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub exposure: f32,
    pub transparent: bool,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            albedo: [1.0, 1.0, 1.0, 1.0],
            metallic: 0.1,
            roughness: 0.6,
            exposure: 1.0,
            transparent: false,
        }
    }
}

impl MaterialDesc {
    /// A tinted, strongly reflective see-through material.
    pub fn glass() -> Self {
        Self {
            albedo: [0.9, 0.95, 1.0, 0.35],
            metallic: 0.0,
            roughness: 0.05,
            transparent: true,
            ..Default::default()
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub albedo: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub exposure: f32,
    pub _pad: f32,
}

impl From<&MaterialDesc> for MaterialUniform {
    fn from(desc: &MaterialDesc) -> Self {
        Self {
            albedo: desc.albedo,
            metallic: desc.metallic,
            roughness: desc.roughness,
            exposure: desc.exposure,
            _pad: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub transparent: bool,
    pub diffuse_texture: Texture,
    pub normal_texture: Texture,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        desc: &MaterialDesc,
        diffuse_texture: Texture,
        normal_texture: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniform = MaterialUniform::from(desc);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Material Buffer", name)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let diffuse_sampler = diffuse_texture
            .sampler
            .clone()
            .unwrap_or_else(|| crate::data_structures::texture::create_default_sampler(device));
        let normal_sampler = normal_texture
            .sampler
            .clone()
            .unwrap_or_else(|| crate::data_structures::texture::create_default_sampler(device));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&diffuse_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&diffuse_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&normal_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&normal_sampler),
                },
            ],
            label: Some(&format!("{} Material Bind Group", name)),
        });

        Self {
            name: name.to_string(),
            transparent: desc.transparent,
            diffuse_texture,
            normal_texture,
            buffer,
            bind_group,
        }
    }
}

#[derive(Debug)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Arc<Material>>,
}

impl Model {
    /// Whether the model as a whole goes into the transparent batch.
    pub fn is_transparent(&self) -> bool {
        !self.materials.is_empty() && self.materials.iter().all(|m| m.transparent)
    }
}

/// Draw calls for instanced model rendering. Bind group order matches the
/// pbr pipeline layout: material, camera, lights, probes.
pub trait DrawModel {
    fn draw_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
        probe_bind_group: &wgpu::BindGroup,
    );
    fn draw_model_instanced(
        &mut self,
        model: &Model,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
        probe_bind_group: &wgpu::BindGroup,
    );
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
        probe_bind_group: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, &material.bind_group, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.set_bind_group(2, light_bind_group, &[]);
        self.set_bind_group(3, probe_bind_group, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }

    fn draw_model_instanced(
        &mut self,
        model: &Model,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
        probe_bind_group: &wgpu::BindGroup,
    ) {
        for mesh in &model.meshes {
            let material = &model.materials[mesh.material];
            self.draw_mesh_instanced(
                mesh,
                material,
                instances.clone(),
                camera_bind_group,
                light_bind_group,
                probe_bind_group,
            );
        }
    }
}

/// Draw calls for the unlit emissive light meshes.
pub trait DrawLight {
    fn draw_light_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
    );
}

impl DrawLight for wgpu::RenderPass<'_> {
    fn draw_light_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        instances: Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, camera_bind_group, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }
}
