//! The pushed-command renderer.
//!
//! Scene nodes push their draw data into a [`FrameQueue`] each frame; the
//! renderer then flushes the queue in batch order: emissive light meshes,
//! opaque geometry, the background and finally alpha-blended geometry.

use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        model::{DrawLight, DrawModel, Material, MaterialDesc, Model},
        scene_graph::SceneNode,
        texture::Texture,
    },
    lighting::{DirectionalLight, LightResources, PointLight, PointLightHandle},
    pipelines::{
        background::{background_layout, BackgroundUniform},
        Pipelines,
    },
    probes::{IrradianceProbe, ProbeHandle, ProbeResources},
    resources::texture::material_layout,
};

/// One instanced draw: a model plus the instance buffer slice to draw it
/// with.
pub struct Instanced<'a> {
    pub model: &'a Model,
    pub instance_buffer: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Draw commands collected for a single frame.
#[derive(Default)]
pub struct FrameQueue<'a> {
    opaque: Vec<Instanced<'a>>,
    transparent: Vec<Instanced<'a>>,
    background: bool,
}

impl<'a> FrameQueue<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a scene graph subtree. The node decides which batches it lands
    /// in via [`SceneNode::collect_draws`].
    pub fn push(&mut self, node: &'a dyn SceneNode) {
        node.collect_draws(self);
    }

    pub fn push_instanced(
        &mut self,
        model: &'a Model,
        instance_buffer: &'a wgpu::Buffer,
        amount: u32,
    ) {
        let command = Instanced {
            model,
            instance_buffer,
            amount,
        };
        if model.is_transparent() {
            self.transparent.push(command);
        } else {
            self.opaque.push(command);
        }
    }

    /// Request the procedural sky for this frame.
    pub fn push_background(&mut self) {
        self.background = true;
    }

    pub fn opaque_count(&self) -> usize {
        self.opaque.len()
    }

    pub fn transparent_count(&self) -> usize {
        self.transparent.len()
    }

    pub fn has_background(&self) -> bool {
        self.background
    }
}

pub struct Renderer {
    pub pipelines: Pipelines,
    pub lights: LightResources,
    pub probes: ProbeResources,
    material_layout: wgpu::BindGroupLayout,
    background: BackgroundUniform,
    background_buffer: wgpu::Buffer,
    background_bind_group: wgpu::BindGroup,
    default_normal: Texture,
}

impl Renderer {
    pub fn new(ctx: &Context) -> Self {
        let device = &ctx.device;
        let lights = LightResources::new(device);
        let probes = ProbeResources::new(device);

        let background = BackgroundUniform::default();
        let background_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Background Buffer"),
            contents: bytemuck::cast_slice(&[background]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let background_bind_group_layout = background_layout(device);
        let background_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &background_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: background_buffer.as_entire_binding(),
            }],
            label: Some("Background Bind Group"),
        });

        let pipelines = Pipelines::new(
            device,
            &ctx.config,
            &ctx.camera.bind_group_layout,
            &lights.bind_group_layout,
            &probes.bind_group_layout,
            &background_bind_group_layout,
        );

        Self {
            pipelines,
            lights,
            probes,
            material_layout: material_layout(device),
            background,
            background_buffer,
            background_bind_group,
            default_normal: Texture::create_default_normal_map(1, 1, device, &ctx.queue),
        }
    }

    /// Create a material from shading factors alone, backed by 1x1 default
    /// maps. The albedo factor carries the tint.
    pub fn create_material(&self, ctx: &Context, name: &str, desc: &MaterialDesc) -> Arc<Material> {
        let albedo = Texture::create_default_albedo([255, 255, 255, 255], &ctx.device, &ctx.queue);
        Arc::new(Material::new(
            &ctx.device,
            name,
            desc,
            albedo,
            self.default_normal.clone(),
            &self.material_layout,
        ))
    }

    pub fn material_layout(&self) -> &wgpu::BindGroupLayout {
        &self.material_layout
    }

    pub fn set_directional_light(&mut self, light: DirectionalLight) {
        self.lights.set_directional(light);
    }

    pub fn add_point_light(&mut self, light: PointLight) -> Result<PointLightHandle> {
        self.lights.add_point_light(light)
    }

    pub fn point_light_mut(&mut self, handle: PointLightHandle) -> &mut PointLight {
        self.lights.point_light_mut(handle)
    }

    pub fn add_irradiance_probe(&mut self, probe: IrradianceProbe) -> Result<ProbeHandle> {
        self.probes.set.add(probe)
    }

    /// Evaluate all probes against the current lights and upload the result.
    pub fn bake_probes(&mut self, queue: &wgpu::Queue) {
        self.probes
            .set
            .bake(self.lights.directional.as_ref(), &self.lights.points);
        self.probes.upload(queue);
    }

    pub fn set_background(&mut self, queue: &wgpu::Queue, exposure: f32, softness: f32) {
        self.background.exposure = exposure;
        self.background.softness = softness;
        queue.write_buffer(
            &self.background_buffer,
            0,
            bytemuck::cast_slice(&[self.background]),
        );
    }

    /// Per-frame uploads that must happen before draw data is collected.
    pub fn prepare_frame(&mut self, ctx: &Context) {
        self.lights.upload(&ctx.queue);
    }

    /// Flush the frame queue into a render pass on `view` and submit it.
    pub fn render_pushed_commands(
        &self,
        ctx: &Context,
        frame: &FrameQueue<'_>,
        view: &wgpu::TextureView,
    ) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.lights.mesh_instance_count > 0 {
                render_pass.set_pipeline(&self.pipelines.light);
                render_pass.set_vertex_buffer(1, self.lights.instance_buffer.slice(..));
                render_pass.draw_light_mesh_instanced(
                    &self.lights.mesh,
                    0..self.lights.mesh_instance_count,
                    &ctx.camera.bind_group,
                );
            }

            render_pass.set_pipeline(&self.pipelines.pbr);
            for command in &frame.opaque {
                render_pass.set_vertex_buffer(1, command.instance_buffer.slice(..));
                render_pass.draw_model_instanced(
                    command.model,
                    0..command.amount,
                    &ctx.camera.bind_group,
                    &self.lights.bind_group,
                    &self.probes.bind_group,
                );
            }

            if frame.background {
                render_pass.set_pipeline(&self.pipelines.background);
                render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(1, &self.background_bind_group, &[]);
                render_pass.draw(0..3, 0..1);
            }

            // Transparent geometry last so the sky shows through it.
            render_pass.set_pipeline(&self.pipelines.transparent);
            for command in &frame.transparent {
                render_pass.set_vertex_buffer(1, command.instance_buffer.slice(..));
                render_pass.draw_model_instanced(
                    command.model,
                    0..command.amount,
                    &ctx.camera.bind_group,
                    &self.lights.bind_group,
                    &self.probes.bind_group,
                );
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
    }
}
