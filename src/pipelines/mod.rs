//! Render pipeline construction.
//!
//! One pipeline per draw batch: opaque pbr, alpha-blended pbr, the emissive
//! light spheres and the fullscreen background. All of them are created
//! once up front and shared for the lifetime of the renderer.

pub mod background;
pub mod light;
pub mod pbr;
pub mod transparent;

pub struct Pipelines {
    pub pbr: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub light: wgpu::RenderPipeline,
    pub background: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        probe_bind_group_layout: &wgpu::BindGroupLayout,
        background_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            pbr: pbr::mk_pbr_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
                probe_bind_group_layout,
            ),
            transparent: transparent::mk_transparent_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
                probe_bind_group_layout,
            ),
            light: light::mk_light_pipeline(device, config, camera_bind_group_layout),
            background: background::mk_background_pipeline(
                device,
                config,
                camera_bind_group_layout,
                background_bind_group_layout,
            ),
        }
    }
}
