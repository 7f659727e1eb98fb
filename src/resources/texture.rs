use std::{
    io::{BufReader, Cursor},
    sync::Arc,
};

use crate::data_structures::{
    model::{self, MaterialDesc},
    texture,
};

/// The bind group layout every material uses: shading factor uniform plus
/// diffuse and normal texture/sampler pairs.
pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 4,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Material Bind Group Layout"),
    })
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = std::path::Path::new("./").join("assets").join(file_name);
    let txt = std::fs::read_to_string(path)?;
    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = std::path::Path::new("./").join("assets").join(file_name);
    let data = std::fs::read(path)?;
    Ok(data)
}

pub async fn load_texture(
    file_name: &str,
    is_normal_map: bool,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    texture::Texture::from_bytes(device, queue, &data, file_name, is_normal_map)
}

pub async fn load_textures(
    file_name: &str,
    queue: &wgpu::Queue,
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<(Vec<Arc<model::Material>>, Vec<tobj::Model>)> {
    let obj_text: String = load_string(file_name).await?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| async move {
            match load_string(&p).await {
                Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                Err(_) => Err(tobj::LoadError::OpenFileFailed),
            }
        },
    )
    .await?;

    // We rather use default maps when none is referenced instead of
    // changing the pipeline per material.
    let mut materials = Vec::new();
    for m in obj_materials? {
        let diffuse_texture = match &m.diffuse_texture {
            Some(m_diffuse_texture) => load_texture(m_diffuse_texture, false, device, queue).await?,
            None => {
                log::warn!("Material {} in {file_name} references no texture.", m.name);
                texture::Texture::create_default_albedo([255, 255, 255, 255], device, queue)
            }
        };
        let normal_texture = match &m.normal_texture {
            Some(m_normal_texture) => load_texture(m_normal_texture, true, device, queue).await?,
            None => texture::Texture::create_default_normal_map(1, 1, device, queue),
        };
        let desc = MaterialDesc {
            albedo: m
                .diffuse
                .map_or([1.0, 1.0, 1.0, 1.0], |d| [d[0], d[1], d[2], 1.0]),
            ..Default::default()
        };
        materials.push(Arc::new(model::Material::new(
            device,
            &m.name,
            &desc,
            diffuse_texture,
            normal_texture,
            layout,
        )));
    }
    Ok((materials, models))
}
