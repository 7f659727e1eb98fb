use crate::{data_structures::model, resources::texture::material_layout};

/**
 * This module contains all logic for loading meshes and textures from
 * external files in the `assets` directory.
 */
pub mod mesh;
pub mod texture;

pub async fn load_model_obj(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let bind_group_layout = material_layout(device);

    let (mut materials, models) =
        texture::load_textures(file_name, queue, device, &bind_group_layout).await?;
    if materials.is_empty() {
        // Meshes index material 0 even when the obj carries no mtl.
        materials.push(std::sync::Arc::new(model::Material::new(
            device,
            file_name,
            &model::MaterialDesc::default(),
            crate::data_structures::texture::Texture::create_default_albedo(
                [255, 255, 255, 255],
                device,
                queue,
            ),
            crate::data_structures::texture::Texture::create_default_normal_map(1, 1, device, queue),
            &bind_group_layout,
        )));
    }
    let meshes = mesh::load_meshes(&models, file_name, device);

    Ok(model::Model { meshes, materials })
}
