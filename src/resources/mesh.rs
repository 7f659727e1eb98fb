use crate::data_structures::model::{Mesh, MeshData, ModelVertex};

/**
 * Obj files don't come with tangents and bitangents so they have to be
 * calculated for normal maps to work correctly.
 */
pub fn mesh_data_from_obj(m: &tobj::Model) -> MeshData {
    let vertices = (0..m.mesh.positions.len() / 3)
        .map(|i| ModelVertex {
            position: [
                m.mesh.positions[i * 3],
                m.mesh.positions[i * 3 + 1],
                m.mesh.positions[i * 3 + 2],
            ],
            tex_coords: [
                m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                // Obj uses a bottom-left uv origin.
                1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ],
            normal: [
                m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
            tangent: [0.0; 3],
            bitangent: [0.0; 3],
        })
        .collect::<Vec<_>>();

    let mut data = MeshData {
        vertices,
        indices: m.mesh.indices.clone(),
    };
    data.compute_tangents();
    data
}

pub fn load_meshes(models: &[tobj::Model], file_name: &str, device: &wgpu::Device) -> Vec<Mesh> {
    models
        .iter()
        .map(|m| {
            let data = mesh_data_from_obj(m);
            let mut mesh = Mesh::from_data(device, file_name, &data);
            mesh.material = m.mesh.material_id.unwrap_or(0);
            mesh
        })
        .collect()
}
