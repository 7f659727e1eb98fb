//! Parametric mesh generators for the basic shapes: plane, UV sphere,
//! torus and cube. All generators produce indexed triangle lists with
//! positions, normals and texture coordinates; tangents are derived
//! afterwards via [`MeshData::compute_tangents`].

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::{MeshData, ModelVertex};

/// A flat grid on the XZ plane facing +Y, one unit per segment, centered
/// at the origin.
pub fn plane(x_segments: u32, y_segments: u32) -> MeshData {
    let mut data = MeshData::default();
    let half_x = x_segments as f32 / 2.0;
    let half_y = y_segments as f32 / 2.0;
    for x in 0..=x_segments {
        for y in 0..=y_segments {
            data.vertices.push(ModelVertex {
                position: [x as f32 - half_x, 0.0, y as f32 - half_y],
                tex_coords: [x as f32 / x_segments as f32, y as f32 / y_segments as f32],
                normal: [0.0, 1.0, 0.0],
                ..Default::default()
            });
        }
    }
    grid_indices(&mut data.indices, x_segments, y_segments);
    data.compute_tangents();
    data
}

/// A unit UV sphere.
pub fn sphere(x_segments: u32, y_segments: u32) -> MeshData {
    let mut data = MeshData::default();
    for y in 0..=y_segments {
        for x in 0..=x_segments {
            let xs = x as f32 / x_segments as f32;
            let ys = y as f32 / y_segments as f32;
            let theta = xs * TAU;
            let phi = ys * PI;
            let position = [
                theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            ];
            data.vertices.push(ModelVertex {
                position,
                tex_coords: [xs, ys],
                normal: position,
                ..Default::default()
            });
        }
    }
    // Rows run along theta here, so the quad pattern is transposed with
    // respect to `grid_indices`.
    for y in 0..y_segments {
        for x in 0..x_segments {
            let a = y * (x_segments + 1) + x;
            let b = a + 1;
            let c = a + x_segments + 1;
            let d = c + 1;
            data.indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    data.compute_tangents();
    data
}

/// A torus with ring radius `r1` and tube radius `r2`.
pub fn torus(r1: f32, r2: f32, x_segments: u32, y_segments: u32) -> MeshData {
    let mut data = MeshData::default();
    for x in 0..=x_segments {
        for y in 0..=y_segments {
            let u = x as f32 / x_segments as f32 * TAU;
            let v = y as f32 / y_segments as f32 * TAU;
            let position = Vector3::new(
                (r1 + r2 * v.cos()) * u.cos(),
                r2 * v.sin(),
                (r1 + r2 * v.cos()) * u.sin(),
            );
            let ring_center = Vector3::new(r1 * u.cos(), 0.0, r1 * u.sin());
            let normal = (position - ring_center).normalize();
            data.vertices.push(ModelVertex {
                position: position.into(),
                tex_coords: [
                    x as f32 / x_segments as f32,
                    y as f32 / y_segments as f32,
                ],
                normal: normal.into(),
                ..Default::default()
            });
        }
    }
    grid_indices(&mut data.indices, x_segments, y_segments);
    data.compute_tangents();
    data
}

/// A unit cube with per-face normals.
pub fn cube() -> MeshData {
    let mut data = MeshData::default();
    // (normal, u axis, v axis) per face, chosen so that u x v = normal.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    for (normal, u, v) in faces {
        let n = Vector3::from(normal);
        let u = Vector3::from(u);
        let v = Vector3::from(v);
        let base = data.vertices.len() as u32;
        for (s, t) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let position = n * 0.5 + u * (s - 0.5) + v * (t - 0.5);
            data.vertices.push(ModelVertex {
                position: position.into(),
                tex_coords: [s, t],
                normal: n.into(),
                ..Default::default()
            });
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    data.compute_tangents();
    data
}

// Quad triangulation for a (x_segments+1) * (y_segments+1) grid laid out
// with y as the fastest running index, oriented so that the v direction
// crossed with the u direction points along the surface normal.
fn grid_indices(indices: &mut Vec<u32>, x_segments: u32, y_segments: u32) {
    for x in 0..x_segments {
        for y in 0..y_segments {
            let a = x * (y_segments + 1) + y;
            let b = a + y_segments + 1;
            let c = a + 1;
            let d = b + 1;
            indices.extend_from_slice(&[a, c, d, a, d, b]);
        }
    }
}
