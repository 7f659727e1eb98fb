//! Baked irradiance probes.
//!
//! Probes sample indirect light at fixed points in the scene. Baking here
//! is a CPU evaluation of the analytic lights at each probe position; the
//! shader then blends the nearest probes by distance for the ambient term.

use anyhow::{ensure, Result};
use cgmath::{InnerSpace, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::lighting::{DirectionalLight, PointLight};

pub const MAX_PROBES: usize = 64;

/// Isotropic energy fraction of a light as seen over the whole sphere.
const AMBIENT_SCALE: f32 = 1.0 / (4.0 * std::f32::consts::PI);

#[derive(Clone, Debug)]
pub struct IrradianceProbe {
    pub position: Vector3<f32>,
    /// Influence radius used for blending in the shader.
    pub radius: f32,
}

/// Handle to a registered probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeHandle(pub(crate) usize);

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProbeRaw {
    pub position: [f32; 3],
    pub radius: f32,
    pub irradiance: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProbesUniform {
    pub probes: [ProbeRaw; MAX_PROBES],
    pub probe_count: u32,
    pub _pad: [u32; 3],
}

impl Default for ProbesUniform {
    fn default() -> Self {
        Self {
            probes: [ProbeRaw::default(); MAX_PROBES],
            probe_count: 0,
            _pad: [0; 3],
        }
    }
}

/// Evaluate the analytic lights at `center`.
///
/// Point lights fall off with a windowed inverse-square curve so their
/// contribution reaches exactly zero at their radius.
pub fn bake_irradiance(
    center: Vector3<f32>,
    directional: Option<&DirectionalLight>,
    points: &[PointLight],
) -> Vector3<f32> {
    let mut total = Vector3::zero();
    if let Some(light) = directional {
        total += light.color * light.intensity * AMBIENT_SCALE;
    }
    for light in points {
        let distance = (light.position - center).magnitude();
        if distance >= light.radius {
            continue;
        }
        let window = (1.0 - distance / light.radius).powi(2);
        let attenuation = window / (distance * distance).max(1e-2);
        total += light.color * light.intensity * attenuation * AMBIENT_SCALE;
    }
    total
}

/// The probe positions and their baked irradiance, independent of any GPU
/// resources.
#[derive(Default)]
pub struct ProbeSet {
    probes: Vec<IrradianceProbe>,
    irradiance: Vec<Vector3<f32>>,
}

impl ProbeSet {
    pub fn add(&mut self, probe: IrradianceProbe) -> Result<ProbeHandle> {
        ensure!(
            self.probes.len() < MAX_PROBES,
            "probe limit of {} reached",
            MAX_PROBES
        );
        self.probes.push(probe);
        self.irradiance.push(Vector3::zero());
        Ok(ProbeHandle(self.probes.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn irradiance(&self, handle: ProbeHandle) -> Vector3<f32> {
        self.irradiance[handle.0]
    }

    /// Bake every probe against the current light set.
    pub fn bake(&mut self, directional: Option<&DirectionalLight>, points: &[PointLight]) {
        for (probe, irradiance) in self.probes.iter().zip(self.irradiance.iter_mut()) {
            *irradiance = bake_irradiance(probe.position, directional, points);
        }
    }

    pub fn to_uniform(&self) -> ProbesUniform {
        let mut uniform = ProbesUniform::default();
        for ((slot, probe), irradiance) in uniform
            .probes
            .iter_mut()
            .zip(&self.probes)
            .zip(&self.irradiance)
        {
            *slot = ProbeRaw {
                position: probe.position.into(),
                radius: probe.radius,
                irradiance: (*irradiance).into(),
                _pad: 0.0,
            };
        }
        uniform.probe_count = self.probes.len() as u32;
        uniform
    }
}

/// GPU wrapper around a [`ProbeSet`].
pub struct ProbeResources {
    pub set: ProbeSet,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl ProbeResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = ProbesUniform::default();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Probes Buffer"),
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
            label: Some("Probes Bind Group"),
        });

        Self {
            set: ProbeSet::default(),
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("Probes Bind Group Layout"),
        })
    }

    pub fn upload(&self, queue: &wgpu::Queue) {
        let uniform = self.set.to_uniform();
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
