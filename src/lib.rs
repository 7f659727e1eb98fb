//! ember-ngin
//!
//! A small forward-rendered PBR engine built on wgpu and winit. The crate
//! exposes a deliberately thin surface: a GPU/window context, a scene graph
//! of instanced meshes, analytic lights, baked irradiance probes and a
//! renderer with a push/flush command model. Scenes queue their draws each
//! frame and the renderer batches them per pipeline before flushing.
//!
//! High-level modules
//! - `camera`: fly camera, perspective projection and view/projection uniforms
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: engine data models (meshes, materials, instances, scene graphs)
//! - `lighting`: directional and point lights plus their GPU resources
//! - `probes`: irradiance probes and the CPU-side bake
//! - `renderer`: the pushed-command renderer and per-frame batching
//! - `pipelines`: render pipeline definitions (pbr, transparent, light, background)
//! - `resources`: helpers to load meshes/textures and create GPU resources
//! - `flow`: the application event loop and the [`flow::Stage`] seam
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod lighting;
pub mod pipelines;
pub mod probes;
pub mod renderer;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
