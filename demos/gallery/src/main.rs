//! Demo scene: nested rotating toruses with a glass sphere at the center,
//! the sponza atrium around them, three analytic lights and a grid of baked
//! irradiance probes.

use std::time::Duration;

use ember_ngin::{
    Deg, InnerSpace, Quaternion, Rad, Rotation3, Vector3,
    context::{Context, InitContext},
    data_structures::{
        model::MaterialDesc,
        primitives,
        scene_graph::{MeshNode, SceneNode},
    },
    flow::{self, Stage, StageConstructor, WindowConfig},
    lighting::{DirectionalLight, PointLight, PointLightHandle},
    probes::IrradianceProbe,
    renderer::{FrameQueue, Renderer},
    resources,
};

/// Probe positions and radii covering the sponza atrium.
#[rustfmt::skip]
const PROBE_GRID: [([f32; 3], f32); 51] = [
    // hallway lower
    ([  0.0, 0.5, -0.5], 3.25),
    ([  3.0, 0.5, -0.5], 3.25),
    ([  6.0, 0.5, -0.5], 3.25),
    ([  8.5, 0.5, -0.5], 3.25),
    ([ 11.4, 0.5, -0.5], 4.25),
    ([ -3.0, 0.5, -0.5], 3.25),
    ([ -6.2, 0.5, -0.5], 3.25),
    ([ -9.5, 0.5, -0.5], 3.25),
    ([-12.1, 0.5, -0.5], 4.25),
    // bottom floor - left wing
    ([  0.0, 0.5, 4.0], 4.0),
    ([  4.0, 0.5, 4.0], 4.0),
    ([  8.0, 0.5, 4.0], 4.0),
    ([ 12.0, 0.5, 4.0], 4.0),
    ([ -4.0, 0.5, 4.0], 4.0),
    ([ -8.0, 0.5, 4.0], 4.0),
    ([-12.0, 0.5, 4.0], 4.0),
    // bottom floor - right wing
    ([  0.0, 0.5, -4.5], 4.0),
    ([  4.0, 0.5, -4.5], 4.0),
    ([  8.0, 0.5, -4.5], 4.0),
    ([ 12.0, 0.5, -4.5], 4.0),
    ([ -4.0, 0.5, -4.5], 4.0),
    ([ -8.0, 0.5, -4.5], 4.0),
    ([-12.0, 0.5, -4.5], 4.0),
    // first floor - center
    ([  0.0, 5.0, -0.5], 4.5),
    ([  4.0, 5.0, -0.5], 4.0),
    ([  8.0, 5.0, -0.5], 4.5),
    ([ 12.0, 5.0, -0.5], 4.5),
    ([ -4.0, 5.0, -0.5], 4.5),
    ([ -8.0, 5.0, -0.5], 4.0),
    ([-12.0, 5.0, -0.5], 4.5),
    // first floor - left wing
    ([  0.0, 5.0, 4.0], 4.0),
    ([  4.0, 5.0, 4.0], 4.0),
    ([  8.0, 5.0, 4.0], 4.0),
    ([ 12.0, 5.0, 4.0], 4.0),
    ([ -4.0, 5.0, 4.0], 4.0),
    ([ -8.0, 5.0, 4.0], 4.0),
    ([-11.5, 5.0, 4.0], 4.0),
    // first floor - right wing
    ([  0.0, 5.0, -4.5], 4.0),
    ([  4.0, 5.0, -4.5], 4.0),
    ([  8.0, 5.0, -4.5], 4.0),
    ([ 12.0, 5.0, -4.5], 4.0),
    ([ -4.0, 5.0, -4.5], 4.0),
    ([ -8.0, 5.0, -4.5], 4.0),
    ([-11.5, 5.0, -4.5], 4.0),
    // second floor - center
    ([  0.0, 9.5, -0.5], 4.5),
    ([  4.0, 9.5, -0.5], 4.5),
    ([  8.0, 9.5, -0.5], 4.5),
    ([ 12.0, 9.5, -0.5], 4.5),
    ([ -4.0, 9.5, -0.5], 4.5),
    ([ -8.0, 9.5, -0.5], 4.5),
    ([-11.5, 9.5, -0.5], 4.5),
];

struct Gallery {
    toruses: Option<MeshNode>,
    sponza: Option<MeshNode>,
    blue_light: Option<PointLightHandle>,
    time: f32,
}

impl Gallery {
    async fn new(init: InitContext) -> Self {
        let sponza =
            match resources::load_model_obj("sponza/sponza.obj", &init.device, &init.queue).await {
                Ok(model) => Some(MeshNode::from_model(1, &init.device, model)),
                Err(e) => {
                    log::warn!("could not load sponza mesh: {e:#}");
                    None
                }
            };
        Self {
            toruses: None,
            sponza,
            blue_light: None,
            time: 0.0,
        }
    }
}

impl Stage for Gallery {
    fn on_init(&mut self, ctx: &mut Context, renderer: &mut Renderer) {
        let mat_pbr = renderer.create_material(ctx, "pbr", &MaterialDesc::default());
        let mat_glass = renderer.create_material(ctx, "glass", &MaterialDesc::glass());

        let torus_data = primitives::torus(2.0, 0.4, 32, 32);
        let sphere_data = primitives::sphere(64, 64);

        let mut main_torus =
            MeshNode::new(&ctx.device, "main torus", &torus_data, mat_pbr.clone(), 1);
        let mut second_torus =
            MeshNode::new(&ctx.device, "second torus", &torus_data, mat_pbr.clone(), 1);
        let mut third_torus = MeshNode::new(&ctx.device, "third torus", &torus_data, mat_pbr, 1);
        let mut sphere_node =
            MeshNode::new(&ctx.device, "glass sphere", &sphere_data, mat_glass, 1);

        sphere_node.set_scale(1.35);
        third_torus.set_scale(0.65);
        third_torus.add_child(Box::new(sphere_node));
        second_torus.set_scale(0.65);
        second_torus.set_rotation(Quaternion::from_axis_angle(Vector3::unit_y(), Deg(90.0)));
        second_torus.add_child(Box::new(third_torus));
        main_torus.set_position(Vector3::new(0.0, 2.5, 0.0));
        main_torus.add_child(Box::new(second_torus));
        main_torus.update_world_transform_all();
        main_torus.write_to_buffers(&ctx.queue);
        self.toruses = Some(main_torus);

        if let Some(sponza) = &mut self.sponza {
            sponza.set_position(Vector3::new(0.0, -1.0, 0.0));
            sponza.set_scale(0.01);
            sponza.update_world_transform_all();
            sponza.write_to_buffers(&ctx.queue);
        }

        renderer.set_directional_light(DirectionalLight {
            direction: Vector3::new(0.2, -1.0, 0.25),
            color: Vector3::new(1.0, 0.89, 0.7),
            intensity: 50.0,
        });
        if let Err(e) = renderer.add_point_light(PointLight {
            position: Vector3::new(0.0, 1.0, 0.0),
            radius: 4.0,
            color: Vector3::new(1.0, 0.25, 0.25),
            intensity: 50.0,
            render_mesh: true,
        }) {
            log::warn!("could not register red light: {e}");
        }
        self.blue_light = renderer
            .add_point_light(PointLight {
                position: Vector3::new(3.0, 2.0, 5.0),
                radius: 3.0,
                color: Vector3::new(0.5, 0.5, 2.0),
                intensity: 25.0,
                render_mesh: true,
            })
            .map_err(|e| log::warn!("could not register blue light: {e}"))
            .ok();

        for (position, radius) in PROBE_GRID {
            if let Err(e) = renderer.add_irradiance_probe(IrradianceProbe {
                position: position.into(),
                radius,
            }) {
                log::warn!("could not place probe: {e}");
                break;
            }
        }
        renderer.bake_probes(&ctx.queue);
        renderer.set_background(&ctx.queue, 1.0, 1.0);
    }

    fn on_update(&mut self, ctx: &mut Context, renderer: &mut Renderer, dt: Duration) {
        self.time += dt.as_secs_f32();
        let t = self.time;

        if let Some(toruses) = &mut self.toruses {
            toruses.set_rotation(Quaternion::from_axis_angle(Vector3::unit_x(), Rad(t * 2.0)));
            let second = &mut toruses.children_mut()[0];
            second.set_rotation(Quaternion::from_axis_angle(Vector3::unit_y(), Rad(t * 3.0)));
            let third = &mut second.children_mut()[0];
            third.set_rotation(Quaternion::from_axis_angle(Vector3::unit_y(), Rad(t * 4.0)));
            let sphere = &mut third.children_mut()[0];
            sphere.set_rotation(Quaternion::from_axis_angle(
                Vector3::new(1.0, 1.0, 1.0).normalize(),
                Rad(t),
            ));
            toruses.update_world_transform_all();
            toruses.write_to_buffers(&ctx.queue);
        }

        if let Some(handle) = self.blue_light {
            let light = renderer.point_light_mut(handle);
            light.position = Vector3::new(
                (t * 0.3).sin() * 1.5 + 3.0,
                2.0,
                (t * 0.1).cos() * 5.0,
            );
        }
    }

    fn on_render<'a>(&'a self, frame: &mut FrameQueue<'a>) {
        if let Some(toruses) = &self.toruses {
            frame.push(toruses);
        }
        if let Some(sponza) = &self.sponza {
            frame.push(sponza);
        }
        frame.push_background();
    }
}

fn main() -> anyhow::Result<()> {
    let constructor: StageConstructor = Box::new(|init: InitContext| {
        Box::pin(async move { Box::new(Gallery::new(init).await) as Box<dyn Stage> })
    });

    flow::run(
        WindowConfig {
            title: "gallery".to_string(),
            width: 1280,
            height: 720,
        },
        vec![constructor],
    )
}
