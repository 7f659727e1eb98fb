//! Flow control and application event loop.
//!
//! A [`Stage`] is a self-contained part of the application: it builds its
//! scene during init, reacts to input, updates simulation state and pushes
//! its draw commands each frame. The engine owns the window, the GPU
//! context and the renderer and drives all registered stages.
//!
//! # Lifecycle
//!
//! 1. The stage constructors resolve asynchronously before the loop starts,
//!    so heavy asset loading happens concurrently
//! 2. `on_init()` is called once with full context and renderer access
//! 3. `on_window_events()` / `on_device_events()` are called per input event
//! 4. `on_update()` runs every frame with the elapsed time
//! 5. `on_render()` pushes the stage's draw data into the frame queue,
//!    which is then flushed and presented

use std::{pin::Pin, sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    context::{Context, InitContext},
    renderer::{FrameQueue, Renderer},
};

/// A scene or game state driven by the event loop.
pub trait Stage {
    /// Called once after the GPU context exists. The place to build the
    /// scene, register lights and probes and configure the context.
    fn on_init(&mut self, _ctx: &mut Context, _renderer: &mut Renderer) {}

    /// Called every frame before rendering.
    fn on_update(
        &mut self,
        _ctx: &mut Context,
        _renderer: &mut Renderer,
        _dt: std::time::Duration,
    ) {
    }

    fn on_window_events(&mut self, _ctx: &mut Context, _event: &WindowEvent) {}

    fn on_device_events(&mut self, _ctx: &mut Context, _event: &DeviceEvent) {}

    /// Push this stage's draw commands for the current frame.
    fn on_render<'a>(&'a self, frame: &mut FrameQueue<'a>);
}

/// Async constructor resolved before the loop starts. The [`InitContext`]
/// allows creating GPU resources while other constructors are still loading.
pub type StageConstructor =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn Stage>>>>>;

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ember-ngin".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

struct AppState {
    ctx: Context,
    renderer: Renderer,
}

impl AppState {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let renderer = Renderer::new(&ctx);
        Ok(Self { ctx, renderer })
    }
}

struct App {
    config: WindowConfig,
    constructors: Option<Vec<StageConstructor>>,
    stages: Vec<Box<dyn Stage>>,
    state: Option<AppState>,
    async_runtime: tokio::runtime::Runtime,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: WindowConfig, constructors: Vec<StageConstructor>) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            constructors: Some(constructors),
            stages: Vec::new(),
            state: None,
            async_runtime: tokio::runtime::Runtime::new()?,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("initialization failed: {:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let constructors = self.constructors.take().unwrap_or_default();

        let init_future = async move {
            let app_state = AppState::new(window).await?;
            let stage_futures: Vec<_> = constructors
                .into_iter()
                // The clone in into() leverages the internal Arcs of Device
                // and Queue and thus only clones the ref
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let stages = futures::future::join_all(stage_futures).await;
            Ok::<_, anyhow::Error>((app_state, stages))
        };

        let (mut app_state, stages) = match self.async_runtime.block_on(init_future) {
            Ok(resolved) => resolved,
            Err(e) => return self.fail(event_loop, e),
        };

        self.stages = stages;
        for stage in self.stages.iter_mut() {
            stage.on_init(&mut app_state.ctx, &mut app_state.renderer);
        }
        app_state.ctx.set_cursor_grabbed(true);
        app_state.ctx.window.request_redraw();
        self.last_time = Instant::now();
        self.state = Some(app_state);
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        if let DeviceEvent::MouseMotion { delta } = event {
            // Mouse look only while the cursor is captured.
            if state.ctx.cursor_grabbed() {
                state.ctx.camera.controller.process_mouse(delta.0, delta.1);
            }
        }

        for stage in self.stages.iter_mut() {
            stage.on_device_events(&mut state.ctx, &event);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.controller.handle_window_events(&event);

        for stage in self.stages.iter_mut() {
            stage.on_window_events(&mut state.ctx, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Tab),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } if key_state.is_pressed() => {
                let grabbed = state.ctx.cursor_grabbed();
                state.ctx.set_cursor_grabbed(!grabbed);
            }
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                // Update the camera
                state
                    .ctx
                    .camera
                    .controller
                    .update_camera(&mut state.ctx.camera.camera, dt);
                state
                    .ctx
                    .camera
                    .uniform
                    .update_view_proj(&state.ctx.camera.camera, &state.ctx.projection);
                state.ctx.queue.write_buffer(
                    &state.ctx.camera.buffer,
                    0,
                    bytemuck::cast_slice(&[state.ctx.camera.uniform]),
                );

                for stage in self.stages.iter_mut() {
                    stage.on_update(&mut state.ctx, &mut state.renderer, dt);
                }
                state.renderer.prepare_frame(&state.ctx);

                match state.ctx.surface.get_current_texture() {
                    Ok(output) => {
                        let view = output
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());
                        let mut frame = FrameQueue::new();
                        for stage in self.stages.iter() {
                            stage.on_render(&mut frame);
                        }
                        state
                            .renderer
                            .render_pushed_commands(&state.ctx, &frame, &view);
                        output.present();
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }

                if state.ctx.exit_requested {
                    event_loop.exit();
                } else {
                    state.ctx.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

pub fn run(config: WindowConfig, constructors: Vec<StageConstructor>) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::builder()
            .with_any_thread(true)
            .build()
            .expect("Failed to create an event loop")
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::builder()
            .with_any_thread(true)
            .build()
            .expect("Failed to create an event loop")
    };

    #[cfg(not(feature = "integration-tests"))]
    let event_loop: EventLoop<()> = EventLoop::new()?;

    let mut app = App::new(config, constructors)?;

    event_loop.run_app(&mut app)?;

    // A failed window or device setup surfaces here so callers exit nonzero.
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
