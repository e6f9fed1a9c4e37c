use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::ViewerError,
    gfx::{
        camera::CameraManager,
        picking::{PropPicker, Viewport},
        rendering::RenderEngine,
        scene::Scene,
    },
    interaction::{InteractorStyle, PickHighlighter},
    scene_builder::SceneBuilder,
};

/// The pick-and-highlight viewer: one window, one scene
pub struct HighlightApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    style: InteractorStyle<PickHighlighter>,
    /// Set when window or GPU bring-up fails inside the event loop
    startup_error: Option<ViewerError>,
}

impl HighlightApp {
    /// Builds the random scene. The window and GPU context are created once
    /// the event loop starts.
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let event_loop = EventLoop::new()?;

        let (width, height) = config.window_size;
        let mut camera_manager = CameraManager::default();
        camera_manager.camera.resize_projection(width, height);

        let mut scene = Scene::new(camera_manager);
        scene.background = config.background;

        let demo = SceneBuilder::from_seed(config.seed).populate(&mut scene, config.object_count);
        let highlighter = PickHighlighter::new(
            PropPicker::new(),
            config.pick_mode,
            scene.assembly_parts(demo.assembly),
        );
        let style = InteractorStyle::new(highlighter, Viewport::new(width as f32, height as f32));

        let stats = scene.statistics();
        log::info!(
            "scene: {} spheres, {} cubes in one assembly ({} triangles), pick mode {:?}",
            demo.spheres.len(),
            stats.actor_count - demo.spheres.len(),
            stats.total_triangles,
            config.pick_mode
        );

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                style,
                startup_error: None,
            },
        })
    }

    /// Runs until the window closes or Escape is pressed
    pub fn run(self) -> Result<(), ViewerError> {
        let HighlightApp {
            event_loop,
            mut app_state,
        } = self;

        // Redraws are requested whenever something changes
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut app_state)?;

        match app_state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.window_title.clone())
                .with_inner_size(LogicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);

        let PhysicalSize { width, height } = window_handle.inner_size();
        let renderer = pollster::block_on(RenderEngine::new(window_handle.clone(), width, height))?;

        self.scene
            .init_gpu_resources(renderer.device(), renderer.actor_layout())?;
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        self.style.set_viewport(width, height);

        window_handle.request_redraw();
        self.window = Some(window_handle);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) if pressed => event_loop.exit(),
            PhysicalKey::Code(KeyCode::KeyP) if pressed && !event.repeat => {
                let change = self.style.handler_mut().toggle_mode(&mut self.scene);
                log::info!("pick mode: {:?}", self.style.handler().mode());
                if change.is_visible() {
                    self.request_redraw();
                }
            }
            _ => {
                if self.style.on_key(event, &mut self.scene) {
                    self.request_redraw();
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        self.scene.update();
        render_engine.update(self.scene.camera_manager.uniform());
        self.scene.update_gpu(render_engine.queue());

        match render_engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("surface {err}; reconfiguring");
                render_engine.reconfigure();
                self.request_redraw();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory; exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("skipping frame: {err}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.startup_error.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("{err}");
            self.startup_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Focused(focused) => self.style.on_focus_changed(focused, &mut self.scene),
            WindowEvent::CursorMoved { position, .. } => {
                self.style
                    .on_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.style.on_left_button_down(&mut self.scene) {
                        self.request_redraw();
                    }
                }
                ElementState::Released => self.style.on_left_button_up(&mut self.scene),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                self.style.set_viewport(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.style.on_device_event(&event, &mut self.scene) {
            self.request_redraw();
        }
    }
}
