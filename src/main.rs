//! Quadview - four-view software renderer
//!
//! Shows a procedurally generated cup from the front, side, top and a user-controlled
//! view at once, rasterized on the CPU and presented through wgpu.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use quadview::config::AppConfig;
use quadview::input::{InputAction, InputMapper};
use quadview::systems::{FrameSystem, RenderError, RenderSystem, WindowSystem};
use quadview_core::RenderState;
use quadview_input::InputController;

/// Main application state
struct App {
    config: AppConfig,
    state: RenderState,
    controller: InputController,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    frames: FrameSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let state = config.initial_state();
        let controller = config.input_controller();
        Self {
            config,
            state,
            controller,
            window: None,
            renderer: None,
            frames: FrameSystem::new(),
        }
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Exit => self.controller.request_quit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ResetView => {
                self.state = self.config.initial_state();
                self.controller.reset();
                log::info!("View reset");
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = self.controller.take_snapshot();
        if input.quit {
            log::info!("Quit requested");
            event_loop.exit();
            return;
        }
        self.state.apply(&input);

        if let Some(window) = &mut self.window {
            window.update_title(&self.state);
        }

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render_frame(&self.state) {
            Ok(stats) => {
                self.frames.end_frame(&stats);
            }
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfiguring");
                renderer.recover_surface();
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match RenderSystem::new(
            window.window().clone(),
            self.config.compositor_settings(),
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        self.controller.set_frame_size(width, height);
        log::info!("Rendering four views at {}x{}", width, height);

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.controller
                        .set_frame_size(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(action) => self.handle_action(action),
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.controller.process_cursor_moved(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.controller.process_cursor_left();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.process_scroll(delta);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Quadview");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
