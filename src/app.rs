use std::{sync::Arc, time::Instant};

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    error::{EngineError, Result},
    gfx::{rendering::RenderEngine, resources::ResourceManager, scene::Scene},
    input::InputEvent,
    session::{EventOutcome, Session},
    timing::FrameLimiter,
};

/// Builds the initial scene once the GPU is available.
pub type SetupCallback = Box<dyn FnOnce(&mut Scene, &ResourceManager) -> Result<()>>;

pub struct KilnApp {
    config: AppConfig,
    setup: Option<SetupCallback>,
}

struct AppState {
    config: AppConfig,
    setup: Option<SetupCallback>,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    session: Session,
    limiter: FrameLimiter,
    focused: bool,
    fatal: Option<EngineError>,
}

impl KilnApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            setup: None,
        }
    }

    /// Registers the scene setup, run after the window and device exist.
    pub fn on_setup<F>(&mut self, setup: F)
    where
        F: FnOnce(&mut Scene, &ResourceManager) -> Result<()> + 'static,
    {
        self.setup = Some(Box::new(setup));
    }

    /// Runs the event loop until the window closes or a fatal error occurs
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState {
            session: Session::from_config(&self.config),
            limiter: FrameLimiter::new(self.config.max_fps),
            config: self.config,
            setup: self.setup,
            window: None,
            render_engine: None,
            focused: true,
            fatal: None,
        };

        event_loop.run_app(&mut state)?;

        match state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(self.config.title.as_str())
                    .with_inner_size(PhysicalSize::new(self.config.width, self.config.height)),
            )?,
        );
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let mut renderer =
            pollster::block_on(RenderEngine::new(window, width, height, self.config.vsync))?;
        renderer.set_clear_color(self.config.clear_color);

        // The window may not honour the requested size
        if width > 0 && height > 0 {
            self.session.camera.set_aspect_ratio_from_size(width, height);
        }

        if let Some(setup) = self.setup.take() {
            let resources = ResourceManager::new(&self.config.models_dir, &renderer);
            setup(&mut self.session.scene, &resources)?;
        }

        let statistics = self.session.scene.statistics();
        info!(
            "Scene ready: {} objects, {} triangles",
            statistics.object_count, statistics.total_triangles
        );

        self.render_engine = Some(renderer);
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return Ok(());
        };
        let Some(elapsed) = self.limiter.try_begin_frame(Instant::now()) else {
            return Ok(());
        };

        self.session.update(elapsed);
        render_engine.render_frame(&self.session.draw_list())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        error!("Fatal: {}", error);
        self.fatal.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.initialize(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.frame() {
                    self.fail(event_loop, error);
                }
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
                return;
            }
            WindowEvent::Focused(focused) => self.focused = *focused,
            _ => (),
        }

        let Some(input_event) = InputEvent::from_window_event(&event) else {
            return;
        };

        match self.session.handle_event(input_event) {
            EventOutcome::Exit => event_loop.exit(),
            EventOutcome::Resized { width, height } => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            EventOutcome::ToggleVsync => {
                self.config.vsync = !self.config.vsync;
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.set_vsync(self.config.vsync);
                }
                info!("Vsync {}", if self.config.vsync { "on" } else { "off" });
            }
            EventOutcome::ResizeIgnored | EventOutcome::Continue => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        // Raw motion arrives even when another window has focus
        if !self.focused {
            return;
        }

        if let Some(input_event) = InputEvent::from_device_event(&event) {
            self.session.handle_event(input_event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
