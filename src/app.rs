//! Window shell.
//!
//! [`App`] is the `winit` application handler. It creates the fixed-size
//! window and its [`GpuCanvas`] on resume, queues input for the game, runs
//! one [`Game::frame`] per redraw and caps the redraw rate at the configured
//! frames per second.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::DemoConfig;
use crate::error::{DemoError, RenderError};
use crate::game::{Game, LoopControl};
use crate::input::InputQueue;
use crate::render::GpuCanvas;
use crate::time::FrameClock;

/// Open the window and run the demo until it is closed.
pub fn run(config: DemoConfig) -> Result<(), DemoError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: DemoConfig,
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    game: Option<Game>,
    input: InputQueue,
    frame_duration: std::time::Duration,
    next_frame: Instant,
    error: Option<DemoError>,
}

impl App {
    fn new(config: DemoConfig) -> Self {
        let frame_duration = FrameClock::new(config.window.fps).frame_duration();
        Self {
            config,
            window: None,
            canvas: None,
            game: None,
            input: InputQueue::new(),
            frame_duration,
            next_frame: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.window.width, self.config.window.height))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut canvas = pollster::block_on(GpuCanvas::new(window.clone(), self.config.camera()))?;
        let game = Game::new(self.config.clone(), &mut canvas)?;

        tracing::info!(
            width = self.config.window.width,
            height = self.config.window.height,
            fps = self.config.window.fps,
            "window opened"
        );

        window.request_redraw();
        self.window = Some(window);
        self.canvas = Some(canvas);
        self.game = Some(game);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        tracing::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(canvas), Some(game)) = (&mut self.canvas, &mut self.game) else {
            return;
        };

        match game.frame(canvas, self.input.drain()) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => event_loop.exit(),
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::warn!("surface lost, reconfiguring");
                canvas.reconfigure();
            }
            Err(err @ RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                self.fail(event_loop, err.into());
            }
            Err(err) => tracing::warn!("render error: {err}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size);
                }
            }
            event => {
                // A close is handled by the game on its next frame.
                if self.input.handle_event(&event) && matches!(event, WindowEvent::CloseRequested) {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame = now + self.frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
