//! The game loop controller.
//!
//! [`Game`] owns the physics world, the scene, the drag controller and the
//! frame clock. The window shell hands it a canvas and the input gathered
//! since the last frame; one call to [`Game::frame`] is one loop iteration.

use glam::Vec2;
use rapier2d::pipeline::DebugRenderPipeline;

use crate::config::DemoConfig;
use crate::drag::{DragController, DragState, PressOutcome};
use crate::error::{DemoError, RenderError};
use crate::input::{InputEvent, MouseButton};
use crate::physics::{PhysicsWorld, StepParams};
use crate::render::{Canvas, CanvasDebugBackend};
use crate::scene::Scene;
use crate::textures::TextureData;
use crate::time::{FrameClock, FrameTiming};

/// Width of debug overlay lines in world units.
const DEBUG_LINE_WIDTH: f32 = 0.2;

/// Whether the loop should keep running after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct Game {
    config: DemoConfig,
    world: PhysicsWorld,
    scene: Scene,
    drag: DragController,
    clock: FrameClock,
    debug_pipeline: Option<DebugRenderPipeline>,
}

impl Game {
    /// Load the ball image from the configured path and build the scene.
    pub fn new<C: Canvas + ?Sized>(config: DemoConfig, canvas: &mut C) -> Result<Self, DemoError> {
        let texture = TextureData::from_file(&config.balls.texture)?;
        Ok(Self::with_texture(config, texture, canvas))
    }

    /// Build the scene around an already loaded ball image.
    pub fn with_texture<C: Canvas + ?Sized>(config: DemoConfig, ball_texture: TextureData, canvas: &mut C) -> Self {
        canvas.set_view(config.camera());
        let texture = canvas.register_texture(&ball_texture);

        let mut world = PhysicsWorld::new(StepParams {
            gravity: config.physics.gravity,
            velocity_iterations: config.physics.velocity_iterations,
            position_iterations: config.physics.position_iterations,
            max_translation: config.physics.max_translation,
        });
        let scene = Scene::build(&mut world, &config, texture, &ball_texture);
        let drag = DragController::new(scene.anchor(), config.drag);
        let clock = FrameClock::new(config.window.fps);
        let debug_pipeline = config.debug_draw.then(DebugRenderPipeline::default);

        Self {
            config,
            world,
            scene,
            drag,
            clock,
            debug_pipeline,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one loop iteration: input, physics, drawing, present.
    ///
    /// Returns [`LoopControl::Exit`] as soon as a close request is seen,
    /// without stepping or drawing that frame.
    pub fn frame<C, I>(&mut self, canvas: &mut C, events: I) -> Result<LoopControl, RenderError>
    where
        C: Canvas + ?Sized,
        I: IntoIterator<Item = InputEvent>,
    {
        let timing = self.clock.tick();

        for event in events {
            if self.handle_event(&*canvas, event) == LoopControl::Exit {
                tracing::info!(frame = timing.frame, "close requested");
                return Ok(LoopControl::Exit);
            }
        }

        self.update(timing);
        self.draw(canvas)?;
        Ok(LoopControl::Continue)
    }

    /// Dispatch one input event. Pointer positions are mapped to world
    /// coordinates through the canvas view.
    pub fn handle_event<C: Canvas + ?Sized>(&mut self, canvas: &C, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::CloseRequested => return LoopControl::Exit,
            InputEvent::PointerPressed {
                button: MouseButton::Left,
                position,
            } => {
                let point = canvas.map_pixel_to_coords(position);
                self.drag.press(&mut self.world, point);
            }
            InputEvent::PointerReleased {
                button: MouseButton::Left,
                ..
            } => self.drag.release(&mut self.world),
            InputEvent::PointerMoved { position } => {
                let point = canvas.map_pixel_to_coords(position);
                self.drag.move_to(&mut self.world, point);
            }
            InputEvent::PointerPressed { .. } | InputEvent::PointerReleased { .. } => {}
        }
        LoopControl::Continue
    }

    /// Press at a world point, bypassing pixel mapping.
    pub fn press_at(&mut self, point: Vec2) -> PressOutcome {
        self.drag.press(&mut self.world, point)
    }

    fn update(&mut self, timing: FrameTiming) {
        self.world.step(timing.step);
        self.world.clear_forces();
        self.drag.validate(&self.world);
        self.scene.sync(&self.world);
    }

    fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), RenderError> {
        canvas.clear(self.config.clear_color);
        self.scene.draw(canvas);

        if let Some(pipeline) = &mut self.debug_pipeline {
            let mut backend = CanvasDebugBackend::new(canvas, DEBUG_LINE_WIDTH);
            self.world.debug_render(pipeline, &mut backend);
        }

        canvas.present()
    }
}
