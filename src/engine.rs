use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::assets::GameAssets;
use crate::config::Tuning;
use crate::enemy::AiRng;
use crate::error::GameError;
use crate::input::{default_bindings, take_player_intent, Action, ActionMap, InputState};
use crate::renderer::Presenter;
use crate::window::{window_attributes, WindowConfig};
use crate::world::{SceneRenderer, World};

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    tuning: Tuning,
    window: WindowConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        let tuning = Tuning::default();
        let window = WindowConfig::for_frame(tuning.render.width, tuning.render.height, 2, Default::default());
        Self { title: "gridfire".into(), tuning, window }
    }
}

impl EngineBuilder {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the tuning; the window keeps its scale and mode but follows
    /// the new frame size.
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        let scale = (self.window.physical_width / self.window.logical_width.max(1)).max(1);
        self.window = WindowConfig::for_frame(tuning.render.width, tuning.render.height, scale, self.window.mode);
        self.tuning = tuning;
        self
    }

    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Build the world and block in the event loop until the window closes.
    pub fn run(self, assets: GameAssets, rng: Box<dyn AiRng>) -> Result<(), GameError> {
        let world = World::new(self.tuning.clone(), rng)?;
        let scene = SceneRenderer::new(&self.tuning);

        let event_loop = EventLoop::new().map_err(|e| GameError::Window(e.to_string()))?;
        let mut app = App {
            title: self.title,
            window: self.window,
            world,
            scene,
            assets,
            input: InputState::new(),
            bindings: default_bindings(),
            presenter: None,
            last_instant: None,
            failure: None,
        };
        event_loop.run_app(&mut app).map_err(|e| GameError::Window(e.to_string()))?;

        match app.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    title: String,
    window: WindowConfig,
    world: World,
    scene: SceneRenderer,
    assets: GameAssets,
    input: InputState,
    bindings: ActionMap<Action>,
    presenter: Option<Presenter>,
    last_instant: Option<Instant>,
    /// First fatal error; reported once the loop has exited.
    failure: Option<GameError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GameError) {
        tracing::error!(%err, "fatal");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = match self.last_instant {
            Some(prev) => now.duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_instant = Some(now);

        let intent = take_player_intent(&self.bindings, &mut self.input);
        self.world.tick(elapsed, &intent);
        let frame = self.scene.render(&self.world, &self.assets);

        let Some(presenter) = self.presenter.as_mut() else { return };
        match presenter.present(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, GameError::Gpu("out of memory".into()));
                return;
            }
            Err(e) => tracing::warn!(%e, "frame skipped"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        let window = match event_loop.create_window(window_attributes(&self.title, &self.window)) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fail(event_loop, GameError::Window(e.to_string())),
        };
        match pollster::block_on(Presenter::new(window, self.window.clone())) {
            Ok(p) => self.presenter = Some(p),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(p) = self.presenter.as_ref() {
            p.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(p) = self.presenter.as_mut() {
                    p.resize(size);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.mouse_down(button),
                ElementState::Released => self.input.mouse_up(button),
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.input.key_down(code);
                    if self.bindings.is_pressed(Action::Quit, &self.input) {
                        tracing::info!("quit requested");
                        event_loop.exit();
                    }
                }
                ElementState::Released => self.input.key_up(code),
            },

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }
}
