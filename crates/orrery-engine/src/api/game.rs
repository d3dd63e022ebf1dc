use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::input::queue::InputEvent;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial canvas width in CSS pixels.
    pub viewport_width: f32,
    /// Initial canvas height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 256).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 1600.0,
            viewport_height: 900.0,
            max_instances: 256,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// React to one input event. Called once per event, in arrival order,
    /// before the fixed-step updates of the same tick.
    fn handle_input(&mut self, _ctx: &mut EngineContext, _event: &InputEvent) {}

    /// Advance the simulation by one fixed step of `dt` seconds.
    fn update(&mut self, ctx: &mut EngineContext, dt: f32);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera3D::new(75.0, 1.0, 5000.0),
            textures: TextureRegistry::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Context whose camera viewport matches the game's configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut ctx = Self::new();
        ctx.camera.resize(config.viewport_width, config.viewport_height);
        ctx
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
