use orrery_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    FixedTimestep, ProtocolLayout, FrameData,
    AssetManifest, TextureRegistry, TextureId,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame: u32,
    /// Background cube-map face URLs from the last good manifest.
    skybox: Vec<String>,
    /// Serialized frame, read by the host through `frame_ptr`.
    frame_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            initialized: false,
            frame: 0,
            skybox: Vec::new(),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.publish_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: dispatch input, step the game, publish the frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        for event in self.input.drain() {
            if let InputEvent::Resize { width, height } = event {
                self.ctx.camera.resize(width, height);
            }
            self.game.handle_input(&mut self.ctx, &event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, self.timestep.dt());
        }

        self.frame = self.frame.wrapping_add(1);
        self.publish_frame();
    }

    fn publish_frame(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &self.ctx.textures, &mut self.render_buffer);
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        let pose = self.ctx.camera.pose();
        let viewport = self.ctx.camera.viewport();
        self.layout.write_frame(
            &FrameData {
                frame: self.frame,
                viewport: viewport.to_array(),
                camera: &pose,
                instances: &self.render_buffer.instances,
                events: &self.ctx.events,
            },
            &mut self.frame_buffer,
        );
        // Events emitted between ticks (direct exports) ride the next frame.
        self.ctx.clear_frame_data();
    }

    /// Run a closure against the game and its context outside the tick loop.
    pub fn with_game<R>(&mut self, f: impl FnOnce(&mut G, &mut EngineContext) -> R) -> R {
        f(&mut self.game, &mut self.ctx)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Replace the texture registry from a manifest. A bad manifest is logged
    /// and the current registry stays in place.
    pub fn load_manifest(&mut self, json: &str) -> bool {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.ctx.textures = TextureRegistry::from_manifest(&manifest);
                self.skybox = manifest.skybox;
                log::info!("asset manifest loaded: {} textures", self.ctx.textures.len());
                true
            }
            Err(e) => {
                log::error!("failed to load asset manifest: {e:#}");
                false
            }
        }
    }

    /// The host could not load texture `id`; affected bodies render untextured.
    pub fn texture_failed(&mut self, id: u32) {
        self.ctx.textures.mark_failed(TextureId(id));
    }

    pub fn texture_count(&self) -> u32 {
        self.ctx.textures.len() as u32
    }

    pub fn texture_url(&self, id: u32) -> Option<String> {
        self.ctx.textures.url(TextureId(id)).map(str::to_owned)
    }

    pub fn skybox_url(&self, face: u32) -> Option<String> {
        self.skybox.get(face as usize).cloned()
    }

    // ---- Frame buffer accessors ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::bridge::protocol::{
        HEADER_EVENT_COUNT, HEADER_FRAME_COUNTER, HEADER_INSTANCE_COUNT, HEADER_VIEWPORT_WIDTH,
    };
    use orrery_engine::{Entity, GameEvent, MeshComponent, Color};

    /// Records the order in which hooks run.
    #[derive(Default)]
    struct Probe {
        log: Vec<String>,
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id).with_mesh(MeshComponent::sphere(1.0, Color::WHITE).with_texture("earth")),
            );
        }

        fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
            self.log.push(format!("input {:?}", event));
            ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        }

        fn update(&mut self, _ctx: &mut EngineContext, dt: f32) {
            self.log.push(format!("update {dt:.4}"));
        }
    }

    fn runner() -> GameRunner<Probe> {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner
    }

    #[test]
    fn input_dispatched_once_before_updates() {
        let mut runner = runner();
        runner.push_input(InputEvent::Click { x: 1.0, y: 2.0 });
        runner.push_input(InputEvent::Wheel { delta_y: 3.0 });
        runner.tick(2.0 / 60.0 + 1e-4);

        let log = &runner.game().log;
        assert_eq!(log.len(), 4);
        assert!(log[0].starts_with("input Click"));
        assert!(log[1].starts_with("input Wheel"));
        assert_eq!(log[2], "update 0.0167");
        assert_eq!(log[3], "update 0.0167");

        runner.tick(1.0 / 60.0);
        assert!(runner.game().log[4..].iter().all(|l| l.starts_with("update")));
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut runner = GameRunner::new(Probe::default());
        runner.push_input(InputEvent::Click { x: 0.0, y: 0.0 });
        runner.tick(1.0);
        assert!(runner.game().log.is_empty());
    }

    #[test]
    fn frame_carries_instances_and_events() {
        let mut runner = runner();
        runner.push_input(InputEvent::Resize { width: 640.0, height: 480.0 });
        runner.tick(1.0 / 60.0);

        let frame = runner.frame_buffer();
        assert_eq!(frame.len(), runner.buffer_total_floats() as usize);
        assert_eq!(frame[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(frame[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(frame[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(frame[HEADER_VIEWPORT_WIDTH], 640.0);
        assert!(runner.context().events.is_empty());
    }

    #[test]
    fn bad_manifest_keeps_registry() {
        let mut runner = runner();
        assert!(runner.load_manifest(r#"{"textures":[{"name":"earth","url":"earth.jpg"}]}"#));
        assert_eq!(runner.texture_count(), 1);

        assert!(!runner.load_manifest("{ not json"));
        assert_eq!(runner.texture_count(), 1);
        assert_eq!(runner.texture_url(0).as_deref(), Some("earth.jpg"));
    }

    #[test]
    fn textures_resolve_into_instances() {
        let mut runner = runner();
        runner.load_manifest(r#"{"textures":[{"name":"earth","url":"earth.jpg"}]}"#);
        runner.tick(1.0 / 60.0);
        let offset = runner.layout().instance_data_offset;
        // texture slot is float 8 of the instance
        assert_eq!(runner.frame_buffer()[offset + 8], 0.0);

        runner.texture_failed(0);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.frame_buffer()[offset + 8], -1.0);
    }
}
