use pogo_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, ShapeBuffer, Camera2D,
    FixedTimestep, FrameSnapshot, ProtocolLayout,
};
use pogo_engine::systems::render::build_shape_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `pogo-stickman`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
///
/// Per fixed tick: `Game::update` → physics step → `Game::after_physics`.
/// Per frame, after all ticks: `Game::render` (camera) → shape buffer → frame buffer.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    shapes: ShapeBuffer,
    camera: Camera2D,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Header + shapes + events, laid out per `ProtocolLayout`.
    frame_buffer: Vec<f32>,
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            shapes: ShapeBuffer::with_capacity(config.max_shapes),
            camera: Camera2D::new(config.world_width, config.world_height),
            timestep,
            layout,
            config,
            frame_buffer: Vec::new(),
            frame: 0,
            initialized: false,
        }
    }

    /// Build the scene from a fresh context. Call once after construction;
    /// `restart` calls it again after a teardown.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx = EngineContext::from_config(&self.config);
        self.shapes = ShapeBuffer::with_capacity(self.config.max_shapes);
        self.camera = Camera2D::new(self.config.world_width, self.config.world_height);
        self.frame = 0;

        self.game.init(&mut self.ctx);
        self.initialized = true;

        // Publish the spawn pose so the host can draw before the first tick.
        self.present();
    }

    /// Push an input event into the queue. Ignored while torn down.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.initialized {
            self.input.push(event);
        }
    }

    /// Run one frame: fixed ticks, then camera and render buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            if step == 0 {
                // Only the first tick of a frame sees the queued events.
                self.input.drain();
            }
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
            self.game.after_physics(&mut self.ctx);
        }

        self.present();
    }

    /// Tear the scene down and build it again from scratch.
    pub fn restart(&mut self) {
        if !self.initialized {
            return;
        }
        self.teardown();
        self.init();
        log::info!("scene restarted");
    }

    /// Stop ticking and release every entity, body, joint and pending input.
    pub fn teardown(&mut self) {
        self.initialized = false;
        self.ctx.teardown();
        self.input.drain();
        self.shapes.clear();
        self.frame_buffer.clear();
        self.timestep.reset();
    }

    /// Apply a JSON tuning document. The scene restarts so the new values
    /// reach the physics world; on error the current tuning stays.
    pub fn load_tuning(&mut self, json: &str) -> bool {
        match self.game.load_tuning(json) {
            Ok(()) => {
                log::info!("tuning applied");
                self.restart();
                true
            }
            Err(err) => {
                log::warn!("tuning rejected: {err}");
                false
            }
        }
    }

    fn present(&mut self) {
        {
            let mut render_ctx = RenderContext {
                scene: &self.ctx.scene,
                camera: &mut self.camera,
            };
            self.game.render(&mut render_ctx);
        }

        build_shape_buffer(self.ctx.scene.iter(), &self.camera, &mut self.shapes);

        let snapshot = FrameSnapshot {
            frame: self.frame,
            world_width: self.config.world_width,
            world_height: self.config.world_height,
            view: self.camera.view_bounds(),
            status: self.game.status(),
            shapes: self.shapes.instances(),
            events: &self.ctx.events,
        };
        self.layout.write_frame(&snapshot, &mut self.frame_buffer);
        self.frame = self.frame.wrapping_add(1);
    }

    // ---- State accessors ----

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn status(&self) -> u32 {
        self.game.status()
    }

    // ---- Pointer accessors for reads from WASM memory ----

    pub fn shapes_ptr(&self) -> *const f32 {
        self.shapes.instances_ptr()
    }

    pub fn shape_count(&self) -> u32 {
        self.shapes.instance_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn camera_min_x(&self) -> f32 {
        self.camera.view_bounds().min.x
    }

    pub fn camera_max_x(&self) -> f32 {
        self.camera.view_bounds().max.x
    }

    pub fn camera_min_y(&self) -> f32 {
        self.camera.view_bounds().min.y
    }

    pub fn camera_max_y(&self) -> f32 {
        self.camera.view_bounds().max.y
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_shapes(&self) -> u32 {
        self.layout.max_shapes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
#[cfg(feature = "physics")]
mod tests {
    use super::*;
    use glam::Vec2;
    use pogo_engine::{
        BodyDesc, Color, ColliderDesc, ColliderMaterial, Entity, EntityId, GameEvent, Key,
        ShapeComponent,
    };

    /// Drops a ball from (100, 0) and records what the runner feeds it.
    #[derive(Default)]
    struct Recorder {
        inits: u32,
        trace: Vec<&'static str>,
        keys_per_tick: Vec<usize>,
        ball: Option<EntityId>,
        rejects_tuning: bool,
    }

    impl Game for Recorder {
        fn config(&self) -> GameConfig {
            GameConfig {
                world_width: 400.0,
                world_height: 300.0,
                gravity: Vec2::new(0.0, 1500.0),
                ..GameConfig::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            self.inits += 1;
            let id = ctx.next_id();
            let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(Vec2::new(100.0, 0.0));
            let entity = Entity::new(id).with_shape(ShapeComponent::circle(10.0, Color::default()));
            self.ball = Some(ctx.spawn_with_body(entity, desc, ColliderMaterial::default()));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.trace.push("update");
            self.keys_per_tick.push(input.len());
            if !input.is_empty() {
                ctx.emit_event(GameEvent::new(7.0, input.len() as f32));
            }
        }

        fn after_physics(&mut self, _ctx: &mut EngineContext) {
            self.trace.push("after_physics");
        }

        fn render(&self, ctx: &mut RenderContext) {
            if let Some(ball) = self.ball.and_then(|id| ctx.scene.get(id)) {
                ctx.camera.track_x(ball.pos.x + 25.0);
            }
        }

        fn status(&self) -> u32 {
            self.inits
        }

        fn load_tuning(&mut self, json: &str) -> Result<(), serde_json::Error> {
            if self.rejects_tuning {
                serde_json::from_str::<u32>(json).map(|_| ())
            } else {
                Ok(())
            }
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn runner() -> GameRunner<Recorder> {
        let mut runner = GameRunner::new(Recorder::default());
        runner.init();
        runner
    }

    fn ball_pos(runner: &GameRunner<Recorder>) -> Vec2 {
        let id = runner.game().ball.unwrap();
        runner.context().scene.get(id).unwrap().pos
    }

    #[test]
    fn ticks_run_update_physics_after_physics_in_order() {
        let mut runner = runner();
        runner.tick(DT * 2.0);
        assert_eq!(
            runner.game().trace,
            vec!["update", "after_physics", "update", "after_physics"]
        );
        assert!(ball_pos(&runner).y > 0.0, "gravity from config should move the ball");
    }

    #[test]
    fn input_reaches_only_the_first_tick() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key: Key::ArrowRight });
        runner.push_input(InputEvent::KeyUp { key: Key::ArrowRight });
        runner.tick(DT * 3.0);
        assert_eq!(runner.game().keys_per_tick, vec![2, 0, 0]);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn zero_tick_frames_keep_input_queued() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key: Key::Space });
        runner.tick(DT * 0.25);
        assert!(runner.game().keys_per_tick.is_empty());
        runner.tick(DT);
        assert_eq!(runner.game().keys_per_tick, vec![1]);
    }

    #[test]
    fn camera_follows_after_every_frame() {
        let mut runner = runner();
        for _ in 0..5 {
            runner.tick(DT);
            let view = runner.camera().view_bounds();
            let center_x = (view.min.x + view.max.x) / 2.0;
            assert!((center_x - (ball_pos(&runner).x + 25.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn frame_buffer_mirrors_the_frame() {
        let mut runner = runner();
        runner.tick(DT);
        assert_eq!(runner.frame_buffer.len(), runner.buffer_total_floats() as usize);
        assert_eq!(runner.shape_count(), 1);
        let x = runner.frame_buffer[runner.layout.shape_data_offset];
        assert_eq!(x, ball_pos(&runner).x);
    }

    #[test]
    fn restart_rebuilds_from_scratch() {
        let mut runner = runner();
        runner.tick(DT * 5.0);
        runner.restart();

        assert_eq!(runner.status(), 2);
        assert_eq!(runner.context().scene.len(), 1);
        assert_eq!(runner.context().physics.body_count(), 1);
        assert_eq!(ball_pos(&runner), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn torn_down_runner_ignores_everything() {
        let mut runner = runner();
        runner.teardown();
        runner.push_input(InputEvent::KeyDown { key: Key::ArrowLeft });
        runner.tick(DT * 4.0);
        runner.restart();

        assert!(!runner.is_initialized());
        assert!(runner.game().trace.is_empty());
        assert!(runner.context().scene.is_empty());
        assert_eq!(runner.context().physics.body_count(), 0);
        assert_eq!(runner.shape_count(), 0);
    }

    #[test]
    fn rejected_tuning_keeps_the_scene() {
        let mut runner = GameRunner::new(Recorder {
            rejects_tuning: true,
            ..Recorder::default()
        });
        runner.init();
        assert!(!runner.load_tuning("{ not json"));
        assert_eq!(runner.status(), 1);
        assert!(runner.load_tuning("3"));
        assert_eq!(runner.status(), 2);
    }
}
