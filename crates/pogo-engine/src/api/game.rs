use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;
#[cfg(feature = "physics")]
use crate::core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, ColliderMaterial, CollisionPair,
};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units. Also the camera's visible width.
    pub world_width: f32,
    /// World height in game units. Also the camera's visible height.
    pub world_height: f32,
    /// Maximum number of shape instances drawn per frame (default: 256).
    pub max_shapes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for physics simulation. Default: zero (no gravity).
    /// Y points down, so use positive Y for downward gravity.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
    /// World units per Rapier "metre", used to scale solver tolerances.
    #[cfg(feature = "physics")]
    pub length_unit: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_shapes: 256,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
            #[cfg(feature = "physics")]
            length_unit: 1.0,
        }
    }
}

/// The core contract every game must fulfill.
///
/// Per fixed tick the runner calls `update`, steps physics, then calls
/// `after_physics`. Once per frame, after all ticks, it calls `render`.
pub trait Game {
    /// Return engine configuration. Called before every init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    /// Called on first start and again on every restart with a fresh context.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Pre-physics tick: consume input, apply forces.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Post-physics tick: react to this tick's collisions.
    fn after_physics(&mut self, _ctx: &mut EngineContext) {}

    /// Per-frame hook before the frame is presented (camera placement).
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Game-defined status code polled by the host UI.
    fn status(&self) -> u32 {
        0
    }

    /// Apply a JSON tuning document. Takes effect on the next `init`.
    fn load_tuning(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(Vec2::ZERO),
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
        }
    }

    /// Create an EngineContext whose physics world follows the config's
    /// gravity, timestep and length unit.
    pub fn from_config(config: &GameConfig) -> Self {
        #[allow(unused_mut)]
        let mut ctx = Self::new();
        #[cfg(feature = "physics")]
        {
            ctx.physics = PhysicsWorld::new(config.gravity);
            ctx.physics.set_dt(config.fixed_dt);
            ctx.physics.set_length_unit(config.length_unit);
        }
        #[cfg(not(feature = "physics"))]
        let _ = config;
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

    /// Clear per-frame transient data (events, collision events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        #[cfg(feature = "physics")]
        self.collision_events.clear();
    }

    /// Despawn every entity and release every physics body and joint.
    pub fn teardown(&mut self) {
        self.scene.drain();
        self.events.clear();
        #[cfg(feature = "physics")]
        {
            self.physics.clear();
            self.collision_events.clear();
        }
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity
            .with_pos(desc.position)
            .with_rotation(desc.rotation)
            .with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// The physics body attached to an entity, if any.
    #[cfg(feature = "physics")]
    pub fn body(&self, id: EntityId) -> Option<PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }

    /// Apply a one-tick force to an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.apply_force(&body, force);
        }
    }

    /// Overwrite the angular velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_angular_velocity(&mut self, id: EntityId, angvel: f32) {
        if let Some(body) = self.body(id) {
            self.physics.set_angular_velocity(&body, angvel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.velocity(&body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the angular velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn angular_velocity(&self, id: EntityId) -> f32 {
        self.body(id)
            .map(|body| self.physics.angular_velocity(&body))
            .unwrap_or(0.0)
    }

    /// Force queued on an entity's body for the next physics step.
    #[cfg(feature = "physics")]
    pub fn pending_force(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.user_force(&body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get collision events from the most recent physics step.
    #[cfg(feature = "physics")]
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner between `Game::update()` and `Game::after_physics()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame context for the `render` hook.
pub struct RenderContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a mut Camera2D,
}
