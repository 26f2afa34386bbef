pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::shape::{Color, Shape, ShapeComponent};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::camera::{Camera2D, ViewBounds};
pub use renderer::shape_instance::{ShapeInstance, ShapeBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use input::keys::{Key, KeyState};
pub use bridge::protocol::{FrameSnapshot, ProtocolLayout};
pub use systems::render::build_shape_buffer;

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CombineRule, CollisionPair,
    JointDesc,
};
