use glam::Vec2;
use pogo_engine::*;

const GROUND_COLOR: Color = Color::from_hex(0x654321);
const PLATFORM_COLOR: Color = Color::from_hex(0x8B4513);
const SPIKE_COLOR: Color = Color::from_hex(0xFF0000);
const FLAG_COLOR: Color = Color::from_hex(0x00FF00);

pub const SPIKE_COUNT: usize = 5;
const SPIKE_START_X: f32 = 750.0;
const SPIKE_SPACING: f32 = 30.0;

/// Static piece of the course. `y_above_floor` is measured up from the
/// viewport's bottom edge to the piece's centre.
struct Piece {
    tag: &'static str,
    x: f32,
    y_above_floor: f32,
    width: f32,
    height: f32,
    color: Color,
    layer: RenderLayer,
}

const TERRAIN: [Piece; 5] = [
    Piece { tag: "ground", x: 400.0, y_above_floor: 25.0, width: 10000.0, height: 50.0, color: GROUND_COLOR, layer: RenderLayer::Terrain },
    Piece { tag: "platform", x: 600.0, y_above_floor: 150.0, width: 200.0, height: 20.0, color: PLATFORM_COLOR, layer: RenderLayer::Terrain },
    Piece { tag: "platform", x: 900.0, y_above_floor: 250.0, width: 200.0, height: 20.0, color: PLATFORM_COLOR, layer: RenderLayer::Terrain },
    Piece { tag: "platform", x: 1200.0, y_above_floor: 350.0, width: 200.0, height: 20.0, color: PLATFORM_COLOR, layer: RenderLayer::Terrain },
    Piece { tag: "pole", x: 1300.0, y_above_floor: 450.0, width: 10.0, height: 200.0, color: GROUND_COLOR, layer: RenderLayer::Props },
];

const FLAG: Piece = Piece {
    tag: "goal",
    x: 1340.0,
    y_above_floor: 530.0,
    width: 80.0,
    height: 60.0,
    color: FLAG_COLOR,
    layer: RenderLayer::Props,
};

fn spike(i: usize) -> Piece {
    Piece {
        tag: "spike",
        x: SPIKE_START_X + i as f32 * SPIKE_SPACING,
        y_above_floor: 50.0,
        width: 20.0,
        height: 40.0,
        color: SPIKE_COLOR,
        layer: RenderLayer::Hazards,
    }
}

/// Bodies the game rules refer to after the level is built.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelHandles {
    pub spikes: Vec<EntityId>,
    pub goal: EntityId,
}

impl LevelHandles {
    pub fn is_spike(&self, id: EntityId) -> bool {
        self.spikes.contains(&id)
    }

    pub fn is_goal(&self, id: EntityId) -> bool {
        self.goal == id
    }
}

/// Spawn ground, platforms, spikes, flag pole and flag for a viewport of
/// the given height.
pub fn build_level(ctx: &mut EngineContext, height: f32) -> LevelHandles {
    for piece in &TERRAIN {
        spawn_piece(ctx, piece, height);
    }

    let spikes = (0..SPIKE_COUNT)
        .map(|i| spawn_piece(ctx, &spike(i), height))
        .collect();
    let goal = spawn_piece(ctx, &FLAG, height);

    LevelHandles { spikes, goal }
}

fn spawn_piece(ctx: &mut EngineContext, piece: &Piece, height: f32) -> EntityId {
    let pos = Vec2::new(piece.x, height - piece.y_above_floor);
    let id = ctx.next_id();
    let entity = Entity::new(id).with_tag(piece.tag).with_shape(
        ShapeComponent::rect(piece.width, piece.height, piece.color).on_layer(piece.layer),
    );
    let desc = BodyDesc::fixed(ColliderDesc::rect(piece.width, piece.height)).with_position(pos);
    ctx.spawn_with_body(entity, desc, ColliderMaterial::default())
}
