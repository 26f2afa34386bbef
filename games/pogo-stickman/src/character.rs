use glam::Vec2;
use pogo_engine::*;

use crate::tuning::PogoTuning;

const BODY_COLOR: Color = Color::from_hex(0xFFD700);
const SHAFT_COLOR: Color = Color::from_hex(0xC0C0C0);
const SPRING_COLOR: Color = Color::from_hex(0xFF0000);

/// Spawn anchor: 150 units from the left edge, 200 up from the viewport bottom.
const SPAWN_X: f32 = 150.0;
const SPAWN_ABOVE_FLOOR: f32 = 200.0;

/// One of the eight rigid bodies of the ragdoll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Shaft,
    SpringTip,
}

impl Part {
    pub const ALL: [Part; 8] = [
        Part::Head,
        Part::Torso,
        Part::LeftArm,
        Part::RightArm,
        Part::LeftLeg,
        Part::RightLeg,
        Part::Shaft,
        Part::SpringTip,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn spec(self) -> &'static PartSpec {
        &PARTS[self.index()]
    }

    /// Where this part is centred at spawn, for a viewport of the given height.
    pub fn spawn_position(self, height: f32) -> Vec2 {
        Vec2::new(SPAWN_X, height - SPAWN_ABOVE_FLOOR) + self.spec().offset
    }
}

struct PartSpec {
    tag: &'static str,
    collider: ColliderDesc,
    /// Centre relative to the spawn anchor.
    offset: Vec2,
    density: f32,
    friction: f32,
    restitution: f32,
    combine: CombineRule,
    color: Color,
}

const fn limb(tag: &'static str, width: f32, height: f32, offset: Vec2) -> PartSpec {
    PartSpec {
        tag,
        collider: ColliderDesc::Cuboid { half_width: width / 2.0, half_height: height / 2.0 },
        offset,
        density: 0.0005,
        friction: 0.1,
        restitution: 0.0,
        combine: CombineRule::Average,
        color: BODY_COLOR,
    }
}

/// Indexed by `Part`.
const PARTS: [PartSpec; 8] = [
    PartSpec {
        tag: "head",
        collider: ColliderDesc::Ball { radius: 20.0 },
        offset: Vec2::new(0.0, -80.0),
        density: 0.001,
        friction: 0.1,
        restitution: 0.0,
        combine: CombineRule::Average,
        color: BODY_COLOR,
    },
    PartSpec {
        tag: "torso",
        collider: ColliderDesc::Cuboid { half_width: 7.5, half_height: 30.0 },
        offset: Vec2::new(0.0, -30.0),
        density: 0.001,
        friction: 0.1,
        restitution: 0.0,
        combine: CombineRule::Average,
        color: BODY_COLOR,
    },
    limb("arm", 10.0, 40.0, Vec2::new(-20.0, -30.0)),
    limb("arm", 10.0, 40.0, Vec2::new(20.0, -30.0)),
    limb("leg", 10.0, 50.0, Vec2::new(-10.0, 25.0)),
    limb("leg", 10.0, 50.0, Vec2::new(10.0, 25.0)),
    PartSpec {
        tag: "shaft",
        collider: ColliderDesc::Cuboid { half_width: 4.0, half_height: 40.0 },
        offset: Vec2::new(0.0, 80.0),
        density: 0.002,
        friction: 0.8,
        restitution: 0.9,
        combine: CombineRule::Average,
        color: SHAFT_COLOR,
    },
    // The bounce: restitution above 1 wins against whatever it lands on.
    PartSpec {
        tag: "spring",
        collider: ColliderDesc::Ball { radius: 15.0 },
        offset: Vec2::new(0.0, 125.0),
        density: 0.003,
        friction: 0.9,
        restitution: 1.2,
        combine: CombineRule::Max,
        color: SPRING_COLOR,
    },
];

/// Elastic link between two parts. `factor` is the share of the stretch
/// closed per tick; it becomes a spring stiffness via the tuning.
struct Link {
    a: Part,
    b: Part,
    anchor_a: Vec2,
    anchor_b: Vec2,
    rest: f32,
    factor: f32,
}

const LINKS: [Link; 8] = [
    Link { a: Part::Head, b: Part::Torso, anchor_a: Vec2::ZERO, anchor_b: Vec2::ZERO, rest: 25.0, factor: 0.5 },
    Link { a: Part::Torso, b: Part::LeftArm, anchor_a: Vec2::new(-7.0, -20.0), anchor_b: Vec2::new(0.0, -20.0), rest: 5.0, factor: 0.3 },
    Link { a: Part::Torso, b: Part::RightArm, anchor_a: Vec2::new(7.0, -20.0), anchor_b: Vec2::new(0.0, -20.0), rest: 5.0, factor: 0.3 },
    Link { a: Part::Torso, b: Part::LeftLeg, anchor_a: Vec2::new(-5.0, 30.0), anchor_b: Vec2::new(0.0, -25.0), rest: 5.0, factor: 0.4 },
    Link { a: Part::Torso, b: Part::RightLeg, anchor_a: Vec2::new(5.0, 30.0), anchor_b: Vec2::new(0.0, -25.0), rest: 5.0, factor: 0.4 },
    Link { a: Part::LeftLeg, b: Part::Shaft, anchor_a: Vec2::new(0.0, 25.0), anchor_b: Vec2::new(0.0, -35.0), rest: 5.0, factor: 0.5 },
    Link { a: Part::RightLeg, b: Part::Shaft, anchor_a: Vec2::new(0.0, 25.0), anchor_b: Vec2::new(0.0, -35.0), rest: 5.0, factor: 0.5 },
    Link { a: Part::Shaft, b: Part::SpringTip, anchor_a: Vec2::new(0.0, 40.0), anchor_b: Vec2::ZERO, rest: 0.0, factor: 0.8 },
];

/// Entity handles of the assembled ragdoll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterParts {
    ids: [EntityId; 8],
}

impl CharacterParts {
    pub fn get(&self, part: Part) -> EntityId {
        self.ids[part.index()]
    }

    pub fn head(&self) -> EntityId {
        self.get(Part::Head)
    }

    pub fn torso(&self) -> EntityId {
        self.get(Part::Torso)
    }

    pub fn spring_tip(&self) -> EntityId {
        self.get(Part::SpringTip)
    }

    /// Every body, in `Part::ALL` order.
    pub fn all(&self) -> &[EntityId; 8] {
        &self.ids
    }
}

/// Spawn the ragdoll at its anchor and link it up.
pub fn build_character(
    ctx: &mut EngineContext,
    height: f32,
    tuning: &PogoTuning,
    fixed_dt: f32,
) -> CharacterParts {
    let ids = Part::ALL.map(|part| spawn_part(ctx, part, height, tuning));
    let parts = CharacterParts { ids };

    for link in &LINKS {
        let (Some(a), Some(b)) = (ctx.body(parts.get(link.a)), ctx.body(parts.get(link.b))) else {
            continue;
        };
        let stiffness = tuning.spring_stiffness(link.factor, fixed_dt);
        let desc = JointDesc::spring(link.rest, stiffness, tuning.spring_damping(stiffness))
            .with_anchors(link.anchor_a, link.anchor_b)
            // The head rests on the torso; every other linked pair overlaps at the joint.
            .with_contacts(link.a == Part::Head);
        ctx.physics.create_joint(&a, &b, &desc);
    }

    parts
}

fn spawn_part(ctx: &mut EngineContext, part: Part, height: f32, tuning: &PogoTuning) -> EntityId {
    let spec = part.spec();
    let shape = match spec.collider {
        ColliderDesc::Ball { radius } => ShapeComponent::circle(radius, spec.color),
        ColliderDesc::Cuboid { half_width, half_height } => {
            ShapeComponent::rect(half_width * 2.0, half_height * 2.0, spec.color)
        }
    };

    let id = ctx.next_id();
    let entity = Entity::new(id)
        .with_tag(spec.tag)
        .with_shape(shape.on_layer(RenderLayer::Character));
    let desc = BodyDesc::dynamic(spec.collider)
        .with_position(part.spawn_position(height))
        .with_linear_damping(tuning.air_damping)
        .with_angular_damping(tuning.air_damping)
        .with_ccd(part == Part::SpringTip);
    let material = ColliderMaterial::new(spec.density, spec.friction)
        .with_restitution(spec.restitution, spec.combine);
    ctx.spawn_with_body(entity, desc, material)
}
