use glam::Vec2;
use pogo_engine::*;

use crate::character::CharacterParts;
use crate::tuning::PogoTuning;

const LEFT_KEYS: [Key; 3] = [Key::ArrowLeft, Key::Char('a'), Key::Char('A')];
const RIGHT_KEYS: [Key; 3] = [Key::ArrowRight, Key::Char('d'), Key::Char('D')];
const JUMP_KEYS: [Key; 4] = [Key::ArrowUp, Key::Char('w'), Key::Char('W'), Key::Space];

/// What the held keys ask for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Intent {
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            left: keys.any_down(&LEFT_KEYS),
            right: keys.any_down(&RIGHT_KEYS),
            jump: keys.any_down(&JUMP_KEYS),
        }
    }

    /// -1 for left, +1 for right, 0 for neither or both.
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Queue this tick's forces on the ragdoll.
///
/// Sideways input pushes every body and spins the torso into a lean; jump
/// pushes only the spring tip upward.
pub fn apply_controls(
    ctx: &mut EngineContext,
    parts: &CharacterParts,
    intent: Intent,
    tuning: &PogoTuning,
) {
    let direction = intent.direction();
    if direction != 0.0 {
        let push = Vec2::new(direction * tuning.move_force, 0.0);
        for &id in parts.all() {
            ctx.apply_force(id, push);
        }
        ctx.set_angular_velocity(parts.torso(), direction * tuning.lean_speed);
    }

    if intent.jump {
        ctx.apply_force(parts.spring_tip(), Vec2::new(0.0, -tuning.jump_force));
    }
}
