use pogo_engine::*;
use glam::Vec2;

use crate::character::{build_character, CharacterParts};
use crate::controls::{apply_controls, Intent};
use crate::level::{build_level, LevelHandles};
use crate::monitor::{scan_contacts, Outcome};
use crate::phase::Phase;
use crate::tuning::PogoTuning;

const FIXED_DT: f32 = 1.0 / 60.0;

/// Game event kinds sent to the host page.
pub mod events {
    /// Payload `a` = new phase code.
    pub const PHASE_CHANGED: f32 = 1.0;
}

pub struct PogoGame {
    width: f32,
    height: f32,
    tuning: PogoTuning,
    phase: Phase,
    keys: KeyState,
    parts: Option<CharacterParts>,
    level: Option<LevelHandles>,
}

impl PogoGame {
    /// A game for a viewport of the given size. The size is fixed for the
    /// lifetime of the scene.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            tuning: PogoTuning::default(),
            phase: Phase::NotStarted,
            keys: KeyState::new(),
            parts: None,
            level: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn parts(&self) -> Option<&CharacterParts> {
        self.parts.as_ref()
    }

    pub fn level(&self) -> Option<&LevelHandles> {
        self.level.as_ref()
    }

    pub fn tuning(&self) -> &PogoTuning {
        &self.tuning
    }

    fn emit_phase(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(events::PHASE_CHANGED, self.phase.code() as f32));
    }

    /// Apply a run-ending contact. Only a run in progress can end.
    pub fn resolve(&mut self, ctx: &mut EngineContext, outcome: Outcome) {
        let changed = match outcome {
            Outcome::HitSpike => self.phase.lose(),
            Outcome::ReachedGoal => self.phase.win(),
        };
        if changed {
            self.emit_phase(ctx);
        }
    }
}

impl Game for PogoGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: self.width,
            world_height: self.height,
            gravity: Vec2::new(0.0, self.tuning.gravity),
            length_unit: self.tuning.length_unit,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.phase.reset();
        self.keys.clear();
        self.level = Some(build_level(ctx, self.height));
        self.parts = Some(build_character(ctx, self.height, &self.tuning, FIXED_DT));
        log::info!(
            "pogo scene built: {} entities, {} joints",
            ctx.scene.len(),
            ctx.physics.joint_count()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            // Any key press starts the run, mapped or not.
            if self.keys.apply(event) && self.phase.start() {
                self.emit_phase(ctx);
            }
        }

        if self.phase != Phase::Playing {
            return;
        }
        if let Some(parts) = &self.parts {
            apply_controls(ctx, parts, Intent::from_keys(&self.keys), &self.tuning);
        }
    }

    fn after_physics(&mut self, ctx: &mut EngineContext) {
        if self.phase != Phase::Playing {
            return;
        }
        let (Some(parts), Some(level)) = (&self.parts, &self.level) else {
            return;
        };
        if let Some(outcome) = scan_contacts(ctx.collisions(), parts.head(), level) {
            self.resolve(ctx, outcome);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        let torso = self.parts.and_then(|parts| ctx.scene.get(parts.torso()));
        if let Some(torso) = torso {
            ctx.camera.track_x(torso.pos.x);
        }
    }

    fn status(&self) -> u32 {
        self.phase.code()
    }

    fn load_tuning(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.tuning = PogoTuning::from_json(json)?;
        Ok(())
    }
}
