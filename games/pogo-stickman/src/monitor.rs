use pogo_engine::*;

use crate::level::LevelHandles;

/// A contact that ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HitSpike,
    ReachedGoal,
}

/// First run-ending contact among this tick's collisions, in event order.
///
/// Only the head counts: torso, limbs, shaft and spring tip may touch spikes
/// or the flag freely. Ended contacts are ignored.
pub fn scan_contacts(
    pairs: &[CollisionPair],
    head: EntityId,
    level: &LevelHandles,
) -> Option<Outcome> {
    pairs
        .iter()
        .filter(|pair| pair.started)
        .filter_map(|pair| pair.other(head))
        .find_map(|other| {
            if level.is_spike(other) {
                Some(Outcome::HitSpike)
            } else if level.is_goal(other) {
                Some(Outcome::ReachedGoal)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const HEAD: EntityId = EntityId(100);
    const TORSO: EntityId = EntityId(101);

    fn level() -> LevelHandles {
        LevelHandles {
            spikes: vec![EntityId(1), EntityId(2)],
            goal: EntityId(9),
        }
    }

    fn contact(a: EntityId, b: EntityId) -> CollisionPair {
        CollisionPair { entity_a: a, entity_b: b, started: true }
    }

    #[test]
    fn head_on_spike_loses() {
        let pairs = [contact(EntityId(2), HEAD)];
        assert_eq!(scan_contacts(&pairs, HEAD, &level()), Some(Outcome::HitSpike));
    }

    #[test]
    fn head_on_flag_wins() {
        let pairs = [contact(HEAD, EntityId(9))];
        assert_eq!(scan_contacts(&pairs, HEAD, &level()), Some(Outcome::ReachedGoal));
    }

    #[test]
    fn other_parts_are_ignored() {
        let pairs = [contact(TORSO, EntityId(1)), contact(EntityId(9), TORSO)];
        assert_eq!(scan_contacts(&pairs, HEAD, &level()), None);
    }

    #[test]
    fn ended_contacts_are_ignored() {
        let pairs = [CollisionPair { entity_a: HEAD, entity_b: EntityId(1), started: false }];
        assert_eq!(scan_contacts(&pairs, HEAD, &level()), None);
    }

    #[test]
    fn first_contact_wins() {
        let pairs = [
            contact(HEAD, TORSO),
            contact(HEAD, EntityId(9)),
            contact(HEAD, EntityId(1)),
        ];
        assert_eq!(scan_contacts(&pairs, HEAD, &level()), Some(Outcome::ReachedGoal));
    }

    #[test]
    fn falling_ball_reports_spike_contact() {
        let mut ctx = EngineContext::from_config(&GameConfig {
            gravity: Vec2::new(0.0, 1500.0),
            ..GameConfig::default()
        });
        let level = crate::level::build_level(&mut ctx, 720.0);
        let spike = ctx.scene.get(level.spikes[0]).map(|e| e.pos).unwrap();

        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 20.0 })
            .with_position(spike - Vec2::new(0.0, 80.0));
        let head = ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        let mut outcome = None;
        for _ in 0..60 {
            ctx.step_physics();
            outcome = outcome.or(scan_contacts(ctx.collisions(), head, &level));
        }
        assert_eq!(outcome, Some(Outcome::HitSpike));
    }
}
