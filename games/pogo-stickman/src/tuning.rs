use serde::{Deserialize, Serialize};

/// Feel of the game: gravity, input forces and how springy the ragdoll is.
///
/// Every field has a default, so a tuning document only needs the values it
/// overrides: `{"jump_force": 18000}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PogoTuning {
    /// Downward acceleration in world units / s².
    pub gravity: f32,
    /// Sideways force applied to every character body while left/right is held.
    pub move_force: f32,
    /// Upward force applied to the spring tip while jump is held.
    pub jump_force: f32,
    /// Torso angular velocity (rad/s) while leaning.
    pub lean_speed: f32,
    /// Damping ratio shared by every joint spring (1.0 = critically damped).
    pub spring_damping_ratio: f32,
    /// Linear and angular velocity decay on character bodies.
    pub air_damping: f32,
    /// World units per physics "metre".
    pub length_unit: f32,
}

impl Default for PogoTuning {
    fn default() -> Self {
        Self {
            gravity: 1500.0,
            move_force: 3000.0,
            jump_force: 15000.0,
            lean_speed: 3.0,
            spring_damping_ratio: 0.7,
            air_damping: 0.6,
            length_unit: 50.0,
        }
    }
}

impl PogoTuning {
    /// Parse a tuning document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Spring stiffness for a joint that closes `factor` of its stretch per tick.
    pub fn spring_stiffness(&self, factor: f32, dt: f32) -> f32 {
        factor / (dt * dt)
    }

    /// Damping matching `spring_damping_ratio` for the given stiffness.
    pub fn spring_damping(&self, stiffness: f32) -> f32 {
        2.0 * self.spring_damping_ratio * stiffness.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let tuning = PogoTuning::from_json(r#"{"jump_force": 18000.0}"#).unwrap();
        assert_eq!(tuning.jump_force, 18000.0);
        assert_eq!(tuning.move_force, PogoTuning::default().move_force);
        assert_eq!(tuning.gravity, 1500.0);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PogoTuning::from_json("{}").unwrap(), PogoTuning::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PogoTuning::from_json("{ gravity: }").is_err());
        assert!(PogoTuning::from_json(r#"{"gravity": "down"}"#).is_err());
    }

    #[test]
    fn stiffness_keeps_factor_ordering() {
        let tuning = PogoTuning::default();
        let dt = 1.0 / 60.0;
        let arm = tuning.spring_stiffness(0.3, dt);
        let tip = tuning.spring_stiffness(0.8, dt);
        assert!((tuning.spring_stiffness(0.5, dt) - 1800.0).abs() < 0.1);
        assert!(arm < tip);
        assert!(tuning.spring_damping(arm) < tuning.spring_damping(tip));
    }
}
