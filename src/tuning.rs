//! Game balance and tuning
//!
//! Every numeric knob the simulation reads lives here. Loaded from JSON;
//! missing fields fall back to the defaults, so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// How the obstacle spawn cadence reacts to the tempo (slow-motion) effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpawnPolicy {
    /// Spawn every `obstacle_interval` frames regardless of game speed
    #[default]
    Fixed,
    /// Stretch the interval by base_speed / current_speed, keeping spacing constant
    Stretched,
}

impl SpawnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Fixed => "Fixed",
            SpawnPolicy::Stretched => "Stretched",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(SpawnPolicy::Fixed),
            "stretched" | "stretch" => Some(SpawnPolicy::Stretched),
            _ => None,
        }
    }

    /// Obstacle spawn interval in frames at the given game speed
    pub fn obstacle_interval(&self, base_interval: u64, base_speed: f32, speed: f32) -> u64 {
        match self {
            SpawnPolicy::Fixed => base_interval,
            SpawnPolicy::Stretched => {
                if speed <= 0.0 {
                    return base_interval;
                }
                ((base_interval as f32 * base_speed / speed).round() as u64).max(1)
            }
        }
    }
}

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    /// Fixed horizontal position of the runner
    pub player_x: f32,
    /// Vertical position at session start
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Ground-mode jump impulse
    pub jump_power: f32,
    /// Air-mode flap impulse
    pub flap_power: f32,
    /// Per-frame vertical acceleration
    pub gravity: f32,
    /// Displacement away from the floor when switching to air mode
    pub safety_hop: f32,
    /// Vertical speed given by the safety hop
    pub hop_velocity: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Frames between obstacle spawns
    pub obstacle_interval: u64,
    /// Probability an obstacle is a ground hazard (otherwise air)
    pub ground_spawn_chance: f32,
    /// Air hazards spawn in [0, field_height - air_band_margin) (offset when inverted)
    pub air_band_margin: f32,
    /// Extra offset applied to air hazards under inverted gravity
    pub inverted_air_offset: f32,
    /// Oscillation only appears once score exceeds this
    pub oscillate_min_score: u32,
    pub oscillate_chance: f32,
    pub oscillate_amplitude: f32,
    /// Radians per frame
    pub oscillate_frequency: f32,
    /// Phase-shifting obstacles only appear once score exceeds this
    pub phase_shift_min_score: u32,
    pub phase_shift_chance: f32,

    // === Power-ups ===
    pub powerup_size: f32,
    /// Frames between power-up spawns
    pub powerup_interval: u64,
    /// Power-ups only spawn once score reaches this
    pub powerup_min_score: u32,
    /// Power-ups spawn in [powerup_top_offset, field_height - powerup_band_margin + powerup_top_offset)
    pub powerup_band_margin: f32,
    pub powerup_top_offset: f32,
    /// Probability a power-up is a shield (otherwise tempo)
    pub shield_chance: f32,

    // === Effects ===
    /// Frames a shield stays up
    pub shield_duration: u32,
    /// Frames the tempo effect lasts
    pub tempo_duration: u32,
    /// Tempo effect also makes the runner immune to hazards (ghost)
    pub tempo_grants_immunity: bool,

    // === Speed ===
    pub base_speed: f32,
    /// Game speed while the tempo effect is active
    pub slow_speed: f32,
    pub spawn_policy: SpawnPolicy,

    // === Collision ===
    /// Inset used for forgiving obstacle hits
    pub hazard_margin: f32,
    /// Distance from the lethal boundary that counts as touching it in air mode
    pub boundary_tolerance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_x: 50.0,
            player_start_y: 200.0,
            player_width: 40.0,
            player_height: 40.0,
            jump_power: 13.0,
            flap_power: 9.0,
            gravity: 0.6,
            safety_hop: 40.0,
            hop_velocity: 5.0,

            obstacle_width: 40.0,
            obstacle_height: 40.0,
            obstacle_interval: 100,
            ground_spawn_chance: 0.6,
            air_band_margin: 150.0,
            inverted_air_offset: 50.0,
            oscillate_min_score: 5,
            oscillate_chance: 0.3,
            oscillate_amplitude: 50.0,
            oscillate_frequency: 0.05,
            phase_shift_min_score: 15,
            phase_shift_chance: 0.5,

            powerup_size: 30.0,
            powerup_interval: 600,
            powerup_min_score: 5,
            powerup_band_margin: 100.0,
            powerup_top_offset: 50.0,
            shield_chance: 0.5,

            shield_duration: 300,
            tempo_duration: 300,
            tempo_grants_immunity: true,

            base_speed: 5.0,
            slow_speed: 2.5,
            spawn_policy: SpawnPolicy::Fixed,

            hazard_margin: 5.0,
            boundary_tolerance: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("powerup_size", self.powerup_size),
            ("base_speed", self.base_speed),
            ("slow_speed", self.slow_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.player_height >= self.field_height {
            return Err(invalid("player_height", "must be smaller than field_height"));
        }
        if self.air_band_margin > self.field_height {
            return Err(invalid("air_band_margin", "must not exceed field_height"));
        }
        if self.powerup_band_margin > self.field_height {
            return Err(invalid("powerup_band_margin", "must not exceed field_height"));
        }
        if self.slow_speed >= self.base_speed {
            return Err(invalid("slow_speed", "must be below base_speed"));
        }
        if self.obstacle_interval == 0 {
            return Err(invalid("obstacle_interval", "must be at least 1 frame"));
        }
        if self.powerup_interval == 0 {
            return Err(invalid("powerup_interval", "must be at least 1 frame"));
        }
        if self.shield_duration == 0 {
            return Err(invalid("shield_duration", "must be at least 1 frame"));
        }
        if self.tempo_duration == 0 {
            return Err(invalid("tempo_duration", "must be at least 1 frame"));
        }

        let chances = [
            ("ground_spawn_chance", self.ground_spawn_chance),
            ("oscillate_chance", self.oscillate_chance),
            ("phase_shift_chance", self.phase_shift_chance),
            ("shield_chance", self.shield_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be within [0, 1], got {value}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 6.0, "spawn_policy": "Stretched" }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.base_speed, 6.0);
        assert_eq!(tuning.spawn_policy, SpawnPolicy::Stretched);
        assert_eq!(tuning.jump_power, Tuning::default().jump_power);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "obstacle_interval": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "obstacle_interval",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "slow_speed": 9.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "slow_speed", .. }));

        let err = Tuning::from_json(r#"{ "slow_speed": 5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "slow_speed", .. }));

        let err = Tuning::from_json(r#"{ "shield_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "shield_chance", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert_eq!(
            Tuning::load_or_default("/definitely/not/here/tuning.json"),
            Tuning::default()
        );
    }

    #[test]
    fn test_spawn_policy_interval() {
        assert_eq!(SpawnPolicy::Fixed.obstacle_interval(100, 5.0, 2.5), 100);
        assert_eq!(SpawnPolicy::Stretched.obstacle_interval(100, 5.0, 2.5), 200);
        assert_eq!(SpawnPolicy::Stretched.obstacle_interval(100, 5.0, 5.0), 100);
        assert_eq!(SpawnPolicy::from_str("STRETCHED"), Some(SpawnPolicy::Stretched));
        assert_eq!(SpawnPolicy::from_str("bogus"), None);
        assert_eq!(SpawnPolicy::Fixed.as_str(), "Fixed");
    }
}
