//! Timed status effects from power-ups
//!
//! Timers are only ever set by `activate` (always to the full duration) and
//! lowered by `decay`, once per frame. Consuming the shield is the one other
//! exit and zeroes its timer.

use serde::{Deserialize, Serialize};

use super::entity::PowerUpKind;
use super::state::GameEvent;
use crate::frames_to_seconds;
use crate::tuning::Tuning;

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    shield_active: bool,
    shield_frames: u32,
    tempo_active: bool,
    tempo_frames: u32,
}

impl StatusEffects {
    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn shield_frames(&self) -> u32 {
        self.shield_frames
    }

    pub fn tempo_active(&self) -> bool {
        self.tempo_active
    }

    pub fn tempo_frames(&self) -> u32 {
        self.tempo_frames
    }

    /// HUD countdown, whole seconds rounded up
    pub fn shield_seconds(&self) -> u32 {
        frames_to_seconds(self.shield_frames)
    }

    pub fn tempo_seconds(&self) -> u32 {
        frames_to_seconds(self.tempo_frames)
    }

    /// Grant an effect for its full duration, replacing any partial timer
    pub fn activate(&mut self, kind: PowerUpKind, tuning: &Tuning, game_speed: &mut f32) {
        match kind {
            PowerUpKind::Shield => {
                self.shield_active = true;
                self.shield_frames = tuning.shield_duration;
            }
            PowerUpKind::Tempo => {
                self.tempo_active = true;
                self.tempo_frames = tuning.tempo_duration;
                *game_speed = tuning.slow_speed;
            }
        }
    }

    /// Spend the shield on an absorbed hit
    pub fn consume_shield(&mut self) {
        self.shield_active = false;
        self.shield_frames = 0;
    }

    /// Count down one frame; expired effects are switched off
    pub fn decay(&mut self, game_speed: &mut f32, base_speed: f32, events: &mut Vec<GameEvent>) {
        if self.shield_active {
            self.shield_frames = self.shield_frames.saturating_sub(1);
            if self.shield_frames == 0 {
                self.shield_active = false;
                events.push(GameEvent::EffectExpired {
                    kind: PowerUpKind::Shield,
                });
            }
        }
        if self.tempo_active {
            self.tempo_frames = self.tempo_frames.saturating_sub(1);
            if self.tempo_frames == 0 {
                self.tempo_active = false;
                *game_speed = base_speed;
                events.push(GameEvent::EffectExpired {
                    kind: PowerUpKind::Tempo,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_full_duration_then_restore() {
        let tuning = Tuning::default();
        let mut effects = StatusEffects::default();
        let mut speed = tuning.base_speed;
        let mut events = Vec::new();

        effects.activate(PowerUpKind::Tempo, &tuning, &mut speed);
        assert!(effects.tempo_active());
        assert_eq!(effects.tempo_frames(), 300);
        assert_eq!(speed, 2.5);

        for _ in 0..299 {
            effects.decay(&mut speed, tuning.base_speed, &mut events);
        }
        assert!(effects.tempo_active());
        assert_eq!(effects.tempo_frames(), 1);
        assert_eq!(speed, 2.5);
        assert!(events.is_empty());

        effects.decay(&mut speed, tuning.base_speed, &mut events);
        assert!(!effects.tempo_active());
        assert_eq!(speed, 5.0);
        assert_eq!(
            events,
            vec![GameEvent::EffectExpired {
                kind: PowerUpKind::Tempo
            }]
        );
    }

    #[test]
    fn test_reactivation_resets_timer() {
        let tuning = Tuning::default();
        let mut effects = StatusEffects::default();
        let mut speed = tuning.base_speed;
        let mut events = Vec::new();

        effects.activate(PowerUpKind::Shield, &tuning, &mut speed);
        for _ in 0..120 {
            effects.decay(&mut speed, tuning.base_speed, &mut events);
        }
        assert_eq!(effects.shield_frames(), 180);
        assert_eq!(effects.shield_seconds(), 3);

        effects.activate(PowerUpKind::Shield, &tuning, &mut speed);
        assert_eq!(effects.shield_frames(), 300);
        assert_eq!(speed, tuning.base_speed);
    }

    #[test]
    fn test_consume_shield() {
        let tuning = Tuning::default();
        let mut effects = StatusEffects::default();
        let mut speed = tuning.base_speed;
        effects.activate(PowerUpKind::Shield, &tuning, &mut speed);
        effects.consume_shield();
        assert!(!effects.shield_active());
        assert_eq!(effects.shield_frames(), 0);
    }

    #[test]
    fn test_inactive_effects_do_not_decay() {
        let mut effects = StatusEffects::default();
        let mut speed = 5.0;
        let mut events = Vec::new();
        effects.decay(&mut speed, 5.0, &mut events);
        assert_eq!(effects, StatusEffects::default());
        assert!(events.is_empty());
    }
}
