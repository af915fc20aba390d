//! Gravity regime progression
//!
//! Gravity is inverted while score is in [INVERSION_START, INVERSION_END).
//! The check is idempotent and runs once per frame after all scoring.

use super::state::{GameEvent, GameState, GravityRegime};
use crate::consts::{INVERSION_END, INVERSION_START};

/// Regime the given score calls for
pub fn target_regime(score: u32) -> GravityRegime {
    if (INVERSION_START..INVERSION_END).contains(&score) {
        GravityRegime::Inverted
    } else {
        GravityRegime::Normal
    }
}

/// Flip gravity if the score has crossed a threshold.
///
/// On a flip every live obstacle is discarded (nothing spawned under the old
/// regime survives into the new one) and the player is moved to the new rest
/// position. Power-ups are kept. Returns true if the regime changed.
pub fn check_level_up(state: &mut GameState) -> bool {
    let target = target_regime(state.score);
    if target == state.regime {
        return false;
    }

    state.regime = target;
    state.entities.clear_obstacles();
    state.player.rest_at(target, state.tuning.field_height);
    state.events.push(GameEvent::GravityFlipped { regime: target });
    log::info!("Gravity {:?} at score {}", target, state.score);
    true
}
