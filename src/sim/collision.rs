//! Collision detection and resolution
//!
//! Axis-aligned boxes only. Pickups use exact rectangles; hazards use an
//! inset margin so grazing contact is forgiven.
//!
//! Resolution runs once per frame in a fixed priority order:
//! 1. power-up pickup (even while immune)
//! 2. immunity short-circuit
//! 3. lethal floor in air mode
//! 4. obstacle hit, absorbed by the shield if one is up

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerMode};
use super::state::{GameEvent, GameState, GravityRegime};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_inset(other, 0.0)
    }

    /// Overlap deeper than `margin` on both axes
    pub fn overlaps_inset(&self, other: &Rect, margin: f32) -> bool {
        let (a_min, a_max) = (self.pos, self.max());
        let (b_min, b_max) = (other.pos, other.max());
        a_min.x < b_max.x - margin
            && a_max.x - margin > b_min.x
            && a_min.y < b_max.y - margin
            && a_max.y - margin > b_min.y
    }
}

/// True if the player touches the lethal boundary (the floor of the current regime)
pub fn touches_lethal_boundary(
    player: &Player,
    regime: GravityRegime,
    field_height: f32,
    tolerance: f32,
) -> bool {
    match regime {
        GravityRegime::Normal => player.pos.y + player.height >= field_height - tolerance,
        GravityRegime::Inverted => player.pos.y <= tolerance,
    }
}

/// Resolve this frame's collisions. Returns true on a terminal hit.
pub fn resolve_collisions(state: &mut GameState) -> bool {
    let player_box = state.player.bounds();

    for powerup in state
        .entities
        .powerups
        .iter_mut()
        .filter(|p| !p.marked_for_deletion)
    {
        if player_box.overlaps(&powerup.bounds()) {
            state.effects.activate(powerup.kind, &state.tuning, &mut state.speed);
            powerup.marked_for_deletion = true;
            state.events.push(GameEvent::EffectCollected { kind: powerup.kind });
            log::debug!("Collected {:?} power-up {}", powerup.kind, powerup.id);
        }
    }

    if state.is_immune() {
        return false;
    }

    if state.player.mode == PlayerMode::Air
        && touches_lethal_boundary(
            &state.player,
            state.regime,
            state.tuning.field_height,
            state.tuning.boundary_tolerance,
        )
    {
        return true;
    }

    let margin = state.tuning.hazard_margin;
    let hit = state
        .entities
        .obstacles
        .iter_mut()
        .find(|o| !o.marked_for_deletion && player_box.overlaps_inset(&o.bounds(), margin));

    match hit {
        Some(obstacle) if state.effects.shield_active() => {
            state.effects.consume_shield();
            obstacle.marked_for_deletion = true;
            state.events.push(GameEvent::HazardAbsorbed);
            log::debug!("Shield absorbed obstacle {}", obstacle.id);
            false
        }
        Some(_) => true,
        None => false,
    }
}
