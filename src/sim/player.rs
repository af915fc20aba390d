//! The runner
//!
//! Vertical physics mirror exactly under inverted gravity: every clamp and
//! every acceleration sign flips together with the regime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::GravityRegime;
use crate::tuning::Tuning;

/// Locomotion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Single jump from the floor, floor is safe
    #[default]
    Ground,
    /// Unlimited flaps, floor is lethal
    Air,
}

impl PlayerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerMode::Ground => "GROUND",
            PlayerMode::Air => "AIR",
        }
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (pixels/frame, +y is down)
    pub dy: f32,
    pub width: f32,
    pub height: f32,
    pub mode: PlayerMode,
    /// Resting on the floor of the current regime
    pub grounded: bool,
    pub jump_power: f32,
    pub flap_power: f32,
    pub gravity: f32,
    pub safety_hop: f32,
    pub hop_velocity: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.player_start_y),
            dy: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
            mode: PlayerMode::Ground,
            grounded: false,
            jump_power: tuning.jump_power,
            flap_power: tuning.flap_power,
            gravity: tuning.gravity,
            safety_hop: tuning.safety_hop,
            hop_velocity: tuning.hop_velocity,
        }
    }

    /// Bounding box used for hit-testing
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Lowest allowed y (top edge touching the bottom of the field).
    /// Never negative, so clamping against it cannot panic.
    #[inline]
    fn max_y(&self, field_height: f32) -> f32 {
        (field_height - self.height).max(0.0)
    }

    /// Integrate one frame of vertical motion
    pub fn advance(&mut self, regime: GravityRegime, field_height: f32) {
        self.pos.y += self.dy;
        let max_y = self.max_y(field_height);

        match regime {
            GravityRegime::Normal => {
                if self.pos.y < max_y {
                    self.dy += self.gravity;
                    self.grounded = false;
                } else {
                    self.dy = 0.0;
                    self.grounded = true;
                    self.pos.y = max_y;
                }
                if self.pos.y < 0.0 {
                    self.pos.y = 0.0;
                    self.dy = 0.0;
                }
            }
            GravityRegime::Inverted => {
                if self.pos.y > 0.0 {
                    self.dy -= self.gravity;
                    self.grounded = false;
                } else {
                    self.dy = 0.0;
                    self.grounded = true;
                    self.pos.y = 0.0;
                }
                if self.pos.y > max_y {
                    self.pos.y = max_y;
                    self.dy = 0.0;
                }
            }
        }
    }

    /// Jump (ground mode, only when grounded) or flap (air mode, always).
    ///
    /// Returns true if an impulse was applied.
    pub fn act(&mut self, regime: GravityRegime) -> bool {
        let power = match self.mode {
            PlayerMode::Ground if !self.grounded => return false,
            PlayerMode::Ground => self.jump_power,
            PlayerMode::Air => self.flap_power,
        };
        // "Up" is away from the floor of the current regime
        self.dy = -power * regime.down();
        self.grounded = false;
        true
    }

    /// Flip between ground and air mode.
    ///
    /// Entering air mode hops the runner away from the floor so it does not
    /// land straight on the ground hazards.
    pub fn toggle_mode(&mut self, regime: GravityRegime, field_height: f32) {
        match self.mode {
            PlayerMode::Ground => {
                self.mode = PlayerMode::Air;
                let up = -regime.down();
                self.dy = self.hop_velocity * up;
                self.pos.y = (self.pos.y + self.safety_hop * up).clamp(0.0, self.max_y(field_height));
                self.grounded = false;
            }
            PlayerMode::Air => {
                self.mode = PlayerMode::Ground;
            }
        }
    }

    /// Resting position after a gravity flip
    pub fn rest_at(&mut self, regime: GravityRegime, field_height: f32) {
        self.pos.y = match (self.mode, regime) {
            // Mid-field: snapping to a boundary would be lethal in air mode
            (PlayerMode::Air, _) => field_height / 2.0,
            (PlayerMode::Ground, GravityRegime::Normal) => self.max_y(field_height),
            (PlayerMode::Ground, GravityRegime::Inverted) => 0.0,
        };
        self.dy = 0.0;
        self.grounded = self.mode == PlayerMode::Ground;
    }
}
