//! Scrolling entities: hazards and pickups
//!
//! Both move right-to-left at game speed and are flagged for deletion once
//! fully past the left edge. Flagged entities are dropped by compaction at the
//! end of the entity step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the floor of the current regime (cactus)
    Ground,
    /// Floats somewhere in the air band (bird)
    Air,
}

/// Visual category handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleStyle {
    Ground,
    Air,
    /// Phase-shifting, fades with distance
    Quantum,
}

/// A hazard entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Spawn-time y, center of the oscillation
    pub base_y: f32,
    /// Bobs vertically on a sine wave
    pub oscillating: bool,
    /// Only partially visible far from the player (cosmetic)
    pub phase_shifting: bool,
    pub marked_for_deletion: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            base_y: pos.y,
            oscillating: false,
            phase_shifting: false,
            marked_for_deletion: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn style(&self) -> ObstacleStyle {
        if self.phase_shifting {
            ObstacleStyle::Quantum
        } else {
            match self.kind {
                ObstacleKind::Ground => ObstacleStyle::Ground,
                ObstacleKind::Air => ObstacleStyle::Air,
            }
        }
    }

    /// Opacity for the renderer, based on horizontal distance to the player
    pub fn visibility(&self, player_x: f32) -> f32 {
        if !self.phase_shifting {
            return 1.0;
        }
        let distance = (self.pos.x - player_x).abs();
        if distance > 250.0 {
            0.0
        } else if distance > 150.0 {
            0.3
        } else {
            1.0
        }
    }

    /// Scroll one frame. Returns true the frame it leaves the field.
    pub fn advance(&mut self, speed: f32, frame: u64, tuning: &Tuning) -> bool {
        self.pos.x -= speed;

        if self.oscillating {
            let phase = frame as f32 * tuning.oscillate_frequency;
            self.pos.y = self.base_y + phase.sin() * tuning.oscillate_amplitude;
        }

        if !self.marked_for_deletion && self.pos.x < -self.size.x {
            self.marked_for_deletion = true;
            return true;
        }
        false
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one obstacle hit
    Shield,
    /// Slows the game (and grants ghost immunity by default)
    Tempo,
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub marked_for_deletion: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(size),
            marked_for_deletion: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Scroll one frame
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
        if self.pos.x < -self.size.x {
            self.marked_for_deletion = true;
        }
    }
}
