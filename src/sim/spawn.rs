//! Entity manager: spawning, scrolling and pruning
//!
//! Owns the obstacle and power-up collections together with the seeded RNG
//! that drives every spawn decision, so a seed fully determines a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use super::state::GravityRegime;
use crate::tuning::Tuning;

/// Per-frame inputs the entity step needs from the session
#[derive(Debug, Clone, Copy)]
pub struct EntityFrame {
    pub frame: u64,
    pub score: u32,
    pub regime: GravityRegime,
    pub speed: f32,
}

/// Owns all live obstacles and power-ups (in spawn order)
#[derive(Debug, Clone)]
pub struct EntityManager {
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    rng: Pcg32,
    next_id: u32,
}

impl EntityManager {
    /// Create with an injected random source
    pub fn new(rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::new(),
            powerups: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Create with a PCG stream seeded from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn -> advance all -> compact.
    ///
    /// Returns how many obstacles left the field this frame (one point each).
    pub fn update(&mut self, ctx: EntityFrame, tuning: &Tuning) -> u32 {
        let interval =
            tuning
                .spawn_policy
                .obstacle_interval(tuning.obstacle_interval, tuning.base_speed, ctx.speed);
        if ctx.frame.is_multiple_of(interval) {
            self.spawn_obstacle(ctx.score, ctx.regime, tuning);
        }
        if ctx.score >= tuning.powerup_min_score && ctx.frame.is_multiple_of(tuning.powerup_interval) {
            self.spawn_powerup(tuning);
        }

        let mut passed = 0;
        for obstacle in self.obstacles.iter_mut() {
            if obstacle.advance(ctx.speed, ctx.frame, tuning) {
                passed += 1;
            }
        }
        for powerup in self.powerups.iter_mut() {
            powerup.advance(ctx.speed);
        }

        self.compact();
        passed
    }

    /// Drop flagged entities, keeping survivors in order
    pub fn compact(&mut self) {
        self.obstacles.retain(|o| !o.marked_for_deletion);
        self.powerups.retain(|p| !p.marked_for_deletion);
    }

    /// Discard every live obstacle (gravity flip)
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Spawn one obstacle at the right edge of the field
    pub fn spawn_obstacle(&mut self, score: u32, regime: GravityRegime, tuning: &Tuning) {
        // Draw order matters for reproducibility
        let phase_shifting =
            score > tuning.phase_shift_min_score && self.rng.random::<f32>() < tuning.phase_shift_chance;
        let oscillating =
            score > tuning.oscillate_min_score && self.rng.random::<f32>() < tuning.oscillate_chance;
        let kind = if self.rng.random::<f32>() < tuning.ground_spawn_chance {
            ObstacleKind::Ground
        } else {
            ObstacleKind::Air
        };

        let air_band = tuning.field_height - tuning.air_band_margin;
        let y = match (regime, kind) {
            (GravityRegime::Normal, ObstacleKind::Ground) => tuning.field_height - tuning.obstacle_height,
            (GravityRegime::Normal, ObstacleKind::Air) => self.rng.random::<f32>() * air_band,
            (GravityRegime::Inverted, ObstacleKind::Ground) => 0.0,
            (GravityRegime::Inverted, ObstacleKind::Air) => {
                self.rng.random::<f32>() * air_band + tuning.inverted_air_offset
            }
        };

        let id = self.next_entity_id();
        let mut obstacle = Obstacle::new(
            id,
            kind,
            Vec2::new(tuning.field_width, y),
            Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
        );
        obstacle.oscillating = oscillating;
        obstacle.phase_shifting = phase_shifting;

        log::debug!(
            "Spawned {:?} obstacle {} at y={:.1} (oscillating={}, phase_shifting={})",
            kind,
            id,
            y,
            oscillating,
            phase_shifting
        );
        self.obstacles.push(obstacle);
    }

    /// Spawn one power-up at the right edge of the field
    pub fn spawn_powerup(&mut self, tuning: &Tuning) {
        let band = tuning.field_height - tuning.powerup_band_margin;
        let y = self.rng.random::<f32>() * band + tuning.powerup_top_offset;
        let kind = if self.rng.random::<f32>() < tuning.shield_chance {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Tempo
        };

        let id = self.next_entity_id();
        log::debug!("Spawned {:?} power-up {} at y={:.1}", kind, id, y);
        self.powerups.push(PowerUp::new(
            id,
            kind,
            Vec2::new(tuning.field_width, y),
            tuning.powerup_size,
        ));
    }
}
