//! Per-frame simulation step
//!
//! Core game loop that advances the session by one frame.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::level::check_level_up;
use super::spawn::EntityFrame;
use super::state::{GameEvent, GamePhase, GameState};

/// One-shot input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump/flap (up arrow / W)
    pub action: bool,
    /// Switch ground/air mode (space)
    pub toggle_mode: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Result of stepping one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOutcome {
    /// The session has ended; stop scheduling frames
    pub terminal: bool,
    pub score: u32,
}

/// Apply input, then advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> FrameOutcome {
    if input.pause {
        state.toggle_pause();
    }
    if input.toggle_mode {
        state.on_toggle_mode();
    }
    if input.action {
        state.on_player_action();
    }
    state.step_frame()
}

impl GameState {
    /// Run one full update cycle.
    ///
    /// Order: player physics, spawn/advance/compact, status decay, level
    /// check, collision. A no-op unless the session is running.
    pub fn step_frame(&mut self) -> FrameOutcome {
        // Input events queued since the last step survive; the previous frame's do not
        let stale = std::mem::take(&mut self.stale_events).min(self.events.len());
        self.events.drain(..stale);

        if self.phase != GamePhase::Running {
            return self.outcome();
        }

        self.player.advance(self.regime, self.tuning.field_height);

        let passed = self.entities.update(
            EntityFrame {
                frame: self.frame,
                score: self.score,
                regime: self.regime,
                speed: self.speed,
            },
            &self.tuning,
        );
        for _ in 0..passed {
            self.score = self.score.saturating_add(1);
            self.events.push(GameEvent::ObstaclePassed { score: self.score });
        }

        self.effects
            .decay(&mut self.speed, self.tuning.base_speed, &mut self.events);

        check_level_up(self);

        if resolve_collisions(self) {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over at frame {} with score {}", self.frame, self.score);
        } else {
            self.frame += 1;
        }

        self.stale_events = self.events.len();
        self.outcome()
    }

    fn outcome(&self) -> FrameOutcome {
        FrameOutcome {
            terminal: self.phase == GamePhase::GameOver,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
    use crate::sim::player::PlayerMode;
    use crate::sim::state::GravityRegime;
    use glam::Vec2;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_session();
        state
    }

    /// Obstacle one frame away from leaving the field
    fn leaving_obstacle(id: u32) -> Obstacle {
        Obstacle::new(id, ObstacleKind::Air, Vec2::new(-38.0, 0.0), Vec2::splat(40.0))
    }

    #[test]
    fn test_step_before_start_is_noop() {
        let mut state = GameState::new(1);
        let outcome = state.step_frame();
        assert_eq!(outcome, FrameOutcome { terminal: false, score: 0 });
        assert_eq!(state.frame(), 0);
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_first_frame_spawns_and_counts() {
        let mut state = running(1);
        let outcome = state.step_frame();
        assert!(!outcome.terminal);
        assert_eq!(state.frame(), 1);
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.obstacles()[0].pos.x, 795.0);
    }

    #[test]
    fn test_score_and_inversion_same_frame() {
        let mut state = running(1);
        state.frame = 1;
        state.score = 9;
        state.entities.obstacles.push(leaving_obstacle(500));
        state.entities.obstacles.push(Obstacle::new(
            501,
            ObstacleKind::Ground,
            Vec2::new(600.0, 360.0),
            Vec2::splat(40.0),
        ));

        let outcome = state.step_frame();
        assert_eq!(outcome, FrameOutcome { terminal: false, score: 10 });
        assert_eq!(state.regime(), GravityRegime::Inverted);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.player().pos.y, 0.0);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ObstaclePassed { score: 10 }));
        assert!(events.contains(&GameEvent::GravityFlipped {
            regime: GravityRegime::Inverted
        }));
    }

    #[test]
    fn test_two_obstacles_leaving_same_frame() {
        let mut state = running(1);
        state.frame = 1;
        state.score = 19;
        state.regime = GravityRegime::Inverted;
        state.entities.obstacles.push(leaving_obstacle(500));
        state.entities.obstacles.push(leaving_obstacle(501));

        let outcome = state.step_frame();
        assert_eq!(outcome.score, 21);
        assert_eq!(state.regime(), GravityRegime::Normal);
        let flips = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GravityFlipped { .. }))
            .count();
        assert_eq!(flips, 1);
    }

    #[test]
    fn test_grounded_jump_via_tick() {
        let mut state = running(1);
        state.player.pos.y = 360.0;
        state.player.grounded = true;

        tick(&mut state, &TickInput { action: true, ..Default::default() });
        assert!(!state.player().grounded);
        // -13 applied, then one frame of gravity
        assert_eq!(state.player().pos.y, 347.0);
        assert!((state.player().dy - (-12.4)).abs() < 1e-4);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_collision_ends_session() {
        let mut state = running(1);
        state.frame = 1;
        state.player.pos = Vec2::new(50.0, 360.0);
        state.player.grounded = true;
        state.entities.obstacles.push(Obstacle::new(
            7,
            ObstacleKind::Ground,
            Vec2::new(65.0, 360.0),
            Vec2::splat(40.0),
        ));

        let outcome = state.step_frame();
        assert!(outcome.terminal);
        assert!(state.is_game_over());
        assert_eq!(state.frame(), 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { score: 0 })
        );

        // Further frames and actions are ignored
        let outcome = state.step_frame();
        assert!(outcome.terminal);
        assert_eq!(state.frame(), 1);
        state.on_player_action();
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_shielded_hit_is_not_terminal() {
        let mut state = running(1);
        state.frame = 1;
        state.player.pos = Vec2::new(50.0, 360.0);
        state
            .effects
            .activate(PowerUpKind::Shield, &state.tuning, &mut state.speed);
        state.entities.obstacles.push(Obstacle::new(
            7,
            ObstacleKind::Ground,
            Vec2::new(65.0, 360.0),
            Vec2::splat(40.0),
        ));

        let outcome = state.step_frame();
        assert!(!outcome.terminal);
        assert!(!state.effects().shield_active());
        // Absorbed obstacle is compacted on the next frame
        state.step_frame();
        assert!(state.obstacles().iter().all(|o| o.id != 7));
    }

    #[test]
    fn test_tempo_pickup_slows_then_restores() {
        let mut state = running(1);
        state.frame = 1;
        state.player.pos = Vec2::new(50.0, 360.0);
        state.entities.powerups.push(PowerUp::new(
            9,
            PowerUpKind::Tempo,
            Vec2::new(60.0, 365.0),
            30.0,
        ));

        state.step_frame();
        assert!(state.effects().tempo_active());
        assert_eq!(state.effects().tempo_frames(), 300);
        assert_eq!(state.speed(), 2.5);

        for _ in 0..299 {
            state.step_frame();
        }
        assert!(state.effects().tempo_active());
        assert_eq!(state.speed(), 2.5);

        state.step_frame();
        assert!(!state.effects().tempo_active());
        assert_eq!(state.speed(), 5.0);
    }

    #[test]
    fn test_pause_via_tick() {
        let mut state = running(1);
        tick(&mut state, &TickInput { pause: true, ..Default::default() });
        assert_eq!(state.phase(), GamePhase::Paused);
        assert_eq!(state.frame(), 0);
        tick(&mut state, &TickInput { pause: true, ..Default::default() });
        assert_eq!(state.frame(), 1);
    }

    #[test]
    fn test_toggle_then_flap_via_tick() {
        let mut state = running(1);
        state.player.pos.y = 360.0;
        state.player.grounded = true;
        tick(
            &mut state,
            &TickInput {
                action: true,
                toggle_mode: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player().mode, PlayerMode::Air);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_undrained_events_do_not_accumulate() {
        let mut state = running(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput { toggle_mode: true, ..Default::default() });
        }
        assert!(state.is_running());
        // Only the last frame's mode change is still queued
        let mode = state.player().mode;
        assert_eq!(state.drain_events(), vec![GameEvent::ModeChanged { mode }]);
    }

    #[test]
    fn test_input_events_survive_until_next_step() {
        let mut state = running(1);
        state.step_frame();
        state.on_toggle_mode();
        state.step_frame();
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ModeChanged { mode: PlayerMode::Air })
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        let inputs = [
            TickInput::default(),
            TickInput { action: true, ..Default::default() },
            TickInput { toggle_mode: true, ..Default::default() },
            TickInput { action: true, ..Default::default() },
            TickInput { toggle_mode: true, ..Default::default() },
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            let oa = tick(&mut a, input);
            let ob = tick(&mut b, input);
            assert_eq!(oa, ob);
            if oa.terminal {
                break;
            }
        }
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.player().pos, b.player().pos);
        assert_eq!(a.obstacles().len(), b.obstacles().len());
        for (x, y) in a.obstacles().iter().zip(b.obstacles()) {
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_restart_replays_same_run() {
        let mut state = running(4242);
        for _ in 0..250 {
            state.step_frame();
        }
        let first: Vec<_> = state.obstacles().iter().map(|o| (o.kind, o.pos)).collect();

        state.start_session();
        for _ in 0..250 {
            state.step_frame();
        }
        let second: Vec<_> = state.obstacles().iter().map(|o| (o.kind, o.pos)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_player_stays_in_field_over_long_run() {
        let mut state = running(7);
        state.tuning.tempo_grants_immunity = true;
        state
            .effects
            .activate(PowerUpKind::Tempo, &state.tuning, &mut state.speed);
        let max_y = state.tuning.field_height - state.player().height;
        for i in 0..300 {
            let input = TickInput {
                action: i % 7 == 0,
                toggle_mode: i % 53 == 0,
                ..Default::default()
            };
            if tick(&mut state, &input).terminal {
                break;
            }
            let y = state.player().pos.y;
            assert!((0.0..=max_y).contains(&y), "frame {i}: y = {y}");
        }
    }
}
