//! Flip Runner entry point
//!
//! Native builds run a headless session with a simple autopilot; the browser
//! build is driven from JavaScript through `flip_runner::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use flip_runner::sim::{GameEvent, GameState, ObstacleKind, PlayerMode, TickInput, tick};
    use flip_runner::{SpawnPolicy, Tuning, TuningError};

    #[derive(Parser, Debug)]
    #[command(name = "flip-runner", about = "Headless Flip Runner session")]
    pub struct Args {
        /// Run seed
        #[arg(long, default_value_t = 12345)]
        pub seed: u64,
        /// Optional tuning JSON file
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Stop after this many frames even if still alive
        #[arg(long, default_value_t = 36_000)]
        pub max_frames: u64,
        /// Do not steer; let the runner idle until it crashes
        #[arg(long)]
        pub no_autopilot: bool,
        /// Override the obstacle cadence under slow-motion (fixed or stretched)
        #[arg(long, value_parser = parse_spawn_policy)]
        pub spawn_policy: Option<SpawnPolicy>,
    }

    fn parse_spawn_policy(s: &str) -> Result<SpawnPolicy, String> {
        SpawnPolicy::from_str(s).ok_or_else(|| format!("unknown spawn policy '{s}'"))
    }

    /// Jump over ground hazards that are about to reach the runner
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player();
        let mut input = TickInput::default();

        // Air mode has a lethal floor; the autopilot only plays on the ground
        if player.mode == PlayerMode::Air {
            input.toggle_mode = true;
            return input;
        }

        let front = player.pos.x + player.width;
        input.action = player.grounded
            && state.obstacles().iter().any(|o| {
                let gap = o.pos.x - front;
                o.kind == ObstacleKind::Ground && (40.0..90.0).contains(&gap)
            });
        input
    }

    pub fn run(args: Args) -> Result<(), TuningError> {
        let mut tuning = match &args.tuning {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };
        if let Some(policy) = args.spawn_policy {
            tuning.spawn_policy = policy;
        }
        log::info!("Spawn policy: {}", tuning.spawn_policy.as_str());

        let mut state = GameState::with_tuning(tuning, args.seed)?;
        state.start_session();

        while state.frame() < args.max_frames {
            let input = if args.no_autopilot {
                TickInput::default()
            } else {
                autopilot(&state)
            };
            let outcome = tick(&mut state, &input);

            for event in state.drain_events() {
                match event {
                    GameEvent::GravityFlipped { regime } => {
                        let label = if regime.is_inverted() { "INVERTED" } else { "normal" };
                        log::info!("Frame {}: gravity {}", state.frame(), label);
                    }
                    GameEvent::ModeChanged { mode } => {
                        log::debug!("Frame {}: mode {}", state.frame(), mode.as_str())
                    }
                    GameEvent::EffectCollected { kind } => {
                        log::info!("Frame {}: collected {:?}", state.frame(), kind)
                    }
                    GameEvent::HazardAbsorbed => {
                        log::info!("Frame {}: shield absorbed a hit", state.frame())
                    }
                    _ => {}
                }
            }

            if outcome.terminal {
                break;
            }
        }

        println!(
            "Seed {}: score {} after {} frames ({})",
            args.seed,
            state.score(),
            state.frame(),
            if state.is_game_over() { "crashed" } else { "survived" }
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Flip Runner (native) starting...");
    if let Err(e) = native::run(native::Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flip_runner::web, this is just to satisfy the compiler
}
