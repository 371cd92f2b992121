use backgammon_engine::{AiPlayer, BackgammonGame, BackgammonState};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

// Terminal driver: plays the engine against itself. Board rendering and
// the human event loop live in an external collaborator; this binary only
// exercises the core the way that collaborator would.
//
// Usage: backgammon_engine [--time-ms N] [--seed N]

/// Hard ceiling on applied actions, in case a game somehow stalls.
const MAX_ACTIONS: u32 = 10_000;

fn main() {
    env_logger::init();

    let mut time_ms: u64 = 500;
    let mut seed: Option<u64> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let value = args.next().and_then(|v| v.parse().ok());
        match (arg.as_str(), value) {
            ("--time-ms", Some(v)) => time_ms = v,
            ("--seed", Some(v)) => seed = Some(v),
            _ => {
                eprintln!("usage: backgammon_engine [--time-ms N] [--seed N]");
                std::process::exit(2);
            }
        }
    }

    let game = BackgammonGame;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ai = match seed {
        Some(seed) => AiPlayer::with_seed(Duration::from_millis(time_ms), seed),
        None => AiPlayer::new(Duration::from_millis(time_ms)),
    };

    let mut state = BackgammonState::initial(&mut rng);
    let mut total_nodes: u64 = 0;

    for played in 0..MAX_ACTIONS {
        if game.is_terminal(&state) {
            match game.winner_name(&state) {
                Some(name) => println!("{name} wins after {played} actions"),
                None => println!("game over after {played} actions"),
            }
            println!("total expanded nodes: {total_nodes}");
            return;
        }

        let mover = state.player_to_move();
        let decision = ai.propose_move(&state);
        total_nodes += decision.expanded_nodes;
        info!(
            "{} rolled {}-{}, plays {} (nodes {}, depth {})",
            mover,
            state.die(0),
            state.die(1),
            decision.action,
            decision.expanded_nodes,
            decision.max_depth
        );
        state = game.apply(&state, decision.action, true, &mut rng);
    }

    warn!("aborting after {MAX_ACTIONS} actions without a winner");
}
