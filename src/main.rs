use isolation_core::{
    AlphaBetaPlayer, Board, Deadline, EngineConfig, GameState, MinimaxPlayer, Player,
    SearchConfig, Searcher,
};
use rand::seq::SliceRandom;
use std::error::Error;
use std::{env, fs};

// Per-turn budget in milliseconds.
const TIME_LIMIT_MS: u64 = 150;

fn load_config() -> Result<EngineConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => Ok(EngineConfig::load_from_json(&fs::read_to_string(path)?)?),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let engine_config = load_config()?;
    log::info!("engine config: {}", serde_json::to_string(&engine_config)?);

    let config = SearchConfig::<Board>::from_engine_config(&engine_config);
    let mut alphabeta = AlphaBetaPlayer::new(config);
    let mut minimax = MinimaxPlayer::new(config);

    // Random opening squares for both sides.
    let mut board = Board::default();
    let mut rng = rand::thread_rng();
    for _ in 0..2 {
        if let Some(&mv) = board.active_legal_moves().choose(&mut rng) {
            board.apply_move(mv)?;
        }
    }

    loop {
        let player = board.active_player();
        let deadline = Deadline::after_millis(TIME_LIMIT_MS);
        let (mv, stats) = match player {
            Player::One => (alphabeta.get_move(&board, &deadline), alphabeta.last_stats()),
            Player::Two => (minimax.get_move(&board, &deadline), minimax.last_stats()),
        };

        if mv.is_none() {
            if board.active_legal_moves().is_empty() {
                log::info!("{player:?} is stuck");
            } else {
                log::warn!("{player:?} ran out of time");
            }
            break;
        }

        log::info!("{player:?} plays {mv} {}", serde_json::to_string(&stats)?);
        board.apply_move(mv)?;
    }

    log::info!(
        "{:?} wins after {} moves\n{board}",
        board.active_player().opposite(),
        board.move_count()
    );
    Ok(())
}
