#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Termination checks run as the last stage of every turn.

use snake_rules_core::{BoardState, Settings, SnakeMove, StageOutcome, StageResult};
use tracing::debug;

/// Registry identifier of the multi-snake termination stage.
pub const STAGE_GAME_OVER_STANDARD: &str = "game_over.standard";

/// Registry identifier of the single-snake termination stage.
pub const STAGE_GAME_OVER_SOLO: &str = "game_over.solo";

/// Multi-snake games end once at most one snake is left alive.
#[must_use]
pub fn is_game_over_standard(board: &BoardState) -> bool {
    board.living_snake_count() <= 1
}

/// Solo games end only once no snake is left alive.
#[must_use]
pub fn is_game_over_solo(board: &BoardState) -> bool {
    board.living_snake_count() == 0
}

/// Stage wrapper around [`is_game_over_standard`].
pub fn game_over_standard(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let over = is_game_over_standard(board);
    debug!(
        turn = board.turn,
        living = board.living_snake_count(),
        over,
        "standard game over check"
    );
    Ok(StageOutcome::from_game_over(over))
}

/// Stage wrapper around [`is_game_over_solo`].
pub fn game_over_solo(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let over = is_game_over_solo(board);
    debug!(
        turn = board.turn,
        living = board.living_snake_count(),
        over,
        "solo game over check"
    );
    Ok(StageOutcome::from_game_over(over))
}
