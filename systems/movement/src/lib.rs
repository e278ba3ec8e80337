#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement stage that advances every living snake by one cell.
//!
//! The stage only prepends the new head. Tail removal belongs to the feeding
//! stage so that a snake which eats this turn keeps its full length.

use snake_rules_core::{
    BoardState, Move, RulesError, Settings, SnakeMove, StageOutcome, StageResult,
};
use tracing::trace;

/// Registry identifier of the standard movement stage.
pub const STAGE_MOVEMENT_STANDARD: &str = "movement.standard";

/// Moves every living snake one cell in its requested direction.
///
/// All moves are validated before any snake is touched, so a failing call
/// leaves the board exactly as it was handed in.
pub fn move_snakes(
    board: &mut BoardState,
    _settings: &Settings,
    moves: &[SnakeMove],
) -> StageResult {
    let planned = resolve_moves(board, moves)?;

    for (snake, direction) in board.snakes.iter_mut().zip(planned) {
        let Some(direction) = direction else {
            continue;
        };
        let Some(head) = snake.head() else {
            continue;
        };

        let next = head.step(direction);
        trace!(snake = %snake.id, %direction, x = next.x, y = next.y, "snake moved");
        snake.body.insert(0, next);
    }

    Ok(StageOutcome::Continue)
}

/// Pairs every snake, in board order, with the move it will execute this turn.
///
/// Eliminated snakes resolve to `None`; moves addressed to them, or to ids that
/// are not on the board, are ignored.
pub fn resolve_moves(
    board: &BoardState,
    moves: &[SnakeMove],
) -> Result<Vec<Option<Move>>, RulesError> {
    board
        .snakes
        .iter()
        .map(|snake| {
            if !snake.is_alive() {
                return Ok(None);
            }
            if snake.body.is_empty() {
                return Err(RulesError::ZeroLengthSnake {
                    snake: snake.id.clone(),
                });
            }

            let mut matching = moves.iter().filter(|candidate| candidate.id == snake.id);
            let Some(requested) = matching.next() else {
                return Err(RulesError::NoMoveFound {
                    snake: snake.id.clone(),
                });
            };
            if matching.next().is_some() {
                return Err(RulesError::DuplicateMove {
                    snake: snake.id.clone(),
                });
            }

            Ok(Some(requested.direction))
        })
        .collect()
}
