#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Elimination stage resolving boundaries, starvation and collisions.
//!
//! Every snake alive when the stage starts is judged against the same
//! snapshot of post-movement bodies. Causes are collected for all of them
//! first and applied afterwards, so a snake eliminated this turn still counts
//! as an obstacle for every other snake.

use snake_rules_core::{
    BoardState, EliminationCause, Point, RulesError, Settings, Snake, SnakeId, SnakeMove,
    StageOutcome, StageResult,
};
use tracing::debug;

/// Registry identifier of the standard elimination stage.
pub const STAGE_ELIMINATION_STANDARD: &str = "elimination.standard";

/// Eliminates every snake that left the board, starved or collided this turn.
///
/// Per snake the first matching cause wins, in this order: out of bounds,
/// starvation, self collision, body collision, head-to-head collision.
pub fn eliminate_snakes(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let turn = board.turn;
    let eliminations = detect_eliminations(board)?;

    for elimination in eliminations {
        let snake = &mut board.snakes[elimination.index];
        debug!(
            snake = %snake.id,
            cause = %elimination.cause,
            by = ?elimination.by,
            turn,
            "snake eliminated"
        );
        snake.eliminate(elimination.cause, elimination.by, turn);
    }

    Ok(StageOutcome::Continue)
}

#[derive(Debug)]
struct PendingElimination {
    index: usize,
    cause: EliminationCause,
    by: Option<SnakeId>,
}

/// When several snakes qualify as the cause of a collision the longest one is
/// credited, ties falling back to board order.
fn detect_eliminations(board: &BoardState) -> Result<Vec<PendingElimination>, RulesError> {
    let snakes = &board.snakes;
    let by_length = living_by_length(snakes);
    let mut eliminations = Vec::new();

    for (index, snake) in snakes.iter().enumerate() {
        if !snake.is_alive() {
            continue;
        }
        let head = snake.head().ok_or_else(|| RulesError::ZeroLengthSnake {
            snake: snake.id.clone(),
        })?;

        let (cause, by) = if !board.contains(head) {
            (EliminationCause::OutOfBounds, None)
        } else if snake.health <= 0 {
            (EliminationCause::Starvation, None)
        } else if hits_body(head, snake) {
            (EliminationCause::SelfCollision, None)
        } else if let Some(other) =
            first_other(snakes, &by_length, index, |other| hits_body(head, other))
        {
            (EliminationCause::BodyCollision, Some(other.id.clone()))
        } else if let Some(other) = first_other(snakes, &by_length, index, |other| {
            loses_head_to_head(snake, other)
        }) {
            (EliminationCause::HeadToHeadCollision, Some(other.id.clone()))
        } else {
            continue;
        };

        eliminations.push(PendingElimination { index, cause, by });
    }

    Ok(eliminations)
}

fn first_other<'a, F>(
    snakes: &'a [Snake],
    order: &[usize],
    skip: usize,
    predicate: F,
) -> Option<&'a Snake>
where
    F: Fn(&Snake) -> bool,
{
    order
        .iter()
        .copied()
        .filter(|&other| other != skip)
        .map(|other| &snakes[other])
        .find(|other| predicate(other))
}

fn living_by_length(snakes: &[Snake]) -> Vec<usize> {
    let mut indices: Vec<usize> = snakes
        .iter()
        .enumerate()
        .filter(|(_, snake)| snake.is_alive())
        .map(|(index, _)| index)
        .collect();
    indices.sort_by(|&a, &b| snakes[b].body.len().cmp(&snakes[a].body.len()));
    indices
}

fn hits_body(head: Point, other: &Snake) -> bool {
    other.body.iter().skip(1).any(|&segment| segment == head)
}

fn loses_head_to_head(snake: &Snake, other: &Snake) -> bool {
    snake.head().is_some()
        && snake.head() == other.head()
        && snake.body.len() <= other.body.len()
}
