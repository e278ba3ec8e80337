#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Health stages applying per-turn decay and hazard damage.
//!
//! Neither stage eliminates anybody. Health is clamped at zero and the
//! elimination stage later records starvation for every snake left there.

use snake_rules_core::{
    BoardState, Settings, SnakeMove, StageOutcome, StageResult, SNAKE_MAX_HEALTH,
};
use tracing::trace;

/// Registry identifier of the per-turn health decay stage.
pub const STAGE_STARVATION_STANDARD: &str = "starvation.standard";
/// Registry identifier of the hazard damage stage.
pub const STAGE_HAZARD_DAMAGE_STANDARD: &str = "hazard_damage.standard";

/// Removes the base per-turn damage from every living snake.
pub fn reduce_snake_health(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    for snake in board.snakes.iter_mut().filter(|snake| snake.is_alive()) {
        snake.health = clamp_health(snake.health - settings.damage_per_turn);
    }

    Ok(StageOutcome::Continue)
}

/// Applies hazard damage to every living snake whose head sits on a hazard.
///
/// A hazard cell that also holds food deals no damage.
pub fn damage_hazards(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let damage = settings.hazard_damage_per_turn;
    if damage <= 0 || board.hazards.is_empty() {
        return Ok(StageOutcome::Continue);
    }

    let damaged: Vec<usize> = board
        .snakes
        .iter()
        .enumerate()
        .filter(|(_, snake)| snake.is_alive())
        .filter_map(|(index, snake)| snake.head().map(|head| (index, head)))
        .filter(|&(_, head)| board.is_hazard(head) && !board.is_food(head))
        .map(|(index, _)| index)
        .collect();

    for index in damaged {
        let snake = &mut board.snakes[index];
        snake.health = clamp_health(snake.health - damage);
        trace!(snake = %snake.id, health = snake.health, "hazard damage applied");
    }

    Ok(StageOutcome::Continue)
}

const fn clamp_health(health: i32) -> i32 {
    if health < 0 {
        0
    } else if health > SNAKE_MAX_HEALTH {
        SNAKE_MAX_HEALTH
    } else {
        health
    }
}
