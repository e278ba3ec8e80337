#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Feeding stages: food consumption, tail resolution and food spawning.

use std::collections::HashSet;

use rand::Rng;
use snake_rules_core::{
    BoardState, Point, Settings, SnakeMove, StageOutcome, StageResult, SNAKE_MAX_HEALTH,
};
use tracing::debug;

/// Registry identifier of the feeding stage.
pub const STAGE_FEED_SNAKES_STANDARD: &str = "feed.standard";
/// Registry identifier of the food spawning stage.
pub const STAGE_SPAWN_FOOD_STANDARD: &str = "spawn_food.standard";

/// Resolves food consumption for every living snake.
///
/// Expects the movement stage to have prepended a new head without dropping
/// the tail. A snake whose head landed on food regains full health and keeps
/// its tail, growing by one segment; every other snake drops its tail. Eaten
/// food leaves the board, even when several heads share the cell.
pub fn feed_snakes(
    board: &mut BoardState,
    _settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let BoardState { snakes, food, .. } = board;
    let mut eaten: Vec<Point> = Vec::new();

    for snake in snakes.iter_mut().filter(|snake| snake.is_alive()) {
        let Some(head) = snake.head() else {
            continue;
        };

        if food.contains(&head) {
            snake.health = SNAKE_MAX_HEALTH;
            if !eaten.contains(&head) {
                eaten.push(head);
            }
            debug!(
                snake = %snake.id,
                x = head.x,
                y = head.y,
                length = snake.body.len(),
                "snake ate"
            );
        } else if snake.body.len() > 1 {
            let _ = snake.body.pop();
        }
    }

    food.retain(|point| !eaten.contains(point));
    Ok(StageOutcome::Continue)
}

/// Tops the board up with food according to the match settings.
///
/// When fewer than `minimum_food` items are present the shortfall is spawned.
/// Otherwise a single item spawns with `food_spawn_chance` percent probability.
/// Food only lands on cells free of food and living snake segments; the draws
/// come from the generator dedicated to the current turn.
pub fn spawn_food(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let mut rng = settings.rng_for_turn(board.turn);

    let present = board.food.len();
    let minimum = usize::try_from(settings.minimum_food).unwrap_or(usize::MAX);
    let wanted = if present < minimum {
        minimum - present
    } else if settings.food_spawn_chance > 0
        && rng.gen_range(0..100) < settings.food_spawn_chance
    {
        1
    } else {
        0
    };
    if wanted == 0 {
        return Ok(StageOutcome::Continue);
    }

    let mut free = unoccupied_points(board);
    for _ in 0..wanted {
        if free.is_empty() {
            break;
        }
        let point = free.swap_remove(rng.gen_range(0..free.len()));
        debug!(x = point.x, y = point.y, turn = board.turn, "food spawned");
        board.food.push(point);
    }

    Ok(StageOutcome::Continue)
}

/// Cells holding neither food nor a living snake segment, in column-major order.
#[must_use]
pub fn unoccupied_points(board: &BoardState) -> Vec<Point> {
    let occupied: HashSet<Point> = board
        .living_snakes()
        .flat_map(|snake| snake.body.iter().copied())
        .chain(board.food.iter().copied())
        .collect();

    (0..board.width)
        .flat_map(|x| (0..board.height).map(move |y| Point::new(x, y)))
        .filter(|point| !occupied.contains(point))
        .collect()
}
