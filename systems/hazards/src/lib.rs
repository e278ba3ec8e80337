#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Royale hazard growth driven by a shrinking safe zone.
//!
//! The safe zone starts as the whole board. Every `shrink_every_n_turns`
//! turns one of its four edges moves inward by a row or column, and every
//! cell outside the zone becomes a hazard. The first edge is drawn from the
//! match seed; every later shrink takes an edge perpendicular to the previous
//! one, with the seed picking the side. A zone one cell wide or tall loses
//! that last strip next. The generator is re-seeded from the match seed on
//! every call and replayed from the first shrink, so the zone after `n`
//! shrinks is a pure function of the seed and `n`, and the hazard set only
//! ever grows.

use rand::Rng;
use snake_rules_core::{
    BoardState, MatchRng, Point, RulesError, Settings, SnakeMove, StageOutcome, StageResult,
};
use tracing::trace;

/// Registry identifier of the royale hazard growth stage.
pub const STAGE_POPULATE_HAZARDS_ROYALE: &str = "hazards.royale";

/// Board edge the safe zone can retreat from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Column with the lowest `x`.
    Left,
    /// Column with the highest `x`.
    Right,
    /// Row with the lowest `y`.
    Bottom,
    /// Row with the highest `y`.
    Top,
}

impl Edge {
    /// Edges in draw order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    const COLUMNS: [Edge; 2] = [Edge::Left, Edge::Right];
    const ROWS: [Edge; 2] = [Edge::Bottom, Edge::Top];

    /// Draws an edge uniformly from the provided generator.
    pub fn draw(rng: &mut MatchRng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Reports whether the edge removes a column rather than a row.
    #[must_use]
    pub const fn is_column(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    fn draw_side(columns: bool, rng: &mut MatchRng) -> Self {
        let side = rng.gen_range(0..2);
        if columns {
            Self::COLUMNS[side]
        } else {
            Self::ROWS[side]
        }
    }
}

/// Inclusive rectangle of cells not yet covered by royale hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SafeZone {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl SafeZone {
    /// Zone covering a whole `width` by `height` board.
    #[must_use]
    pub const fn full(width: i32, height: i32) -> Self {
        Self {
            min_x: 0,
            max_x: width - 1,
            min_y: 0,
            max_y: height - 1,
        }
    }

    /// Zone left after replaying `shrinks` edge draws from `rng`.
    #[must_use]
    pub fn after_shrinks(width: i32, height: i32, shrinks: u32, rng: &mut MatchRng) -> Self {
        let mut zone = Self::full(width, height);
        let mut previous = None;
        for _ in 0..shrinks {
            if zone.is_empty() {
                break;
            }
            let edge = zone.next_edge(previous, rng);
            zone.shrink(edge);
            previous = Some(edge);
        }
        zone
    }

    /// Edge the next shrink moves, given the edge moved by the previous one.
    pub fn next_edge(&self, previous: Option<Edge>, rng: &mut MatchRng) -> Edge {
        let columns = if self.width() == 1 {
            true
        } else if self.height() == 1 {
            false
        } else {
            match previous {
                None => return Edge::draw(rng),
                Some(edge) => !edge.is_column(),
            }
        };
        Edge::draw_side(columns, rng)
    }

    /// Moves one edge inward by a single row or column.
    ///
    /// Shrinking an empty zone does nothing.
    pub fn shrink(&mut self, edge: Edge) {
        if self.is_empty() {
            return;
        }
        match edge {
            Edge::Left => self.min_x += 1,
            Edge::Right => self.max_x -= 1,
            Edge::Bottom => self.min_y += 1,
            Edge::Top => self.max_y -= 1,
        }
    }

    /// Reports whether no cell remains safe.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Reports whether the point lies inside the zone.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Number of columns still safe.
    #[must_use]
    pub const fn width(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_x - self.min_x + 1
        }
    }

    /// Number of rows still safe.
    #[must_use]
    pub const fn height(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_y - self.min_y + 1
        }
    }
}

/// Rejects royale settings that could never put pressure on the snakes.
pub fn validate_royale(settings: &Settings) -> Result<(), RulesError> {
    if settings.royale.shrink_every_n_turns < 1 {
        return Err(RulesError::ShrinkTooFrequent);
    }
    if settings.hazard_damage_per_turn <= 0 {
        return Err(RulesError::NonPositiveRoyaleDamage);
    }
    Ok(())
}

/// Adds every cell outside the current safe zone to the board's hazards.
///
/// Existing hazards are kept. The resulting set is sorted and free of
/// duplicates.
pub fn populate_hazards_royale(
    board: &mut BoardState,
    settings: &Settings,
    _moves: &[SnakeMove],
) -> StageResult {
    let interval = settings.royale.shrink_every_n_turns;
    if interval < 1 {
        return Err(RulesError::ShrinkTooFrequent);
    }

    let shrinks = board.turn / interval;
    if shrinks == 0 {
        return Ok(StageOutcome::Continue);
    }

    let zone = SafeZone::after_shrinks(board.width, board.height, shrinks, &mut settings.rng());
    let before = board.hazards.len();
    for x in 0..board.width {
        for y in 0..board.height {
            let point = Point::new(x, y);
            if !zone.contains(point) {
                board.hazards.push(point);
            }
        }
    }
    board.hazards.sort_unstable();
    board.hazards.dedup();

    trace!(
        turn = board.turn,
        shrinks,
        safe_width = zone.width(),
        safe_height = zone.height(),
        added = board.hazards.len().saturating_sub(before),
        "royale hazards populated"
    );

    Ok(StageOutcome::Continue)
}
