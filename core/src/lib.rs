#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake rules engine.
//!
//! This crate defines the data surface that every rule stage operates on.
//! Callers hand the engine a [`BoardState`] snapshot, the match [`Settings`]
//! and one [`SnakeMove`] per living snake. Stages mutate a private copy of
//! the board in a fixed order and report failures as [`RulesError`] values.
//! Nothing in this crate performs I/O or holds global state: randomness is
//! always derived from the seed carried by the match [`Settings`].

use std::{fmt, str::FromStr};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Health restored to a snake when it eats and the upper bound of the health range.
pub const SNAKE_MAX_HEALTH: i32 = 100;

/// Deterministic generator bound to a single match.
pub type MatchRng = ChaCha8Rng;

/// Integer coordinate of a single board cell.
///
/// `x` grows to the right and `y` grows upwards, so `(0, 0)` is the bottom-left
/// cell of the board. Coordinates may leave the board after a move, which is
/// why both axes are signed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Point {
    /// Creates a new point from explicit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring point reached by applying the provided move.
    #[must_use]
    pub const fn step(self, direction: Move) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Cardinal moves a snake may request for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    /// Movement toward increasing `y`.
    Up,
    /// Movement toward decreasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Move {
    /// Every move in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset applied to the head when the move is executed.
    #[must_use]
    pub const fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Lowercase wire name of the move.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = RulesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| RulesError::InvalidMove {
                value: value.to_owned(),
            })
    }
}

/// Stable identifier of a snake within a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnakeId(String);

impl SnakeId {
    /// Creates a new identifier from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed string form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnakeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SnakeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Terminal reason a snake stopped participating in the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EliminationCause {
    /// The head left the board.
    OutOfBounds,
    /// The head entered one of the snake's own body segments.
    SelfCollision,
    /// The head entered another snake's body segment.
    BodyCollision,
    /// The head met another head and the snake was not strictly longer.
    HeadToHeadCollision,
    /// Health dropped to zero.
    Starvation,
}

impl EliminationCause {
    /// Stable name used in logs and serialised boards.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfBounds => "out-of-bounds",
            Self::SelfCollision => "self-collision",
            Self::BodyCollision => "body-collision",
            Self::HeadToHeadCollision => "head-to-head-collision",
            Self::Starvation => "starvation",
        }
    }
}

impl fmt::Display for EliminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record attached to a snake once it has been eliminated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Elimination {
    /// Reason the snake was eliminated.
    pub cause: EliminationCause,
    /// Snake responsible for the elimination, absent for self-inflicted or environmental causes.
    pub by: Option<SnakeId>,
    /// Turn on which the elimination happened.
    pub turn: u32,
}

/// One agent on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snake {
    /// Identifier of the snake.
    pub id: SnakeId,
    /// Occupied cells, head first and tail last.
    pub body: Vec<Point>,
    /// Remaining health in `[0, SNAKE_MAX_HEALTH]`.
    pub health: i32,
    /// Elimination record; `None` while the snake is alive.
    #[serde(default)]
    pub elimination: Option<Elimination>,
}

impl Snake {
    /// Creates a living snake.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, body: Vec<Point>, health: i32) -> Self {
        Self {
            id: id.into(),
            body,
            health,
            elimination: None,
        }
    }

    /// Reports whether the snake still participates in the match.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.elimination.is_none()
    }

    /// Cell occupied by the head, if the body is non-empty.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    /// Cause of elimination, if any.
    #[must_use]
    pub fn eliminated_cause(&self) -> Option<EliminationCause> {
        self.elimination.as_ref().map(|record| record.cause)
    }

    /// Snake credited with the elimination, if any.
    #[must_use]
    pub fn eliminated_by(&self) -> Option<&SnakeId> {
        self.elimination.as_ref().and_then(|record| record.by.as_ref())
    }

    /// Turn of the elimination, or `0` while alive.
    #[must_use]
    pub fn eliminated_on_turn(&self) -> u32 {
        self.elimination.as_ref().map_or(0, |record| record.turn)
    }

    /// Marks the snake as eliminated.
    ///
    /// A snake keeps its first elimination record; later calls are ignored.
    pub fn eliminate(&mut self, cause: EliminationCause, by: Option<SnakeId>, turn: u32) {
        if self.elimination.is_none() {
            self.elimination = Some(Elimination { cause, by, turn });
        }
    }
}

/// Full snapshot of the game world at a point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
    /// Number of turns executed so far.
    #[serde(default)]
    pub turn: u32,
    /// Every snake in the match, alive or eliminated, in stable order.
    #[serde(default)]
    pub snakes: Vec<Snake>,
    /// Food locations.
    #[serde(default)]
    pub food: Vec<Point>,
    /// Hazard locations.
    #[serde(default)]
    pub hazards: Vec<Point>,
}

impl BoardState {
    /// Creates an empty board with the provided dimensions.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reports whether the point lies on the board.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    /// Iterator over the snakes that have not been eliminated.
    pub fn living_snakes(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|snake| snake.is_alive())
    }

    /// Number of snakes that have not been eliminated.
    #[must_use]
    pub fn living_snake_count(&self) -> usize {
        self.living_snakes().count()
    }

    /// Reports whether the point holds a hazard.
    #[must_use]
    pub fn is_hazard(&self, point: Point) -> bool {
        self.hazards.contains(&point)
    }

    /// Reports whether the point holds food.
    #[must_use]
    pub fn is_food(&self, point: Point) -> bool {
        self.food.contains(&point)
    }
}

/// Move requested by one snake for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnakeMove {
    /// Snake issuing the move.
    pub id: SnakeId,
    /// Requested direction.
    #[serde(rename = "move")]
    pub direction: Move,
}

impl SnakeMove {
    /// Creates a new move for the given snake.
    #[must_use]
    pub fn new(id: impl Into<SnakeId>, direction: Move) -> Self {
        Self {
            id: id.into(),
            direction,
        }
    }
}

/// Parameters specific to the royale variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoyaleSettings {
    /// Number of turns between two safe-zone shrink events.
    pub shrink_every_n_turns: u32,
}

/// Immutable per-match configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Percentage chance, in `0..=100`, that a food item spawns on a turn.
    pub food_spawn_chance: u32,
    /// Food count the board is topped up to every turn.
    pub minimum_food: u32,
    /// Health every living snake loses each turn.
    pub damage_per_turn: i32,
    /// Extra health lost by a snake whose head ends the move on a hazard.
    pub hazard_damage_per_turn: i32,
    /// Royale-only parameters.
    pub royale: RoyaleSettings,
    /// Seed every random draw of the match derives from.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            food_spawn_chance: 0,
            minimum_food: 0,
            damage_per_turn: 1,
            hazard_damage_per_turn: 0,
            royale: RoyaleSettings::default(),
            seed: 0,
        }
    }
}

impl Settings {
    /// Returns a copy of the settings bound to the provided seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fresh generator for draws that must be identical on every turn of the match.
    #[must_use]
    pub fn rng(&self) -> MatchRng {
        MatchRng::seed_from_u64(self.seed)
    }

    /// Fresh generator dedicated to a single turn.
    ///
    /// Each turn reads from its own ChaCha stream so draws never depend on how
    /// many values earlier turns consumed.
    #[must_use]
    pub fn rng_for_turn(&self, turn: u32) -> MatchRng {
        let mut rng = self.rng();
        rng.set_stream(u64::from(turn));
        rng
    }
}

/// Signal returned by a stage after it mutated the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
    /// Later stages should run.
    Continue,
    /// The game ended as of this turn.
    GameOver,
}

impl StageOutcome {
    /// Maps a game-over predicate onto an outcome.
    #[must_use]
    pub const fn from_game_over(over: bool) -> Self {
        if over {
            Self::GameOver
        } else {
            Self::Continue
        }
    }

    /// Reports whether the outcome ends the game.
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Result type shared by every rule stage.
pub type StageResult = Result<StageOutcome, RulesError>;

/// Failures surfaced by rule stages, pipelines and ruleset construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A living snake has no move for the turn.
    #[error("no move found for snake {snake}")]
    NoMoveFound {
        /// Snake lacking a move.
        snake: SnakeId,
    },
    /// A living snake received more than one move for the turn.
    #[error("more than one move found for snake {snake}")]
    DuplicateMove {
        /// Snake with conflicting moves.
        snake: SnakeId,
    },
    /// A living snake has an empty body.
    #[error("snake {snake} is alive with a zero length body")]
    ZeroLengthSnake {
        /// Snake with the empty body.
        snake: SnakeId,
    },
    /// The royale shrink interval is below one turn.
    #[error("royale game can't shrink more frequently than every turn")]
    ShrinkTooFrequent,
    /// The royale hazard damage is not positive.
    #[error("royale damage per turn must be greater than zero")]
    NonPositiveRoyaleDamage,
    /// A pipeline referenced a stage missing from the registry.
    #[error("stage {name} not found in registry")]
    UnknownStage {
        /// Missing stage identifier.
        name: String,
    },
    /// A pipeline was assembled without stages.
    #[error("pipeline has no stages")]
    EmptyPipeline,
    /// The requested game type has no ruleset.
    #[error("unknown game type {name}")]
    UnknownGameType {
        /// Requested game type.
        name: String,
    },
    /// A configuration parameter could not be parsed.
    #[error("invalid value {value:?} for parameter {name}")]
    InvalidParameter {
        /// Parameter key.
        name: String,
        /// Raw value supplied for the parameter.
        value: String,
    },
    /// A move name could not be parsed.
    #[error("invalid move {value:?}")]
    InvalidMove {
        /// Raw move name.
        value: String,
    },
}
