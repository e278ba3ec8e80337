#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Named rulesets assembled from the shared stage pipeline.
//!
//! Every variant delegates turn computation to a [`StandardRuleset`] built
//! with the variant's stage list. Royale adds settings validation in front of
//! it and solo swaps the termination predicate.

pub mod builder;

use snake_rules_core::{BoardState, RulesError, Settings, SnakeMove};
use snake_rules_pipeline::Pipeline;
use snake_rules_system_elimination::STAGE_ELIMINATION_STANDARD;
use snake_rules_system_feeding::{STAGE_FEED_SNAKES_STANDARD, STAGE_SPAWN_FOOD_STANDARD};
use snake_rules_system_game_over::{
    is_game_over_solo, is_game_over_standard, STAGE_GAME_OVER_SOLO, STAGE_GAME_OVER_STANDARD,
};
use snake_rules_system_hazards::{validate_royale, STAGE_POPULATE_HAZARDS_ROYALE};
use snake_rules_system_health::{STAGE_HAZARD_DAMAGE_STANDARD, STAGE_STARVATION_STANDARD};
use snake_rules_system_movement::STAGE_MOVEMENT_STANDARD;

pub use builder::RulesetBuilder;
pub use snake_rules_pipeline::TurnOutcome;

/// Name of the multi-snake survival ruleset.
pub const GAME_TYPE_STANDARD: &str = "standard";
/// Name of the shrinking safe-zone ruleset.
pub const GAME_TYPE_ROYALE: &str = "royale";
/// Name of the single-snake ruleset.
pub const GAME_TYPE_SOLO: &str = "solo";

/// Stage order of the standard ruleset.
pub const STANDARD_STAGES: [&str; 7] = [
    STAGE_MOVEMENT_STANDARD,
    STAGE_STARVATION_STANDARD,
    STAGE_HAZARD_DAMAGE_STANDARD,
    STAGE_FEED_SNAKES_STANDARD,
    STAGE_SPAWN_FOOD_STANDARD,
    STAGE_ELIMINATION_STANDARD,
    STAGE_GAME_OVER_STANDARD,
];

/// Stage order of the royale ruleset.
pub const ROYALE_STAGES: [&str; 8] = [
    STAGE_MOVEMENT_STANDARD,
    STAGE_STARVATION_STANDARD,
    STAGE_HAZARD_DAMAGE_STANDARD,
    STAGE_FEED_SNAKES_STANDARD,
    STAGE_SPAWN_FOOD_STANDARD,
    STAGE_ELIMINATION_STANDARD,
    STAGE_POPULATE_HAZARDS_ROYALE,
    STAGE_GAME_OVER_STANDARD,
];

/// Stage order of the solo ruleset.
pub const SOLO_STAGES: [&str; 7] = [
    STAGE_MOVEMENT_STANDARD,
    STAGE_STARVATION_STANDARD,
    STAGE_HAZARD_DAMAGE_STANDARD,
    STAGE_FEED_SNAKES_STANDARD,
    STAGE_SPAWN_FOOD_STANDARD,
    STAGE_ELIMINATION_STANDARD,
    STAGE_GAME_OVER_SOLO,
];

/// Stage order for a game type.
pub fn stages_for(game_type: &str) -> Result<&'static [&'static str], RulesError> {
    match game_type {
        GAME_TYPE_STANDARD => Ok(&STANDARD_STAGES),
        GAME_TYPE_ROYALE => Ok(&ROYALE_STAGES),
        GAME_TYPE_SOLO => Ok(&SOLO_STAGES),
        other => Err(RulesError::UnknownGameType {
            name: other.to_owned(),
        }),
    }
}

/// Policy object computing turns for one game type.
pub trait Ruleset {
    /// Stable identifier of the game type.
    fn name(&self) -> &str;

    /// Settings bound to this ruleset.
    fn settings(&self) -> Settings;

    /// Computes the board following `state` given one move per living snake.
    ///
    /// `state` is never modified. On error no board is produced.
    fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError>;

    /// Reports whether the game represented by `state` has ended.
    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError>;

    /// Runs [`Ruleset::execute`] with the bound settings and keeps only the board.
    fn create_next_board_state(
        &self,
        state: &BoardState,
        moves: &[SnakeMove],
    ) -> Result<BoardState, RulesError> {
        self.execute(state, &self.settings(), moves)
            .map(|outcome| outcome.state)
    }
}

/// Multi-snake survival: the game ends once at most one snake is left.
#[derive(Clone, Debug)]
pub struct StandardRuleset {
    settings: Settings,
    pipeline: Pipeline,
}

impl StandardRuleset {
    /// Creates a standard ruleset bound to `settings`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_stages(settings, &STANDARD_STAGES)
    }

    fn with_stages(settings: Settings, stages: &[&str]) -> Self {
        Self {
            settings,
            pipeline: Pipeline::builtin(stages),
        }
    }

    /// Stage pipeline driving this ruleset.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Default for StandardRuleset {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Ruleset for StandardRuleset {
    fn name(&self) -> &str {
        GAME_TYPE_STANDARD
    }

    fn settings(&self) -> Settings {
        self.settings
    }

    fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError> {
        self.pipeline.execute(state, settings, moves)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        Ok(is_game_over_standard(state))
    }
}

/// Standard rules plus a safe zone that shrinks into permanent hazards.
#[derive(Clone, Debug)]
pub struct RoyaleRuleset {
    standard: StandardRuleset,
}

impl RoyaleRuleset {
    /// Creates a royale ruleset, rejecting settings without a positive shrink
    /// interval or hazard damage.
    pub fn new(settings: Settings) -> Result<Self, RulesError> {
        validate_royale(&settings)?;
        Ok(Self {
            standard: StandardRuleset::with_stages(settings, &ROYALE_STAGES),
        })
    }

    /// Stage pipeline driving this ruleset.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        self.standard.pipeline()
    }
}

impl Ruleset for RoyaleRuleset {
    fn name(&self) -> &str {
        GAME_TYPE_ROYALE
    }

    fn settings(&self) -> Settings {
        self.standard.settings()
    }

    fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError> {
        validate_royale(settings)?;
        self.standard.execute(state, settings, moves)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        self.standard.is_game_over(state)
    }
}

/// Single-snake rules: the game only ends once no snake is left.
#[derive(Clone, Debug)]
pub struct SoloRuleset {
    standard: StandardRuleset,
}

impl SoloRuleset {
    /// Creates a solo ruleset bound to `settings`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            standard: StandardRuleset::with_stages(settings, &SOLO_STAGES),
        }
    }

    /// Stage pipeline driving this ruleset.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        self.standard.pipeline()
    }
}

impl Default for SoloRuleset {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Ruleset for SoloRuleset {
    fn name(&self) -> &str {
        GAME_TYPE_SOLO
    }

    fn settings(&self) -> Settings {
        self.standard.settings()
    }

    fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError> {
        self.standard.execute(state, settings, moves)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        Ok(is_game_over_solo(state))
    }
}

/// Ruleset wrapping an arbitrary name, settings and pipeline.
///
/// Termination uses the solo predicate when the pipeline ends with the solo
/// game-over stage and the standard predicate otherwise.
#[derive(Clone, Debug)]
pub struct PipelineRuleset {
    name: String,
    settings: Settings,
    pipeline: Pipeline,
}

impl PipelineRuleset {
    /// Wraps `pipeline` under `name` with the provided settings.
    #[must_use]
    pub fn new(name: impl Into<String>, settings: Settings, pipeline: Pipeline) -> Self {
        Self {
            name: name.into(),
            settings,
            pipeline,
        }
    }

    /// Stage pipeline driving this ruleset.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Ruleset for PipelineRuleset {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> Settings {
        self.settings
    }

    fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError> {
        self.pipeline.execute(state, settings, moves)
    }

    fn is_game_over(&self, state: &BoardState) -> Result<bool, RulesError> {
        self.pipeline.validate()?;
        let solo = self.pipeline.stage_names().last() == Some(&STAGE_GAME_OVER_SOLO);
        if solo {
            Ok(is_game_over_solo(state))
        } else {
            Ok(is_game_over_standard(state))
        }
    }
}
