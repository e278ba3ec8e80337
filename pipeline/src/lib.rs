#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ordered execution of named rule stages.
//!
//! A [`Pipeline`] owns an ordered list of stage functions looked up by name in
//! a [`StageRegistry`]. Executing a pipeline copies the incoming board,
//! advances the turn counter and hands the copy to every stage in order. The
//! caller's board is never touched, and a failing stage discards the partially
//! updated copy.

use std::{collections::BTreeMap, fmt};

use snake_rules_core::{BoardState, RulesError, Settings, SnakeMove, StageOutcome, StageResult};
use snake_rules_system_elimination::{eliminate_snakes, STAGE_ELIMINATION_STANDARD};
use snake_rules_system_feeding::{
    feed_snakes, spawn_food, STAGE_FEED_SNAKES_STANDARD, STAGE_SPAWN_FOOD_STANDARD,
};
use snake_rules_system_game_over::{
    game_over_solo, game_over_standard, STAGE_GAME_OVER_SOLO, STAGE_GAME_OVER_STANDARD,
};
use snake_rules_system_hazards::{populate_hazards_royale, STAGE_POPULATE_HAZARDS_ROYALE};
use snake_rules_system_health::{
    damage_hazards, reduce_snake_health, STAGE_HAZARD_DAMAGE_STANDARD, STAGE_STARVATION_STANDARD,
};
use snake_rules_system_movement::{move_snakes, STAGE_MOVEMENT_STANDARD};
use tracing::{debug, info};

/// Signature shared by every rule stage.
///
/// Stages mutate the board in place and either let the turn continue, end the
/// game, or abort the turn with an error.
pub type Stage = fn(&mut BoardState, &Settings, &[SnakeMove]) -> StageResult;

/// Lookup table from stable stage identifiers to stage functions.
#[derive(Clone, Default)]
pub struct StageRegistry {
    stages: BTreeMap<String, Stage>,
}

impl StageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every stage shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [(&str, Stage); 9] = [
            (STAGE_MOVEMENT_STANDARD, move_snakes),
            (STAGE_STARVATION_STANDARD, reduce_snake_health),
            (STAGE_HAZARD_DAMAGE_STANDARD, damage_hazards),
            (STAGE_FEED_SNAKES_STANDARD, feed_snakes),
            (STAGE_SPAWN_FOOD_STANDARD, spawn_food),
            (STAGE_ELIMINATION_STANDARD, eliminate_snakes),
            (STAGE_POPULATE_HAZARDS_ROYALE, populate_hazards_royale),
            (STAGE_GAME_OVER_STANDARD, game_over_standard),
            (STAGE_GAME_OVER_SOLO, game_over_solo),
        ];
        for (name, stage) in builtin {
            let _ = registry.register(name, stage);
        }
        registry
    }

    /// Registers a stage under the provided name, returning any stage it replaced.
    pub fn register(&mut self, name: impl Into<String>, stage: Stage) -> Option<Stage> {
        self.stages.insert(name.into(), stage)
    }

    /// Looks up a stage by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Stage> {
        self.stages.get(name).copied()
    }

    /// Reports whether a stage is registered under the provided name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.stages.contains_key(name)
    }

    /// Registered stage names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[derive(Clone)]
struct NamedStage {
    name: String,
    run: Stage,
}

impl fmt::Debug for NamedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Result of executing one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whether a stage declared the game over as of this turn.
    pub game_over: bool,
    /// Board after every stage ran.
    pub state: BoardState,
}

/// Ordered, reusable sequence of stages.
///
/// Assembling a pipeline never panics. A pipeline referencing unknown stages,
/// or none at all, is kept in an error state that [`Pipeline::validate`] and
/// every [`Pipeline::execute`] call report.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Vec<NamedStage>,
    error: Option<RulesError>,
}

impl Pipeline {
    /// Assembles a pipeline from stage names resolved against `registry`.
    pub fn from_names<S: AsRef<str>>(registry: &StageRegistry, names: &[S]) -> Self {
        if names.is_empty() {
            return Self::failed(RulesError::EmptyPipeline);
        }

        let mut stages = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let Some(run) = registry.get(name) else {
                return Self::failed(RulesError::UnknownStage {
                    name: name.to_owned(),
                });
            };
            stages.push(NamedStage {
                name: name.to_owned(),
                run,
            });
        }

        Self {
            stages,
            error: None,
        }
    }

    /// Assembles a pipeline from the builtin registry.
    pub fn builtin<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_names(&StageRegistry::builtin(), names)
    }

    fn failed(error: RulesError) -> Self {
        Self {
            stages: Vec::new(),
            error: Some(error),
        }
    }

    /// Reports the assembly error, if any.
    pub fn validate(&self) -> Result<(), RulesError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Names of the assembled stages in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name.as_str()).collect()
    }

    /// Number of assembled stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Reports whether no stage was assembled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Computes the next board from `state`.
    ///
    /// The turn counter of the returned board is one past the input's. Stages
    /// run in assembly order; the first error aborts the turn and the first
    /// game-over signal skips any remaining stages.
    pub fn execute(
        &self,
        state: &BoardState,
        settings: &Settings,
        moves: &[SnakeMove],
    ) -> Result<TurnOutcome, RulesError> {
        self.validate()?;

        let mut next = state.clone();
        next.turn = next.turn.saturating_add(1);

        for stage in &self.stages {
            let outcome = (stage.run)(&mut next, settings, moves).map_err(|error| {
                debug!(stage = %stage.name, turn = next.turn, %error, "stage failed");
                error
            })?;
            debug!(stage = %stage.name, turn = next.turn, ?outcome, "stage complete");

            if outcome.is_game_over() {
                info!(
                    stage = %stage.name,
                    turn = next.turn,
                    living = next.living_snake_count(),
                    "game over"
                );
                return Ok(TurnOutcome {
                    game_over: true,
                    state: next,
                });
            }
        }

        Ok(TurnOutcome {
            game_over: false,
            state: next,
        })
    }
}
