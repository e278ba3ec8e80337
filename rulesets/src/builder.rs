//! Construction of rulesets from flat string parameters.

use std::{collections::BTreeMap, ops::RangeInclusive, str::FromStr};

use snake_rules_core::{RoyaleSettings, RulesError, Settings};
use snake_rules_pipeline::Pipeline;
use snake_rules_system_hazards::{validate_royale, STAGE_POPULATE_HAZARDS_ROYALE};
use tracing::debug;

use crate::{
    stages_for, PipelineRuleset, RoyaleRuleset, Ruleset, SoloRuleset, StandardRuleset,
    GAME_TYPE_ROYALE, GAME_TYPE_SOLO, GAME_TYPE_STANDARD,
};

/// Parameter selecting the game type.
pub const PARAM_GAME_TYPE: &str = "name";
/// Percentage chance of spawning food on a turn.
pub const PARAM_FOOD_SPAWN_CHANCE: &str = "foodSpawnChance";
/// Food count the board is topped up to.
pub const PARAM_MINIMUM_FOOD: &str = "minimumFood";
/// Health lost by every snake each turn.
pub const PARAM_DAMAGE_PER_TURN: &str = "damagePerTurn";
/// Extra health lost on a hazard cell.
pub const PARAM_HAZARD_DAMAGE_PER_TURN: &str = "hazardDamagePerTurn";
/// Turns between royale shrink events.
pub const PARAM_SHRINK_EVERY_N_TURNS: &str = "shrinkEveryNTurns";

const DEFAULT_FOOD_SPAWN_CHANCE: u32 = 15;
const DEFAULT_MINIMUM_FOOD: u32 = 1;
const DEFAULT_DAMAGE_PER_TURN: i32 = 1;
const DEFAULT_HAZARD_DAMAGE_PER_TURN: i32 = 14;
const DEFAULT_SHRINK_EVERY_N_TURNS: u32 = 25;

/// Collects string parameters and a seed, then produces rulesets.
///
/// Missing parameters fall back to the engine defaults and the game type
/// defaults to standard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RulesetBuilder {
    params: BTreeMap<String, String>,
    seed: u64,
}

impl RulesetBuilder {
    /// Creates a builder without parameters and with seed zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every parameter from `params`, replacing earlier values.
    #[must_use]
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    /// Adds a single parameter, replacing any earlier value.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.params.insert(key.into(), value.into());
        self
    }

    /// Binds the seed every random draw of the match derives from.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Requested game type.
    #[must_use]
    pub fn game_type(&self) -> &str {
        self.params
            .get(PARAM_GAME_TYPE)
            .map_or(GAME_TYPE_STANDARD, String::as_str)
    }

    /// Parses the collected parameters into match settings.
    pub fn settings(&self) -> Result<Settings, RulesError> {
        Ok(Settings {
            food_spawn_chance: self.bounded_param(
                PARAM_FOOD_SPAWN_CHANCE,
                DEFAULT_FOOD_SPAWN_CHANCE,
                0..=100,
            )?,
            minimum_food: self.param(PARAM_MINIMUM_FOOD, DEFAULT_MINIMUM_FOOD)?,
            damage_per_turn: self.bounded_param(
                PARAM_DAMAGE_PER_TURN,
                DEFAULT_DAMAGE_PER_TURN,
                0..=i32::MAX,
            )?,
            hazard_damage_per_turn: self
                .param(PARAM_HAZARD_DAMAGE_PER_TURN, DEFAULT_HAZARD_DAMAGE_PER_TURN)?,
            royale: RoyaleSettings {
                shrink_every_n_turns: self
                    .param(PARAM_SHRINK_EVERY_N_TURNS, DEFAULT_SHRINK_EVERY_N_TURNS)?,
            },
            seed: self.seed,
        })
    }

    /// Builds the ruleset for the requested game type.
    pub fn ruleset(&self) -> Result<Box<dyn Ruleset>, RulesError> {
        let settings = self.settings()?;
        let game_type = self.game_type();
        debug!(game_type, seed = settings.seed, "building ruleset");
        match game_type {
            GAME_TYPE_STANDARD => Ok(Box::new(StandardRuleset::new(settings))),
            GAME_TYPE_ROYALE => Ok(Box::new(RoyaleRuleset::new(settings)?)),
            GAME_TYPE_SOLO => Ok(Box::new(SoloRuleset::new(settings))),
            other => Err(RulesError::UnknownGameType {
                name: other.to_owned(),
            }),
        }
    }

    /// Builds the builtin pipeline for the requested game type.
    pub fn pipeline(&self) -> Result<Pipeline, RulesError> {
        let pipeline = Pipeline::builtin(stages_for(self.game_type())?);
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Wraps `pipeline` in a ruleset bound to the collected settings.
    ///
    /// Pipelines that grow royale hazards get the royale settings checks.
    pub fn pipeline_ruleset(
        &self,
        name: impl Into<String>,
        pipeline: Pipeline,
    ) -> Result<PipelineRuleset, RulesError> {
        pipeline.validate()?;
        let settings = self.settings()?;
        if pipeline
            .stage_names()
            .contains(&STAGE_POPULATE_HAZARDS_ROYALE)
        {
            validate_royale(&settings)?;
        }
        Ok(PipelineRuleset::new(name, settings, pipeline))
    }

    fn param<T: FromStr>(&self, key: &str, default: T) -> Result<T, RulesError> {
        match self.params.get(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| RulesError::InvalidParameter {
                    name: key.to_owned(),
                    value: raw.clone(),
                }),
        }
    }

    fn bounded_param<T: FromStr + PartialOrd>(
        &self,
        key: &str,
        default: T,
        range: RangeInclusive<T>,
    ) -> Result<T, RulesError> {
        let value = self.param(key, default)?;
        if range.contains(&value) {
            return Ok(value);
        }
        Err(RulesError::InvalidParameter {
            name: key.to_owned(),
            value: self.params.get(key).cloned().unwrap_or_default(),
        })
    }
}
