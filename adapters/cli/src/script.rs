//! Match scripts replayed by the `replay` subcommand.

use std::{collections::BTreeMap, io::Write};

use anyhow::{Context, Result};
use serde::Deserialize;
use snake_rules_core::{BoardState, SnakeMove};
use snake_rules_rulesets::RulesetBuilder;
use tracing::info;

/// Builder parameters, seed, starting board and per-turn moves of a match.
#[derive(Debug, Deserialize)]
pub(crate) struct ReplayScript {
    #[serde(default)]
    params: BTreeMap<String, String>,
    #[serde(default)]
    seed: u64,
    board: BoardState,
    #[serde(default)]
    turns: Vec<Vec<SnakeMove>>,
}

/// How a replay ended.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) turns_played: usize,
    pub(crate) game_over: bool,
}

impl ReplayScript {
    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("match script is not valid JSON")
    }

    /// Executes the scripted turns, writing every resulting board as one JSON line.
    ///
    /// Stops early once the ruleset reports the game over.
    pub(crate) fn replay(&self, out: &mut impl Write) -> Result<ReplaySummary> {
        let ruleset = RulesetBuilder::new()
            .with_params(self.params.clone())
            .with_seed(self.seed)
            .ruleset()?;
        let settings = ruleset.settings();
        info!(
            game_type = ruleset.name(),
            seed = self.seed,
            turns = self.turns.len(),
            "replay started"
        );

        let mut board = self.board.clone();
        let mut summary = ReplaySummary {
            turns_played: 0,
            game_over: false,
        };
        for moves in &self.turns {
            let outcome = ruleset
                .execute(&board, &settings, moves)
                .with_context(|| format!("turn {} failed", board.turn + 1))?;
            serde_json::to_writer(&mut *out, &outcome.state)?;
            writeln!(out)?;

            board = outcome.state;
            summary.turns_played += 1;
            if outcome.game_over {
                summary.game_over = true;
                break;
            }
        }

        info!(
            turns_played = summary.turns_played,
            game_over = summary.game_over,
            final_turn = board.turn,
            "replay finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLO_WALL: &str = r#"{
        "params": { "name": "solo", "foodSpawnChance": "0", "minimumFood": "0" },
        "seed": 3,
        "board": {
            "width": 2,
            "height": 2,
            "snakes": [
                { "id": "one", "body": [{"x": 0, "y": 0}, {"x": 0, "y": 0}], "health": 100 }
            ]
        },
        "turns": [
            [{ "id": "one", "move": "right" }],
            [{ "id": "one", "move": "right" }],
            [{ "id": "one", "move": "right" }]
        ]
    }"#;

    #[test]
    fn replay_stops_at_game_over() {
        let script = ReplayScript::from_json(SOLO_WALL).expect("script decodes");
        let mut out = Vec::new();
        let summary = script.replay(&mut out).expect("replay succeeds");

        assert_eq!(
            summary,
            ReplaySummary {
                turns_played: 2,
                game_over: true,
            }
        );

        let text = String::from_utf8(out).expect("utf-8 output");
        let boards: Vec<BoardState> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("board line decodes"))
            .collect();
        assert_eq!(boards.len(), 2, "one line per executed turn");
        assert_eq!(boards[1].turn, 2);
        assert!(!boards[1].snakes[0].is_alive());
    }

    #[test]
    fn missing_moves_surface_the_turn() {
        let script = ReplayScript::from_json(
            r#"{ "board": { "width": 3, "height": 3,
                 "snakes": [{ "id": "a", "body": [{"x": 1, "y": 1}], "health": 100 }] },
                 "turns": [[]] }"#,
        )
        .expect("script decodes");

        let error = script.replay(&mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(error.to_string(), "turn 1 failed");
        assert_eq!(error.root_cause().to_string(), "no move found for snake a");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(ReplayScript::from_json("{ \"board\": ").is_err());
    }
}
