//! Rule pipeline
//!
//! One tick folds the active rule list over the state: each rule sees the
//! result of every rule before it in the same tick.

use super::rules::*;
use super::state::{GameState, StatePatch};

/// A rule: reads the accumulated state, returns the fields to replace
pub type Rule = fn(&GameState) -> StatePatch;

/// Rules run while the game is being played
pub const GAMEPLAY_RULES: &[Rule] = &[
    bombs_movement,
    bomb_spawn,
    hands_movement,
    bucket_movement,
    bomb_out_of_bounds,
    crosses_movement,
    bomb_catch,
    level_progress,
];

/// Rules kept after game over so residual motion finishes
pub const GAME_OVER_RULES: &[Rule] = &[
    bombs_movement,
    bucket_movement,
    bomb_out_of_bounds,
    crosses_movement,
];

/// Which rule set a pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Gameplay,
    GameOver,
    Custom,
}

/// Ordered rule list applied once per tick
#[derive(Debug, Clone)]
pub struct Pipeline {
    kind: PipelineKind,
    rules: Vec<Rule>,
}

impl Pipeline {
    pub fn gameplay() -> Self {
        Self {
            kind: PipelineKind::Gameplay,
            rules: GAMEPLAY_RULES.to_vec(),
        }
    }

    pub fn game_over() -> Self {
        Self {
            kind: PipelineKind::GameOver,
            rules: GAME_OVER_RULES.to_vec(),
        }
    }

    pub fn custom(rules: Vec<Rule>) -> Self {
        Self {
            kind: PipelineKind::Custom,
            rules,
        }
    }

    #[inline]
    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Advance `state` by one tick
    pub fn run(&self, state: GameState) -> GameState {
        self.rules.iter().fold(state, |acc, rule| {
            let patch = rule(&acc);
            acc.apply(patch)
        })
    }
}
