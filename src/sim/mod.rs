//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Rules are plain functions from state to patch
//! - Seeded RNG only, carried in the state
//! - Time only enters through `delta_time`
//! - No rendering or platform dependencies

pub mod level;
pub mod pipeline;
pub mod rules;
pub mod sprite;
pub mod state;

pub use level::{Level, LevelStatus, Progression, RunningLevel, WinCondition, progress};
pub use pipeline::{GAME_OVER_RULES, GAMEPLAY_RULES, Pipeline, PipelineKind, Rule};
pub use sprite::{Bomb, Cross, CrossKind, Sprite};
pub use state::{GameState, InputSnapshot, RngState, StatePatch};
