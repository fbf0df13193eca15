//! Data-driven game balance
//!
//! Every number the rules read that is not part of a level definition lives
//! here, so a settings file can rebalance the game without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs consumed by the rule functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of every game
    pub start_lives: u32,
    /// Hands follow the pointer at most this fast (px/s)
    pub hands_max_speed: f32,
    /// Horizontal speed given to a bomb batted on the hands' edge (px/s)
    pub bat_speed: f32,
    /// Bomb sprite edge length
    pub bomb_size: f32,
    /// Cross mark edge length
    pub cross_size: f32,
    /// How long a cross mark stays on screen (seconds)
    pub cross_duration: f32,
    /// Frames longer than this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            hands_max_speed: HANDS_MAX_SPEED,
            bat_speed: BAT_SPEED,
            bomb_size: BOMB_SIZE,
            cross_size: CROSS_SIZE,
            cross_duration: CROSS_DURATION,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}
