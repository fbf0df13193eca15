//! Bucket Bomber - a falling-bomb catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, rules, rule pipeline, levels)
//! - `game`: Controller owning the state and the active pipeline
//! - `platform`: Frame scheduling and input plumbing (native + browser)
//! - `settings` / `tuning` / `campaign`: Data-driven configuration

pub mod campaign;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use campaign::Campaign;
pub use game::Game;
pub use settings::{DebugFlags, FieldSettings, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Lives at the start of a game
    pub const START_LIVES: u32 = 5;

    /// Hands defaults (top-left anchored)
    pub const HANDS_X: f32 = 350.0;
    pub const HANDS_Y: f32 = 100.0;
    pub const HANDS_SIZE: f32 = 60.0;
    /// Maximum horizontal hands speed (px/s)
    pub const HANDS_MAX_SPEED: f32 = 600.0;
    /// Horizontal speed given to a bomb batted on the hands' edge (px/s)
    pub const BAT_SPEED: f32 = 120.0;

    /// Bucket defaults (top-left anchored)
    pub const BUCKET_X: f32 = 350.0;
    pub const BUCKET_Y: f32 = 450.0;
    pub const BUCKET_SIZE: f32 = 48.0;

    /// Bomb sprite size
    pub const BOMB_SIZE: f32 = 20.0;
    /// Maximum bombs one tick may spawn, to prevent a spawn storm after a long frame
    pub const MAX_SPAWNS_PER_TICK: u32 = 16;

    /// Cross mark size and display duration (seconds)
    pub const CROSS_SIZE: f32 = 32.0;
    pub const CROSS_DURATION: f32 = 0.75;

    /// Longest frame the scheduler will fold in (tab switches, debugger stops)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Seed used when the settings do not provide one
    pub const DEFAULT_SEED: u64 = 0x00B0_3B5E_ED00;
}

/// Clamp a left edge so a span of `width` stays inside `[0, field_width]`
#[inline]
pub fn clamp_span(x: f32, width: f32, field_width: f32) -> f32 {
    x.clamp(0.0, (field_width - width).max(0.0))
}
