//! Game state and the patches rules produce
//!
//! `GameState` is owned by the controller and replaced wholesale every tick.
//! Rules never touch it directly: they return a `StatePatch` whose `Some`
//! fields replace the matching fields of the accumulated state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{Level, RunningLevel};
use super::sprite::{Bomb, Cross, Sprite};
use crate::consts::*;
use crate::settings::{DebugFlags, FieldSettings, Settings};
use crate::tuning::Tuning;

/// Latest input folded into the state for this tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Pointer position along the field's x axis, if the pointer ever moved
    pub pointer_x: Option<f32>,
}

/// Serializable RNG position
///
/// Each draw seeds a `Pcg32` from `(seed, draws)`, so replaying a run only
/// needs the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Number of values drawn so far
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    fn to_rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.draws.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Uniform value in `[lo, hi)`; `lo` when the range is empty
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let mut rng = self.to_rng();
        self.draws += 1;
        if hi > lo { rng.random_range(lo..hi) } else { lo }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// False once the game is over
    pub running: bool,
    /// Timestamp of the last frame (seconds)
    pub time: f64,
    /// Seconds of play since the game started
    pub game_time: f32,
    /// Seconds covered by the current tick
    pub delta_time: f32,
    pub bucket: Sprite,
    pub hands: Sprite,
    pub bombs: Vec<Bomb>,
    pub crosses: Vec<Cross>,
    pub lives: u32,
    pub settings: FieldSettings,
    pub tuning: Tuning,
    /// Levels still queued after the current one
    pub levels: Vec<Level>,
    /// Current level; `None` before the first game starts
    pub level: Option<RunningLevel>,
    /// Every level of the campaign has been won
    pub won: bool,
    /// Levels won since the last (re)start; a level counts as won on the tick
    /// this increments, the same tick `level` moves on to the next entry
    pub levels_won: u32,
    pub debug: DebugFlags,
    pub input: InputSnapshot,
    pub rng: RngState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl GameState {
    /// Idle state: entities in place, no level loaded yet
    pub fn new(settings: &Settings) -> Self {
        Self {
            running: true,
            time: 0.0,
            game_time: 0.0,
            delta_time: 0.0,
            bucket: Sprite::new(BUCKET_X, BUCKET_Y, BUCKET_SIZE, BUCKET_SIZE),
            hands: Sprite::new(HANDS_X, HANDS_Y, HANDS_SIZE, HANDS_SIZE),
            bombs: Vec::new(),
            crosses: Vec::new(),
            lives: settings.tuning.start_lives,
            settings: settings.field,
            tuning: settings.tuning,
            levels: Vec::new(),
            level: None,
            won: false,
            levels_won: 0,
            debug: settings.debug,
            input: InputSnapshot::default(),
            rng: RngState::new(settings.seed_or(DEFAULT_SEED)),
        }
    }

    /// Reset for a new game over `catalog`, keeping entities, settings and RNG
    pub fn restarted(self, catalog: &[Level]) -> Self {
        let (level, levels) = match catalog.split_first() {
            Some((first, rest)) => (Some(RunningLevel::prepare(first.clone())), rest.to_vec()),
            None => (None, Vec::new()),
        };
        Self {
            running: true,
            game_time: 0.0,
            delta_time: 0.0,
            bombs: Vec::new(),
            crosses: Vec::new(),
            lives: self.tuning.start_lives,
            levels,
            level,
            won: false,
            levels_won: 0,
            ..self
        }
    }

    /// Fold a new frame's clock into the state
    pub fn with_clock(self, time: f64, delta_time: f32) -> Self {
        Self {
            time,
            delta_time,
            game_time: self.game_time + delta_time,
            ..self
        }
    }

    pub fn with_input(self, input: InputSnapshot) -> Self {
        Self { input, ..self }
    }

    /// Whether gameplay rules (spawn, catch, progress) should act
    pub fn gameplay_active(&self) -> bool {
        self.lives > 0 && !self.won
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Name of the current level, for the HUD
    pub fn level_name(&self) -> Option<&str> {
        self.level.as_ref().map(RunningLevel::name)
    }

    /// Merge a rule's patch: every `Some` field replaces the current value
    pub fn apply(self, patch: StatePatch) -> Self {
        let StatePatch {
            bucket,
            hands,
            bombs,
            crosses,
            lives,
            levels,
            level,
            won,
            levels_won,
            rng,
        } = patch;

        Self {
            bucket: bucket.unwrap_or(self.bucket),
            hands: hands.unwrap_or(self.hands),
            bombs: bombs.unwrap_or(self.bombs),
            crosses: crosses.unwrap_or(self.crosses),
            lives: lives.unwrap_or(self.lives),
            levels: levels.unwrap_or(self.levels),
            level: level.or(self.level),
            won: won.unwrap_or(self.won),
            levels_won: levels_won.unwrap_or(self.levels_won),
            rng: rng.unwrap_or(self.rng),
            ..self
        }
    }
}

/// Partial replacement produced by a rule
///
/// Collections are replaced as a whole, never spliced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatePatch {
    pub bucket: Option<Sprite>,
    pub hands: Option<Sprite>,
    pub bombs: Option<Vec<Bomb>>,
    pub crosses: Option<Vec<Cross>>,
    pub lives: Option<u32>,
    pub levels: Option<Vec<Level>>,
    pub level: Option<RunningLevel>,
    pub won: Option<bool>,
    pub levels_won: Option<u32>,
    pub rng: Option<RngState>,
}

impl StatePatch {
    /// Patch that changes nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
