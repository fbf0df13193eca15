//! Level definitions and progression
//!
//! A `Level` is immutable catalog data. `RunningLevel` pairs it with the
//! counters that decide when it is won:
//!
//! ```text
//! InProgress --(win condition met)--> Won --(queue non-empty)--> InProgress (next level)
//!                                         \--(queue empty)-----> Exhausted
//! ```

use serde::{Deserialize, Serialize};

/// How a level is won
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Catch this many bombs in the bucket
    CatchBombs { count: u32 },
    /// Stay alive this long (seconds)
    Survive { seconds: f32 },
}

/// Static level definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Seconds between two bombs
    pub spawn_interval: f32,
    /// Falling speed of new bombs (px/s)
    pub bomb_speed: f32,
    pub win: WinCondition,
}

/// Where a running level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    InProgress,
    Won,
    /// Last level won and nothing left in the queue
    Exhausted,
}

/// A level being played, with its progress counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningLevel {
    pub level: Level,
    /// Bombs caught in the bucket during this level
    pub caught: u32,
    /// Seconds played in this level
    pub survived: f32,
    /// Seconds accumulated toward the next spawn
    pub spawn_clock: f32,
    pub status: LevelStatus,
}

impl RunningLevel {
    /// Fresh counters for `level`
    pub fn prepare(level: Level) -> Self {
        Self {
            level,
            caught: 0,
            survived: 0.0,
            spawn_clock: 0.0,
            status: LevelStatus::InProgress,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.level.name
    }

    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.status == LevelStatus::InProgress
    }

    pub fn win_condition_met(&self) -> bool {
        match self.level.win {
            WinCondition::CatchBombs { count } => self.caught >= count,
            WinCondition::Survive { seconds } => self.survived >= seconds,
        }
    }

    /// InProgress -> Won once the win condition holds
    pub fn evaluated(self) -> Self {
        if self.is_in_progress() && self.win_condition_met() {
            Self {
                status: LevelStatus::Won,
                ..self
            }
        } else {
            self
        }
    }
}

/// Outcome of one progression step
#[derive(Debug, Clone, PartialEq)]
pub enum Progression {
    /// Still playing (counters may have moved)
    InProgress(RunningLevel),
    /// Current level won, next one started
    Advanced {
        cleared: RunningLevel,
        next: RunningLevel,
        remaining: Vec<Level>,
    },
    /// Last level won; it is held as the final state
    Exhausted(RunningLevel),
}

/// Run the level state machine once against the remaining queue
pub fn progress(running: RunningLevel, queue: &[Level]) -> Progression {
    let running = running.evaluated();
    match running.status {
        LevelStatus::InProgress => Progression::InProgress(running),
        LevelStatus::Won => match queue.split_first() {
            Some((next, rest)) => Progression::Advanced {
                cleared: running,
                next: RunningLevel::prepare(next.clone()),
                remaining: rest.to_vec(),
            },
            None => Progression::Exhausted(RunningLevel {
                status: LevelStatus::Exhausted,
                ..running
            }),
        },
        LevelStatus::Exhausted => Progression::Exhausted(running),
    }
}

#[cfg(test)]
pub(crate) fn test_level(name: &str, win: WinCondition) -> Level {
    Level {
        name: name.to_string(),
        spawn_interval: 1_000_000.0,
        bomb_speed: 50.0,
        win,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmet_condition_stays_in_progress() {
        let mut running = RunningLevel::prepare(test_level(
            "one",
            WinCondition::CatchBombs { count: 3 },
        ));
        running.caught = 2;
        match progress(running, &[]) {
            Progression::InProgress(level) => assert_eq!(level.caught, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_won_level_advances_and_resets_counters() {
        let mut running = RunningLevel::prepare(test_level(
            "one",
            WinCondition::CatchBombs { count: 1 },
        ));
        running.caught = 1;
        running.survived = 12.0;
        let queue = vec![
            test_level("two", WinCondition::Survive { seconds: 5.0 }),
            test_level("three", WinCondition::Survive { seconds: 5.0 }),
        ];

        match progress(running, &queue) {
            Progression::Advanced {
                cleared,
                next,
                remaining,
            } => {
                assert_eq!(cleared.status, LevelStatus::Won);
                assert_eq!(next.name(), "two");
                assert_eq!(next.caught, 0);
                assert_eq!(next.survived, 0.0);
                assert!(next.is_in_progress());
                assert_eq!(remaining.len(), 1);
                assert_eq!(remaining[0].name, "three");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_last_level_is_exhausted_and_held() {
        let mut running = RunningLevel::prepare(test_level(
            "only",
            WinCondition::Survive { seconds: 2.0 },
        ));
        running.survived = 2.5;

        let held = match progress(running, &[]) {
            Progression::Exhausted(level) => level,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(held.status, LevelStatus::Exhausted);
        assert_eq!(held.name(), "only");

        // Exhausted is terminal
        let queue = vec![test_level("late", WinCondition::Survive { seconds: 1.0 })];
        assert_eq!(progress(held.clone(), &queue), Progression::Exhausted(held));
    }

    #[test]
    fn test_win_condition_json_shape() {
        let level: Level = serde_json::from_str(
            r#"{
                "name": "Drizzle",
                "spawn_interval": 1.0,
                "bomb_speed": 90.0,
                "win": { "catch_bombs": { "count": 10 } }
            }"#,
        )
        .unwrap();
        assert_eq!(level.win, WinCondition::CatchBombs { count: 10 });
    }
}
