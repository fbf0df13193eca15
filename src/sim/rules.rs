//! Rule functions
//!
//! Each rule reads the accumulated state of the current tick and returns the
//! fields it wants to replace. Rules are total: empty collections, a missing
//! level or zero lives all produce a well-defined (often empty) patch.

use super::level::{LevelStatus, Progression, RunningLevel, progress};
use super::sprite::{Bomb, Cross, Sprite};
use super::state::{GameState, StatePatch};
use crate::consts::MAX_SPAWNS_PER_TICK;

/// Move every bomb by its velocity
pub fn bombs_movement(state: &GameState) -> StatePatch {
    let dt = state.delta_time;
    StatePatch {
        bombs: Some(state.bombs.iter().map(|b| b.advanced(dt)).collect()),
        ..Default::default()
    }
}

/// Drop new bombs from the top at the level's spawn interval
pub fn bomb_spawn(state: &GameState) -> StatePatch {
    if !state.gameplay_active() {
        return StatePatch::none();
    }
    let Some(running) = state.level.as_ref().filter(|l| l.is_in_progress()) else {
        return StatePatch::none();
    };

    let interval = running.level.spawn_interval;
    let speed = running.level.bomb_speed;
    let size = state.tuning.bomb_size;
    let mut clock = running.spawn_clock + state.delta_time;
    let mut rng = state.rng;
    let mut bombs = state.bombs.clone();

    if interval > 0.0 {
        let mut spawned = 0;
        while clock >= interval {
            if spawned == MAX_SPAWNS_PER_TICK {
                clock %= interval;
                break;
            }
            spawned += 1;
            clock -= interval;
            let x = rng.range(0.0, state.settings.width - size);
            // The bomb was due `clock` seconds ago; it has been falling since
            bombs.push(Bomb::falling(x, 0.0, size, speed).advanced(clock));
        }
    }

    StatePatch {
        bombs: Some(bombs),
        level: Some(RunningLevel {
            spawn_clock: clock,
            ..running.clone()
        }),
        rng: Some(rng),
        ..Default::default()
    }
}

/// Hands chase the pointer at a bounded speed
pub fn hands_movement(state: &GameState) -> StatePatch {
    let hands = state.hands;
    let width = state.settings.width;
    let x = match state.input.pointer_x {
        Some(pointer_x) => {
            let max_step = (state.tuning.hands_max_speed * state.delta_time).max(0.0);
            let target = pointer_x - hands.w / 2.0;
            hands.x + (target - hands.x).clamp(-max_step, max_step)
        }
        None => hands.x,
    };

    StatePatch {
        hands: Some(Sprite { x, ..hands }.clamped_x(width)),
        ..Default::default()
    }
}

/// Bucket snaps under the pointer
pub fn bucket_movement(state: &GameState) -> StatePatch {
    let Some(pointer_x) = state.input.pointer_x else {
        return StatePatch::none();
    };
    let bucket = state.bucket;
    StatePatch {
        bucket: Some(
            Sprite {
                x: pointer_x - bucket.w / 2.0,
                ..bucket
            }
            .clamped_x(state.settings.width),
        ),
        ..Default::default()
    }
}

/// Remove bombs that left the field; a bomb hitting the ground costs a life
pub fn bomb_out_of_bounds(state: &GameState) -> StatePatch {
    let field = state.settings;
    let mut bombs = Vec::with_capacity(state.bombs.len());
    let mut crosses = state.crosses.clone();
    let mut lives = state.lives;

    for bomb in &state.bombs {
        let sprite = &bomb.sprite;
        if sprite.y >= field.height {
            crosses.push(Cross::miss_at(bomb, state.tuning.cross_size, field.height));
            // A finished campaign is final; stragglers no longer cost lives
            if !state.won {
                lives = lives.saturating_sub(1);
            }
        } else if sprite.bottom() <= 0.0 && !bomb.is_falling() {
            // Batted clean out of the top
        } else if sprite.right() <= 0.0 || sprite.x >= field.width {
            // Batted off a side
        } else {
            bombs.push(*bomb);
        }
    }

    StatePatch {
        bombs: Some(bombs),
        crosses: Some(crosses),
        lives: Some(lives),
        ..Default::default()
    }
}

/// Age cross marks and drop the expired ones
pub fn crosses_movement(state: &GameState) -> StatePatch {
    let dt = state.delta_time;
    let duration = state.tuning.cross_duration;
    StatePatch {
        crosses: Some(
            state
                .crosses
                .iter()
                .map(|c| c.aged(dt))
                .filter(|c| c.age <= duration)
                .collect(),
        ),
        ..Default::default()
    }
}

/// Bucket catches bombs, hands bat falling bombs back up
///
/// Catching never costs a life; only a bomb reaching the ground does.
pub fn bomb_catch(state: &GameState) -> StatePatch {
    let tuning = &state.tuning;
    let mut bombs = Vec::with_capacity(state.bombs.len());
    let mut crosses = state.crosses.clone();
    let mut caught = 0;

    for bomb in &state.bombs {
        if bomb.sprite.overlaps(&state.bucket) {
            crosses.push(Cross::catch_at(bomb, tuning.cross_size));
            caught += 1;
        } else if bomb.is_falling() && bomb.sprite.overlaps(&state.hands) {
            bombs.push(bomb.batted(&state.hands, tuning.bat_speed));
        } else {
            bombs.push(*bomb);
        }
    }

    let level = match &state.level {
        Some(running) if caught > 0 => Some(RunningLevel {
            caught: running.caught + caught,
            ..running.clone()
        }),
        _ => None,
    };

    StatePatch {
        bombs: Some(bombs),
        crosses: Some(crosses),
        level,
        ..Default::default()
    }
}

/// Advance level counters and move on to the next level when won
pub fn level_progress(state: &GameState) -> StatePatch {
    let Some(running) = &state.level else {
        return StatePatch::none();
    };
    if running.status == LevelStatus::Exhausted || !state.gameplay_active() {
        return StatePatch::none();
    }

    let running = RunningLevel {
        survived: running.survived + state.delta_time,
        ..running.clone()
    };

    match progress(running, &state.levels) {
        Progression::InProgress(running) => StatePatch {
            level: Some(running),
            ..Default::default()
        },
        Progression::Advanced {
            cleared,
            next,
            remaining,
        } => {
            log::info!("Level '{}' cleared, next up: '{}'", cleared.name(), next.name());
            StatePatch {
                level: Some(next),
                levels: Some(remaining),
                levels_won: Some(state.levels_won + 1),
                ..Default::default()
            }
        }
        Progression::Exhausted(held) => {
            log::info!("Level '{}' cleared, campaign complete!", held.name());
            StatePatch {
                level: Some(held),
                won: Some(true),
                levels_won: Some(state.levels_won + 1),
                ..Default::default()
            }
        }
    }
}
