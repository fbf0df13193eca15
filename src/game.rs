//! Game controller
//!
//! Owns the authoritative `GameState`, the active rule pipeline and the input
//! slot. The frame scheduler calls `frame` once per display refresh.

use crate::campaign::Campaign;
use crate::platform::input::{InputCell, InputHandle, Key};
use crate::settings::Settings;
use crate::sim::{GameState, Pipeline, PipelineKind};

/// A running game
#[derive(Debug)]
pub struct Game {
    state: GameState,
    pipeline: Pipeline,
    input: InputCell,
    campaign: Campaign,
    /// Timestamp of the previous frame (seconds)
    last_time: Option<f64>,
}

impl Game {
    /// Create a game and start the campaign's first level
    pub fn new(settings: &Settings, campaign: Campaign) -> Self {
        let mut game = Self {
            state: GameState::new(settings),
            pipeline: Pipeline::gameplay(),
            input: InputCell::new(),
            campaign,
            last_time: None,
        };
        game.restart();
        game
    }

    /// Read-only snapshot for the presentation layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pipeline_kind(&self) -> PipelineKind {
        self.pipeline.kind()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Writer for event listeners
    pub fn input_handle(&self) -> InputHandle {
        self.input.handle()
    }

    /// Stop accepting input from handles given out so far
    pub fn detach_input(&mut self) {
        self.input.detach();
    }

    /// Reset lives and entities, reload the campaign, reinstall gameplay rules
    pub fn restart(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = state.restarted(&self.campaign.levels);
        self.pipeline = Pipeline::gameplay();
        match self.state.level_name() {
            Some(name) => log::info!("New game: {} lives, level '{}'", self.state.lives, name),
            None => log::warn!("New game started with an empty campaign"),
        }
    }

    /// Advance one frame at timestamp `now_ms` (milliseconds, as given by the display clock)
    pub fn frame(&mut self, now_ms: f64) -> &GameState {
        let now = now_ms / 1000.0;
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, self.state.tuning.max_frame_dt),
            None => 0.0,
        };
        self.last_time = Some(now);

        let (snapshot, key) = self.input.take();
        // A game restarted by this frame's key starts its clock at zero
        let restarted = key.is_some_and(|key| self.handle_key(key));
        let dt = if restarted { 0.0 } else { dt };

        let base = std::mem::take(&mut self.state)
            .with_input(snapshot)
            .with_clock(now, dt);
        self.state = self.pipeline.run(base);

        if self.state.is_game_over() && self.pipeline.kind() == PipelineKind::Gameplay {
            self.stop_game();
        }

        &self.state
    }

    /// Returns true when the key restarted the game
    fn handle_key(&mut self, key: Key) -> bool {
        log::debug!("Key: {:?}", key);
        match key {
            Key::Restart if self.is_game_over() || self.state.won => {
                self.restart();
                true
            }
            Key::ToggleDebug => {
                self.state.debug.collisions = !self.state.debug.collisions;
                false
            }
            _ => false,
        }
    }

    /// Keep movement rules only; the frame loop itself keeps running
    fn stop_game(&mut self) {
        log::info!(
            "Game over at {:.1}s ({} levels won)",
            self.state.game_time,
            self.state.levels_won
        );
        self.state.running = false;
        self.pipeline = Pipeline::game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Level, WinCondition};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn settings() -> Settings {
        Settings {
            seed: Some(7),
            ..Default::default()
        }
    }

    fn storm() -> Campaign {
        Campaign {
            levels: vec![Level {
                name: "Storm".to_string(),
                spawn_interval: 0.2,
                bomb_speed: 400.0,
                win: WinCondition::Survive { seconds: 1_000.0 },
            }],
        }
    }

    /// Run frames with the bucket parked in a corner until the game ends
    fn play_until_game_over(game: &mut Game, now: &mut f64) {
        game.input_handle().pointer_moved(0.0);
        for _ in 0..60 * 120 {
            *now += FRAME_MS;
            game.frame(*now);
            if game.is_game_over() {
                return;
            }
        }
        panic!("game never ended");
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut game = Game::new(&settings(), Campaign::default());
        let state = game.frame(5_000.0);
        assert_eq!(state.delta_time, 0.0);
        assert_eq!(state.game_time, 0.0);

        let state = game.frame(5_000.0 + FRAME_MS);
        assert!((state.delta_time - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut game = Game::new(&settings(), Campaign::default());
        game.frame(0.0);
        // Tab was hidden for ten seconds
        let state = game.frame(10_000.0);
        assert_eq!(state.delta_time, state.tuning.max_frame_dt);
        // Clock going backwards never yields a negative delta
        let state = game.frame(9_000.0);
        assert_eq!(state.delta_time, 0.0);
    }

    #[test]
    fn test_pointer_moves_bucket_next_frame() {
        let mut game = Game::new(&settings(), Campaign::default());
        game.frame(0.0);
        game.input_handle().pointer_moved(120.0);
        let state = game.frame(FRAME_MS);
        assert_eq!(state.bucket.center().x, 120.0);
    }

    #[test]
    fn test_game_over_swaps_pipeline_and_keeps_running() {
        let mut game = Game::new(&settings(), storm());
        let mut now = 0.0;
        play_until_game_over(&mut game, &mut now);

        assert_eq!(game.pipeline_kind(), PipelineKind::GameOver);
        assert!(!game.state().running);
        assert_eq!(game.state().lives, 0);

        // Residual motion continues but nothing spawns and lives stay at zero
        let bombs_before = game.state().bombs.len();
        let draws = game.state().rng.draws;
        for _ in 0..30 {
            now += FRAME_MS;
            game.frame(now);
        }
        assert_eq!(game.state().lives, 0);
        assert_eq!(game.state().rng.draws, draws);
        assert!(game.state().bombs.len() <= bombs_before);
        assert!(game.state().game_time > 0.0);
    }

    #[test]
    fn test_restart_key_after_game_over() {
        let mut game = Game::new(&settings(), storm());
        let mut now = 0.0;
        play_until_game_over(&mut game, &mut now);

        game.input_handle().key_down(Key::Restart);
        now += FRAME_MS;
        let state = game.frame(now);
        assert_eq!(state.lives, 5);
        assert!(state.running);
        assert!(state.crosses.is_empty());
        assert_eq!(state.level_name(), Some("Storm"));
        assert_eq!(game.pipeline_kind(), PipelineKind::Gameplay);
    }

    /// One short survival level, bucket parked away from five falling bombs
    fn win_with_bombs_in_flight(game: &mut Game, now: &mut f64) {
        game.input_handle().pointer_moved(650.0);
        game.frame(*now);
        for i in 0..5 {
            game.state.bombs.push(crate::sim::Bomb::falling(
                20.0 + 60.0 * i as f32,
                300.0,
                20.0,
                200.0,
            ));
        }
        for _ in 0..200 {
            *now += 16.0;
            game.frame(*now);
        }
    }

    fn short_campaign() -> Campaign {
        Campaign {
            levels: vec![Level {
                name: "Short".to_string(),
                spawn_interval: 1_000.0,
                bomb_speed: 100.0,
                win: WinCondition::Survive { seconds: 0.1 },
            }],
        }
    }

    #[test]
    fn test_won_campaign_never_turns_into_game_over() {
        let mut game = Game::new(&settings(), short_campaign());
        let mut now = 0.0;
        win_with_bombs_in_flight(&mut game, &mut now);

        let state = game.state();
        assert!(state.won);
        assert!(state.bombs.is_empty());
        assert_eq!(state.lives, 5);
        assert!(state.running);
        assert_eq!(game.pipeline_kind(), PipelineKind::Gameplay);
    }

    #[test]
    fn test_restart_key_after_campaign_won() {
        let mut game = Game::new(&settings(), short_campaign());
        let mut now = 0.0;
        win_with_bombs_in_flight(&mut game, &mut now);
        assert!(game.state().won);

        game.input_handle().key_down(Key::Restart);
        now += 100.0;
        let state = game.frame(now);
        assert!(!state.won);
        assert_eq!(state.levels_won, 0);
        assert_eq!(state.level_name(), Some("Short"));
    }

    #[test]
    fn test_restart_frame_starts_clock_at_zero() {
        let mut game = Game::new(&settings(), storm());
        let mut now = 0.0;
        play_until_game_over(&mut game, &mut now);

        game.input_handle().key_down(Key::Restart);
        now += 100.0;
        let state = game.frame(now);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.delta_time, 0.0);

        now += 100.0;
        let state = game.frame(now);
        assert!((state.game_time - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_restart_key_ignored_while_playing() {
        let mut game = Game::new(&settings(), Campaign::default());
        game.frame(0.0);
        for i in 1..=120 {
            game.frame(f64::from(i) * FRAME_MS);
        }
        let game_time = game.state().game_time;

        game.input_handle().key_down(Key::Restart);
        let state = game.frame(121.0 * FRAME_MS);
        assert!(state.game_time > game_time);
    }

    #[test]
    fn test_toggle_debug_key() {
        let mut game = Game::new(&settings(), Campaign::default());
        let before = game.state().debug.collisions;
        game.input_handle().key_down(Key::ToggleDebug);
        let state = game.frame(0.0);
        assert_eq!(state.debug.collisions, !before);
    }

    #[test]
    fn test_detached_input_is_ignored() {
        let mut game = Game::new(&settings(), Campaign::default());
        let handle = game.input_handle();
        game.detach_input();
        assert!(!handle.pointer_moved(10.0));
        let state = game.frame(0.0);
        assert_eq!(state.input.pointer_x, None);
    }

    #[test]
    fn test_empty_campaign_still_ticks() {
        let mut game = Game::new(&settings(), Campaign { levels: Vec::new() });
        game.frame(0.0);
        let state = game.frame(1_000.0 / 4.0);
        assert!(state.level.is_none());
        assert!(state.bombs.is_empty());
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Game::new(&settings(), storm());
        let mut b = Game::new(&settings(), storm());
        for i in 0..240 {
            let now = f64::from(i) * FRAME_MS;
            a.frame(now);
            b.frame(now);
        }
        assert_eq!(a.state(), b.state());
    }
}
