//! Bucket Bomber entry point
//!
//! Native: runs a headless autopilot session through the frame scheduler and
//! prints the final snapshot as JSON. Web: the library exports `WebGame`.
//!
//! Usage: `bucket-bomber [settings.json] [campaign.json]`

#[cfg(not(target_arch = "wasm32"))]
use bucket_bomber::{
    Campaign, Game, Settings,
    platform::{FrameScheduler, SteppedFrames},
    sim::GameState,
};

/// Simulated display refresh (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Give up after five minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bucket Bomber (native autopilot) starting...");

    let mut args = std::env::args().skip(1);
    let settings = args
        .next()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let campaign = args
        .next()
        .map(Campaign::load_or_default)
        .unwrap_or_default();
    log::info!(
        "Field {}x{}, {} levels",
        settings.field.width,
        settings.field.height,
        campaign.len()
    );

    let game = Game::new(&settings, campaign);
    let input = game.input_handle();
    let mut scheduler = FrameScheduler::new(SteppedFrames::default(), game);
    scheduler.start();

    let mut now = 0.0;
    let mut frames = 0;
    while scheduler.is_scheduled() && frames < MAX_FRAMES {
        if let Some(x) = autopilot_target(scheduler.game().state()) {
            input.pointer_moved(x);
        }
        now += FRAME_MS;
        frames += 1;

        let Some(state) = scheduler.on_frame(now) else {
            break;
        };
        if state.won || state.is_game_over() {
            break;
        }
    }

    let state = scheduler.game().state();
    log::info!(
        "Finished after {:.1}s: {} lives, {} levels won{}",
        state.game_time,
        state.lives,
        state.levels_won,
        if state.won { ", campaign complete" } else { "" }
    );
    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize final state: {}", e),
    }

    scheduler.teardown();
}

/// Steer toward the falling bomb closest to the ground
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_target(state: &GameState) -> Option<f32> {
    state
        .bombs
        .iter()
        .filter(|b| b.is_falling())
        .max_by(|a, b| {
            a.sprite
                .y
                .partial_cmp(&b.sprite.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.sprite.center().x)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `WebGame` in the library, this is just to satisfy the compiler
}
