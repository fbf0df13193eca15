//! Frame scheduling
//!
//! `FrameScheduler` drives a `Game` once per display refresh. It holds at most
//! one pending frame request; teardown cancels it and detaches input, and runs
//! on drop so no scheduled callback outlives the scheduler.

use crate::game::Game;
use crate::sim::GameState;

/// Source of display-refresh callbacks
pub trait FrameDriver {
    type Handle;

    /// Ask for one callback on the next refresh
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Scoped game loop over a `FrameDriver`
pub struct FrameScheduler<D: FrameDriver> {
    driver: D,
    pending: Option<D::Handle>,
    game: Game,
    torn_down: bool,
}

impl<D: FrameDriver> FrameScheduler<D> {
    pub fn new(driver: D, game: Game) -> Self {
        Self {
            driver,
            pending: None,
            game,
            torn_down: false,
        }
    }

    /// Request the first frame
    pub fn start(&mut self) {
        if self.pending.is_none() && !self.torn_down {
            self.schedule();
        }
    }

    /// Run one frame and ask for the next; `None` after teardown
    pub fn on_frame(&mut self, now_ms: f64) -> Option<&GameState> {
        self.pending = None;
        if self.torn_down {
            return None;
        }
        self.game.frame(now_ms);
        self.schedule();
        Some(self.game.state())
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Cancel the pending frame and stop listening to input. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(handle) = self.pending.take() {
            self.driver.cancel_frame(handle);
        }
        self.game.detach_input();
        log::info!("Frame loop torn down");
    }

    fn schedule(&mut self) {
        self.pending = self.driver.request_frame();
        if self.pending.is_none() {
            log::error!("Display refused a frame request, loop stopped");
        }
    }
}

impl<D: FrameDriver> Drop for FrameScheduler<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Native driver: the caller pumps frames, requests are numbered
#[derive(Debug, Default)]
pub struct SteppedFrames {
    next_id: u64,
    /// Request waiting to be serviced
    pub outstanding: Option<u64>,
    /// Requests withdrawn by the scheduler
    pub cancelled: Vec<u64>,
}

impl FrameDriver for SteppedFrames {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.outstanding = Some(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.cancelled.push(handle);
    }
}
