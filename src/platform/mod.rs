//! Platform abstraction layer
//!
//! Handles native/browser differences for:
//! - Display-refresh scheduling (`frame`)
//! - Input events (`input`)
//! - DOM wiring on the web (`web`, wasm32 only)

pub mod frame;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame::{FrameDriver, FrameScheduler, SteppedFrames};
pub use input::{InputCell, InputHandle, Key};
