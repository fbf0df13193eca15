//! Latest-input slot
//!
//! Event handlers write into the slot through `InputHandle`s whenever events
//! arrive; the game reads it once per tick. Between ticks the last value wins.
//! Detaching the cell turns every outstanding handle into a no-op.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::sim::InputSnapshot;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Restart,
    ToggleDebug,
    Other,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "r" | "R" | "Enter" => Key::Restart,
            "d" | "D" => Key::ToggleDebug,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    pointer_x: Option<f32>,
    key: Option<Key>,
}

/// Writer side of the input slot, handed to event listeners
#[derive(Debug, Clone)]
pub struct InputHandle {
    slot: Weak<Cell<Slot>>,
}

impl InputHandle {
    /// Record a pointer move; false once the game has been torn down
    pub fn pointer_moved(&self, x: f32) -> bool {
        self.update(|slot| slot.pointer_x = Some(x))
    }

    /// Record a key press; false once the game has been torn down
    pub fn key_down(&self, key: Key) -> bool {
        self.update(|slot| slot.key = Some(key))
    }

    pub fn is_attached(&self) -> bool {
        self.slot.strong_count() > 0
    }

    fn update(&self, f: impl FnOnce(&mut Slot)) -> bool {
        let Some(cell) = self.slot.upgrade() else {
            return false;
        };
        let mut slot = cell.get();
        f(&mut slot);
        cell.set(slot);
        true
    }
}

/// Reader side of the input slot, owned by the game
#[derive(Debug, Default)]
pub struct InputCell {
    slot: Rc<Cell<Slot>>,
}

impl InputCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> InputHandle {
        InputHandle {
            slot: Rc::downgrade(&self.slot),
        }
    }

    /// Read the slot for this tick: the pointer persists, the key is consumed
    pub fn take(&self) -> (InputSnapshot, Option<Key>) {
        let mut slot = self.slot.get();
        let key = slot.key.take();
        self.slot.set(slot);
        (
            InputSnapshot {
                pointer_x: slot.pointer_x,
            },
            key,
        )
    }

    /// Replace the slot; every handle given out so far stops writing
    pub fn detach(&mut self) {
        self.slot = Rc::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let cell = InputCell::new();
        let handle = cell.handle();
        assert!(handle.pointer_moved(10.0));
        assert!(handle.pointer_moved(20.0));
        assert!(handle.pointer_moved(30.0));

        let (snapshot, key) = cell.take();
        assert_eq!(snapshot.pointer_x, Some(30.0));
        assert_eq!(key, None);
    }

    #[test]
    fn test_pointer_persists_key_is_one_shot() {
        let cell = InputCell::new();
        let handle = cell.handle();
        handle.pointer_moved(42.0);
        handle.key_down(Key::ToggleDebug);

        let (snapshot, key) = cell.take();
        assert_eq!(snapshot.pointer_x, Some(42.0));
        assert_eq!(key, Some(Key::ToggleDebug));

        let (snapshot, key) = cell.take();
        assert_eq!(snapshot.pointer_x, Some(42.0));
        assert_eq!(key, None);
    }

    #[test]
    fn test_detached_handles_are_inert() {
        let mut cell = InputCell::new();
        let handle = cell.handle();
        cell.detach();

        assert!(!handle.is_attached());
        assert!(!handle.pointer_moved(99.0));
        assert!(!handle.key_down(Key::Restart));
        assert_eq!(cell.take(), (InputSnapshot::default(), None));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("r"), Key::Restart);
        assert_eq!(Key::from_key_name("Enter"), Key::Restart);
        assert_eq!(Key::from_key_name("D"), Key::ToggleDebug);
        assert_eq!(Key::from_key_name("ArrowLeft"), Key::Other);
    }
}
