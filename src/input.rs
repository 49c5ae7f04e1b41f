//! Input query capability
//!
//! The player controller is the only consumer. The scene layer fills a
//! [`FrameInput`] from whatever device it listens to and clears the
//! edge-triggered half once per frame.

use serde::{Deserialize, Serialize};

/// Logical actions the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
}

impl Action {
    const COUNT: usize = 3;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// "Is this held" / "was this pressed this frame" queries
pub trait InputQuery {
    /// Level-triggered: true for every frame the action is held
    fn is_held(&self, action: Action) -> bool;
    /// Edge-triggered: true only on the frame the action went down
    fn was_pressed(&self, action: Action) -> bool;
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    held: [bool; Action::COUNT],
    pressed: [bool; Action::COUNT],
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. A press on an already held action is not a new edge.
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Clear one-shot edges after the frame has been processed
    pub fn end_frame(&mut self) {
        self.pressed = [false; Action::COUNT];
    }

    /// Convenience builder for tests and scripted input
    pub fn holding(actions: &[Action]) -> Self {
        let mut input = Self::new();
        for &action in actions {
            input.press(action);
        }
        input
    }
}

impl InputQuery for FrameInput {
    fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_triggered() {
        let mut input = FrameInput::new();
        input.press(Action::Fire);
        assert!(input.is_held(Action::Fire));
        assert!(input.was_pressed(Action::Fire));

        input.end_frame();
        input.press(Action::Fire); // key repeat while still held
        assert!(input.is_held(Action::Fire));
        assert!(!input.was_pressed(Action::Fire));

        input.release(Action::Fire);
        assert!(!input.is_held(Action::Fire));
    }
}
