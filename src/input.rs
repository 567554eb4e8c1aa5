//! Control-state record consumed once per simulation tick
//!
//! Each channel counts how long its button has been held: 0 released,
//! 1 on the tick it was first pressed, then increasing while held.

use serde::{Deserialize, Serialize};

/// Raw button levels as sampled by the input collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start / lift
    pub primary: bool,
    /// Throw
    pub secondary: bool,
}

/// Per-tick control state (six held-duration counters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
    pub primary: u32,
    pub secondary: u32,
}

#[inline]
fn advance(counter: &mut u32, level: bool) {
    *counter = if level { counter.saturating_add(1) } else { 0 };
}

impl ControlState {
    /// Advance the counters from the latest raw button levels
    pub fn update(&mut self, buttons: Buttons) {
        advance(&mut self.up, buttons.up);
        advance(&mut self.down, buttons.down);
        advance(&mut self.left, buttons.left);
        advance(&mut self.right, buttons.right);
        advance(&mut self.primary, buttons.primary);
        advance(&mut self.secondary, buttons.secondary);
    }

    pub fn up_held(&self) -> bool {
        self.up > 0
    }

    pub fn up_pressed(&self) -> bool {
        self.up == 1
    }

    pub fn down_held(&self) -> bool {
        self.down > 0
    }

    pub fn primary_pressed(&self) -> bool {
        self.primary == 1
    }

    pub fn secondary_pressed(&self) -> bool {
        self.secondary == 1
    }

    /// Horizontal intent: -1 left, +1 right, 0 none or both
    pub fn horizontal(&self) -> i32 {
        match (self.left > 0, self.right > 0) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}
