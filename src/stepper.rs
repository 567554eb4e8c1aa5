//! Fixed timestep accumulator
//!
//! The driver feeds wall-clock frame time in; whole simulation ticks come out.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{Buttons, ControlState};
use crate::sim::{GameEvent, World, tick};

/// Accumulates frame time and runs whole ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    control: ControlState,
    /// Events from every tick of the last `advance`
    events: Vec<GameEvent>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control state the next tick will consume
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Events raised by all ticks of the last `advance`, in tick order.
    ///
    /// `World::events` only holds the final tick's events.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Run as many ticks as `dt` seconds warrant. Returns the tick count.
    ///
    /// `buttons` is sampled once per tick, so an edge is seen by exactly one tick.
    pub fn advance(&mut self, world: &mut World, dt: f32, buttons: Buttons) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        self.events.clear();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.control.update(buttons);
            tick(world, &self.control);
            self.events.extend(world.events.iter().cloned());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog past the substep cap
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
