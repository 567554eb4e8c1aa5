//! Block Descent - a vertically scrolling block-matching platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, collisions, player, blocks, matching)
//! - `input`: Per-tick control-state record
//! - `stepper`: Fixed-step accumulator for the surrounding driver
//! - `tuning`: Data-driven game constants

pub mod input;
pub mod sim;
pub mod stepper;
pub mod tuning;

pub use input::{Buttons, ControlState};
pub use stepper::FixedStep;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Side length of one grid cell (pixels)
    pub const CELL: f32 = 16.0;
    /// Playfield width in cells
    pub const GRID_WIDTH: usize = 9;

    /// Player collision box
    pub const PLAYER_WIDTH: f32 = 10.0;
    pub const PLAYER_HEIGHT: f32 = 14.0;

    /// Maximum number of carried blocks
    pub const MAX_CARRY: usize = 4;

    /// Vertical screen offset of the player from the camera top
    pub const CAMERA_OFFSET: f32 = 64.0;
}

/// Grid cell index containing a continuous coordinate
#[inline]
pub fn cell_index(coord: f32, cell: f32) -> i32 {
    (coord / cell).floor() as i32
}

/// Continuous coordinate of the center of a grid cell
#[inline]
pub fn cell_center(index: i32, cell: f32) -> f32 {
    index as f32 * cell + cell / 2.0
}
