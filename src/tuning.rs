//! Game tuning constants
//!
//! Data-driven balance values. Loaded from JSON when a file is supplied,
//! otherwise the defaults below are the canonical game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation constants (all speeds are pixels per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Grid ===
    /// Cell side length
    pub cell: f32,
    /// Playfield width in cells
    pub grid_width: usize,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal walk speed
    pub move_speed: f32,
    /// Base fall speed (doubled while down is held)
    pub fall_speed: f32,
    /// Peak upward speed at the start of a jump
    pub jump_speed: f32,
    /// Jump duration in ticks
    pub jump_ticks: u32,
    /// Residual jump window after walking off a ledge
    pub grace_ticks: u32,
    /// Wall-ride timer refresh while pushing into the wall
    pub wallride_ticks: u32,
    /// Downward drift while wall-riding
    pub wallride_drift: f32,
    /// Push toward the wall while wall-riding
    pub wall_push: f32,
    /// Upward drift while floating out of a block
    pub float_speed: f32,
    /// Floating state timer (visual bob)
    pub float_ticks: u32,
    /// Ground probe distance
    pub probe: f32,
    /// Carry capacity
    pub max_carry: usize,

    // === Blocks ===
    /// Gravity step for ground/falling blocks
    pub block_fall_speed: f32,
    /// Downward speed of a thrown block
    pub throw_speed: f32,
    /// Ticks a matched block lingers before removal
    pub solve_ticks: u32,
    /// Visual transition length after a state change
    pub transition_ticks: u32,

    // === Rows ===
    /// Chance that a spawned row cell holds a block
    pub spawn_chance: f64,
    /// Every Nth row gets a star block
    pub star_period: i32,
    /// Rows generated ahead of the player
    pub lookahead_rows: i32,
    /// Rows above the player included in match scans
    pub lookback_rows: i32,
    /// First generated row (rows above stay empty for the drop-in)
    pub first_row: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell: CELL,
            grid_width: GRID_WIDTH,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            move_speed: 1.5,
            fall_speed: 2.5,
            jump_speed: 4.0,
            jump_ticks: 24,
            grace_ticks: 6,
            wallride_ticks: 8,
            wallride_drift: 0.5,
            wall_push: 0.5,
            float_speed: 1.0,
            float_ticks: 16,
            probe: 1.0,
            max_carry: MAX_CARRY,

            block_fall_speed: 3.0,
            throw_speed: 6.0,
            solve_ticks: 30,
            transition_ticks: 8,

            spawn_chance: 0.6,
            star_period: 10,
            lookahead_rows: 12,
            lookback_rows: 8,
            first_row: 3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::validate)
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Invalid tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read tuning file {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Clamp values the simulation relies on.
    ///
    /// The collision resolver only handles per-tick movement below one cell,
    /// so every speed is capped just under `cell`.
    pub fn validate(mut self) -> Self {
        // Player box and speeds are clamped under `cell - 1`, which must stay positive
        if self.cell.is_nan() || self.cell < 2.0 {
            log::warn!("Tuning cell size {} too small, using {}", self.cell, CELL);
            self.cell = CELL;
        }
        if self.grid_width < 3 {
            log::warn!("Tuning grid width {} too small, using 3", self.grid_width);
            self.grid_width = 3;
        }
        if self.max_carry == 0 {
            log::warn!("Tuning carry capacity 0, using 1");
            self.max_carry = 1;
        }
        if self.star_period <= 0 {
            self.star_period = 1;
        }
        self.player_width = self.player_width.clamp(1.0, self.cell - 1.0);
        self.player_height = self.player_height.clamp(1.0, self.cell - 1.0);

        let cap = self.cell - 1.0;
        for (name, speed) in [
            ("move_speed", &mut self.move_speed),
            ("jump_speed", &mut self.jump_speed),
            ("float_speed", &mut self.float_speed),
            ("block_fall_speed", &mut self.block_fall_speed),
            ("throw_speed", &mut self.throw_speed),
            ("wallride_drift", &mut self.wallride_drift),
            ("wall_push", &mut self.wall_push),
            ("probe", &mut self.probe),
        ] {
            if *speed > cap {
                log::warn!("Tuning {} {} exceeds one cell, clamped to {}", name, speed, cap);
                *speed = cap;
            }
        }
        // Down doubles the fall speed
        if self.fall_speed * 2.0 > cap {
            log::warn!("Tuning fall_speed {} too fast, clamped", self.fall_speed);
            self.fall_speed = cap / 2.0;
        }
        self.spawn_chance = self.spawn_chance.clamp(0.0, 1.0);
        self
    }

    /// Playfield width in pixels
    pub fn world_width(&self) -> f32 {
        self.grid_width as f32 * self.cell
    }
}
