//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (blocks by descending row)
//! - No rendering or platform dependencies

pub mod block;
pub mod collision;
pub mod coords;
pub mod player;
pub mod solver;
pub mod spawner;
pub mod state;
pub mod tick;

pub use block::{Block, BlockColor, BlockState, CellProbe, probe_cell};
pub use collision::{Axis, Bounds, Rect, move_with_nudge};
pub use coords::Position;
pub use player::{Player, PlayerState, Side};
pub use solver::solve;
pub use spawner::spawn_row;
pub use state::{BlockView, GameEvent, Mode, PlayerView, Snapshot, World};
pub use tick::tick;
