//! Block entities and their lifecycle
//!
//! idle -> lifted -> thrown -> ground <-> falling -> solving -> removed

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, Bounds, Rect, move_with_nudge};
use super::coords::Position;
use super::player::Player;
use super::state::GameEvent;
use crate::Tuning;

/// Block colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockColor {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BlockColor {
    /// Colors the row spawner draws from
    pub const PALETTE: [BlockColor; 5] = [
        BlockColor::Red,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
        BlockColor::Purple,
    ];
}

/// Block lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    /// Resting terrain, never moves on its own
    Idle,
    /// Carried above the player
    Lifted,
    /// Launched downward by the player
    Thrown,
    /// Settled on a block or the floor
    Ground,
    /// Descending under gravity
    Falling,
    /// Matched; removed when the timer runs out
    Solving { timer: u32 },
}

impl BlockState {
    /// Collides with other blocks and the player, and can be picked up
    pub fn is_pickable(&self) -> bool {
        matches!(
            self,
            BlockState::Idle | BlockState::Ground | BlockState::Falling | BlockState::Solving { .. }
        )
    }

    /// Occupies space for other blocks' movement (pickable or in flight)
    pub fn is_solid(&self) -> bool {
        self.is_pickable() || *self == BlockState::Thrown
    }

    /// Can take part in a color streak
    pub fn is_solvable(&self) -> bool {
        matches!(
            self,
            BlockState::Idle | BlockState::Ground | BlockState::Solving { .. }
        )
    }

    /// A streak needs at least one resting member to be accepted
    pub fn is_resting(&self) -> bool {
        matches!(self, BlockState::Ground | BlockState::Solving { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockState::Idle => "idle",
            BlockState::Lifted => "lifted",
            BlockState::Thrown => "thrown",
            BlockState::Ground => "ground",
            BlockState::Falling => "falling",
            BlockState::Solving { .. } => "solving",
        }
    }
}

/// A block entity
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    /// Monotonic, never reused
    pub id: u32,
    pub pos: Position,
    pub color: BlockColor,
    pub state: BlockState,
    /// Star block (visual/scoring only)
    pub bonus: bool,
    /// Rectangle before the last state change, for animated transitions
    pub prev_rect: Option<Rect>,
    /// Ticks since the last state change, capped at the transition length
    pub transition: u32,
}

impl Block {
    /// New idle block centered in cell `(ix, iy)`
    pub fn new(id: u32, ix: i32, iy: i32, color: BlockColor, cell: f32) -> Self {
        Self {
            id,
            pos: Position::at_cell(ix, iy, cell),
            color,
            state: BlockState::Idle,
            bonus: false,
            prev_rect: None,
            transition: 0,
        }
    }

    pub fn rect(&self, cell: f32) -> Rect {
        Rect::centered(self.pos.vec(), Vec2::splat(cell))
    }

    /// Enter a new state, remembering where the block was drawn before
    pub fn set_state(&mut self, state: BlockState, cell: f32) {
        if std::mem::discriminant(&state) != std::mem::discriminant(&self.state) {
            self.prev_rect = Some(self.rect(cell));
            self.transition = 0;
        }
        self.state = state;
    }

    /// Mark as matched. Idempotent: an already solving block keeps its timer.
    ///
    /// Returns `true` if the block was not solving before.
    pub fn start_solving(&mut self, ticks: u32, cell: f32) -> bool {
        if matches!(self.state, BlockState::Solving { .. }) {
            return false;
        }
        self.set_state(BlockState::Solving { timer: ticks }, cell);
        true
    }

    /// Snap to the center of the current cell row after landing
    fn settle(&mut self, cell: f32) {
        let y = crate::cell_center(self.pos.iy(), cell);
        self.pos.set(self.pos.x(), y, cell);
    }
}

/// Result of asking what sits in a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellProbe {
    /// Outside the playfield columns
    Blocked,
    /// Holds the pickable block at this index
    Occupied(usize),
    Empty,
}

/// Look up the pickable block occupying cell `(ix, iy)`
pub fn probe_cell(blocks: &[Block], ix: i32, iy: i32, grid_width: usize) -> CellProbe {
    if ix < 0 || ix >= grid_width as i32 {
        return CellProbe::Blocked;
    }
    blocks
        .iter()
        .position(|b| b.state.is_pickable() && b.pos.ix() == ix && b.pos.iy() == iy)
        .map_or(CellProbe::Empty, CellProbe::Occupied)
}

/// Try to move block `index` down by `dy` against the other solid blocks
fn step_down(blocks: &[Block], index: usize, dy: f32, floor: f32, cell: f32) -> (Position, bool) {
    let mut pos = blocks[index].pos;
    let obstacles = blocks
        .iter()
        .enumerate()
        .filter(|&(j, b)| j != index && b.state.is_solid())
        .map(|(_, b)| b.rect(cell));
    let bounds = Bounds {
        walls: None,
        floor: Some(floor),
    };
    let moved = move_with_nudge(
        &mut pos,
        Vec2::splat(cell),
        Axis::Vertical,
        dy,
        obstacles,
        &bounds,
        cell,
    );
    (pos, moved)
}

/// Advance every block one tick.
///
/// Removals are collected and applied after the pass so indices stay valid.
pub fn update_blocks(
    blocks: &mut Vec<Block>,
    player: &mut Player,
    tuning: &Tuning,
    floor: f32,
    events: &mut Vec<GameEvent>,
) {
    let cell = tuning.cell;
    let mut expired = Vec::new();

    for index in 0..blocks.len() {
        match blocks[index].state {
            BlockState::Idle => {}

            BlockState::Lifted => {
                let id = blocks[index].id;
                match player.carried.iter().position(|&c| c == id) {
                    Some(slot) => {
                        let (x, y) = player.carry_anchor(slot, tuning);
                        blocks[index].pos.set(x, y, cell);
                    }
                    // Orphaned (not in the carry list): drop it
                    None => blocks[index].set_state(BlockState::Falling, cell),
                }
            }

            BlockState::Thrown => {
                let (pos, moved) = step_down(blocks, index, tuning.throw_speed, floor, cell);
                let block = &mut blocks[index];
                block.pos = pos;
                if !moved {
                    if block.rect(cell).overlaps(&player.rect()) {
                        player.start_floating(tuning);
                    }
                    block.settle(cell);
                    block.set_state(BlockState::Ground, cell);
                    events.push(GameEvent::BlockLanded { id: block.id });
                }
            }

            BlockState::Ground => {
                let (pos, moved) = step_down(blocks, index, tuning.block_fall_speed, floor, cell);
                let block = &mut blocks[index];
                block.pos = pos;
                if moved {
                    block.set_state(BlockState::Falling, cell);
                }
            }

            BlockState::Falling => {
                let (pos, moved) = step_down(blocks, index, tuning.block_fall_speed, floor, cell);
                let block = &mut blocks[index];
                block.pos = pos;
                if !moved {
                    block.settle(cell);
                    block.set_state(BlockState::Ground, cell);
                    events.push(GameEvent::BlockLanded { id: block.id });
                }
            }

            BlockState::Solving { timer } => {
                let timer = timer.saturating_sub(1);
                if timer == 0 {
                    expired.push(blocks[index].id);
                } else {
                    blocks[index].state = BlockState::Solving { timer };
                }
            }
        }

        let block = &mut blocks[index];
        block.transition = (block.transition + 1).min(tuning.transition_ticks);
    }

    if !expired.is_empty() {
        blocks.retain(|b| !expired.contains(&b.id));
        for id in expired {
            log::debug!("Block {} removed", id);
            events.push(GameEvent::BlockRemoved { id });
        }
    }
}
