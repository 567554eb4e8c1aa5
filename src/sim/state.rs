//! World state and core simulation types
//!
//! `World` owns everything a tick touches: player, blocks, clock, RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::{Block, BlockColor, BlockState};
use super::collision::Rect;
use super::coords::Position;
use super::player::Player;
use crate::Tuning;
use crate::consts::CAMERA_OFFSET;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen, waiting for the primary action
    Intro,
    /// Active gameplay
    Playing,
    /// No entry condition yet; ticks do nothing here
    GameOver,
}

/// Things that happened during the last tick (for renderer/audio)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    ModeChanged { mode: Mode },
    RowSpawned { row: i32 },
    BlockLifted { id: u32 },
    BlockThrown { id: u32 },
    BlockLanded { id: u32 },
    MatchFound { ids: Vec<u32> },
    BlockRemoved { id: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub mode: Mode,
    /// Run seed
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Blocks, ordered by descending row after every tick
    pub blocks: Vec<Block>,
    /// Lowest generated row
    pub last_row: i32,
    /// Star owed to the next non-empty row
    pub(crate) star_pending: bool,
    /// Events from the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// New run: player above the column, rows generated ahead, intro mode
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validate();
        let last_row = tuning.first_row - 1;
        let mut world = Self::blank(seed, tuning, last_row);
        world.mode = Mode::Intro;

        while super::spawner::needs_row(&world) {
            super::spawner::spawn_row(&mut world);
        }
        world.events.clear();

        log::info!(
            "World created (seed {}, {} blocks through row {})",
            seed,
            world.blocks.len(),
            world.last_row
        );
        world
    }

    /// Playing world with no blocks and rows generated through `last_row`
    pub fn empty(tuning: Tuning, last_row: i32) -> Self {
        Self::blank(0, tuning.validate(), last_row)
    }

    fn blank(seed: u64, tuning: Tuning, last_row: i32) -> Self {
        let start = Position::new(
            tuning.world_width() / 2.0,
            crate::cell_center(0, tuning.cell),
            tuning.cell,
        );
        Self {
            player: Player::new(start, &tuning),
            tuning,
            mode: Mode::Playing,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            blocks: Vec::new(),
            last_row,
            star_pending: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new block id
    pub fn next_block_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a block in cell `(ix, iy)`. Returns its id.
    pub fn insert_block(&mut self, ix: i32, iy: i32, color: BlockColor, state: BlockState) -> u32 {
        let id = self.next_block_id();
        let mut block = Block::new(id, ix, iy, color, self.tuning.cell);
        block.state = state;
        self.blocks.push(block);
        id
    }

    pub fn block(&self, id: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Bottom edge of the generated world
    pub fn floor(&self) -> f32 {
        (self.last_row + 1) as f32 * self.tuning.cell
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.events.push(GameEvent::ModeChanged { mode });
        }
    }

    /// Camera top-left, following the player down the column
    pub fn camera(&self) -> Vec2 {
        Vec2::new(0.0, (self.player.pos.y() - CAMERA_OFFSET).max(0.0))
    }

    /// Stable ordering for the next tick: descending row
    pub fn normalize_order(&mut self) {
        self.blocks.sort_by_key(|b| std::cmp::Reverse(b.pos.iy()));
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let cell = self.tuning.cell;
        Snapshot {
            mode: self.mode,
            tick: self.time_ticks,
            camera: self.camera(),
            player: PlayerView {
                pos: self.player.pos.vec(),
                size: self.player.size,
                state: self.player.state.name(),
                timer: self.player.state.timer(),
                carried: self.player.carried.len(),
            },
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockView {
                    id: b.id,
                    pos: b.pos.vec(),
                    cell: (b.pos.ix(), b.pos.iy()),
                    rect: b.rect(cell),
                    color: b.color,
                    state: b.state.name(),
                    bonus: b.bonus,
                    prev_rect: b.prev_rect,
                    transition: b.transition,
                })
                .collect(),
        }
    }
}

/// Player as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub state: &'static str,
    pub timer: u32,
    pub carried: usize,
}

/// Block as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    pub id: u32,
    pub pos: Vec2,
    pub cell: (i32, i32),
    pub rect: Rect,
    pub color: BlockColor,
    pub state: &'static str,
    pub bonus: bool,
    pub prev_rect: Option<Rect>,
    pub transition: u32,
}

/// Per-frame snapshot handed to the rendering collaborator
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub tick: u64,
    pub camera: Vec2,
    pub player: PlayerView,
    pub blocks: Vec<BlockView>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
