//! Procedural row generation
//!
//! Extends the column downward one row at a time as the player descends.

use rand::Rng;

use super::block::{Block, BlockColor};
use super::state::{GameEvent, World};

/// Does the player need another row generated ahead?
pub fn needs_row(world: &World) -> bool {
    world.player.pos.iy() + world.tuning.lookahead_rows > world.last_row
}

/// Generate the next row below `last_row`. Returns the new row index.
pub fn spawn_row(world: &mut World) -> i32 {
    let row = world.last_row + 1;
    let cell = world.tuning.cell;
    let chance = world.tuning.spawn_chance;

    let mut created = Vec::new();
    for col in 0..world.tuning.grid_width as i32 {
        if !world.rng.random_bool(chance) {
            continue;
        }
        let color = BlockColor::PALETTE[world.rng.random_range(0..BlockColor::PALETTE.len())];
        let id = world.next_block_id();
        world.blocks.push(Block::new(id, col, row, color, cell));
        created.push(world.blocks.len() - 1);
    }

    if row.rem_euclid(world.tuning.star_period) == 0 {
        world.star_pending = true;
    }
    if world.star_pending && !created.is_empty() {
        let pick = created[world.rng.random_range(0..created.len())];
        world.blocks[pick].bonus = true;
        world.star_pending = false;
        log::debug!("Star block {} in row {}", world.blocks[pick].id, row);
    }

    world.last_row = row;
    world.events.push(GameEvent::RowSpawned { row });
    log::debug!("Spawned row {} ({} blocks)", row, created.len());
    row
}
