//! Fixed timestep simulation tick
//!
//! Phase order: player, blocks, match scan, row spawn, sort. Every phase
//! runs to completion before the next; nothing is observed mid-tick.

use super::block::update_blocks;
use super::player::{PlayerContext, update_player};
use super::solver::solve;
use super::spawner::{needs_row, spawn_row};
use super::state::{GameEvent, Mode, World};
use crate::input::ControlState;

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, control: &ControlState) {
    world.events.clear();

    match world.mode {
        Mode::Intro => {
            world.time_ticks += 1;
            if control.primary_pressed() {
                world.set_mode(Mode::Playing);
            }
            return;
        }
        // No update behavior defined for game over yet
        Mode::GameOver => return,
        Mode::Playing => {}
    }

    world.time_ticks += 1;
    let floor = world.floor();

    {
        let World {
            tuning,
            player,
            blocks,
            events,
            ..
        } = world;

        let ctx = PlayerContext {
            control,
            tuning,
            floor,
        };
        update_player(player, blocks, &ctx, events);
        update_blocks(blocks, player, tuning, floor, events);
    }

    let top = world.player.pos.iy() - world.tuning.lookback_rows;
    let matched = solve(
        &mut world.blocks,
        top,
        world.last_row,
        world.tuning.grid_width,
        world.tuning.solve_ticks,
        world.tuning.cell,
    );
    if !matched.is_empty() {
        world.events.push(GameEvent::MatchFound { ids: matched });
    }

    if needs_row(world) {
        spawn_row(world);
    }

    world.normalize_order();
}
