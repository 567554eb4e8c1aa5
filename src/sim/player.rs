//! Player entity and movement state machine
//!
//! Six states: ground, jumping, falling, wallride, walljumping, floating.
//! Each handler returns the next state; `Player::enter` applies it.

use glam::Vec2;
use serde::Serialize;

use super::block::{Block, BlockState, CellProbe, probe_cell};
use super::collision::{Axis, Bounds, Rect, first_overlap, move_with_nudge};
use super::coords::Position;
use super::state::GameEvent;
use crate::Tuning;
use crate::input::ControlState;

/// Horizontal side, used for wall contact and wall jumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side matching a horizontal input sign
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign.signum() {
            -1 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Ground,
    /// Upward impulse decaying with the timer
    Jumping { timer: u32 },
    /// `grace` > 0 right after walking off a ledge still allows a jump
    Falling { grace: u32 },
    /// Clinging to a wall on `wall`
    WallRide { wall: Side, timer: u32 },
    /// Jumping off a wall toward `away`
    WallJumping { away: Side, timer: u32 },
    /// Drifting up out of a block
    Floating { timer: u32 },
}

impl PlayerState {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerState::Ground => "ground",
            PlayerState::Jumping { .. } => "jumping",
            PlayerState::Falling { .. } => "falling",
            PlayerState::WallRide { .. } => "wallride",
            PlayerState::WallJumping { .. } => "walljumping",
            PlayerState::Floating { .. } => "floating",
        }
    }

    /// State-local countdown
    pub fn timer(&self) -> u32 {
        match *self {
            PlayerState::Ground => 0,
            PlayerState::Jumping { timer }
            | PlayerState::WallRide { timer, .. }
            | PlayerState::WallJumping { timer, .. }
            | PlayerState::Floating { timer } => timer,
            PlayerState::Falling { grace } => grace,
        }
    }

    /// Wall side while wall-riding or wall-jumping
    pub fn wall_side(&self) -> Option<Side> {
        match *self {
            PlayerState::WallRide { wall, .. } => Some(wall),
            PlayerState::WallJumping { away, .. } => Some(away),
            _ => None,
        }
    }

    fn jumping(tuning: &Tuning) -> Self {
        PlayerState::Jumping {
            timer: tuning.jump_ticks,
        }
    }

    fn falling() -> Self {
        PlayerState::Falling { grace: 0 }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Position,
    pub size: Vec2,
    /// Horizontal walk speed
    pub speed: f32,
    pub state: PlayerState,
    /// Carried block ids, oldest first
    pub carried: Vec<u32>,
}

impl Player {
    pub fn new(pos: Position, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.move_speed,
            state: PlayerState::falling(),
            carried: Vec::with_capacity(tuning.max_carry),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos.vec(), self.size)
    }

    /// Where carried block `slot` is held: stacked upward from the head
    pub fn carry_anchor(&self, slot: usize, tuning: &Tuning) -> (f32, f32) {
        let head = self.pos.y() - self.size.y / 2.0;
        let y = head - tuning.cell / 2.0 - slot as f32 * tuning.cell;
        (self.pos.x(), y)
    }

    /// Forced upward out of a block that landed on top of us
    pub fn start_floating(&mut self, tuning: &Tuning) {
        self.enter(PlayerState::Floating {
            timer: tuning.float_ticks,
        });
    }

    /// Apply a state transition
    fn enter(&mut self, next: PlayerState) {
        if next.name() != self.state.name() {
            log::trace!("Player {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }
}

/// Everything a player step reads besides the player itself
pub struct PlayerContext<'a> {
    pub control: &'a ControlState,
    pub tuning: &'a Tuning,
    pub floor: f32,
}

/// Move the player along one axis against the walls and pickable blocks
fn try_move(player: &mut Player, blocks: &[Block], axis: Axis, delta: f32, ctx: &PlayerContext) -> bool {
    let cell = ctx.tuning.cell;
    let obstacles = blocks
        .iter()
        .filter(|b| b.state.is_pickable())
        .map(|b| b.rect(cell));
    let bounds = Bounds {
        walls: Some((0.0, ctx.tuning.world_width())),
        floor: Some(ctx.floor),
    };
    move_with_nudge(&mut player.pos, player.size, axis, delta, obstacles, &bounds, cell)
}

/// Is the player overlapping a block accepted by `filter`?
fn overlapping(player: &Player, blocks: &[Block], tuning: &Tuning, filter: impl Fn(&BlockState) -> bool) -> bool {
    let rect = player.rect();
    let obstacles = blocks
        .iter()
        .filter(|b| filter(&b.state))
        .map(|b| b.rect(tuning.cell));
    first_overlap(&rect, obstacles).is_some()
}

/// Is the player standing on, or inside, a block in state `Ground`?
fn on_ground_block(player: &Player, blocks: &[Block], tuning: &Tuning) -> bool {
    let rect = player.rect();
    blocks
        .iter()
        .filter(|b| b.state == BlockState::Ground)
        .any(|b| rect.overlaps_or_stacked(&b.rect(tuning.cell)))
}

/// Horizontal input movement. Returns the attempted side and whether it moved.
fn walk(player: &mut Player, blocks: &[Block], ctx: &PlayerContext) -> Option<(Side, bool)> {
    let side = Side::from_sign(ctx.control.horizontal())?;
    let moved = try_move(player, blocks, Axis::Horizontal, side.sign() as f32 * player.speed, ctx);
    Some((side, moved))
}

/// Upward speed for a jump with `timer` ticks left
fn jump_velocity(timer: u32, tuning: &Tuning) -> f32 {
    -tuning.jump_speed * timer as f32 / tuning.jump_ticks.max(1) as f32
}

/// Pick up the block directly underfoot
fn lift(player: &mut Player, blocks: &mut [Block], tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if player.carried.len() >= tuning.max_carry {
        return;
    }
    let below = probe_cell(blocks, player.pos.ix(), player.pos.iy() + 1, tuning.grid_width);
    if let CellProbe::Occupied(index) = below {
        let block = &mut blocks[index];
        block.set_state(BlockState::Lifted, tuning.cell);
        player.carried.push(block.id);
        log::debug!("Lifted block {} ({} carried)", block.id, player.carried.len());
        events.push(GameEvent::BlockLifted { id: block.id });
    }
}

/// Throw the oldest carried block straight down from the player's cell.
///
/// Returns `true` if a block was thrown. Nothing happens while another
/// block still reaches into that cell.
fn throw(player: &mut Player, blocks: &mut [Block], tuning: &Tuning, events: &mut Vec<GameEvent>) -> bool {
    if player.carried.is_empty() {
        return false;
    }
    let target = Position::at_cell(player.pos.ix(), player.pos.iy(), tuning.cell);
    let landing = Rect::centered(target.vec(), Vec2::splat(tuning.cell));
    let obstacles = blocks
        .iter()
        .filter(|b| b.state.is_solid())
        .map(|b| b.rect(tuning.cell));
    if first_overlap(&landing, obstacles).is_some() {
        return false;
    }

    let id = player.carried.remove(0);
    if let Some(block) = blocks.iter_mut().find(|b| b.id == id) {
        block.set_state(BlockState::Thrown, tuning.cell);
        block.pos = target;
        log::debug!("Threw block {} from ({}, {})", id, player.pos.ix(), player.pos.iy());
        events.push(GameEvent::BlockThrown { id });
    }
    true
}

fn update_ground(player: &mut Player, blocks: &mut [Block], ctx: &PlayerContext, events: &mut Vec<GameEvent>) -> PlayerState {
    let tuning = ctx.tuning;
    if on_ground_block(player, blocks, tuning) {
        return PlayerState::Floating {
            timer: tuning.float_ticks,
        };
    }

    walk(player, blocks, ctx);

    if try_move(player, blocks, Axis::Vertical, tuning.probe, ctx) {
        return PlayerState::Falling {
            grace: tuning.grace_ticks,
        };
    }

    if ctx.control.primary_pressed() {
        lift(player, blocks, tuning, events);
    }
    if ctx.control.secondary_pressed() && throw(player, blocks, tuning, events) {
        return PlayerState::jumping(tuning);
    }
    if ctx.control.up_held() {
        return PlayerState::jumping(tuning);
    }
    PlayerState::Ground
}

fn update_jumping(
    player: &mut Player,
    blocks: &mut [Block],
    timer: u32,
    ctx: &PlayerContext,
    events: &mut Vec<GameEvent>,
) -> PlayerState {
    let tuning = ctx.tuning;
    if overlapping(player, blocks, tuning, |s| *s == BlockState::Falling) {
        return PlayerState::Floating {
            timer: tuning.float_ticks,
        };
    }

    walk(player, blocks, ctx);

    if ctx.control.secondary_pressed() && throw(player, blocks, tuning, events) {
        return PlayerState::jumping(tuning);
    }

    let moved = try_move(player, blocks, Axis::Vertical, jump_velocity(timer, tuning), ctx);
    let timer = timer.saturating_sub(1);
    if !moved || timer == 0 {
        return PlayerState::falling();
    }
    PlayerState::Jumping { timer }
}

fn update_falling(
    player: &mut Player,
    blocks: &mut [Block],
    grace: u32,
    ctx: &PlayerContext,
    events: &mut Vec<GameEvent>,
) -> PlayerState {
    let tuning = ctx.tuning;
    if overlapping(player, blocks, tuning, |s| *s == BlockState::Falling) {
        return PlayerState::Floating {
            timer: tuning.float_ticks,
        };
    }

    if ctx.control.secondary_pressed() && throw(player, blocks, tuning, events) {
        return PlayerState::jumping(tuning);
    }

    // Late jump just after leaving a ledge
    if grace > 0 && ctx.control.up_held() {
        return PlayerState::jumping(tuning);
    }

    if let Some((side, false)) = walk(player, blocks, ctx) {
        return PlayerState::WallRide { wall: side, timer: 0 };
    }

    let speed = if ctx.control.down_held() {
        tuning.fall_speed * 2.0
    } else {
        tuning.fall_speed
    };
    if !try_move(player, blocks, Axis::Vertical, speed, ctx) {
        return PlayerState::Ground;
    }

    PlayerState::Falling {
        grace: grace.saturating_sub(1),
    }
}

fn update_wallride(player: &mut Player, blocks: &[Block], wall: Side, timer: u32, ctx: &PlayerContext) -> PlayerState {
    let tuning = ctx.tuning;
    let timer = if ctx.control.horizontal() == wall.sign() {
        tuning.wallride_ticks
    } else {
        timer.saturating_sub(1)
    };
    if timer == 0 {
        return PlayerState::falling();
    }

    if ctx.control.up_pressed() {
        return PlayerState::WallJumping {
            away: wall.flip(),
            timer: tuning.jump_ticks,
        };
    }

    if !try_move(player, blocks, Axis::Vertical, tuning.wallride_drift, ctx) {
        return PlayerState::Ground;
    }

    // Wall ended: slide off
    if try_move(player, blocks, Axis::Horizontal, wall.sign() as f32 * tuning.wall_push, ctx) {
        return PlayerState::falling();
    }

    PlayerState::WallRide { wall, timer }
}

fn update_walljumping(player: &mut Player, blocks: &[Block], away: Side, timer: u32, ctx: &PlayerContext) -> PlayerState {
    let tuning = ctx.tuning;
    if !try_move(player, blocks, Axis::Horizontal, away.sign() as f32 * player.speed, ctx) {
        return PlayerState::WallRide { wall: away, timer: 0 };
    }

    let moved = try_move(player, blocks, Axis::Vertical, jump_velocity(timer, tuning), ctx);
    let timer = timer.saturating_sub(1);
    if !moved || timer == 0 {
        return PlayerState::falling();
    }
    PlayerState::WallJumping { away, timer }
}

fn update_floating(player: &mut Player, blocks: &[Block], timer: u32, tuning: &Tuning) -> PlayerState {
    if overlapping(player, blocks, tuning, BlockState::is_pickable) {
        player.pos.add(0.0, -tuning.float_speed, tuning.cell);
        return PlayerState::Floating {
            timer: timer.saturating_sub(1),
        };
    }
    PlayerState::jumping(tuning)
}

/// Advance the player one tick. May lift or throw blocks.
pub fn update_player(player: &mut Player, blocks: &mut [Block], ctx: &PlayerContext, events: &mut Vec<GameEvent>) {
    let next = match player.state {
        PlayerState::Ground => update_ground(player, blocks, ctx, events),
        PlayerState::Jumping { timer } => update_jumping(player, blocks, timer, ctx, events),
        PlayerState::Falling { grace } => update_falling(player, blocks, grace, ctx, events),
        PlayerState::WallRide { wall, timer } => update_wallride(player, blocks, wall, timer, ctx),
        PlayerState::WallJumping { away, timer } => update_walljumping(player, blocks, away, timer, ctx),
        PlayerState::Floating { timer } => update_floating(player, blocks, timer, ctx.tuning),
    };
    player.enter(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Buttons;
    use crate::sim::block::BlockColor;

    const FLOOR_ROW: i32 = 20;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    fn floor(t: &Tuning) -> f32 {
        (FLOOR_ROW + 1) as f32 * t.cell
    }

    /// Player standing flush on top of cell row `row`
    fn standing_on(ix: i32, row: i32, t: &Tuning) -> Player {
        let x = crate::cell_center(ix, t.cell);
        let y = row as f32 * t.cell - t.player_height / 2.0;
        let mut player = Player::new(Position::new(x, y, t.cell), t);
        player.state = PlayerState::Ground;
        player
    }

    fn step(player: &mut Player, blocks: &mut [Block], control: &ControlState, t: &Tuning) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let ctx = PlayerContext {
            control,
            tuning: t,
            floor: floor(t),
        };
        update_player(player, blocks, &ctx, &mut events);
        events
    }

    fn pressed(buttons: Buttons) -> ControlState {
        let mut control = ControlState::default();
        control.update(buttons);
        control
    }

    fn idle_block(id: u32, ix: i32, iy: i32, t: &Tuning) -> Block {
        Block::new(id, ix, iy, BlockColor::Red, t.cell)
    }

    #[test]
    fn test_standing_on_idle_block_stays_ground() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        let mut player = standing_on(4, 10, &t);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(player.state, PlayerState::Ground);
    }

    #[test]
    fn test_walk_off_ledge_grants_grace() {
        let t = tuning();
        let mut blocks = Vec::new();
        let mut player = standing_on(4, 10, &t);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(
            player.state,
            PlayerState::Falling {
                grace: t.grace_ticks
            }
        );

        // Late jump inside the grace window
        let up = pressed(Buttons {
            up: true,
            ..Default::default()
        });
        step(&mut player, &mut blocks, &up, &t);
        assert_eq!(player.state, PlayerState::Jumping { timer: t.jump_ticks });
    }

    #[test]
    fn test_standing_on_ground_block_starts_floating() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        blocks[0].state = BlockState::Ground;
        let mut player = standing_on(4, 10, &t);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(
            player.state,
            PlayerState::Floating {
                timer: t.float_ticks
            }
        );

        // Already clear of the block, so the float ends in a jump
        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(player.state, PlayerState::Jumping { timer: t.jump_ticks });
    }

    #[test]
    fn test_beside_ground_block_stays_ground() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, FLOOR_ROW, &t)];
        blocks[0].state = BlockState::Ground;
        // On the floor, flush against the block's left side
        let mut player = standing_on(3, FLOOR_ROW + 1, &t);
        player.pos.set(4.0 * t.cell - t.player_width / 2.0, player.pos.y(), t.cell);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(player.state, PlayerState::Ground);
    }

    #[test]
    fn test_sunk_into_ground_block_floats_clear() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        blocks[0].state = BlockState::Ground;
        let mut player = standing_on(4, 10, &t);
        player.pos.add(0.0, 3.0, t.cell);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(
            player.state,
            PlayerState::Floating {
                timer: t.float_ticks
            }
        );

        // Floats up until clear, then jumps
        let mut ticks = 0;
        while matches!(player.state, PlayerState::Floating { .. }) && ticks < 20 {
            step(&mut player, &mut blocks, &ControlState::default(), &t);
            ticks += 1;
        }
        assert!(matches!(player.state, PlayerState::Jumping { .. }));
        assert!(!player.rect().overlaps(&blocks[0].rect(t.cell)));
    }

    #[test]
    fn test_lift_block_underfoot() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t), idle_block(2, 4, 11, &t)];
        let mut player = standing_on(4, 10, &t);
        let lift = pressed(Buttons {
            primary: true,
            ..Default::default()
        });

        let events = step(&mut player, &mut blocks, &lift, &t);
        assert_eq!(player.carried, vec![1]);
        assert_eq!(blocks[0].state, BlockState::Lifted);
        assert!(events.contains(&GameEvent::BlockLifted { id: 1 }));
    }

    #[test]
    fn test_lift_at_capacity_is_noop() {
        let t = tuning();
        let mut blocks = vec![idle_block(5, 4, 10, &t)];
        for id in 1..=4 {
            let mut carried = idle_block(id, 0, 0, &t);
            carried.state = BlockState::Lifted;
            blocks.push(carried);
        }
        let mut player = standing_on(4, 10, &t);
        player.carried = vec![1, 2, 3, 4];
        let lift = pressed(Buttons {
            primary: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &lift, &t);
        assert_eq!(player.carried.len(), 4);
        assert_eq!(blocks[0].state, BlockState::Idle);
    }

    #[test]
    fn test_lift_with_nothing_below_is_noop() {
        let t = tuning();
        let mut blocks = Vec::new();
        // On the floor: nothing underfoot to lift
        let mut player = standing_on(4, FLOOR_ROW + 1, &t);
        let lift = pressed(Buttons {
            primary: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &lift, &t);
        assert!(player.carried.is_empty());
        assert_eq!(player.state, PlayerState::Ground);
    }

    #[test]
    fn test_throw_oldest_first() {
        let t = tuning();
        let mut blocks = vec![idle_block(9, 4, 10, &t)];
        for id in [1, 2] {
            let mut carried = idle_block(id, 0, 0, &t);
            carried.state = BlockState::Lifted;
            blocks.push(carried);
        }
        let mut player = standing_on(4, 10, &t);
        player.carried = vec![1, 2];
        let throw = pressed(Buttons {
            secondary: true,
            ..Default::default()
        });

        let events = step(&mut player, &mut blocks, &throw, &t);
        assert_eq!(player.carried, vec![2]);
        assert_eq!(player.state, PlayerState::Jumping { timer: t.jump_ticks });
        assert_eq!(blocks[1].state, BlockState::Thrown);
        assert_eq!(blocks[1].pos, Position::at_cell(4, 9, t.cell));
        assert!(events.contains(&GameEvent::BlockThrown { id: 1 }));
    }

    #[test]
    fn test_throw_with_empty_hands_is_noop() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        let mut player = standing_on(4, 10, &t);
        let throw = pressed(Buttons {
            secondary: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &throw, &t);
        assert_eq!(player.state, PlayerState::Ground);
    }

    #[test]
    fn test_jump_decays_into_fall() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        let mut player = standing_on(4, 10, &t);
        let start_y = player.pos.y();
        let up = pressed(Buttons {
            up: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &up, &t);
        assert!(matches!(player.state, PlayerState::Jumping { .. }));

        let idle = ControlState::default();
        for _ in 0..t.jump_ticks {
            step(&mut player, &mut blocks, &idle, &t);
        }
        assert!(player.pos.y() < start_y);
        assert!(matches!(player.state, PlayerState::Falling { grace: 0 }));
    }

    #[test]
    fn test_jump_blocked_by_ceiling() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t), idle_block(2, 4, 8, &t)];
        let mut player = standing_on(4, 10, &t);
        player.state = PlayerState::Jumping { timer: t.jump_ticks };

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(player.state, PlayerState::Falling { grace: 0 });
        assert_eq!(player.pos.y(), 9.0 * t.cell + t.player_height / 2.0);
        assert!(!player.rect().overlaps(&blocks[1].rect(t.cell)));
    }

    #[test]
    fn test_falling_into_wall_starts_wallride() {
        let t = tuning();
        let mut blocks = Vec::new();
        // Flush against the left world wall
        let mut player = Player::new(Position::new(t.player_width / 2.0, 40.0, t.cell), &t);
        let left = pressed(Buttons {
            left: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &left, &t);
        assert_eq!(
            player.state,
            PlayerState::WallRide {
                wall: Side::Left,
                timer: 0
            }
        );

        // Holding into the wall refreshes the timer and drifts down
        let y = player.pos.y();
        step(&mut player, &mut blocks, &left, &t);
        assert_eq!(
            player.state,
            PlayerState::WallRide {
                wall: Side::Left,
                timer: t.wallride_ticks
            }
        );
        assert!(player.pos.y() > y);
        assert_eq!(player.state.wall_side(), Some(Side::Left));
    }

    #[test]
    fn test_wallride_decays_without_input() {
        let t = tuning();
        let mut blocks = Vec::new();
        let mut player = Player::new(Position::new(t.player_width / 2.0, 40.0, t.cell), &t);
        player.state = PlayerState::WallRide {
            wall: Side::Left,
            timer: 2,
        };

        let idle = ControlState::default();
        step(&mut player, &mut blocks, &idle, &t);
        assert!(matches!(player.state, PlayerState::WallRide { timer: 1, .. }));
        step(&mut player, &mut blocks, &idle, &t);
        assert_eq!(player.state, PlayerState::Falling { grace: 0 });
    }

    #[test]
    fn test_walljump_reverses_side() {
        let t = tuning();
        let mut blocks = Vec::new();
        let x = t.player_width / 2.0;
        let mut player = Player::new(Position::new(x, 40.0, t.cell), &t);
        player.state = PlayerState::WallRide {
            wall: Side::Left,
            timer: 4,
        };
        let up = pressed(Buttons {
            up: true,
            ..Default::default()
        });

        step(&mut player, &mut blocks, &up, &t);
        assert_eq!(
            player.state,
            PlayerState::WallJumping {
                away: Side::Right,
                timer: t.jump_ticks
            }
        );

        let y = player.pos.y();
        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert!(player.pos.x() > x);
        assert!(player.pos.y() < y);
    }

    #[test]
    fn test_walljump_into_wall_returns_to_wallride() {
        let t = tuning();
        let mut blocks = Vec::new();
        let x = t.world_width() - t.player_width / 2.0;
        let mut player = Player::new(Position::new(x, 40.0, t.cell), &t);
        player.state = PlayerState::WallJumping {
            away: Side::Right,
            timer: 10,
        };

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert_eq!(
            player.state,
            PlayerState::WallRide {
                wall: Side::Right,
                timer: 0
            }
        );
    }

    #[test]
    fn test_falling_block_overlap_floats() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 5, &t)];
        blocks[0].state = BlockState::Falling;
        let mut player = Player::new(Position::at_cell(4, 5, t.cell), &t);

        step(&mut player, &mut blocks, &ControlState::default(), &t);
        assert!(matches!(player.state, PlayerState::Floating { .. }));
    }

    #[test]
    fn test_landing_on_block() {
        let t = tuning();
        let mut blocks = vec![idle_block(1, 4, 10, &t)];
        let mut player = Player::new(Position::at_cell(4, 7, t.cell), &t);

        let idle = ControlState::default();
        for _ in 0..30 {
            step(&mut player, &mut blocks, &idle, &t);
        }
        assert_eq!(player.state, PlayerState::Ground);
        assert_eq!(player.pos.y(), 10.0 * t.cell - t.player_height / 2.0);
    }
}
