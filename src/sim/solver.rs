//! Match detection
//!
//! Scans a window of the grid for horizontal and vertical streaks of three
//! or more same-colored solvable blocks. Rebuilt from scratch every tick.

use super::block::Block;

/// Minimum streak length that clears
pub const MIN_STREAK: usize = 3;

/// Dense row-major occupancy map over rows `top..=bottom`
struct Occupancy {
    top: i32,
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl Occupancy {
    fn build(blocks: &[Block], top: i32, bottom: i32, width: usize) -> Self {
        let height = (bottom - top + 1).max(0) as usize;
        let mut cells = vec![None; width * height];
        for (index, block) in blocks.iter().enumerate() {
            if !block.state.is_pickable() {
                continue;
            }
            let (ix, iy) = (block.pos.ix(), block.pos.iy());
            if ix < 0 || ix as usize >= width || iy < top || iy > bottom {
                continue;
            }
            cells[(iy - top) as usize * width + ix as usize] = Some(index);
        }
        Self {
            top,
            width,
            height,
            cells,
        }
    }

    #[inline]
    fn get(&self, col: usize, row: usize) -> Option<usize> {
        self.cells[row * self.width + col]
    }
}

/// Can `a` and `b` sit next to each other in a streak?
#[inline]
fn links(blocks: &[Block], a: usize, b: usize) -> bool {
    blocks[a].color == blocks[b].color && blocks[a].state.is_solvable() && blocks[b].state.is_solvable()
}

/// Extend a run from `(col, row)` by `(dc, dr)` while neighbors link
fn run_from(grid: &Occupancy, blocks: &[Block], col: usize, row: usize, dc: usize, dr: usize) -> Vec<usize> {
    let mut run = Vec::new();
    let Some(mut current) = grid.get(col, row) else {
        return run;
    };
    run.push(current);

    let (mut c, mut r) = (col + dc, row + dr);
    while c < grid.width && r < grid.height {
        match grid.get(c, r) {
            Some(next) if links(blocks, current, next) => {
                run.push(next);
                current = next;
            }
            _ => break,
        }
        c += dc;
        r += dr;
    }
    run
}

/// Find streaks in rows `top..=bottom` and start every member solving.
///
/// A streak only counts when at least one member is resting (ground or
/// already solving). Returns the ids of blocks that started solving now.
pub fn solve(blocks: &mut [Block], top: i32, bottom: i32, width: usize, solve_ticks: u32, cell: f32) -> Vec<u32> {
    let grid = Occupancy::build(blocks, top, bottom, width);
    let mut solved = vec![false; blocks.len()];

    for row in 0..grid.height {
        for col in 0..grid.width {
            let Some(start) = grid.get(col, row) else {
                continue;
            };
            if !blocks[start].state.is_solvable() {
                continue;
            }

            for (dc, dr) in [(1, 0), (0, 1)] {
                let run = run_from(&grid, blocks, col, row, dc, dr);
                if run.len() >= MIN_STREAK && run.iter().any(|&i| blocks[i].state.is_resting()) {
                    for i in run {
                        solved[i] = true;
                    }
                }
            }
        }
    }

    let mut started = Vec::new();
    for (block, _) in blocks.iter_mut().zip(&solved).filter(|(_, s)| **s) {
        if block.start_solving(solve_ticks, cell) {
            started.push(block.id);
        }
    }

    if !started.is_empty() {
        log::debug!(
            "Matched {} blocks in rows {}..={}",
            started.len(),
            grid.top,
            grid.top + grid.height as i32 - 1
        );
    }
    started
}
