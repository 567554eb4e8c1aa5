//! Axis-aligned collision and the move-with-nudge primitive
//!
//! Shared by the player and the blocks. Movement is resolved one axis per
//! call; diagonal motion is two calls. Per-call movement must stay under one
//! cell or thin obstacles can be skipped.

use glam::Vec2;
use serde::Serialize;

use super::coords::Position;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: rectangles sharing only an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Overlap that also counts resting on top of, or hanging under, `other`.
    /// Side-by-side contact still does not count.
    #[inline]
    pub fn overlaps_or_stacked(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Movement axis for a single resolver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// World limits checked before any obstacle
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds {
    /// Left and right walls (player only)
    pub walls: Option<(f32, f32)>,
    /// Floor below the last generated row
    pub floor: Option<f32>,
}

/// Move `pos` by `delta` along `axis`.
///
/// Returns `true` when the full movement was applied. When a world bound or
/// an obstacle is hit, the mover is placed flush against it instead and
/// `false` is returned. The first overlapping obstacle wins, not the nearest.
/// A nudge never pushes the mover backwards past its start.
pub fn move_with_nudge<I>(
    pos: &mut Position,
    size: Vec2,
    axis: Axis,
    delta: f32,
    obstacles: I,
    bounds: &Bounds,
    cell: f32,
) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    if delta == 0.0 {
        return true;
    }

    let half = size / 2.0;
    let start = match axis {
        Axis::Horizontal => pos.x(),
        Axis::Vertical => pos.y(),
    };
    let target = start + delta;
    let center = match axis {
        Axis::Horizontal => Vec2::new(target, pos.y()),
        Axis::Vertical => Vec2::new(pos.x(), target),
    };
    let moved = Rect::centered(center, size);

    let place = |pos: &mut Position, coord: f32| {
        let coord = if delta > 0.0 {
            coord.max(start)
        } else {
            coord.min(start)
        };
        match axis {
            Axis::Horizontal => pos.set(coord, pos.y(), cell),
            Axis::Vertical => pos.set(pos.x(), coord, cell),
        }
    };

    match axis {
        Axis::Horizontal => {
            if let Some((left, right)) = bounds.walls {
                if moved.min.x < left {
                    place(pos, left + half.x);
                    return false;
                }
                if moved.max.x > right {
                    place(pos, right - half.x);
                    return false;
                }
            }
        }
        Axis::Vertical => {
            if let Some(floor) = bounds.floor {
                if moved.max.y > floor {
                    place(pos, floor - half.y);
                    return false;
                }
            }
        }
    }

    if let Some(hit) = obstacles.into_iter().find(|o| moved.overlaps(o)) {
        let flush = match (axis, delta > 0.0) {
            (Axis::Horizontal, true) => hit.min.x - half.x,
            (Axis::Horizontal, false) => hit.max.x + half.x,
            (Axis::Vertical, true) => hit.min.y - half.y,
            (Axis::Vertical, false) => hit.max.y + half.y,
        };
        place(pos, flush);
        return false;
    }

    place(pos, target);
    true
}

/// First obstacle overlapping `rect`
pub fn first_overlap<I>(rect: &Rect, obstacles: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    obstacles.into_iter().find(|o| rect.overlaps(o))
}
