//! Continuous position with its derived grid cell
//!
//! `ix`/`iy` are private and recomputed on every write, so a position can
//! never disagree with its cell.

use glam::Vec2;
use serde::Serialize;

use crate::cell_index;

/// Continuous `(x, y)` plus the grid cell that contains it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    x: f32,
    y: f32,
    ix: i32,
    iy: i32,
}

impl Position {
    pub fn new(x: f32, y: f32, cell: f32) -> Self {
        Self {
            x,
            y,
            ix: cell_index(x, cell),
            iy: cell_index(y, cell),
        }
    }

    /// Position at the center of cell `(ix, iy)`
    pub fn at_cell(ix: i32, iy: i32, cell: f32) -> Self {
        Self::new(
            crate::cell_center(ix, cell),
            crate::cell_center(iy, cell),
            cell,
        )
    }

    /// Overwrite both coordinates
    pub fn set(&mut self, x: f32, y: f32, cell: f32) {
        *self = Self::new(x, y, cell);
    }

    /// Offset both coordinates
    pub fn add(&mut self, dx: f32, dy: f32, cell: f32) {
        self.set(self.x + dx, self.y + dy, cell);
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn ix(&self) -> i32 {
        self.ix
    }

    #[inline]
    pub fn iy(&self) -> i32 {
        self.iy
    }

    #[inline]
    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CELL;
    use proptest::prelude::*;

    #[test]
    fn test_negative_coordinates_floor() {
        let pos = Position::new(-0.5, -16.0, CELL);
        assert_eq!(pos.ix(), -1);
        assert_eq!(pos.iy(), -1);
    }

    #[test]
    fn test_at_cell_is_centered() {
        let pos = Position::at_cell(3, 7, CELL);
        assert_eq!(pos.x(), 56.0);
        assert_eq!(pos.y(), 120.0);
        assert_eq!((pos.ix(), pos.iy()), (3, 7));
    }

    proptest! {
        #[test]
        fn prop_set_keeps_cell_consistent(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            let mut pos = Position::new(0.0, 0.0, CELL);
            pos.set(x, y, CELL);
            prop_assert_eq!(pos.ix(), (x / CELL).floor() as i32);
            prop_assert_eq!(pos.iy(), (y / CELL).floor() as i32);
        }

        #[test]
        fn prop_add_keeps_cell_consistent(
            x in -1.0e3f32..1.0e3,
            y in -1.0e3f32..1.0e3,
            dx in -15.0f32..15.0,
            dy in -15.0f32..15.0,
        ) {
            let mut pos = Position::new(x, y, CELL);
            pos.add(dx, dy, CELL);
            prop_assert_eq!(pos.ix(), (pos.x() / CELL).floor() as i32);
            prop_assert_eq!(pos.iy(), (pos.y() / CELL).floor() as i32);
        }
    }
}
