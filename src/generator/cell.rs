/*
cell.rs

Copyright 2025 Hervé Quatremain

This file is part of Recallgrid.

Recallgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Recallgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Recallgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Grid cell coordinates.

use std::fmt;

/// Single coordinate axis, used for board sizes and cell positions.
pub type Coord = u16;

// Displacements to the 8 surrounding cells, ordered by dx then dy.
const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A cell on the board.
///
/// Two cells are equal when their coordinates are equal. Cells are ordered by `x` and then by
/// `y`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    /// Create a [`Cell`] object.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies inside a square board of the given size.
    pub fn is_within(&self, board_size: Coord) -> bool {
        self.x < board_size && self.y < board_size
    }

    /// Return the cells around this one that are inside a square board of the given size.
    pub fn neighbors(&self, board_size: Coord) -> impl Iterator<Item = Cell> + '_ {
        DISPLACEMENTS
            .iter()
            .filter_map(move |&delta| self.offset(delta, board_size))
    }

    /// Squared Euclidean distance to another cell.
    ///
    /// Comparing squared distances gives the same ordering as comparing distances.
    pub fn distance_squared(&self, other: &Cell) -> u64 {
        let dx: u64 = u64::from(self.x.abs_diff(other.x));
        let dy: u64 = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// Apply `delta`, returning a cell only when it remains on the board.
    fn offset(&self, (dx, dy): (i32, i32), board_size: Coord) -> Option<Cell> {
        let x: i32 = i32::from(self.x) + dx;
        let y: i32 = i32::from(self.y) + dy;
        let size: i32 = i32::from(board_size);

        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some(Cell::new(x as Coord, y as Coord))
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.x, self.y)
    }
}
