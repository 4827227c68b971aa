/*
pattern.rs

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

//! Pattern of cells that the player must reproduce.

use std::collections::HashSet;

use super::cell::Cell;

/// Pattern object.
#[derive(Debug, Default, Clone)]
pub struct Pattern {
    /// Pattern as an ordered list of cells.
    cells: Vec<Cell>,

    /// Stores the membership of the cells.
    /// Instead of looking for the cell in the [`Pattern::cells`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    members: HashSet<Cell>,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Pattern {
    /// Create a [`Pattern`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Pattern`] object from a slice of cells.
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut pattern: Pattern = Pattern::new(cells.len());
        for cell in cells {
            pattern.push(*cell);
        }
        pattern
    }

    /// Remove all the cells from the pattern.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.members.clear();
    }

    /// Add a cell at the end of the pattern.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
        self.members.insert(cell);
    }

    /// Get the number of cells in the pattern.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pattern has no cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the cell is in the pattern or not.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.members.contains(cell)
    }

    /// Return the ordered cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Return the first cell in the pattern.
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Return the last cell in the pattern.
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Whether the selection holds exactly the cells of the pattern, in any order.
    ///
    /// The selection must have the same number of cells and contain every cell of the pattern.
    pub fn matches(&self, selection: &[Cell]) -> bool {
        if selection.len() != self.cells.len() {
            return false;
        }
        let selected: HashSet<&Cell> = selection.iter().collect();
        self.cells.iter().all(|cell| selected.contains(cell))
    }
}
