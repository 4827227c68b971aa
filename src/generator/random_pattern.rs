/*
random_pattern.rs

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

//! Generate a random pattern.
//!
//! The pattern is a random walk on the board. The walk starts from a random free cell and then
//! grows one cell at a time:
//!
//! 1. From the last added cell, move to a random free adjacent cell.
//! 2. If the last cell is blocked, move from the first cell of the pattern that still has a free
//!    adjacent cell.
//! 3. If the whole pattern is blocked, jump to the free cell nearest to the pattern. The pattern
//!    is then no longer connected.
//!
//! The walk stops early when the board is full.

use log::debug;
use std::collections::HashSet;
use std::time::Instant;

use super::cell::{Cell, Coord};
use super::pattern::Pattern;
use super::random_source::RandomSource;
use crate::error::{GameError, Result};

// Number of random draws for the starting cell before falling back to picking one from the
// list of free cells. Only reached on almost full boards.
const MAX_SEED_ATTEMPTS: usize = 1000;

/// Number of cells that each strategy added during the last generation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    /// Cells adjacent to the previous cell.
    pub local: usize,

    /// Cells adjacent to an earlier cell of the pattern.
    pub pattern_wide: usize,

    /// Cells nearest to the pattern, but not adjacent to it.
    pub nearest: usize,
}

/// [`RandomPattern`] object.
pub struct RandomPattern {
    /// Round number. The walk takes `round * level_multiplier` steps after the starting cell.
    pub round: u32,

    /// Width and height of the board.
    pub board_size: Coord,

    /// Multiplier for the number of steps.
    pub level_multiplier: u32,

    /// Strategies used to generate the last pattern.
    pub steps: Steps,

    /// Duration in seconds it took to generate the last pattern.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`RandomPattern::duration`].
    start: Instant,
}

impl RandomPattern {
    /// Create the object.
    pub fn new(round: u32, board_size: Coord, level_multiplier: u32) -> Self {
        Self {
            round,
            board_size,
            level_multiplier,
            steps: Steps::default(),
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Number of cells the walk tries to add after the starting cell.
    pub fn target_steps(&self) -> usize {
        (self.round as usize).saturating_mul(self.level_multiplier as usize)
    }

    /// Maximum number of cells in the pattern. A pattern cannot hold more cells than the board.
    fn capacity(&self) -> usize {
        let size: usize = self.board_size.into();
        self.target_steps().saturating_add(1).min(size * size)
    }

    /// Generate and return a random pattern.
    ///
    /// `occupied` is both an input and an output: cells in that set are never used, and every
    /// cell of the new pattern is added to it.
    /// The starting cell is also never taken from `previous`.
    ///
    /// # Errors
    ///
    /// The method returns [`GameError::BoardExhausted`] when there is no free cell left to start
    /// the pattern. In that case `occupied` is not modified.
    pub fn generate<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        previous: &Pattern,
        occupied: &mut HashSet<Cell>,
    ) -> Result<Pattern> {
        self.steps = Steps::default();
        self.duration = 0.0;
        self.start = Instant::now();

        let mut current: Cell = self.select_seed(rng, previous, occupied)?;
        let mut pattern: Pattern = Pattern::new(self.capacity());
        pattern.push(current);
        occupied.insert(current);
        debug!(
            "Starting cell = {current}  Round = {}  Board size = {}",
            self.round, self.board_size
        );

        for _ in 0..self.target_steps() {
            let next: Cell = if let Some(c) = self.local_step(current, occupied, rng) {
                self.steps.local += 1;
                c
            } else if let Some(c) = self.pattern_wide_step(&pattern, occupied, rng) {
                self.steps.pattern_wide += 1;
                c
            } else if let Some(c) = self.nearest_free(&pattern, occupied) {
                debug!("    Jumping to the nearest free cell {c}");
                self.steps.nearest += 1;
                c
            } else {
                debug!("    Board is full, pattern stops at {} cells", pattern.len());
                break;
            };

            pattern.push(next);
            occupied.insert(next);
            current = next;
        }

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Pattern length = {}  Steps = {:?}  Duration = {}",
            pattern.len(),
            self.steps,
            self.duration
        );
        Ok(pattern)
    }

    /// Whether the cell can start a new pattern.
    fn is_eligible_seed(&self, cell: &Cell, previous: &Pattern, occupied: &HashSet<Cell>) -> bool {
        cell.is_within(self.board_size) && !occupied.contains(cell) && !previous.contains(cell)
    }

    /// Return the number of cells that can start a new pattern.
    fn count_free_seeds(&self, previous: &Pattern, occupied: &HashSet<Cell>) -> usize {
        let size: usize = self.board_size.into();
        let taken_occupied: usize = occupied
            .iter()
            .filter(|c| c.is_within(self.board_size))
            .count();
        let taken_previous: usize = previous
            .cells()
            .iter()
            .filter(|c| c.is_within(self.board_size) && !occupied.contains(*c))
            .count();
        (size * size).saturating_sub(taken_occupied + taken_previous)
    }

    /// Select a random free cell on the board.
    fn select_seed<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        previous: &Pattern,
        occupied: &HashSet<Cell>,
    ) -> Result<Cell> {
        if self.count_free_seeds(previous, occupied) == 0 {
            debug!("No free cell left on a board of size {}", self.board_size);
            return Err(GameError::BoardExhausted);
        }

        for _ in 0..MAX_SEED_ATTEMPTS {
            let cell: Cell = rng.cell_within(self.board_size);
            if self.is_eligible_seed(&cell, previous, occupied) {
                return Ok(cell);
            }
        }

        // The board is almost full: draw from the remaining cells instead
        let free: Vec<Cell> = self
            .board_cells()
            .filter(|c| self.is_eligible_seed(c, previous, occupied))
            .collect();
        debug!(
            "No starting cell after {MAX_SEED_ATTEMPTS} attempts, choosing among {} free cells",
            free.len()
        );
        match free.len() {
            0 => Err(GameError::BoardExhausted),
            n => Ok(free[rng.below(n)]),
        }
    }

    /// Return a random free cell adjacent to the given cell.
    fn local_step<R: RandomSource + ?Sized>(
        &self,
        cell: Cell,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Option<Cell> {
        let candidates: Vec<Cell> = cell
            .neighbors(self.board_size)
            .filter(|c| !occupied.contains(c))
            .collect();
        match candidates.len() {
            0 => None,
            n => Some(candidates[rng.below(n)]),
        }
    }

    /// Return a random free cell adjacent to the first pattern cell that has one.
    fn pattern_wide_step<R: RandomSource + ?Sized>(
        &self,
        pattern: &Pattern,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Option<Cell> {
        pattern
            .cells()
            .iter()
            .find_map(|cell| self.local_step(*cell, occupied, rng))
    }

    /// Return the free cell closest to any cell of the pattern.
    ///
    /// When several cells are at the same distance, the first one in scan order wins.
    fn nearest_free(&self, pattern: &Pattern, occupied: &HashSet<Cell>) -> Option<Cell> {
        let mut nearest: Option<(Cell, u64)> = None;

        for cell in self.board_cells().filter(|c| !occupied.contains(c)) {
            let Some(distance) = pattern
                .cells()
                .iter()
                .map(|p| cell.distance_squared(p))
                .min()
            else {
                continue;
            };
            if nearest.is_none_or(|(_, d)| distance < d) {
                nearest = Some((cell, distance));
            }
        }
        nearest.map(|(cell, _)| cell)
    }

    /// Iterate over all the cells of the board, by `x` and then by `y`.
    fn board_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let size: Coord = self.board_size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Cell::new(x, y)))
    }
}
