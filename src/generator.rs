/*
generator.rs

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

//! Generate the random patterns that the player must memorize.
//!
//! A pattern is an ordered list of [`cell::Cell`] objects represented by a
//! [`pattern::Pattern`] object.
//! You create a pattern by creating a [`random_pattern::RandomPattern`] object for the current
//! round and board size, and by using its [`random_pattern::RandomPattern::generate`] method.
//!
//! The generator receives the set of cells already used during the game. New patterns never
//! reuse these cells, and the generator adds the cells of the new pattern to that set.
//! When no cell is left to start a new pattern, the method returns an error.
//!
//! Randomness comes from a [`random_source::RandomSource`] object, which is implemented for all
//! the [`rand::Rng`] generators.

pub mod cell;
pub mod pattern;
pub mod random_pattern;
pub mod random_source;
