/*
lib.rs

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

//! Pattern generator and adaptive scoring engine for a memory game.
//!
//! Every round, the engine draws a random walk of adjacent cells on a square board. The player
//! memorizes the pattern and submits the cells back. Correct answers grow the patterns and the
//! board, and a score drives the difficulty level.
//!
//! ```
//! use recallgrid::config::EngineConfig;
//! use recallgrid::engine::GameEngine;
//! use recallgrid::generator::cell::Cell;
//!
//! let config = EngineConfig {
//!     seed: Some(42),
//!     ..EngineConfig::default()
//! };
//! let mut engine = GameEngine::new(config).unwrap();
//! engine.next_round().unwrap();
//! let answer: Vec<Cell> = engine.pattern().cells().to_vec();
//! assert!(engine.verify_selection(&answer).unwrap());
//! assert_eq!(engine.round(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod level;
pub mod saver;
pub mod score;
pub mod scoring;
