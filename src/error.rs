/*
error.rs

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

//! Error type shared by the generator, the engine, and the score stores.

use thiserror::Error;

/// Type of errors.
#[derive(Error, Debug)]
pub enum GameError {
    /// The player submitted a selection without any cell.
    #[error("You have not selected a pattern yet")]
    EmptySelection,

    /// A selection was submitted before the first pattern was generated.
    #[error("No pattern has been generated for this round")]
    NoActivePattern,

    /// The level name does not match any [`crate::level::GameLevel`] variant.
    #[error("Unknown game level `{0}`")]
    InvalidGameLevel(String),

    /// The engine configuration is rejected. The engine is not created.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A score record cannot be parsed.
    #[error("Malformed score record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// No free cell left on the board to start a new pattern.
    #[error("No free cell left on the board")]
    BoardExhausted,

    /// The game has ended. It must be reset before playing again.
    #[error("The game has ended, reset it to play again")]
    InvalidState,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
