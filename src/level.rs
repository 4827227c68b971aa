/*
level.rs

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

//! Game levels.
//!
//! A [`GameLevel`] carries the parameters of a rule set: how the board grows, how long the
//! patterns are, and what happens after each successful round.
//! The same three levels also describe the difficulty that the engine derives from the score,
//! see [`GameLevel::from_score`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{DEFAULT_BOARD_SIZE, LEVEL_1_SCORE_THRESHOLD, LEVEL_2_SCORE_THRESHOLD};
use crate::error::GameError;
use crate::generator::cell::Coord;

/// Game level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GameLevel {
    #[default]
    Easy,
    Intermediate,
    Advanced,
}

impl GameLevel {
    /// Multiplier applied to [`DEFAULT_BOARD_SIZE`] for this level.
    pub const fn board_size_multiplier(self) -> Coord {
        match self {
            GameLevel::Easy => 1,
            GameLevel::Intermediate => 2,
            GameLevel::Advanced => 4,
        }
    }

    /// Multiplier for the number of cells added to a pattern at each round.
    pub const fn level_multiplier(self) -> u32 {
        match self {
            GameLevel::Easy => 1,
            GameLevel::Intermediate => 2,
            GameLevel::Advanced => 3,
        }
    }

    /// Board size at the beginning of a game.
    pub const fn initial_board_size(self) -> Coord {
        DEFAULT_BOARD_SIZE * self.board_size_multiplier()
    }

    /// Whether the engine re-evaluates the difficulty from the score after a successful round.
    pub const fn adapts_to_score(self) -> bool {
        !matches!(self, GameLevel::Easy)
    }

    /// Difficulty level for the given cumulative score.
    pub fn from_score(score: i64) -> Self {
        if score >= LEVEL_2_SCORE_THRESHOLD {
            GameLevel::Advanced
        } else if score >= LEVEL_1_SCORE_THRESHOLD {
            GameLevel::Intermediate
        } else {
            GameLevel::Easy
        }
    }
}

impl fmt::Display for GameLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameLevel::Easy => write!(f, "easy"),
            GameLevel::Intermediate => write!(f, "intermediate"),
            GameLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for GameLevel {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(GameLevel::Easy),
            "intermediate" => Ok(GameLevel::Intermediate),
            "advanced" => Ok(GameLevel::Advanced),
            _ => Err(GameError::InvalidGameLevel(s.to_string())),
        }
    }
}
