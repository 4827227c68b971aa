/*
config.rs

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

//! Constants and engine configuration.
//!
//! [`EngineConfig`] can be built in code or read from a JSON file:
//!
//! ```json
//! {
//!     "level": "intermediate",
//!     "board_size": 16,
//!     "milestone_threshold": 3,
//!     "seed": 42
//! }
//! ```
//!
//! Missing fields take their default value.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::{GameError, Result};
use crate::generator::cell::Coord;
use crate::level::GameLevel;
use crate::scoring::WIN_STREAK_MIN;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>";

/// Name of the text file that receives the score records.
pub const SCORE_FILE: &str = "score.txt";

/// Board width and height for the base level.
pub const DEFAULT_BOARD_SIZE: Coord = 10;

/// Boards never grow beyond that size.
pub const MAX_BOARD_SIZE: Coord = 1280;

/// Round at which the game starts.
pub const DEFAULT_ROUND: u32 = 1;

/// The board doubles after every round that is a multiple of this value.
pub const LEVEL_UP: u32 = 10;

/// Factor applied to the board size every [`LEVEL_UP`] rounds.
pub const BOARD_SIZE_EXPANDED: Coord = 2;

/// Score from which the difficulty becomes intermediate.
pub const LEVEL_1_SCORE_THRESHOLD: i64 = 10;

/// Score from which the difficulty becomes advanced.
pub const LEVEL_2_SCORE_THRESHOLD: i64 = 20;

/// Engine parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Rule set.
    pub level: GameLevel,

    /// Board size at the beginning of a game.
    /// When not set, the board size of the level is used.
    pub board_size: Option<Coord>,

    /// Multiplier for the pattern length.
    /// When not set, the multiplier of the level is used.
    pub level_multiplier: Option<u32>,

    /// Streak length that counts as a milestone.
    pub milestone_threshold: u32,

    /// Seed for the random generator. When not set, the generator is seeded from the system.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(GameLevel::default())
    }
}

impl EngineConfig {
    /// Create an [`EngineConfig`] object for the given level.
    pub fn new(level: GameLevel) -> Self {
        Self {
            level,
            board_size: None,
            level_multiplier: None,
            milestone_threshold: WIN_STREAK_MIN,
            seed: None,
        }
    }

    /// Read the configuration from a JSON file.
    ///
    /// Return the default configuration if the file does not exist.
    ///
    /// # Errors
    ///
    /// The method returns [`GameError::InvalidGameLevel`] for an unknown level name, and
    /// [`GameError::InvalidConfiguration`] for any other invalid content.
    pub fn load(path: &Path) -> Result<Self> {
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    debug!("No configuration file {path:?}, using defaults");
                    return Ok(Self::default());
                }
                _ => return Err(GameError::Io(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let invalid = |e: serde_json::Error| {
            GameError::InvalidConfiguration(format!("{}: {e}", path.display()))
        };
        let mut value: Value = serde_json::from_reader(reader).map_err(invalid)?;

        // Level names are parsed separately so that an unknown name is reported as such
        let level: Option<GameLevel> = match value.get("level") {
            Some(Value::String(name)) => Some(name.parse::<GameLevel>()?),
            _ => None,
        };
        if level.is_some()
            && let Some(object) = value.as_object_mut()
        {
            object.remove("level");
        }

        let mut config: EngineConfig = serde_json::from_value(value).map_err(invalid)?;
        if let Some(level) = level {
            config.level = level;
        }
        config.validate()?;
        debug!("Configuration loaded from {path:?}: {config:?}");
        Ok(config)
    }

    /// Board size at the beginning of a game.
    pub fn initial_board_size(&self) -> Coord {
        self.board_size.unwrap_or_else(|| self.level.initial_board_size())
    }

    /// Multiplier for the pattern length.
    pub fn level_multiplier(&self) -> u32 {
        self.level_multiplier.unwrap_or_else(|| self.level.level_multiplier())
    }

    /// Verify the parameters.
    pub fn validate(&self) -> Result<()> {
        let board_size: Coord = self.initial_board_size();
        if board_size == 0 {
            return Err(GameError::InvalidConfiguration(
                "the board size must be at least 1".to_string(),
            ));
        }
        if board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfiguration(format!(
                "the board size must not exceed {MAX_BOARD_SIZE}"
            )));
        }
        if self.level_multiplier() == 0 {
            return Err(GameError::InvalidConfiguration(
                "the level multiplier must be at least 1".to_string(),
            ));
        }
        if self.milestone_threshold == 0 {
            return Err(GameError::InvalidConfiguration(
                "the milestone threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
