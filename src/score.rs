/*
score.rs

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

//! Score records saved at the end of a game.
//!
//! A [`ScoreRecord`] is written as five labelled lines:
//!
//! ```text
//! Date and Time: 2025-03-14 09:26:53
//! Rounds Played: 12
//! Highest Score: -3
//! Highest Win Streaks: 2
//! Number of Win Streaks: 4
//! ```
//!
//! [`parse_records`] reads a sequence of such blocks back. Blank lines are ignored, but the five
//! lines of a record must come in that order.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GameError, Result};

/// Format of the timestamp.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_TIME_LABEL: &str = "Date and Time:";
const ROUNDS_LABEL: &str = "Rounds Played:";
const SCORE_LABEL: &str = "Highest Score:";
const STREAK_LABEL: &str = "Highest Win Streaks:";
const MILESTONES_LABEL: &str = "Number of Win Streaks:";

/// Labels in the order they appear in a record.
const LABELS: [&str; 5] = [
    DATE_TIME_LABEL,
    ROUNDS_LABEL,
    SCORE_LABEL,
    STREAK_LABEL,
    MILESTONES_LABEL,
];

/// Object that represents the result of a game.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Time when the game ended, to the second.
    pub when: NaiveDateTime,

    /// Round reached.
    pub rounds_played: u32,

    /// Final score. Can be negative.
    pub score: i64,

    /// Win streak when the game ended.
    pub win_streak: u32,

    /// Number of win streak milestones.
    pub milestones: u32,
}

impl ScoreRecord {
    /// Create a [`ScoreRecord`] object timestamped with the current local time.
    pub fn now(rounds_played: u32, score: i64, win_streak: u32, milestones: u32) -> Self {
        Self {
            when: truncate_to_second(Local::now().naive_local()),
            rounds_played,
            score,
            win_streak,
            milestones,
        }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{DATE_TIME_LABEL} {}", self.when.format(DATE_TIME_FORMAT))?;
        writeln!(f, "{ROUNDS_LABEL} {}", self.rounds_played)?;
        writeln!(f, "{SCORE_LABEL} {}", self.score)?;
        writeln!(f, "{STREAK_LABEL} {}", self.win_streak)?;
        writeln!(f, "{MILESTONES_LABEL} {}", self.milestones)
    }
}

/// Drop the sub-second part of a timestamp.
fn truncate_to_second(when: NaiveDateTime) -> NaiveDateTime {
    when.with_nanosecond(0).unwrap_or(when)
}

/// Build a [`GameError::MalformedRecord`] error.
fn malformed(line: usize, reason: impl Into<String>) -> GameError {
    GameError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}

/// Parse the value that follows the label.
fn parse_value<T: std::str::FromStr>((line, value): (usize, &str), label: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| malformed(line, format!("invalid value `{value}` for `{label}`")))
}

/// Return the highest score, or None if the list is empty.
///
/// On equal scores, the most recent record wins.
pub fn best_record(records: &[ScoreRecord]) -> Option<&ScoreRecord> {
    records.iter().max_by_key(|r| (r.score, r.when))
}

/// Parse the text representation of a list of records.
///
/// # Errors
///
/// The function returns [`GameError::MalformedRecord`] for an unknown line, a label out of
/// order, an invalid value, or an incomplete last record.
pub fn parse_records(content: &str) -> Result<Vec<ScoreRecord>> {
    let mut records: Vec<ScoreRecord> = Vec::new();
    // Line number and value of each line of the record being read
    let mut values: Vec<(usize, &str)> = Vec::with_capacity(LABELS.len());

    for (index, raw) in content.lines().enumerate() {
        let line_number: usize = index + 1;
        let line: &str = raw.trim();
        if line.is_empty() {
            continue;
        }

        let expected: &str = LABELS[values.len()];
        let Some(value) = line.strip_prefix(expected) else {
            return Err(match LABELS.iter().find(|label| line.starts_with(**label)) {
                Some(label) => malformed(
                    line_number,
                    format!("expected `{expected}`, found `{label}`"),
                ),
                None => malformed(line_number, format!("unrecognized line `{line}`")),
            });
        };
        values.push((line_number, value.trim()));

        if values.len() == LABELS.len() {
            let (date_line, date) = values[0];
            let when: NaiveDateTime = NaiveDateTime::parse_from_str(date, DATE_TIME_FORMAT)
                .map_err(|_| malformed(date_line, format!("invalid date and time `{date}`")))?;
            records.push(ScoreRecord {
                when,
                rounds_played: parse_value(values[1], ROUNDS_LABEL)?,
                score: parse_value(values[2], SCORE_LABEL)?,
                win_streak: parse_value(values[3], STREAK_LABEL)?,
                milestones: parse_value(values[4], MILESTONES_LABEL)?,
            });
            values.clear();
        }
    }

    if let Some((last_line, _)) = values.last() {
        return Err(malformed(
            *last_line,
            format!(
                "incomplete record, missing `{}`",
                LABELS[values.len()].trim_end_matches(':')
            ),
        ));
    }
    Ok(records)
}
