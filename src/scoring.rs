/*
scoring.rs

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

//! Scoring policy and win streak counter.
//!
//! The reward or penalty for a submission depends on the round band ([`ScoreTier`]), not on the
//! difficulty level that the engine derives from the score.

use log::{debug, info};

/// Last round of the easy band.
pub const EASY_LAST_ROUND: u32 = 10;

/// Last round of the intermediate band.
pub const INTERMEDIATE_LAST_ROUND: u32 = 20;

/// Number of consecutive correct submissions that counts as a milestone.
pub const WIN_STREAK_MIN: u32 = 3;

/// Round band that governs rewards and penalties.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoreTier {
    Easy,
    Intermediate,
    Advanced,
}

impl ScoreTier {
    /// Return the band of the given round.
    pub fn from_round(round: u32) -> Self {
        if round <= EASY_LAST_ROUND {
            ScoreTier::Easy
        } else if round <= INTERMEDIATE_LAST_ROUND {
            ScoreTier::Intermediate
        } else {
            ScoreTier::Advanced
        }
    }

    /// Points won for a correct submission.
    pub const fn reward(self) -> i64 {
        match self {
            ScoreTier::Easy => 1,
            ScoreTier::Intermediate => 2,
            ScoreTier::Advanced => 10,
        }
    }

    /// Points lost for a wrong submission. The value is zero or negative.
    pub const fn penalty(self) -> i64 {
        match self {
            ScoreTier::Easy => -2,
            ScoreTier::Intermediate => -1,
            ScoreTier::Advanced => 0,
        }
    }

    /// Score change for a submission.
    pub const fn delta(self, correct: bool) -> i64 {
        if correct {
            self.reward()
        } else {
            self.penalty()
        }
    }
}

/// Manage the win streak and the milestone counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinStreak {
    /// Number of consecutive correct submissions.
    current: u32,

    /// Number of correct submissions made while the streak was at or above the threshold.
    milestones: u32,

    /// Streak length from which a correct submission counts as a milestone.
    threshold: u32,
}

impl Default for WinStreak {
    fn default() -> Self {
        Self::new(WIN_STREAK_MIN)
    }
}

impl WinStreak {
    /// Create a [`WinStreak`] object.
    pub fn new(threshold: u32) -> Self {
        Self {
            current: 0,
            milestones: 0,
            threshold,
        }
    }

    /// Reset the counters. The threshold is kept.
    pub fn clear(&mut self) {
        self.current = 0;
        self.milestones = 0;
    }

    /// Return the current streak.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Return the number of milestones reached since the last reset.
    pub fn milestones(&self) -> u32 {
        self.milestones
    }

    /// Record a submission.
    ///
    /// Return the current streak when the submission reaches a milestone.
    pub fn record(&mut self, correct: bool) -> Option<u32> {
        if !correct {
            if self.current > 0 {
                debug!("Win streak of {} broken", self.current);
            }
            self.current = 0;
            return None;
        }

        self.current += 1;
        if self.current >= self.threshold {
            self.milestones += 1;
            info!(
                "Win streak milestone: streak = {}  milestones = {}",
                self.current, self.milestones
            );
            return Some(self.current);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_the_round() {
        assert_eq!(ScoreTier::from_round(1), ScoreTier::Easy);
        assert_eq!(ScoreTier::from_round(10), ScoreTier::Easy);
        assert_eq!(ScoreTier::from_round(11), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::from_round(20), ScoreTier::Intermediate);
        assert_eq!(ScoreTier::from_round(21), ScoreTier::Advanced);
    }

    #[test]
    fn rewards_and_penalties() {
        assert_eq!(ScoreTier::from_round(5).delta(true), 1);
        assert_eq!(ScoreTier::from_round(5).delta(false), -2);
        assert_eq!(ScoreTier::from_round(15).delta(true), 2);
        assert_eq!(ScoreTier::from_round(15).delta(false), -1);
        assert_eq!(ScoreTier::from_round(25).delta(true), 10);
        assert_eq!(ScoreTier::from_round(25).delta(false), 0);
    }

    #[test]
    fn milestone_at_third_win() {
        let mut streak: WinStreak = WinStreak::default();
        assert_eq!(streak.record(true), None);
        assert_eq!(streak.record(true), None);
        assert_eq!(streak.record(true), Some(3));
        assert_eq!(streak.milestones(), 1);
    }

    #[test]
    fn longer_streaks_keep_counting() {
        let mut streak: WinStreak = WinStreak::default();
        let events: Vec<Option<u32>> = (0..5).map(|_| streak.record(true)).collect();
        assert_eq!(events, vec![None, None, Some(3), Some(4), Some(5)]);
        assert_eq!(streak.milestones(), 3);
    }

    #[test]
    fn miss_resets_the_streak_only() {
        let mut streak: WinStreak = WinStreak::default();
        for _ in 0..3 {
            streak.record(true);
        }
        assert_eq!(streak.record(false), None);
        assert_eq!(streak.current(), 0);
        assert_eq!(streak.milestones(), 1);

        streak.clear();
        assert_eq!(streak.milestones(), 0);
    }
}
