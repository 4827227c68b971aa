/*
engine.rs

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

//! Manage the status of a game in progress.
//!
//! The [`GameEngine`] object owns the round, the score, the win streak, and the cells used so
//! far. A game goes through the following steps:
//!
//! 1. [`GameEngine::next_round`] generates the pattern of the round.
//! 2. The player reproduces the pattern and submits the selected cells to
//!    [`GameEngine::verify_selection`], which updates the score. On success, the game moves to
//!    the next round.
//! 3. [`GameEngine::end_game`] saves the score and clears the game.
//!    [`GameEngine::reset_game`] starts a new game.
//!
//! Once ended, the game accepts no more rounds until it is reset.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use crate::config::{BOARD_SIZE_EXPANDED, DEFAULT_BOARD_SIZE, DEFAULT_ROUND, EngineConfig};
use crate::config::{LEVEL_UP, MAX_BOARD_SIZE};
use crate::error::{GameError, Result};
use crate::generator::cell::{Cell, Coord};
use crate::generator::pattern::Pattern;
use crate::generator::random_pattern::{RandomPattern, Steps};
use crate::generator::random_source::RandomSource;
use crate::level::GameLevel;
use crate::saver::scores::ScoreStore;
use crate::score::ScoreRecord;
use crate::scoring::{ScoreTier, WinStreak};

/// Function called with the current streak when the player reaches a win streak milestone.
pub type WinStreakListener = Box<dyn FnMut(u32) + Send>;

/// Engine states.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Active,
    Ended,
}

/// Result of [`GameEngine::end_game`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndOutcome {
    /// The game ended. The record is the one handed to the score store.
    Ended(ScoreRecord),

    /// The game had already ended. Nothing was done.
    AlreadyEnded,
}

/// Memory pattern game engine.
pub struct GameEngine<R: RandomSource = StdRng> {
    /// Engine parameters.
    config: EngineConfig,

    /// Random source for the pattern generator.
    rng: R,

    /// Pattern of the current round.
    pattern: Pattern,

    /// Cells used since the beginning of the game, including the current pattern.
    occupied: HashSet<Cell>,

    /// Current round, starting at 1.
    round: u32,

    /// Width and height of the board.
    board_size: Coord,

    /// Difficulty derived from the score. See [`GameEngine::update_difficulty`].
    difficulty: GameLevel,

    /// Current score.
    score: i64,

    /// Win streak and milestone counter.
    win_streak: WinStreak,

    /// Whether the game has ended.
    state: EngineState,

    /// Strategies that the generator used for the current pattern.
    last_steps: Steps,

    /// Time in seconds it took to generate the current pattern.
    last_duration: f32,

    /// Function to call when a win streak milestone is reached.
    win_streak_listener: Option<WinStreakListener>,

    /// Where to save the score when the game ends.
    score_store: Option<Box<dyn ScoreStore>>,
}

impl GameEngine<StdRng> {
    /// Create a [`GameEngine`] object.
    ///
    /// The random generator uses the seed from the configuration, or is seeded from the system
    /// if the configuration does not provide a seed.
    ///
    /// # Errors
    ///
    /// The function returns [`GameError::InvalidConfiguration`] if the configuration is not
    /// valid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng: StdRng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create a [`GameEngine`] object that draws its patterns from the given random source.
    ///
    /// The `seed` parameter of the configuration is ignored.
    ///
    /// # Errors
    ///
    /// The function returns [`GameError::InvalidConfiguration`] if the configuration is not
    /// valid.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self> {
        config.validate()?;
        debug!("New engine: {config:?}");
        Ok(Self {
            board_size: config.initial_board_size(),
            win_streak: WinStreak::new(config.milestone_threshold),
            config,
            rng,
            pattern: Pattern::default(),
            occupied: HashSet::new(),
            round: DEFAULT_ROUND,
            difficulty: GameLevel::from_score(0),
            score: 0,
            state: EngineState::Active,
            last_steps: Steps::default(),
            last_duration: 0.0,
            win_streak_listener: None,
            score_store: None,
        })
    }

    /// Set the store that receives the score when the game ends.
    pub fn with_score_store(mut self, store: Box<dyn ScoreStore>) -> Self {
        self.score_store = Some(store);
        self
    }

    /// Replace the store that receives the score when the game ends.
    pub fn set_score_store(&mut self, store: Box<dyn ScoreStore>) {
        self.score_store = Some(store);
    }

    /// Return the score store.
    pub fn score_store(&self) -> Option<&dyn ScoreStore> {
        self.score_store.as_deref()
    }

    /// Set the function to call when a win streak milestone is reached.
    pub fn set_win_streak_listener(&mut self, listener: impl FnMut(u32) + Send + 'static) {
        self.win_streak_listener = Some(Box::new(listener));
    }

    /// Remove the win streak listener.
    pub fn clear_win_streak_listener(&mut self) {
        self.win_streak_listener = None;
    }

    /// Return the engine parameters.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Return the rule set.
    pub fn level(&self) -> GameLevel {
        self.config.level
    }

    /// Return the difficulty derived from the score.
    pub fn difficulty(&self) -> GameLevel {
        self.difficulty
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn board_size(&self) -> Coord {
        self.board_size
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn current_win_streak(&self) -> u32 {
        self.win_streak.current()
    }

    /// Return the number of win streak milestones since the beginning of the game.
    pub fn total_win_streaks(&self) -> u32 {
        self.win_streak.milestones()
    }

    /// Return the pattern of the current round.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Return the cells used since the beginning of the game.
    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == EngineState::Ended
    }

    /// Return the strategies that the generator used for the current pattern.
    pub fn last_steps(&self) -> Steps {
        self.last_steps
    }

    /// Return the time in seconds it took to generate the current pattern.
    pub fn last_duration(&self) -> f32 {
        self.last_duration
    }

    /// Generate the pattern for the current round.
    ///
    /// The new pattern replaces the previous one, and its cells are added to the occupied cells.
    ///
    /// # Errors
    ///
    /// The method returns [`GameError::InvalidState`] if the game has ended, and
    /// [`GameError::BoardExhausted`] if no cell is left on the board. In both cases the game is
    /// not modified.
    pub fn next_round(&mut self) -> Result<()> {
        if self.is_ended() {
            return Err(GameError::InvalidState);
        }

        let mut generator: RandomPattern =
            RandomPattern::new(self.round, self.board_size, self.config.level_multiplier());
        let pattern: Pattern = generator.generate(&mut self.rng, &self.pattern, &mut self.occupied)?;

        debug!(
            "Round {}: pattern of {} cells on a board of size {}",
            self.round,
            pattern.len(),
            self.board_size
        );
        self.pattern = pattern;
        self.last_steps = generator.steps;
        self.last_duration = generator.duration;
        Ok(())
    }

    /// Verify the cells that the player selected and update the score.
    ///
    /// The selection is correct if it holds the cells of the current pattern, in any order.
    /// On success, the game moves to the next round.
    ///
    /// # Errors
    ///
    /// The method returns [`GameError::EmptySelection`] if the selection is empty,
    /// [`GameError::InvalidState`] if the game has ended, and [`GameError::NoActivePattern`] if
    /// [`GameEngine::next_round`] was not called yet. In these cases the game is not modified
    /// and the player can submit again.
    pub fn verify_selection(&mut self, selection: &[Cell]) -> Result<bool> {
        if selection.is_empty() {
            return Err(GameError::EmptySelection);
        }
        if self.is_ended() {
            return Err(GameError::InvalidState);
        }
        if self.pattern.is_empty() {
            return Err(GameError::NoActivePattern);
        }

        let correct: bool = self.pattern.matches(selection);
        self.update_score(correct);

        if correct {
            if self.round % LEVEL_UP == 0 {
                self.board_size = self
                    .board_size
                    .saturating_mul(BOARD_SIZE_EXPANDED)
                    .min(MAX_BOARD_SIZE);
                info!(
                    "Round {} completed, board size is now {}",
                    self.round, self.board_size
                );
            }
            self.round += 1;
            self.level_up();
        }
        Ok(correct)
    }

    /// Update the difficulty and the board size from the score.
    ///
    /// The difficulty is easy below 10 points, intermediate below 20 points, and advanced
    /// otherwise. The board gets the default size, twice, or four times the default size.
    /// The board never shrinks.
    pub fn update_difficulty(&mut self) {
        let difficulty: GameLevel = GameLevel::from_score(self.score);
        let board_size: Coord = DEFAULT_BOARD_SIZE * difficulty.board_size_multiplier();

        if difficulty != self.difficulty {
            info!("Difficulty is now {difficulty} (score {})", self.score);
        }
        self.difficulty = difficulty;
        self.board_size = self.board_size.max(board_size);
    }

    /// End the game.
    ///
    /// Save the score in the score store, and then clear the game. Failing to save the score
    /// does not prevent the game from ending.
    /// Calling the method again before [`GameEngine::reset_game`] does nothing.
    pub fn end_game(&mut self) -> EndOutcome {
        if self.is_ended() {
            info!("Game has already ended");
            return EndOutcome::AlreadyEnded;
        }

        let record: ScoreRecord = ScoreRecord::now(
            self.round,
            self.score,
            self.win_streak.current(),
            self.win_streak.milestones(),
        );
        match self.score_store.as_mut() {
            Some(store) => match store.append(&record) {
                Ok(()) => info!("Score saved"),
                Err(e) => warn!("Cannot save the score: {e}"),
            },
            None => debug!("No score store, the score is not saved"),
        }

        self.clear();
        self.state = EngineState::Ended;
        EndOutcome::Ended(record)
    }

    /// Start a new game.
    pub fn reset_game(&mut self) {
        self.clear();
        self.state = EngineState::Active;
        info!("Game has been reset");
    }

    /// Clear all the game resources.
    fn clear(&mut self) {
        self.score = 0;
        self.round = DEFAULT_ROUND;
        self.win_streak.clear();
        self.pattern.clear();
        self.occupied.clear();
        self.board_size = self.config.initial_board_size();
        self.difficulty = GameLevel::from_score(0);
        self.last_steps = Steps::default();
        self.last_duration = 0.0;
    }

    /// Apply the scoring policy and update the win streak.
    fn update_score(&mut self, correct: bool) {
        if let Some(streak) = self.win_streak.record(correct) {
            self.notify_win_streak(streak);
        }
        let delta: i64 = ScoreTier::from_round(self.round).delta(correct);
        self.score += delta;
        debug!(
            "Round {}: correct = {correct}  score {delta:+} = {}",
            self.round, self.score
        );
    }

    /// Call the win streak listener.
    fn notify_win_streak(&mut self, streak: u32) {
        match self.win_streak_listener.as_mut() {
            Some(listener) => listener(streak),
            None => info!("Win streak of {streak}, but no listener is set"),
        }
    }

    /// Post-round hook of the rule set.
    fn level_up(&mut self) {
        if self.config.level.adapts_to_score() {
            self.update_difficulty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::scores::MemoryScoreStore;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn engine(seed: u64) -> GameEngine {
        let config: EngineConfig = EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        };
        GameEngine::new(config).unwrap()
    }

    /// Play a round and submit the right answer.
    fn win_round(engine: &mut GameEngine) {
        engine.next_round().unwrap();
        let cells: Vec<Cell> = engine.pattern().cells().to_vec();
        assert!(engine.verify_selection(&cells).unwrap());
    }

    /// Play a round and submit a wrong answer.
    fn lose_round(engine: &mut GameEngine) {
        engine.next_round().unwrap();
        let mut cells: Vec<Cell> = engine.pattern().cells().to_vec();
        cells.pop();
        assert!(!engine.verify_selection(&cells).unwrap());
    }

    /// Play until the given round starts.
    fn reach_round(engine: &mut GameEngine, round: u32) {
        while engine.round() < round {
            win_round(engine);
        }
    }

    #[test]
    fn starts_at_round_one() {
        let engine: GameEngine = engine(1);
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.board_size(), 10);
        assert_eq!(engine.difficulty(), GameLevel::Easy);
        assert_eq!(engine.state(), EngineState::Active);
        assert!(engine.pattern().is_empty());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config: EngineConfig = EngineConfig {
            board_size: Some(0),
            ..EngineConfig::default()
        };
        assert!(matches!(
            GameEngine::new(config),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn next_round_fills_the_occupied_cells() {
        let mut engine: GameEngine = engine(2);
        engine.next_round().unwrap();
        let first: Vec<Cell> = engine.pattern().cells().to_vec();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|c| engine.occupied().contains(c)));

        // Without a correct answer, the round does not change but the pattern does
        engine.next_round().unwrap();
        assert_eq!(engine.pattern().len(), 2);
        assert_eq!(engine.occupied().len(), 4);
        assert!(engine.pattern().cells().iter().all(|c| !first.contains(c)));
    }

    #[test]
    fn empty_selection_changes_nothing() {
        let mut engine: GameEngine = engine(3);
        engine.next_round().unwrap();
        assert!(matches!(
            engine.verify_selection(&[]),
            Err(GameError::EmptySelection)
        ));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.current_win_streak(), 0);
    }

    #[test]
    fn selection_before_the_first_pattern() {
        let mut engine: GameEngine = engine(4);
        assert!(matches!(
            engine.verify_selection(&[Cell::new(0, 0)]),
            Err(GameError::NoActivePattern)
        ));
    }

    #[test]
    fn easy_tier_scores() {
        let mut engine: GameEngine = engine(5);
        reach_round(&mut engine, 5);
        let score: i64 = engine.score();
        win_round(&mut engine);
        assert_eq!(engine.score(), score + 1);
        assert_eq!(engine.round(), 6);

        let score: i64 = engine.score();
        lose_round(&mut engine);
        assert_eq!(engine.score(), score - 2);
        assert_eq!(engine.round(), 6);
    }

    #[test]
    fn intermediate_tier_scores() {
        let mut engine: GameEngine = engine(6);
        reach_round(&mut engine, 15);
        let score: i64 = engine.score();
        win_round(&mut engine);
        assert_eq!(engine.score(), score + 2);

        let score: i64 = engine.score();
        lose_round(&mut engine);
        assert_eq!(engine.score(), score - 1);
    }

    #[test]
    fn advanced_tier_scores() {
        let mut engine: GameEngine = engine(7);
        reach_round(&mut engine, 25);
        let score: i64 = engine.score();
        win_round(&mut engine);
        assert_eq!(engine.score(), score + 10);

        let score: i64 = engine.score();
        lose_round(&mut engine);
        assert_eq!(engine.score(), score);
    }

    #[test]
    fn score_can_be_negative() {
        let mut engine: GameEngine = engine(8);
        lose_round(&mut engine);
        lose_round(&mut engine);
        assert_eq!(engine.score(), -4);
    }

    #[test]
    fn win_streak_milestone() {
        let mut engine: GameEngine = engine(9);
        let events: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink: Arc<Mutex<Vec<u32>>> = Arc::clone(&events);
        engine.set_win_streak_listener(move |streak| sink.lock().unwrap().push(streak));

        for _ in 0..3 {
            win_round(&mut engine);
        }
        assert_eq!(*events.lock().unwrap(), vec![3]);
        assert_eq!(engine.current_win_streak(), 3);
        assert_eq!(engine.total_win_streaks(), 1);

        lose_round(&mut engine);
        assert_eq!(engine.current_win_streak(), 0);
        assert_eq!(engine.total_win_streaks(), 1);
        assert_eq!(*events.lock().unwrap(), vec![3]);
    }

    #[test]
    fn milestone_without_listener() {
        let mut engine: GameEngine = engine(10);
        for _ in 0..3 {
            win_round(&mut engine);
        }
        assert_eq!(engine.total_win_streaks(), 1);
    }

    #[test]
    fn board_doubles_after_round_ten() {
        let mut engine: GameEngine = engine(11);
        reach_round(&mut engine, 10);
        assert_eq!(engine.board_size(), 10);

        win_round(&mut engine);
        assert_eq!(engine.round(), 11);
        assert_eq!(engine.board_size(), 20);

        win_round(&mut engine);
        assert_eq!(engine.board_size(), 20);
    }

    #[test]
    fn wrong_answer_at_round_ten_keeps_the_board() {
        let mut engine: GameEngine = engine(12);
        reach_round(&mut engine, 10);
        lose_round(&mut engine);
        assert_eq!(engine.board_size(), 10);
        assert_eq!(engine.round(), 10);
    }

    #[test]
    fn difficulty_follows_the_score() {
        let mut engine: GameEngine = engine(13);
        reach_round(&mut engine, 11);
        // Ten correct answers at one point each
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.difficulty(), GameLevel::Easy);

        engine.update_difficulty();
        assert_eq!(engine.difficulty(), GameLevel::Intermediate);
        assert_eq!(engine.board_size(), 20);

        reach_round(&mut engine, 16);
        assert_eq!(engine.score(), 20);
        engine.update_difficulty();
        assert_eq!(engine.difficulty(), GameLevel::Advanced);
        assert_eq!(engine.board_size(), 40);
    }

    #[test]
    fn difficulty_never_shrinks_the_board() {
        let mut engine: GameEngine = engine(14);
        reach_round(&mut engine, 11);
        lose_round(&mut engine);
        engine.update_difficulty();
        assert_eq!(engine.difficulty(), GameLevel::Easy);
        assert_eq!(engine.board_size(), 20);
    }

    /// Engine on a 10x10 board with patterns growing by one cell per round.
    fn engine_with_rules(level: GameLevel, seed: u64) -> GameEngine {
        let config: EngineConfig = EngineConfig {
            seed: Some(seed),
            board_size: Some(10),
            level_multiplier: Some(1),
            ..EngineConfig::new(level)
        };
        GameEngine::new(config).unwrap()
    }

    #[test]
    fn intermediate_rules_follow_the_score() {
        let mut engine: GameEngine = engine_with_rules(GameLevel::Intermediate, 21);
        reach_round(&mut engine, 11);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.difficulty(), GameLevel::Intermediate);
        assert_eq!(engine.board_size(), 20);

        // Round 15 is not a multiple of 10: only the difficulty grows the board
        reach_round(&mut engine, 16);
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.difficulty(), GameLevel::Advanced);
        assert_eq!(engine.board_size(), 40);
    }

    #[test]
    fn easy_rules_ignore_the_score() {
        let mut engine: GameEngine = engine_with_rules(GameLevel::Easy, 21);
        reach_round(&mut engine, 11);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.difficulty(), GameLevel::Easy);

        reach_round(&mut engine, 16);
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.difficulty(), GameLevel::Easy);
        assert_eq!(engine.board_size(), 20);
    }

    #[test]
    fn huge_multiplier_is_bounded_by_the_board() {
        let config: EngineConfig = EngineConfig {
            seed: Some(22),
            board_size: Some(10),
            level_multiplier: Some(u32::MAX),
            ..EngineConfig::default()
        };
        let mut engine: GameEngine = GameEngine::new(config).unwrap();
        engine.next_round().unwrap();
        assert_eq!(engine.pattern().len(), 100);
        assert!(matches!(engine.next_round(), Err(GameError::BoardExhausted)));
    }

    #[test]
    fn engine_can_move_to_another_thread() {
        fn assert_send<T: Send>() {}
        assert_send::<GameEngine>();

        let mut engine: GameEngine =
            engine(23).with_score_store(Box::new(MemoryScoreStore::new()));
        engine.set_win_streak_listener(|_| ());
        let shared: Arc<Mutex<GameEngine>> = Arc::new(Mutex::new(engine));

        let worker: Arc<Mutex<GameEngine>> = Arc::clone(&shared);
        let ret: Result<()> = thread::spawn(move || {
            let mut engine = worker.lock().unwrap();
            engine.next_round()
        })
        .join()
        .unwrap();

        assert!(ret.is_ok());
        assert_eq!(shared.lock().unwrap().pattern().len(), 2);
    }

    #[test]
    fn intermediate_patterns_grow_faster() {
        let config: EngineConfig = EngineConfig {
            seed: Some(15),
            board_size: Some(10),
            ..EngineConfig::new(GameLevel::Intermediate)
        };
        let mut engine: GameEngine = GameEngine::new(config).unwrap();
        for _ in 0..5 {
            win_round(&mut engine);
        }
        assert_eq!(engine.score(), 5);
        assert_eq!(engine.difficulty(), GameLevel::Easy);
        // Patterns grow twice as fast
        engine.next_round().unwrap();
        assert_eq!(engine.pattern().len(), 6 * 2 + 1);
    }

    #[test]
    fn end_game_saves_once() {
        let mut engine: GameEngine =
            engine(16).with_score_store(Box::new(MemoryScoreStore::new()));
        win_round(&mut engine);
        win_round(&mut engine);
        lose_round(&mut engine);

        let record: ScoreRecord = match engine.end_game() {
            EndOutcome::Ended(r) => r,
            EndOutcome::AlreadyEnded => panic!("the game was not ended"),
        };
        assert_eq!(record.rounds_played, 3);
        assert_eq!(record.score, 0);
        assert_eq!(record.win_streak, 0);
        assert_eq!(record.milestones, 0);
        assert!(engine.is_ended());
        assert_eq!(engine.round(), 1);
        assert!(engine.occupied().is_empty());

        assert_eq!(engine.end_game(), EndOutcome::AlreadyEnded);
        let saved: Vec<ScoreRecord> = engine.score_store().unwrap().read_all().unwrap();
        assert_eq!(saved, vec![record]);
    }

    #[test]
    fn ended_game_refuses_rounds() {
        let mut engine: GameEngine = engine(17);
        win_round(&mut engine);
        engine.end_game();

        assert!(matches!(engine.next_round(), Err(GameError::InvalidState)));
        assert!(matches!(
            engine.verify_selection(&[Cell::new(1, 1)]),
            Err(GameError::InvalidState)
        ));

        engine.reset_game();
        assert_eq!(engine.state(), EngineState::Active);
        win_round(&mut engine);
        assert_eq!(engine.round(), 2);
    }

    #[test]
    fn failing_store_does_not_block_the_game() {
        struct BrokenStore;

        impl ScoreStore for BrokenStore {
            fn append(&mut self, _record: &ScoreRecord) -> Result<()> {
                Err(GameError::Io(std::io::Error::other("disk full")))
            }

            fn read_all(&self) -> Result<Vec<ScoreRecord>> {
                Ok(Vec::new())
            }
        }

        let mut engine: GameEngine = engine(18).with_score_store(Box::new(BrokenStore));
        win_round(&mut engine);
        assert!(matches!(engine.end_game(), EndOutcome::Ended(_)));
        assert!(engine.is_ended());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut engine: GameEngine = engine(19);
        reach_round(&mut engine, 12);
        engine.reset_game();

        assert_eq!(engine.round(), 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_win_streak(), 0);
        assert_eq!(engine.total_win_streaks(), 0);
        assert_eq!(engine.board_size(), 10);
        assert!(engine.pattern().is_empty());
        assert!(engine.occupied().is_empty());
        assert!(!engine.is_ended());
    }

    #[test]
    fn exhausted_board_is_reported() {
        let config: EngineConfig = EngineConfig {
            seed: Some(20),
            board_size: Some(2),
            ..EngineConfig::default()
        };
        let mut engine: GameEngine = GameEngine::new(config).unwrap();
        // Round 1 uses two cells, the next pattern uses the last two cells
        engine.next_round().unwrap();
        engine.next_round().unwrap();
        assert_eq!(engine.occupied().len(), 4);

        let pattern: Pattern = engine.pattern().clone();
        assert!(matches!(engine.next_round(), Err(GameError::BoardExhausted)));
        assert_eq!(engine.pattern(), &pattern);
    }

    proptest! {
        #[test]
        fn selection_order_does_not_matter(seed in any::<u64>(), shuffle_seed in any::<u64>()) {
            let mut ordered: GameEngine = engine(seed);
            let mut shuffled: GameEngine = engine(seed);
            win_round(&mut ordered);
            win_round(&mut shuffled);
            ordered.next_round().unwrap();
            shuffled.next_round().unwrap();

            let cells: Vec<Cell> = ordered.pattern().cells().to_vec();
            let mut mixed: Vec<Cell> = cells.clone();
            mixed.shuffle(&mut StdRng::seed_from_u64(shuffle_seed));

            prop_assert_eq!(ordered.verify_selection(&cells).unwrap(), true);
            prop_assert_eq!(shuffled.verify_selection(&mixed).unwrap(), true);
            prop_assert_eq!(ordered.score(), shuffled.score());
        }

        #[test]
        fn patterns_fit_the_round_and_the_board(
            seed in any::<u64>(),
            level in prop_oneof![
                Just(GameLevel::Easy),
                Just(GameLevel::Intermediate),
                Just(GameLevel::Advanced)
            ],
            rounds in 1u32..12,
        ) {
            let config: EngineConfig = EngineConfig {
                seed: Some(seed),
                ..EngineConfig::new(level)
            };
            let mut engine: GameEngine = GameEngine::new(config).unwrap();
            let mut seen: HashSet<Cell> = HashSet::new();

            for _ in 0..rounds {
                engine.next_round().unwrap();
                let round: usize = engine.round() as usize;
                let pattern: Vec<Cell> = engine.pattern().cells().to_vec();

                prop_assert!(pattern.len() <= round * level.level_multiplier() as usize + 1);
                for cell in &pattern {
                    prop_assert!(cell.is_within(engine.board_size()));
                    prop_assert!(seen.insert(*cell));
                }
                engine.verify_selection(&pattern).unwrap();
            }
        }
    }
}
