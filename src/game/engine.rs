//! `GameEngine`: the public entry point
//!
//! The engine holds only its seed and setup options. Every game-changing call
//! takes a `GameState` and returns a new one, so one engine can serve any
//! number of games and states can be kept, compared or replayed freely.

use crate::error::{MoveError, ParseError};
use crate::game::executor::{self, MoveOutcome};
use crate::game::victory::{self, GameOverReport};
use crate::game::{enumerator, parser, GameOptions, GameState, Move};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    seed: u64,
    options: GameOptions,
}

impl GameEngine {
    pub fn new(seed: u64) -> Self {
        Self::with_options(seed, GameOptions::default())
    }

    pub fn with_options(seed: u64, options: GameOptions) -> Self {
        GameEngine { seed, options }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Set up a game for `player_count` players with the engine's options
    pub fn initialize_game(&self, player_count: usize) -> Result<GameState> {
        GameState::new(self.seed, player_count, &self.options)
    }

    /// Set up a game with options that override the engine's own
    pub fn initialize_game_with(&self, player_count: usize, options: &GameOptions) -> Result<GameState> {
        GameState::new(self.seed, player_count, options)
    }

    /// Apply one move. `state` is never modified; on error keep using it.
    pub fn execute_move(&self, state: &GameState, mv: &Move) -> std::result::Result<MoveOutcome, MoveError> {
        executor::execute_move(state, mv)
    }

    /// Apply one move submitted by seat `player`; fails with
    /// [`MoveError::NotYourTurn`] unless that seat is the one to act.
    pub fn execute_move_as(
        &self,
        state: &GameState,
        player: usize,
        mv: &Move,
    ) -> std::result::Result<MoveOutcome, MoveError> {
        executor::execute_move_as(state, player, mv)
    }

    /// Every move the acting player may make
    pub fn get_valid_moves(&self, state: &GameState) -> Vec<Move> {
        enumerator::valid_moves(state)
    }

    /// Moves for a specific seat; empty when it is not that seat's decision
    pub fn get_valid_moves_for(&self, state: &GameState, player: usize) -> Vec<Move> {
        enumerator::valid_moves_for(state, player)
    }

    pub fn check_game_over(&self, state: &GameState) -> GameOverReport {
        victory::check_game_over(state)
    }

    pub fn calculate_victory_points(&self, state: &GameState, player: usize) -> i32 {
        victory::calculate_victory_points(state, player)
    }

    pub fn parse_move(&self, text: &str, state: &GameState) -> std::result::Result<Move, ParseError> {
        parser::parse_move(text, state)
    }
}
