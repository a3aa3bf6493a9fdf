//! Self-play driver
//!
//! Runs a game to completion by repeatedly asking the acting player's
//! controller for a move from the enumerator's list and executing it.

/// Log a message only when verbose logging is compiled in
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
        }
    };
}

use crate::error::PrincipalityError;
use crate::game::controller::PlayerController;
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::victory::{self, GameOverReason};
use crate::game::{GameEngine, GameState};
use crate::Result;

/// Reason the simulation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The Province pile ran out
    ProvincesGone,
    /// Enough supply piles ran out
    PilesEmpty,
    /// Game reached the maximum turn limit
    TurnLimit,
}

impl From<GameOverReason> for GameEndReason {
    fn from(reason: GameOverReason) -> Self {
        match reason {
            GameOverReason::ProvincesGone => GameEndReason::ProvincesGone,
            GameOverReason::PilesEmpty => GameEndReason::PilesEmpty,
        }
    }
}

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Highest-scoring seat (earliest seat on ties)
    pub winner: Option<usize>,
    pub scores: Vec<i32>,
    /// Completed turns (across all players)
    pub turns_played: u32,
    pub moves_played: usize,
    pub end_reason: GameEndReason,
}

pub struct Simulation<'a> {
    engine: &'a GameEngine,
    pub state: GameState,
    pub logger: GameLogger,
    /// Maximum turn number before stopping
    max_turns: u32,
    moves_played: usize,
}

impl<'a> Simulation<'a> {
    pub fn new(engine: &'a GameEngine, state: GameState) -> Self {
        Simulation {
            engine,
            state,
            logger: GameLogger::new(),
            max_turns: 500,
            moves_played: 0,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Play until the game ends or the turn limit is hit.
    ///
    /// `controllers` must hold one controller per seat, in any order.
    pub fn run_game(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<GameResult> {
        self.check_controllers(controllers)?;
        self.logger.normal(&format!(
            "Kingdom: {}",
            self.state
                .kingdom()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        loop {
            if let Some(result) = self.step(controllers)? {
                for controller in controllers.iter_mut() {
                    let won = result.winner == Some(controller.player());
                    controller.on_game_end(&self.state, won);
                }
                self.logger.minimal(&format!(
                    "Game over ({:?}) after {} turns. Scores: {:?}",
                    result.end_reason, result.turns_played, result.scores
                ));
                return Ok(result);
            }
        }
    }

    /// Execute a single move. Returns the result once the game has ended.
    pub fn step(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> Result<Option<GameResult>> {
        if let Some(result) = self.finished() {
            return Ok(Some(result));
        }

        let actor = self.state.acting_player();
        let moves = self.engine.get_valid_moves(&self.state);
        let controller = controllers
            .iter_mut()
            .find(|c| c.player() == actor)
            .ok_or_else(|| PrincipalityError::InvalidAction(format!("no controller for player {}", actor + 1)))?;

        log_if_verbose!(
            self,
            "Player {} hand: {:?}, options: {}",
            actor + 1,
            self.state.players[actor].hand.cards,
            moves.len()
        );

        let choice = controller.choose_move(&self.state, &moves);
        let mv = moves.get(choice).ok_or_else(|| {
            PrincipalityError::InvalidAction(format!(
                "{} chose option {choice} of {}",
                controller.name(),
                moves.len()
            ))
        })?;
        self.logger.controller_choice(controller.name(), &format!("chose {mv}"));

        let log_start = self.state.log.len();
        let outcome = self.engine.execute_move_as(&self.state, controller.player(), mv)?;
        self.state = outcome.state;
        self.moves_played += 1;
        self.logger.game_events(self.state.log.since(log_start));

        Ok(self.finished())
    }

    fn finished(&self) -> Option<GameResult> {
        let end_reason = match victory::game_over_reason(&self.state) {
            Some(reason) => GameEndReason::from(reason),
            None if self.state.turn_number > self.max_turns => GameEndReason::TurnLimit,
            None => return None,
        };
        let scores = victory::all_scores(&self.state);
        Some(GameResult {
            winner: victory::leader(&scores),
            scores,
            turns_played: self.state.turn_number.saturating_sub(1),
            moves_played: self.moves_played,
            end_reason,
        })
    }

    fn check_controllers(&self, controllers: &[Box<dyn PlayerController>]) -> Result<()> {
        for seat in 0..self.state.player_count() {
            let count = controllers.iter().filter(|c| c.player() == seat).count();
            if count != 1 {
                return Err(PrincipalityError::InvalidAction(format!(
                    "expected one controller for player {}, found {count}",
                    seat + 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::logger::OutputMode;
    use crate::game::RandomController;

    fn random_controllers(n: usize, seed: u64) -> Vec<Box<dyn PlayerController>> {
        (0..n)
            .map(|p| Box::new(RandomController::with_seed(p, seed + p as u64)) as Box<dyn PlayerController>)
            .collect()
    }

    #[test]
    fn test_random_game_terminates() {
        let engine = GameEngine::new(42);
        let state = engine.initialize_game(2).unwrap();
        let mut sim = Simulation::new(&engine, state)
            .with_max_turns(60)
            .with_verbosity(VerbosityLevel::Silent);
        let mut controllers = random_controllers(2, 100);
        let result = sim.run_game(&mut controllers).unwrap();
        assert_eq!(result.scores.len(), 2);
        assert!(result.moves_played > 0);
        if result.end_reason == GameEndReason::TurnLimit {
            assert!(sim.state.turn_number > 60);
        }
    }

    #[test]
    fn test_missing_controller_rejected() {
        let engine = GameEngine::new(1);
        let state = engine.initialize_game(3).unwrap();
        let mut sim = Simulation::new(&engine, state);
        let mut controllers = random_controllers(2, 0);
        assert!(matches!(
            sim.run_game(&mut controllers),
            Err(PrincipalityError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_simulation_captures_events() {
        let engine = GameEngine::new(3);
        let state = engine.initialize_game(2).unwrap();
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Normal);
        logger.set_output_mode(OutputMode::Memory);
        let mut sim = Simulation::new(&engine, state).with_logger(logger);
        let mut controllers = random_controllers(2, 9);
        for _ in 0..5 {
            sim.step(&mut controllers).unwrap();
        }
        assert_eq!(sim.moves_played(), 5);
        let events = sim
            .logger
            .logs()
            .iter()
            .filter(|l| l.category == Some("game_event"))
            .count();
        assert_eq!(events, 5);
    }
}
