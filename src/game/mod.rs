//! Game state, turn structure and rules engine

pub(crate) mod continuation;
pub mod controller;
mod deck;
pub mod engine;
pub mod enumerator;
pub mod executor;
pub mod logger;
pub mod moves;
pub mod parser;
pub mod pending;
pub mod phase;
pub mod random_controller;
pub(crate) mod resolver;
pub mod simulation;
pub mod state;
pub mod victory;

pub use controller::{PlayerController, ScriptedController};
pub use engine::GameEngine;
pub use executor::MoveOutcome;
pub use logger::{GameLog, GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use moves::{Move, MoveKind};
pub use pending::{PendingEffect, PendingKind, QueuedPlay};
pub use phase::Phase;
pub use random_controller::RandomController;
pub use simulation::{GameEndReason, GameResult, Simulation};
pub use state::{GameOptions, GameState, Supply};
pub use victory::{GameOverReason, GameOverReport};
