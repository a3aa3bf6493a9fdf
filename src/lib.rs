//! Principality - a deterministic deck-building card game engine
//!
//! States are immutable values: every move produces a new `GameState`, and
//! all randomness comes from the seed carried inside the state, so a seed and
//! a move list always reproduce the same game.

pub mod core;
pub mod error;
pub mod game;
pub mod rng;
pub mod zones;

pub use error::{MoveError, ParseError, PrincipalityError, Result};
