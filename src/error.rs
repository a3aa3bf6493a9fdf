//! Error types for Principality

use crate::core::{CardName, CardType};
use crate::game::{MoveKind, Phase};
use thiserror::Error;

/// A move the rules do not allow in the current state.
///
/// These are always recoverable: the state the move was applied to is left
/// untouched and the caller may retry with a different move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Pending effect mismatch: {card} awaits {expected}, got {got}")]
    PendingEffectMismatch {
        card: CardName,
        expected: MoveKind,
        got: MoveKind,
    },

    #[error("No pending effect awaits {0}")]
    NoPendingEffect(MoveKind),

    #[error("Cannot {kind} during {phase} phase")]
    WrongPhase { kind: MoveKind, phase: Phase },

    #[error("Not your turn: Player {} must act, got a move from Player {}", .expected + 1, .got + 1)]
    NotYourTurn { expected: usize, got: usize },

    #[error("No actions remaining")]
    NoActionsRemaining,

    #[error("No buys remaining")]
    NoBuysRemaining,

    #[error("{0} not in hand")]
    NotInHand(CardName),

    #[error("{card} is not a {expected} card")]
    WrongCardType { card: CardName, expected: CardType },

    #[error("{0} is not in the supply")]
    NotInSupply(CardName),

    #[error("{0} supply pile is empty")]
    SupplyExhausted(CardName),

    #[error("Not enough coins to buy {card}. Need {cost}, have {coins}")]
    InsufficientCoins { card: CardName, cost: u32, coins: u32 },

    #[error("Card costs more than allowed: {card} costs {cost}, maximum is {max}")]
    TooExpensive { card: CardName, cost: u32, max: u32 },

    #[error("Can only {verb} up to {max} cards, got {got}")]
    TooManyCards {
        verb: &'static str,
        max: usize,
        got: usize,
    },

    #[error("Must {verb} exactly {expected} cards, got {got}")]
    WrongCardCount {
        verb: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Cannot select {count} {card}(s), only {available} available")]
    NotEnoughCopies {
        card: CardName,
        count: usize,
        available: usize,
    },

    #[error("Must trash a card")]
    MustTrashCard,

    #[error("No qualifying card for {card}: {reason}")]
    NoQualifyingCard { card: CardName, reason: &'static str },

    #[error("{0} is not among the revealed cards")]
    NotRevealed(CardName),

    #[error("Can only select {expected}, got {got}")]
    WrongCard { expected: CardName, got: CardName },

    #[error("No treasures in hand")]
    NoTreasuresInHand,
}

/// A move string that could not be turned into a [`crate::game::Move`].
///
/// Distinct from [`MoveError`]: parsing failures never reach the rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty move")]
    Empty,

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid index: {index}. Must be 0-{max}")]
    InvalidIndex { index: String, max: usize },

    #[error("Hand is empty")]
    EmptyHand,

    #[error("{0} is not playable")]
    NotPlayable(CardName),

    #[error("{0} not in hand")]
    NotInHand(CardName),

    #[error("{0} is not in the supply")]
    NotInSupply(CardName),

    #[error("Invalid choice '{0}' (expected yes or no)")]
    InvalidChoice(String),

    #[error("Cannot parse move: \"{0}\"")]
    Unrecognized(String),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum PrincipalityError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid player count: {0} (supported: 1-6)")]
    InvalidPlayerCount(usize),

    #[error("Invalid game options: {0}")]
    InvalidOptions(String),

    #[error("Invalid controller action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrincipalityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_messages() {
        let err = MoveError::TooExpensive {
            card: CardName::Gold,
            cost: 6,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "Card costs more than allowed: Gold costs 6, maximum is 4"
        );

        let err = MoveError::TooManyCards {
            verb: "trash",
            max: 4,
            got: 5,
        };
        assert_eq!(err.to_string(), "Can only trash up to 4 cards, got 5");

        let err = MoveError::WrongCardType {
            card: CardName::Estate,
            expected: CardType::Treasure,
        };
        assert_eq!(err.to_string(), "Estate is not a Treasure card");

        let err = MoveError::NotYourTurn { expected: 1, got: 0 };
        assert_eq!(
            err.to_string(),
            "Not your turn: Player 2 must act, got a move from Player 1"
        );
    }

    #[test]
    fn test_crate_error_wraps_move_error() {
        let err: PrincipalityError = MoveError::NoBuysRemaining.into();
        assert!(matches!(err, PrincipalityError::Move(MoveError::NoBuysRemaining)));
        assert_eq!(err.to_string(), "No buys remaining");
    }
}
