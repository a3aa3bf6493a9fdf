//! Moves a player can submit
//!
//! `Move` values are what the executor accepts and what the enumerator
//! produces. Their `Display` form is the canonical command string, which
//! [`crate::game::parser::parse_move`] reads back.

use crate::core::CardName;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    PlayAction { card: CardName },
    PlayTreasure { card: CardName },
    /// Play every Treasure in hand, in hand order
    PlayAllTreasures,
    Buy { card: CardName },
    EndPhase,

    // Pending-effect continuations
    DiscardForCellar { cards: Vec<CardName> },
    TrashCards { cards: Vec<CardName> },
    GainCard { card: CardName },
    SelectTreasureToTrash { card: CardName },
    DiscardToHandSize { cards: Vec<CardName> },
    RevealAndTopdeck { card: CardName },
    /// `discard: true` discards the revealed card, `false` puts it back
    SpyDecision { discard: bool },
    GainTrashedCard { gain: bool },
    /// `None` declines to play a card twice
    SelectActionForThrone { card: Option<CardName> },
    ChancellorDecision { discard_deck: bool },
    LibrarySetAside { set_aside: bool },
}

/// Move type tag, used to match moves against a pending effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    PlayAction,
    PlayTreasure,
    PlayAllTreasures,
    Buy,
    EndPhase,
    DiscardForCellar,
    TrashCards,
    GainCard,
    SelectTreasureToTrash,
    DiscardToHandSize,
    RevealAndTopdeck,
    SpyDecision,
    GainTrashedCard,
    SelectActionForThrone,
    ChancellorDecision,
    LibrarySetAside,
}

impl MoveKind {
    pub const ALL: [MoveKind; 16] = [
        MoveKind::PlayAction,
        MoveKind::PlayTreasure,
        MoveKind::PlayAllTreasures,
        MoveKind::Buy,
        MoveKind::EndPhase,
        MoveKind::DiscardForCellar,
        MoveKind::TrashCards,
        MoveKind::GainCard,
        MoveKind::SelectTreasureToTrash,
        MoveKind::DiscardToHandSize,
        MoveKind::RevealAndTopdeck,
        MoveKind::SpyDecision,
        MoveKind::GainTrashedCard,
        MoveKind::SelectActionForThrone,
        MoveKind::ChancellorDecision,
        MoveKind::LibrarySetAside,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::PlayAction => "play_action",
            MoveKind::PlayTreasure => "play_treasure",
            MoveKind::PlayAllTreasures => "play_all_treasures",
            MoveKind::Buy => "buy",
            MoveKind::EndPhase => "end_phase",
            MoveKind::DiscardForCellar => "discard_for_cellar",
            MoveKind::TrashCards => "trash_cards",
            MoveKind::GainCard => "gain_card",
            MoveKind::SelectTreasureToTrash => "select_treasure_to_trash",
            MoveKind::DiscardToHandSize => "discard_to_hand_size",
            MoveKind::RevealAndTopdeck => "reveal_and_topdeck",
            MoveKind::SpyDecision => "spy_decision",
            MoveKind::GainTrashedCard => "gain_trashed_card",
            MoveKind::SelectActionForThrone => "select_action_for_throne",
            MoveKind::ChancellorDecision => "chancellor_decision",
            MoveKind::LibrarySetAside => "library_set_aside",
        }
    }

    pub fn from_keyword(s: &str) -> Option<MoveKind> {
        MoveKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Whether this kind continues a pending effect rather than starting something
    pub fn is_continuation(&self) -> bool {
        !matches!(
            self,
            MoveKind::PlayAction
                | MoveKind::PlayTreasure
                | MoveKind::PlayAllTreasures
                | MoveKind::Buy
                | MoveKind::EndPhase
        )
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::PlayAction { .. } => MoveKind::PlayAction,
            Move::PlayTreasure { .. } => MoveKind::PlayTreasure,
            Move::PlayAllTreasures => MoveKind::PlayAllTreasures,
            Move::Buy { .. } => MoveKind::Buy,
            Move::EndPhase => MoveKind::EndPhase,
            Move::DiscardForCellar { .. } => MoveKind::DiscardForCellar,
            Move::TrashCards { .. } => MoveKind::TrashCards,
            Move::GainCard { .. } => MoveKind::GainCard,
            Move::SelectTreasureToTrash { .. } => MoveKind::SelectTreasureToTrash,
            Move::DiscardToHandSize { .. } => MoveKind::DiscardToHandSize,
            Move::RevealAndTopdeck { .. } => MoveKind::RevealAndTopdeck,
            Move::SpyDecision { .. } => MoveKind::SpyDecision,
            Move::GainTrashedCard { .. } => MoveKind::GainTrashedCard,
            Move::SelectActionForThrone { .. } => MoveKind::SelectActionForThrone,
            Move::ChancellorDecision { .. } => MoveKind::ChancellorDecision,
            Move::LibrarySetAside { .. } => MoveKind::LibrarySetAside,
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn write_cards(f: &mut fmt::Formatter<'_>, kind: MoveKind, cards: &[CardName]) -> fmt::Result {
    write!(f, "{kind}")?;
    for (i, card) in cards.iter().enumerate() {
        let sep = if i == 0 { " " } else { "," };
        write!(f, "{sep}{card}")?;
    }
    Ok(())
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Move::PlayAction { card }
            | Move::PlayTreasure { card }
            | Move::Buy { card }
            | Move::GainCard { card }
            | Move::SelectTreasureToTrash { card }
            | Move::RevealAndTopdeck { card } => write!(f, "{kind} {card}"),
            Move::PlayAllTreasures | Move::EndPhase => write!(f, "{kind}"),
            Move::DiscardForCellar { cards }
            | Move::TrashCards { cards }
            | Move::DiscardToHandSize { cards } => write_cards(f, kind, cards),
            Move::SpyDecision { discard } => write!(f, "{kind} {}", yes_no(*discard)),
            Move::GainTrashedCard { gain } => write!(f, "{kind} {}", yes_no(*gain)),
            Move::ChancellorDecision { discard_deck } => {
                write!(f, "{kind} {}", yes_no(*discard_deck))
            }
            Move::LibrarySetAside { set_aside } => write!(f, "{kind} {}", yes_no(*set_aside)),
            Move::SelectActionForThrone { card: Some(card) } => write!(f, "{kind} {card}"),
            Move::SelectActionForThrone { card: None } => write!(f, "{kind}"),
        }
    }
}
