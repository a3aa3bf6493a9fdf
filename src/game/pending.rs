//! Pending effects: a card's resolution waiting on a follow-up move

use crate::core::{CardName, CardType, GainDestination, TrashThenGain};
use crate::game::MoveKind;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A card play queued behind the current pending effect (Throne Room)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedPlay {
    pub card: CardName,
    /// Second resolution of a replayed card
    pub repeat: bool,
}

/// The decision currently awaited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "awaiting", rename_all = "snake_case")]
pub enum PendingKind {
    /// Cellar: discard any number, then draw that many
    DiscardForCellar,

    /// Chapel: trash up to `max_trash` cards
    TrashCards { max_trash: usize },

    /// Moneylender: trash zero or one Copper for coins
    TrashCopper { coins: u32 },

    /// First half of a trash-then-gain card (Remodel, Mine)
    TrashForGain { spec: TrashThenGain },

    /// Gain a card from the supply costing at most `max_gain_cost`
    GainCard {
        max_gain_cost: u32,
        filter: Option<CardType>,
        destination: GainDestination,
        /// Card trashed in the previous step, when the ceiling came from it
        trashed_card: Option<CardName>,
    },

    /// Militia: `target_player` discards down to `hand_size`
    DiscardToHandSize { target_player: usize, hand_size: usize },

    /// Bureaucrat: `target_player` puts a Victory card from hand on their deck
    RevealAndTopdeck { target_player: usize },

    /// Spy: the attacker decides about `target_player`'s revealed top card
    SpyDecision {
        target_player: usize,
        revealed: CardName,
    },

    /// Thief: the attacker picks which revealed Treasure to trash
    ThiefSelectTreasure {
        target_player: usize,
        revealed: SmallVec<[CardName; 2]>,
    },

    /// Thief: the attacker may gain the Treasure just trashed
    ThiefGainTrashed { target_player: usize, card: CardName },

    /// Throne Room: choose an Action card to play twice
    SelectActionForThrone,

    /// Chancellor: optionally move the whole draw pile to discard
    ChancellorDecision { deck_size: usize },

    /// Library: set aside the Action card just drawn, or keep it
    LibrarySetAside { card: CardName, target_hand_size: usize },
}

impl PendingKind {
    /// The move type that continues this effect
    pub fn expected_move(&self) -> MoveKind {
        match self {
            PendingKind::DiscardForCellar => MoveKind::DiscardForCellar,
            PendingKind::TrashCards { .. } | PendingKind::TrashCopper { .. } => {
                MoveKind::TrashCards
            }
            PendingKind::TrashForGain { spec } => {
                if spec.trash_filter.is_some() {
                    MoveKind::SelectTreasureToTrash
                } else {
                    MoveKind::TrashCards
                }
            }
            PendingKind::GainCard { .. } => MoveKind::GainCard,
            PendingKind::DiscardToHandSize { .. } => MoveKind::DiscardToHandSize,
            PendingKind::RevealAndTopdeck { .. } => MoveKind::RevealAndTopdeck,
            PendingKind::SpyDecision { .. } => MoveKind::SpyDecision,
            PendingKind::ThiefSelectTreasure { .. } => MoveKind::SelectTreasureToTrash,
            PendingKind::ThiefGainTrashed { .. } => MoveKind::GainTrashedCard,
            PendingKind::SelectActionForThrone => MoveKind::SelectActionForThrone,
            PendingKind::ChancellorDecision { .. } => MoveKind::ChancellorDecision,
            PendingKind::LibrarySetAside { .. } => MoveKind::LibrarySetAside,
        }
    }

    /// Player who must answer, if it is not the player whose turn it is
    pub fn target_actor(&self) -> Option<usize> {
        match self {
            PendingKind::DiscardToHandSize { target_player, .. }
            | PendingKind::RevealAndTopdeck { target_player } => Some(*target_player),
            _ => None,
        }
    }
}

/// A card's resolution waiting on a follow-up move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    /// Card whose resolution is waiting
    pub card: CardName,
    pub kind: PendingKind,
    /// Card plays to resolve once this effect completes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queued: Vec<QueuedPlay>,
}

impl PendingEffect {
    pub fn new(card: CardName, kind: PendingKind) -> Self {
        PendingEffect {
            card,
            kind,
            queued: Vec::new(),
        }
    }

    pub fn expected_move(&self) -> MoveKind {
        self.kind.expected_move()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_moves() {
        let remodel = PendingKind::TrashForGain {
            spec: TrashThenGain {
                trash_filter: None,
                cost_bonus: 2,
                gain_filter: None,
                destination: GainDestination::Discard,
            },
        };
        assert_eq!(remodel.expected_move(), MoveKind::TrashCards);

        let mine = PendingKind::TrashForGain {
            spec: TrashThenGain {
                trash_filter: Some(CardType::Treasure),
                cost_bonus: 3,
                gain_filter: Some(CardType::Treasure),
                destination: GainDestination::Hand,
            },
        };
        assert_eq!(mine.expected_move(), MoveKind::SelectTreasureToTrash);
        assert_eq!(
            PendingKind::TrashCopper { coins: 3 }.expected_move(),
            MoveKind::TrashCards
        );
    }

    #[test]
    fn test_target_actor() {
        let militia = PendingKind::DiscardToHandSize {
            target_player: 2,
            hand_size: 3,
        };
        assert_eq!(militia.target_actor(), Some(2));
        let spy = PendingKind::SpyDecision {
            target_player: 1,
            revealed: CardName::Copper,
        };
        assert_eq!(spy.target_actor(), None);
    }
}
