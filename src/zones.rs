//! Player zones (draw pile, hand, discard pile, in play, set aside)

use crate::core::CardName;
use serde::{Deserialize, Serialize};

/// Different zones a player's cards can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    DrawPile,
    Hand,
    Discard,
    InPlay,
    SetAside,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Hand,
        Zone::DrawPile,
        Zone::Discard,
        Zone::InPlay,
        Zone::SetAside,
    ];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Zone::DrawPile => "draw pile",
            Zone::Hand => "hand",
            Zone::Discard => "discard pile",
            Zone::InPlay => "in play",
            Zone::SetAside => "set aside",
        };
        write!(f, "{s}")
    }
}

/// An ordered sequence of cards.
///
/// For the draw pile index 0 is the top card. For the other zones order is
/// insertion order, which keeps move enumeration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardZone {
    pub cards: Vec<CardName>,
}

impl CardZone {
    pub fn new() -> Self {
        CardZone { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<CardName>) -> Self {
        CardZone { cards }
    }

    pub fn add(&mut self, card: CardName) {
        self.cards.push(card);
    }

    /// Remove the first copy of `card`
    pub fn remove(&mut self, card: CardName) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            // remove() rather than swap_remove(): hand order feeds move enumeration
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove the most recently added copy of `card`
    pub fn remove_last(&mut self, card: CardName) -> bool {
        if let Some(pos) = self.cards.iter().rposition(|&c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: CardName) -> bool {
        self.cards.contains(&card)
    }

    pub fn count(&self, card: CardName) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardName> + '_ {
        self.cards.iter().copied()
    }

    /// Take the top card (index 0)
    pub fn draw_top(&mut self) -> Option<CardName> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Look at the top card without removing it
    pub fn peek_top(&self) -> Option<CardName> {
        self.cards.first().copied()
    }

    pub fn add_to_top(&mut self, card: CardName) {
        self.cards.insert(0, card);
    }

    /// Move every card out, leaving the zone empty
    pub fn take_all(&mut self) -> Vec<CardName> {
        std::mem::take(&mut self.cards)
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardName>) {
        self.cards.extend(cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl From<Vec<CardName>> for CardZone {
    fn from(cards: Vec<CardName>) -> Self {
        CardZone::from_cards(cards)
    }
}
