//! Player representation

use crate::core::CardName;
use crate::zones::{CardZone, Zone};
use serde::{Deserialize, Serialize};

/// One player's cards and per-turn counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: CardZone,

    /// Ordered, index 0 is the next card drawn
    pub draw_pile: CardZone,

    pub discard_pile: CardZone,

    /// Cards played this turn, swept to discard at cleanup
    pub in_play: CardZone,

    /// Cards held aside while Library or Adventurer resolves
    pub set_aside: CardZone,

    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
}

impl PlayerState {
    /// A player with the given draw pile and fresh turn counters
    pub fn new(draw_pile: Vec<CardName>) -> Self {
        PlayerState {
            hand: CardZone::new(),
            draw_pile: CardZone::from_cards(draw_pile),
            discard_pile: CardZone::new(),
            in_play: CardZone::new(),
            set_aside: CardZone::new(),
            actions: 1,
            buys: 1,
            coins: 0,
        }
    }

    pub fn zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::DrawPile => &self.draw_pile,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard_pile,
            Zone::InPlay => &self.in_play,
            Zone::SetAside => &self.set_aside,
        }
    }

    /// Every card the player owns, across all five zones
    pub fn all_cards(&self) -> impl Iterator<Item = CardName> + '_ {
        Zone::ALL.into_iter().flat_map(move |zone| self.zone(zone).iter())
    }

    pub fn total_cards(&self) -> usize {
        Zone::ALL.into_iter().map(|zone| self.zone(zone).len()).sum()
    }

    pub fn reset_turn_counters(&mut self) {
        self.actions = 1;
        self.buys = 1;
        self.coins = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let player = PlayerState::new(vec![CardName::Copper; 7]);
        assert_eq!(player.draw_pile.len(), 7);
        assert!(player.hand.is_empty());
        assert_eq!((player.actions, player.buys, player.coins), (1, 1, 0));
    }

    #[test]
    fn test_total_cards_counts_every_zone() {
        let mut player = PlayerState::new(vec![CardName::Copper, CardName::Estate]);
        player.hand.add(CardName::Silver);
        player.discard_pile.add(CardName::Gold);
        player.in_play.add(CardName::Village);
        player.set_aside.add(CardName::Smithy);
        assert_eq!(player.total_cards(), 6);
        assert_eq!(player.all_cards().count(), 6);
        assert_eq!(player.zone(Zone::SetAside).len(), 1);
    }
}
