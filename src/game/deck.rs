//! Deck operations: drawing, reshuffling, revealing and gaining

use crate::core::{CardName, GainDestination, PlayerState};
use crate::game::GameState;
use crate::rng::ShuffleRng;

/// Shuffle the discard pile and put it under the draw pile
fn reshuffle(player: &mut PlayerState, rng: &mut ShuffleRng) {
    let mut cards = player.discard_pile.take_all();
    rng.shuffle(&mut cards);
    player.draw_pile.extend(cards);
}

/// Take the top card, reshuffling the discard pile in if the draw pile is empty
fn draw_one(player: &mut PlayerState, rng: &mut ShuffleRng) -> Option<CardName> {
    if player.draw_pile.is_empty() {
        if player.discard_pile.is_empty() {
            return None;
        }
        reshuffle(player, rng);
    }
    player.draw_pile.draw_top()
}

impl GameState {
    /// Draw up to `n` cards into `player`'s hand. Stops early when both the
    /// draw pile and discard pile are empty. Returns the number drawn.
    pub fn draw(&mut self, player: usize, n: usize) -> usize {
        let GameState { players, rng, .. } = self;
        let player = &mut players[player];
        let mut drawn = 0;
        while drawn < n {
            match draw_one(player, rng) {
                Some(card) => {
                    player.hand.add(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Draw a single card and return it
    pub fn draw_card(&mut self, player: usize) -> Option<CardName> {
        let GameState { players, rng, .. } = self;
        let player = &mut players[player];
        let card = draw_one(player, rng)?;
        player.hand.add(card);
        Some(card)
    }

    /// Take the top card of `player`'s deck without putting it anywhere
    pub fn take_top(&mut self, player: usize) -> Option<CardName> {
        let GameState { players, rng, .. } = self;
        draw_one(&mut players[player], rng)
    }

    /// Make sure at least `n` cards sit on top of the draw pile, reshuffling
    /// the discard pile under it if needed. Returns the cards now on top
    /// (fewer than `n` if the player doesn't have enough).
    pub fn reveal_top(&mut self, player: usize, n: usize) -> Vec<CardName> {
        let GameState { players, rng, .. } = self;
        let player = &mut players[player];
        if player.draw_pile.len() < n && !player.discard_pile.is_empty() {
            reshuffle(player, rng);
        }
        player.draw_pile.iter().take(n).collect()
    }

    /// Move a gained card into `player`'s chosen zone
    pub fn receive(&mut self, player: usize, card: CardName, destination: GainDestination) {
        let player = &mut self.players[player];
        match destination {
            GainDestination::Discard => player.discard_pile.add(card),
            GainDestination::Hand => player.hand.add(card),
            GainDestination::DrawPile => player.draw_pile.add_to_top(card),
        }
    }

    /// Gain `card` from the supply. Returns false if the pile is missing or empty.
    pub fn gain(&mut self, player: usize, card: CardName, destination: GainDestination) -> bool {
        if !self.supply.take(card) {
            return false;
        }
        self.receive(player, card, destination);
        true
    }

    /// Move one copy of each listed card from hand to the discard pile
    pub fn discard_from_hand(&mut self, player: usize, cards: &[CardName]) {
        let player = &mut self.players[player];
        for &card in cards {
            if player.hand.remove(card) {
                player.discard_pile.add(card);
            }
        }
    }

    /// Move one copy of each listed card from hand to the trash
    pub fn trash_from_hand(&mut self, player: usize, cards: &[CardName]) {
        for &card in cards {
            if self.players[player].hand.remove(card) {
                self.trash.add(card);
            }
        }
    }

    /// Sweep hand and in-play to discard, draw a fresh hand, reset counters
    pub fn cleanup(&mut self, player: usize) {
        let hand_size = self.hand_size;
        let p = &mut self.players[player];
        let swept = p.hand.take_all();
        p.discard_pile.extend(swept);
        let played = p.in_play.take_all();
        p.discard_pile.extend(played);
        let aside = p.set_aside.take_all();
        p.discard_pile.extend(aside);
        p.reset_turn_counters();
        self.draw(player, hand_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOptions;

    fn bare_state() -> GameState {
        let options = GameOptions::default().with_kingdom(vec![CardName::Village, CardName::Smithy]);
        let mut state = GameState::new(5, 2, &options).unwrap();
        for p in &mut state.players {
            p.hand.clear();
            p.draw_pile.clear();
            p.discard_pile.clear();
        }
        state
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut state = bare_state();
        state.players[0].draw_pile.extend([CardName::Gold]);
        state.players[0]
            .discard_pile
            .extend([CardName::Copper, CardName::Silver, CardName::Estate]);
        let cursor = state.rng.cursor();

        let drawn = state.draw(0, 3);
        assert_eq!(drawn, 3);
        assert_eq!(state.players[0].hand.cards[0], CardName::Gold);
        assert_eq!(state.players[0].draw_pile.len(), 1);
        assert!(state.players[0].discard_pile.is_empty());
        assert_eq!(state.rng.cursor(), cursor + 1);
    }

    #[test]
    fn test_repeated_reshuffles_conserve_cards() {
        let mut state = bare_state();
        let mut deck = vec![
            CardName::Copper,
            CardName::Copper,
            CardName::Silver,
            CardName::Gold,
            CardName::Estate,
            CardName::Village,
        ];
        state.players[0].discard_pile.extend(deck.iter().copied());
        deck.sort();
        let total = state.total_cards();
        let cursor = state.rng.cursor();

        for round in 1..=3 {
            assert!(state.players[0].draw_pile.is_empty());
            assert_eq!(state.draw(0, 10), deck.len());
            assert_eq!(state.rng.cursor(), cursor + round);
            assert_eq!(state.total_cards(), total);

            let mut hand = state.players[0].hand.take_all();
            assert!(state.players[0].discard_pile.is_empty());
            hand.sort();
            assert_eq!(hand, deck);
            state.players[0].discard_pile.extend(hand);
        }
    }

    #[test]
    fn test_draw_stops_when_out_of_cards() {
        let mut state = bare_state();
        state.players[1].draw_pile.extend([CardName::Copper, CardName::Copper]);
        assert_eq!(state.draw(1, 5), 2);
        assert_eq!(state.players[1].hand.len(), 2);
        assert_eq!(state.draw(1, 5), 0);
    }

    #[test]
    fn test_reveal_top_puts_discard_underneath() {
        let mut state = bare_state();
        state.players[0].draw_pile.extend([CardName::Gold]);
        state.players[0].discard_pile.extend([CardName::Estate]);
        let revealed = state.reveal_top(0, 2);
        assert_eq!(revealed, vec![CardName::Gold, CardName::Estate]);
        assert!(state.players[0].discard_pile.is_empty());
    }

    #[test]
    fn test_gain_respects_supply() {
        let mut state = bare_state();
        state.supply.add_pile(CardName::Gold, 1);
        assert!(state.gain(0, CardName::Gold, GainDestination::DrawPile));
        assert_eq!(state.players[0].draw_pile.peek_top(), Some(CardName::Gold));
        assert!(!state.gain(0, CardName::Gold, GainDestination::Discard));
        assert!(!state.gain(0, CardName::Adventurer, GainDestination::Discard));
    }

    #[test]
    fn test_cleanup_sweeps_and_redraws() {
        let mut state = bare_state();
        let p = &mut state.players[0];
        p.hand.extend([CardName::Estate, CardName::Copper]);
        p.in_play.extend([CardName::Village]);
        p.draw_pile.extend([CardName::Copper; 6]);
        p.actions = 0;
        p.coins = 4;
        state.cleanup(0);
        let p = &state.players[0];
        assert_eq!(p.hand.len(), 5);
        assert_eq!(p.discard_pile.len(), 3);
        assert!(p.in_play.is_empty());
        assert_eq!((p.actions, p.buys, p.coins), (1, 1, 0));
    }
}
