//! Main game state structure
//!
//! `GameState` is a plain value: the executor clones it, applies one move to
//! the clone and hands the clone back. Nothing in it is shared or interior
//! mutable, so equality and serialization cover the whole game.

use crate::core::{CardName, PlayerState};
use crate::error::PrincipalityError;
use crate::game::logger::GameLog;
use crate::game::{PendingEffect, Phase};
use crate::rng::ShuffleRng;
use crate::zones::CardZone;
use crate::Result;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 6;
pub const DEFAULT_HAND_SIZE: usize = 5;
pub const KINGDOM_SIZE: usize = 10;
pub const KINGDOM_PILE_SIZE: u32 = 10;

/// Game setup options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Kingdom piles to use instead of a seeded random selection
    pub kingdom_cards: Option<Vec<CardName>>,
    /// Size of the Estate/Duchy/Province (and Gardens) piles
    pub victory_pile_size: Option<u32>,
    /// Cards drawn at cleanup and at game start
    pub hand_size: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            kingdom_cards: None,
            victory_pile_size: None,
            hand_size: DEFAULT_HAND_SIZE,
        }
    }
}

impl GameOptions {
    pub fn with_kingdom(mut self, cards: Vec<CardName>) -> Self {
        self.kingdom_cards = Some(cards);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(PrincipalityError::InvalidOptions(
                "hand size must be at least 1".to_string(),
            ));
        }
        if let Some(cards) = &self.kingdom_cards {
            if cards.is_empty() {
                return Err(PrincipalityError::InvalidOptions(
                    "kingdom must contain at least one card".to_string(),
                ));
            }
            let mut seen = FxHashSet::default();
            for &card in cards {
                if !card.is_kingdom() {
                    return Err(PrincipalityError::InvalidOptions(format!(
                        "{card} is not a kingdom card"
                    )));
                }
                if !seen.insert(card) {
                    return Err(PrincipalityError::InvalidOptions(format!(
                        "{card} listed more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Supply piles, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Supply {
    piles: Vec<(CardName, u32)>,
}

impl Supply {
    pub fn new() -> Self {
        Supply { piles: Vec::new() }
    }

    pub fn add_pile(&mut self, card: CardName, count: u32) {
        match self.piles.iter_mut().find(|(c, _)| *c == card) {
            Some((_, n)) => *n = count,
            None => self.piles.push((card, count)),
        }
    }

    /// Remaining count, `None` if the card has no pile in this game
    pub fn get(&self, card: CardName) -> Option<u32> {
        self.piles.iter().find(|(c, _)| *c == card).map(|&(_, n)| n)
    }

    pub fn count(&self, card: CardName) -> u32 {
        self.get(card).unwrap_or(0)
    }

    pub fn contains(&self, card: CardName) -> bool {
        self.get(card).is_some()
    }

    /// Take one card from a pile. Returns false if the pile is missing or empty.
    pub fn take(&mut self, card: CardName) -> bool {
        match self.piles.iter_mut().find(|(c, _)| *c == card) {
            Some((_, n)) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardName, u32)> + '_ {
        self.piles.iter().copied()
    }

    pub fn empty_piles(&self) -> usize {
        self.piles.iter().filter(|(_, n)| *n == 0).count()
    }

    pub fn total(&self) -> u64 {
        self.piles.iter().map(|&(_, n)| n as u64).sum()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<PlayerState>,
    pub supply: Supply,
    /// Shared trash, in the order cards were trashed
    pub trash: CardZone,
    pub current_player: usize,
    pub phase: Phase,
    /// Starts at 1, incremented at every cleanup
    pub turn_number: u32,
    pub rng: ShuffleRng,
    pub log: GameLog,
    pub pending_effect: Option<PendingEffect>,
    pub hand_size: usize,
}

impl GameState {
    /// Set up a new game: supply, starting decks, opening hands
    pub fn new(seed: u64, player_count: usize, options: &GameOptions) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(PrincipalityError::InvalidPlayerCount(player_count));
        }
        options.validate()?;

        let mut rng = ShuffleRng::new(seed);
        let kingdom = match &options.kingdom_cards {
            Some(cards) => cards.clone(),
            None => {
                let mut pool = CardName::KINGDOM.to_vec();
                rng.shuffle(&mut pool);
                pool.truncate(KINGDOM_SIZE);
                pool
            }
        };

        let supply = build_supply(player_count, &kingdom, options.victory_pile_size);

        let mut players = Vec::with_capacity(player_count);
        for _ in 0..player_count {
            let mut deck = vec![CardName::Copper; 7];
            deck.extend([CardName::Estate; 3]);
            rng.shuffle(&mut deck);
            players.push(PlayerState::new(deck));
        }

        let mut state = GameState {
            players,
            supply,
            trash: CardZone::new(),
            current_player: 0,
            phase: Phase::Action,
            turn_number: 1,
            rng,
            log: GameLog::new(),
            pending_effect: None,
            hand_size: options.hand_size,
        };
        for player in 0..player_count {
            state.draw(player, options.hand_size);
        }
        let names: Vec<String> = kingdom.iter().map(|c| c.to_string()).collect();
        state
            .log
            .push(1, 0, format!("Game started with kingdom: {}", names.join(", ")));
        Ok(state)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    pub fn current_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.current_player]
    }

    /// The player who must submit the next move
    pub fn acting_player(&self) -> usize {
        self.pending_effect
            .as_ref()
            .and_then(|p| p.kind.target_actor())
            .unwrap_or(self.current_player)
    }

    /// Kingdom cards in this game's supply
    pub fn kingdom(&self) -> Vec<CardName> {
        self.supply
            .iter()
            .map(|(card, _)| card)
            .filter(|card| card.is_kingdom())
            .collect()
    }

    /// Every card in the game: all player zones, trash and supply
    pub fn total_cards(&self) -> u64 {
        let owned: usize = self.players.iter().map(|p| p.total_cards()).sum();
        owned as u64 + self.trash.len() as u64 + self.supply.total()
    }
}

fn build_supply(player_count: usize, kingdom: &[CardName], victory_override: Option<u32>) -> Supply {
    let players = player_count as u32;
    let victory = victory_override.unwrap_or(if player_count <= 2 { 8 } else { 12 });
    let curses = (10 * players.saturating_sub(1)).max(10);

    let mut supply = Supply::new();
    supply.add_pile(CardName::Copper, 60 - 7 * players);
    supply.add_pile(CardName::Silver, 40);
    supply.add_pile(CardName::Gold, 30);
    supply.add_pile(CardName::Estate, victory);
    supply.add_pile(CardName::Duchy, victory);
    supply.add_pile(CardName::Province, victory);
    supply.add_pile(CardName::Curse, curses);

    let mut kingdom = kingdom.to_vec();
    kingdom.sort_by(|a, b| a.cost().cmp(&b.cost()).then_with(|| a.as_str().cmp(b.as_str())));
    for card in kingdom {
        let count = if card.is_victory() {
            victory
        } else {
            KINGDOM_PILE_SIZE
        };
        supply.add_pile(card, count);
    }
    supply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_two_player_state() {
        let state = GameState::new(42, 2, &GameOptions::default()).unwrap();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.phase, Phase::Action);
        assert_eq!(state.turn_number, 1);
        for player in &state.players {
            assert_eq!(player.hand.len(), 5);
            assert_eq!(player.draw_pile.len(), 5);
            assert_eq!(player.all_cards().filter(|&c| c == CardName::Copper).count(), 7);
            assert_eq!((player.actions, player.buys, player.coins), (1, 1, 0));
        }
        assert_eq!(state.supply.get(CardName::Copper), Some(46));
        assert_eq!(state.supply.get(CardName::Province), Some(8));
        assert_eq!(state.supply.get(CardName::Curse), Some(10));
        assert_eq!(state.kingdom().len(), 10);
        assert!(state.pending_effect.is_none());
    }

    #[test]
    fn test_supply_scales_with_players() {
        let state = GameState::new(1, 4, &GameOptions::default()).unwrap();
        assert_eq!(state.supply.get(CardName::Copper), Some(32));
        assert_eq!(state.supply.get(CardName::Duchy), Some(12));
        assert_eq!(state.supply.get(CardName::Curse), Some(30));
    }

    #[test]
    fn test_custom_kingdom_sorted_by_cost() {
        let options = GameOptions::default().with_kingdom(vec![
            CardName::Market,
            CardName::Gardens,
            CardName::Cellar,
            CardName::Village,
        ]);
        let state = GameState::new(7, 2, &options).unwrap();
        assert_eq!(
            state.kingdom(),
            vec![
                CardName::Cellar,
                CardName::Village,
                CardName::Gardens,
                CardName::Market
            ]
        );
        assert_eq!(state.supply.get(CardName::Gardens), Some(8));
        assert_eq!(state.supply.get(CardName::Market), Some(10));
        assert_eq!(state.supply.get(CardName::Smithy), None);
    }

    #[test]
    fn test_invalid_setup_rejected() {
        assert!(matches!(
            GameState::new(1, 0, &GameOptions::default()),
            Err(PrincipalityError::InvalidPlayerCount(0))
        ));
        assert!(matches!(
            GameState::new(1, 7, &GameOptions::default()),
            Err(PrincipalityError::InvalidPlayerCount(7))
        ));
        let bad = GameOptions::default().with_kingdom(vec![CardName::Copper]);
        assert!(matches!(
            GameState::new(1, 2, &bad),
            Err(PrincipalityError::InvalidOptions(_))
        ));
        let dup = GameOptions::default().with_kingdom(vec![CardName::Smithy, CardName::Smithy]);
        assert!(matches!(
            GameState::new(1, 2, &dup),
            Err(PrincipalityError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_same_seed_same_setup() {
        let a = GameState::new(123, 3, &GameOptions::default()).unwrap();
        let b = GameState::new(123, 3, &GameOptions::default()).unwrap();
        assert_eq!(a, b);
        let c = GameState::new(124, 3, &GameOptions::default()).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_supply_take() {
        let mut supply = Supply::new();
        supply.add_pile(CardName::Gold, 1);
        assert!(supply.take(CardName::Gold));
        assert!(!supply.take(CardName::Gold));
        assert!(!supply.take(CardName::Silver));
        assert_eq!(supply.empty_piles(), 1);
    }
}
