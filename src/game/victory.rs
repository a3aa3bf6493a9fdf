//! Victory evaluator: scoring and game-over detection

use crate::core::{card_def, CardName, PlayerState, VictoryValue};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// Number of empty supply piles that ends the game
pub const EMPTY_PILES_TO_END: usize = 3;

/// Why the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    ProvincesGone,
    PilesEmpty,
}

/// Game-over check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub is_game_over: bool,
    pub reason: Option<GameOverReason>,
    /// Final scores by seat, present once the game is over
    pub scores: Option<Vec<i32>>,
    /// Highest-scoring seat; the earliest seat wins ties
    pub winner: Option<usize>,
}

/// Score for one player, counting cards in all zones
pub fn score_player(player: &PlayerState) -> i32 {
    let owned = player.total_cards() as i32;
    player
        .all_cards()
        .map(|card| match card_def(card).victory {
            VictoryValue::None => 0,
            VictoryValue::Fixed(points) => points,
            VictoryValue::PerOwnedCards { divisor } => owned / divisor as i32,
        })
        .sum()
}

pub fn calculate_victory_points(state: &GameState, player: usize) -> i32 {
    state.players.get(player).map_or(0, score_player)
}

pub fn all_scores(state: &GameState) -> Vec<i32> {
    state.players.iter().map(score_player).collect()
}

pub fn game_over_reason(state: &GameState) -> Option<GameOverReason> {
    if state.supply.count(CardName::Province) == 0 {
        Some(GameOverReason::ProvincesGone)
    } else if state.supply.empty_piles() >= EMPTY_PILES_TO_END {
        Some(GameOverReason::PilesEmpty)
    } else {
        None
    }
}

pub fn is_game_over(state: &GameState) -> bool {
    game_over_reason(state).is_some()
}

pub fn check_game_over(state: &GameState) -> GameOverReport {
    match game_over_reason(state) {
        None => GameOverReport {
            is_game_over: false,
            reason: None,
            scores: None,
            winner: None,
        },
        Some(reason) => {
            let scores = all_scores(state);
            let winner = leader(&scores);
            GameOverReport {
                is_game_over: true,
                reason: Some(reason),
                scores: Some(scores),
                winner,
            }
        }
    }
}

/// Seat with the highest score, earliest seat on ties
pub fn leader(scores: &[i32]) -> Option<usize> {
    let best = *scores.iter().max()?;
    scores.iter().position(|&s| s == best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOptions;

    fn state() -> GameState {
        let options = GameOptions::default().with_kingdom(vec![CardName::Gardens, CardName::Smithy]);
        GameState::new(9, 2, &options).unwrap()
    }

    #[test]
    fn test_starting_score() {
        let state = state();
        assert_eq!(calculate_victory_points(&state, 0), 3);
        assert_eq!(calculate_victory_points(&state, 1), 3);
        assert_eq!(calculate_victory_points(&state, 5), 0);
    }

    #[test]
    fn test_gardens_and_curses() {
        let mut state = state();
        let p = &mut state.players[0];
        // 10 starting cards + 12 more = 22 owned, Gardens worth 2 each
        p.discard_pile.extend([CardName::Gardens, CardName::Gardens]);
        p.in_play.extend([CardName::Copper; 8]);
        p.set_aside.extend([CardName::Curse, CardName::Province]);
        assert_eq!(state.players[0].total_cards(), 22);
        // 3 Estates + 2x2 Gardens - 1 Curse + 6 Province
        assert_eq!(calculate_victory_points(&state, 0), 3 + 4 - 1 + 6);
    }

    #[test]
    fn test_game_over_conditions() {
        let mut state = state();
        assert!(!check_game_over(&state).is_game_over);
        assert!(check_game_over(&state).scores.is_none());

        state.supply.add_pile(CardName::Province, 0);
        let report = check_game_over(&state);
        assert!(report.is_game_over);
        assert_eq!(report.reason, Some(GameOverReason::ProvincesGone));
        assert_eq!(report.scores, Some(vec![3, 3]));
        assert_eq!(report.winner, Some(0));

        let mut state = self::state();
        state.supply.add_pile(CardName::Smithy, 0);
        state.supply.add_pile(CardName::Curse, 0);
        assert!(!is_game_over(&state));
        state.supply.add_pile(CardName::Gold, 0);
        assert_eq!(game_over_reason(&state), Some(GameOverReason::PilesEmpty));
    }

    #[test]
    fn test_leader_ties_go_to_earliest_seat() {
        assert_eq!(leader(&[3, 7, 7]), Some(1));
        assert_eq!(leader(&[]), None);
    }
}
