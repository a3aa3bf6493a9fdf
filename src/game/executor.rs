//! Move validator and executor
//!
//! [`execute_move`] never touches its input. It clones the state, applies the
//! move to the clone and returns the clone with a log line appended. On error
//! the clone is dropped, so a rejected move is always a no-op for the caller.

use crate::core::{card_def, CardName, CardType};
use crate::error::MoveError;
use crate::game::continuation;
use crate::game::resolver;
use crate::game::{GameState, Move, MoveKind, Phase};

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub state: GameState,
    /// Human-readable summary, also appended to the game log
    pub message: String,
}

/// Apply `mv` submitted by seat `player`.
///
/// Rejects the move unless `player` is the acting player: the current player,
/// or the target of a pending attack decision.
pub fn execute_move_as(state: &GameState, player: usize, mv: &Move) -> Result<MoveOutcome, MoveError> {
    let expected = state.acting_player();
    if player != expected {
        return Err(MoveError::NotYourTurn {
            expected,
            got: player,
        });
    }
    execute_move(state, mv)
}

/// Validate and apply `mv` to a copy of `state` on behalf of the acting player
pub fn execute_move(state: &GameState, mv: &Move) -> Result<MoveOutcome, MoveError> {
    let actor = state.acting_player();
    let mut next = state.clone();
    let mut notes = Vec::new();
    apply(&mut next, mv, &mut notes)?;

    let message = notes.join(". ");
    next.log.push(state.turn_number, actor, message.clone());
    Ok(MoveOutcome {
        state: next,
        message,
    })
}

fn apply(state: &mut GameState, mv: &Move, notes: &mut Vec<String>) -> Result<(), MoveError> {
    if let Some(pending) = state.pending_effect.take() {
        let expected = pending.expected_move();
        if mv.kind() != expected {
            return Err(MoveError::PendingEffectMismatch {
                card: pending.card,
                expected,
                got: mv.kind(),
            });
        }
        notes.push(format!(
            "Player {} resolves {}",
            pending.kind.target_actor().unwrap_or(state.current_player) + 1,
            pending.card
        ));
        return continuation::continue_effect(state, pending, mv, notes);
    }

    match mv {
        Move::PlayAction { card } => play_action(state, *card, notes),
        Move::PlayTreasure { card } => play_treasure(state, *card, notes),
        Move::PlayAllTreasures => play_all_treasures(state, notes),
        Move::Buy { card } => buy(state, *card, notes),
        Move::EndPhase => end_phase(state, notes),
        other => Err(MoveError::NoPendingEffect(other.kind())),
    }
}

pub(crate) fn check_play_action(state: &GameState, card: CardName) -> Result<(), MoveError> {
    if !state.phase.can_play_actions() {
        return Err(MoveError::WrongPhase {
            kind: MoveKind::PlayAction,
            phase: state.phase,
        });
    }
    let player = state.current();
    if player.actions == 0 {
        return Err(MoveError::NoActionsRemaining);
    }
    if !player.hand.contains(card) {
        return Err(MoveError::NotInHand(card));
    }
    if !card.is_action() {
        return Err(MoveError::WrongCardType {
            card,
            expected: CardType::Action,
        });
    }
    resolver::check_playable(state, card)
}

pub(crate) fn check_play_treasure(state: &GameState, card: CardName) -> Result<(), MoveError> {
    if !state.phase.can_play_treasures() {
        return Err(MoveError::WrongPhase {
            kind: MoveKind::PlayTreasure,
            phase: state.phase,
        });
    }
    if !state.current().hand.contains(card) {
        return Err(MoveError::NotInHand(card));
    }
    if !card.is_treasure() {
        return Err(MoveError::WrongCardType {
            card,
            expected: CardType::Treasure,
        });
    }
    Ok(())
}

pub(crate) fn check_play_all_treasures(state: &GameState) -> Result<(), MoveError> {
    if !state.phase.can_play_treasures() {
        return Err(MoveError::WrongPhase {
            kind: MoveKind::PlayAllTreasures,
            phase: state.phase,
        });
    }
    if !state.current().hand.iter().any(|c| c.is_treasure()) {
        return Err(MoveError::NoTreasuresInHand);
    }
    Ok(())
}

pub(crate) fn check_buy(state: &GameState, card: CardName) -> Result<(), MoveError> {
    if !state.phase.can_buy() {
        return Err(MoveError::WrongPhase {
            kind: MoveKind::Buy,
            phase: state.phase,
        });
    }
    let player = state.current();
    if player.buys == 0 {
        return Err(MoveError::NoBuysRemaining);
    }
    let remaining = state.supply.get(card).ok_or(MoveError::NotInSupply(card))?;
    if remaining == 0 {
        return Err(MoveError::SupplyExhausted(card));
    }
    let cost = card.cost();
    if player.coins < cost {
        return Err(MoveError::InsufficientCoins {
            card,
            cost,
            coins: player.coins,
        });
    }
    Ok(())
}

fn play_action(state: &mut GameState, card: CardName, notes: &mut Vec<String>) -> Result<(), MoveError> {
    check_play_action(state, card)?;
    let current = state.current_player;
    let player = state.current_mut();
    player.hand.remove(card);
    player.in_play.add(card);
    player.actions -= 1;
    notes.push(format!("Player {} played {card}", current + 1));

    let resolution = resolver::resolve_play(state, card, false, notes);
    resolver::settle(state, card, resolution, Vec::new(), notes);
    Ok(())
}

fn play_treasure(state: &mut GameState, card: CardName, notes: &mut Vec<String>) -> Result<(), MoveError> {
    check_play_treasure(state, card)?;
    let current = state.current_player;
    let coins = card_def(card).coins;
    let player = state.current_mut();
    player.hand.remove(card);
    player.in_play.add(card);
    player.coins += coins;
    notes.push(format!("Player {} played {card} (+${coins})", current + 1));
    Ok(())
}

fn play_all_treasures(state: &mut GameState, notes: &mut Vec<String>) -> Result<(), MoveError> {
    check_play_all_treasures(state)?;
    let current = state.current_player;
    let player = state.current_mut();
    let treasures: Vec<CardName> = player.hand.iter().filter(|c| c.is_treasure()).collect();
    let mut coins = 0;
    for &card in &treasures {
        player.hand.remove(card);
        player.in_play.add(card);
        coins += card_def(card).coins;
    }
    player.coins += coins;
    notes.push(format!(
        "Player {} played {} treasures (+${coins})",
        current + 1,
        treasures.len()
    ));
    Ok(())
}

fn buy(state: &mut GameState, card: CardName, notes: &mut Vec<String>) -> Result<(), MoveError> {
    check_buy(state, card)?;
    let current = state.current_player;
    state.supply.take(card);
    let player = state.current_mut();
    player.coins -= card.cost();
    player.buys -= 1;
    player.discard_pile.add(card);
    notes.push(format!("Player {} bought {card}", current + 1));
    Ok(())
}

fn end_phase(state: &mut GameState, notes: &mut Vec<String>) -> Result<(), MoveError> {
    let current = state.current_player;
    match state.phase {
        Phase::Action | Phase::Buy => {
            notes.push(format!("Player {} ends {} phase", current + 1, state.phase));
            state.phase = state.phase.next();
        }
        Phase::Cleanup => {
            state.cleanup(current);
            state.turn_number += 1;
            state.current_player = (current + 1) % state.player_count();
            state.phase = Phase::Action;
            notes.push(format!(
                "Player {} cleans up. Turn {} begins (Player {})",
                current + 1,
                state.turn_number,
                state.current_player + 1
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOptions, PendingEffect, PendingKind};

    fn fresh() -> GameState {
        let options = GameOptions::default().with_kingdom(vec![CardName::Village, CardName::Smithy]);
        GameState::new(3, 2, &options).unwrap()
    }

    #[test]
    fn test_execute_does_not_mutate_input() {
        let state = fresh();
        let snapshot = state.clone();
        let outcome = execute_move(&state, &Move::EndPhase).unwrap();
        assert_eq!(state, snapshot);
        assert_eq!(outcome.state.phase, Phase::Buy);
        assert_eq!(outcome.state.log.len(), state.log.len() + 1);
    }

    #[test]
    fn test_continuation_without_pending_rejected() {
        let state = fresh();
        assert_eq!(
            execute_move(&state, &Move::GainCard { card: CardName::Silver }),
            Err(MoveError::NoPendingEffect(MoveKind::GainCard))
        );
    }

    #[test]
    fn test_move_from_wrong_seat_rejected() {
        let mut state = fresh();
        state.players[1].hand.clear();
        state.players[1].hand.extend([
            CardName::Estate,
            CardName::Estate,
            CardName::Copper,
            CardName::Copper,
            CardName::Copper,
        ]);
        state.pending_effect = Some(PendingEffect::new(
            CardName::Militia,
            PendingKind::DiscardToHandSize {
                target_player: 1,
                hand_size: 3,
            },
        ));
        let discard = Move::DiscardToHandSize {
            cards: vec![CardName::Estate, CardName::Estate],
        };

        assert_eq!(
            execute_move_as(&state, 0, &discard),
            Err(MoveError::NotYourTurn { expected: 1, got: 0 })
        );
        let outcome = execute_move_as(&state, 1, &discard).unwrap();
        assert!(outcome.state.pending_effect.is_none());
        assert_eq!(outcome.state.players[1].hand.len(), 3);

        // Outside any pending effect only the current player may act
        let state = fresh();
        assert_eq!(
            execute_move_as(&state, 1, &Move::EndPhase),
            Err(MoveError::NotYourTurn { expected: 0, got: 1 })
        );
        assert!(execute_move_as(&state, 0, &Move::EndPhase).is_ok());
    }

    #[test]
    fn test_wrong_phase() {
        let state = fresh();
        let err = execute_move(&state, &Move::Buy { card: CardName::Copper }).unwrap_err();
        assert_eq!(
            err,
            MoveError::WrongPhase {
                kind: MoveKind::Buy,
                phase: Phase::Action
            }
        );
    }

    #[test]
    fn test_full_turn_cycle() {
        let mut state = fresh();
        for _ in 0..3 {
            state = execute_move(&state, &Move::EndPhase).unwrap().state;
        }
        assert_eq!(state.current_player, 1);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.phase, Phase::Action);
        assert_eq!(state.players[0].hand.len(), 5);
        assert_eq!(state.players[0].discard_pile.len(), 5);
    }

    #[test]
    fn test_play_all_treasures() {
        let mut state = fresh();
        state.phase = Phase::Buy;
        state.players[0].hand.clear();
        state.players[0]
            .hand
            .extend([CardName::Copper, CardName::Estate, CardName::Silver]);
        let outcome = execute_move(&state, &Move::PlayAllTreasures).unwrap();
        let p = &outcome.state.players[0];
        assert_eq!(p.coins, 3);
        assert_eq!(p.hand.cards, vec![CardName::Estate]);
        assert_eq!(p.in_play.len(), 2);

        let next = execute_move(&outcome.state, &Move::PlayAllTreasures);
        assert_eq!(next, Err(MoveError::NoTreasuresInHand));
    }
}
