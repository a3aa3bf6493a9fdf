//! Property checks over seeded random walks
//!
//! Each walk starts from a seeded game and follows a seeded random
//! controller. At every visited state the rules-level invariants are checked
//! against the engine's public API.

use principality::core::CardName;
use principality::game::{GameEngine, GameState, Move, MoveKind, PlayerController, RandomController};
use principality::MoveError;

const SEEDS: u64 = 8;
const STEPS: usize = 250;

/// Every single-card or boolean move that could be valid somewhere
fn probe_moves() -> Vec<Move> {
    let mut moves = vec![
        Move::EndPhase,
        Move::PlayAllTreasures,
        Move::TrashCards { cards: vec![] },
        Move::DiscardForCellar { cards: vec![] },
        Move::SelectActionForThrone { card: None },
    ];
    for flag in [true, false] {
        moves.push(Move::SpyDecision { discard: flag });
        moves.push(Move::GainTrashedCard { gain: flag });
        moves.push(Move::ChancellorDecision { discard_deck: flag });
        moves.push(Move::LibrarySetAside { set_aside: flag });
    }
    for card in CardName::ALL {
        moves.extend([
            Move::PlayAction { card },
            Move::PlayTreasure { card },
            Move::Buy { card },
            Move::GainCard { card },
            Move::SelectTreasureToTrash { card },
            Move::RevealAndTopdeck { card },
            Move::SelectActionForThrone { card: Some(card) },
            Move::TrashCards { cards: vec![card] },
            Move::DiscardForCellar { cards: vec![card] },
            Move::DiscardToHandSize { cards: vec![card] },
        ]);
    }
    moves
}

/// Visit every state of a random walk
fn walk(seed: u64, players: usize, mut visit: impl FnMut(&GameEngine, &GameState)) {
    let engine = GameEngine::new(seed);
    let mut state = engine.initialize_game(players).unwrap();
    let mut controller = RandomController::with_seed(0, seed ^ 0xA5A5);
    for _ in 0..STEPS {
        visit(&engine, &state);
        let moves = engine.get_valid_moves(&state);
        assert!(!moves.is_empty(), "no moves available (seed {seed})");
        let choice = controller.choose_move(&state, &moves);
        state = engine.execute_move(&state, &moves[choice]).unwrap().state;
    }
    visit(&engine, &state);
}

fn player_count(seed: u64) -> usize {
    2 + (seed % 3) as usize
}

#[test]
fn test_card_conservation() {
    for seed in 0..SEEDS {
        let players = player_count(seed);
        let initial = GameEngine::new(seed).initialize_game(players).unwrap().total_cards();
        walk(seed, players, |_, state| {
            assert_eq!(state.total_cards(), initial, "seed {seed}, turn {}", state.turn_number);
        });
    }
}

#[test]
fn test_execute_never_mutates_input() {
    let probes = probe_moves();
    for seed in 0..SEEDS {
        walk(seed, player_count(seed), |engine, state| {
            let before = serde_json::to_string(state).unwrap();
            for mv in engine.get_valid_moves(state).iter().chain(probes.iter().step_by(7)) {
                let _ = engine.execute_move(state, mv);
                assert_eq!(serde_json::to_string(state).unwrap(), before, "{mv} mutated its input");
            }
        });
    }
}

#[test]
fn test_enumerated_moves_all_execute() {
    for seed in 0..SEEDS {
        walk(seed, player_count(seed), |engine, state| {
            for mv in engine.get_valid_moves(state) {
                if let Err(e) = engine.execute_move(state, &mv) {
                    panic!("enumerated {mv} rejected: {e} (seed {seed})");
                }
            }
        });
    }
}

#[test]
fn test_accepted_probes_are_enumerated() {
    let probes = probe_moves();
    for seed in 0..SEEDS {
        walk(seed, player_count(seed), |engine, state| {
            let valid = engine.get_valid_moves(state);
            for mv in &probes {
                if engine.execute_move(state, mv).is_ok() {
                    assert!(valid.contains(mv), "{mv} accepted but not enumerated (seed {seed})");
                }
            }
        });
    }
}

#[test]
fn test_pending_effect_exclusivity() {
    let probes = probe_moves();
    for seed in 0..SEEDS {
        walk(seed, player_count(seed), |engine, state| {
            match &state.pending_effect {
                Some(pending) => {
                    let expected = pending.expected_move();
                    for mv in probes.iter().filter(|m| m.kind() != expected) {
                        assert!(
                            matches!(
                                engine.execute_move(state, mv),
                                Err(MoveError::PendingEffectMismatch { .. })
                            ),
                            "{mv} accepted while {} awaits {expected}",
                            pending.card
                        );
                    }
                    assert!(engine.get_valid_moves(state).iter().all(|m| m.kind() == expected));
                }
                None => {
                    for mv in probes.iter().filter(|m| m.kind().is_continuation()) {
                        assert_eq!(
                            engine.execute_move(state, mv).unwrap_err(),
                            MoveError::NoPendingEffect(mv.kind())
                        );
                    }
                }
            }
        });
    }
}

#[test]
fn test_only_acting_player_has_moves() {
    for seed in 0..SEEDS {
        let players = player_count(seed);
        walk(seed, players, |engine, state| {
            let actor = state.acting_player();
            for player in 0..players {
                let moves = engine.get_valid_moves_for(state, player);
                assert_eq!(!moves.is_empty(), player == actor);
            }
        });
    }
}

#[test]
fn test_turn_moves_end_with_end_phase() {
    for seed in 0..SEEDS {
        walk(seed, player_count(seed), |engine, state| {
            let moves = engine.get_valid_moves(state);
            if state.pending_effect.is_none() {
                assert_eq!(moves.last(), Some(&Move::EndPhase));
                assert!(moves.iter().all(|m| !m.kind().is_continuation()));
                assert!(moves.iter().all(|m| m.kind() != MoveKind::Buy || state.phase.can_buy()));
            }
        });
    }
}
