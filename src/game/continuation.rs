//! Continuation moves: answers to a pending effect
//!
//! Every handler validates the whole move before touching the state, applies
//! it, and returns the next [`Resolution`] for the same card.

use crate::core::{card_def, CardName, CardType, GainDestination};
use crate::error::MoveError;
use crate::game::resolver::{self, Resolution};
use crate::game::{GameState, Move, PendingEffect, PendingKind, QueuedPlay};
use crate::zones::CardZone;
use rustc_hash::FxHashMap;

/// Check that `cards` can be taken from `zone` (respecting duplicates)
pub(crate) fn check_subset(zone: &CardZone, cards: &[CardName]) -> Result<(), MoveError> {
    let mut wanted: FxHashMap<CardName, usize> = FxHashMap::default();
    for &card in cards {
        *wanted.entry(card).or_default() += 1;
    }
    // iterate in move order so the error names the first offending card
    for &card in cards {
        let count = wanted[&card];
        let available = zone.count(card);
        if available == 0 {
            return Err(MoveError::NotInHand(card));
        }
        if count > available {
            return Err(MoveError::NotEnoughCopies {
                card,
                count,
                available,
            });
        }
    }
    Ok(())
}

fn list(cards: &[CardName]) -> String {
    if cards.is_empty() {
        return "nothing".to_string();
    }
    cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}

/// Apply `mv` as the answer to `pending`, which has already been taken out of
/// the state and matched against the move's kind.
pub(crate) fn continue_effect(
    state: &mut GameState,
    pending: PendingEffect,
    mv: &Move,
    notes: &mut Vec<String>,
) -> Result<(), MoveError> {
    let PendingEffect {
        card,
        kind,
        mut queued,
    } = pending;
    let current = state.current_player;

    let resolution = match (kind, mv) {
        (PendingKind::DiscardForCellar, Move::DiscardForCellar { cards }) => {
            check_subset(&state.players[current].hand, cards)?;
            state.discard_from_hand(current, cards);
            let drawn = state.draw(current, cards.len());
            notes.push(format!("discarded {}, drew {drawn}", list(cards)));
            Resolution::Done
        }

        (PendingKind::TrashCards { max_trash }, Move::TrashCards { cards }) => {
            if cards.len() > max_trash {
                return Err(MoveError::TooManyCards {
                    verb: "trash",
                    max: max_trash,
                    got: cards.len(),
                });
            }
            check_subset(&state.players[current].hand, cards)?;
            state.trash_from_hand(current, cards);
            notes.push(format!("trashed {}", list(cards)));
            Resolution::Done
        }

        (PendingKind::TrashCopper { coins }, Move::TrashCards { cards }) => {
            match cards.as_slice() {
                [] => notes.push("trashed nothing".to_string()),
                [CardName::Copper] => {
                    check_subset(&state.players[current].hand, cards)?;
                    state.trash_from_hand(current, cards);
                    state.players[current].coins += coins;
                    notes.push(format!("trashed Copper for +${coins}"));
                }
                [other] => {
                    return Err(MoveError::WrongCard {
                        expected: CardName::Copper,
                        got: *other,
                    })
                }
                _ => {
                    return Err(MoveError::TooManyCards {
                        verb: "trash",
                        max: 1,
                        got: cards.len(),
                    })
                }
            }
            Resolution::Done
        }

        (PendingKind::TrashForGain { spec }, Move::TrashCards { cards }) => {
            let trashed = match cards.as_slice() {
                [] => return Err(MoveError::MustTrashCard),
                [one] => *one,
                _ => {
                    return Err(MoveError::WrongCardCount {
                        verb: "trash",
                        expected: 1,
                        got: cards.len(),
                    })
                }
            };
            trash_for_gain(state, trashed, spec, notes)?
        }

        (PendingKind::TrashForGain { spec }, Move::SelectTreasureToTrash { card: trashed }) => {
            trash_for_gain(state, *trashed, spec, notes)?
        }

        (
            PendingKind::GainCard {
                max_gain_cost,
                filter,
                destination,
                ..
            },
            Move::GainCard { card: gained },
        ) => {
            let gained = *gained;
            let remaining = state
                .supply
                .get(gained)
                .ok_or(MoveError::NotInSupply(gained))?;
            if remaining == 0 {
                return Err(MoveError::SupplyExhausted(gained));
            }
            if let Some(expected) = filter {
                if !gained.is_type(expected) {
                    return Err(MoveError::WrongCardType {
                        card: gained,
                        expected,
                    });
                }
            }
            if gained.cost() > max_gain_cost {
                return Err(MoveError::TooExpensive {
                    card: gained,
                    cost: gained.cost(),
                    max: max_gain_cost,
                });
            }
            state.gain(current, gained, destination);
            notes.push(format!("gained {gained} to {destination}"));
            Resolution::Done
        }

        (
            PendingKind::DiscardToHandSize {
                target_player,
                hand_size,
            },
            Move::DiscardToHandSize { cards },
        ) => {
            let hand = &state.players[target_player].hand;
            let expected = hand.len().saturating_sub(hand_size);
            if cards.len() != expected {
                return Err(MoveError::WrongCardCount {
                    verb: "discard",
                    expected,
                    got: cards.len(),
                });
            }
            check_subset(hand, cards)?;
            state.discard_from_hand(target_player, cards);
            notes.push(format!(
                "Player {} discards to {hand_size} cards",
                target_player + 1
            ));
            resolver::resume_attack(state, card, target_player, notes)
        }

        (PendingKind::RevealAndTopdeck { target_player }, Move::RevealAndTopdeck { card: chosen }) => {
            let chosen = *chosen;
            let target = &mut state.players[target_player];
            if !target.hand.contains(chosen) {
                return Err(MoveError::NotInHand(chosen));
            }
            if !chosen.is_victory() {
                return Err(MoveError::WrongCardType {
                    card: chosen,
                    expected: CardType::Victory,
                });
            }
            target.hand.remove(chosen);
            target.draw_pile.add_to_top(chosen);
            notes.push(format!(
                "Player {} puts {chosen} on their deck",
                target_player + 1
            ));
            resolver::resume_attack(state, card, target_player, notes)
        }

        (
            PendingKind::SpyDecision {
                target_player,
                revealed,
            },
            Move::SpyDecision { discard },
        ) => {
            let target = &mut state.players[target_player];
            if *discard {
                if let Some(top) = target.draw_pile.draw_top() {
                    target.discard_pile.add(top);
                }
                notes.push(format!("Player {}'s {revealed} is discarded", target_player + 1));
            } else {
                notes.push(format!("Player {}'s {revealed} stays on top", target_player + 1));
            }
            resolver::resume_attack(state, card, target_player, notes)
        }

        (
            PendingKind::ThiefSelectTreasure {
                target_player,
                revealed,
            },
            Move::SelectTreasureToTrash { card: chosen },
        ) => {
            let chosen = *chosen;
            if !revealed.contains(&chosen) {
                return Err(MoveError::NotRevealed(chosen));
            }
            if !chosen.is_treasure() {
                return Err(MoveError::WrongCardType {
                    card: chosen,
                    expected: CardType::Treasure,
                });
            }
            let target = &mut state.players[target_player];
            let mut lifted = Vec::with_capacity(revealed.len());
            for _ in 0..revealed.len() {
                if let Some(top) = target.draw_pile.draw_top() {
                    lifted.push(top);
                }
            }
            if let Some(pos) = lifted.iter().position(|&c| c == chosen) {
                lifted.remove(pos);
            }
            target.discard_pile.extend(lifted);
            state.trash.add(chosen);
            notes.push(format!("trashed Player {}'s {chosen}", target_player + 1));
            Resolution::Await(PendingKind::ThiefGainTrashed {
                target_player,
                card: chosen,
            })
        }

        (
            PendingKind::ThiefGainTrashed {
                target_player,
                card: stolen,
            },
            Move::GainTrashedCard { gain },
        ) => {
            if *gain && state.trash.remove_last(stolen) {
                state.receive(current, stolen, GainDestination::Discard);
                notes.push(format!("gained the trashed {stolen}"));
            }
            resolver::resume_attack(state, card, target_player, notes)
        }

        (PendingKind::SelectActionForThrone, Move::SelectActionForThrone { card: choice }) => {
            match choice {
                None => {
                    notes.push("played nothing twice".to_string());
                }
                Some(chosen) => {
                    let chosen = *chosen;
                    let player = &mut state.players[current];
                    if !player.hand.contains(chosen) {
                        return Err(MoveError::NotInHand(chosen));
                    }
                    if !chosen.is_action() {
                        return Err(MoveError::WrongCardType {
                            card: chosen,
                            expected: CardType::Action,
                        });
                    }
                    player.hand.remove(chosen);
                    player.in_play.add(chosen);
                    notes.push(format!("plays {chosen} twice"));
                    let mut replay = vec![
                        QueuedPlay {
                            card: chosen,
                            repeat: false,
                        },
                        QueuedPlay {
                            card: chosen,
                            repeat: true,
                        },
                    ];
                    replay.append(&mut queued);
                    queued = replay;
                }
            }
            Resolution::Done
        }

        (PendingKind::ChancellorDecision { deck_size }, Move::ChancellorDecision { discard_deck }) => {
            if *discard_deck {
                let player = &mut state.players[current];
                let deck = player.draw_pile.take_all();
                player.discard_pile.extend(deck);
                notes.push(format!("put {deck_size} cards from deck into discard"));
            }
            Resolution::Done
        }

        (
            PendingKind::LibrarySetAside {
                card: drawn,
                target_hand_size,
            },
            Move::LibrarySetAside { set_aside },
        ) => {
            if *set_aside {
                let player = &mut state.players[current];
                if player.hand.remove_last(drawn) {
                    player.set_aside.add(drawn);
                }
                notes.push(format!("set aside {drawn}"));
            }
            resolver::draw_to_hand_size(state, target_hand_size, notes)
        }

        (kind, mv) => {
            return Err(MoveError::PendingEffectMismatch {
                card,
                expected: kind.expected_move(),
                got: mv.kind(),
            })
        }
    };

    resolver::settle(state, card, resolution, queued, notes);
    Ok(())
}

/// First half of Remodel/Mine: trash one card from hand, then offer the gain
fn trash_for_gain(
    state: &mut GameState,
    trashed: CardName,
    spec: crate::core::TrashThenGain,
    notes: &mut Vec<String>,
) -> Result<Resolution, MoveError> {
    let current = state.current_player;
    if !state.players[current].hand.contains(trashed) {
        return Err(MoveError::NotInHand(trashed));
    }
    if let Some(expected) = spec.trash_filter {
        if !trashed.is_type(expected) {
            return Err(MoveError::WrongCardType {
                card: trashed,
                expected,
            });
        }
    }
    state.trash_from_hand(current, &[trashed]);
    let max_gain_cost = card_def(trashed).cost + spec.cost_bonus;
    notes.push(format!("trashed {trashed}"));
    Ok(resolver::offer_gain(
        state,
        max_gain_cost,
        spec.gain_filter,
        spec.destination,
        Some(trashed),
        notes,
    ))
}
