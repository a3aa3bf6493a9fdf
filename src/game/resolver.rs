//! Effect resolver: what happens when a card is played
//!
//! [`resolve_play`] applies a card's bonus and then dispatches on its
//! [`CardEffect`] family. Each family either finishes on the spot or returns
//! the [`PendingKind`] it is waiting on. [`settle`] turns that answer into
//! the state's pending effect and drives any plays queued by Throne Room.

use crate::core::{
    card_def, Attack, Bonus, BoundedChoice, CardEffect, CardName, CardType, GainDestination,
    Special,
};
use crate::error::MoveError;
use crate::game::{GameState, PendingEffect, PendingKind, QueuedPlay};
use smallvec::SmallVec;

/// Outcome of one resolution step
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Done,
    Await(PendingKind),
}

fn player_label(player: usize) -> String {
    format!("Player {}", player + 1)
}

fn matches_filter(card: CardName, filter: Option<CardType>) -> bool {
    filter.map_or(true, |t| card.is_type(t))
}

/// Reject a direct play whose mandatory choice has no possible answer.
///
/// Assumes `card` is in the current player's hand; the played copy itself is
/// not a candidate.
pub(crate) fn check_playable(state: &GameState, card: CardName) -> Result<(), MoveError> {
    if let CardEffect::TrashThenGain(spec) = card_def(card).effect {
        let mut skipped_self = false;
        let has_target = state.current().hand.iter().any(|c| {
            if c == card && !skipped_self {
                skipped_self = true;
                return false;
            }
            matches_filter(c, spec.trash_filter)
        });
        if !has_target {
            let reason = match spec.trash_filter {
                Some(CardType::Treasure) => "no Treasure in hand to trash",
                _ => "no other card in hand to trash",
            };
            return Err(MoveError::NoQualifyingCard { card, reason });
        }
    }
    Ok(())
}

/// Resolve a card that has just been put into play.
///
/// `repeat` marks the second resolution of a card replayed by Throne Room.
pub(crate) fn resolve_play(
    state: &mut GameState,
    card: CardName,
    repeat: bool,
    notes: &mut Vec<String>,
) -> Resolution {
    let def = card_def(card);
    apply_bonus(state, def.bonus, notes);

    match def.effect {
        CardEffect::None | CardEffect::Immediate => Resolution::Done,
        CardEffect::BoundedChoice(choice) => bounded_choice(state, choice, notes),
        CardEffect::TrashThenGain(spec) => {
            if state
                .current()
                .hand
                .iter()
                .any(|c| matches_filter(c, spec.trash_filter))
            {
                Resolution::Await(PendingKind::TrashForGain { spec })
            } else {
                notes.push(format!("{card} has nothing to trash"));
                Resolution::Done
            }
        }
        CardEffect::Gain {
            max_cost,
            trash_self,
        } => {
            if trash_self && !repeat && state.current_mut().in_play.remove_last(card) {
                state.trash.add(card);
                notes.push(format!("trashed {card}"));
            }
            offer_gain(state, max_cost, None, GainDestination::Discard, None, notes)
        }
        CardEffect::Attack(attack) => begin_attack(state, card, attack, notes),
        CardEffect::Replay => {
            if state.current().hand.iter().any(|c| c.is_action()) {
                Resolution::Await(PendingKind::SelectActionForThrone)
            } else {
                notes.push("no Action card to play twice".to_string());
                Resolution::Done
            }
        }
        CardEffect::Special(special) => resolve_special(state, card, special, notes),
    }
}

fn apply_bonus(state: &mut GameState, bonus: Bonus, notes: &mut Vec<String>) {
    if bonus.is_empty() {
        return;
    }
    let current = state.current_player;
    let drawn = state.draw(current, bonus.cards as usize);
    let player = state.current_mut();
    player.actions += bonus.actions;
    player.buys += bonus.buys;
    player.coins += bonus.coins;

    let mut text = bonus.describe();
    if (drawn as u32) < bonus.cards {
        text.push_str(&format!(" (drew only {drawn})"));
    }
    notes.push(text);
}

fn bounded_choice(state: &mut GameState, choice: BoundedChoice, notes: &mut Vec<String>) -> Resolution {
    let hand = &state.current().hand;
    match choice {
        BoundedChoice::DiscardAndDraw => {
            if hand.is_empty() {
                notes.push("no cards to discard".to_string());
                Resolution::Done
            } else {
                Resolution::Await(PendingKind::DiscardForCellar)
            }
        }
        BoundedChoice::TrashUpTo { max } => {
            if hand.is_empty() {
                notes.push("no cards to trash".to_string());
                Resolution::Done
            } else {
                Resolution::Await(PendingKind::TrashCards { max_trash: max })
            }
        }
        BoundedChoice::TrashCopperForCoins { coins } => {
            if hand.contains(CardName::Copper) {
                Resolution::Await(PendingKind::TrashCopper { coins })
            } else {
                notes.push("No Copper to trash".to_string());
                Resolution::Done
            }
        }
    }
}

/// Cards the supply could give for a gain under `max_cost` and `filter`
pub(crate) fn gainable(state: &GameState, max_cost: u32, filter: Option<CardType>) -> Vec<CardName> {
    state
        .supply
        .iter()
        .filter(|&(card, count)| count > 0 && card.cost() <= max_cost && matches_filter(card, filter))
        .map(|(card, _)| card)
        .collect()
}

/// Install a gain step, or finish if nothing qualifies
pub(crate) fn offer_gain(
    state: &GameState,
    max_gain_cost: u32,
    filter: Option<CardType>,
    destination: GainDestination,
    trashed_card: Option<CardName>,
    notes: &mut Vec<String>,
) -> Resolution {
    if gainable(state, max_gain_cost, filter).is_empty() {
        notes.push(format!("nothing to gain costing up to {max_gain_cost}"));
        return Resolution::Done;
    }
    Resolution::Await(PendingKind::GainCard {
        max_gain_cost,
        filter,
        destination,
        trashed_card,
    })
}

fn begin_attack(state: &mut GameState, card: CardName, attack: Attack, notes: &mut Vec<String>) -> Resolution {
    if let Attack::TopdeckVictory { gain } = attack {
        let current = state.current_player;
        if state.gain(current, gain, GainDestination::DrawPile) {
            notes.push(format!("gained {gain} onto deck"));
        }
    }
    let first = if attack.includes_attacker() { 0 } else { 1 };
    continue_attack(state, card, attack, first, notes)
}

/// Seat offset (from the attacker) of the target after `target`
pub(crate) fn next_offset(state: &GameState, target: usize) -> usize {
    let n = state.player_count();
    (target + n - state.current_player) % n + 1
}

/// Apply `attack` to each target from seat offset `offset` onward, stopping
/// at the first target that needs a decision.
pub(crate) fn continue_attack(
    state: &mut GameState,
    card: CardName,
    attack: Attack,
    mut offset: usize,
    notes: &mut Vec<String>,
) -> Resolution {
    let attacker = state.current_player;
    let n = state.player_count();
    while offset < n {
        let target = (attacker + offset) % n;
        offset += 1;

        if target != attacker {
            let reaction = state.players[target].hand.iter().find(|c| c.is_reaction());
            if let Some(reaction) = reaction {
                notes.push(format!(
                    "{} reveals {reaction} and is unaffected by {card}",
                    player_label(target)
                ));
                continue;
            }
        }

        if let Some(kind) = attack_target(state, attack, target, notes) {
            return Resolution::Await(kind);
        }
    }
    Resolution::Done
}

/// Resume an attack after `target`'s decision was applied
pub(crate) fn resume_attack(
    state: &mut GameState,
    card: CardName,
    target: usize,
    notes: &mut Vec<String>,
) -> Resolution {
    match card_def(card).effect {
        CardEffect::Attack(attack) => {
            let offset = next_offset(state, target);
            continue_attack(state, card, attack, offset, notes)
        }
        _ => Resolution::Done,
    }
}

fn attack_target(
    state: &mut GameState,
    attack: Attack,
    target: usize,
    notes: &mut Vec<String>,
) -> Option<PendingKind> {
    match attack {
        Attack::DiscardDownTo { hand_size } => {
            (state.players[target].hand.len() > hand_size).then_some(PendingKind::DiscardToHandSize {
                target_player: target,
                hand_size,
            })
        }
        Attack::GiveCurse => {
            if state.gain(target, CardName::Curse, GainDestination::Discard) {
                notes.push(format!("{} gains a Curse", player_label(target)));
            }
            None
        }
        Attack::TopdeckVictory { .. } => {
            if state.players[target].hand.iter().any(|c| c.is_victory()) {
                Some(PendingKind::RevealAndTopdeck {
                    target_player: target,
                })
            } else {
                notes.push(format!(
                    "{} reveals a hand with no Victory cards",
                    player_label(target)
                ));
                None
            }
        }
        Attack::RevealTopCard => match state.reveal_top(target, 1).first() {
            Some(&revealed) => {
                notes.push(format!("{} reveals {revealed}", player_label(target)));
                Some(PendingKind::SpyDecision {
                    target_player: target,
                    revealed,
                })
            }
            None => {
                notes.push(format!("{} has no cards to reveal", player_label(target)));
                None
            }
        },
        Attack::StealTreasure { reveal } => {
            let revealed = state.reveal_top(target, reveal);
            if revealed.is_empty() {
                notes.push(format!("{} has no cards to reveal", player_label(target)));
                return None;
            }
            let names: Vec<String> = revealed.iter().map(|c| c.to_string()).collect();
            notes.push(format!("{} reveals {}", player_label(target), names.join(", ")));
            if revealed.iter().any(|c| c.is_treasure()) {
                Some(PendingKind::ThiefSelectTreasure {
                    target_player: target,
                    revealed: SmallVec::from_vec(revealed),
                })
            } else {
                let player = &mut state.players[target];
                for _ in 0..revealed.len() {
                    if let Some(c) = player.draw_pile.draw_top() {
                        player.discard_pile.add(c);
                    }
                }
                None
            }
        }
    }
}

fn resolve_special(
    state: &mut GameState,
    card: CardName,
    special: Special,
    notes: &mut Vec<String>,
) -> Resolution {
    let current = state.current_player;
    match special {
        Special::OthersDraw { cards } => {
            let n = state.player_count();
            for offset in 1..n {
                let other = (current + offset) % n;
                let drawn = state.draw(other, cards as usize);
                notes.push(format!("{} draws {drawn}", player_label(other)));
            }
            Resolution::Done
        }
        Special::RevealUntilTreasures { count } => {
            let mut found = Vec::new();
            while found.len() < count {
                let Some(revealed) = state.take_top(current) else {
                    break;
                };
                if revealed.is_treasure() {
                    state.players[current].hand.add(revealed);
                    found.push(revealed.to_string());
                } else {
                    state.players[current].set_aside.add(revealed);
                }
            }
            let player = &mut state.players[current];
            let aside = player.set_aside.take_all();
            let discarded = aside.len();
            player.discard_pile.extend(aside);
            if found.is_empty() {
                notes.push(format!("{card} found no Treasures"));
            } else {
                notes.push(format!("{card} found {}", found.join(", ")));
            }
            if discarded > 0 {
                notes.push(format!("discarded {discarded} revealed cards"));
            }
            Resolution::Done
        }
        Special::DeckToDiscard => {
            let deck_size = state.current().draw_pile.len();
            if deck_size == 0 {
                Resolution::Done
            } else {
                Resolution::Await(PendingKind::ChancellorDecision { deck_size })
            }
        }
        Special::DrawToHandSize { size } => draw_to_hand_size(state, size, notes),
    }
}

/// Library's draw loop: stop at `size` cards, at an Action card (to offer
/// setting it aside), or when out of cards.
pub(crate) fn draw_to_hand_size(state: &mut GameState, size: usize, notes: &mut Vec<String>) -> Resolution {
    let current = state.current_player;
    while state.players[current].hand.len() < size {
        match state.draw_card(current) {
            Some(card) if card.is_action() => {
                return Resolution::Await(PendingKind::LibrarySetAside {
                    card,
                    target_hand_size: size,
                });
            }
            Some(_) => {}
            None => break,
        }
    }
    let player = &mut state.players[current];
    let aside = player.set_aside.take_all();
    if !aside.is_empty() {
        notes.push(format!("discarded {} set-aside cards", aside.len()));
    }
    player.discard_pile.extend(aside);
    notes.push(format!("hand is now {} cards", player.hand.len()));
    Resolution::Done
}

/// Record `resolution` in the state, running queued plays while each one finishes.
pub(crate) fn settle(
    state: &mut GameState,
    mut card: CardName,
    mut resolution: Resolution,
    mut queue: Vec<QueuedPlay>,
    notes: &mut Vec<String>,
) {
    loop {
        match resolution {
            Resolution::Await(kind) => {
                state.pending_effect = Some(PendingEffect {
                    card,
                    kind,
                    queued: queue,
                });
                return;
            }
            Resolution::Done => {
                if queue.is_empty() {
                    state.pending_effect = None;
                    return;
                }
                let play = queue.remove(0);
                card = play.card;
                if play.repeat {
                    notes.push(format!("{card} resolves again"));
                } else {
                    notes.push(format!("{card} resolves"));
                }
                resolution = resolve_play(state, play.card, play.repeat, notes);
            }
        }
    }
}
