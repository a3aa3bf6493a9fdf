//! Valid-move enumerator
//!
//! The single source of move options for every caller. Candidates for the
//! turn moves are filtered through the executor's own checks, and the
//! continuation moves are built from the same bounds the continuation
//! handlers enforce, so the list never offers a move the executor rejects.

use crate::core::CardName;
use crate::game::executor::{check_buy, check_play_action, check_play_all_treasures, check_play_treasure};
use crate::game::resolver::gainable;
use crate::game::{GameState, Move, PendingKind};
use smallvec::SmallVec;

/// Above this many distinct sub-multisets only representative selections are listed
const SUBSET_LIMIT: usize = 512;

/// Every move the executor would accept from the acting player
pub fn valid_moves(state: &GameState) -> Vec<Move> {
    match &state.pending_effect {
        Some(pending) => continuation_moves(state, &pending.kind),
        None => turn_moves(state),
    }
}

/// Moves available to `player`; empty unless they are the acting player
pub fn valid_moves_for(state: &GameState, player: usize) -> Vec<Move> {
    if player != state.acting_player() {
        return Vec::new();
    }
    valid_moves(state)
}

/// Distinct cards in first-appearance order
fn distinct(cards: impl IntoIterator<Item = CardName>) -> Vec<CardName> {
    let mut out: Vec<CardName> = Vec::new();
    for card in cards {
        if !out.contains(&card) {
            out.push(card);
        }
    }
    out
}

fn turn_moves(state: &GameState) -> Vec<Move> {
    let player = state.current();
    let mut moves = Vec::new();

    for card in distinct(player.hand.iter()) {
        if check_play_action(state, card).is_ok() {
            moves.push(Move::PlayAction { card });
        }
    }
    for card in distinct(player.hand.iter()) {
        if check_play_treasure(state, card).is_ok() {
            moves.push(Move::PlayTreasure { card });
        }
    }
    if check_play_all_treasures(state).is_ok() {
        moves.push(Move::PlayAllTreasures);
    }
    for (card, _) in state.supply.iter() {
        if check_buy(state, card).is_ok() {
            moves.push(Move::Buy { card });
        }
    }
    moves.push(Move::EndPhase);
    moves
}

fn yes_no<F: Fn(bool) -> Move>(make: F) -> Vec<Move> {
    vec![make(true), make(false)]
}

fn continuation_moves(state: &GameState, kind: &PendingKind) -> Vec<Move> {
    let hand = &state.current().hand;
    match kind {
        PendingKind::DiscardForCellar => card_subsets(&hand.cards, 0, hand.len())
            .into_iter()
            .map(|cards| Move::DiscardForCellar { cards })
            .collect(),

        PendingKind::TrashCards { max_trash } => {
            card_subsets(&hand.cards, 0, (*max_trash).min(hand.len()))
                .into_iter()
                .map(|cards| Move::TrashCards { cards })
                .collect()
        }

        PendingKind::TrashCopper { .. } => {
            let mut moves = vec![Move::TrashCards { cards: vec![] }];
            if hand.contains(CardName::Copper) {
                moves.push(Move::TrashCards {
                    cards: vec![CardName::Copper],
                });
            }
            moves
        }

        PendingKind::TrashForGain { spec } => {
            let candidates = distinct(
                hand.iter()
                    .filter(|c| spec.trash_filter.map_or(true, |t| c.is_type(t))),
            );
            if spec.trash_filter.is_some() {
                candidates
                    .into_iter()
                    .map(|card| Move::SelectTreasureToTrash { card })
                    .collect()
            } else {
                candidates
                    .into_iter()
                    .map(|card| Move::TrashCards { cards: vec![card] })
                    .collect()
            }
        }

        PendingKind::GainCard {
            max_gain_cost,
            filter,
            ..
        } => {
            let mut options = gainable(state, *max_gain_cost, *filter);
            options.sort_by(|a, b| b.cost().cmp(&a.cost()).then_with(|| a.as_str().cmp(b.as_str())));
            options
                .into_iter()
                .map(|card| Move::GainCard { card })
                .collect()
        }

        PendingKind::DiscardToHandSize {
            target_player,
            hand_size,
        } => {
            let target_hand = &state.players[*target_player].hand;
            let count = target_hand.len().saturating_sub(*hand_size);
            card_subsets(&target_hand.cards, count, count)
                .into_iter()
                .map(|cards| Move::DiscardToHandSize { cards })
                .collect()
        }

        PendingKind::RevealAndTopdeck { target_player } => {
            distinct(state.players[*target_player].hand.iter().filter(|c| c.is_victory()))
                .into_iter()
                .map(|card| Move::RevealAndTopdeck { card })
                .collect()
        }

        PendingKind::SpyDecision { .. } => yes_no(|discard| Move::SpyDecision { discard }),

        PendingKind::ThiefSelectTreasure { revealed, .. } => {
            distinct(revealed.iter().copied().filter(|c| c.is_treasure()))
                .into_iter()
                .map(|card| Move::SelectTreasureToTrash { card })
                .collect()
        }

        PendingKind::ThiefGainTrashed { .. } => yes_no(|gain| Move::GainTrashedCard { gain }),

        PendingKind::SelectActionForThrone => {
            let mut moves: Vec<Move> = distinct(hand.iter().filter(|c| c.is_action()))
                .into_iter()
                .map(|card| Move::SelectActionForThrone { card: Some(card) })
                .collect();
            moves.push(Move::SelectActionForThrone { card: None });
            moves
        }

        PendingKind::ChancellorDecision { .. } => {
            yes_no(|discard_deck| Move::ChancellorDecision { discard_deck })
        }

        PendingKind::LibrarySetAside { .. } => yes_no(|set_aside| Move::LibrarySetAside { set_aside }),
    }
}

/// Sub-multisets of `cards` with size in `min..=max`, cards in first-appearance order.
///
/// Lists every distinct selection when there are at most [`SUBSET_LIMIT`] of
/// them; otherwise falls back to representative selections (empty, each
/// single card, and the first and last `max` cards).
pub(crate) fn card_subsets(cards: &[CardName], min: usize, max: usize) -> Vec<Vec<CardName>> {
    let max = max.min(cards.len());
    if min > max {
        return Vec::new();
    }

    let groups: SmallVec<[(CardName, usize); 8]> = distinct(cards.iter().copied())
        .into_iter()
        .map(|card| (card, cards.iter().filter(|&&c| c == card).count()))
        .collect();

    let combinations = groups
        .iter()
        .try_fold(1usize, |acc, &(_, n)| acc.checked_mul(n + 1));

    match combinations {
        Some(total) if total <= SUBSET_LIMIT => {
            let mut out = Vec::new();
            let mut current = Vec::new();
            collect_subsets(&groups, 0, min, max, &mut current, &mut out);
            out
        }
        _ => representative_subsets(&groups, cards, min, max),
    }
}

fn collect_subsets(
    groups: &[(CardName, usize)],
    index: usize,
    min: usize,
    max: usize,
    current: &mut Vec<CardName>,
    out: &mut Vec<Vec<CardName>>,
) {
    if index == groups.len() {
        if current.len() >= min {
            out.push(current.clone());
        }
        return;
    }
    let (card, available) = groups[index];
    let room = max - current.len();
    for take in 0..=available.min(room) {
        for _ in 0..take {
            current.push(card);
        }
        collect_subsets(groups, index + 1, min, max, current, out);
        for _ in 0..take {
            current.pop();
        }
    }
}

fn representative_subsets(
    groups: &[(CardName, usize)],
    cards: &[CardName],
    min: usize,
    max: usize,
) -> Vec<Vec<CardName>> {
    let canonical = |selection: &[CardName]| -> Vec<CardName> {
        let mut sorted = Vec::with_capacity(selection.len());
        for &(card, _) in groups {
            sorted.extend(selection.iter().copied().filter(|&c| c == card));
        }
        sorted
    };

    let mut out: Vec<Vec<CardName>> = Vec::new();
    let mut push = |selection: Vec<CardName>| {
        if (min..=max).contains(&selection.len()) && !out.contains(&selection) {
            out.push(selection);
        }
    };

    push(Vec::new());
    for &(card, _) in groups {
        push(vec![card]);
    }
    push(canonical(&cards[..max]));
    push(canonical(&cards[cards.len() - max..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsets_dedupe_duplicates() {
        let hand = [CardName::Copper, CardName::Copper, CardName::Estate];
        let subsets = card_subsets(&hand, 0, 3);
        // (0..=2 Coppers) x (0..=1 Estates)
        assert_eq!(subsets.len(), 6);
        assert!(subsets.contains(&vec![]));
        assert!(subsets.contains(&vec![CardName::Copper, CardName::Copper, CardName::Estate]));
    }

    #[test]
    fn test_subsets_respect_bounds() {
        let hand = [CardName::Copper, CardName::Silver, CardName::Gold, CardName::Estate];
        let exact = card_subsets(&hand, 2, 2);
        assert_eq!(exact.len(), 6);
        assert!(exact.iter().all(|s| s.len() == 2));
        assert!(card_subsets(&hand, 5, 5).is_empty());
        let up_to_one = card_subsets(&hand, 0, 1);
        assert_eq!(up_to_one.len(), 5);
    }

    #[test]
    fn test_large_hand_uses_representatives() {
        let hand: Vec<CardName> = CardName::ALL.iter().copied().take(12).collect();
        let subsets = card_subsets(&hand, 0, 4);
        assert!(subsets.contains(&vec![]));
        assert!(subsets.contains(&vec![CardName::Copper]));
        assert!(subsets.contains(&hand[..4].to_vec()));
        assert!(subsets.iter().all(|s| s.len() <= 4));
        assert!(subsets.len() < SUBSET_LIMIT);
    }
}
