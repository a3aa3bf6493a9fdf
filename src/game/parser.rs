//! Move-string parser
//!
//! Accepted forms (case-insensitive):
//! - the canonical form printed by `Move`'s `Display` (`buy Silver`,
//!   `trash_cards Copper,Estate`, `spy_decision yes`, ...)
//! - `play <card>` / `play <hand index>`, resolved by the card's type and the phase
//! - `play_treasure all`, `treasures`, `end`, `end phase`
//! - a bare number, indexing into the valid-move list

use crate::core::CardName;
use crate::error::ParseError;
use crate::game::enumerator::valid_moves;
use crate::game::{GameState, Move, MoveKind};

pub fn parse_move(text: &str, state: &GameState) -> Result<Move, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let lower = trimmed.to_lowercase();

    if let Ok(index) = lower.parse::<usize>() {
        let moves = valid_moves(state);
        return moves.get(index).cloned().ok_or(ParseError::InvalidIndex {
            index: trimmed.to_string(),
            max: moves.len().saturating_sub(1),
        });
    }

    match lower.as_str() {
        "end" | "end phase" | "end_phase" => return Ok(Move::EndPhase),
        "treasures" | "play all treasures" | "play treasures" | "play_treasure all"
        | "play treasure all" | "play_all_treasures" => return Ok(Move::PlayAllTreasures),
        _ => {}
    }

    let (keyword, rest) = match lower.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (lower.as_str(), ""),
    };

    if keyword == "play" {
        return parse_play(rest, state);
    }

    let kind = MoveKind::from_keyword(keyword).ok_or_else(|| ParseError::Unrecognized(trimmed.to_string()))?;
    match kind {
        MoveKind::PlayAction => Ok(Move::PlayAction {
            card: card_arg(rest, trimmed)?,
        }),
        MoveKind::PlayTreasure => Ok(Move::PlayTreasure {
            card: card_arg(rest, trimmed)?,
        }),
        MoveKind::PlayAllTreasures => Ok(Move::PlayAllTreasures),
        MoveKind::EndPhase => Ok(Move::EndPhase),
        MoveKind::Buy => {
            let card = card_arg(rest, trimmed)?;
            if !state.supply.contains(card) {
                return Err(ParseError::NotInSupply(card));
            }
            Ok(Move::Buy { card })
        }
        MoveKind::GainCard => Ok(Move::GainCard {
            card: card_arg(rest, trimmed)?,
        }),
        MoveKind::SelectTreasureToTrash => Ok(Move::SelectTreasureToTrash {
            card: card_arg(rest, trimmed)?,
        }),
        MoveKind::RevealAndTopdeck => Ok(Move::RevealAndTopdeck {
            card: card_arg(rest, trimmed)?,
        }),
        MoveKind::DiscardForCellar => Ok(Move::DiscardForCellar {
            cards: card_list(rest)?,
        }),
        MoveKind::TrashCards => Ok(Move::TrashCards {
            cards: card_list(rest)?,
        }),
        MoveKind::DiscardToHandSize => Ok(Move::DiscardToHandSize {
            cards: card_list(rest)?,
        }),
        MoveKind::SelectActionForThrone => {
            let card = if rest.is_empty() || rest == "none" {
                None
            } else {
                Some(rest.parse::<CardName>()?)
            };
            Ok(Move::SelectActionForThrone { card })
        }
        MoveKind::SpyDecision => Ok(Move::SpyDecision {
            discard: yes_no(rest)?,
        }),
        MoveKind::GainTrashedCard => Ok(Move::GainTrashedCard { gain: yes_no(rest)? }),
        MoveKind::ChancellorDecision => Ok(Move::ChancellorDecision {
            discard_deck: yes_no(rest)?,
        }),
        MoveKind::LibrarySetAside => Ok(Move::LibrarySetAside {
            set_aside: yes_no(rest)?,
        }),
    }
}

/// `play <card>` or `play <index>`: the card's type must fit the phase.
/// Actions only in the Action phase, Treasures only in the Buy phase.
fn parse_play(rest: &str, state: &GameState) -> Result<Move, ParseError> {
    let hand = &state.current().hand;
    let card = match rest.parse::<usize>() {
        Ok(index) => {
            if hand.is_empty() {
                return Err(ParseError::EmptyHand);
            }
            *hand.cards.get(index).ok_or(ParseError::InvalidIndex {
                index: rest.to_string(),
                max: hand.len() - 1,
            })?
        }
        Err(_) => {
            let card = rest.parse::<CardName>()?;
            if !hand.contains(card) {
                return Err(ParseError::NotInHand(card));
            }
            card
        }
    };

    if card.is_action() && state.phase.can_play_actions() {
        Ok(Move::PlayAction { card })
    } else if card.is_treasure() && state.phase.can_play_treasures() {
        Ok(Move::PlayTreasure { card })
    } else {
        Err(ParseError::NotPlayable(card))
    }
}

fn card_arg(rest: &str, original: &str) -> Result<CardName, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::Unrecognized(original.to_string()));
    }
    rest.parse::<CardName>()
}

fn card_list(rest: &str) -> Result<Vec<CardName>, ParseError> {
    rest.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<CardName>)
        .collect()
}

fn yes_no(rest: &str) -> Result<bool, ParseError> {
    match rest {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(ParseError::InvalidChoice(other.to_string())),
    }
}
