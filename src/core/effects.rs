//! Card effect descriptors
//!
//! Every card's play-time behaviour is described by a [`Bonus`] (the plain
//! `+Cards / +Actions / +Buys / +$` part, applied first) and one [`CardEffect`]
//! variant naming its effect family. The resolver dispatches over
//! [`CardEffect`] with a single exhaustive match, so adding a family without
//! handling it is a compile error.

use crate::core::{CardName, CardType};
use serde::{Deserialize, Serialize};

/// Immediate counters granted when a card is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bonus {
    pub cards: u32,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,
}

impl Bonus {
    pub const NONE: Bonus = Bonus {
        cards: 0,
        actions: 0,
        buys: 0,
        coins: 0,
    };

    pub const fn new(cards: u32, actions: u32, buys: u32, coins: u32) -> Self {
        Bonus {
            cards,
            actions,
            buys,
            coins,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Bonus::NONE
    }

    /// Short human-readable form, e.g. "+1 Card, +2 Actions"
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        let mut push = |n: u32, singular: &str, plural: &str| {
            if n > 0 {
                parts.push(format!("+{} {}", n, if n == 1 { singular } else { plural }));
            }
        };
        push(self.cards, "Card", "Cards");
        push(self.actions, "Action", "Actions");
        push(self.buys, "Buy", "Buys");
        if self.coins > 0 {
            parts.push(format!("+${}", self.coins));
        }
        parts.join(", ")
    }
}

/// Where a gained card lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GainDestination {
    Discard,
    Hand,
    DrawPile,
}

impl std::fmt::Display for GainDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GainDestination::Discard => write!(f, "discard"),
            GainDestination::Hand => write!(f, "hand"),
            GainDestination::DrawPile => write!(f, "deck"),
        }
    }
}

/// Effect families, one variant per distinct resolution routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Nothing happens at play time (treasures, victory cards, curses)
    None,

    /// Only the card's [`Bonus`] applies
    Immediate,

    /// A single choice over a variable number of the player's own cards
    BoundedChoice(BoundedChoice),

    /// Trash exactly one qualifying card, then gain one within a cost ceiling
    TrashThenGain(TrashThenGain),

    /// Gain a card costing up to `max_cost`.
    /// With `trash_self` the played card goes to the trash first.
    Gain { max_cost: u32, trash_self: bool },

    /// Attack on the other players, cancelled per target by a Reaction in hand
    Attack(Attack),

    /// Play an action card from hand twice
    Replay,

    /// Deck manipulation that doesn't fit the other families
    Special(Special),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundedChoice {
    /// Discard any number of cards, then draw that many
    DiscardAndDraw,
    /// Trash up to `max` cards from hand
    TrashUpTo { max: usize },
    /// You may trash a Copper for +$`coins`
    TrashCopperForCoins { coins: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashThenGain {
    /// Type the trashed card must have, if any
    pub trash_filter: Option<CardType>,
    /// Added to the trashed card's cost to form the gain ceiling
    pub cost_bonus: u32,
    /// Type the gained card must have, if any
    pub gain_filter: Option<CardType>,
    pub destination: GainDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attack {
    /// Each other player discards down to `hand_size` cards
    DiscardDownTo { hand_size: usize },
    /// Each other player gains a Curse
    GiveCurse,
    /// Gain `gain` onto your deck; each other player puts a Victory card from hand onto theirs
    TopdeckVictory { gain: CardName },
    /// Each player (you included) reveals their top card; you choose discard or keep
    RevealTopCard,
    /// Each other player reveals `reveal` cards; you trash a revealed Treasure and may gain it
    StealTreasure { reveal: usize },
}

impl Attack {
    /// Whether the attacker is one of the players the attack iterates over
    pub fn includes_attacker(&self) -> bool {
        matches!(self, Attack::RevealTopCard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Special {
    /// Each other player draws `cards`
    OthersDraw { cards: u32 },
    /// Reveal until `count` Treasures are found; keep them, discard the rest
    RevealUntilTreasures { count: usize },
    /// You may put your whole deck into your discard pile
    DeckToDiscard,
    /// Draw until `size` cards in hand, optionally setting aside Action cards
    DrawToHandSize { size: usize },
}
