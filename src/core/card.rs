//! Card catalog
//!
//! The full card pool is a closed enum ([`CardName`]) plus a static table of
//! [`CardDef`]s indexed by it. Lookups are pure and infallible.

use crate::core::effects::{
    Attack, BoundedChoice, Bonus, CardEffect, GainDestination, Special, TrashThenGain,
};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card types (a card can have several, e.g. Action + Attack)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Treasure,
    Action,
    Attack,
    Reaction,
    Victory,
    Curse,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardType::Treasure => "Treasure",
            CardType::Action => "Action",
            CardType::Attack => "Attack",
            CardType::Reaction => "Reaction",
            CardType::Victory => "Victory",
            CardType::Curse => "Curse",
        };
        write!(f, "{s}")
    }
}

/// Every card in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardName {
    // Basic treasures
    Copper,
    Silver,
    Gold,
    // Basic victory / curse
    Estate,
    Duchy,
    Province,
    Curse,
    // Kingdom
    Village,
    Smithy,
    Laboratory,
    Market,
    Woodcutter,
    Festival,
    #[serde(rename = "Council Room")]
    CouncilRoom,
    Cellar,
    Chapel,
    Remodel,
    Mine,
    Moneylender,
    Workshop,
    Feast,
    Militia,
    Witch,
    Bureaucrat,
    Spy,
    Thief,
    Moat,
    #[serde(rename = "Throne Room")]
    ThroneRoom,
    Adventurer,
    Chancellor,
    Library,
    Gardens,
}

impl CardName {
    /// All cards, in catalog order
    pub const ALL: [CardName; 32] = [
        CardName::Copper,
        CardName::Silver,
        CardName::Gold,
        CardName::Estate,
        CardName::Duchy,
        CardName::Province,
        CardName::Curse,
        CardName::Village,
        CardName::Smithy,
        CardName::Laboratory,
        CardName::Market,
        CardName::Woodcutter,
        CardName::Festival,
        CardName::CouncilRoom,
        CardName::Cellar,
        CardName::Chapel,
        CardName::Remodel,
        CardName::Mine,
        CardName::Moneylender,
        CardName::Workshop,
        CardName::Feast,
        CardName::Militia,
        CardName::Witch,
        CardName::Bureaucrat,
        CardName::Spy,
        CardName::Thief,
        CardName::Moat,
        CardName::ThroneRoom,
        CardName::Adventurer,
        CardName::Chancellor,
        CardName::Library,
        CardName::Gardens,
    ];

    /// Piles present in every game
    pub const BASIC: [CardName; 7] = [
        CardName::Copper,
        CardName::Silver,
        CardName::Gold,
        CardName::Estate,
        CardName::Duchy,
        CardName::Province,
        CardName::Curse,
    ];

    /// The kingdom pool a game's 10 kingdom piles are drawn from
    pub const KINGDOM: [CardName; 25] = [
        CardName::Village,
        CardName::Smithy,
        CardName::Laboratory,
        CardName::Market,
        CardName::Woodcutter,
        CardName::Festival,
        CardName::CouncilRoom,
        CardName::Cellar,
        CardName::Chapel,
        CardName::Remodel,
        CardName::Mine,
        CardName::Moneylender,
        CardName::Workshop,
        CardName::Feast,
        CardName::Militia,
        CardName::Witch,
        CardName::Bureaucrat,
        CardName::Spy,
        CardName::Thief,
        CardName::Moat,
        CardName::ThroneRoom,
        CardName::Adventurer,
        CardName::Chancellor,
        CardName::Library,
        CardName::Gardens,
    ];

    pub fn def(self) -> &'static CardDef {
        card_def(self)
    }

    pub fn cost(self) -> u32 {
        card_def(self).cost
    }

    pub fn is_type(self, card_type: CardType) -> bool {
        card_def(self).types.contains(&card_type)
    }

    pub fn is_action(self) -> bool {
        self.is_type(CardType::Action)
    }

    pub fn is_treasure(self) -> bool {
        self.is_type(CardType::Treasure)
    }

    pub fn is_victory(self) -> bool {
        self.is_type(CardType::Victory)
    }

    pub fn is_reaction(self) -> bool {
        self.is_type(CardType::Reaction)
    }

    pub fn is_kingdom(self) -> bool {
        CardName::KINGDOM.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        card_def(self).display_name
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a card name for lookup: ASCII-fold, lowercase, drop separators
fn normalize_name(s: &str) -> String {
    deunicode::deunicode(s)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for CardName {
    type Err = ParseError;

    /// Case-insensitive; "throne room", "Throne_Room" and "throneroom" all match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        if wanted.is_empty() {
            return Err(ParseError::UnknownCard(s.to_string()));
        }
        CardName::ALL
            .iter()
            .copied()
            .find(|card| normalize_name(card.as_str()) == wanted)
            .ok_or_else(|| ParseError::UnknownCard(s.trim().to_string()))
    }
}

/// How a card contributes to a player's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryValue {
    None,
    /// Fixed points per copy (negative for curses)
    Fixed(i32),
    /// One point per `divisor` cards owned, rounded down, per copy
    PerOwnedCards { divisor: u32 },
}

/// Static definition of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDef {
    pub name: CardName,
    pub display_name: &'static str,
    pub cost: u32,
    pub types: &'static [CardType],
    /// Coins produced when played as a Treasure
    pub coins: u32,
    pub victory: VictoryValue,
    pub bonus: Bonus,
    pub effect: CardEffect,
    pub text: &'static str,
}

impl CardDef {
    const fn base(
        name: CardName,
        display_name: &'static str,
        cost: u32,
        types: &'static [CardType],
        text: &'static str,
    ) -> Self {
        CardDef {
            name,
            display_name,
            cost,
            types,
            coins: 0,
            victory: VictoryValue::None,
            bonus: Bonus::NONE,
            effect: CardEffect::None,
            text,
        }
    }

    const fn treasure(name: CardName, display_name: &'static str, cost: u32, coins: u32) -> Self {
        let mut def = CardDef::base(name, display_name, cost, TREASURE, "");
        def.coins = coins;
        def
    }

    const fn victory(name: CardName, display_name: &'static str, cost: u32, points: i32) -> Self {
        let mut def = CardDef::base(name, display_name, cost, VICTORY, "");
        def.victory = VictoryValue::Fixed(points);
        def
    }

    const fn action(
        name: CardName,
        display_name: &'static str,
        cost: u32,
        types: &'static [CardType],
        bonus: Bonus,
        effect: CardEffect,
        text: &'static str,
    ) -> Self {
        let mut def = CardDef::base(name, display_name, cost, types, text);
        def.bonus = bonus;
        def.effect = effect;
        def
    }
}

const TREASURE: &[CardType] = &[CardType::Treasure];
const VICTORY: &[CardType] = &[CardType::Victory];
const CURSE: &[CardType] = &[CardType::Curse];
const ACTION: &[CardType] = &[CardType::Action];
const ATTACK: &[CardType] = &[CardType::Action, CardType::Attack];
const REACTION: &[CardType] = &[CardType::Action, CardType::Reaction];

/// Catalog, indexed by `CardName as usize`
static CATALOG: [CardDef; 32] = [
    CardDef::treasure(CardName::Copper, "Copper", 0, 1),
    CardDef::treasure(CardName::Silver, "Silver", 3, 2),
    CardDef::treasure(CardName::Gold, "Gold", 6, 3),
    CardDef::victory(CardName::Estate, "Estate", 2, 1),
    CardDef::victory(CardName::Duchy, "Duchy", 5, 3),
    CardDef::victory(CardName::Province, "Province", 8, 6),
    CardDef {
        victory: VictoryValue::Fixed(-1),
        ..CardDef::base(CardName::Curse, "Curse", 0, CURSE, "-1 Victory Point")
    },
    CardDef::action(
        CardName::Village,
        "Village",
        3,
        ACTION,
        Bonus::new(1, 2, 0, 0),
        CardEffect::Immediate,
        "+1 Card, +2 Actions",
    ),
    CardDef::action(
        CardName::Smithy,
        "Smithy",
        4,
        ACTION,
        Bonus::new(3, 0, 0, 0),
        CardEffect::Immediate,
        "+3 Cards",
    ),
    CardDef::action(
        CardName::Laboratory,
        "Laboratory",
        5,
        ACTION,
        Bonus::new(2, 1, 0, 0),
        CardEffect::Immediate,
        "+2 Cards, +1 Action",
    ),
    CardDef::action(
        CardName::Market,
        "Market",
        5,
        ACTION,
        Bonus::new(1, 1, 1, 1),
        CardEffect::Immediate,
        "+1 Card, +1 Action, +1 Buy, +$1",
    ),
    CardDef::action(
        CardName::Woodcutter,
        "Woodcutter",
        3,
        ACTION,
        Bonus::new(0, 0, 1, 2),
        CardEffect::Immediate,
        "+1 Buy, +$2",
    ),
    CardDef::action(
        CardName::Festival,
        "Festival",
        5,
        ACTION,
        Bonus::new(0, 2, 1, 2),
        CardEffect::Immediate,
        "+2 Actions, +1 Buy, +$2",
    ),
    CardDef::action(
        CardName::CouncilRoom,
        "Council Room",
        5,
        ACTION,
        Bonus::new(4, 0, 1, 0),
        CardEffect::Special(Special::OthersDraw { cards: 1 }),
        "+4 Cards, +1 Buy. Each other player draws a card.",
    ),
    CardDef::action(
        CardName::Cellar,
        "Cellar",
        2,
        ACTION,
        Bonus::new(0, 1, 0, 0),
        CardEffect::BoundedChoice(BoundedChoice::DiscardAndDraw),
        "+1 Action. Discard any number of cards, then draw that many.",
    ),
    CardDef::action(
        CardName::Chapel,
        "Chapel",
        2,
        ACTION,
        Bonus::NONE,
        CardEffect::BoundedChoice(BoundedChoice::TrashUpTo { max: 4 }),
        "Trash up to 4 cards from your hand.",
    ),
    CardDef::action(
        CardName::Remodel,
        "Remodel",
        4,
        ACTION,
        Bonus::NONE,
        CardEffect::TrashThenGain(TrashThenGain {
            trash_filter: None,
            cost_bonus: 2,
            gain_filter: None,
            destination: GainDestination::Discard,
        }),
        "Trash a card from your hand. Gain a card costing up to $2 more than it.",
    ),
    CardDef::action(
        CardName::Mine,
        "Mine",
        5,
        ACTION,
        Bonus::NONE,
        CardEffect::TrashThenGain(TrashThenGain {
            trash_filter: Some(CardType::Treasure),
            cost_bonus: 3,
            gain_filter: Some(CardType::Treasure),
            destination: GainDestination::Hand,
        }),
        "Trash a Treasure from your hand. Gain a Treasure to your hand costing up to $3 more than it.",
    ),
    CardDef::action(
        CardName::Moneylender,
        "Moneylender",
        4,
        ACTION,
        Bonus::NONE,
        CardEffect::BoundedChoice(BoundedChoice::TrashCopperForCoins { coins: 3 }),
        "You may trash a Copper from your hand for +$3.",
    ),
    CardDef::action(
        CardName::Workshop,
        "Workshop",
        3,
        ACTION,
        Bonus::NONE,
        CardEffect::Gain {
            max_cost: 4,
            trash_self: false,
        },
        "Gain a card costing up to $4.",
    ),
    CardDef::action(
        CardName::Feast,
        "Feast",
        4,
        ACTION,
        Bonus::NONE,
        CardEffect::Gain {
            max_cost: 5,
            trash_self: true,
        },
        "Trash this card. Gain a card costing up to $5.",
    ),
    CardDef::action(
        CardName::Militia,
        "Militia",
        4,
        ATTACK,
        Bonus::new(0, 0, 0, 2),
        CardEffect::Attack(Attack::DiscardDownTo { hand_size: 3 }),
        "+$2. Each other player discards down to 3 cards in hand.",
    ),
    CardDef::action(
        CardName::Witch,
        "Witch",
        5,
        ATTACK,
        Bonus::new(2, 0, 0, 0),
        CardEffect::Attack(Attack::GiveCurse),
        "+2 Cards. Each other player gains a Curse.",
    ),
    CardDef::action(
        CardName::Bureaucrat,
        "Bureaucrat",
        4,
        ATTACK,
        Bonus::NONE,
        CardEffect::Attack(Attack::TopdeckVictory {
            gain: CardName::Silver,
        }),
        "Gain a Silver onto your deck. Each other player reveals a Victory card from their hand and puts it onto their deck (or reveals a hand with no Victory cards).",
    ),
    CardDef::action(
        CardName::Spy,
        "Spy",
        4,
        ATTACK,
        Bonus::new(1, 1, 0, 0),
        CardEffect::Attack(Attack::RevealTopCard),
        "+1 Card, +1 Action. Each player (including you) reveals the top card of their deck and either discards it or puts it back, your choice.",
    ),
    CardDef::action(
        CardName::Thief,
        "Thief",
        4,
        ATTACK,
        Bonus::NONE,
        CardEffect::Attack(Attack::StealTreasure { reveal: 2 }),
        "Each other player reveals the top 2 cards of their deck. If they revealed any Treasure cards, they trash one that you choose. You may gain the trashed card. They discard the other revealed cards.",
    ),
    CardDef::action(
        CardName::Moat,
        "Moat",
        2,
        REACTION,
        Bonus::new(2, 0, 0, 0),
        CardEffect::Immediate,
        "+2 Cards. When another player plays an Attack card, you may reveal this from your hand to be unaffected by it.",
    ),
    CardDef::action(
        CardName::ThroneRoom,
        "Throne Room",
        4,
        ACTION,
        Bonus::NONE,
        CardEffect::Replay,
        "You may play an Action card from your hand twice.",
    ),
    CardDef::action(
        CardName::Adventurer,
        "Adventurer",
        6,
        ACTION,
        Bonus::NONE,
        CardEffect::Special(Special::RevealUntilTreasures { count: 2 }),
        "Reveal cards from your deck until you reveal 2 Treasure cards. Put those into your hand and discard the other revealed cards.",
    ),
    CardDef::action(
        CardName::Chancellor,
        "Chancellor",
        3,
        ACTION,
        Bonus::new(0, 0, 0, 2),
        CardEffect::Special(Special::DeckToDiscard),
        "+$2. You may immediately put your deck into your discard pile.",
    ),
    CardDef::action(
        CardName::Library,
        "Library",
        5,
        ACTION,
        Bonus::NONE,
        CardEffect::Special(Special::DrawToHandSize { size: 7 }),
        "Draw until you have 7 cards in hand, skipping any Action cards you choose to; set those aside, discarding them afterwards.",
    ),
    CardDef {
        victory: VictoryValue::PerOwnedCards { divisor: 10 },
        ..CardDef::base(
            CardName::Gardens,
            "Gardens",
            4,
            VICTORY,
            "Worth 1 VP per 10 cards you have (round down).",
        )
    },
];

/// Look up a card's definition
pub fn card_def(name: CardName) -> &'static CardDef {
    &CATALOG[name as usize]
}
