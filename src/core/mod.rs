//! Core game types: card catalog, effect descriptors, players

pub mod card;
pub mod effects;
pub mod player;

pub use card::{card_def, CardDef, CardName, CardType, VictoryValue};
pub use effects::{Attack, Bonus, BoundedChoice, CardEffect, GainDestination, Special, TrashThenGain};
pub use player::PlayerState;
