//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a turn, cycled by `end_phase`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Action,
    Buy,
    Cleanup,
}

impl Phase {
    /// Next phase in turn order. Cleanup wraps to the next player's Action phase.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Action => Phase::Buy,
            Phase::Buy => Phase::Cleanup,
            Phase::Cleanup => Phase::Action,
        }
    }

    pub fn can_play_actions(&self) -> bool {
        matches!(self, Phase::Action)
    }

    pub fn can_play_treasures(&self) -> bool {
        matches!(self, Phase::Buy)
    }

    pub fn can_buy(&self) -> bool {
        matches!(self, Phase::Buy)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Action => write!(f, "action"),
            Phase::Buy => write!(f, "buy"),
            Phase::Cleanup => write!(f, "cleanup"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        assert_eq!(Phase::Action.next(), Phase::Buy);
        assert_eq!(Phase::Buy.next(), Phase::Cleanup);
        assert_eq!(Phase::Cleanup.next(), Phase::Action);
    }

    #[test]
    fn test_phase_permissions() {
        assert!(Phase::Action.can_play_actions());
        assert!(!Phase::Action.can_play_treasures());
        assert!(Phase::Buy.can_play_treasures());
        assert!(Phase::Buy.can_buy());
        assert!(!Phase::Cleanup.can_buy());
    }
}
