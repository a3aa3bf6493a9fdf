//! Player controller interface
//!
//! Controllers decide; the engine validates and applies. A controller sees
//! the state and the enumerator's move list and answers with an index into
//! that list, so what it picks is exactly what gets executed.

use crate::game::{GameState, Move};

pub trait PlayerController {
    /// Seat this controller plays
    fn player(&self) -> usize;

    /// Short name used in logs
    fn name(&self) -> &str;

    /// Pick one of `moves` (never empty) by index
    fn choose_move(&mut self, state: &GameState, moves: &[Move]) -> usize;

    /// Called once when the game ends
    fn on_game_end(&mut self, _state: &GameState, _won: bool) {}
}

/// Replays a fixed list of move indices, then always picks the last option.
///
/// The last option is `end_phase` for turn moves and a decline/empty choice
/// for most pending effects, so an exhausted script winds the turn down.
pub struct ScriptedController {
    player: usize,
    script: Vec<usize>,
    position: usize,
}

impl ScriptedController {
    pub fn new(player: usize, script: Vec<usize>) -> Self {
        ScriptedController {
            player,
            script,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.position)
    }
}

impl PlayerController for ScriptedController {
    fn player(&self) -> usize {
        self.player
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_move(&mut self, _state: &GameState, moves: &[Move]) -> usize {
        let last = moves.len().saturating_sub(1);
        match self.script.get(self.position) {
            Some(&index) => {
                self.position += 1;
                index.min(last)
            }
            None => last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOptions, GameState};

    #[test]
    fn test_scripted_controller() {
        let state = GameState::new(1, 2, &GameOptions::default()).unwrap();
        let moves = vec![Move::PlayAllTreasures, Move::EndPhase];
        let mut controller = ScriptedController::new(0, vec![0, 7]);
        assert_eq!(controller.choose_move(&state, &moves), 0);
        assert_eq!(controller.choose_move(&state, &moves), 1);
        assert_eq!(controller.remaining(), 0);
        assert_eq!(controller.choose_move(&state, &moves), 1);
    }
}
