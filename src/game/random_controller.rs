//! Random AI controller for testing and baseline gameplay
//!
//! Makes uniform random choices from the valid moves.

use crate::game::controller::PlayerController;
use crate::game::{GameState, Move};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

/// A controller that makes random choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomController {
    player: usize,
    rng: Xoshiro256PlusPlus,
}

impl RandomController {
    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player: usize, seed: u64) -> Self {
        RandomController {
            player,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player(&self) -> usize {
        self.player
    }

    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, _state: &GameState, moves: &[Move]) -> usize {
        if moves.len() <= 1 {
            0
        } else {
            self.rng.gen_range(0..moves.len())
        }
    }
}
