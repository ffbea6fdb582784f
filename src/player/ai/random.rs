use crate::core::Move;
use crate::game::{Game, GameState};
use crate::player::Policy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;

/// Uniformly random legal move.
pub struct RandomPolicy {
    pub name: String,
    rng: RefCell<StdRng>,
}

impl RandomPolicy {
    pub fn new(name: &str) -> Self {
        RandomPolicy {
            name: name.to_string(),
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(name: &str, seed: u64) -> Self {
        RandomPolicy {
            name: name.to_string(),
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&self, state: &Game) -> Option<Move> {
        let legal_moves = state.legal_moves();
        legal_moves.choose(&mut *self.rng.borrow_mut()).copied()
    }
}
