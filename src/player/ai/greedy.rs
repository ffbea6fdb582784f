use crate::core::Move;
use crate::game::{Game, GameState};
use crate::logic::flip_count;
use crate::player::Policy;

/// One-ply policy: the move that flips the most discs right now. Ties go to
/// the first move in enumeration order.
pub struct GreedyPolicy {
    pub name: String,
}

impl GreedyPolicy {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    fn move_values(&self, state: &Game, moves: &[Move]) -> Vec<usize> {
        moves
            .iter()
            .map(|&mv| flip_count(state.board(), mv, state.turn()))
            .collect()
    }
}

impl Policy for GreedyPolicy {
    fn select_move(&self, state: &Game) -> Option<Move> {
        let moves = state.legal_moves();
        let values = self.move_values(state, &moves);

        let mut best: Option<(Move, usize)> = None;
        for (&mv, &value) in moves.iter().zip(values.iter()) {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((mv, value)),
            }
        }
        best.map(|(mv, _)| mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
