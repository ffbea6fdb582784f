use crate::core::Move;
use crate::game::Game;

/// 指し手を選ぶ側の trait
///
/// The harness calls `select_move` once per turn. `None` means "pass"; a
/// policy should only return it when the side to move has no legal move.
pub trait Policy {
    fn select_move(&self, state: &Game) -> Option<Move>;
    fn name(&self) -> &str;
}
