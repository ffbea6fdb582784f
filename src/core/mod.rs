pub mod board;
pub mod serialization;
pub mod setup;
pub mod types;

pub use board::{Board, BoardError};
pub use setup::{setup_from_strings, standard_setup};
pub use types::{Color, Move, Position};
