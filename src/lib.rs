//! Othello engine: rules, depth-limited alpha-beta search with pluggable
//! evaluators, and a self-play tournament harness.

pub mod core;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;
