pub mod ai;
pub mod controller;

pub use controller::Policy;
