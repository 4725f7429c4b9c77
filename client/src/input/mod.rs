pub mod data;
pub mod keyboard;

pub use data::GameAction;
