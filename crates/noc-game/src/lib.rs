#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod error;
mod game;
pub mod cp;
pub mod options;
pub mod solution;
pub mod tarjan;
pub mod winning_condition;
pub mod zielonka;

#[cfg(test)]
mod test_support;

pub use error::GameBuildError;
pub use game::EdgeIndex;
pub use game::Game;
pub use game::GameView;
pub use game::Player;
pub use game::PriorityRelation;
pub use game::Reward;
pub use game::VertexIndex;
pub use game::reachable_view;
pub use options::SolveOptions;
pub use options::SolveResult;
pub use options::solve;
