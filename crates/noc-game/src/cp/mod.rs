//! The boolean CP encoding of strategy choice (`encoding`) and the
//! No-Opponent-Cycle propagator that drives search over it
//! (`noc_propagator`), on top of a minimal DPLL-style boolean engine
//! (`engine`).

mod encoding;
mod engine;
mod noc_propagator;

pub use encoding::EncodedGame;
pub use encoding::VarTable;
pub use encoding::encode;
pub use engine::Clause;
pub use engine::Conflict;
pub use engine::Engine;
pub use engine::Lit;
pub use engine::Propagator;
pub use engine::SearchEngine;
pub use engine::SolveOutcome;
pub use engine::VarId;
pub use noc_propagator::NocPropagator;
