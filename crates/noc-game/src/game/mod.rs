mod game;
mod types;
mod view;

pub use game::Game;
pub use types::EdgeIndex;
pub use types::Player;
pub use types::PriorityRelation;
pub use types::Reward;
pub use types::VertexIndex;
pub use view::GameView;
pub use view::reachable_view;
