use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use std::collections::VecDeque;

use crate::Game;
use crate::game::EdgeIndex;
use crate::game::VertexIndex;

/// A mutable activity mask over a [`Game`]'s vertices and edges. Filters the
/// graph without copying it; owned by the caller, lifetime strictly inside
/// one call sequence.
pub struct GameView<'a> {
    game: &'a Game,
    vs: BitVec<usize, Lsb0>,
    es: BitVec<usize, Lsb0>,
}

impl<'a> GameView<'a> {
    /// Constructs a view with every vertex and edge active.
    pub fn new(game: &'a Game) -> Self {
        let mut view = GameView {
            game,
            vs: bitvec![usize, Lsb0; 0; game.num_vertices()],
            es: bitvec![usize, Lsb0; 0; game.num_edges()],
        };
        view.activate_all();
        view
    }

    /// Constructs a view with every vertex and edge inactive.
    pub fn new_empty(game: &'a Game) -> Self {
        GameView {
            game,
            vs: bitvec![usize, Lsb0; 0; game.num_vertices()],
            es: bitvec![usize, Lsb0; 0; game.num_edges()],
        }
    }

    pub fn game(&self) -> &'a Game {
        self.game
    }

    pub fn activate_all(&mut self) {
        self.vs.fill(true);
        self.es.fill(true);
    }

    pub fn deactivate_all(&mut self) {
        self.vs.fill(false);
        self.es.fill(false);
    }

    pub fn is_vertex_active(&self, v: VertexIndex) -> bool {
        self.vs[*v]
    }

    pub fn is_edge_active(&self, e: EdgeIndex) -> bool {
        self.es[*e]
    }

    pub fn set_vertex_active(&mut self, v: VertexIndex, active: bool) {
        self.vs.set(*v, active);
    }

    pub fn set_edge_active(&mut self, e: EdgeIndex, active: bool) {
        self.es.set(*e, active);
    }

    /// Returns the currently active vertices.
    pub fn vertices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.game.iter_vertices().filter(move |&v| self.is_vertex_active(v))
    }

    /// Returns the currently active edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.game.iter_edges().filter(move |&e| self.is_edge_active(e))
    }

    /// Returns the currently active outgoing edges of `v`.
    pub fn outs(&self, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.game.outs(v).iter().copied().filter(move |&e| self.is_edge_active(e))
    }

    /// Returns the currently active incoming edges of `v`.
    pub fn ins(&self, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.game.ins(v).iter().copied().filter(move |&e| self.is_edge_active(e))
    }
}

/// Restricts `game` to the vertices (and their incident edges) reachable
/// from its initial vertex, returned as a fully-active view over `game`.
///
/// This is a solver-internal optimization (not a new user-facing feature):
/// it shrinks the CP encoding's variable count before search by marking
/// unreachable vertices/edges inactive.
pub fn reachable_view(game: &Game) -> GameView<'_> {
    let mut view = GameView::new_empty(game);

    let mut queue = VecDeque::new();
    let init = game.init();
    view.set_vertex_active(init, true);
    queue.push_back(init);

    while let Some(v) = queue.pop_front() {
        for &e in game.outs(v) {
            view.set_edge_active(e, true);
            let w = game.target(e);
            if !view.is_vertex_active(w) {
                view.set_vertex_active(w, true);
                queue.push_back(w);
            }
        }
    }

    view
}
