use core::fmt;

use itertools::Itertools;

use crate::Game;
use crate::cp::Engine;
use crate::cp::SearchEngine;
use crate::cp::VarTable;
use crate::game::EdgeIndex;
use crate::game::VertexIndex;

/// A winning strategy skeleton: the sets `V*`/`E*` of vertices and edges
/// fixed true by a satisfying CP assignment. Printing this is the core's
/// entire contribution to "printing" — no component in this crate performs
/// I/O.
pub struct Strategy {
    vertices: Vec<VertexIndex>,
    edges: Vec<EdgeIndex>,
}

impl Strategy {
    /// Extracts the strategy skeleton from a solved `engine`/`vars` pair.
    /// Only meaningful after [`crate::cp::Engine::solve`] returned
    /// [`crate::cp::SolveOutcome::Sat`].
    pub fn extract(game: &Game, engine: &Engine, vars: &VarTable) -> Self {
        let vertices = game.iter_vertices().filter(|&v| vars.vertex_var(v).is_some_and(|var| engine.is_true(var))).collect();
        let edges = game.iter_edges().filter(|&e| vars.edge_var(e).is_some_and(|var| engine.is_true(var))).collect();
        Strategy { vertices, edges }
    }

    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "V* = {{{}}}", self.vertices.iter().map(|v| **v).format(", "))?;
        writeln!(f, "E* = {{{}}}", self.edges.iter().map(|e| **e).format(", "))
    }
}
