use crate::Game;
use crate::Player;
use crate::cp::Clause;
use crate::cp::Conflict;
use crate::cp::Propagator;
use crate::cp::SearchEngine;
use crate::cp::VarId;
use crate::cp::VarTable;
use crate::game::EdgeIndex;
use crate::game::VertexIndex;
use crate::winning_condition::Condition;
use crate::winning_condition::cycle_satisfies;

/// The "No-Opponent-Cycle" propagator: given the current fixing of
/// `V[·]`/`E[·]`, depth-first-explores the committed subgraph from `init`
/// and forbids any cycle that is bad for `player_sat` by forcing its
/// closing edge false, with a reason clause over the cycle's edges. Re-run
/// to a fixpoint by the engine after every variable fixing.
pub struct NocPropagator<'g> {
    game: &'g Game,
    player_sat: Player,
    conditions: Vec<Condition>,
    v_vars: Vec<Option<VarId>>,
    e_vars: Vec<Option<VarId>>,
}

impl<'g> NocPropagator<'g> {
    pub fn new(game: &'g Game, player_sat: Player, conditions: Vec<Condition>, vars: &VarTable) -> Self {
        let v_vars = game.iter_vertices().map(|v| vars.vertex_var(v)).collect();
        let e_vars = game.iter_edges().map(|e| vars.edge_var(e)).collect();
        NocPropagator { game, player_sat, conditions, v_vars, e_vars }
    }

    fn edge_var(&self, e: EdgeIndex) -> Option<VarId> {
        self.e_vars[*e]
    }

    /// Depth-first explores outgoing edges of `v` that are not fixed false,
    /// extending `path_v`/`path_e` only across edges already fixed true —
    /// exploration only follows currently committed edges, since cycle
    /// closure must be proven on the committed skeleton for a no-good to be
    /// sound. A revisited vertex closes a cycle candidate, which is
    /// forbidden regardless of whether the closing edge is itself fixed.
    fn explore(
        &self,
        v: VertexIndex,
        engine: &mut dyn SearchEngine,
        path_v: &mut Vec<VertexIndex>,
        path_e: &mut Vec<EdgeIndex>,
    ) -> Result<(), Conflict> {
        for &e in self.game.outs(v) {
            let Some(e_var) = self.edge_var(e) else { continue };
            if engine.is_false(e_var) {
                continue;
            }

            let w = self.game.target(e);
            path_e.push(e);

            if let Some(idx) = path_v.iter().position(|&pv| pv == w) {
                let good = cycle_satisfies(&self.conditions, self.player_sat, self.game, path_v, path_e, idx);
                if !good {
                    let reason: Clause = path_e[idx..]
                        .iter()
                        .map(|&ce| self.edge_var(ce).expect("edges on the committed path are all encoded"))
                        .map(crate::cp::Lit::neg)
                        .collect();
                    engine.set_false(e_var, reason)?;
                }
                path_e.pop();
                continue;
            }

            if engine.is_true(e_var) {
                path_v.push(w);
                self.explore(w, engine, path_v, path_e)?;
                path_v.pop();
            }
            path_e.pop();
        }
        Ok(())
    }
}

impl<'g> Propagator<'g> for NocPropagator<'g> {
    fn propagate(&mut self, engine: &mut dyn SearchEngine) -> Result<(), Conflict> {
        let init = self.game.init();
        if self.v_vars[*init].is_none() {
            return Ok(());
        }
        let mut path_v = vec![init];
        let mut path_e = Vec::new();
        self.explore(init, engine, &mut path_v, &mut path_e)
    }
}
