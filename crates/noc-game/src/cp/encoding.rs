use log::debug;

use crate::Game;
use crate::Player;
use crate::cp::Clause;
use crate::cp::Engine;
use crate::cp::Lit;
use crate::cp::VarId;
use crate::game::EdgeIndex;
use crate::game::VertexIndex;
use crate::game::reachable_view;

/// Maps vertices/edges to their CP variables. A vertex or edge unreachable
/// from `init` has no variable at all (the reachable view shrinks the
/// encoding before search), so lookups return `None` for them.
pub struct VarTable {
    v_vars: Vec<Option<VarId>>,
    e_vars: Vec<Option<VarId>>,
}

impl VarTable {
    pub fn vertex_var(&self, v: VertexIndex) -> Option<VarId> {
        self.v_vars[*v]
    }

    pub fn edge_var(&self, e: EdgeIndex) -> Option<VarId> {
        self.e_vars[*e]
    }
}

/// The encoded CP problem: the engine primed with the encoding's clauses
/// (everything but the NOC propagator, which is attached separately since
/// it also needs the selected winning conditions) and the variable table
/// that maps it back onto the game.
pub struct EncodedGame<'g> {
    pub engine: Engine<'g>,
    pub vars: VarTable,
}

/// Builds the boolean CP encoding of `player_sat`'s strategy over `game`,
/// restricted to the subgraph reachable from `init`.
pub fn encode(game: &Game, player_sat: Player) -> EncodedGame<'_> {
    let view = reachable_view(game);
    let mut engine = Engine::new();

    let mut v_vars = vec![None; game.num_vertices()];
    for v in view.vertices() {
        v_vars[*v] = Some(engine.new_bool_var());
    }
    let mut e_vars = vec![None; game.num_edges()];
    for e in view.edges() {
        e_vars[*e] = Some(engine.new_bool_var());
    }
    let vars = VarTable { v_vars, e_vars };

    let init_var = vars.vertex_var(game.init()).expect("init is reachable from itself");
    engine.add_clause(vec![Lit::pos(init_var)]);

    for v in view.vertices() {
        let v_var = vars.vertex_var(v).expect("v came from view.vertices()");
        let outs: Vec<EdgeIndex> = view.outs(v).collect();

        if game.owner(v) == player_sat {
            encode_exactly_one_successor(&mut engine, &vars, v_var, &outs);
        } else {
            for &e in &outs {
                let e_var = vars.edge_var(e).expect("e came from view.outs()");
                engine.add_clause(vec![Lit::neg(v_var), Lit::pos(e_var)]);
            }
        }
    }

    for w in view.vertices() {
        if w == game.init() {
            continue;
        }
        let w_var = vars.vertex_var(w).expect("w came from view.vertices()");
        for e in view.ins(w) {
            let e_var = vars.edge_var(e).expect("e came from view.ins()");
            engine.add_clause(vec![Lit::neg(e_var), Lit::pos(w_var)]);
        }
    }

    debug!(
        "cp encoding: {} vertex vars, {} edge vars, {} clauses",
        view.vertices().count(),
        view.edges().count(),
        engine.num_clauses()
    );

    EncodedGame { engine, vars }
}

/// `V[v] -> EXACTLY-ONE(E[e] : e in outs)`: an at-least-one clause gated by
/// `v_var`, plus an unconditional sequential-counter at-most-one over
/// `outs`. With `outs` empty the at-least-one clause degenerates to the
/// unit clause `not v_var`, which is exactly the "player-owned deadlock
/// loses" convention.
fn encode_exactly_one_successor(engine: &mut Engine, vars: &VarTable, v_var: VarId, outs: &[EdgeIndex]) {
    let edge_vars: Vec<VarId> = outs.iter().map(|&e| vars.edge_var(e).expect("e came from view.outs()")).collect();

    let mut at_least_one: Clause = vec![Lit::neg(v_var)];
    at_least_one.extend(edge_vars.iter().map(|&e| Lit::pos(e)));
    engine.add_clause(at_least_one);

    if edge_vars.len() < 2 {
        return;
    }

    let n = edge_vars.len();
    let s: Vec<VarId> = (0..n - 1).map(|_| engine.new_bool_var()).collect();

    engine.add_clause(vec![Lit::neg(edge_vars[0]), Lit::pos(s[0])]);
    for i in 1..n - 1 {
        engine.add_clause(vec![Lit::neg(s[i - 1]), Lit::pos(s[i])]);
        engine.add_clause(vec![Lit::neg(edge_vars[i]), Lit::neg(s[i - 1])]);
        engine.add_clause(vec![Lit::neg(edge_vars[i]), Lit::pos(s[i])]);
    }
    engine.add_clause(vec![Lit::neg(edge_vars[n - 1]), Lit::neg(s[n - 2])]);
}
