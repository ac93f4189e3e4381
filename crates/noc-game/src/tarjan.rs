use log::debug;
use log::trace;

use crate::game::GameView;
use crate::game::VertexIndex;

/// The result of decomposing a [`GameView`] into strongly connected
/// components. Every active vertex is assigned a component id; components
/// are numbered in the order Tarjan's algorithm closes them.
pub struct SccResult {
    component: Vec<Option<usize>>,
    num_components: usize,
}

impl SccResult {
    /// The component id of `v`, or `None` if `v` was inactive in the view
    /// that produced this result.
    pub fn component_of(&self, v: VertexIndex) -> Option<usize> {
        self.component[*v]
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Whether `a` and `b` lie in the same component.
    pub fn same_component(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.component_of(a).is_some() && self.component_of(a) == self.component_of(b)
    }
}

struct TarjanState {
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<VertexIndex>,
    next_index: usize,
    component: Vec<Option<usize>>,
    next_component: usize,
}

/// Decomposes the active subgraph of `view` into strongly connected
/// components using Tarjan's algorithm.
///
/// The recursive helper takes its state as explicit parameters rather than
/// as `&mut self` methods, since the traversal needs to hold both an
/// immutable borrow of `view` and a mutable borrow of the algorithm state at
/// the same time.
pub fn tarjan_scc(view: &GameView) -> SccResult {
    let n = view.game().num_vertices();
    let mut state = TarjanState {
        index: vec![None; n],
        lowlink: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        next_index: 0,
        component: vec![None; n],
        next_component: 0,
    };

    for v in view.vertices() {
        if state.index[*v].is_none() {
            strongly_connect(v, view, &mut state);
        }
    }

    SccResult {
        component: state.component,
        num_components: state.next_component,
    }
}

fn strongly_connect(v: VertexIndex, view: &GameView, state: &mut TarjanState) {
    state.index[*v] = Some(state.next_index);
    state.lowlink[*v] = state.next_index;
    state.next_index += 1;
    state.stack.push(v);
    state.on_stack[*v] = true;
    trace!("tarjan: visiting v{}", *v);

    for e in view.outs(v) {
        let w = view.game().target(e);
        if !view.is_vertex_active(w) {
            continue;
        }
        match state.index[*w] {
            None => {
                strongly_connect(w, view, state);
                state.lowlink[*v] = state.lowlink[*v].min(state.lowlink[*w]);
            }
            Some(w_index) if state.on_stack[*w] => {
                state.lowlink[*v] = state.lowlink[*v].min(w_index);
            }
            Some(_) => {}
        }
    }

    if state.lowlink[*v] == state.index[*v].expect("v was just indexed") {
        let comp = state.next_component;
        state.next_component += 1;
        loop {
            let w = state.stack.pop().expect("v is still on the stack");
            state.on_stack[*w] = false;
            state.component[*w] = Some(comp);
            if w == v {
                break;
            }
        }
        debug!("tarjan: closed component {comp}");
    }
}

/// Whether `v` has an edge to itself in `view`, making its singleton
/// component a cycle even though Tarjan never merges it with anything else.
pub fn has_self_loop(view: &GameView, v: VertexIndex) -> bool {
    view.outs(v).any(|e| view.game().target(e) == v)
}
