use log::trace;

/// A boolean decision variable, fresh-allocated by [`Engine::new_bool_var`].
pub type VarId = usize;

/// A literal: a variable or its negation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lit {
    pub var: VarId,
    pub positive: bool,
}

impl Lit {
    pub fn pos(var: VarId) -> Self {
        Lit { var, positive: true }
    }

    pub fn neg(var: VarId) -> Self {
        Lit { var, positive: false }
    }

    pub fn negated(self) -> Self {
        Lit { var: self.var, positive: !self.positive }
    }
}

/// A disjunction of literals: at least one must hold.
pub type Clause = Vec<Lit>;

/// Signals that the current partial assignment cannot be extended to a
/// solution. Never crosses an API boundary as a [`std::error::Error`] — this
/// is engine-internal search control flow, not an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Conflict;

/// The subset of the engine a [`Propagator`] is allowed to touch: read the
/// current fixing of a variable, and force a variable false with a reason
/// clause explaining why no completion could keep it true.
pub trait SearchEngine {
    fn is_true(&self, var: VarId) -> bool;
    fn is_false(&self, var: VarId) -> bool;

    fn is_fixed(&self, var: VarId) -> bool {
        self.is_true(var) || self.is_false(var)
    }

    /// Forces `var` false, recording `reason` (a clause implied by the
    /// current assignment) as a learned no-good. If `var` is already fixed
    /// true this is a contradiction and [`Conflict`] is returned; the reason
    /// clause is still learned either way, since it is valid independent of
    /// the current branch.
    fn set_false(&mut self, var: VarId, reason: Clause) -> Result<(), Conflict>;
}

/// A propagator subscribes to every variable fixing event and is re-run to
/// a fixpoint by the engine between decisions.
pub trait Propagator<'g> {
    fn propagate(&mut self, engine: &mut dyn SearchEngine) -> Result<(), Conflict>;
}

/// Outcome of a full search: either a satisfying (and still-fixed) variable
/// assignment was found, or the search tree was exhausted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveOutcome {
    Sat,
    Unsat,
}

/// A minimal DPLL-style boolean CP engine: a clause database with unit
/// propagation, a fixpoint round of registered propagators between
/// decisions, and chronological backtracking. Branches in variable-index
/// order, value `false` first.
///
/// This exists to make the NOC propagator and CP encoding runnable
/// end-to-end; it makes no attempt at watched literals, non-chronological
/// backjumping or restarts, since a production CP/SAT backend is a
/// deliberately separate concern.
pub struct Engine<'g> {
    values: Vec<Option<bool>>,
    trail: Vec<VarId>,
    clauses: Vec<Clause>,
    propagators: Vec<Box<dyn Propagator<'g> + 'g>>,
}

impl<'g> Engine<'g> {
    pub fn new() -> Self {
        Engine {
            values: Vec::new(),
            trail: Vec::new(),
            clauses: Vec::new(),
            propagators: Vec::new(),
        }
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    pub fn new_bool_var(&mut self) -> VarId {
        self.values.push(None);
        self.values.len() - 1
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn register_propagator(&mut self, propagator: impl Propagator<'g> + 'g) {
        self.propagators.push(Box::new(propagator));
    }

    pub fn value(&self, var: VarId) -> Option<bool> {
        self.values[var]
    }

    fn enqueue(&mut self, var: VarId, val: bool) -> Result<(), Conflict> {
        match self.values[var] {
            Some(existing) if existing == val => Ok(()),
            Some(_) => Err(Conflict),
            None => {
                self.values[var] = Some(val);
                self.trail.push(var);
                Ok(())
            }
        }
    }

    fn unit_propagate(&mut self) -> Result<(), Conflict> {
        let mut progress = true;
        while progress {
            progress = false;
            for i in 0..self.clauses.len() {
                let clause = self.clauses[i].clone();
                let mut satisfied = false;
                let mut unassigned = None;
                let mut unassigned_count = 0;
                for lit in &clause {
                    match self.values[lit.var] {
                        Some(v) if v == lit.positive => {
                            satisfied = true;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            unassigned_count += 1;
                            unassigned = Some(*lit);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                if unassigned_count == 0 {
                    return Err(Conflict);
                }
                if unassigned_count == 1 {
                    let lit = unassigned.expect("unassigned_count == 1");
                    self.enqueue(lit.var, lit.positive)?;
                    progress = true;
                }
            }
        }
        Ok(())
    }

    /// Runs unit propagation and every registered propagator, alternating
    /// until neither fixes a new variable nor conflicts (a fixpoint between
    /// decision nodes).
    fn propagate_to_fixpoint(&mut self) -> Result<(), Conflict> {
        loop {
            self.unit_propagate()?;

            let before = self.trail.len();
            let mut propagators = std::mem::take(&mut self.propagators);
            let outcome = propagators.iter_mut().try_for_each(|p| p.propagate(&mut *self));
            self.propagators = propagators;
            outcome?;

            if self.trail.len() == before {
                return Ok(());
            }
        }
    }

    fn backtrack_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let var = self.trail.pop().expect("trail.len() > mark");
            self.values[var] = None;
        }
    }

    /// Runs the DFS search driver: propagate to a fixpoint, then branch on
    /// the first unfixed variable with value `false` first, backtracking
    /// chronologically on conflict.
    pub fn solve(&mut self) -> SolveOutcome {
        if self.propagate_to_fixpoint().is_err() {
            return SolveOutcome::Unsat;
        }
        self.search()
    }

    fn search(&mut self) -> SolveOutcome {
        let next = (0..self.num_vars()).find(|&v| self.values[v].is_none());
        let Some(var) = next else {
            return SolveOutcome::Sat;
        };

        for &candidate in &[false, true] {
            let mark = self.trail.len();
            trace!("cp: trying v{var} = {candidate}");
            if self.enqueue(var, candidate).is_ok() && self.propagate_to_fixpoint().is_ok() && self.search() == SolveOutcome::Sat
            {
                return SolveOutcome::Sat;
            }
            self.backtrack_to(mark);
        }
        SolveOutcome::Unsat
    }
}

impl Default for Engine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> SearchEngine for Engine<'g> {
    fn is_true(&self, var: VarId) -> bool {
        self.values[var] == Some(true)
    }

    fn is_false(&self, var: VarId) -> bool {
        self.values[var] == Some(false)
    }

    fn set_false(&mut self, var: VarId, reason: Clause) -> Result<(), Conflict> {
        self.clauses.push(reason);
        match self.values[var] {
            Some(true) => Err(Conflict),
            Some(false) => Ok(()),
            None => self.enqueue(var, false),
        }
    }
}
