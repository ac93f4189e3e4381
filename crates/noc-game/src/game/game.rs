use core::fmt;

use itertools::Itertools;
use log::warn;

use crate::GameBuildError;
use crate::game::EdgeIndex;
use crate::game::Player;
use crate::game::PriorityRelation;
use crate::game::Reward;
use crate::game::VertexIndex;

/// An immutable directed graph with per-vertex owner and priority, per-edge
/// weight, a designated initial vertex and a reward convention.
///
/// Mutation after construction is limited to [`Game::set_init`],
/// [`Game::set_reward`] and [`Game::flip_game`].
pub struct Game {
    owners: Vec<Player>,
    priors: Vec<i64>,

    sources: Vec<VertexIndex>,
    targets: Vec<VertexIndex>,
    weights: Vec<i64>,

    /// `outs[v]` are the indices of edges leaving `v`.
    outs: Vec<Vec<EdgeIndex>>,
    /// `ins[v]` are the indices of edges entering `v`.
    ins: Vec<Vec<EdgeIndex>>,

    init: VertexIndex,
    reward: Reward,
}

impl Game {
    /// Constructs a game from explicit vectors.
    ///
    /// `owners`/`priors` must have one entry per vertex; `sources`/`targets`/
    /// `weights` must have one entry per edge, with `sources[e]`/`targets[e]`
    /// in `[0, nvertices)`. If `init` is out of range it is clamped to the
    /// nearest valid vertex and a warning is logged, matching the original
    /// tool's convention.
    pub fn try_new(
        owners: Vec<Player>,
        priors: Vec<i64>,
        sources: Vec<usize>,
        targets: Vec<usize>,
        weights: Vec<i64>,
        init: usize,
        reward: Reward,
    ) -> Result<Self, GameBuildError> {
        if owners.is_empty() {
            return Err(GameBuildError::NoVertices);
        }
        if owners.len() != priors.len() {
            return Err(GameBuildError::OwnerPriorityMismatch {
                owners: owners.len(),
                priors: priors.len(),
            });
        }
        if sources.len() != targets.len() {
            return Err(GameBuildError::SourceTargetMismatch {
                sources: sources.len(),
                targets: targets.len(),
            });
        }
        if weights.len() != sources.len() {
            return Err(GameBuildError::WeightCountMismatch {
                weights: weights.len(),
                nedges: sources.len(),
            });
        }

        let nvertices = owners.len();
        for (e, (&s, &t)) in sources.iter().zip(targets.iter()).enumerate() {
            if s >= nvertices {
                return Err(GameBuildError::EndpointOutOfRange {
                    edge: e,
                    field: "source",
                    value: s,
                    nvertices,
                });
            }
            if t >= nvertices {
                return Err(GameBuildError::EndpointOutOfRange {
                    edge: e,
                    field: "target",
                    value: t,
                    nvertices,
                });
            }
        }

        let sources: Vec<VertexIndex> = sources.into_iter().map(VertexIndex::new).collect();
        let targets: Vec<VertexIndex> = targets.into_iter().map(VertexIndex::new).collect();

        let mut outs = vec![Vec::new(); nvertices];
        let mut ins = vec![Vec::new(); nvertices];
        for e in 0..sources.len() {
            outs[*sources[e]].push(EdgeIndex::new(e));
            ins[*targets[e]].push(EdgeIndex::new(e));
        }

        let init = clamp_init(init, nvertices);

        Ok(Game {
            owners,
            priors,
            sources,
            targets,
            weights,
            outs,
            ins,
            init: VertexIndex::new(init),
            reward,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.owners.len()
    }

    pub fn num_edges(&self) -> usize {
        self.sources.len()
    }

    pub fn iter_vertices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        (0..self.num_vertices()).map(VertexIndex::new)
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        (0..self.num_edges()).map(EdgeIndex::new)
    }

    pub fn owner(&self, v: VertexIndex) -> Player {
        self.owners[*v]
    }

    pub fn priority(&self, v: VertexIndex) -> i64 {
        self.priors[*v]
    }

    pub fn source(&self, e: EdgeIndex) -> VertexIndex {
        self.sources[*e]
    }

    pub fn target(&self, e: EdgeIndex) -> VertexIndex {
        self.targets[*e]
    }

    pub fn weight(&self, e: EdgeIndex) -> i64 {
        self.weights[*e]
    }

    pub fn outs(&self, v: VertexIndex) -> &[EdgeIndex] {
        &self.outs[*v]
    }

    pub fn ins(&self, v: VertexIndex) -> &[EdgeIndex] {
        &self.ins[*v]
    }

    pub fn init(&self) -> VertexIndex {
        self.init
    }

    pub fn reward(&self) -> Reward {
        self.reward
    }

    /// Sets the initial vertex, clamping it into range with a warning if
    /// it's out of bounds.
    pub fn set_init(&mut self, init: usize) {
        self.init = VertexIndex::new(clamp_init(init, self.num_vertices()));
    }

    pub fn set_reward(&mut self, reward: Reward) {
        self.reward = reward;
    }

    /// Returns whether `a` stands in relation `rel` to `b` under the game's
    /// reward convention.
    pub fn compare_priorities(&self, a: i64, b: i64, rel: PriorityRelation) -> bool {
        match (self.reward, rel) {
            (Reward::Min, PriorityRelation::Better) => a < b,
            (Reward::Max, PriorityRelation::Better) => a > b,
            (_, PriorityRelation::Equal) => a == b,
            (Reward::Min, PriorityRelation::BetterOrEqual) => a <= b,
            (Reward::Max, PriorityRelation::BetterOrEqual) => a >= b,
        }
    }

    /// Returns the dual game: owners swapped, every priority incremented by
    /// one. Reassigns each cycle's winner to the opposite parity.
    pub fn flip_game(&self) -> Game {
        Game {
            owners: self.owners.iter().map(Player::opponent).collect(),
            priors: self.priors.iter().map(|p| p + 1).collect(),
            sources: self.sources.clone(),
            targets: self.targets.clone(),
            weights: self.weights.clone(),
            outs: self.outs.clone(),
            ins: self.ins.clone(),
            init: self.init,
            reward: self.reward,
        }
    }
}

/// Clamps `init` into `[0, nvertices)`, warning if it was out of range.
/// Callers must ensure `nvertices >= 1` (`Game` always has at least one
/// vertex, enforced by `try_new`'s `GameBuildError::NoVertices` check).
fn clamp_init(init: usize, nvertices: usize) -> usize {
    if init >= nvertices {
        let clamped = nvertices - 1;
        warn!("initial vertex {init} out of range, clamped to {clamped}");
        clamped
    } else {
        init
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game {{")?;
        writeln!(f, "  num_vertices: {},", self.num_vertices())?;
        writeln!(f, "  num_edges: {},", self.num_edges())?;
        writeln!(f, "  init: v{},", *self.init)?;
        writeln!(f, "  reward: {:?},", self.reward)?;
        for v in self.iter_vertices() {
            write!(
                f,
                "  {}: ({:?}, priority: {}, outs: [",
                *v,
                self.owner(v),
                self.priority(v)
            )?;
            write!(f, "{}", self.outs(v).iter().map(|e| *self.target(*e)).format(", "))?;
            writeln!(f, "]),")?;
        }
        writeln!(f, "}}")
    }
}
