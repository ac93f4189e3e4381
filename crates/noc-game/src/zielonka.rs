use std::collections::VecDeque;
use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use itertools::Itertools;
use log::debug;
use log::trace;

use crate::Game;
use crate::Player;
use crate::game::VertexIndex;

/// A subset of a game's vertices, one bit per vertex.
pub type Set = BitVec<usize, Lsb0>;

/// Recursively solves the parity condition on `game` using Zielonka's
/// algorithm, returning the winning region of Even and of Odd. Used as a
/// cross-check oracle against the CP-based solver: both must agree on every
/// parity game, since they decide the same condition by different means.
pub fn solve_zielonka(game: &Game) -> [Set; 2] {
    let mut solver = ZielonkaSolver::new(game);
    let v = bitvec![usize, Lsb0; 1; game.num_vertices()];
    let (even, odd) = solver.zielonka_rec(v, 0);
    debug!("zielonka: solved in {} recursive calls", solver.recursive_calls);
    [even, odd]
}

struct ZielonkaSolver<'a> {
    game: &'a Game,
    predecessors: Vec<Vec<VertexIndex>>,
    temp_queue: VecDeque<VertexIndex>,
    recursive_calls: usize,
}

impl<'a> ZielonkaSolver<'a> {
    fn new(game: &'a Game) -> Self {
        let mut predecessors = vec![Vec::new(); game.num_vertices()];
        for v in game.iter_vertices() {
            for &e in game.outs(v) {
                predecessors[*game.target(e)].push(v);
            }
        }
        ZielonkaSolver {
            game,
            predecessors,
            temp_queue: VecDeque::new(),
            recursive_calls: 0,
        }
    }

    /// Returns `(winning_even, winning_odd)`, a partition of `region`.
    fn zielonka_rec(&mut self, region: Set, depth: usize) -> (Set, Set) {
        self.recursive_calls += 1;
        trace!("zielonka: depth {depth}, |region| = {}", region.count_ones());

        if region.count_ones() == 0 {
            return (region.clone(), region);
        }

        let best_priority = region
            .iter_ones()
            .map(|v| self.game.priority(VertexIndex::new(v)))
            .reduce(|a, b| if self.game.compare_priorities(b, a, crate::PriorityRelation::Better) { b } else { a })
            .expect("region is non-empty");
        let alpha = Player::from_priority(best_priority);

        let top_vertices: Set = region
            .iter_ones()
            .map(VertexIndex::new)
            .filter(|&v| self.game.priority(v) == best_priority)
            .fold(bitvec![usize, Lsb0; 0; region.len()], |mut acc, v| {
                acc.set(*v, true);
                acc
            });

        let attracted = self.attractor(alpha, &region, top_vertices);
        let rest = x_and_not_x(&region, &attracted);

        let (rest_even, rest_odd) = self.zielonka_rec(rest, depth + 1);
        let opponent_region = if alpha == Player::Even { &rest_odd } else { &rest_even };

        if opponent_region.count_ones() == 0 {
            let winning = combine(&attracted, if alpha == Player::Even { &rest_even } else { &rest_odd });
            match alpha {
                Player::Even => (winning, bitvec![usize, Lsb0; 0; region.len()]),
                Player::Odd => (bitvec![usize, Lsb0; 0; region.len()], winning),
            }
        } else {
            let opponent_attractor = self.attractor(alpha.opponent(), &region, opponent_region.clone());
            let remaining = x_and_not_x(&region, &opponent_attractor);
            let (remaining_even, remaining_odd) = if remaining.count_ones() == 0 {
                (
                    bitvec![usize, Lsb0; 0; region.len()],
                    bitvec![usize, Lsb0; 0; region.len()],
                )
            } else {
                self.zielonka_rec(remaining, depth + 1)
            };
            match alpha.opponent() {
                Player::Even => (
                    combine(&opponent_attractor, &remaining_even),
                    combine(&remaining_odd, &bitvec![usize, Lsb0; 0; region.len()]),
                ),
                Player::Odd => (
                    combine(&remaining_even, &bitvec![usize, Lsb0; 0; region.len()]),
                    combine(&opponent_attractor, &remaining_odd),
                ),
            }
        }
    }

    /// Computes the attractor of `target` for player `alpha` within `region`:
    /// repeatedly adds vertices owned by `alpha` with an edge into the set,
    /// and vertices owned by the opponent whose every edge stays inside
    /// `region` and leads into the set.
    ///
    /// Tracked with a per-vertex remaining-out-degree counter rather than
    /// re-scanning each opponent vertex's full outgoing edge list on every
    /// addition: a vertex is attracted the moment its counter of
    /// not-yet-attracted successors inside `region` reaches zero.
    fn attractor(&mut self, alpha: Player, region: &Set, mut attracted: Set) -> Set {
        let mut remaining = vec![0usize; self.game.num_vertices()];
        for v in region.iter_ones().map(VertexIndex::new) {
            if self.game.owner(v) != alpha {
                remaining[*v] = self
                    .game
                    .outs(v)
                    .iter()
                    .filter(|&&e| region[*self.game.target(e)])
                    .count();
            }
        }

        self.temp_queue.clear();
        for v in attracted.iter_ones().map(VertexIndex::new) {
            self.temp_queue.push_back(v);
        }

        while let Some(v) = self.temp_queue.pop_front() {
            for &pred in &self.predecessors[*v] {
                if !region[*pred] || attracted[*pred] {
                    continue;
                }
                if self.game.owner(pred) == alpha {
                    attracted.set(*pred, true);
                    self.temp_queue.push_back(pred);
                } else {
                    remaining[*pred] -= 1;
                    if remaining[*pred] == 0 {
                        attracted.set(*pred, true);
                        self.temp_queue.push_back(pred);
                    }
                }
            }
        }

        attracted
    }
}

/// `a \ b`, assuming both sets have the same length.
fn x_and_not_x(a: &Set, b: &Set) -> Set {
    let mut result = a.clone();
    result &= !b.clone();
    result
}

/// Bitwise-or of two same-length sets.
fn combine(a: &Set, b: &Set) -> Set {
    let mut result = a.clone();
    result |= b.clone();
    result
}

/// Displays a set as the list of vertex indices it contains.
pub struct DisplaySet<'a>(pub &'a Set);

impl fmt::Display for DisplaySet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter_ones().format(", "))
    }
}
