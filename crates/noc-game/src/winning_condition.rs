use crate::Game;
use crate::Player;
use crate::game::EdgeIndex;
use crate::game::VertexIndex;

/// A winning condition, decided by the sub-cycle found within a play once it
/// closes on itself. `path_v`/`path_e` is the play so far; `cycle_index` is
/// the position in `path_v` where the cycle starts (so the cycle itself is
/// `path_v[cycle_index..]` together with the closing edge back to
/// `path_v[cycle_index]`).
///
/// A closed enumeration rather than a trait object: the three variants are
/// known statically, and every caller already handles "a runtime-configured
/// set of conditions" via a flat `Vec<Condition>`.
#[derive(Clone, Copy, Debug)]
pub enum Condition {
    /// Even wins a cycle iff the best priority occurring in it (under the
    /// game's reward convention) is even.
    Parity,
    /// Even wins a cycle iff its total weight is non-negative, meaning it
    /// can be traversed forever without the accumulated energy drifting
    /// below the bound once enough initial credit has been granted.
    Energy,
    /// Even wins a cycle iff its average weight meets or exceeds
    /// `threshold`. Compared as integers (`total >= threshold * len`) to
    /// avoid floating-point drift.
    MeanPayoff { threshold: i64 },
}

impl Condition {
    /// Whether Even wins the cycle `path_v[cycle_index..]` under this
    /// condition.
    fn even_wins(&self, game: &Game, path_v: &[VertexIndex], path_e: &[EdgeIndex], cycle_index: usize) -> bool {
        match self {
            Condition::Parity => {
                let best = path_v[cycle_index..]
                    .iter()
                    .map(|&v| game.priority(v))
                    .reduce(|a, b| if game.compare_priorities(b, a, crate::PriorityRelation::Better) { b } else { a })
                    .expect("a cycle has at least one vertex");
                Player::from_priority(best) == Player::Even
            }
            Condition::Energy => {
                let total: i64 = path_e[cycle_index..].iter().map(|&e| game.weight(e)).sum();
                total >= 0
            }
            Condition::MeanPayoff { threshold } => {
                let cycle = &path_e[cycle_index..];
                let total: i64 = cycle.iter().map(|&e| game.weight(e)).sum();
                total >= threshold * cycle.len() as i64
            }
        }
    }
}

/// The combination rule for several active conditions: whether a loop is
/// good for `player_sat` given an active set of `conditions`. If `player_sat` is
/// [`Player::Even`] this is the conjunction of every condition's verdict; if
/// [`Player::Odd`] it is the disjunction of "not satisfied for Even" over
/// every condition, which by De Morgan is exactly the negation of the
/// Even conjunction — Odd wins a loop iff Even's conjunction does not.
pub fn cycle_satisfies(
    conditions: &[Condition],
    player_sat: Player,
    game: &Game,
    path_v: &[VertexIndex],
    path_e: &[EdgeIndex],
    cycle_index: usize,
) -> bool {
    let all_even = conditions.iter().all(|c| c.even_wins(game, path_v, path_e, cycle_index));
    match player_sat {
        Player::Even => all_even,
        Player::Odd => !all_even,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reward;

    fn triangle(priors: Vec<i64>, weights: Vec<i64>, reward: Reward) -> Game {
        Game::try_new(
            vec![Player::Even; priors.len()],
            priors,
            vec![0, 1, 2],
            vec![1, 2, 0],
            weights,
            0,
            reward,
        )
        .unwrap()
    }

    #[test]
    fn test_parity_condition_picks_best_priority() {
        let game = triangle(vec![1, 2, 3], vec![0, 0, 0], Reward::Max);
        let path_v: Vec<_> = (0..3).map(VertexIndex::new).collect();
        let path_e: Vec<_> = (0..3).map(EdgeIndex::new).collect();
        // Max priority in the cycle is 3, which is odd.
        assert!(!Condition::Parity.even_wins(&game, &path_v, &path_e, 0));
    }

    #[test]
    fn test_energy_condition_nonnegative_total_wins_for_even() {
        let game = triangle(vec![0, 0, 0], vec![2, -1, -1], Reward::Max);
        let path_v: Vec<_> = (0..3).map(VertexIndex::new).collect();
        let path_e: Vec<_> = (0..3).map(EdgeIndex::new).collect();
        assert!(Condition::Energy.even_wins(&game, &path_v, &path_e, 0));
    }

    #[test]
    fn test_mean_payoff_condition_respects_threshold() {
        let game = triangle(vec![0, 0, 0], vec![3, 3, 0], Reward::Max);
        let path_v: Vec<_> = (0..3).map(VertexIndex::new).collect();
        let path_e: Vec<_> = (0..3).map(EdgeIndex::new).collect();
        // total = 6 over 3 edges -> mean 2, meets threshold 2.
        assert!(Condition::MeanPayoff { threshold: 2 }.even_wins(&game, &path_v, &path_e, 0));
        assert!(!Condition::MeanPayoff { threshold: 3 }.even_wins(&game, &path_v, &path_e, 0));
    }

    #[test]
    fn test_cycle_satisfies_is_conjunction_for_even() {
        let game = triangle(vec![0, 0, 0], vec![1, 1, 1], Reward::Max);
        let path_v: Vec<_> = (0..3).map(VertexIndex::new).collect();
        let path_e: Vec<_> = (0..3).map(EdgeIndex::new).collect();
        let conditions = vec![Condition::Energy, Condition::MeanPayoff { threshold: 1 }];
        assert!(cycle_satisfies(&conditions, Player::Even, &game, &path_v, &path_e, 0));

        let conditions = vec![Condition::MeanPayoff { threshold: 100 }, Condition::Energy];
        assert!(!cycle_satisfies(&conditions, Player::Even, &game, &path_v, &path_e, 0));
    }

    #[test]
    fn test_cycle_satisfies_is_dual_between_even_and_odd() {
        let game = triangle(vec![1, 2, 3], vec![0, 0, 0], Reward::Max);
        let path_v: Vec<_> = (0..3).map(VertexIndex::new).collect();
        let path_e: Vec<_> = (0..3).map(EdgeIndex::new).collect();
        let conditions = vec![Condition::Parity];

        let even_good = cycle_satisfies(&conditions, Player::Even, &game, &path_v, &path_e, 0);
        let odd_good = cycle_satisfies(&conditions, Player::Odd, &game, &path_v, &path_e, 0);
        assert_ne!(even_good, odd_good);
    }
}
