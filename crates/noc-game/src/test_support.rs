//! Test-only infrastructure. Not part of the public API: a random game
//! generator is not a feature this crate exposes, but property tests still
//! need something to draw games from.

use rand::Rng;

use crate::Game;
use crate::Player;
use crate::Reward;

/// Builds a random game with `num_vertices` vertices, priorities drawn from
/// `[0, num_priorities)`, and between 1 and `max_outdegree` outgoing edges
/// per vertex (every vertex gets at least one, so the game never has an
/// accidental deadlock unless `max_outdegree` forces it).
pub fn random_game(rng: &mut impl Rng, num_vertices: usize, num_priorities: usize, max_outdegree: usize, reward: Reward) -> Game {
    assert!(num_vertices > 0, "a game needs at least one vertex");
    assert!(num_priorities > 0, "a game needs at least one priority");
    assert!(max_outdegree >= 1, "a game needs at least one outgoing edge per vertex");

    let owners: Vec<Player> = (0..num_vertices).map(|_| if rng.random_bool(0.5) { Player::Even } else { Player::Odd }).collect();
    let priors: Vec<i64> = (0..num_vertices).map(|_| rng.random_range(0..num_priorities) as i64).collect();

    let mut sources = Vec::new();
    let mut targets = Vec::new();
    let mut weights = Vec::new();
    for v in 0..num_vertices {
        let outdegree = rng.random_range(1..=max_outdegree);
        for _ in 0..outdegree {
            sources.push(v);
            targets.push(rng.random_range(0..num_vertices));
            weights.push(rng.random_range(-5..=5));
        }
    }

    Game::try_new(owners, priors, sources, targets, weights, 0, reward).expect("random_game always builds a well-formed game")
}

#[cfg(test)]
mod tests {
    use super::*;
    use noc_utilities::random_test;

    #[test]
    fn test_random_game_respects_vertex_count() {
        random_test(32, |rng| {
            let game = random_game(rng, 8, 4, 3, Reward::Max);
            assert_eq!(game.num_vertices(), 8);
            for v in game.iter_vertices() {
                assert!(!game.outs(v).is_empty(), "every vertex has at least one outgoing edge");
            }
        });
    }
}
