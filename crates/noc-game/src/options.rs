use log::info;

use crate::Game;
use crate::Player;
use crate::Reward;
use crate::cp::NocPropagator;
use crate::cp::SolveOutcome;
use crate::cp::encode;
use crate::solution::Strategy;
use crate::winning_condition::Condition;

/// The semantic options that flow from an (out-of-scope) front-end into the
/// core: which player's strategy is being searched for, which winning
/// conditions are active, the mean-payoff threshold, and the
/// reward direction.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    pub player_sat: Player,
    pub parity: bool,
    pub energy: bool,
    pub mean_payoff: Option<i64>,
    pub reward: Reward,
}

impl SolveOptions {
    /// The parity-only options most tests use.
    pub fn parity_only(player_sat: Player, reward: Reward) -> Self {
        SolveOptions { player_sat, parity: true, energy: false, mean_payoff: None, reward }
    }

    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if self.parity {
            conditions.push(Condition::Parity);
        }
        if self.energy {
            conditions.push(Condition::Energy);
        }
        if let Some(threshold) = self.mean_payoff {
            conditions.push(Condition::MeanPayoff { threshold });
        }
        conditions
    }
}

/// The decision the core exists to make.
#[derive(Debug)]
pub enum SolveResult {
    /// `player_sat` wins from `game.init()`, witnessed by `strategy`.
    Sat(Strategy),
    /// The opponent of `player_sat` wins from `game.init()`.
    Unsat,
}

/// Decides whether `options.player_sat` has a winning strategy from
/// `game.init()`, by encoding the game as a boolean CP problem and
/// searching it with the NOC propagator attached.
pub fn solve(game: &Game, options: &SolveOptions) -> SolveResult {
    info!("solving for {:?} from v{}", options.player_sat, *game.init());

    let mut encoded = encode(game, options.player_sat);
    let propagator = NocPropagator::new(game, options.player_sat, options.conditions(), &encoded.vars);
    encoded.engine.register_propagator(propagator);

    match encoded.engine.solve() {
        SolveOutcome::Sat => {
            info!("{:?} wins", options.player_sat);
            SolveResult::Sat(Strategy::extract(game, &encoded.engine, &encoded.vars))
        }
        SolveOutcome::Unsat => {
            info!("{:?} loses", options.player_sat);
            SolveResult::Unsat
        }
    }
}
