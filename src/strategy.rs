//! Strategy selection and the single `optimize` entry point.

use rand::Rng;

use crate::descent::{DescentConfig, DescentRunner};
use crate::error::Result;
use crate::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
use crate::fleet::Assignment;
use crate::hill_climbing::{HillClimbingConfig, HillClimbingRunner};
use crate::network::NodeLabel;
use crate::problem::RoutingProblem;
use crate::sa::{SaConfig, SaRunner};

/// A search strategy together with its parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    SimulatedAnnealing(SaConfig),
    HillClimbing(HillClimbingConfig),
    Descent(DescentConfig),
    Exhaustive(ExhaustiveConfig),
}

impl Strategy {
    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SimulatedAnnealing(_) => "simulated_annealing",
            Strategy::HillClimbing(_) => "hill_climbing",
            Strategy::Descent(_) => "local_search",
            Strategy::Exhaustive(_) => "exhaustive",
        }
    }
}

/// Assignment returned by a strategy, with its congestion cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<N> {
    pub assignment: Assignment<N>,
    pub cost: u64,
}

/// Runs `strategy` on `problem`, drawing randomness from `rng`.
///
/// Simulated annealing reports the state its chain ended in; the other
/// strategies report the best state they found. Strategy-specific
/// statistics are available from the individual runners.
///
/// # Examples
///
/// ```
/// use u_congestion::descent::DescentConfig;
/// use u_congestion::fleet::Vehicle;
/// use u_congestion::network::RoadNetwork;
/// use u_congestion::problem::RoutingProblem;
/// use u_congestion::strategy::{optimize, Strategy};
///
/// let mut net = RoadNetwork::new();
/// net.add_edge("S", "U", 1.0, 1);
/// net.add_edge("S", "L", 1.0, 1);
/// let vehicles = (0..2)
///     .map(|_| Vehicle::new("S", "T", vec![vec!["S", "U"], vec!["S", "L"]]))
///     .collect();
/// let problem = RoutingProblem::new(net, vehicles).unwrap();
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let solution = optimize(&problem, &Strategy::Descent(DescentConfig::default()), &mut rng).unwrap();
/// assert_eq!(solution.cost, 0);
/// ```
pub fn optimize<N: NodeLabel, R: Rng>(
    problem: &RoutingProblem<N>,
    strategy: &Strategy,
    rng: &mut R,
) -> Result<Solution<N>> {
    log::info!(
        "optimizing {} vehicles with {}",
        problem.vehicle_count(),
        strategy.name()
    );

    let solution = match strategy {
        Strategy::SimulatedAnnealing(config) => {
            let result = SaRunner::run_with_rng(problem, config, rng, None)?;
            Solution {
                assignment: result.assignment,
                cost: result.cost,
            }
        }
        Strategy::HillClimbing(config) => {
            let result = HillClimbingRunner::run_with_rng(problem, config, rng, None)?;
            Solution {
                assignment: result.assignment,
                cost: result.cost,
            }
        }
        Strategy::Descent(config) => {
            let result = DescentRunner::run_with_rng(problem, config, rng, None);
            Solution {
                assignment: result.assignment,
                cost: result.cost,
            }
        }
        Strategy::Exhaustive(config) => {
            let result = ExhaustiveRunner::run(problem, config)?;
            Solution {
                assignment: result.assignment,
                cost: result.cost,
            }
        }
    };

    log::info!("{} finished at cost {}", strategy.name(), solution.cost);
    Ok(solution)
}
