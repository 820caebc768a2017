//! Restart hill climbing execution engine.
//!
//! # Algorithm
//!
//! For each of `max_restarts` independent trials:
//!
//! 1. Start from a random assignment; reset the temperature.
//! 2. Up to `max_iterations` times:
//!    a. Enumerate every single-vehicle substitution that changes the
//!    assignment; stop the trial if there are none
//!    b. Pick one uniformly at random (not the best one)
//!    c. Accept it if strictly cheaper than the trial's current cost, or
//!    with probability `exp((current - neighbor) / T)` otherwise
//!    d. Cool `T *= cooling_rate`
//!    e. Stop the trial once every vehicle's path reaches its goal
//! 3. Keep the trial's final assignment if it beats every earlier trial.

use super::config::HillClimbingConfig;
use crate::acceptance::metropolis;
use crate::error::{Result, RoutingError};
use crate::fleet::Assignment;
use crate::network::NodeLabel;
use crate::problem::RoutingProblem;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Result of a restart hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbingResult<N> {
    /// Best assignment over all trials.
    pub assignment: Assignment<N>,
    /// Cost of `assignment`.
    pub cost: u64,
    /// Final cost of each completed trial, in order.
    pub trial_costs: Vec<u64>,
    /// Index of the trial that produced `assignment`.
    pub best_trial: usize,
    /// Steps executed across all trials.
    pub iterations: usize,
    /// Accepted moves across all trials.
    pub accepted_moves: usize,
    /// Accepted moves that strictly lowered the trial's cost.
    pub improving_moves: usize,
    /// Accepted moves that raised the trial's cost.
    pub uphill_moves: usize,
    /// Temperature at the end of each completed trial, in order.
    pub final_temperatures: Vec<f64>,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Restart hill climbing runner.
pub struct HillClimbingRunner;

impl HillClimbingRunner {
    /// Runs with an RNG seeded from `config.seed`.
    pub fn run<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &HillClimbingConfig,
    ) -> Result<HillClimbingResult<N>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs with an optional cancellation token.
    pub fn run_with_cancel<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &HillClimbingConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HillClimbingResult<N>> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs drawing every random choice from `rng`.
    ///
    /// Cancellation is not checked before the first trial draws its start,
    /// so a result exists even when the token is already set.
    pub fn run_with_rng<N: NodeLabel, R: Rng>(
        problem: &RoutingProblem<N>,
        config: &HillClimbingConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<HillClimbingResult<N>> {
        config.validate().map_err(RoutingError::InvalidConfig)?;

        let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

        let mut best: Option<(Assignment<N>, u64, usize)> = None;
        let mut trial_costs = Vec::with_capacity(config.max_restarts);
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut uphill_moves = 0usize;
        let mut final_temperatures = Vec::with_capacity(config.max_restarts);
        let mut cancelled = false;

        for trial in 0..config.max_restarts {
            if trial > 0 && is_cancelled() {
                cancelled = true;
                break;
            }
            log::debug!("hill climbing: trial {}/{}", trial + 1, config.max_restarts);

            let mut current = problem.random_assignment(rng);
            let mut current_cost = problem.cost(&current);
            let mut temperature = config.temperature;

            for _ in 0..config.max_iterations {
                if is_cancelled() {
                    cancelled = true;
                    break;
                }
                iterations += 1;

                let moves = problem.moves(&current, false);
                if moves.is_empty() {
                    break;
                }

                let mv = moves[rng.random_range(0..moves.len())];
                let neighbor = problem.apply(&current, mv);
                let neighbor_cost = problem.cost(&neighbor);

                if metropolis(current_cost, neighbor_cost, temperature, rng) {
                    if neighbor_cost < current_cost {
                        improving_moves += 1;
                    } else if neighbor_cost > current_cost {
                        uphill_moves += 1;
                    }
                    current = neighbor;
                    current_cost = neighbor_cost;
                    accepted_moves += 1;
                }

                temperature *= config.cooling_rate;

                if problem.all_reached_destination(&current) {
                    break;
                }
            }

            log::debug!("hill climbing: trial {} ended at cost {}", trial + 1, current_cost);
            trial_costs.push(current_cost);
            final_temperatures.push(temperature);

            if best.as_ref().is_none_or(|(_, cost, _)| current_cost < *cost) {
                best = Some((current, current_cost, trial));
            }

            if cancelled {
                break;
            }
        }

        let (assignment, cost, best_trial) = best.ok_or_else(|| {
            RoutingError::InvalidConfig("max_restarts must be at least 1".into())
        })?;

        log::info!(
            "hill climbing: best cost {} from trial {} of {}",
            cost,
            best_trial + 1,
            trial_costs.len()
        );

        Ok(HillClimbingResult {
            assignment,
            cost,
            trial_costs,
            best_trial,
            iterations,
            accepted_moves,
            improving_moves,
            uphill_moves,
            final_temperatures,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
    use crate::fixtures;
    use crate::fleet::Vehicle;

    #[test]
    fn test_best_is_minimum_over_trials() {
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default().with_seed(42);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();

        assert_eq!(result.trial_costs.len(), config.max_restarts);
        assert_eq!(result.cost, *result.trial_costs.iter().min().unwrap());
        assert_eq!(result.cost, result.trial_costs[result.best_trial]);
        assert_eq!(result.cost, problem.cost(&result.assignment));
        // Earliest trial wins ties.
        assert!(result.trial_costs[..result.best_trial]
            .iter()
            .all(|&c| c > result.cost));
    }

    #[test]
    fn test_never_beats_exhaustive_optimum() {
        for problem in [fixtures::city_problem(), fixtures::corridors(4)] {
            let oracle = ExhaustiveRunner::run(&problem, &ExhaustiveConfig::default()).unwrap();
            for seed in 0..10 {
                let config = HillClimbingConfig::default().with_seed(seed);
                let result = HillClimbingRunner::run(&problem, &config).unwrap();
                assert!(result.cost >= oracle.cost);
            }
        }
    }

    #[test]
    fn test_corridors_reach_optimum() {
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default().with_seed(7);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();
        assert_eq!(result.cost, 2);
    }

    #[test]
    fn test_high_temperature_accepts_uphill() {
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default()
            .with_temperature(1e6)
            .with_cooling_rate(0.9999)
            .with_max_iterations(200)
            .with_max_restarts(1)
            .with_seed(42);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();

        // Near-certain acceptance turns the trial into a random walk that
        // keeps leaving the 2-2 split.
        assert!(result.uphill_moves > 0);
        assert!(result.accepted_moves > result.improving_moves);
        assert_eq!(result.iterations, 200);
    }

    #[test]
    fn test_cold_run_never_accepts_uphill() {
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default()
            .with_temperature(1e-9)
            .with_max_iterations(200)
            .with_max_restarts(3)
            .with_seed(42);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();
        assert_eq!(result.uphill_moves, 0);
        assert!(result.trial_costs.iter().all(|&c| c == 2));
    }

    #[test]
    fn test_temperature_resets_every_trial() {
        // Corridor candidates never reach T and always leave a move, so
        // every trial runs its full length and cools by the same factor.
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default()
            .with_temperature(2.0)
            .with_cooling_rate(0.9)
            .with_max_iterations(50)
            .with_max_restarts(3)
            .with_seed(5);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();

        let expected = 2.0 * 0.9f64.powi(50);
        assert_eq!(result.final_temperatures.len(), 3);
        for &t in &result.final_temperatures {
            assert!((t - expected).abs() < 1e-12, "trial ended at T = {t}");
        }
    }

    #[test]
    fn test_identical_candidates_give_no_moves() {
        // Both candidates are the same path: no substitution changes
        // anything, so every trial stops on its first step.
        let mut net = fixtures::city();
        net.add_edge("E", "F", 1.0, 1);
        let v = Vehicle::new("D", "F", vec![vec!["D", "E"], vec!["D", "E"]]);
        let problem = RoutingProblem::new(net, vec![v]).unwrap();

        let config = HillClimbingConfig::default().with_max_restarts(3).with_seed(1);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.cost, 0);
    }

    #[test]
    fn test_trial_stops_when_destination_reached() {
        let problem = fixtures::city_problem_all_complete();
        let config = HillClimbingConfig::default().with_max_restarts(4).with_seed(3);
        let result = HillClimbingRunner::run(&problem, &config).unwrap();
        // Every candidate reaches E, so each trial ends after one step.
        assert_eq!(result.iterations, 4);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let problem = fixtures::city_problem();
        let config = HillClimbingConfig::default().with_seed(123);
        let a = HillClimbingRunner::run(&problem, &config).unwrap();
        let b = HillClimbingRunner::run(&problem, &config).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.trial_costs, b.trial_costs);
    }

    #[test]
    fn test_cancellation_keeps_first_trial() {
        let problem = fixtures::corridors(4);
        let config = HillClimbingConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = HillClimbingRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.trial_costs.len(), 1);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.cost, problem.cost(&result.assignment));
    }

    #[test]
    fn test_zero_restarts_rejected() {
        let problem = fixtures::corridors(2);
        let config = HillClimbingConfig::default().with_max_restarts(0);
        assert!(matches!(
            HillClimbingRunner::run(&problem, &config),
            Err(RoutingError::InvalidConfig(_))
        ));
    }
}
