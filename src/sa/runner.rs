//! SA execution loop.

use super::config::SaConfig;
use crate::acceptance::metropolis;
use crate::error::{Result, RoutingError};
use crate::fleet::{Assignment, VehicleId};
use crate::network::NodeLabel;
use crate::problem::RoutingProblem;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Why the annealing loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaTermination {
    /// Every vehicle's current path ends at its goal.
    ReachedDestination,
    /// Temperature fell to `min_temperature`.
    Frozen,
    /// `max_iterations` attempts were made.
    IterationLimit,
    /// No vehicle has two distinct candidates, so no move can change state.
    NoAlternatives,
    /// The cancellation token was set.
    Cancelled,
}

/// Result of a simulated annealing run.
///
/// `assignment` and `cost` describe the state the chain ended in, which
/// may be worse than an intermediate state it passed through. The best
/// state visited is reported separately in `best` / `best_cost`.
#[derive(Debug, Clone)]
pub struct SaResult<N> {
    /// Final assignment of the chain.
    pub assignment: Assignment<N>,

    /// Cost of the final assignment.
    pub cost: u64,

    /// Lowest-cost assignment visited.
    pub best: Assignment<N>,

    /// Cost of `best`.
    pub best_cost: u64,

    /// Number of evaluated moves (each one cooled the temperature).
    pub iterations: usize,

    /// Draws that picked the vehicle's current path and were skipped.
    pub skipped_moves: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Why the loop stopped.
    pub termination: SaTermination,

    /// Current cost sampled every 100 evaluated moves, plus the final cost.
    pub cost_history: Vec<u64>,
}

impl<N> SaResult<N> {
    /// Whether the run was stopped by its cancellation token.
    pub fn cancelled(&self) -> bool {
        self.termination == SaTermination::Cancelled
    }
}

const HISTORY_INTERVAL: usize = 100;

/// Executes simulated annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed`.
    pub fn run<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &SaConfig,
    ) -> Result<SaResult<N>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<N>> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing every random choice from `rng`.
    ///
    /// 1. Pick a random candidate for every vehicle.
    /// 2. While `T > min_temperature`: stop if every vehicle reaches its
    ///    goal; otherwise draw a random vehicle and a random candidate for
    ///    it. A draw equal to the current path is skipped without cooling.
    /// 3. Apply the draw, re-score, and keep it under the Metropolis rule,
    ///    reverting otherwise. Cool `T *= cooling_rate`.
    pub fn run_with_rng<N: NodeLabel, R: Rng>(
        problem: &RoutingProblem<N>,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult<N>> {
        config.validate().map_err(RoutingError::InvalidConfig)?;

        let vehicles = problem.vehicles();
        let has_alternatives = vehicles
            .iter()
            .any(|v| v.candidates().iter().any(|c| *c != v.candidates()[0]));

        let mut current = problem.random_assignment(rng);
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut attempts = 0usize;
        let mut iterations = 0usize;
        let mut skipped_moves = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = vec![current_cost];

        log::debug!(
            "sa: {} vehicles, initial cost {}, T0 = {}",
            vehicles.len(),
            current_cost,
            temperature
        );

        let termination = loop {
            if temperature <= config.min_temperature {
                break SaTermination::Frozen;
            }
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break SaTermination::Cancelled;
            }
            if problem.all_reached_destination(&current) {
                break SaTermination::ReachedDestination;
            }
            if !has_alternatives {
                break SaTermination::NoAlternatives;
            }
            if config.max_iterations > 0 && attempts >= config.max_iterations {
                break SaTermination::IterationLimit;
            }
            attempts += 1;

            let vehicle = VehicleId(rng.random_range(0..vehicles.len()));
            let candidates = problem.vehicle(vehicle).candidates();
            let path = candidates[rng.random_range(0..candidates.len())].clone();

            if &path[..] == current.route(vehicle) {
                skipped_moves += 1;
                continue;
            }

            let previous = current.set_route(vehicle, path);
            let new_cost = problem.cost(&current);

            if metropolis(current_cost, new_cost, temperature, rng) {
                if new_cost < current_cost {
                    improving_moves += 1;
                }
                current_cost = new_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            } else {
                current.set_route(vehicle, previous);
            }

            temperature *= config.cooling_rate;
            iterations += 1;

            if iterations % HISTORY_INTERVAL == 0 {
                cost_history.push(current_cost);
            }
        };

        if cost_history.last() != Some(&current_cost) {
            cost_history.push(current_cost);
        }

        log::debug!(
            "sa: stopped ({:?}) after {} moves, cost {}, best {}, T = {:.4}",
            termination,
            iterations,
            current_cost,
            best_cost,
            temperature
        );

        Ok(SaResult {
            assignment: current,
            cost: current_cost,
            best,
            best_cost,
            iterations,
            skipped_moves,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            termination,
            cost_history,
        })
    }
}
