//! Steepest descent execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random assignment (or one supplied by the caller)
//! 2. Score every single-vehicle substitution, including the no-op one
//! 3. Take the cheapest; on ties, the first in vehicle-then-candidate order
//! 4. Move there if it strictly improves, otherwise stop at a local optimum
//!
//! Costs are non-negative integers and strictly decrease each step, so the
//! loop always terminates.

use super::config::DescentConfig;
use crate::fleet::Assignment;
use crate::network::NodeLabel;
use crate::problem::RoutingProblem;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use u_numflow::random::create_rng;

/// Why descent stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentTermination {
    /// No neighbor is strictly cheaper.
    LocalOptimum,
    /// `max_steps` improving moves were taken.
    StepLimit,
    /// The cancellation token was set.
    Cancelled,
}

/// Result of a descent run.
#[derive(Debug, Clone)]
pub struct DescentResult<N> {
    /// Final assignment.
    pub assignment: Assignment<N>,
    /// Cost of `assignment`.
    pub cost: u64,
    /// Improving moves taken.
    pub steps: usize,
    /// Neighbor cost evaluations performed.
    pub evaluations: usize,
    /// Why the run stopped.
    pub termination: DescentTermination,
}

/// Steepest descent runner.
pub struct DescentRunner;

impl DescentRunner {
    /// Descends from a random assignment drawn with `config.seed`.
    pub fn run<N: NodeLabel>(problem: &RoutingProblem<N>, config: &DescentConfig) -> DescentResult<N> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Descends from a seeded random assignment with an optional cancellation token.
    pub fn run_with_cancel<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &DescentConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> DescentResult<N> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Descends from a random assignment drawn from `rng`.
    pub fn run_with_rng<N: NodeLabel, R: Rng>(
        problem: &RoutingProblem<N>,
        config: &DescentConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> DescentResult<N> {
        let start = problem.random_assignment(rng);
        Self::improve(problem, config, start, cancel)
    }

    /// Descends from `start`. Fully deterministic.
    pub fn improve<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &DescentConfig,
        start: Assignment<N>,
        cancel: Option<&AtomicBool>,
    ) -> DescentResult<N> {
        let mut current = start;
        let mut current_cost = problem.cost(&current);
        let mut steps = 0usize;
        let mut evaluations = 0usize;

        let termination = loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break DescentTermination::Cancelled;
            }
            if config.max_steps > 0 && steps >= config.max_steps {
                break DescentTermination::StepLimit;
            }

            let moves = problem.moves(&current, true);
            let costs = problem.evaluate_moves(&current, &moves, config.parallel);
            evaluations += costs.len();

            let Some(best) = (0..costs.len()).min_by_key(|&i| costs[i]) else {
                break DescentTermination::LocalOptimum;
            };
            if costs[best] >= current_cost {
                break DescentTermination::LocalOptimum;
            }

            current = problem.apply(&current, moves[best]);
            current_cost = costs[best];
            steps += 1;
            log::trace!("descent: step {} -> cost {}", steps, current_cost);
        };

        log::debug!(
            "descent: {:?} after {} steps, cost {}",
            termination,
            steps,
            current_cost
        );

        DescentResult {
            assignment: current,
            cost: current_cost,
            steps,
            evaluations,
            termination,
        }
    }
}
