//! Exhaustive enumeration of every joint assignment.
//!
//! Scores the full Cartesian product of candidate paths and returns the
//! first minimum in lexicographic order of candidate indices (the last
//! vehicle varies fastest). Only practical on small instances, where it
//! serves as the ground truth the heuristic strategies are measured
//! against.

use crate::error::{Result, RoutingError};
use crate::fleet::Assignment;
use crate::network::NodeLabel;
use crate::problem::RoutingProblem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration for exhaustive search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveConfig {
    /// Refuse instances whose search space exceeds this many assignments.
    pub max_combinations: u128,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self {
            max_combinations: 1_000_000,
        }
    }
}

impl ExhaustiveConfig {
    pub fn with_max_combinations(mut self, n: u128) -> Self {
        self.max_combinations = n;
        self
    }
}

/// Result of exhaustive search.
#[derive(Debug, Clone)]
pub struct ExhaustiveResult<N> {
    /// Cheapest assignment found.
    pub assignment: Assignment<N>,
    /// Cost of `assignment`.
    pub cost: u64,
    /// Candidate index chosen for each vehicle.
    pub choices: Vec<usize>,
    /// Assignments scored.
    pub evaluated: u128,
    /// Whether cancelled before the product was exhausted.
    pub cancelled: bool,
}

/// Exhaustive search runner.
pub struct ExhaustiveRunner;

impl ExhaustiveRunner {
    /// Enumerates every assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_congestion::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
    /// use u_congestion::fleet::Vehicle;
    /// use u_congestion::network::RoadNetwork;
    /// use u_congestion::problem::RoutingProblem;
    ///
    /// let mut net = RoadNetwork::new();
    /// net.add_edge("S", "U", 1.0, 1);
    /// net.add_edge("S", "L", 1.0, 1);
    /// let vehicles = (0..2)
    ///     .map(|_| Vehicle::new("S", "T", vec![vec!["S", "U"], vec!["S", "L"]]))
    ///     .collect();
    /// let problem = RoutingProblem::new(net, vehicles).unwrap();
    ///
    /// let result = ExhaustiveRunner::run(&problem, &ExhaustiveConfig::default()).unwrap();
    /// assert_eq!(result.cost, 0);
    /// assert_eq!(result.choices, vec![0, 1]);
    /// ```
    pub fn run<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &ExhaustiveConfig,
    ) -> Result<ExhaustiveResult<N>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Enumerates every assignment, checking `cancel` between evaluations.
    pub fn run_with_cancel<N: NodeLabel>(
        problem: &RoutingProblem<N>,
        config: &ExhaustiveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<ExhaustiveResult<N>> {
        let combinations = problem.search_space_size();
        if combinations > config.max_combinations {
            return Err(RoutingError::SearchSpaceTooLarge {
                combinations,
                limit: config.max_combinations,
            });
        }

        let radix: Vec<usize> = problem
            .vehicles()
            .iter()
            .map(|v| v.candidates().len())
            .collect();
        let mut choice = vec![0usize; radix.len()];
        let mut best_choice = choice.clone();
        let mut best_cost = u64::MAX;
        let mut evaluated = 0u128;
        let mut cancelled = false;

        loop {
            let assignment = problem
                .assignment_from_choices(&choice)
                .ok_or_else(|| RoutingError::InvalidConfig("candidate index out of range".into()))?;
            let cost = problem.cost(&assignment);
            evaluated += 1;

            if cost < best_cost {
                best_cost = cost;
                best_choice.clone_from(&choice);
                if cost == 0 {
                    break;
                }
            }

            if !advance(&mut choice, &radix) {
                break;
            }
            if cancel
                .as_deref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
            {
                cancelled = true;
                break;
            }
        }

        log::debug!(
            "exhaustive: {} of {} assignments scored, best cost {}",
            evaluated,
            combinations,
            best_cost
        );

        let assignment = problem
            .assignment_from_choices(&best_choice)
            .ok_or_else(|| RoutingError::InvalidConfig("candidate index out of range".into()))?;

        Ok(ExhaustiveResult {
            assignment,
            cost: best_cost,
            choices: best_choice,
            evaluated,
            cancelled,
        })
    }
}

/// Mixed-radix increment, last digit fastest. Returns false on wrap-around.
fn advance(choice: &mut [usize], radix: &[usize]) -> bool {
    for i in (0..choice.len()).rev() {
        choice[i] += 1;
        if choice[i] < radix[i] {
            return true;
        }
        choice[i] = 0;
    }
    false
}
