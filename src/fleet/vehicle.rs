//! Vehicles and their candidate paths.

use std::sync::Arc;

use crate::network::NodeLabel;

/// A route as an immutable, cheaply clonable node sequence.
///
/// Assignments copy paths by value; sharing the allocation keeps those
/// copies to a reference-count bump.
pub type Path<N> = Arc<[N]>;

/// Stable identity of a vehicle: its position in the problem's vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub usize);

impl VehicleId {
    /// Index into per-vehicle tables.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether candidate paths must finish at the vehicle's goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalPolicy {
    /// Candidates may stop short of the goal. Such a vehicle simply never
    /// satisfies the reached-destination check while routed that way.
    #[default]
    Permissive,
    /// Every candidate's last node must equal the goal.
    Strict,
}

/// A vehicle travelling from `start` to `goal` along one of a fixed set
/// of precomputed candidate paths.
///
/// # Examples
///
/// ```
/// use u_congestion::fleet::Vehicle;
///
/// let v = Vehicle::new("A", "E", vec![vec!["A", "B", "D", "E"], vec!["A", "C", "D"]]);
/// assert_eq!(v.candidates().len(), 2);
/// assert!(v.reaches_goal(&v.candidates()[0]));
/// assert!(!v.reaches_goal(&v.candidates()[1]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle<N> {
    start: N,
    goal: N,
    candidates: Vec<Path<N>>,
}

impl<N: NodeLabel> Vehicle<N> {
    /// Creates a vehicle. Candidates are validated when the vehicle joins
    /// a [`RoutingProblem`](crate::problem::RoutingProblem).
    pub fn new<I, P>(start: N, goal: N, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Path<N>>,
    {
        Self {
            start,
            goal,
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn start(&self) -> &N {
        &self.start
    }

    pub fn goal(&self) -> &N {
        &self.goal
    }

    /// Candidate paths in the order supplied.
    pub fn candidates(&self) -> &[Path<N>] {
        &self.candidates
    }

    /// Whether `path` ends at this vehicle's goal.
    pub fn reaches_goal(&self, path: &[N]) -> bool {
        path.last() == Some(&self.goal)
    }
}
