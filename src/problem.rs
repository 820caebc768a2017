//! A validated routing instance: the road network plus its vehicles.
//!
//! Every search strategy consumes a [`RoutingProblem`]. Construction is the
//! only place input is checked, so the runners can assume every vehicle has
//! at least one well-formed candidate path.

use rand::Rng;

use crate::congestion::congestion_cost;
use crate::error::{Result, RoutingError};
use crate::fleet::{Assignment, GoalPolicy, Vehicle, VehicleId};
use crate::network::{NodeLabel, RoadNetwork};

/// A single-vehicle substitution: route `vehicle` along candidate `candidate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub vehicle: VehicleId,
    pub candidate: usize,
}

/// Road network and vehicles, checked for consistency.
///
/// # Examples
///
/// ```
/// use u_congestion::fleet::Vehicle;
/// use u_congestion::network::RoadNetwork;
/// use u_congestion::problem::RoutingProblem;
///
/// let mut net = RoadNetwork::new();
/// net.add_edge("A", "B", 1.0, 1);
///
/// let ok = RoutingProblem::new(net.clone(), vec![Vehicle::new("A", "B", vec![vec!["A", "B"]])]);
/// assert!(ok.is_ok());
///
/// let no_road = RoutingProblem::new(net, vec![Vehicle::new("A", "C", vec![vec!["A", "C"]])]);
/// assert!(no_road.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem<N: NodeLabel> {
    network: RoadNetwork<N>,
    vehicles: Vec<Vehicle<N>>,
    goal_policy: GoalPolicy,
}

impl<N: NodeLabel> RoutingProblem<N> {
    /// Builds a problem with [`GoalPolicy::Permissive`].
    pub fn new(network: RoadNetwork<N>, vehicles: Vec<Vehicle<N>>) -> Result<Self> {
        Self::with_goal_policy(network, vehicles, GoalPolicy::Permissive)
    }

    /// Builds a problem, validating every candidate path.
    ///
    /// Each vehicle needs at least one candidate; each candidate must be
    /// non-empty, begin at the vehicle's start, and move only along roads
    /// of `network`. Under [`GoalPolicy::Strict`] it must also end at the
    /// vehicle's goal.
    pub fn with_goal_policy(
        network: RoadNetwork<N>,
        vehicles: Vec<Vehicle<N>>,
        goal_policy: GoalPolicy,
    ) -> Result<Self> {
        for (vi, vehicle) in vehicles.iter().enumerate() {
            validate_vehicle(&network, vi, vehicle, goal_policy)?;
        }

        Ok(Self {
            network,
            vehicles,
            goal_policy,
        })
    }

    pub fn network(&self) -> &RoadNetwork<N> {
        &self.network
    }

    pub fn vehicles(&self) -> &[Vehicle<N>] {
        &self.vehicles
    }

    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn vehicle(&self, id: VehicleId) -> &Vehicle<N> {
        &self.vehicles[id.index()]
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn goal_policy(&self) -> GoalPolicy {
        self.goal_policy
    }

    /// Uniformly random candidate for every vehicle.
    pub fn random_assignment<R: Rng>(&self, rng: &mut R) -> Assignment<N> {
        Assignment::random(&self.vehicles, rng)
    }

    /// Assignment choosing candidate `choice[i]` for vehicle `i`.
    ///
    /// Returns `None` if `choice` has the wrong length or an index is out
    /// of range for its vehicle.
    pub fn assignment_from_choices(&self, choice: &[usize]) -> Option<Assignment<N>> {
        if choice.len() != self.vehicles.len() {
            return None;
        }
        let in_range = self
            .vehicles
            .iter()
            .zip(choice)
            .all(|(v, &c)| c < v.candidates().len());
        in_range.then(|| Assignment::from_choices(&self.vehicles, choice))
    }

    /// Congestion cost of `assignment` on this network.
    pub fn cost(&self, assignment: &Assignment<N>) -> u64 {
        congestion_cost(&self.network, assignment)
    }

    /// Whether every vehicle's assigned path ends at its goal.
    pub fn all_reached_destination(&self, assignment: &Assignment<N>) -> bool {
        assignment.all_reached_destination(&self.vehicles)
    }

    /// Every single-vehicle substitution, vehicles in order, candidates in
    /// order within each vehicle.
    ///
    /// With `include_current` false, candidates equal by value to the
    /// vehicle's current path are skipped, so every returned move changes
    /// the assignment.
    pub fn moves(&self, assignment: &Assignment<N>, include_current: bool) -> Vec<Move> {
        let mut moves = Vec::new();
        for (vi, vehicle) in self.vehicles.iter().enumerate() {
            let id = VehicleId(vi);
            let current = assignment.route(id);
            for (ci, candidate) in vehicle.candidates().iter().enumerate() {
                if include_current || &candidate[..] != current {
                    moves.push(Move {
                        vehicle: id,
                        candidate: ci,
                    });
                }
            }
        }
        moves
    }

    /// Copy of `assignment` with `mv` applied.
    pub fn apply(&self, assignment: &Assignment<N>, mv: Move) -> Assignment<N> {
        let path = self.vehicle(mv.vehicle).candidates()[mv.candidate].clone();
        assignment.with_route(mv.vehicle, path)
    }

    /// Cost of applying each move to `assignment`, in move order.
    ///
    /// Each evaluation works on its own copy, so with the `parallel`
    /// feature enabled and `parallel` set the map runs on the rayon pool.
    pub fn evaluate_moves(
        &self,
        assignment: &Assignment<N>,
        moves: &[Move],
        parallel: bool,
    ) -> Vec<u64> {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                use rayon::prelude::*;
                return moves
                    .par_iter()
                    .map(|&mv| self.cost(&self.apply(assignment, mv)))
                    .collect();
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        moves
            .iter()
            .map(|&mv| self.cost(&self.apply(assignment, mv)))
            .collect()
    }

    /// Size of the full Cartesian product of candidates, saturating.
    pub fn search_space_size(&self) -> u128 {
        self.vehicles
            .iter()
            .fold(1u128, |acc, v| acc.saturating_mul(v.candidates().len() as u128))
    }
}

fn validate_vehicle<N: NodeLabel>(
    network: &RoadNetwork<N>,
    vi: usize,
    vehicle: &Vehicle<N>,
    goal_policy: GoalPolicy,
) -> Result<()> {
    if vehicle.candidates().is_empty() {
        return Err(RoutingError::EmptyCandidates { vehicle: vi });
    }

    for (ci, path) in vehicle.candidates().iter().enumerate() {
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return Err(RoutingError::EmptyPath {
                vehicle: vi,
                candidate: ci,
            });
        };

        if first != vehicle.start() {
            return Err(RoutingError::StartMismatch {
                vehicle: vi,
                candidate: ci,
                expected: format!("{:?}", vehicle.start()),
                found: format!("{first:?}"),
            });
        }

        if goal_policy == GoalPolicy::Strict && last != vehicle.goal() {
            return Err(RoutingError::GoalMismatch {
                vehicle: vi,
                candidate: ci,
                expected: format!("{:?}", vehicle.goal()),
                found: format!("{last:?}"),
            });
        }

        if let Some(hop) = path
            .windows(2)
            .find(|hop| network.road(&hop[0], &hop[1]).is_none())
        {
            return Err(RoutingError::UnknownRoad {
                vehicle: vi,
                candidate: ci,
                from: format!("{:?}", hop[0]),
                to: format!("{:?}", hop[1]),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> RoadNetwork<&'static str> {
        let mut net = RoadNetwork::new();
        net.add_edge("A", "B", 1.0, 2);
        net.add_edge("A", "C", 4.0, 3);
        net.add_edge("B", "C", 2.0, 2);
        net.add_edge("B", "D", 5.0, 1);
        net.add_edge("C", "D", 1.0, 2);
        net.add_edge("D", "E", 3.0, 1);
        net
    }

    #[test]
    fn test_rejects_empty_candidates() {
        let v: Vehicle<&str> = Vehicle::new("A", "E", Vec::<Vec<&str>>::new());
        let err = RoutingProblem::new(city(), vec![v]).unwrap_err();
        assert_eq!(err, RoutingError::EmptyCandidates { vehicle: 0 });
    }

    #[test]
    fn test_rejects_empty_path() {
        let v = Vehicle::new("A", "E", vec![vec!["A", "B"], vec![]]);
        let err = RoutingProblem::new(city(), vec![v]).unwrap_err();
        assert_eq!(
            err,
            RoutingError::EmptyPath {
                vehicle: 0,
                candidate: 1
            }
        );
    }

    #[test]
    fn test_rejects_wrong_start() {
        let v = Vehicle::new("A", "E", vec![vec!["B", "D", "E"]]);
        let err = RoutingProblem::new(city(), vec![v]).unwrap_err();
        assert!(matches!(err, RoutingError::StartMismatch { vehicle: 0, .. }));
    }

    #[test]
    fn test_rejects_missing_road() {
        let v = Vehicle::new("A", "E", vec![vec!["A", "D", "E"]]);
        let err = RoutingProblem::new(city(), vec![v]).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownRoad { candidate: 0, .. }));
    }

    #[test]
    fn test_goal_policy() {
        let v = Vehicle::new("A", "E", vec![vec!["A", "B", "D"]]);
        assert!(RoutingProblem::new(city(), vec![v.clone()]).is_ok());

        let err =
            RoutingProblem::with_goal_policy(city(), vec![v], GoalPolicy::Strict).unwrap_err();
        assert!(matches!(err, RoutingError::GoalMismatch { .. }));
    }

    #[test]
    fn test_moves_skip_current_by_value() {
        let v = Vehicle::new("A", "B", vec![vec!["A", "B"], vec!["A", "B"], vec!["A", "C", "B"]]);
        let problem = RoutingProblem::new(city(), vec![v]).unwrap();
        let a = problem.assignment_from_choices(&[0]).unwrap();

        assert_eq!(problem.moves(&a, true).len(), 3);
        let changing = problem.moves(&a, false);
        assert_eq!(
            changing,
            vec![Move {
                vehicle: VehicleId(0),
                candidate: 2
            }]
        );
    }

    #[test]
    fn test_apply_substitutes_one_vehicle() {
        let vehicles = vec![
            Vehicle::new("A", "E", vec![vec!["A", "B", "D", "E"], vec!["A", "C", "D", "E"]]),
            Vehicle::new("C", "E", vec![vec!["C", "D", "E"]]),
        ];
        let problem = RoutingProblem::new(city(), vehicles).unwrap();
        let a = problem.assignment_from_choices(&[0, 0]).unwrap();
        let b = problem.apply(
            &a,
            Move {
                vehicle: VehicleId(0),
                candidate: 1,
            },
        );
        assert_eq!(b.route(VehicleId(0)), &["A", "C", "D", "E"]);
        assert_eq!(b.route(VehicleId(1)), a.route(VehicleId(1)));
    }

    #[test]
    fn test_assignment_from_choices_bounds() {
        let v = Vehicle::new("A", "B", vec![vec!["A", "B"]]);
        let problem = RoutingProblem::new(city(), vec![v]).unwrap();
        assert!(problem.assignment_from_choices(&[0]).is_some());
        assert!(problem.assignment_from_choices(&[1]).is_none());
        assert!(problem.assignment_from_choices(&[0, 0]).is_none());
    }

    #[test]
    fn test_search_space_size() {
        let vehicles = vec![
            Vehicle::new("A", "B", vec![vec!["A", "B"], vec!["A", "C", "B"]]),
            Vehicle::new("C", "D", vec![vec!["C", "D"], vec!["C", "B", "D"], vec!["C", "A", "B", "D"]]),
        ];
        let problem = RoutingProblem::new(city(), vehicles).unwrap();
        assert_eq!(problem.search_space_size(), 6);
    }

    #[test]
    fn test_no_vehicles() {
        let problem = RoutingProblem::<&str>::new(city(), Vec::new()).unwrap();
        let mut rng = u_numflow::random::create_rng(1);
        let a = problem.random_assignment(&mut rng);
        assert!(a.is_empty());
        assert_eq!(problem.cost(&a), 0);
        assert!(problem.all_reached_destination(&a));
        assert!(problem.moves(&a, true).is_empty());
    }
}
