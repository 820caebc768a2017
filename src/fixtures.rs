//! Shared test instances.

use crate::fleet::Vehicle;
use crate::network::{search, RoadNetwork};
use crate::problem::RoutingProblem;

/// Six roads over A..E with mixed capacities.
pub(crate) fn city() -> RoadNetwork<&'static str> {
    let mut net = RoadNetwork::new();
    net.add_edge("A", "B", 1.0, 2);
    net.add_edge("A", "C", 4.0, 3);
    net.add_edge("B", "C", 2.0, 2);
    net.add_edge("B", "D", 5.0, 1);
    net.add_edge("C", "D", 1.0, 2);
    net.add_edge("D", "E", 3.0, 1);
    net
}

/// Three vehicles from A, B and C bound for E. Each may take the fewest-hop
/// route to E, or stop one road short at D.
pub(crate) fn city_problem() -> RoutingProblem<&'static str> {
    let net = city();
    let vehicles = ["A", "B", "C"]
        .into_iter()
        .map(|start| {
            let full = search::bfs(&net, &start, &"E").unwrap_or_default();
            let short = search::bfs(&net, &start, &"D").unwrap_or_default();
            Vehicle::new(start, "E", vec![full, short])
        })
        .collect();
    RoutingProblem::new(net, vehicles).expect("city fixture is valid")
}

/// Candidates that all end at the goal.
pub(crate) fn city_problem_all_complete() -> RoutingProblem<&'static str> {
    let vehicles = vec![
        Vehicle::new("A", "E", vec![vec!["A", "B", "D", "E"], vec!["A", "C", "D", "E"]]),
        Vehicle::new("B", "E", vec![vec!["B", "D", "E"], vec!["B", "C", "D", "E"]]),
    ];
    RoutingProblem::new(city(), vehicles).expect("fixture is valid")
}

/// Two parallel corridors between S and T through either U or L, each
/// road admitting one vehicle. Candidates stop one road short of T, so
/// the reached-destination exit never fires.
///
/// Optimum: split the vehicles across corridors, cost 0 for two vehicles.
pub(crate) fn corridors(vehicles: usize) -> RoutingProblem<&'static str> {
    let mut net = RoadNetwork::new();
    net.add_edge("S", "U", 1.0, 1);
    net.add_edge("U", "T", 1.0, 1);
    net.add_edge("S", "L", 1.0, 1);
    net.add_edge("L", "T", 1.0, 1);

    let fleet = (0..vehicles)
        .map(|_| Vehicle::new("S", "T", vec![vec!["S", "U"], vec!["S", "L"]]))
        .collect();
    RoutingProblem::new(net, fleet).expect("corridor fixture is valid")
}
