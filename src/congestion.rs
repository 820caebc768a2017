//! Congestion cost model.
//!
//! Cost is recomputed from scratch for every assignment: tally how many
//! vehicles cross each road, then charge `(usage - capacity)^2` for every
//! road carrying more than its capacity. Roads at or under capacity cost
//! nothing. Evaluation is a pure function of the network and the
//! assignment, so it can run concurrently on independent assignments.

use petgraph::graph::EdgeIndex;

use crate::fleet::Assignment;
use crate::network::{NodeLabel, RoadNetwork};

/// Penalty charged to one road: squared overload, zero within capacity.
///
/// ```
/// use u_congestion::congestion::overload_penalty;
///
/// assert_eq!(overload_penalty(0, 3), 0);
/// assert_eq!(overload_penalty(3, 3), 0);
/// assert_eq!(overload_penalty(5, 2), 9);
/// ```
pub fn overload_penalty(usage: u32, capacity: u32) -> u64 {
    let over = u64::from(usage.saturating_sub(capacity));
    over * over
}

/// Per-road vehicle counts for one assignment.
///
/// Every road in the network starts at zero. A path crossing the same
/// road twice counts twice. Consecutive nodes with no road between them
/// are not counted; [`RoutingProblem`](crate::problem::RoutingProblem)
/// rejects such paths before search begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadUsage {
    counts: Vec<u32>,
}

impl RoadUsage {
    /// Counts road usage for every vehicle's assigned path.
    pub fn tally<N: NodeLabel>(network: &RoadNetwork<N>, assignment: &Assignment<N>) -> Self {
        let mut counts = vec![0u32; network.road_count()];
        for (_, route) in assignment.routes() {
            for hop in route.windows(2) {
                if let Some(e) = network.road_index(&hop[0], &hop[1]) {
                    counts[e.index()] += 1;
                }
            }
        }
        Self { counts }
    }

    /// Vehicles crossing the road between `u` and `v` (0 if no such road).
    pub fn usage<N: NodeLabel>(&self, network: &RoadNetwork<N>, u: &N, v: &N) -> u32 {
        network
            .road_index(u, v)
            .and_then(|e| self.counts.get(e.index()).copied())
            .unwrap_or(0)
    }

    /// Sum of per-road overload penalties.
    pub fn penalty<N: NodeLabel>(&self, network: &RoadNetwork<N>) -> u64 {
        self.indexed(network)
            .map(|(usage, capacity, _)| overload_penalty(usage, capacity))
            .sum()
    }

    /// Roads carrying more vehicles than their capacity, in road order.
    pub fn overloads<'a, N: NodeLabel>(
        &self,
        network: &'a RoadNetwork<N>,
    ) -> Vec<Overload<&'a N>> {
        self.indexed(network)
            .filter(|&(usage, capacity, _)| usage > capacity)
            .filter_map(|(usage, capacity, e)| {
                let (from, to) = network.endpoints(e)?;
                Some(Overload {
                    from,
                    to,
                    usage,
                    capacity,
                    penalty: overload_penalty(usage, capacity),
                })
            })
            .collect()
    }

    fn indexed<'n, N: NodeLabel>(
        &'n self,
        network: &'n RoadNetwork<N>,
    ) -> impl Iterator<Item = (u32, u32, EdgeIndex)> + 'n {
        self.counts.iter().enumerate().map(move |(i, &usage)| {
            let e = EdgeIndex::new(i);
            (usage, network.road_at(e).capacity, e)
        })
    }
}

/// One over-capacity road in a [`RoadUsage`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload<N> {
    pub from: N,
    pub to: N,
    pub usage: u32,
    pub capacity: u32,
    pub penalty: u64,
}

/// Aggregate congestion cost of an assignment.
///
/// Never fails and is never negative; the penalty is unbounded but total.
pub fn congestion_cost<N: NodeLabel>(network: &RoadNetwork<N>, assignment: &Assignment<N>) -> u64 {
    RoadUsage::tally(network, assignment).penalty(network)
}
