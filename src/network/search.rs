//! Path discovery over a [`RoadNetwork`].
//!
//! These searches produce the candidate paths a [`Vehicle`] is built
//! from. The optimizer never calls them itself: it only chooses among
//! the candidates it is given.
//!
//! All searches return the node sequence from `start` to `goal`
//! inclusive, or `None` when the goal is unreachable.
//!
//! [`Vehicle`]: crate::fleet::Vehicle

use super::graph::{NodeLabel, RoadNetwork};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// Breadth-first search: fewest hops, neighbors expanded in sorted order.
///
/// # Examples
///
/// ```
/// use u_congestion::network::{search, RoadNetwork};
///
/// let mut net = RoadNetwork::new();
/// net.add_edge("A", "B", 1.0, 2);
/// net.add_edge("B", "D", 5.0, 1);
/// net.add_edge("A", "C", 4.0, 3);
/// net.add_edge("C", "D", 1.0, 2);
///
/// assert_eq!(search::bfs(&net, &"A", &"D"), Some(vec!["A", "B", "D"]));
/// ```
pub fn bfs<N: NodeLabel>(network: &RoadNetwork<N>, start: &N, goal: &N) -> Option<Vec<N>> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(vec![start.clone()]);

    while let Some(path) = queue.pop_front() {
        let current = path.last()?.clone();
        if &current == goal {
            return Some(path);
        }
        if !visited.insert(current.clone()) {
            continue;
        }

        let mut next: Vec<N> = network
            .neighbors(&current)
            .into_iter()
            .map(|n| n.node)
            .collect();
        next.sort();

        for node in next {
            if !visited.contains(&node) {
                let mut extended = path.clone();
                extended.push(node);
                queue.push_back(extended);
            }
        }
    }

    None
}

/// Depth-first search. Finds *a* path, not a short one.
pub fn dfs<N: NodeLabel>(network: &RoadNetwork<N>, start: &N, goal: &N) -> Option<Vec<N>> {
    let mut visited = HashSet::new();
    let mut stack = vec![vec![start.clone()]];

    while let Some(path) = stack.pop() {
        let current = path.last()?.clone();
        if &current == goal {
            return Some(path);
        }
        if !visited.insert(current.clone()) {
            continue;
        }

        for neighbor in network.neighbors(&current) {
            if !visited.contains(&neighbor.node) {
                let mut extended = path.clone();
                extended.push(neighbor.node);
                stack.push(extended);
            }
        }
    }

    None
}

/// Greedy best-first search: always expands the node with the smallest
/// heuristic estimate, ignoring the cost already travelled.
///
/// Ties on the estimate go to the smaller node label, then to the
/// lexicographically smaller path.
pub fn greedy_best_first<N, H>(
    network: &RoadNetwork<N>,
    start: &N,
    goal: &N,
    mut heuristic: H,
) -> Option<Vec<N>>
where
    N: NodeLabel,
    H: FnMut(&N) -> f64,
{
    let mut visited = HashSet::new();
    let mut frontier = BinaryHeap::new();
    frontier.push(Frontier {
        priority: heuristic(start),
        path: vec![start.clone()],
    });

    while let Some(Frontier { path, .. }) = frontier.pop() {
        let current = path.last()?.clone();
        if &current == goal {
            return Some(path);
        }
        if !visited.insert(current.clone()) {
            continue;
        }

        for neighbor in network.neighbors(&current) {
            if visited.contains(&neighbor.node) {
                continue;
            }
            let priority = heuristic(&neighbor.node);
            let mut extended = path.clone();
            extended.push(neighbor.node);
            frontier.push(Frontier {
                priority,
                path: extended,
            });
        }
    }

    None
}

/// A* search over road weights with a caller-supplied admissible heuristic.
///
/// Returns the total weight alongside the path.
///
/// # Examples
///
/// ```
/// use u_congestion::network::{search, RoadNetwork};
///
/// let mut net = RoadNetwork::new();
/// net.add_edge("A", "B", 1.0, 2);
/// net.add_edge("B", "D", 5.0, 1);
/// net.add_edge("A", "C", 4.0, 3);
/// net.add_edge("C", "D", 1.0, 2);
///
/// let (cost, path) = search::astar(&net, &"A", &"D", |_| 0.0).unwrap();
/// assert_eq!(path, vec!["A", "C", "D"]);
/// assert!((cost - 5.0).abs() < 1e-12);
/// ```
pub fn astar<N, H>(
    network: &RoadNetwork<N>,
    start: &N,
    goal: &N,
    mut heuristic: H,
) -> Option<(f64, Vec<N>)>
where
    N: NodeLabel,
    H: FnMut(&N) -> f64,
{
    use petgraph::visit::EdgeRef;

    let from = network.node_index(start)?;
    let to = network.node_index(goal)?;
    let graph = network.graph();

    let (cost, indices) = petgraph::algo::astar(
        graph,
        from,
        |n| n == to,
        |e| e.weight().weight,
        |n| heuristic(&graph[n]),
    )?;

    Some((cost, indices.into_iter().map(|n| graph[n].clone()).collect()))
}

/// Minimum-weight path; A* with a zero heuristic.
pub fn shortest_path<N: NodeLabel>(
    network: &RoadNetwork<N>,
    start: &N,
    goal: &N,
) -> Option<(f64, Vec<N>)> {
    astar(network, start, goal, |_| 0.0)
}

/// Min-heap entry keyed on priority, then the path's last node, then the
/// path itself.
struct Frontier<N> {
    priority: f64,
    path: Vec<N>,
}

impl<N: Ord> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord> Eq for Frontier<N> {}

impl<N: Ord> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> Ord for Frontier<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.path.last().cmp(&self.path.last()))
            .then_with(|| other.path.cmp(&self.path))
    }
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

    fn heuristic(node: &&str) -> f64 {
        match *node {
            "A" => 7.0,
            "B" => 6.0,
            "C" => 2.0,
            "D" => 1.0,
            _ => 0.0,
        }
    }

    fn is_walk(net: &RoadNetwork<&'static str>, path: &[&'static str]) -> bool {
        path.windows(2).all(|w| net.road(&w[0], &w[1]).is_some())
    }

    #[test]
    fn test_bfs_fewest_hops() {
        let net = city();
        assert_eq!(bfs(&net, &"A", &"E"), Some(vec!["A", "B", "D", "E"]));
        assert_eq!(bfs(&net, &"C", &"E"), Some(vec!["C", "D", "E"]));
        assert_eq!(bfs(&net, &"E", &"E"), Some(vec!["E"]));
    }

    #[test]
    fn test_dfs_finds_valid_walk() {
        let net = city();
        let path = dfs(&net, &"A", &"E").unwrap();
        assert_eq!(path.first(), Some(&"A"));
        assert_eq!(path.last(), Some(&"E"));
        assert!(is_walk(&net, &path));
    }

    #[test]
    fn test_greedy_best_first_follows_heuristic() {
        let net = city();
        let path = greedy_best_first(&net, &"A", &"E", heuristic).unwrap();
        assert_eq!(path, vec!["A", "C", "D", "E"]);
    }

    #[test]
    fn test_greedy_ties_prefer_smaller_label() {
        // Z is discovered before M, but M sorts first.
        let mut net = RoadNetwork::new();
        net.add_edge("S", "Z", 1.0, 1);
        net.add_edge("S", "M", 1.0, 1);
        net.add_edge("Z", "G", 1.0, 1);
        net.add_edge("M", "G", 1.0, 1);
        let path = greedy_best_first(&net, &"S", &"G", |_| 0.0).unwrap();
        assert_eq!(path, vec!["S", "M", "G"]);
    }

    #[test]
    fn test_greedy_ties_on_label_fall_back_to_path() {
        let net = city();
        let path = greedy_best_first(&net, &"A", &"E", |_| 0.0).unwrap();
        assert_eq!(path, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_astar_minimum_weight() {
        let net = city();
        let (cost, path) = astar(&net, &"A", &"E", heuristic).unwrap();
        // A-B-C-D-E = 1 + 2 + 1 + 3
        assert_eq!(path, vec!["A", "B", "C", "D", "E"]);
        assert!((cost - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_unreachable_goal() {
        let mut net = city();
        net.add_edge("X", "Y", 1.0, 1);
        assert_eq!(bfs(&net, &"A", &"X"), None);
        assert_eq!(dfs(&net, &"A", &"Y"), None);
        assert_eq!(greedy_best_first(&net, &"A", &"X", |_| 0.0), None);
        assert_eq!(shortest_path(&net, &"A", &"X"), None);
        assert_eq!(shortest_path(&net, &"A", &"Nowhere"), None);
    }
}
