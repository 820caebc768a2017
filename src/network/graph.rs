//! Undirected road graph with per-road capacity.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds required of a node identifier.
///
/// Nodes are opaque to the optimizer; anything hashable and ordered
/// (`&str`, `String`, integers, small tuples) works.
pub trait NodeLabel: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + Debug + Send + Sync> NodeLabel for T {}

/// Attributes of a single undirected road.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    /// Travel cost. Informational for the optimizer, used by path discovery.
    pub weight: f64,
    /// Number of vehicles the road carries before it is penalized.
    pub capacity: u32,
}

/// One adjacency record returned by [`RoadNetwork::neighbors`].
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<N> {
    pub node: N,
    pub weight: f64,
    pub capacity: u32,
}

/// Undirected, weighted, capacity-annotated road graph.
///
/// Built once before optimization and read-only during search, so a
/// network can be shared freely across threads evaluating neighbors.
///
/// # Examples
///
/// ```
/// use u_congestion::network::RoadNetwork;
///
/// let mut net = RoadNetwork::new();
/// net.add_edge("A", "B", 1.0, 2);
/// net.add_edge("B", "C", 2.0, 1);
///
/// let around_b: Vec<_> = net.neighbors(&"B").into_iter().map(|n| n.node).collect();
/// assert_eq!(around_b, vec!["A", "C"]);
/// assert_eq!(net.road(&"C", &"B").map(|r| r.capacity), Some(1));
/// assert!(net.neighbors(&"Z").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RoadNetwork<N: NodeLabel> {
    graph: UnGraph<N, Road>,
    index: HashMap<N, NodeIndex>,
}

impl<N: NodeLabel> Default for RoadNetwork<N> {
    fn default() -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
        }
    }
}

impl<N: NodeLabel> RoadNetwork<N> {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an undirected road between `u` and `v`.
    ///
    /// Unknown endpoints are created on demand. Adding the same unordered
    /// pair again overwrites its weight and capacity, so both directions
    /// always report the same attributes.
    pub fn add_edge(&mut self, u: N, v: N, weight: f64, capacity: u32) {
        let a = self.ensure_node(u);
        let b = self.ensure_node(v);
        self.graph.update_edge(a, b, Road { weight, capacity });
    }

    /// Roads incident to `node`, in insertion order.
    ///
    /// Returns an empty list for a node the network has never seen.
    pub fn neighbors(&self, node: &N) -> Vec<Neighbor<N>> {
        let Some(&ix) = self.index.get(node) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self.graph.edges(ix).collect();
        edges.sort_by_key(|e| e.id());

        edges
            .into_iter()
            .map(|e| {
                let other = if e.source() == ix {
                    e.target()
                } else {
                    e.source()
                };
                let road = e.weight();
                Neighbor {
                    node: self.graph[other].clone(),
                    weight: road.weight,
                    capacity: road.capacity,
                }
            })
            .collect()
    }

    /// Attributes of the road joining `u` and `v`, in either direction.
    pub fn road(&self, u: &N, v: &N) -> Option<Road> {
        self.road_index(u, v).map(|e| self.graph[e])
    }

    /// Whether `node` appears in the network.
    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct undirected roads.
    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes, in the order they were first seen.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// All roads as `(u, v, road)`, in insertion order.
    pub fn roads(&self) -> impl Iterator<Item = (&N, &N, Road)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    /// Stable dense index of the road between `u` and `v`.
    ///
    /// Roads are never removed, so indices stay valid for the network's
    /// lifetime and can key per-road tables.
    pub(crate) fn road_index(&self, u: &N, v: &N) -> Option<EdgeIndex> {
        let a = *self.index.get(u)?;
        let b = *self.index.get(v)?;
        self.graph.find_edge(a, b)
    }

    /// Road attributes by dense index.
    pub(crate) fn road_at(&self, e: EdgeIndex) -> Road {
        self.graph[e]
    }

    /// Endpoints of a road by dense index.
    pub(crate) fn endpoints(&self, e: EdgeIndex) -> Option<(&N, &N)> {
        self.graph
            .edge_endpoints(e)
            .map(|(a, b)| (&self.graph[a], &self.graph[b]))
    }

    pub(crate) fn graph(&self) -> &UnGraph<N, Road> {
        &self.graph
    }

    pub(crate) fn node_index(&self, node: &N) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    fn ensure_node(&mut self, node: N) -> NodeIndex {
        if let Some(&ix) = self.index.get(&node) {
            return ix;
        }
        let ix = self.graph.add_node(node.clone());
        self.index.insert(node, ix);
        ix
    }
}
