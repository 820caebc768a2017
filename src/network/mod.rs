//! Road network and path discovery.
//!
//! [`RoadNetwork`] is a plain data structure: an undirected graph whose
//! roads carry a travel weight and a vehicle capacity. The [`search`]
//! module finds routes through it, which callers turn into the candidate
//! paths vehicles choose between.

mod graph;
pub mod search;

pub use graph::{Neighbor, NodeLabel, Road, RoadNetwork};
