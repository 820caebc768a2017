//! Steepest-descent local search.
//!
//! Deterministic once the starting assignment is drawn: every step scores
//! the whole single-vehicle neighborhood and moves to its cheapest member,
//! stopping at the first local optimum.

mod config;
mod runner;

pub use config::DescentConfig;
pub use runner::{DescentResult, DescentRunner, DescentTermination};
