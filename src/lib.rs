//! Congestion-aware route assignment for a fleet of vehicles.
//!
//! Given a road network whose roads have a capacity, and a fixed set of
//! candidate paths for each vehicle, choose one path per vehicle so that
//! roads are overloaded as little as possible. Every road carrying more
//! vehicles than its capacity costs `(usage - capacity)^2`.
//!
//! Search strategies:
//!
//! - **Simulated Annealing (SA)**: one random re-route per step, Metropolis
//!   acceptance, geometric cooling.
//! - **Restart Hill Climbing**: stochastic neighbor sampling with a
//!   decaying acceptance temperature, repeated from several random starts.
//! - **Steepest Descent**: deterministic best-neighbor moves to a local
//!   optimum.
//! - **Exhaustive**: full enumeration, for small instances and as a
//!   ground-truth bound.
//!
//! # Architecture
//!
//! [`network`] and [`fleet`] hold plain data. [`problem::RoutingProblem`]
//! validates them together and defines the single-vehicle neighborhood.
//! [`congestion`] scores assignments. Each strategy lives in its own module
//! with a config, a runner, and a result type; [`strategy::optimize`]
//! dispatches between them.

mod acceptance;
pub mod congestion;
pub mod descent;
pub mod error;
pub mod exhaustive;
pub mod fleet;
pub mod hill_climbing;
pub mod network;
pub mod problem;
pub mod sa;
pub mod strategy;

#[cfg(test)]
mod fixtures;

pub use error::{Result, RoutingError};
