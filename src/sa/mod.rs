//! Simulated Annealing (SA) over joint path assignments.
//!
//! Each step re-routes one randomly chosen vehicle onto a randomly chosen
//! candidate path. Worsening moves are accepted with the Metropolis
//! probability `exp(-delta / T)`, and `T` decays geometrically after every
//! evaluated move. The run stops once `T` reaches its floor, or as soon as
//! every vehicle's current path ends at its goal.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner, SaTermination};
