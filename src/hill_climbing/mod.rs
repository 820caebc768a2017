//! Random-restart stochastic hill climbing.
//!
//! Each trial walks from a random assignment by sampling one neighbor at a
//! time uniformly from the full single-vehicle neighborhood, accepting
//! improvements outright and worsening moves under a Metropolis rule whose
//! temperature decays every step. The best trial wins.

mod config;
mod runner;

pub use config::HillClimbingConfig;
pub use runner::{HillClimbingResult, HillClimbingRunner};
