//! Vehicles, candidate paths, and joint assignments.

mod assignment;
mod vehicle;

pub use assignment::Assignment;
pub use vehicle::{GoalPolicy, Path, Vehicle, VehicleId};
