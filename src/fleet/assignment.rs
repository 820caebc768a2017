//! Joint path choice: one route per vehicle.

use rand::Rng;

use super::vehicle::{Path, Vehicle, VehicleId};
use crate::network::NodeLabel;

/// One chosen path per vehicle, indexed by [`VehicleId`].
///
/// Every vehicle is assigned at all times; there is no partial state.
/// Paths are held by value, so two assignments compare equal when they
/// route every vehicle along the same node sequence, regardless of which
/// candidate slot the sequence came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment<N> {
    routes: Vec<Path<N>>,
}

impl<N: NodeLabel> Assignment<N> {
    /// Picks a uniformly random candidate for every vehicle.
    ///
    /// Callers guarantee every vehicle has at least one candidate.
    pub(crate) fn random<R: Rng>(vehicles: &[Vehicle<N>], rng: &mut R) -> Self {
        let routes = vehicles
            .iter()
            .map(|v| {
                let candidates = v.candidates();
                candidates[rng.random_range(0..candidates.len())].clone()
            })
            .collect();
        Self { routes }
    }

    /// Assigns candidate `choice[i]` to vehicle `i`.
    pub(crate) fn from_choices(vehicles: &[Vehicle<N>], choice: &[usize]) -> Self {
        let routes = vehicles
            .iter()
            .zip(choice)
            .map(|(v, &c)| v.candidates()[c].clone())
            .collect();
        Self { routes }
    }

    /// Number of vehicles routed.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Path currently assigned to `vehicle`.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is out of range.
    pub fn route(&self, vehicle: VehicleId) -> &[N] {
        &self.routes[vehicle.index()]
    }

    /// All `(vehicle, path)` pairs in vehicle order.
    pub fn routes(&self) -> impl Iterator<Item = (VehicleId, &[N])> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, p)| (VehicleId(i), &p[..]))
    }

    /// Replaces one vehicle's path, returning the previous one.
    pub fn set_route(&mut self, vehicle: VehicleId, path: Path<N>) -> Path<N> {
        std::mem::replace(&mut self.routes[vehicle.index()], path)
    }

    /// Copy of this assignment with one vehicle's path substituted.
    pub fn with_route(&self, vehicle: VehicleId, path: Path<N>) -> Self {
        let mut next = self.clone();
        next.set_route(vehicle, path);
        next
    }

    /// True iff every vehicle's assigned path ends at that vehicle's goal.
    ///
    /// Purely structural: says nothing about congestion.
    pub fn all_reached_destination(&self, vehicles: &[Vehicle<N>]) -> bool {
        vehicles
            .iter()
            .zip(&self.routes)
            .all(|(v, p)| v.reaches_goal(p))
    }
}
