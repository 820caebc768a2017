//! Metropolis acceptance criterion shared by the stochastic strategies.

use rand::Rng;

/// Probability of moving from a state costing `reference` to one costing
/// `candidate` at `temperature`.
///
/// Non-worsening moves are always accepted. A worsening move at zero (or
/// underflowed) temperature never is.
pub(crate) fn acceptance_probability(reference: u64, candidate: u64, temperature: f64) -> f64 {
    if candidate <= reference {
        return 1.0;
    }
    if temperature <= 0.0 {
        return 0.0;
    }
    let delta = (candidate - reference) as f64;
    (-delta / temperature).exp()
}

/// Accept unconditionally on strict improvement; otherwise draw once from
/// `[0, 1)` against [`acceptance_probability`].
///
/// The draw is skipped for strict improvements so the random stream only
/// advances when a coin is actually flipped.
pub(crate) fn metropolis<R: Rng>(reference: u64, candidate: u64, temperature: f64, rng: &mut R) -> bool {
    candidate < reference
        || rng.random_range(0.0..1.0) < acceptance_probability(reference, candidate, temperature)
}
