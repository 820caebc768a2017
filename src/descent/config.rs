//! Steepest descent configuration.

/// Configuration for steepest-descent local search.
///
/// Descent has no temperature and no restarts; the only randomness is the
/// starting assignment.
///
/// # Examples
///
/// ```
/// use u_congestion::descent::DescentConfig;
///
/// let config = DescentConfig::default().with_seed(3).with_parallel(true);
/// assert_eq!(config.max_steps, 0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentConfig {
    /// Hard cap on improving steps. 0 = run until a local optimum.
    pub max_steps: usize,
    /// Evaluate each neighborhood on the rayon pool (`parallel` feature).
    pub parallel: bool,
    /// Random seed for the starting assignment.
    pub seed: Option<u64>,
}

impl DescentConfig {
    /// Sets the step cap.
    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    /// Enables or disables parallel neighborhood evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
