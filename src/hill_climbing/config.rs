//! Restart hill climbing configuration.

/// Configuration parameters for random-restart stochastic hill climbing.
///
/// # Examples
///
/// ```
/// use u_congestion::hill_climbing::HillClimbingConfig;
///
/// let config = HillClimbingConfig::default()
///     .with_max_restarts(5)
///     .with_max_iterations(200);
/// assert_eq!(config.max_restarts, 5);
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillClimbingConfig {
    /// Maximum steps per trial.
    pub max_iterations: usize,
    /// Acceptance temperature, reset at the start of every trial.
    pub temperature: f64,
    /// Per-step geometric cooling factor in (0, 1). No floor is applied.
    pub cooling_rate: f64,
    /// Number of independent trials.
    pub max_restarts: usize,
    /// Random seed used by [`HillClimbingRunner::run`](super::HillClimbingRunner::run).
    pub seed: Option<u64>,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            temperature: 1.0,
            cooling_rate: 0.99,
            max_restarts: 10,
            seed: None,
        }
    }
}

impl HillClimbingConfig {
    /// Sets the maximum number of steps per trial.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the starting acceptance temperature of each trial.
    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = t;
        self
    }

    /// Sets the per-step cooling factor.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the number of trials.
    pub fn with_max_restarts(mut self, n: usize) -> Self {
        self.max_restarts = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_restarts == 0 {
            return Err("max_restarts must be at least 1".into());
        }
        if !(self.temperature > 0.0) {
            return Err("temperature must be positive".into());
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        Ok(())
    }
}
