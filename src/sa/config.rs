//! SA configuration.

/// Configuration for simulated annealing over path assignments.
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, applied once per
/// evaluated move. The run ends when `T` drops to `min_temperature` or
/// below, or earlier when every vehicle's path reaches its goal.
///
/// # Examples
///
/// ```
/// use u_congestion::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.99)
///     .with_min_temperature(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more worsening moves early.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Stopping threshold. The loop runs while `T > min_temperature`.
    pub min_temperature: f64,

    /// Hard cap on move attempts, including skipped no-op draws. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed used by [`SaRunner::run`](super::SaRunner::run).
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.995,
            min_temperature: 0.01,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Rejects settings under which the loop would never terminate.
    /// `min_temperature >= initial_temperature` is allowed: the run is
    /// frozen from the start and returns its random initial assignment.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.min_temperature > 0.0) {
            return Err("min_temperature must be positive".into());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.995).abs() < 1e-12);
        assert!((config.min_temperature - 0.01).abs() < 1e-12);
        assert_eq!(config.max_iterations, 0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial_allowed() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_non_positive_min() {
        assert!(SaConfig::default().with_min_temperature(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(1.5).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(f64::NAN).validate().is_err());
    }
}
