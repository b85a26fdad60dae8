use crate::error::SolverError;

/// A named point on the globe. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        City {
            name: name.into(),
            lat,
            lng,
        }
    }
}

/// A closed tour over the model's cities. `route` holds every city index
/// exactly once; the edge from the last index back to the first is implicit
/// and already included in `length`.
#[derive(Debug, Clone)]
pub struct Tour {
    pub route: Vec<usize>,
    pub length: f64,
}

/// Tuning parameters for one optimization run. Every field must be supplied
/// by the caller; there are no implicit defaults.
#[derive(Debug, Clone, Copy)]
pub struct RunParameters {
    /// Tours constructed per outer iteration.
    pub num_ants: usize,
    /// Pheromone exponent in the next-city weight.
    pub alpha: f64,
    /// Heuristic (inverse-distance) exponent in the next-city weight.
    pub beta: f64,
    /// Fraction of every trail removed once per iteration, in [0, 1).
    pub evaporation_rate: f64,
    /// Hard ceiling on outer iterations.
    pub max_iterations: usize,
    /// Consecutive non-improving iterations tolerated before termination.
    pub max_stagnation_iterations: usize,
}

impl RunParameters {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.num_ants < 1 {
            return Err(SolverError::InvalidConfiguration(
                "num_ants must be at least 1".into(),
            ));
        }
        if self.max_stagnation_iterations < 1 {
            return Err(SolverError::InvalidConfiguration(
                "max_stagnation_iterations must be at least 1".into(),
            ));
        }
        if self.max_iterations < 1 {
            return Err(SolverError::InvalidConfiguration(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "alpha must be finite and >= 0, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "beta must be finite and >= 0, got {}",
                self.beta
            )));
        }
        if !self.evaporation_rate.is_finite() || !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(SolverError::InvalidConfiguration(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        Ok(())
    }
}
