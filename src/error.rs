use thiserror::Error;

/// Failures surfaced by the optimization core. All of them abort the run
/// that raised them; nothing is retried internally.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Malformed or insufficient coordinate data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Out-of-range tuning parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A pairwise weight computation produced something the sampler
    /// cannot draw from (non-finite or non-positive totals).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}
