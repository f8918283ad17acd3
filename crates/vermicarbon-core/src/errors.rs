use thiserror::Error;

/// Error type for invalid model inputs and operations.
#[derive(Error, Debug)]
pub enum VermiError {
    #[error("Invalid value for parameter '{name}': {value} ({reason})")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },
    #[error("Series length mismatch: {context} expected {expected} days, got {found}")]
    SeriesLengthMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
    #[error("Empty series passed to {0}")]
    EmptySeries(String),
    #[error("Invalid emission profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },
    #[error("Could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VermiError {
    /// Shorthand for an [`VermiError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, value: f64, reason: impl Into<String>) -> Self {
        VermiError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.into(),
        }
    }
}

/// Convenience type for `Result<T, VermiError>`.
pub type VermiResult<T> = Result<T, VermiError>;

/// Reject values that are non-finite or fall outside `[low, high]`.
pub fn ensure_in_range(name: &str, value: f64, low: f64, high: f64) -> VermiResult<()> {
    if !value.is_finite() {
        return Err(VermiError::invalid_parameter(name, value, "must be finite"));
    }
    if value < low || value > high {
        return Err(VermiError::invalid_parameter(
            name,
            value,
            format!("must lie within [{}, {}]", low, high),
        ));
    }
    Ok(())
}

/// Reject values that are non-finite or negative.
pub fn ensure_non_negative(name: &str, value: f64) -> VermiResult<()> {
    if !value.is_finite() {
        return Err(VermiError::invalid_parameter(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(VermiError::invalid_parameter(
            name,
            value,
            "must not be negative",
        ));
    }
    Ok(())
}
