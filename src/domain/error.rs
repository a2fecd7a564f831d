//! Domain error types.

/// Top-level error type for stockta.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("insufficient data: have {points} points, need {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalyzerError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn data(reason: impl Into<String>) -> Self {
        AnalyzerError::Data {
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            AnalyzerError::Io(_) => 1,
            AnalyzerError::ConfigParse { .. } | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::Data { .. } => 3,
            AnalyzerError::InvalidParameter { .. } => 4,
            AnalyzerError::InsufficientData { .. } => 5,
        }
    }
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

/// Reject a zero look-back window.
pub fn require_period(name: &str, period: usize) -> Result<(), AnalyzerError> {
    if period == 0 {
        return Err(AnalyzerError::invalid_parameter(name, "must be at least 1"));
    }
    Ok(())
}

/// Convert a signed period (as read from flags or config) into a window length.
pub fn period_from_signed(name: &str, value: i64) -> Result<usize, AnalyzerError> {
    if value < 1 {
        return Err(AnalyzerError::invalid_parameter(
            name,
            format!("must be at least 1, got {value}"),
        ));
    }
    usize::try_from(value).map_err(|_| AnalyzerError::invalid_parameter(name, "too large"))
}

/// Every price must be finite; returns the offending index otherwise.
pub fn require_finite(prices: &[f64]) -> Result<(), AnalyzerError> {
    match prices.iter().position(|p| !p.is_finite()) {
        Some(i) => Err(AnalyzerError::invalid_parameter(
            "prices",
            format!("non-finite price at index {i}"),
        )),
        None => Ok(()),
    }
}
