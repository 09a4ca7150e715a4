use std::fmt;

use thiserror::Error;

/// Which of the two reads came back without usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Current,
    Forecast,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Current => f.write_str("Current weather"),
            DataKind::Forecast => f.write_str("Forecast"),
        }
    }
}

/// Failure of a single fetch cycle.
///
/// Every variant collapses into one `ViewState::Error` message; the split only
/// exists so callers and tests can tell an incomplete payload from a transport
/// or provider failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0} data is unavailable")]
    DataUnavailable(DataKind),

    #[error(transparent)]
    Provider(#[from] anyhow::Error),

    /// The fetch task panicked before producing a result.
    #[error("Weather fetch failed unexpectedly: {0}")]
    Panicked(String),
}

impl FetchError {
    /// Human-readable text shown to the user, including the context chain of
    /// provider errors.
    pub fn message(&self) -> String {
        match self {
            FetchError::Provider(err) => format!("{err:#}"),
            _ => self.to_string(),
        }
    }
}
