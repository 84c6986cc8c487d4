use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    /// The New Relic response carried an explicit error payload. Collectors
    /// recover from this variant by dropping the affected stage for the
    /// cycle; every other variant propagates to the caller.
    #[error("New Relic API error: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
