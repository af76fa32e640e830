//! rtags error types

/// rtags error types
#[derive(Debug, thiserror::Error)]
pub enum RtagsError {
    // Client errors
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(String),

    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty response from {0}")]
    EmptyResponse(&'static str),

    /// The translation backend returned a different number of lines than
    /// were submitted, so translated text cannot be matched to timestamps.
    #[error("translation returned {actual} lines for a batch of {expected}")]
    LineCountMismatch { expected: usize, actual: usize },

    // Cache store errors
    #[error("cache error: {0}")]
    Cache(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RtagsError {
    /// HTTP status code this error is reported with.
    ///
    /// Client mistakes map to 400, authentication failures to 403, and
    /// everything the service could not do on the caller's behalf to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            RtagsError::InvalidInput(_) => 400,
            RtagsError::Unauthorized(_) => 403,
            _ => 500,
        }
    }

    /// Whether the error originated in an external backend (completion
    /// API, translation API or cache store).
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            RtagsError::Http(_)
                | RtagsError::Api { .. }
                | RtagsError::EmptyResponse(_)
                | RtagsError::LineCountMismatch { .. }
                | RtagsError::Cache(_)
                | RtagsError::Json(_)
        )
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for RtagsError {
    fn from(err: redis::RedisError) -> Self {
        RtagsError::Cache(err.to_string())
    }
}

/// Result type alias for rtags operations
pub type Result<T> = std::result::Result<T, RtagsError>;
