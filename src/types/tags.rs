//! Tag extraction request and response types

use serde::{Deserialize, Serialize};

use crate::{Result, RtagsError};

/// Maximum number of tags returned for a request.
pub const MAX_TAGS: usize = 5;

/// Maximum number of reference websites accepted per request.
pub const MAX_REFERENCE_WEBSITES: usize = 10;

/// Body of `POST /rtags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRequest {
    /// The input text to analyze.
    pub text: String,
    /// Reference website URLs, 1 to 10 entries.
    pub reference_websites: Vec<String>,
}

impl TagRequest {
    pub fn new(text: impl Into<String>, reference_websites: Vec<String>) -> Self {
        Self {
            text: text.into(),
            reference_websites,
        }
    }

    /// Check the request against its field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(RtagsError::InvalidInput("Text cannot be empty.".into()));
        }
        if self.reference_websites.is_empty() {
            return Err(RtagsError::InvalidInput(
                "Reference websites list cannot be empty.".into(),
            ));
        }
        if self.reference_websites.len() > MAX_REFERENCE_WEBSITES {
            return Err(RtagsError::InvalidInput(format!(
                "Too many reference websites (max {MAX_REFERENCE_WEBSITES})."
            )));
        }
        Ok(())
    }
}

/// Response of `POST /rtags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResponse {
    /// The extracted tags, at most [`MAX_TAGS`].
    pub tags: Vec<String>,
}
