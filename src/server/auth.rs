//! Bearer-token allow-list.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::error::ApiError;
use crate::{Result, RtagsError};

/// Static set of accepted bearer tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenAllowList {
    tokens: HashSet<String>,
}

impl TokenAllowList {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check an `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> Result<()> {
        let header =
            header.ok_or_else(|| RtagsError::Unauthorized("Not authenticated".to_string()))?;

        let (scheme, token) = header.trim().split_once(' ').ok_or_else(|| {
            RtagsError::Unauthorized("Invalid authentication credentials".to_string())
        })?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(RtagsError::Unauthorized(
                "Invalid authentication credentials".to_string(),
            ));
        }

        if !self.tokens.contains(token) {
            return Err(RtagsError::Unauthorized("Invalid token".to_string()));
        }
        Ok(())
    }
}

/// Middleware rejecting requests without an allow-listed bearer token.
pub async fn require_bearer(
    State(allow_list): State<Arc<TokenAllowList>>,
    request: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = allow_list.authorize(header) {
        debug!(path = %request.uri().path(), reason = %e, "rejected request");
        return Err(e.into());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> TokenAllowList {
        TokenAllowList::new(["alpha", "beta"])
    }

    #[test]
    fn accepts_listed_token() {
        assert!(allow_list().authorize(Some("Bearer alpha")).is_ok());
        assert!(allow_list().authorize(Some("bearer beta")).is_ok());
    }

    #[test]
    fn missing_header_is_forbidden() {
        let err = allow_list().authorize(None).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn wrong_scheme_is_forbidden() {
        assert!(allow_list().authorize(Some("Basic alpha")).is_err());
        assert!(allow_list().authorize(Some("alpha")).is_err());
        assert!(allow_list().authorize(Some("Bearer ")).is_err());
    }

    #[test]
    fn unlisted_token_is_forbidden() {
        let err = allow_list().authorize(Some("Bearer gamma")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn empty_list_rejects_everything() {
        let list = TokenAllowList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert!(list.authorize(Some("Bearer ")).is_err());
        assert!(list.authorize(Some("Bearer anything")).is_err());
    }
}
