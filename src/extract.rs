use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use log::debug;

use crate::errors::WikiError;
use crate::types::is_valid_title;

/// Page title taken from the `title` path segment.
///
/// Rejects anything outside `[a-zA-Z0-9]+` with [`WikiError::InvalidTitle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(pub String);

impl Title {
    pub fn resolve(raw: String) -> Result<Self, WikiError> {
        if is_valid_title(&raw) {
            Ok(Self(raw))
        } else {
            debug!("Invalid title in request path: {:?}", raw);
            Err(WikiError::InvalidTitle)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Title
where
    S: Send + Sync,
{
    type Rejection = WikiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| WikiError::InvalidTitle)?;
        Self::resolve(raw)
    }
}
