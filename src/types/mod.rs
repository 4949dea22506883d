use std::sync::Arc;

use serde::Serialize;

use crate::auth::CredentialVerifier;
use crate::services::{PageRenderer, PageStore};

/// A titled unit of text content, persisted as a single file.
///
/// Serializes as `{"title": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// Empty-bodied page handed to the edit form when nothing is stored yet
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self::new(title, String::new())
    }
}

/// Page titles are restricted to `[a-zA-Z0-9]+`.
///
/// Both the request extractor and the page store check this, so a title can
/// never name a path outside the storage root.
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub renderer: Arc<PageRenderer>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub welcome_title: Arc<str>,
}
