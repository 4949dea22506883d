//! Tinywiki - a small page wiki served over HTTP
//!
//! Pages are plain text files. They are shown as HTML with `[Title]` links
//! expanded, or as JSON when the client asks for `application/json`. Editing
//! sits behind HTTP Basic authentication.

pub mod auth;
pub mod components;
pub mod config;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod logger;
pub mod router;
pub mod services;
pub mod types;

// Re-export commonly used items
pub use auth::{BasicAuth, CredentialVerifier, FixedCredentials};
pub use config::Config;
pub use errors::WikiError;
pub use router::build_router;
pub use services::{LinkMode, LinkTransformer, PageRenderer, PageStore};
pub use types::{AppState, Page};
