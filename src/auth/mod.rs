//! HTTP Basic authentication for protected routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};

use crate::errors::WikiError;
use crate::types::AppState;

/// Decides whether a username/password pair is allowed in
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair
#[derive(Clone)]
pub struct FixedCredentials {
    username: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl CredentialVerifier for FixedCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Credentials carried by an `Authorization: Basic ...` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse the `Authorization` header. Returns `None` when it is absent,
    /// uses another scheme, or is not valid base64 `user:password`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self { username: username.to_string(), password: password.to_string() })
    }
}

/// Gate that admits a request only when its Basic credentials verify
#[derive(Clone)]
pub struct BasicAuth {
    verifier: Arc<dyn CredentialVerifier>,
}

impl BasicAuth {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), WikiError> {
        match BasicCredentials::from_headers(headers) {
            Some(creds) if self.verifier.verify(&creds.username, &creds.password) => {
                debug!("Basic auth accepted for user {:?}", creds.username);
                Ok(())
            }
            Some(creds) => {
                warn!("Basic auth rejected for user {:?}", creds.username);
                Err(WikiError::Unauthorized)
            }
            None => {
                debug!("Basic auth credentials missing");
                Err(WikiError::Unauthorized)
            }
        }
    }
}

/// Middleware for routes that need the admin credentials
pub async fn require_basic_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let gate = BasicAuth::new(state.verifier.clone());
    match gate.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    fn basic(user_pass: &str) -> HeaderMap {
        headers_with(&format!("Basic {}", STANDARD.encode(user_pass)))
    }

    fn gate() -> BasicAuth {
        BasicAuth::new(Arc::new(FixedCredentials::new("admin", "123456")))
    }

    #[test]
    fn parses_basic_header() {
        let creds = BasicCredentials::from_headers(&basic("alice:se:cret")).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "se:cret");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let headers = headers_with(&format!("bAsIc {}", STANDARD.encode("admin:123456")));
        assert!(gate().check(&headers).is_ok());
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(BasicCredentials::from_headers(&HeaderMap::new()).is_none());
        assert!(BasicCredentials::from_headers(&headers_with("Bearer token")).is_none());
        assert!(BasicCredentials::from_headers(&headers_with("Basic !!!")).is_none());
        assert!(BasicCredentials::from_headers(&basic("no-colon")).is_none());
    }

    #[test]
    fn admits_correct_credentials() {
        assert!(gate().check(&basic("admin:123456")).is_ok());
    }

    #[test]
    fn refuses_wrong_or_missing_credentials() {
        assert!(matches!(gate().check(&basic("admin:wrong")), Err(WikiError::Unauthorized)));
        assert!(matches!(gate().check(&basic("root:123456")), Err(WikiError::Unauthorized)));
        assert!(matches!(gate().check(&HeaderMap::new()), Err(WikiError::Unauthorized)));
    }

    struct AnyPassword;

    impl CredentialVerifier for AnyPassword {
        fn verify(&self, username: &str, _password: &str) -> bool {
            username == "guest"
        }
    }

    #[test]
    fn gate_uses_injected_verifier() {
        let gate = BasicAuth::new(Arc::new(AnyPassword));
        assert!(gate.check(&basic("guest:whatever")).is_ok());
        assert!(gate.check(&basic("admin:123456")).is_err());
    }
}
