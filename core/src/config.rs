//! Environment-driven client configuration.

use crate::error::{ClientError, Result};
use crate::types::Session;

/// Variable holding the server's base URL.
pub const BASE_URL_VAR: &str = "TODO_BASE_URL";
/// Variable holding the session token.
pub const SESSION_VAR: &str = "TODO_SESSION";
/// Base URL used when `TODO_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Where to reach the server and which session to present.
#[derive(Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub session: Session,
}

impl ClientConfig {
    /// Read `TODO_BASE_URL` (optional) and `TODO_SESSION` (required).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if `TODO_SESSION` is unset or either
    /// variable is not valid unicode.
    pub fn from_env() -> Result<Self> {
        let base_url = match std::env::var(BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) | Err(std::env::VarError::NotPresent) => DEFAULT_BASE_URL.to_string(),
            Err(e) => return Err(ClientError::Config(format!("{BASE_URL_VAR}: {e}"))),
        };
        let session = std::env::var(SESSION_VAR)
            .map_err(|e| ClientError::Config(format!("{SESSION_VAR}: {e}")))?;

        Ok(Self {
            base_url,
            session: Session::new(session),
        })
    }
}
