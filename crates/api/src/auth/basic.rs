//! HTTP Basic authentication credentials and verification.
//!
//! Credentials are compared via their SHA-256 digests so the comparison
//! length does not depend on the submitted values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Username/password pair accepted by the API.
#[derive(Clone)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Why a `Basic` header was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BasicAuthError {
    #[error("Authorization header missing or malformed")]
    Malformed,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl BasicAuthConfig {
    /// Load credentials from environment variables.
    ///
    /// | Env Var        | Required |
    /// |----------------|----------|
    /// | `API_USERNAME` | **yes**  |
    /// | `API_PASSWORD` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is unset or empty.
    pub fn from_env() -> Self {
        let username =
            std::env::var("API_USERNAME").expect("API_USERNAME must be set in the environment");
        assert!(!username.is_empty(), "API_USERNAME must not be empty");

        let password =
            std::env::var("API_PASSWORD").expect("API_PASSWORD must be set in the environment");
        assert!(!password.is_empty(), "API_PASSWORD must not be empty");

        Self { username, password }
    }

    /// Verify an `Authorization` header value of the form `Basic <base64>`.
    ///
    /// Returns the authenticated username.
    pub fn verify_header(&self, header: &str) -> Result<String, BasicAuthError> {
        let encoded = header
            .strip_prefix("Basic ")
            .ok_or(BasicAuthError::Malformed)?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicAuthError::Malformed)?;
        let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Malformed)?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or(BasicAuthError::Malformed)?;

        let user_ok = digest(username) == digest(&self.username);
        let pass_ok = digest(password) == digest(&self.password);
        if user_ok && pass_ok {
            Ok(username.to_string())
        } else {
            Err(BasicAuthError::InvalidCredentials)
        }
    }
}

/// Build an `Authorization` header value for the given credentials.
pub fn encode_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
