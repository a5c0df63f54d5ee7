//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Credentials for the extraction model.
///
/// The API key lives in secure memory and is redacted from Debug output;
/// call [`ModelCredentials::api_key`] only at the point of use.
#[derive(Clone)]
pub struct ModelCredentials {
    api_key: SecretString,

    /// Model identifier (e.g. `gemini-2.5-flash`)
    pub model: String,
}

impl ModelCredentials {
    /// Create credentials for a model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }

    /// Expose the API key for use in a request.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for ModelCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCredentials")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}
