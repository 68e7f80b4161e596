//! API key handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of provider
//! credentials. Every provider in [`crate::providers`] stores its key
//! behind this wrapper.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key that won't be logged or displayed.
///
/// `Debug` and `Display` both render `[REDACTED]`, so a key can never leak
/// through tracing output or error messages.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use.
    ///
    /// Only call this at the point of building a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug() {
        let key = ApiKey::new("pplx-super-secret");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("pplx-super"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_expose_works() {
        let key = ApiKey::new("pplx-super-secret");
        assert_eq!(key.expose(), "pplx-super-secret");
    }
}
