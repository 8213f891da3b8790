/*
[INPUT]:  MEXC_API_KEY / MEXC_API_SECRET environment variables
[OUTPUT]: Credentials with a redacted Debug representation
[POS]:    Auth layer - credentials held for the process lifetime
[UPDATE]: When credential sources or redaction rules change
*/

use crate::http::{MexcError, Result};
use std::fmt;

pub const API_KEY_ENV: &str = "MEXC_API_KEY";
pub const API_SECRET_ENV: &str = "MEXC_API_SECRET";

/// API key and secret for authenticated contract endpoints.
///
/// The secret only ever feeds the HMAC key; it is never sent over the wire
/// and never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from `MEXC_API_KEY` and `MEXC_API_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).filter(|v| !v.is_empty());
        let api_secret = lookup(API_SECRET_ENV).filter(|v| !v.is_empty());
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Self::new(api_key, api_secret)),
            _ => Err(MexcError::MissingCredentials),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Secret bytes for the MAC key. Never log the return value.
    pub(crate) fn expose_secret(&self) -> &[u8] {
        self.api_secret.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Which credential variables are set, for startup reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvPresence {
    pub api_key: bool,
    pub api_secret: bool,
}

impl EnvPresence {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).is_some_and(|v| !v.is_empty());
        Self {
            api_key: present(API_KEY_ENV),
            api_secret: present(API_SECRET_ENV),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.api_key && self.api_secret
    }
}
