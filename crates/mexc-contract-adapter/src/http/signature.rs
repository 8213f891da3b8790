/*
[INPUT]:  Request parameters, millisecond timestamp and API credentials
[OUTPUT]: Canonical query string and hex HMAC-SHA256 signature
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing the canonical encoding or signature format
*/

use crate::auth::Credentials;
use crate::http::{MexcError, Result};
use crate::types::QueryParams;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Percent-encode a single parameter value.
///
/// Only `A-Z a-z 0-9 - _ . ~` pass through, so `! ' ( ) *` come out as
/// `%21 %27 %28 %29 %2A`. A `+` is emitted as `%20`; the exchange verifies
/// signatures against that form.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%2B", "%20")
}

/// Canonical `key=value&...` string: null values dropped, keys in byte order.
///
/// Accepts `&QueryParams` or `None`; both an absent and an empty map give `""`.
pub fn encode_params<'a>(params: impl Into<Option<&'a QueryParams>>) -> String {
    let Some(params) = params.into() else {
        return String::new();
    };
    params
        .present()
        .map(|(key, value)| format!("{key}={}", encode_component(&value.to_string())))
        .collect::<Vec<_>>()
        .join("&")
}

fn validate_keys(params: &QueryParams) -> Result<()> {
    for key in params.keys() {
        if key.is_empty() {
            return Err(MexcError::SignatureInput("empty parameter key".to_string()));
        }
        if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(MexcError::SignatureInput(format!(
                "parameter key '{key}' contains unsupported characters"
            )));
        }
    }
    Ok(())
}

/// Query string plus the headers that authenticate it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    pub query: String,
    pub request_time: String,
    pub signature: String,
}

/// Signs private endpoint requests with the account's API secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// HMAC-SHA256 over `api_key + timestamp + canonical_query`, lowercase hex
    pub fn sign(&self, timestamp: i64, params: &QueryParams) -> Result<String> {
        Ok(self.sign_query(timestamp, params)?.signature)
    }

    /// Canonicalize `params` once and sign that exact string
    pub fn sign_query(&self, timestamp: i64, params: &QueryParams) -> Result<SignedQuery> {
        validate_keys(params)?;
        let query = encode_params(params);
        let request_time = timestamp.to_string();
        let signature = self.mac_hex(&request_time, &query)?;
        Ok(SignedQuery {
            query,
            request_time,
            signature,
        })
    }

    fn mac_hex(&self, request_time: &str, query: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret())
            .map_err(|err| MexcError::SignatureInput(err.to_string()))?;
        mac.update(self.credentials.api_key().as_bytes());
        mac.update(request_time.as_bytes());
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
