/*
[INPUT]:  Process environment
[OUTPUT]: API credentials for request signing
[POS]:    Auth layer - credential loading and redaction
[UPDATE]: When credential sources change
*/

pub mod credentials;

pub use credentials::{Credentials, EnvPresence, API_KEY_ENV, API_SECRET_ENV};
