/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public MEXC contract adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod summary;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Credentials, EnvPresence};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    MexcClient,
    MexcError,
    RequestSigner,
    Result,
    encode_params,
};

pub use summary::{OrderSummary, PositionSummary};

// Re-export all types
pub use types::*;
