/*
[INPUT]:  HTTP client configuration and private API endpoints
[OUTPUT]: Signed requests and typed history results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod history;
pub mod signature;

pub use error::{MexcError, Result};
pub use signature::{RequestSigner, SignedQuery, encode_component, encode_params};

pub use client::{CONTRACT_BASE_URL, ClientConfig, MexcClient};
pub use history::{ORDER_HISTORY_ENDPOINT, POSITION_HISTORY_ENDPOINT};
