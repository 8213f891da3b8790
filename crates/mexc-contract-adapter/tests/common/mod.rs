/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mexc-contract-adapter tests

use hmac::{Hmac, Mac};
use mexc_contract_adapter::{ClientConfig, Credentials, MexcClient};
use serde_json::{Value, json};
use sha2::Sha256;
use std::time::Duration;
use wiremock::{Match, MockServer, Request, ResponseTemplate};

pub const TEST_API_KEY: &str = "mx0vglTestKey";
pub const TEST_API_SECRET: &str = "test-secret-0123456789";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, with test credentials and no page delay
pub fn test_client(server: &MockServer) -> MexcClient {
    let config = ClientConfig {
        page_delay: Duration::ZERO,
        ..ClientConfig::default()
    };
    MexcClient::with_base_url(config, &server.uri())
        .expect("client init")
        .with_credentials(Credentials::new(TEST_API_KEY, TEST_API_SECRET))
}

/// `{ success: true, code: 0, data }` response
pub fn success_page(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "code": 0,
        "data": data
    }))
}

/// Recomputes the HMAC from what actually went over the wire
pub struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let (Some(api_key), Some(request_time), Some(signature)) =
            (header("ApiKey"), header("Request-Time"), header("Signature"))
        else {
            return false;
        };

        let query = request.url.query().unwrap_or_default();
        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(TEST_API_SECRET.as_bytes()) else {
            return false;
        };
        mac.update(format!("{api_key}{request_time}{query}").as_bytes());
        hex::encode(mac.finalize().into_bytes()) == signature
    }
}

#[allow(dead_code)]
pub fn position_record(id: i64, realised: &str, create_time: i64) -> Value {
    json!({
        "positionId": id,
        "symbol": "BTC_USDT",
        "positionType": 1,
        "openType": 1,
        "state": 3,
        "holdVol": 0,
        "closeVol": 10,
        "openAvgPrice": "64000.5",
        "closeAvgPrice": "64100",
        "holdFee": "0.1",
        "realised": realised,
        "leverage": 10,
        "createTime": create_time,
        "updateTime": create_time + 60_000
    })
}

#[allow(dead_code)]
pub fn order_record(id: &str, profit: &str, taker_fee: &str) -> Value {
    json!({
        "orderId": id,
        "symbol": "BTC_USDT",
        "positionId": 1,
        "price": "64000",
        "vol": 2,
        "leverage": 10,
        "side": 1,
        "category": 1,
        "orderType": 1,
        "dealAvgPrice": "64000",
        "dealVol": 2,
        "takerFee": taker_fee,
        "makerFee": "0",
        "profit": profit,
        "feeCurrency": "USDT",
        "openType": 1,
        "state": 3,
        "createTime": 1_717_000_000_000_i64,
        "updateTime": 1_717_000_000_500_i64
    })
}
