/*
[INPUT]:  JSON envelope returned by MEXC private endpoints
[OUTPUT]: Typed envelope with success flag, code, message and data
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::http::{MexcError, Result};

/// `{ "success": bool, "code": int, "message": str?, "data": T? }`
///
/// The default payload type is raw JSON so the success flag can be checked
/// before `data` is given a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    pub code: Option<i64>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl ApiResponse {
    /// Check `success`, then decode the payload into `T`
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        let data: serde_json::Value = self.into_result()?;
        Ok(serde_json::from_value(data)?)
    }
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, mapping `success: false` onto an API error
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(MexcError::api_error(self.code, self.message));
        }
        self.data
            .ok_or_else(|| MexcError::InvalidResponse("success response without data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryPosition;

    #[test]
    fn test_success_envelope() {
        let body = r#"{"success":true,"code":0,"data":[1,2,3]}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(body).expect("envelope");
        assert_eq!(response.into_result().expect("data"), vec![1, 2, 3]);
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let body = r#"{"success":false,"code":602,"message":"bad signature"}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(body).expect("envelope");
        let err = response.into_result().expect_err("failure");
        assert!(err.to_string().contains("bad signature"));
    }

    #[test]
    fn test_failure_without_message() {
        let body = r#"{"success":false}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(body).expect("envelope");
        let err = response.into_result().expect_err("failure");
        assert_eq!(err.to_string(), "API error: Unknown error");
    }

    #[test]
    fn test_success_without_data_is_invalid() {
        let body = r#"{"success":true,"code":0}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(body).expect("envelope");
        assert!(matches!(
            response.into_result(),
            Err(MexcError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_typed_history_envelope() {
        let body = r#"{"success":true,"code":0,"data":[{"positionId":1,"symbol":"BTC_USDT"}]}"#;
        let response: ApiResponse<Vec<HistoryPosition>> =
            serde_json::from_str(body).expect("envelope");
        let positions = response.into_result().expect("data");
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "BTC_USDT");
    }

    #[test]
    fn test_failure_with_non_array_data_keeps_message() {
        let body = r#"{"success":false,"code":602,"message":"bad signature","data":{}}"#;
        let response: ApiResponse = serde_json::from_str(body).expect("envelope");
        let err = response
            .into_data::<Vec<HistoryPosition>>()
            .expect_err("failure");
        assert!(err.is_api_error());
        assert!(matches!(err, MexcError::Api { code: Some(602), .. }));
        assert!(err.to_string().contains("bad signature"));
    }

    #[test]
    fn test_success_with_mistyped_data_is_serialization_error() {
        let body = r#"{"success":true,"data":{"unexpected":true}}"#;
        let response: ApiResponse = serde_json::from_str(body).expect("envelope");
        assert!(matches!(
            response.into_data::<Vec<HistoryPosition>>(),
            Err(MexcError::Serialization(_))
        ));
    }

    #[test]
    fn test_null_data_on_success_is_invalid() {
        let body = r#"{"success":true,"data":null}"#;
        let response: ApiResponse = serde_json::from_str(body).expect("envelope");
        assert!(matches!(
            response.into_data::<Vec<i32>>(),
            Err(MexcError::InvalidResponse(_))
        ));
    }
}
