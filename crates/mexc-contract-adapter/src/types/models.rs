/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed history records tolerant of missing or string-typed numeric fields
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    OpenType, OrderCategory, OrderSide, OrderState, OrderType, PositionState, PositionType,
};

/// One entry of `/position/list/history_positions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryPosition {
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub position_id: i64,
    #[serde(deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub position_type: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub open_type: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub state: i32,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hold_vol: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub frozen_vol: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub close_vol: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hold_avg_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub open_avg_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub close_avg_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub liquidate_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub oim: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub im: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hold_fee: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub realised: Decimal,
    #[serde(deserialize_with = "serde_helpers::deserialize_option_i32")]
    pub adl_level: Option<i32>,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub leverage: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub create_time: i64,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub update_time: i64,
    #[serde(deserialize_with = "serde_helpers::deserialize_bool_or_false")]
    pub auto_add_im: bool,
}

impl HistoryPosition {
    pub fn position_type(&self) -> Option<PositionType> {
        PositionType::from_code(self.position_type)
    }

    pub fn open_type(&self) -> Option<OpenType> {
        OpenType::from_code(self.open_type)
    }

    pub fn state(&self) -> Option<PositionState> {
        PositionState::from_code(self.state)
    }
}

/// One entry of `/order/list/history_orders`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryOrder {
    #[serde(deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub order_id: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub symbol: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub position_id: i64,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol: Decimal,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub leverage: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub side: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub category: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub order_type: i32,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub deal_avg_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub deal_vol: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub order_margin: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub taker_fee: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub maker_fee: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub profit: Decimal,
    #[serde(deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub fee_currency: String,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub open_type: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub state: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_i32_or_zero")]
    pub error_code: i32,
    #[serde(deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub external_oid: String,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub used_margin: Decimal,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub create_time: i64,
    #[serde(deserialize_with = "serde_helpers::deserialize_i64_or_zero")]
    pub update_time: i64,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_option_decimal",
        serialize_with = "serde_helpers::serialize_option_decimal"
    )]
    pub stop_loss_price: Option<Decimal>,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_option_decimal",
        serialize_with = "serde_helpers::serialize_option_decimal"
    )]
    pub take_profit_price: Option<Decimal>,
}

impl HistoryOrder {
    pub fn side(&self) -> Option<OrderSide> {
        OrderSide::from_code(self.side)
    }

    pub fn category(&self) -> Option<OrderCategory> {
        OrderCategory::from_code(self.category)
    }

    pub fn order_type(&self) -> Option<OrderType> {
        OrderType::from_code(self.order_type)
    }

    pub fn open_type(&self) -> Option<OpenType> {
        OpenType::from_code(self.open_type)
    }

    pub fn state(&self) -> Option<OrderState> {
        OrderState::from_code(self.state)
    }

    /// Taker plus maker fee charged on this order
    pub fn total_fee(&self) -> Decimal {
        self.taker_fee + self.maker_fee
    }
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn decimal_from_value<E: serde::de::Error>(value: Value) -> Result<Option<Decimal>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => Decimal::from_str(raw.trim())
                .or_else(|_| Decimal::from_scientific(raw.trim()))
                .map(Some)
                .map_err(E::custom),
            Value::Number(number) => {
                let raw = number.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map(Some)
                    .map_err(E::custom)
            }
            other => Err(E::custom(format!("invalid decimal value: {other}"))),
        }
    }

    fn i64_from_value<E: serde::de::Error>(value: Value) -> Result<Option<i64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => raw.trim().parse::<i64>().map(Some).map_err(E::custom),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid integer value: {number}"))),
            other => Err(E::custom(format!("invalid integer value: {other}"))),
        }
    }

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value::<D::Error>(value)?.unwrap_or(Decimal::ZERO))
    }

    pub fn deserialize_option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(value)
    }

    pub fn deserialize_i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(i64_from_value::<D::Error>(value)?.unwrap_or(0))
    }

    pub fn deserialize_i32_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(deserialize_option_i32(deserializer)?.unwrap_or(0))
    }

    pub fn deserialize_option_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        i64_from_value::<D::Error>(value)?
            .map(|raw| i32::try_from(raw).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub fn deserialize_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(String::new()),
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "invalid string value: {other}"
            ))),
        }
    }

    pub fn deserialize_bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(false),
            Value::Bool(flag) => Ok(flag),
            Value::Number(number) => Ok(number.as_i64().is_some_and(|n| n != 0)),
            Value::String(raw) => Ok(matches!(raw.trim(), "true" | "1")),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        }
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn serialize_option_decimal<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_deserializes_wire_shape() {
        let value = json!({
            "positionId": 52341,
            "symbol": "BTC_USDT",
            "positionType": 1,
            "openType": 2,
            "state": 3,
            "holdVol": 0,
            "frozenVol": 0,
            "closeVol": 12,
            "holdAvgPrice": 67120.5,
            "openAvgPrice": 67120.5,
            "closeAvgPrice": "67350.1",
            "liquidatePrice": 0,
            "oim": 0,
            "im": 0,
            "holdFee": "0.12",
            "realised": "2.7552",
            "adlLevel": null,
            "leverage": 20,
            "createTime": 1_717_000_000_000_i64,
            "updateTime": 1_717_000_360_000_i64,
            "autoAddIm": false
        });

        let position: HistoryPosition =
            serde_json::from_value(value).expect("position should deserialize");

        assert_eq!(position.position_id, 52341);
        assert_eq!(position.position_type(), Some(PositionType::Long));
        assert_eq!(position.open_type(), Some(OpenType::Cross));
        assert_eq!(position.state(), Some(PositionState::Closed));
        assert_eq!(position.close_avg_price, "67350.1".parse::<Decimal>().expect("dec"));
        assert_eq!(position.realised, "2.7552".parse::<Decimal>().expect("dec"));
        assert_eq!(position.adl_level, None);
        assert_eq!(position.create_time, 1_717_000_000_000);
    }

    #[test]
    fn position_deserializes_with_missing_fields() {
        let position: HistoryPosition =
            serde_json::from_value(json!({ "symbol": "ETH_USDT", "realised": null }))
                .expect("sparse position should deserialize");

        assert_eq!(position.symbol, "ETH_USDT");
        assert_eq!(position.realised, Decimal::ZERO);
        assert_eq!(position.hold_fee, Decimal::ZERO);
        assert_eq!(position.position_type(), None);
    }

    #[test]
    fn order_deserializes_string_id_and_fees() {
        let value = json!({
            "orderId": "739113577038255616",
            "symbol": "BTC_USDT",
            "positionId": 52341,
            "price": 67000,
            "vol": "3",
            "leverage": "20",
            "side": 4,
            "category": 1,
            "orderType": 5,
            "dealAvgPrice": 67010.2,
            "dealVol": 3,
            "takerFee": "0.0804",
            "makerFee": 0,
            "profit": "-1.5",
            "feeCurrency": "USDT",
            "openType": 1,
            "state": 3,
            "errorCode": 0,
            "externalOid": "_m_abc",
            "stopLossPrice": "",
            "takeProfitPrice": 69000
        });

        let order: HistoryOrder = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.order_id, "739113577038255616");
        assert_eq!(order.leverage, 20);
        assert_eq!(order.side(), Some(OrderSide::CloseLong));
        assert_eq!(order.order_type(), Some(OrderType::Market));
        assert_eq!(order.state(), Some(OrderState::Completed));
        assert_eq!(order.total_fee(), "0.0804".parse::<Decimal>().expect("dec"));
        assert_eq!(order.stop_loss_price, None);
        assert_eq!(order.take_profit_price, Some(Decimal::from(69000)));
    }

    #[test]
    fn order_rejects_garbage_numeric_field() {
        let result = serde_json::from_value::<HistoryOrder>(json!({ "profit": "n/a" }));
        assert!(result.is_err());
    }
}
