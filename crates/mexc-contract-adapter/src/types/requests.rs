/*
[INPUT]:  Caller filters (symbol, states, category, side, time bounds, page size)
[OUTPUT]: Ordered query parameter maps for signing and sending
[POS]:    Data layer - request parameter definitions
[UPDATE]: When endpoint filters change
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::enums::{OrderCategory, OrderSide, OrderState, PositionType};

/// Maximum lookback the history endpoints accept
pub const MAX_LOOKBACK_DAYS: i64 = 90;
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 100;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Scalar value of a request parameter.
///
/// Fractional numbers are carried as `Decimal` so the signed text matches
/// what the caller wrote, e.g. `0.10` stays `0.10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Null,
    Int(i64),
    Decimal(Decimal),
    Str(String),
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Decimal(value) => write!(f, "{value}"),
            ParamValue::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// Request parameters keyed by name.
///
/// Keys iterate in byte order, which is the order the signer needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a string filter only when it is non-empty
    pub fn insert_non_empty(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Union with `other`; keys in `other` win
    pub fn merged(&self, other: &QueryParams) -> QueryParams {
        let mut merged = self.clone();
        merged
            .0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Non-null entries in key order
    pub fn present(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Millisecond epoch bounds sent as `start_time` / `end_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    /// Fill missing bounds: the window ends at `now_ms` and spans `lookback_days`
    pub fn resolve(
        start_ms: Option<i64>,
        end_ms: Option<i64>,
        lookback_days: i64,
        now_ms: i64,
    ) -> Self {
        let end_ms = end_ms.unwrap_or(now_ms);
        let start_ms = start_ms.unwrap_or(end_ms - lookback_days * DAY_MS);
        Self { start_ms, end_ms }
    }

    /// Trailing maximum lookback ending at `now_ms`
    pub fn trailing(now_ms: i64) -> Self {
        Self::resolve(None, None, MAX_LOOKBACK_DAYS, now_ms)
    }

    fn apply(&self, params: &mut QueryParams) {
        params
            .insert("start_time", self.start_ms)
            .insert("end_time", self.end_ms);
    }
}

/// Filters for the position history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionHistoryQuery {
    pub symbol: Option<String>,
    pub position_type: Option<PositionType>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub lookback_days: i64,
    pub page_size: u32,
}

impl Default for PositionHistoryQuery {
    fn default() -> Self {
        Self {
            symbol: None,
            position_type: None,
            start_time: None,
            end_time: None,
            lookback_days: MAX_LOOKBACK_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PositionHistoryQuery {
    pub fn window(&self, now_ms: i64) -> TimeWindow {
        TimeWindow::resolve(self.start_time, self.end_time, self.lookback_days, now_ms)
    }

    /// Fix both bounds at the window resolved for `now_ms`
    pub fn pin_window(&mut self, now_ms: i64) -> TimeWindow {
        let window = self.window(now_ms);
        self.start_time = Some(window.start_ms);
        self.end_time = Some(window.end_ms);
        window
    }

    /// Base filters (without paging) for a fetch issued at `now_ms`
    pub fn to_params(&self, now_ms: i64) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_non_empty("symbol", self.symbol.as_deref());
        if let Some(position_type) = self.position_type {
            params.insert("type", position_type.code());
        }
        self.window(now_ms).apply(&mut params);
        params
    }
}

/// Filters for the order history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderHistoryQuery {
    pub symbol: Option<String>,
    pub states: Vec<OrderState>,
    pub category: Option<OrderCategory>,
    pub side: Option<OrderSide>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub lookback_days: i64,
    pub page_size: u32,
}

impl Default for OrderHistoryQuery {
    fn default() -> Self {
        Self {
            symbol: None,
            states: Vec::new(),
            category: None,
            side: None,
            start_time: None,
            end_time: None,
            lookback_days: MAX_LOOKBACK_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl OrderHistoryQuery {
    pub fn window(&self, now_ms: i64) -> TimeWindow {
        TimeWindow::resolve(self.start_time, self.end_time, self.lookback_days, now_ms)
    }

    /// Fix both bounds at the window resolved for `now_ms`
    pub fn pin_window(&mut self, now_ms: i64) -> TimeWindow {
        let window = self.window(now_ms);
        self.start_time = Some(window.start_ms);
        self.end_time = Some(window.end_ms);
        window
    }

    /// Comma-separated state codes, e.g. `3,4`
    pub fn states_param(&self) -> Option<String> {
        if self.states.is_empty() {
            return None;
        }
        let codes: Vec<String> = self.states.iter().map(|s| s.code().to_string()).collect();
        Some(codes.join(","))
    }

    /// Base filters (without paging) for a fetch issued at `now_ms`
    pub fn to_params(&self, now_ms: i64) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_non_empty("symbol", self.symbol.as_deref());
        params.insert_non_empty("states", self.states_param().as_deref());
        if let Some(category) = self.category {
            params.insert("category", category.code());
        }
        if let Some(side) = self.side {
            params.insert("side", side.code());
        }
        self.window(now_ms).apply(&mut params);
        params
    }
}
