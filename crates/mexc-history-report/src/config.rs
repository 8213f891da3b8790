/*
[INPUT]:  Optional YAML configuration file
[OUTPUT]: Validated report configuration and adapter queries
[POS]:    Configuration layer - client and filter defaults
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, bail};
use mexc_contract_adapter::http::CONTRACT_BASE_URL;
use mexc_contract_adapter::{
    ClientConfig, DEFAULT_PAGE_SIZE, MAX_LOOKBACK_DAYS, MAX_PAGE_SIZE, OrderCategory,
    OrderHistoryQuery, OrderSide, OrderState, PositionHistoryQuery, PositionType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for the history report
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Contract API host
    pub base_url: String,
    /// Records per page, at most 100
    pub page_size: u32,
    /// Days of history to request, at most 90
    pub lookback_days: i64,
    /// Pause between page requests
    pub page_delay_ms: u64,
    /// `Recv-Window` header value
    pub recv_window_ms: u64,
    pub positions: PositionFilters,
    pub orders: OrderFilters,
}

/// Default filters for the positions report
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionFilters {
    pub symbol: Option<String>,
    pub position_type: Option<PositionType>,
}

/// Default filters for the orders report
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OrderFilters {
    pub symbol: Option<String>,
    pub states: Vec<OrderState>,
    pub category: Option<OrderCategory>,
    pub side: Option<OrderSide>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: CONTRACT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            lookback_days: MAX_LOOKBACK_DAYS,
            page_delay_ms: client.page_delay.as_millis() as u64,
            recv_window_ms: client.recv_window_ms,
            positions: PositionFilters::default(),
            orders: OrderFilters::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            bail!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size);
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.lookback_days) {
            bail!(
                "lookback_days must be between 1 and {MAX_LOOKBACK_DAYS}, got {}",
                self.lookback_days
            );
        }
        if self.recv_window_ms == 0 {
            bail!("recv_window_ms must be positive");
        }
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            recv_window_ms: self.recv_window_ms,
            page_delay: Duration::from_millis(self.page_delay_ms),
            ..ClientConfig::default()
        }
    }

    pub fn position_query(&self) -> PositionHistoryQuery {
        PositionHistoryQuery {
            symbol: self.positions.symbol.clone(),
            position_type: self.positions.position_type,
            lookback_days: self.lookback_days,
            page_size: self.page_size,
            ..Default::default()
        }
    }

    pub fn order_query(&self) -> OrderHistoryQuery {
        OrderHistoryQuery {
            symbol: self.orders.symbol.clone(),
            states: self.orders.states.clone(),
            category: self.orders.category,
            side: self.orders.side,
            lookback_days: self.lookback_days,
            page_size: self.page_size,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_exchange_limits() {
        let config = ReportConfig::default();
        assert_eq!(config.base_url, "https://contract.mexc.com");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.lookback_days, 90);
        assert_eq!(config.page_delay_ms, 300);
        assert_eq!(config.recv_window_ms, 60_000);
        tokio_test::assert_ok!(config.validate());
    }

    #[test]
    fn test_yaml_overrides_and_codes() {
        let yaml = r#"
page_size: 50
lookback_days: 30
positions:
  symbol: BTC_USDT
  position_type: 2
orders:
  states: [3, 4]
  category: 1
  side: 1
"#;
        let config = ReportConfig::from_yaml(yaml).expect("config");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.base_url, CONTRACT_BASE_URL);

        let positions = config.position_query();
        assert_eq!(positions.symbol.as_deref(), Some("BTC_USDT"));
        assert_eq!(positions.position_type, Some(PositionType::Short));
        assert_eq!(positions.lookback_days, 30);

        let orders = config.order_query();
        assert_eq!(orders.states_param().as_deref(), Some("3,4"));
        assert_eq!(orders.category, Some(OrderCategory::Limit));
        assert_eq!(orders.side, Some(OrderSide::OpenLong));
        assert_eq!(orders.page_size, 50);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(ReportConfig::from_yaml("page_size: 500").is_err());
        assert!(ReportConfig::from_yaml("page_size: 0").is_err());
        assert!(ReportConfig::from_yaml("lookback_days: 120").is_err());
        assert!(ReportConfig::from_yaml("orders:\n  side: 9").is_err());
    }

    #[test]
    fn test_client_config_carries_timing() {
        let config = ReportConfig {
            page_delay_ms: 0,
            recv_window_ms: 5_000,
            ..Default::default()
        };
        let client = config.client_config();
        assert!(client.page_delay.is_zero());
        assert_eq!(client.recv_window_ms, 5_000);
    }
}
