/*
[INPUT]:  Fetched history records and their summaries
[OUTPUT]: Human-readable console report or JSON document
[POS]:    Presentation layer - stdout rendering for the CLI
[UPDATE]: When report layout or translated fields change
*/

use chrono::{Local, TimeZone};
use console::style;
use mexc_contract_adapter::{HistoryOrder, HistoryPosition, OrderSummary, PositionSummary, TimeWindow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;

const SEPARATOR: &str = "-------------------";

/// Local date-time for a millisecond epoch, or the raw value if out of range
pub fn format_millis(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}

fn usdt(value: Decimal) -> String {
    format!("{:.4} USDT", value.round_dp(4))
}

fn label<T: std::fmt::Display>(decoded: Option<T>, raw: i32) -> String {
    decoded.map_or_else(|| raw.to_string(), |value| value.to_string())
}

pub fn render_window(kind: &str, window: &TimeWindow) -> String {
    format!(
        "Fetching {kind}:\nFrom: {}\nTo: {}\n",
        format_millis(window.start_ms),
        format_millis(window.end_ms)
    )
}

pub fn render_position(position: &HistoryPosition) -> String {
    let mut out = String::new();
    let rows: [(&str, String); 21] = [
        ("positionId", position.position_id.to_string()),
        ("symbol", position.symbol.clone()),
        ("positionType", label(position.position_type(), position.position_type)),
        ("openType", label(position.open_type(), position.open_type)),
        ("state", label(position.state(), position.state)),
        ("holdVol", position.hold_vol.to_string()),
        ("frozenVol", position.frozen_vol.to_string()),
        ("closeVol", position.close_vol.to_string()),
        ("holdAvgPrice", position.hold_avg_price.to_string()),
        ("openAvgPrice", position.open_avg_price.to_string()),
        ("closeAvgPrice", position.close_avg_price.to_string()),
        ("liquidatePrice", position.liquidate_price.to_string()),
        ("im", position.im.to_string()),
        ("oim", position.oim.to_string()),
        ("holdFee", position.hold_fee.to_string()),
        ("realised", position.realised.to_string()),
        (
            "adlLevel",
            position
                .adl_level
                .map_or_else(|| "-".to_string(), |level| level.to_string()),
        ),
        ("leverage", position.leverage.to_string()),
        ("autoAddIm", position.auto_add_im.to_string()),
        ("createTime", format_millis(position.create_time)),
        ("updateTime", format_millis(position.update_time)),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "  {name:<15} {value}");
    }
    out
}

pub fn render_order(order: &HistoryOrder) -> String {
    let optional = |value: Option<Decimal>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let mut out = String::new();
    let rows: [(&str, String); 25] = [
        ("orderId", order.order_id.clone()),
        ("externalOid", order.external_oid.clone()),
        ("symbol", order.symbol.clone()),
        ("positionId", order.position_id.to_string()),
        ("price", order.price.to_string()),
        ("vol", order.vol.to_string()),
        ("leverage", order.leverage.to_string()),
        ("side", label(order.side(), order.side)),
        ("category", label(order.category(), order.category)),
        ("orderType", label(order.order_type(), order.order_type)),
        ("dealAvgPrice", order.deal_avg_price.to_string()),
        ("dealVol", order.deal_vol.to_string()),
        ("orderMargin", order.order_margin.to_string()),
        ("usedMargin", order.used_margin.to_string()),
        ("takerFee", order.taker_fee.to_string()),
        ("makerFee", order.maker_fee.to_string()),
        ("profit", order.profit.to_string()),
        ("feeCurrency", order.fee_currency.clone()),
        ("openType", label(order.open_type(), order.open_type)),
        ("state", label(order.state(), order.state)),
        ("errorCode", order.error_code.to_string()),
        ("createTime", format_millis(order.create_time)),
        ("updateTime", format_millis(order.update_time)),
        ("stopLossPrice", optional(order.stop_loss_price)),
        ("takeProfitPrice", optional(order.take_profit_price)),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "  {name:<15} {value}");
    }
    out
}

pub fn render_position_summary(summary: &PositionSummary) -> String {
    format!(
        "\n{}\nTotal Positions: {}\nTotal P&L: {}\nTotal Fees: {}\nNet P&L: {}\n",
        style("Summary:").bold(),
        summary.total_positions,
        usdt(summary.total_pnl),
        usdt(summary.total_fees),
        usdt(summary.net_pnl()),
    )
}

pub fn render_order_summary(summary: &OrderSummary) -> String {
    format!(
        "\n{}\nTotal Orders: {}\nTotal Profit: {}\nTotal Fees: {}\nNet Profit: {}\n",
        style("Summary:").bold(),
        summary.total_orders,
        usdt(summary.total_profit),
        usdt(summary.total_fees),
        usdt(summary.net_profit()),
    )
}

pub fn render_positions_report(positions: &[HistoryPosition]) -> String {
    if positions.is_empty() {
        return "No positions found\n".to_string();
    }
    let mut out = String::from("Successfully retrieved positions:\n");
    for position in positions {
        out.push_str(&render_position(position));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out.push_str(&render_position_summary(&PositionSummary::from_positions(positions)));
    out
}

pub fn render_orders_report(orders: &[HistoryOrder]) -> String {
    if orders.is_empty() {
        return "No orders found\n".to_string();
    }
    let mut out = String::from("Detailed Order Information:\n");
    for order in orders {
        out.push_str(&render_order(order));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out.push_str(&render_order_summary(&OrderSummary::from_orders(orders)));
    out
}

/// Machine-readable output for `--json`
#[derive(Debug, Default, Serialize)]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<JsonSection<HistoryPosition, PositionSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<JsonSection<HistoryOrder, OrderSummary>>,
}

#[derive(Debug, Serialize)]
pub struct JsonSection<R, S> {
    pub records: Vec<R>,
    pub summary: S,
}

impl JsonReport {
    pub fn with_positions(mut self, positions: Vec<HistoryPosition>) -> Self {
        let summary = PositionSummary::from_positions(&positions);
        self.positions = Some(JsonSection {
            records: positions,
            summary,
        });
        self
    }

    pub fn with_orders(mut self, orders: Vec<HistoryOrder>) -> Self {
        let summary = OrderSummary::from_orders(&orders);
        self.orders = Some(JsonSection {
            records: orders,
            summary,
        });
        self
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn positions() -> Vec<HistoryPosition> {
        serde_json::from_value(json!([
            { "positionId": 7, "symbol": "BTC_USDT", "positionType": 1, "openType": 1,
              "realised": "10.5", "holdFee": "0.5" },
            { "positionId": 8, "symbol": "ETH_USDT", "positionType": 2, "openType": 2,
              "realised": "-2.25" }
        ]))
        .expect("positions")
    }

    #[test]
    fn test_position_report_translates_codes() {
        let report = render_positions_report(&positions());
        assert!(report.contains("LONG"));
        assert!(report.contains("SHORT"));
        assert!(report.contains("ISOLATED"));
        assert!(report.contains("CROSS"));
        assert_eq!(report.matches(SEPARATOR).count(), 2);
        assert!(report.contains("Total Positions: 2"));
        assert!(report.contains("Total P&L: 8.2500 USDT"));
        assert!(report.contains("Total Fees: 0.5000 USDT"));
        assert!(report.contains("Net P&L: 7.7500 USDT"));
    }

    #[test]
    fn test_unknown_codes_fall_back_to_raw_value() {
        let position = HistoryPosition {
            position_type: 9,
            ..Default::default()
        };
        let rendered = render_position(&position);
        assert!(rendered.contains("positionType    9"));
    }

    #[test]
    fn test_margin_and_identifier_rows() {
        let position: HistoryPosition = serde_json::from_value(json!({
            "positionId": 7, "oim": "12.5", "autoAddIm": true
        }))
        .expect("position");
        let rendered = render_position(&position);
        assert!(rendered.contains("oim             12.5"));
        assert!(rendered.contains("autoAddIm       true"));

        let order: HistoryOrder = serde_json::from_value(json!({
            "orderId": "1", "externalOid": "ext-42", "usedMargin": "3.75", "errorCode": 2
        }))
        .expect("order");
        let rendered = render_order(&order);
        assert!(rendered.contains("externalOid     ext-42"));
        assert!(rendered.contains("usedMargin      3.75"));
        assert!(rendered.contains("errorCode       2"));
    }

    #[test]
    fn test_empty_reports() {
        assert_eq!(render_positions_report(&[]), "No positions found\n");
        assert_eq!(render_orders_report(&[]), "No orders found\n");
    }

    #[test]
    fn test_order_report_sums_both_fees() {
        let orders: Vec<HistoryOrder> = serde_json::from_value(json!([
            { "orderId": "1", "side": 1, "state": 3, "profit": "2", "takerFee": "0.1", "makerFee": "0.05" },
            { "orderId": "2", "side": 4, "state": 4 }
        ]))
        .expect("orders");

        let report = render_orders_report(&orders);
        assert!(report.contains("OPEN_LONG"));
        assert!(report.contains("CLOSE_LONG"));
        assert!(report.contains("CANCELLED"));
        assert!(report.contains("Total Orders: 2"));
        assert!(report.contains("Total Fees: 0.1500 USDT"));
        assert!(report.contains("Net Profit: 1.8500 USDT"));
    }

    #[test]
    fn test_json_report_contains_summary() {
        let report = JsonReport::default().with_positions(positions());
        let value: serde_json::Value =
            serde_json::from_str(&report.to_pretty_json().expect("json")).expect("parse");

        assert_eq!(value["positions"]["summary"]["total_positions"], 2);
        assert_eq!(value["positions"]["summary"]["total_pnl"], "8.25");
        assert_eq!(value["positions"]["records"][0]["realised"], "10.5");
        assert!(value.get("orders").is_none());
    }

    #[test]
    fn test_format_millis_out_of_range() {
        assert_eq!(format_millis(i64::MAX), i64::MAX.to_string());
    }
}
