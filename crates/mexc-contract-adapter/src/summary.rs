/*
[INPUT]:  Fetched position or order records
[OUTPUT]: Count, P&L and fee totals with net figures
[POS]:    Aggregation layer - post-fetch folds over history records
[UPDATE]: When summary fields or fee definitions change
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{HistoryOrder, HistoryPosition};

/// Totals over a set of closed positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub total_positions: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_fees: Decimal,
}

impl PositionSummary {
    pub fn from_positions<'a, I>(positions: I) -> Self
    where
        I: IntoIterator<Item = &'a HistoryPosition>,
    {
        positions
            .into_iter()
            .fold(Self::default(), |acc, position| Self {
                total_positions: acc.total_positions + 1,
                total_pnl: acc.total_pnl + position.realised,
                total_fees: acc.total_fees + position.hold_fee,
            })
    }

    pub fn net_pnl(&self) -> Decimal {
        self.total_pnl - self.total_fees
    }
}

/// Totals over a set of orders; fees are taker plus maker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_fees: Decimal,
}

impl OrderSummary {
    pub fn from_orders<'a, I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a HistoryOrder>,
    {
        orders.into_iter().fold(Self::default(), |acc, order| Self {
            total_orders: acc.total_orders + 1,
            total_profit: acc.total_profit + order.profit,
            total_fees: acc.total_fees + order.total_fee(),
        })
    }

    pub fn net_profit(&self) -> Decimal {
        self.total_profit - self.total_fees
    }
}
