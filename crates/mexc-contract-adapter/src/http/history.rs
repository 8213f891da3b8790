/*
[INPUT]:  Endpoint path, base filters and page size
[OUTPUT]: All history records across pages (positions, orders)
[POS]:    HTTP layer - paginated private history endpoints
[UPDATE]: When adding history endpoints or changing pagination rules
*/

use crate::http::{MexcClient, Result};
use crate::types::{HistoryOrder, HistoryPosition, OrderHistoryQuery, PositionHistoryQuery, QueryParams};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const POSITION_HISTORY_ENDPOINT: &str = "/api/v1/private/position/list/history_positions";
pub const ORDER_HISTORY_ENDPOINT: &str = "/api/v1/private/order/list/history_orders";

/// Pagination progress: either fetching the carried page number, or done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Fetching(u32),
    Done,
}

impl MexcClient {
    /// Walk `page_num = 1, 2, ...` until the server returns an empty page.
    ///
    /// Each request is signed with a fresh timestamp. Any failure aborts the
    /// walk and the pages collected so far are dropped.
    pub async fn fetch_history<T>(
        &self,
        endpoint: &str,
        base_filters: &QueryParams,
        page_size: u32,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut records = Vec::new();
        let mut state = PageState::Fetching(1);

        while let PageState::Fetching(page_num) = state {
            if page_num > 1 && !self.config().page_delay.is_zero() {
                tokio::time::sleep(self.config().page_delay).await;
            }

            let params = base_filters.merged(
                &QueryParams::new()
                    .with("page_num", page_num)
                    .with("page_size", page_size),
            );
            let page: Vec<T> = self.signed_get(endpoint, &params).await?;
            debug!(endpoint, page_num, records = page.len(), "fetched page");

            state = if page.is_empty() {
                PageState::Done
            } else {
                records.extend(page);
                PageState::Fetching(page_num + 1)
            };
        }

        info!(endpoint, records = records.len(), "history fetch complete");
        Ok(records)
    }

    /// Position history, newest `createTime` first
    ///
    /// GET /api/v1/private/position/list/history_positions
    pub async fn position_history(
        &self,
        query: &PositionHistoryQuery,
    ) -> Result<Vec<HistoryPosition>> {
        let filters = query.to_params(now_ms());
        let mut positions: Vec<HistoryPosition> = self
            .fetch_history(POSITION_HISTORY_ENDPOINT, &filters, query.page_size)
            .await?;
        positions.sort_by(|a, b| b.create_time.cmp(&a.create_time));
        Ok(positions)
    }

    /// Order history in server order
    ///
    /// GET /api/v1/private/order/list/history_orders
    pub async fn order_history(&self, query: &OrderHistoryQuery) -> Result<Vec<HistoryOrder>> {
        let filters = query.to_params(now_ms());
        self.fetch_history(ORDER_HISTORY_ENDPOINT, &filters, query.page_size)
            .await
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
