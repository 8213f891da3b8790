/*
[INPUT]:  Parsed CLI, resolved configuration and an authenticated client
[OUTPUT]: Positions and/or orders report written to the given sink
[POS]:    Orchestration layer - one report run
[UPDATE]: When adding report kinds or output modes
*/

use anyhow::Context;
use mexc_contract_adapter::MexcClient;
use std::io::Write;
use tracing::info;

use crate::cli::Cli;
use crate::config::ReportConfig;
use crate::report::{self, JsonReport};

/// Fetch what the command asks for and write the report to `out`.
///
/// Fetch failures propagate with the adapter error intact for the caller to log.
pub async fn run_report<W: Write>(
    cli: &Cli,
    config: &ReportConfig,
    client: &MexcClient,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut json = JsonReport::default();

    if cli.wants_positions() {
        let mut query = config.position_query();
        let window = query.pin_window(now_ms());
        if !cli.json {
            writeln!(out, "{}", report::render_window("positions", &window))?;
        }
        let positions = client
            .position_history(&query)
            .await
            .context("fetch position history")?;
        info!(count = positions.len(), "positions fetched");

        if cli.json {
            json = json.with_positions(positions);
        } else {
            write!(out, "{}", report::render_positions_report(&positions))?;
        }
    }

    if cli.wants_orders() {
        let mut query = config.order_query();
        let window = query.pin_window(now_ms());
        if !cli.json {
            writeln!(out, "\n{}", report::render_window("orders", &window))?;
        }
        let orders = client
            .order_history(&query)
            .await
            .context("fetch order history")?;
        info!(count = orders.len(), "orders fetched");

        if cli.json {
            json = json.with_orders(orders);
        } else {
            write!(out, "{}", report::render_orders_report(&orders))?;
        }
    }

    if cli.json {
        writeln!(out, "{}", json.to_pretty_json()?)?;
    }
    out.flush()?;
    Ok(())
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
