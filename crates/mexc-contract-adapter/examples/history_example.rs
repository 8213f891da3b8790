/*
[INPUT]:  MEXC_API_KEY / MEXC_API_SECRET environment variables
[OUTPUT]: Position and order history summaries printed to stdout
[POS]:    Examples - authenticated history queries
[UPDATE]: When history endpoints or summary fields change
*/

use mexc_contract_adapter::*;

/// Example: fetch the last 90 days of BTC_USDT positions and completed orders
#[tokio::main]
async fn main() {
    println!("=== MEXC Contract History Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let client = match MexcClient::new() {
        Ok(c) => c.with_credentials(credentials),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let positions = PositionHistoryQuery {
        symbol: Some("BTC_USDT".to_string()),
        ..Default::default()
    };
    println!("Fetching position history...");
    match client.position_history(&positions).await {
        Ok(records) => {
            let summary = PositionSummary::from_positions(&records);
            println!("✓ {} positions, P&L {} USDT", summary.total_positions, summary.total_pnl);
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    let orders = OrderHistoryQuery {
        states: vec![OrderState::Completed, OrderState::Cancelled],
        ..Default::default()
    };
    println!("\nFetching order history...");
    match client.order_history(&orders).await {
        Ok(records) => {
            let summary = OrderSummary::from_orders(&records);
            println!(
                "✓ {} orders, profit {} USDT, fees {} USDT",
                summary.total_orders, summary.total_profit, summary.total_fees
            );
        }
        Err(e) => println!("✗ Error: {}", e),
    }
}
