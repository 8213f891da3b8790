/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed CLI and configuration with flag overrides applied
[POS]:    CLI layer - argument definitions
[UPDATE]: When changing CLI flags or subcommands
*/

use clap::{Args, Parser, Subcommand};
use mexc_contract_adapter::{OrderCategory, OrderSide, OrderState, PositionType};
use std::path::PathBuf;

use crate::config::ReportConfig;

#[derive(Parser, Debug)]
#[command(name = "mexc-history", version, about = "MEXC futures position and order history report")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,
    /// Validate configuration and exit without calling the API
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    /// Print records and summary as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Override the API host
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<u32>,
    #[arg(long = "days", value_name = "DAYS", global = true)]
    pub lookback_days: Option<i64>,
    #[arg(long = "page-delay-ms", value_name = "MS", global = true)]
    pub page_delay_ms: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Closed position history with realized P&L
    Positions(PositionArgs),
    /// Order history with profit and fees
    Orders(OrderArgs),
    /// Positions followed by orders
    All,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionArgs {
    #[arg(long)]
    pub symbol: Option<String>,
    /// `long`, `short`, or the numeric code
    #[arg(long = "type", value_name = "TYPE")]
    pub position_type: Option<PositionType>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderArgs {
    #[arg(long)]
    pub symbol: Option<String>,
    /// Comma-separated states, e.g. `3,4` or `completed,cancelled`
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<OrderState>,
    #[arg(long)]
    pub category: Option<OrderCategory>,
    #[arg(long)]
    pub side: Option<OrderSide>,
}

impl Cli {
    /// Layer command-line flags over the file (or default) configuration
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(days) = self.lookback_days {
            config.lookback_days = days;
        }
        if let Some(delay) = self.page_delay_ms {
            config.page_delay_ms = delay;
        }

        match &self.command {
            Command::Positions(args) => {
                if args.symbol.is_some() {
                    config.positions.symbol = args.symbol.clone();
                }
                if args.position_type.is_some() {
                    config.positions.position_type = args.position_type;
                }
            }
            Command::Orders(args) => {
                if args.symbol.is_some() {
                    config.orders.symbol = args.symbol.clone();
                }
                if !args.states.is_empty() {
                    config.orders.states = args.states.clone();
                }
                if args.category.is_some() {
                    config.orders.category = args.category;
                }
                if args.side.is_some() {
                    config.orders.side = args.side;
                }
            }
            Command::All => {}
        }
    }

    pub fn wants_positions(&self) -> bool {
        matches!(self.command, Command::Positions(_) | Command::All)
    }

    pub fn wants_orders(&self) -> bool {
        matches!(self.command, Command::Orders(_) | Command::All)
    }
}
