/*
[INPUT]:  CLI arguments, optional YAML configuration file, MEXC_API_KEY / MEXC_API_SECRET
[OUTPUT]: Position/order history report on stdout, structured logs on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or error reporting
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mexc_contract_adapter::{Credentials, EnvPresence, MexcClient, MexcError};
use mexc_history_report::{Cli, ReportConfig, run_report};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = init_tracing(&args.log_level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    info!(command = ?args.command, dry_run = args.dry_run, "starting mexc-history");

    let presence = EnvPresence::from_env();
    let describe = |present: bool| if present { "present" } else { "missing" };
    info!(
        api_key = describe(presence.api_key),
        api_secret = describe(presence.api_secret),
        "credential check"
    );

    let config = load_config(&args)?;
    info!(
        base_url = %config.base_url,
        page_size = config.page_size,
        lookback_days = config.lookback_days,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let mut client = MexcClient::with_base_url(config.client_config(), &config.base_url)
        .context("build http client")?;
    match Credentials::from_env() {
        Ok(credentials) => client.set_credentials(credentials),
        Err(err) => warn!(error = %err, "continuing without credentials"),
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_report(&args, &config, &client, &mut out).await
}

fn load_config(args: &Cli) -> Result<ReportConfig> {
    let mut config = match &args.config_path {
        Some(path) => ReportConfig::from_file(path).context("load config")?,
        None => ReportConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("validate config")?;
    Ok(config)
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn log_failure(err: &anyhow::Error) {
    match err.downcast_ref::<MexcError>() {
        Some(api) => error!(
            error = %format!("{err:#}"),
            status = ?api.status(),
            response = ?api.response_body(),
            headers = ?api.response_headers(),
            "failed to fetch history"
        ),
        None => error!(error = %format!("{err:#}"), "failed to fetch history"),
    }
}
