pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::convert::{parse_amount, quote};
use crate::core::rates::{RateSnapshotProvider, normalize_code};
use crate::core::state::LoadState;
use anyhow::{Result, anyhow};
use std::time::Duration;
use tracing::{debug, info};

/// Commands that need a rate snapshot.
pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rate {
        from: String,
        to: String,
    },
    List,
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::exchange_rate_api::ExchangeRateApiProvider::new(
        &config.provider.base_url,
        &config.api_key,
        Duration::from_secs(config.timeout_secs),
    );

    let state = load_snapshot(&provider, &config.base_currency).await;

    if let AppCommand::Interactive = command {
        return cli::interactive::run_session(state, &config.base_currency);
    }

    // One-shot commands surface a failed load as a single error message.
    let table = state.table().ok_or_else(|| {
        anyhow!(
            "Failed to load exchange rates: {}",
            state.error().unwrap_or("fetch did not complete")
        )
    })?;

    match command {
        AppCommand::Convert { amount, from, to } => {
            let from = normalize_code(&from);
            let to = normalize_code(&to);
            let input = parse_amount(&amount)?;
            let q = quote(table, &from, &to, input)?;
            println!("{}", cli::convert::render(&from, &to, &q));
        }
        AppCommand::Rate { from, to } => {
            let from = normalize_code(&from);
            let to = normalize_code(&to);
            let rate = table.cross_rate(&from, &to)?;
            println!("{}", cli::convert::rate_line(&from, &to, rate));
        }
        AppCommand::List => {
            println!("{}", cli::list::render(table));
        }
        AppCommand::Interactive => unreachable!("handled above"),
    }

    Ok(())
}

/// Performs the single startup fetch and resolves the load state.
async fn load_snapshot(provider: &dyn RateSnapshotProvider, base: &str) -> LoadState {
    let mut state = LoadState::new();
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let outcome = provider.fetch_latest(base).await;
    spinner.finish_and_clear();
    state.resolve(outcome);
    state
}
