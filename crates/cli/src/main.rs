mod args;
mod render;

use anyhow::{bail, Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crypto_dash_core::models::settings::Settings;
use crypto_dash_core::services::fetch::FetchState;
use crypto_dash_core::CryptoDash;

use args::Command;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let command = args::parse(std::env::args().skip(1))?;
    if let Command::Help = command {
        println!("{}", args::USAGE);
        return Ok(());
    }

    let settings = Settings::from_env().context("invalid CRYPTO_DASH_* configuration")?;
    debug!(currency = %settings.vs_currency, api = %settings.api_base_url, "settings loaded");
    let dash = CryptoDash::new(settings)?;

    match command {
        Command::Markets {
            search,
            sort,
            filter,
            page,
        } => {
            let mut screen = dash.open_market().await;
            if let FetchState::Error(message) = screen.state() {
                bail!("Error Loading Data: {message} (run the command again to retry)");
            }
            let model = screen.model_mut();
            model.set_search(search);
            model.set_sort(sort);
            model.set_filter(filter);
            model.set_page(page);
            render::market(&mut screen);
        }
        Command::Coin { id, range } => {
            let screen = dash.open_coin_with_range(&id, range).await;
            if let FetchState::Error(message) = screen.detail() {
                bail!("Error Loading Coin: {message}");
            }
            render::coin(&screen);
        }
        Command::Watchlist => {
            let screen = dash.open_watchlist().await;
            if let FetchState::Error(message) = screen.state() {
                bail!("Error Loading Watchlist: {message}");
            }
            render::watchlist(&screen);
        }
        Command::Watch { id } => {
            let watched = dash.toggle_watch(&id)?;
            if watched {
                println!("★ {id} added to watchlist");
            } else {
                println!("☆ {id} removed from watchlist");
            }
        }
        // Printed before settings are loaded.
        Command::Help => {}
    }

    Ok(())
}
