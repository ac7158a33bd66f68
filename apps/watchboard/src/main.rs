use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use market::{Period, PriceClient, WatchlistStore};
use watchboard::{App, command, config::Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock watchlist price board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host the price board, refreshing every watched symbol each minute
    Run,
    /// Search for stocks by name or symbol
    Search {
        /// Free-text query
        query: String,
    },
    /// Compare the latest close of several symbols side by side
    Compare {
        /// Ticker symbol(s), comma-separated (e.g., TSLA,MSFT)
        symbols: String,
        /// Time range to compare over
        #[arg(long)]
        period: Option<Period>,
    },
    /// Add ticker symbol(s) to a watchlist
    Watch {
        /// Ticker symbol(s), comma-separated (e.g., TSLA,MSFT)
        symbols: String,
        /// Watchlist to add to
        #[arg(long)]
        list: Option<String>,
    },
    /// Remove a symbol from a watchlist (asks first)
    Remove {
        symbol: String,
        /// Watchlist to remove from
        #[arg(long)]
        list: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Create a named watchlist
    Create { name: String },
    /// Delete a watchlist and everything on it (asks first)
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print every watchlist and its symbols
    Show,
    /// Refresh chart data for a symbol over a period
    Chart {
        symbol: String,
        /// Time range for the chart data
        #[arg(long, default_value = "1y")]
        period: Period,
    },
    /// Create an account profile
    Signup { username: String, email: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let store = Arc::new(
        WatchlistStore::from_env()
            .await
            .expect("init watchlist store failed"),
    );
    let client = Arc::new(PriceClient::from_env().expect("init price client failed"));

    let app = App {
        store,
        client,
        config,
    };
    info!("watchboard {} ready", app.config.version);

    match cli.command {
        Command::Run => command::run::run(&app).await,
        Command::Search { query } => command::search::run(&app, &query).await,
        Command::Compare { symbols, period } => {
            command::compare::run(&app, &symbols, period).await
        }
        Command::Watch { symbols, list } => {
            let list = list.unwrap_or_else(|| app.config.default_list.clone());
            command::watch::add(&app, &list, &symbols).await
        }
        Command::Remove { symbol, list, yes } => {
            let list = list.unwrap_or_else(|| app.config.default_list.clone());
            command::watch::remove(&app, &list, &symbol, yes).await
        }
        Command::Create { name } => command::watchlist::create(&app, &name).await,
        Command::Delete { name, yes } => command::watchlist::delete(&app, &name, yes).await,
        Command::Show => command::watchlist::show(&app).await,
        Command::Chart { symbol, period } => command::chart::run(&app, &symbol, period).await,
        Command::Signup { username, email } => {
            command::signup::run(&app, &username, &email).await
        }
    }
}
