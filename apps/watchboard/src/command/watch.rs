use log::{debug, info, warn};
use market::Period;

use crate::forms;
use crate::{App, Error};

/// Add symbols to a watchlist, verifying each against the quote service
/// before it is stored.
pub async fn add(app: &App, list: &str, symbols_input: &str) -> Result<(), Error> {
    let symbols = match forms::symbol_list(symbols_input) {
        Ok(s) => s,
        Err(e) => {
            warn!("watch: no valid symbols raw_input={symbols_input:?}");
            anyhow::bail!(e);
        }
    };

    info!(
        "watch: parsed symbols count={} symbols=[{}]",
        symbols.len(),
        symbols.join(", ")
    );

    let mut added: Vec<String> = Vec::new();
    let mut already: Vec<String> = Vec::new();

    for symbol in symbols {
        match app.client.fetch_history(&symbol, Some(Period::Day1)).await {
            Ok(history) if history.latest_close().is_some() => {}
            Ok(_) => {
                warn!("watch: no data for symbol={symbol}");
                println!("Invalid stock symbol: {symbol}");
                continue;
            }
            Err(e) => {
                warn!("watch: verification failed symbol={symbol} err={e:?}");
                println!("Invalid stock symbol: {symbol}");
                continue;
            }
        }

        match app.store.add(list, &symbol).await {
            Ok(true) => {
                debug!("watch: added list={list} symbol={symbol}");
                added.push(symbol);
            }
            Ok(false) => {
                debug!("watch: already watched list={list} symbol={symbol}");
                already.push(symbol);
            }
            Err(e) => {
                warn!("watch: store.add failed list={list} symbol={symbol} err={e:?}");
                return Err(e);
            }
        }
    }

    info!(
        "watch: completed list={list} added_count={} already_count={} total={}",
        added.len(),
        already.len(),
        app.store.len(list).await?
    );

    if !added.is_empty() {
        println!("Now watching: {}", added.join(", "));
    }
    if !already.is_empty() {
        println!("Already watching: {}", already.join(", "));
    }

    Ok(())
}

/// Drop one symbol from a watchlist, after a blocking confirmation.
pub async fn remove(app: &App, list: &str, symbol: &str, assume_yes: bool) -> Result<(), Error> {
    info!("remove: invoked list={list} symbol={symbol}");

    if !assume_yes
        && !forms::confirm("Are you sure you want to remove this stock from your watchlist?")?
    {
        info!("remove: cancelled list={list} symbol={symbol}");
        println!("Cancelled.");
        return Ok(());
    }

    if app.store.remove(list, symbol).await? {
        info!("remove: completed list={list} symbol={symbol}");
        println!("Stock removed from watchlist.");
    } else {
        println!("Stock not found in watchlist.");
    }

    Ok(())
}
