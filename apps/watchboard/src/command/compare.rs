use std::sync::Arc;

use futures::{StreamExt, stream};
use log::{info, warn};
use market::Period;

use crate::forms;
use crate::{App, Error};

const CONCURRENCY: usize = 4;

pub async fn run(app: &App, symbols_input: &str, period: Option<Period>) -> Result<(), Error> {
    let symbols = match forms::symbol_list(symbols_input) {
        Ok(s) => s,
        Err(e) => {
            warn!("compare: rejected raw_input={symbols_input:?}");
            anyhow::bail!(e);
        }
    };

    info!(
        "compare: parsed symbols count={} symbols=[{}]",
        symbols.len(),
        symbols.join(", ")
    );

    let mut rows = stream::iter(symbols)
        .map(|symbol| {
            let client = Arc::clone(&app.client);
            async move {
                let fetched = client.fetch_history(&symbol, period).await;
                (symbol, fetched)
            }
        })
        .buffer_unordered(CONCURRENCY);

    println!(
        "{:<8} {:>10} {:>10}  {}",
        "Symbol", "Close", "Change", "Name"
    );

    while let Some((symbol, fetched)) = rows.next().await {
        match fetched {
            Ok(history) => {
                let name = history
                    .info
                    .as_ref()
                    .and_then(|i| i.short_name.clone())
                    .unwrap_or_else(|| format!("{symbol} Inc."));

                match (history.latest_close(), history.latest_change()) {
                    (Some(close), Some(change)) => {
                        println!("{symbol:<8} {close:>10.2} {change:>+10.2}  {name}");
                    }
                    _ => println!("{symbol:<8} {:>10} {:>10}  {name}", "--", "--"),
                }
            }
            Err(e) => {
                warn!("compare: fetch failed symbol={symbol} err={e:?}");
                println!("{symbol:<8} {:>10} {:>10}  -", "error", "--");
            }
        }
    }

    Ok(())
}
