use log::{info, warn};

use crate::forms;
use crate::{App, Error};

pub async fn run(app: &App, raw_query: &str) -> Result<(), Error> {
    let query = match forms::search_query(raw_query) {
        Ok(q) => q,
        Err(e) => {
            warn!("search: rejected raw_input={raw_query:?}");
            anyhow::bail!(e);
        }
    };

    info!("search: invoked query={query}");

    let results = app.client.search(&query).await?;
    if results.is_empty() {
        println!("No matches for \"{query}\".");
        return Ok(());
    }

    for hit in &results {
        println!(
            "{:<8} {:<32} {}",
            hit.symbol,
            hit.name,
            hit.exchange.as_deref().unwrap_or("-")
        );
    }

    info!("search: completed query={query} hits={}", results.len());
    Ok(())
}
