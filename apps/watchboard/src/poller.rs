use std::sync::Arc;
use std::time::Duration;

use market::PriceClient;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn};
use tracing_futures::Instrument;

use crate::dashboard::{SharedTile, render_row};

/// Fixed refresh cadence for the price board.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Spawns one refresh loop per tile, each owning its symbol's cadence.
/// A tile's requests run back to back, so responses for a symbol can
/// never land out of order.
pub fn spawn(client: Arc<PriceClient>, tiles: &[SharedTile]) -> Vec<JoinHandle<()>> {
    tiles
        .iter()
        .map(|tile| {
            let client = Arc::clone(&client);
            let tile = Arc::clone(tile);
            let symbol = tile.lock().unwrap().symbol.clone();
            let span = info_span!("price_refresh", symbol = %symbol);

            tokio::spawn(
                async move {
                    let mut tick = tokio::time::interval(REFRESH_PERIOD);
                    // The first interval tick resolves immediately; the
                    // board refreshes one full period after startup.
                    tick.tick().await;

                    loop {
                        tick.tick().await;
                        refresh_tile(&client, &tile, &symbol).await;
                    }
                }
                .instrument(span),
            )
        })
        .collect()
}

async fn refresh_tile(client: &PriceClient, tile: &SharedTile, symbol: &str) {
    match client.fetch_history(symbol, None).await {
        Ok(history) => {
            let Some(close) = history.latest_close() else {
                debug!("refresh returned no rows");
                return;
            };

            let row = {
                let mut tile = tile.lock().unwrap();
                tile.apply_close(close);
                render_row(&tile)
            };

            info!(close, "price refreshed");
            println!("{row}");
        }
        Err(e) => {
            // The stale price stays on the board until the next tick.
            warn!(error = ?e, "price refresh failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;

    #[tokio::test]
    async fn nothing_is_spawned_for_an_empty_board() {
        let client = Arc::new(PriceClient::new("http://127.0.0.1:1"));
        let board = Dashboard::new(&[]);

        assert!(spawn(client, &board.tiles).is_empty());
    }

    #[tokio::test]
    async fn one_task_runs_per_tile() {
        let client = Arc::new(PriceClient::new("http://127.0.0.1:1"));
        let board = Dashboard::new(&["AAPL".to_string(), "MSFT".to_string()]);

        let tasks = spawn(client, &board.tiles);
        assert_eq!(tasks.len(), 2);

        for task in tasks {
            task.abort();
        }
    }
}
