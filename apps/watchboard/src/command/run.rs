use std::sync::Arc;

use log::{debug, info};

use crate::dashboard::{Dashboard, render_row};
use crate::poller;
use crate::{App, Error};

/// Hosts the live price board until interrupted.
pub async fn run(app: &App) -> Result<(), Error> {
    let symbols = app.store.all_symbols().await?;
    info!("run: loaded symbols count={}", symbols.len());

    let board = Dashboard::new(&symbols);
    if board.tiles.is_empty() {
        println!("Watchlist is empty.");
        return Ok(());
    }

    for tooltip in &board.tooltips {
        debug!(
            "run: hint attached target={} text={:?}",
            tooltip.target, tooltip.text
        );
    }
    for popover in &board.popovers {
        debug!(
            "run: note attached target={} title={:?}",
            popover.target, popover.title
        );
    }

    let picker: Vec<String> = board
        .selector
        .periods()
        .iter()
        .map(|&p| {
            if board.selector.is_active(p) {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect();
    println!("Period: {}", picker.join(" "));

    for tile in &board.tiles {
        println!("{}", render_row(&tile.lock().unwrap()));
    }

    let tasks = poller::spawn(Arc::clone(&app.client), &board.tiles);
    info!("run: polling started tasks={}", tasks.len());

    wait_for_shutdown().await?;

    for task in tasks {
        task.abort();
    }
    info!("run: shutdown complete");

    Ok(())
}

/// Parks until the process is asked to stop.
async fn wait_for_shutdown() -> Result<(), Error> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut interrupt = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = terminate.recv() => info!("run: stop requested signal=SIGTERM"),
            _ = interrupt.recv() => info!("run: stop requested signal=SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("run: stop requested signal=ctrl-c");
    }

    Ok(())
}
