use log::{info, warn};

use crate::forms;
use crate::{App, Error};

pub async fn create(app: &App, raw_name: &str) -> Result<(), Error> {
    let name = match forms::list_name(raw_name) {
        Ok(n) => n,
        Err(e) => {
            warn!("watchlist: rejected name raw_input={raw_name:?}");
            anyhow::bail!(e);
        }
    };

    if app.store.create_list(&name).await? {
        info!("watchlist: created name={name}");
        println!("Watchlist created successfully!");
    } else {
        println!("Watchlist {name} already exists.");
    }

    Ok(())
}

/// Delete a whole watchlist, after a blocking confirmation.
pub async fn delete(app: &App, name: &str, assume_yes: bool) -> Result<(), Error> {
    info!("watchlist: delete invoked name={name}");

    if !assume_yes && !forms::confirm("Are you sure you want to delete this watchlist?")? {
        info!("watchlist: delete cancelled name={name}");
        println!("Cancelled.");
        return Ok(());
    }

    if app.store.delete_list(name).await? {
        info!("watchlist: deleted name={name}");
        println!("Watchlist deleted.");
    } else {
        println!("Watchlist not found.");
    }

    Ok(())
}

pub async fn show(app: &App) -> Result<(), Error> {
    let lists = app.store.lists().await?;
    if lists.is_empty() {
        println!("No watchlists yet.");
        return Ok(());
    }

    for list in lists {
        let symbols = app.store.symbols(&list).await?;
        if symbols.is_empty() {
            println!("{list}: (empty)");
        } else {
            println!("{list}: {}", symbols.join(", "));
        }
    }

    Ok(())
}
