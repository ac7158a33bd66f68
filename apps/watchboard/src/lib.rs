use std::sync::Arc;

use market::{PriceClient, WatchlistStore};

pub mod command;
pub mod config;
pub mod dashboard;
pub mod forms;
pub mod poller;

pub struct App {
    pub store: Arc<WatchlistStore>,
    pub client: Arc<PriceClient>,
    pub config: config::Config,
}

pub type Error = anyhow::Error;
