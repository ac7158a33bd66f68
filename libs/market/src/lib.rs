mod price_client;
mod watchlist_store;

pub mod indicators;

pub use price_client::{
    Candle, CompanyInfo, ParsePeriodError, Period, PriceClient, PriceError, SearchResult,
    StockHistory,
};
pub use watchlist_store::WatchlistStore;
