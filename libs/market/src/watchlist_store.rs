use std::collections::HashMap;
use std::time::Duration;

use anyhow::Error;
use chrono::Utc;
use fred::prelude::*;
use tracing::error;

/// Redis-backed storage for named watchlists and account profiles.
#[derive(Clone)]
pub struct WatchlistStore {
    client: Client,
    key_prefix: String,
}

impl WatchlistStore {
    pub async fn new(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self, Error> {
        let config = Config::from_url(redis_url)?;

        let client = Builder::from_config(config)
            .with_connection_config(|config| {
                config.connection_timeout = Duration::from_secs(5);
                config.tcp = TcpConfig {
                    nodelay: Some(true),
                    ..Default::default()
                };
            })
            .build()?;

        client.on_error(|(error, server)| async move {
            error!("{:?}: Redis connection error: {:?}", server, error);
            Ok(())
        });

        client.connect();
        client.wait_for_connect().await?;

        Ok(Self {
            client,
            key_prefix: key_prefix.into(),
        })
    }

    /// Create a new WatchlistStore from environment variables.
    /// Expects REDIS_URL and REDIS_KEY_PREFIX to be set.
    pub async fn from_env() -> Result<Self, Error> {
        use std::env;

        let redis_url = env::var("REDIS_URL")
            .map_err(|_| Error::msg("REDIS_URL environment variable not set"))?;
        let key_prefix = env::var("REDIS_KEY_PREFIX")
            .map_err(|_| Error::msg("REDIS_KEY_PREFIX environment variable not set"))?;

        Self::new(&redis_url, key_prefix).await
    }

    fn normalize(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }

    fn lists_key(&self) -> String {
        format!("{}:watchlists", self.key_prefix)
    }

    fn symbols_key(&self, list: &str) -> String {
        format!("{}:watchlist:{}", self.key_prefix, list.trim())
    }

    fn user_key(&self, username: &str) -> String {
        format!("{}:user:{}", self.key_prefix, username.trim())
    }

    /// Register a watchlist name.
    /// Returns true if it was newly created.
    pub async fn create_list(&self, name: &str) -> Result<bool, Error> {
        let created: i64 = self.client.sadd(self.lists_key(), name.trim()).await?;
        Ok(created == 1)
    }

    /// Drop a watchlist together with every symbol on it.
    /// Returns true if it existed.
    pub async fn delete_list(&self, name: &str) -> Result<bool, Error> {
        let removed: i64 = self.client.srem(self.lists_key(), name.trim()).await?;
        let _: i64 = self.client.del(self.symbols_key(name)).await?;

        Ok(removed == 1)
    }

    /// All known watchlist names.
    pub async fn lists(&self) -> Result<Vec<String>, Error> {
        self.client
            .smembers(self.lists_key())
            .await
            .map_err(Error::from)
    }

    /// Add a stock symbol to a watchlist, registering the list on first use.
    /// Returns true if it was newly added.
    pub async fn add(&self, list: &str, symbol: &str) -> Result<bool, Error> {
        let _: i64 = self.client.sadd(self.lists_key(), list.trim()).await?;

        let added: i64 = self
            .client
            .sadd(self.symbols_key(list), Self::normalize(symbol))
            .await?;

        Ok(added == 1)
    }

    /// Remove a stock symbol from a watchlist.
    /// Returns true if it existed.
    pub async fn remove(&self, list: &str, symbol: &str) -> Result<bool, Error> {
        let removed: i64 = self
            .client
            .srem(self.symbols_key(list), Self::normalize(symbol))
            .await?;

        Ok(removed == 1)
    }

    /// Symbols tracked by one watchlist.
    pub async fn symbols(&self, list: &str) -> Result<Vec<String>, Error> {
        self.client
            .smembers(self.symbols_key(list))
            .await
            .map_err(Error::from)
    }

    /// Every symbol tracked by any watchlist, deduplicated.
    pub async fn all_symbols(&self) -> Result<Vec<String>, Error> {
        let lists = self.lists().await?;
        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = lists.iter().map(|l| self.symbols_key(l)).collect();
        self.client.sunion(keys).await.map_err(Error::from)
    }

    /// Number of symbols on a watchlist.
    pub async fn len(&self, list: &str) -> Result<usize, Error> {
        let count: i64 = self.client.scard(self.symbols_key(list)).await?;
        Ok(count as usize)
    }

    /// Returns true if the watchlist tracks nothing.
    pub async fn is_empty(&self, list: &str) -> Result<bool, Error> {
        Ok(self.len(list).await? == 0)
    }

    /// Store an account profile. The password never reaches the store.
    /// Returns false when the username is already taken.
    pub async fn register_user(&self, username: &str, email: &str) -> Result<bool, Error> {
        let key = self.user_key(username);

        let taken: i64 = self.client.exists(key.clone()).await?;
        if taken == 1 {
            return Ok(false);
        }

        let mut profile = HashMap::new();
        profile.insert("email".to_string(), email.trim().to_string());
        profile.insert("created_at".to_string(), Utc::now().to_rfc3339());

        let _: i64 = self.client.hset(key, profile).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_trimmed_and_uppercased() {
        assert_eq!(WatchlistStore::normalize(" tsla "), "TSLA");
        assert_eq!(WatchlistStore::normalize("MSFT"), "MSFT");
    }
}
