use std::env::var;

#[derive(Clone)]
pub struct Config {
    pub default_list: String,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            default_list: var("DEFAULT_WATCHLIST").unwrap_or_else(|_| "default".to_string()),
            version: var("APP_VERSION").unwrap_or_else(|_| "Unknown".to_string()),
        }
    }
}
