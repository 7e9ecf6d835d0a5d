use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub mongo_url: String,
    pub mongo_database: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("TIFFIN_PORT", "4000"),
            mongo_url: try_load("TIFFIN_MONGO_URL", "mongodb://localhost:27017"),
            mongo_database: try_load("TIFFIN_MONGO_DATABASE", "tiffin"),
            jwt_secret: try_load("TIFFIN_JWT_SECRET", "super-secret-key-change-in-production"),
            token_ttl_hours: try_load("TIFFIN_TOKEN_TTL_HOURS", "24"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
