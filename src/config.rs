use std::env;

use tracing::warn;

/// Fallback used when `BOT_SECRET` is not set.
pub const DEFAULT_BOT_SECRET: &str = "change_this_bot_secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the JSON document holding all daily state.
    pub data_file: String,
    /// Shared secret the chat bot sends with every mutating request.
    pub bot_secret: String,
    pub public_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_secret = match env::var("BOT_SECRET").ok().filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("BOT_SECRET not set, falling back to the built-in default secret");
                DEFAULT_BOT_SECRET.into()
            }
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".into())
                .parse()?,
            data_file: data_file_from_env(),
            bot_secret,
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()),
        })
    }
}

pub fn data_file_from_env() -> String {
    env::var("DATA_FILE").unwrap_or_else(|_| "data/daily.json".into())
}
