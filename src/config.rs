use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Process-wide configuration, resolved once on first access.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| match Config::load() {
    Ok(cfg) => cfg,
    Err(e) => {
        eprintln!("invalid configuration: {e}");
        std::process::exit(1);
    }
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    /// Keys the private cookie jar; must supply at least 32 bytes.
    pub session_secret: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            database_url: "sqlite:shelfmark.sqlite".to_string(),
            session_secret: "insecure-dev-secret-change-me-0123456789abcdef".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `SHELF_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("SHELF_"))
            .extract()
    }
}
