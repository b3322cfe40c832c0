//! # Server settings
//!
//! Layered configuration built with the `config` crate. Later sources win:
//!
//! 1. built-in defaults (see [`Settings::builder`])
//! 2. an optional `config.toml` in the working directory
//! 3. `TODO__SECTION__KEY` environment variables (e.g. `TODO__STORE__BACKEND=memory`)
//! 4. the historical variable names `SESSION_KEY`, `GOOGLE_CLIENT_ID` and `GOOGLE_SECRET_KEY`
//!
//! Empty secrets are accepted; they only make login or session signing unusable.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub addr: String,
}

/// Which item store to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub backend: StoreBackend,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub key: String,
    pub secure: bool,
}

#[derive(Debug, Deserialize)]
pub struct Google {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Provider {
    pub timeout_secs: u64,
}

impl Provider {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub store: Store,
    pub session: Session,
    pub google: Google,
    pub provider: Provider,
}

impl Settings {
    /// Load settings from defaults, `config.toml` and the environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("TODO").prefix_separator("__").separator("__"))
            .set_override_option("session.key", env::var("SESSION_KEY").ok())?
            .set_override_option("google.client_id", env::var("GOOGLE_CLIENT_ID").ok())?
            .set_override_option("google.client_secret", env::var("GOOGLE_SECRET_KEY").ok())?
            .build()?
            .try_deserialize()
    }

    /// Load settings from defaults overlaid with a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.addr", "127.0.0.1:3000")?
            .set_default("store.backend", "sqlite")?
            .set_default("store.path", "./todo.db")?
            .set_default("session.key", "")?
            .set_default("session.secure", false)?
            .set_default("google.client_id", "")?
            .set_default("google.client_secret", "")?
            .set_default(
                "google.redirect_url",
                "http://localhost:3000/auth/google/callback",
            )?
            .set_default("provider.timeout_secs", 10)
    }
}
