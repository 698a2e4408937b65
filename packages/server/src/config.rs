use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Connection string used when neither `DATABASE_URL` nor a config file names
/// one. Points at the local docker-compose MySQL service and deliberately
/// carries no password.
pub const DEFAULT_DATABASE_URL: &str = "mysql://genred@localhost:3306/genred_english";

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Log every SQL statement through `tracing`.
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    /// Pool settings for `url` with the same defaults `AppConfig::load` applies.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 300,
            sqlx_logging: true,
        }
    }

    pub fn is_default_url(&self) -> bool {
        self.url == DEFAULT_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    fn builder(
        database_url: Option<String>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let db = DatabaseConfig::with_url(DEFAULT_DATABASE_URL);

        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", db.url)?
            .set_default("database.max_connections", db.max_connections)?
            .set_default("database.min_connections", db.min_connections)?
            .set_default("database.connect_timeout_secs", db.connect_timeout_secs)?
            .set_default("database.acquire_timeout_secs", db.acquire_timeout_secs)?
            .set_default("database.idle_timeout_secs", db.idle_timeout_secs)?
            .set_default("database.sqlx_logging", db.sqlx_logging)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GENRED__SERVER__PORT)
            .add_source(Environment::with_prefix("GENRED").separator("__"))
            // DATABASE_URL wins over everything else
            .set_override_option("database.url", database_url)
    }
}
