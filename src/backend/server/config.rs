/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary before this runs), with defaults for local development.
 *
 * | Variable                  | Default                         |
 * |---------------------------|---------------------------------|
 * | `PORT`                    | `5000`                          |
 * | `JWT_SECRET`              | development secret, with warning|
 * | `DATABASE_URL`            | `sqlite://pulsechat.db?mode=rwc`|
 * | `ALLOWED_ORIGINS`         | `http://localhost:5173`         |
 * | `TOKEN_TTL_SECS`          | 7 days                          |
 * | `BCRYPT_COST`             | `bcrypt::DEFAULT_COST`          |
 * | `REALTIME_KEEPALIVE_SECS` | `15`                            |
 *
 * # Error Handling
 *
 * Unlike optional services, the database is required: a connection or
 * migration failure is a `StartupError` and the server does not start.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://pulsechat.db?mode=rwc";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

const DEV_JWT_SECRET: &str = "pulsechat-development-secret";

/// Errors that prevent the server from starting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Typed server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub keep_alive: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            keep_alive: DEFAULT_KEEP_ALIVE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// `StartupError::InvalidConfig` when a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        Ok(Self {
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
            jwt_secret,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            token_ttl: parse_var("TOKEN_TTL_SECS", get("TOKEN_TTL_SECS"))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.token_ttl),
            bcrypt_cost: parse_var("BCRYPT_COST", get("BCRYPT_COST"))?.unwrap_or(defaults.bcrypt_cost),
            keep_alive: parse_var("REALTIME_KEEPALIVE_SECS", get("REALTIME_KEEPALIVE_SECS"))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.keep_alive),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>, StartupError> {
    value
        .map(|v| {
            v.parse::<T>().map_err(|_| StartupError::InvalidConfig {
                key: key.to_string(),
                value: v.clone(),
            })
        })
        .transpose()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// Connect to SQLite and run migrations
///
/// An in-memory URL (`sqlite::memory:`) gets a single connection that is
/// never recycled, so every query sees the same database.
///
/// # Errors
///
/// `StartupError::Database` if the connection fails, `StartupError::Migration`
/// if the embedded migrations cannot be applied.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, StartupError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
