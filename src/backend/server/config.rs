/**
 * Server Configuration
 *
 * This module handles loading of server configuration from the environment
 * and opening the SQLite database.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - SQLite URL (default: `eventboard.db` in the platform
 *   data directory)
 * - `SERVER_PORT` - listen port (default: 3000)
 * - `JWT_SECRET` - token signing secret (a development secret is used, with
 *   a warning, when unset)
 * - `TOKEN_TTL_DAYS` - bearer token lifetime (default: 30)
 * - `BCRYPT_COST` - password hashing cost (default: bcrypt's default)
 */

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;
const DEV_JWT_SECRET: &str = "eventboard-development-secret";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Read the configuration from environment variables
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_days = std::env::var("TOKEN_TTL_DAYS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_DAYS);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        Self {
            database_url,
            port,
            jwt_secret,
            token_ttl_days,
            bcrypt_cost,
        }
    }

    /// Configuration around an explicit database, used by tests.
    /// Hashing uses the cheapest bcrypt cost.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            bcrypt_cost: 4, // bcrypt's minimum cost (its MIN_COST is private)
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventboard")
        .join("eventboard.db")
}

fn default_database_url() -> String {
    let path = default_database_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("Could not create data directory {}: {}", parent.display(), e);
        }
    }
    format!("sqlite://{}", path.display())
}

/// Open the SQLite database and create the tables if needed
///
/// In-memory databases are limited to a single connection that never
/// expires, since every SQLite connection gets its own in-memory database.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::raw_sql(include_str!("schema.sql")).execute(&pool).await?;
    tracing::info!("Database schema ready");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_in_memory_database() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        sqlx::raw_sql(include_str!("schema.sql"))
            .execute(&pool)
            .await
            .unwrap();
    }

    #[test]
    fn test_default_database_url_is_sqlite() {
        assert!(default_database_url().starts_with("sqlite://"));
    }
}
