use anyhow::{Context, Result};
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyPool, ConnectOptions};
use std::str::FromStr;
use std::sync::Once;

use crate::dao;
use crate::storage::RowSource;
use crate::types::Hot100Row;

// Ensure drivers are installed exactly once for sqlx::any
static INSTALL_DRIVERS: Once = Once::new();

/// Portable DDL for the `hot100` relation (MySQL and SQLite both accept it).
pub const CREATE_HOT100: &str = "CREATE TABLE IF NOT EXISTS hot100 (\n    song VARCHAR(255),\n    artist VARCHAR(255),\n    UNIQUE (song, artist)\n)";

pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Register compiled-in drivers for sqlx::any
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let opts = AnyConnectOptions::from_str(database_url)
            .context("invalid database URL")?;
        // Quiet by default; statements are logged by the callers at debug level
        let opts = opts.disable_statement_logging();

        // Both tools are strictly sequential; one connection is all they ever use.
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .context("opening connection pool")?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &AnyPool { &self.pool }

    /// Create the `hot100` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_HOT100)
            .execute(&self.pool)
            .await
            .context("creating hot100 table")?;
        Ok(())
    }

    /// Close every connection in the pool. Safe to call on any exit path.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl RowSource for Database {
    async fn fetch_rows(&self) -> Result<Vec<Hot100Row>> {
        dao::list_rows(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_error_does_not_repeat_the_caller_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", tmp.path().join("missing").join("x.db").display());
        let err = Database::connect(&url).await.err().unwrap();
        let shown = format!("{err:#}");
        assert!(shown.starts_with("opening connection pool"), "{shown}");
        assert!(!shown.to_lowercase().contains("error connecting"), "{shown}");
    }
}
