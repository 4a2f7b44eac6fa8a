use anyhow::Result;
use async_trait::async_trait;

use crate::types::Hot100Row;

/// Where the exporter reads stored pairs from. Rows come back ordered by artist, then song.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Hot100Row>>;
}

/// Fixed rows held in memory, already in export order.
#[derive(Debug, Clone, Default)]
pub struct StaticRows(pub Vec<Hot100Row>);

#[async_trait]
impl RowSource for StaticRows {
    async fn fetch_rows(&self) -> Result<Vec<Hot100Row>> {
        Ok(self.0.clone())
    }
}
