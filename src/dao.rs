use anyhow::Result;
use sqlx::{AnyConnection, AnyPool};

use crate::types::{ChartEntry, Hot100Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The `(song, artist)` pair is already stored.
    Duplicate,
}

/// Insert one pair on an open connection (normally the per-file transaction).
/// A uniqueness violation is reported as [`InsertOutcome::Duplicate`]; every other
/// database fault is returned as-is.
pub async fn insert_entry(
    conn: &mut AnyConnection,
    entry: &ChartEntry,
) -> std::result::Result<InsertOutcome, sqlx::Error> {
    let res = sqlx::query("INSERT INTO hot100 (song, artist) VALUES (?, ?)")
        .bind(&entry.song)
        .bind(&entry.artist)
        .execute(&mut *conn)
        .await;
    match res {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e),
    }
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// All stored pairs, ordered by artist then song under the database collation.
pub async fn list_rows(pool: &AnyPool) -> Result<Vec<Hot100Row>> {
    let rows = sqlx::query_as::<_, (Option<String>, Option<String>)>(
        "SELECT artist, song FROM hot100 ORDER BY artist, song",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(artist, song)| Hot100Row { artist, song })
        .collect())
}

pub async fn count_rows(pool: &AnyPool) -> Result<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hot100")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
