use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::debug;

use crate::domain::{Classification, HeadlineRecord, NewHeadline};
use crate::error::{LabelerError, map_sqlx_error};
use crate::port::HeadlineStore;

/// Rows flushed per batch during a bulk insert. Large CSV uploads are
/// chunked at this granularity inside a single transaction.
pub const INSERT_BATCH_SIZE: usize = 1000;

const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS headlines (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        identifier TEXT NOT NULL UNIQUE,
        headline TEXT NOT NULL,
        name TEXT NOT NULL,
        sentiment TEXT,
        category TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_headlines_sentiment ON headlines (sentiment)",
    "CREATE INDEX IF NOT EXISTS idx_headlines_category ON headlines (category)",
];

/// Row shape returned by the headlines table.
#[derive(sqlx::FromRow)]
struct HeadlineRow {
    id: i64,
    identifier: String,
    headline: String,
    name: String,
    sentiment: Option<String>,
    category: Option<String>,
}

impl From<HeadlineRow> for HeadlineRecord {
    fn from(row: HeadlineRow) -> Self {
        Self {
            id: row.id,
            identifier: row.identifier,
            headline: row.headline,
            name: row.name,
            sentiment: row.sentiment,
            category: row.category,
        }
    }
}

/// SQLite-backed implementation of `HeadlineStore`.
pub struct SqliteHeadlineStore {
    pool: SqlitePool,
}

impl SqliteHeadlineStore {
    /// Connect to the database at `database_url`, creating the file and the
    /// schema on first run.
    pub async fn connect(database_url: &str) -> Result<Self, LabelerError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(map_sqlx_error)?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl HeadlineStore for SqliteHeadlineStore {
    async fn insert_many(&self, records: Vec<NewHeadline>) -> Result<u64, LabelerError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let mut inserted: u64 = 0;

        for batch in records.chunks(INSERT_BATCH_SIZE) {
            for record in batch {
                let result = sqlx::query(
                    "INSERT INTO headlines (identifier, headline, name) VALUES (?, ?, ?)",
                )
                .bind(&record.identifier)
                .bind(&record.headline)
                .bind(&record.name)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
                inserted += result.rows_affected();
            }
            debug!(
                batch_rows = batch.len(),
                total_rows = inserted,
                "Flushed insert batch"
            );
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(inserted)
    }

    async fn get_by_id(&self, id: i64) -> Result<HeadlineRecord, LabelerError> {
        let row = sqlx::query_as::<_, HeadlineRow>(
            "SELECT id, identifier, headline, name, sentiment, category
             FROM headlines WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(HeadlineRecord::from)
            .ok_or(LabelerError::NotFound(id))
    }

    async fn get_first_unclassified(&self) -> Result<Option<HeadlineRecord>, LabelerError> {
        let row = sqlx::query_as::<_, HeadlineRow>(
            "SELECT id, identifier, headline, name, sentiment, category
             FROM headlines WHERE sentiment IS NULL
             ORDER BY id ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(HeadlineRecord::from))
    }

    async fn get_page_after(
        &self,
        after_id: i64,
        limit: i64,
    ) -> Result<Vec<HeadlineRecord>, LabelerError> {
        let rows = sqlx::query_as::<_, HeadlineRow>(
            "SELECT id, identifier, headline, name, sentiment, category
             FROM headlines WHERE id > ?
             ORDER BY id ASC LIMIT ?",
        )
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(HeadlineRecord::from).collect())
    }

    async fn update_classification(
        &self,
        id: i64,
        classification: Option<Classification>,
    ) -> Result<(), LabelerError> {
        let (sentiment, category) = match &classification {
            Some(c) => (Some(c.sentiment.as_str()), Some(c.category.as_str())),
            None => (None, None),
        };

        let result = sqlx::query("UPDATE headlines SET sentiment = ?, category = ? WHERE id = ?")
            .bind(sentiment)
            .bind(category)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(LabelerError::NotFound(id));
        }
        Ok(())
    }
}
