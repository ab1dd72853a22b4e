use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{MutationOutcome, NewSummary, Summary, SummaryListing, SummaryUpdate};

use super::schema::SCHEMA;
use super::statement::UpdateStatement;

const SUMMARY_COLUMNS: &str = "id, object_type, object_id, model, model_version, lang, \
                               summary_text, confidence, created_by, created_at";

/// Owns the single connection to the summaries database.
///
/// Every mutating call runs in its own transaction. A failed statement rolls
/// back that transaction only and leaves the connection usable. Dropping the
/// repository releases the connection; `close` does the same but reports
/// errors from the shutdown.
pub struct SummaryRepository {
    conn: Connection,
}

impl SummaryRepository {
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let conn = Connection::open(&path).await?;
        tracing::info!(path = %path.display(), "Opened summaries database");
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        tracing::info!("Closed summaries database");
        Ok(())
    }

    pub async fn create(&self, summary: NewSummary) -> Result<i64> {
        let object_id = summary.object_id;
        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    r#"INSERT INTO summaries (object_type, object_id, model, model_version, lang, summary_text, confidence, created_by)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
                    params![
                        summary.object_type,
                        summary.object_id,
                        summary.model,
                        summary.model_version,
                        summary.lang,
                        summary.summary_text,
                        summary.confidence,
                        summary.created_by,
                    ],
                )?;
                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(id)
            })
            .await;

        match result {
            Ok(id) => {
                tracing::info!(summary_id = id, object_id, "Summary created");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(object_id, "Failed to create summary: {}", e);
                Err(e.into())
            }
        }
    }

    /// Lists every summary without its text, ordered by id.
    pub async fn list(&self) -> Result<Vec<SummaryListing>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, object_type, object_id, model, lang, confidence FROM summaries ORDER BY id",
                )?;
                let listings = stmt
                    .query_map([], listing_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(listings)
            })
            .await
            .map_err(|e| {
                tracing::error!("Failed to list summaries: {}", e);
                AppError::from(e)
            })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Summary>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM summaries WHERE id = ?1",
                    SUMMARY_COLUMNS
                ))?;
                let summary = stmt.query_row(params![id], summary_from_row).optional()?;
                Ok(summary)
            })
            .await
            .map_err(|e| {
                tracing::error!(summary_id = id, "Failed to read summary: {}", e);
                AppError::from(e)
            })
    }

    /// Replaces text and confidence, and the model version when one is given.
    pub async fn update(&self, id: i64, update: SummaryUpdate) -> Result<MutationOutcome> {
        let (sql, values) = UpdateStatement::new("summaries")
            .set("summary_text", update.summary_text)
            .set("confidence", update.confidence)
            .set_if_some("model_version", update.model_version)
            .build_where_id(id)?;

        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let rows = tx.execute(&sql, params_from_iter(values.iter()))?;
                tx.commit()?;
                Ok(rows)
            })
            .await;

        match result {
            Ok(rows) => {
                let outcome = MutationOutcome::from_rows_affected(rows);
                match outcome {
                    MutationOutcome::Applied => tracing::info!(summary_id = id, "Summary updated"),
                    MutationOutcome::NotFound => {
                        tracing::warn!(summary_id = id, "No summary to update")
                    }
                }
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(summary_id = id, "Failed to update summary: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<MutationOutcome> {
        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let rows = tx.execute("DELETE FROM summaries WHERE id = ?1", params![id])?;
                tx.commit()?;
                Ok(rows)
            })
            .await;

        match result {
            Ok(rows) => {
                let outcome = MutationOutcome::from_rows_affected(rows);
                match outcome {
                    MutationOutcome::Applied => tracing::info!(summary_id = id, "Summary deleted"),
                    MutationOutcome::NotFound => {
                        tracing::warn!(summary_id = id, "No summary to delete")
                    }
                }
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(summary_id = id, "Failed to delete summary: {}", e);
                Err(e.into())
            }
        }
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // SQLite datetime('now') format, e.g. "2026-01-11 12:34:56"
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

fn listing_from_row(row: &Row) -> rusqlite::Result<SummaryListing> {
    Ok(SummaryListing {
        id: row.get(0)?,
        object_type: row.get(1)?,
        object_id: row.get(2)?,
        model: row.get(3)?,
        lang: row.get(4)?,
        confidence: row.get(5)?,
    })
}

fn summary_from_row(row: &Row) -> rusqlite::Result<Summary> {
    let created_at: String = row.get(9)?;
    let created_at = parse_datetime(&created_at).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            Type::Text,
            format!("invalid created_at timestamp: {}", created_at).into(),
        )
    })?;

    Ok(Summary {
        id: row.get(0)?,
        object_type: row.get(1)?,
        object_id: row.get(2)?,
        model: row.get(3)?,
        model_version: row.get(4)?,
        lang: row.get(5)?,
        summary_text: row.get(6)?,
        confidence: row.get(7)?,
        created_by: row.get(8)?,
        created_at,
    })
}
