// src/core/database.rs
//! Saved-job pipeline storage backed by a single long-lived SQLite connection

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::FsOps;
use crate::job_search::JobSummary;

/// Stored in `link` at save time; real apply links need a details fetch.
pub const SAVED_LINK_PLACEHOLDER: &str = "#";

// ===== Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if absent) the database file and ensure the schema
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let db = Self::connect(&database_url).await.with_context(|| {
            format!("Failed to open database: {}", database_path.display())
        })?;

        info!("Database ready: {}", database_path.display());
        Ok(db)
    }

    /// Connect to any SQLite URL, `sqlite::memory:` included
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?;

        // Exactly one connection for the life of the process. Idle reaping is
        // off so an in-memory database keeps its contents.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the jobs table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                title TEXT,
                company TEXT,
                location TEXT,
                source TEXT,
                link TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create jobs table")?;

        debug!("Schema ensured");
        Ok(())
    }

    /// Release the connection. Further use of the pool fails.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}

// ===== Models =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedJob {
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
    pub link: String,
}

impl SavedJob {
    /// Build the row for a search result. Results without a provider id
    /// cannot be keyed and are rejected.
    pub fn from_summary(job: &JobSummary) -> Result<Self> {
        let id = match job.job_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => anyhow::bail!("Job has no identifier and cannot be saved"),
        };

        Ok(Self {
            id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            source: job.source.clone(),
            link: SAVED_LINK_PLACEHOLDER.to_string(),
        })
    }
}

/// One row of the saved pipeline as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PipelineEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
}

// ===== Job Repository =====

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the job unless its id is already stored
    pub async fn save_job(&self, job: &SavedJob) -> Result<SaveOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO jobs (id, title, company, location, source, link)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.source)
        .bind(&job.link)
        .execute(self.pool)
        .await
        .with_context(|| format!("Failed to save job {}", job.id))?;

        if result.rows_affected() == 0 {
            info!("Job {} already in pipeline", job.id);
            Ok(SaveOutcome::AlreadySaved)
        } else {
            info!("Saved job {} to pipeline", job.id);
            Ok(SaveOutcome::Saved)
        }
    }

    /// All saved jobs in insertion order
    pub async fn list_saved(&self) -> Result<Vec<PipelineEntry>> {
        let entries = sqlx::query_as::<_, PipelineEntry>(
            r#"
            SELECT title, company, location, source
            FROM jobs
            ORDER BY rowid
            "#,
        )
        .fetch_all(self.pool)
        .await
        .context("Failed to read saved jobs")?;

        Ok(entries)
    }

    pub async fn find(&self, id: &str) -> Result<Option<SavedJob>> {
        let job = sqlx::query_as::<_, SavedJob>(
            "SELECT id, title, company, location, source, link FROM jobs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(job)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: Option<&str>, title: &str) -> JobSummary {
        JobSummary {
            job_id: id.map(str::to_string),
            title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            location: Some("Remote".to_string()),
            source: Some("LinkedIn".to_string()),
        }
    }

    async fn memory_db() -> Database {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = memory_db().await;
        db.ensure_schema().await.unwrap();
        db.ensure_schema().await.unwrap();
        assert_eq!(JobRepository::new(db.pool()).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_save_keeps_one_row() {
        let db = memory_db().await;
        let repo = JobRepository::new(db.pool());
        let job = SavedJob::from_summary(&summary(Some("j1"), "Analyst")).unwrap();

        assert_eq!(repo.save_job(&job).await.unwrap(), SaveOutcome::Saved);
        assert_eq!(repo.save_job(&job).await.unwrap(), SaveOutcome::AlreadySaved);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_saved_in_insertion_order() {
        let db = memory_db().await;
        let repo = JobRepository::new(db.pool());

        for (id, title) in [("b", "Second"), ("a", "First"), ("b", "Second")] {
            let job = SavedJob::from_summary(&summary(Some(id), title)).unwrap();
            repo.save_job(&job).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list_saved()
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.title.unwrap())
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_saved_link_is_placeholder() {
        let db = memory_db().await;
        let repo = JobRepository::new(db.pool());
        let job = SavedJob::from_summary(&summary(Some("j9"), "Engineer")).unwrap();
        repo.save_job(&job).await.unwrap();

        let stored = repo.find("j9").await.unwrap().unwrap();
        assert_eq!(stored.link, "#");
        assert_eq!(stored.company.as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_missing_fields_stored_as_null() {
        let db = memory_db().await;
        let repo = JobRepository::new(db.pool());
        let job = SavedJob::from_summary(&JobSummary {
            job_id: Some("bare".to_string()),
            ..JobSummary::default()
        })
        .unwrap();
        repo.save_job(&job).await.unwrap();

        let entries = repo.list_saved().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].title.is_none());
        assert!(entries[0].source.is_none());
    }

    #[test]
    fn test_summary_without_id_is_rejected() {
        assert!(SavedJob::from_summary(&summary(None, "Analyst")).is_err());
        assert!(SavedJob::from_summary(&summary(Some("   "), "Analyst")).is_err());
    }
}
