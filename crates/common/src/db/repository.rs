//! Repository pattern for database operations
//!
//! Serves the paper corpus out of the `papers` table.

use crate::corpus::CorpusSource;
use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::models::PaperRecord;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{debug, info};

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Paper Operations
    // ========================================================================

    /// Load every paper, ordered by id so node order is stable between fetches
    pub async fn list_all_papers(&self) -> Result<Vec<Paper>> {
        PaperEntity::find()
            .order_by_asc(PaperColumn::Id)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl CorpusSource for Repository {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn fetch_corpus(&self) -> Result<Vec<PaperRecord>> {
        let papers = self
            .list_all_papers()
            .await
            .map_err(|e| AppError::corpus_unavailable(self.name(), e.to_string()))?;

        info!(papers = papers.len(), "Fetched corpus from database");

        let records: Vec<PaperRecord> = papers.into_iter().map(PaperRecord::from).collect();
        debug!(
            references = records.iter().map(|r| r.references.len()).sum::<usize>(),
            "Corpus reference total"
        );

        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        Repository::ping(self).await
    }
}
