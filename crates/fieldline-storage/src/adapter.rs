// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the Store trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use fieldline_config::model::StorageConfig;
use fieldline_core::types::{Company, Job, JobLogEntry, LeadSource};
use fieldline_core::{FieldlineError, PhoneNumber, Store};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), FieldlineError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| FieldlineError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Checkpoint the WAL ahead of shutdown.
    pub async fn close(&self) -> Result<(), FieldlineError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FieldlineError> {
        self.db.get().ok_or_else(|| FieldlineError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn create_company(&self, company: &Company) -> Result<(), FieldlineError> {
        queries::companies::create_company(self.db()?, company).await
    }

    async fn list_companies_ordered_by_creation(
        &self,
    ) -> Result<Vec<Company>, FieldlineError> {
        queries::companies::list_companies_ordered_by_creation(self.db()?).await
    }

    async fn first_company(&self) -> Result<Option<Company>, FieldlineError> {
        queries::companies::first_company(self.db()?).await
    }

    async fn create_lead_source(&self, source: &LeadSource) -> Result<(), FieldlineError> {
        queries::lead_sources::create_lead_source(self.db()?, source).await
    }

    async fn find_lead_source_by_number(
        &self,
        number: &PhoneNumber,
    ) -> Result<Option<LeadSource>, FieldlineError> {
        queries::lead_sources::find_lead_source_by_number(self.db()?, number).await
    }

    async fn create_job_with_log(
        &self,
        job: &Job,
        log: &JobLogEntry,
    ) -> Result<(), FieldlineError> {
        queries::jobs::create_job_with_log(self.db()?, job, log).await
    }

    async fn get_job_by_code(&self, code: &str) -> Result<Option<Job>, FieldlineError> {
        queries::jobs::get_job_by_code(self.db()?, code).await
    }

    async fn list_jobs(&self, company_id: &str) -> Result<Vec<Job>, FieldlineError> {
        queries::jobs::list_jobs(self.db()?, company_id).await
    }

    async fn list_job_logs(&self, job_id: &str) -> Result<Vec<JobLogEntry>, FieldlineError> {
        queries::jobs::list_job_logs(self.db()?, job_id).await
    }

    async fn schedule_job(
        &self,
        job_id: &str,
        scheduled_at: &str,
    ) -> Result<(), FieldlineError> {
        queries::jobs::schedule_job(self.db()?, job_id, scheduled_at).await
    }

    async fn jobs_due_for_reminder(
        &self,
        now: &str,
        until: &str,
    ) -> Result<Vec<Job>, FieldlineError> {
        queries::jobs::jobs_due_for_reminder(self.db()?, now, until).await
    }

    async fn mark_reminder_sent(&self, job_id: &str, at: &str) -> Result<(), FieldlineError> {
        queries::jobs::mark_reminder_sent(self.db()?, job_id, at).await
    }
}
