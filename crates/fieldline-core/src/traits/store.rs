// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relational store capability consumed by the reconcile pipeline.

use async_trait::async_trait;

use crate::error::FieldlineError;
use crate::phone::PhoneNumber;
use crate::types::{Company, Job, JobLogEntry, LeadSource};

/// Abstract relational store for companies, lead sources, and jobs.
///
/// The reconcile pipeline only reads companies/lead sources and only writes
/// through [`Store::create_job_with_log`]; the remaining operations serve
/// provisioning, the CLI, and the reminder sweep.
#[async_trait]
pub trait Store: Send + Sync {
    // --- Company operations (provisioned out-of-band) ---

    async fn create_company(&self, company: &Company) -> Result<(), FieldlineError>;

    /// All companies in a stable, total order: creation time ascending,
    /// id as tiebreak. The fallback-tenant rule depends on this order
    /// being explicit, never incidental.
    async fn list_companies_ordered_by_creation(&self)
        -> Result<Vec<Company>, FieldlineError>;

    /// The earliest-created company, or `None` when nothing is provisioned.
    async fn first_company(&self) -> Result<Option<Company>, FieldlineError>;

    // --- Lead source operations ---

    async fn create_lead_source(&self, source: &LeadSource) -> Result<(), FieldlineError>;

    /// Exact-match lookup against the normalized claimed-number sets.
    async fn find_lead_source_by_number(
        &self,
        number: &PhoneNumber,
    ) -> Result<Option<LeadSource>, FieldlineError>;

    // --- Job operations ---

    /// Persist a job and its audit log entry as one atomic unit. If the log
    /// entry cannot be written the job must not be observably retained.
    async fn create_job_with_log(
        &self,
        job: &Job,
        log: &JobLogEntry,
    ) -> Result<(), FieldlineError>;

    async fn get_job_by_code(&self, code: &str) -> Result<Option<Job>, FieldlineError>;

    async fn list_jobs(&self, company_id: &str) -> Result<Vec<Job>, FieldlineError>;

    async fn list_job_logs(&self, job_id: &str) -> Result<Vec<JobLogEntry>, FieldlineError>;

    /// Set a job's visit time and move it to the scheduled state.
    /// `scheduled_at` is an RFC 3339 UTC string.
    async fn schedule_job(&self, job_id: &str, scheduled_at: &str)
        -> Result<(), FieldlineError>;

    // --- Reminder sweep operations ---

    /// Jobs scheduled in `[now, until]`, not in a terminal state, with no
    /// reminder sent yet. Bounds are RFC 3339 UTC strings.
    async fn jobs_due_for_reminder(
        &self,
        now: &str,
        until: &str,
    ) -> Result<Vec<Job>, FieldlineError>;

    async fn mark_reminder_sent(&self, job_id: &str, at: &str) -> Result<(), FieldlineError>;
}
