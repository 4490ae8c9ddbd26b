// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job and job-log operations.
//!
//! A job and its first audit log entry are always written inside one
//! transaction; a half-committed job with no log entry must never be
//! observable. Log entries are append-only.

use std::str::FromStr;

use fieldline_core::FieldlineError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Job, JobLogEntry, JobStatus};

const JOB_COLUMNS: &str = "id, code, company_id, lead_source_id, title, description, \
     customer_phone, status, scheduled_at, reminder_sent_at, created_at";

fn job_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    let status_text: String = row.get(7)?;
    let status = JobStatus::from_str(&status_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Job {
        id: row.get(0)?,
        code: row.get(1)?,
        company_id: row.get(2)?,
        lead_source_id: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        customer_phone: row.get(6)?,
        status,
        scheduled_at: row.get(8)?,
        reminder_sent_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Insert a job and its audit log entry as a single transaction.
pub async fn create_job_with_log(
    db: &Database,
    job: &Job,
    log: &JobLogEntry,
) -> Result<(), FieldlineError> {
    let job = job.clone();
    let log = log.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO jobs (id, code, company_id, lead_source_id, title, description,
                                   customer_phone, status, scheduled_at, reminder_sent_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    job.id,
                    job.code,
                    job.company_id,
                    job.lead_source_id,
                    job.title,
                    job.description,
                    job.customer_phone,
                    job.status.to_string(),
                    job.scheduled_at,
                    job.reminder_sent_at,
                    job.created_at,
                ],
            )?;
            tx.execute(
                "INSERT INTO job_logs (id, job_id, entry_type, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![log.id, log.job_id, log.entry_type, log.message, log.created_at],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a job by its short human-facing code.
pub async fn get_job_by_code(db: &Database, code: &str) -> Result<Option<Job>, FieldlineError> {
    let code = code.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE code = ?1"))?;
            let result = stmt.query_row(params![code], job_from_row);
            match result {
                Ok(job) => Ok(Some(job)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a company's jobs, newest first.
pub async fn list_jobs(db: &Database, company_id: &str) -> Result<Vec<Job>, FieldlineError> {
    let company_id = company_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = ?1
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![company_id], job_from_row)?;
            let mut jobs = Vec::new();
            for row in rows {
                jobs.push(row?);
            }
            Ok(jobs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List a job's audit log entries in chronological order.
pub async fn list_job_logs(
    db: &Database,
    job_id: &str,
) -> Result<Vec<JobLogEntry>, FieldlineError> {
    let job_id = job_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, job_id, entry_type, message, created_at
                 FROM job_logs WHERE job_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![job_id], |row| {
                Ok(JobLogEntry {
                    id: row.get(0)?,
                    job_id: row.get(1)?,
                    entry_type: row.get(2)?,
                    message: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set a job's visit time and move it to the scheduled state.
pub async fn schedule_job(
    db: &Database,
    job_id: &str,
    scheduled_at: &str,
) -> Result<(), FieldlineError> {
    let job_id = job_id.to_string();
    let scheduled_at = scheduled_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE jobs SET scheduled_at = ?1, status = 'scheduled' WHERE id = ?2",
                params![scheduled_at, job_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Jobs scheduled in `[now, until]`, not terminal, with no reminder sent yet.
pub async fn jobs_due_for_reminder(
    db: &Database,
    now: &str,
    until: &str,
) -> Result<Vec<Job>, FieldlineError> {
    let now = now.to_string();
    let until = until.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {JOB_COLUMNS} FROM jobs
                 WHERE scheduled_at IS NOT NULL
                   AND scheduled_at >= ?1 AND scheduled_at <= ?2
                   AND reminder_sent_at IS NULL
                   AND status NOT IN ('done', 'cancelled')
                 ORDER BY scheduled_at ASC"
            ))?;
            let rows = stmt.query_map(params![now, until], job_from_row)?;
            let mut jobs = Vec::new();
            for row in rows {
                jobs.push(row?);
            }
            Ok(jobs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record that the customer has been reminded.
pub async fn mark_reminder_sent(
    db: &Database,
    job_id: &str,
    at: &str,
) -> Result<(), FieldlineError> {
    let job_id = job_id.to_string();
    let at = at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE jobs SET reminder_sent_at = ?1 WHERE id = ?2",
                params![at, job_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
