// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Job creation from resolved inbound messages.
//!
//! The reconciler is the only writer in the pipeline. It creates exactly
//! one job and one audit log entry per accepted message, as a single
//! transaction, and never retries: a persistence failure propagates to the
//! caller as a hard error.

use chrono::{SecondsFormat, Utc};
use fieldline_core::types::{Job, JobLogEntry, JobStatus};
use fieldline_core::{FieldlineError, PhoneNumber, Store};
use tracing::info;

use crate::code;
use crate::resolver::Attribution;

/// Titles are the first line of the body, clipped to this many characters.
const TITLE_MAX_CHARS: usize = 80;

/// Why an inbound message was dropped without creating a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Body was empty or whitespace-only after trimming.
    BlankBody,
    /// Sender number could not be normalized, so no routing is possible.
    InvalidNumber,
}

/// Result of reconciling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A job and its audit log entry were persisted.
    Created(Job),
    /// Nothing was persisted; the transport must still be acknowledged.
    Rejected(RejectReason),
}

/// Create a job (and its audit log entry) for a resolved inbound message.
///
/// Blank bodies are rejected without touching storage. The job's origin
/// fields — customer phone and lead source — are set here and never
/// updated afterwards.
pub async fn reconcile(
    store: &dyn Store,
    attribution: &Attribution,
    from: &PhoneNumber,
    body: &str,
) -> Result<ReconcileOutcome, FieldlineError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(ReconcileOutcome::Rejected(RejectReason::BlankBody));
    }

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let job = Job {
        id: uuid::Uuid::new_v4().to_string(),
        code: code::generate(),
        company_id: attribution.company_id.clone(),
        lead_source_id: attribution.lead_source_id.clone(),
        title: title_from_body(body),
        description: body.to_string(),
        customer_phone: from.as_str().to_string(),
        status: JobStatus::Accepted,
        scheduled_at: None,
        reminder_sent_at: None,
        created_at: now.clone(),
    };

    // The audit wording distinguishes attributed from fallback jobs so a
    // tenant can spot mis-routed leads.
    let message = match attribution.lead_source_id {
        Some(_) => format!("Job created from inbound message from {from}"),
        None => format!(
            "Job created from inbound message from {from}; no lead source matched this number"
        ),
    };
    let log = JobLogEntry {
        id: uuid::Uuid::new_v4().to_string(),
        job_id: job.id.clone(),
        entry_type: "system".to_string(),
        message,
        created_at: now,
    };

    store.create_job_with_log(&job, &log).await?;

    info!(
        job_code = %job.code,
        company_id = %job.company_id,
        attributed = job.lead_source_id.is_some(),
        "inbound job created"
    );
    Ok(ReconcileOutcome::Created(job))
}

fn title_from_body(body: &str) -> String {
    let first_line = body.lines().next().unwrap_or(body).trim();
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        first_line.to_string()
    } else {
        let clipped: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
        format!("{clipped}…")
    }
}
