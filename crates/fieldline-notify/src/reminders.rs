// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder dispatch: notify customers of upcoming scheduled jobs.
//!
//! One sweep = one threshold query plus one send per due job. There are no
//! retries; a failed send leaves `reminder_sent_at` unset so the job is
//! naturally picked up again on the next sweep. A single failure never
//! aborts the rest of the loop.

use chrono::{Duration, SecondsFormat, Utc};
use fieldline_core::{FieldlineError, SmsTransport, Store};
use tracing::{info, warn};

/// Send reminders for jobs scheduled within the next `window_hours`.
///
/// Returns the number of reminders successfully sent and marked. Storage
/// failures propagate; transport failures are logged per job and skipped.
pub async fn dispatch_due(
    store: &dyn Store,
    transport: &dyn SmsTransport,
    window_hours: i64,
) -> Result<usize, FieldlineError> {
    let now = Utc::now();
    let until = now + Duration::hours(window_hours);
    let now_str = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let until_str = until.to_rfc3339_opts(SecondsFormat::Millis, true);

    let due = store.jobs_due_for_reminder(&now_str, &until_str).await?;
    if due.is_empty() {
        return Ok(0);
    }

    let mut sent = 0;
    for job in due {
        let when = job.scheduled_at.as_deref().unwrap_or("soon");
        let body = format!(
            "Reminder: your service visit for job {} is scheduled for {}.",
            job.code, when
        );
        match transport.send(&job.customer_phone, &body).await {
            Ok(()) => {
                store.mark_reminder_sent(&job.id, &now_str).await?;
                info!(job_code = %job.code, "reminder sent");
                sent += 1;
            }
            Err(e) => {
                warn!(job_code = %job.code, error = %e, "reminder send failed");
            }
        }
    }
    Ok(sent)
}
