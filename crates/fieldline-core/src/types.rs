// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain record types shared across the Fieldline crates.
//!
//! Ids are UUID strings and timestamps are RFC 3339 UTC strings, which keeps
//! SQLite rows directly comparable and lexicographically ordered by time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A tenant. Companies own their jobs and lead sources; nothing crosses
/// the company boundary except the documented earliest-company fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// A configured inbound channel: a set of claimed phone numbers that routes
/// messages to one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSource {
    pub id: String,
    pub company_id: String,
    pub name: String,
    /// Claimed numbers in normalized E.164-like form. Stored as a JSON
    /// array column; matching is exact string comparison.
    pub numbers: Vec<String>,
    pub created_at: String,
}

/// Workflow status of a job. The reconciler only ever writes [`JobStatus::Accepted`];
/// the remaining states belong to the dispatch workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Accepted,
    Scheduled,
    InProgress,
    Done,
    Cancelled,
}

impl JobStatus {
    /// Terminal states are excluded from reminder sweeps.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Cancelled)
    }
}

/// A unit of work tracked by the CRM.
///
/// `customer_phone` and `lead_source_id` are origin fields: set once at
/// creation and never updated afterwards. `lead_source_id = None` marks an
/// unattributed job created via the fallback tenant path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    /// Short human-facing identifier, uppercase, unique across all tenants.
    pub code: String,
    pub company_id: String,
    pub lead_source_id: Option<String>,
    pub title: String,
    pub description: String,
    /// Normalized inbound number the job originated from.
    pub customer_phone: String,
    pub status: JobStatus,
    /// When the visit is scheduled, if it has been scheduled yet.
    pub scheduled_at: Option<String>,
    /// Set once the reminder sweep has notified the customer.
    pub reminder_sent_at: Option<String>,
    pub created_at: String,
}

/// Append-only audit record attached to exactly one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLogEntry {
    pub id: String,
    pub job_id: String,
    /// Tag such as `system` for reconciler-generated entries.
    pub entry_type: String,
    pub message: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn job_status_round_trips_through_strings() {
        assert_eq!(JobStatus::Accepted.to_string(), "accepted");
        assert_eq!(JobStatus::InProgress.to_string(), "in_progress");
        assert_eq!(JobStatus::from_str("accepted").unwrap(), JobStatus::Accepted);
        assert_eq!(
            JobStatus::from_str("in_progress").unwrap(),
            JobStatus::InProgress
        );
        assert!(JobStatus::from_str("bogus").is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Accepted.is_terminal());
        assert!(!JobStatus::Scheduled.is_terminal());
    }

    #[test]
    fn job_serializes_status_snake_case() {
        let job = Job {
            id: "j1".to_string(),
            code: "A1B2C3".to_string(),
            company_id: "c1".to_string(),
            lead_source_id: None,
            title: "Leaky faucet".to_string(),
            description: "Leaky faucet in kitchen".to_string(),
            customer_phone: "+14075551234".to_string(),
            status: JobStatus::InProgress,
            scheduled_at: None,
            reminder_sent_at: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("\"status\":\"in_progress\""));
        assert!(json.contains("\"lead_source_id\":null"));
    }
}
