// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound message to job reconciliation.
//!
//! One linear pipeline per inbound delivery: normalize the sender number,
//! resolve the owning tenant and lead source, then create the job and its
//! audit log entry atomically. Every call receives all inputs it needs;
//! there is no shared mutable state, so concurrent deliveries are fully
//! independent.
//!
//! There is no deduplication of repeated webhook deliveries: upstream
//! at-least-once delivery can create duplicate jobs. Known gap, inherited
//! deliberately.

pub mod code;
pub mod reconciler;
pub mod resolver;

use fieldline_core::{FieldlineError, PhoneNumber, Store};

pub use reconciler::{ReconcileOutcome, RejectReason};
pub use resolver::Attribution;

/// Run the full pipeline for one inbound delivery: normalize, resolve,
/// reconcile.
///
/// Returns `Rejected` (nothing persisted) for unnormalizable numbers and
/// blank bodies; fails with [`FieldlineError::NoCompanyAvailable`] only when
/// zero companies are provisioned. The caller must acknowledge the inbound
/// transport regardless of the outcome.
pub async fn handle_inbound(
    store: &dyn Store,
    from_raw: Option<&str>,
    body: &str,
) -> Result<ReconcileOutcome, FieldlineError> {
    let Some(from) = PhoneNumber::normalize(from_raw) else {
        tracing::debug!("inbound sender number is unnormalizable; dropping");
        return Ok(ReconcileOutcome::Rejected(RejectReason::InvalidNumber));
    };
    if body.trim().is_empty() {
        tracing::debug!(from = %from, "inbound body is blank; dropping");
        return Ok(ReconcileOutcome::Rejected(RejectReason::BlankBody));
    }

    let attribution = resolver::resolve(store, &from).await?;
    reconciler::reconcile(store, &attribution, &from, body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldline_config::model::StorageConfig;
    use fieldline_core::types::{Company, LeadSource};
    use fieldline_storage::SqliteStore;
    use tempfile::tempdir;

    async fn setup_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteStore::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
        });
        store.initialize().await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn unnormalizable_number_is_rejected_before_any_lookup() {
        // Deliberately uninitialized: the pipeline must reject the message
        // before any storage call happens.
        let dir = tempdir().unwrap();
        let store = SqliteStore::new(StorageConfig {
            database_path: dir.path().join("unused.db").to_str().unwrap().to_string(),
        });

        let outcome = handle_inbound(&store, Some("abc"), "hi").await.unwrap();
        assert_eq!(outcome, ReconcileOutcome::Rejected(RejectReason::InvalidNumber));

        let outcome = handle_inbound(&store, None, "hi").await.unwrap();
        assert_eq!(outcome, ReconcileOutcome::Rejected(RejectReason::InvalidNumber));
    }

    #[tokio::test]
    async fn matched_inbound_creates_attributed_job() {
        let (store, _dir) = setup_store().await;
        store
            .create_company(&Company {
                id: "cA".to_string(),
                name: "Acme Plumbing".to_string(),
                created_at: "2026-01-01T00:00:00.000Z".to_string(),
            })
            .await
            .unwrap();
        store
            .create_lead_source(&LeadSource {
                id: "ls1".to_string(),
                company_id: "cA".to_string(),
                name: "Google Ads".to_string(),
                numbers: vec!["+14075551234".to_string()],
                created_at: "2026-01-02T00:00:00.000Z".to_string(),
            })
            .await
            .unwrap();

        let outcome = handle_inbound(&store, Some("4075551234"), "Need a plumber")
            .await
            .unwrap();
        let ReconcileOutcome::Created(job) = outcome else {
            panic!("expected Created");
        };
        assert_eq!(job.company_id, "cA");
        assert_eq!(job.lead_source_id.as_deref(), Some("ls1"));
        assert_eq!(job.customer_phone, "+14075551234");
    }

    #[tokio::test]
    async fn no_company_surfaces_as_error() {
        let (store, _dir) = setup_store().await;
        let err = handle_inbound(&store, Some("4075551234"), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, FieldlineError::NoCompanyAvailable));
    }
}
