// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead source resolution: which tenant receives an inbound message.
//!
//! Lookup is an exact string match against normalized numbers, so the
//! number must already be normalized when it reaches this module. When no
//! lead source claims the number, the message falls back to the
//! earliest-created company — an explicit business rule, implemented as an
//! ordered query so the same fallback tenant is chosen on every call for a
//! given dataset.

use fieldline_core::{FieldlineError, PhoneNumber, Store};

/// The tenant and (optional) lead source an inbound number resolved to.
///
/// `lead_source_id = None` means the fallback path was taken and the
/// resulting job is unattributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub company_id: String,
    pub lead_source_id: Option<String>,
}

/// Resolve an inbound number to its receiving tenant.
///
/// Fails with [`FieldlineError::NoCompanyAvailable`] only in the degenerate
/// case where zero companies are provisioned. Read-only.
pub async fn resolve(
    store: &dyn Store,
    number: &PhoneNumber,
) -> Result<Attribution, FieldlineError> {
    if let Some(source) = store.find_lead_source_by_number(number).await? {
        tracing::debug!(
            number = %number,
            lead_source_id = %source.id,
            company_id = %source.company_id,
            "inbound number matched lead source"
        );
        return Ok(Attribution {
            company_id: source.company_id,
            lead_source_id: Some(source.id),
        });
    }

    match store.first_company().await? {
        Some(company) => {
            tracing::debug!(
                number = %number,
                company_id = %company.id,
                "no lead source matched; using fallback tenant"
            );
            Ok(Attribution {
                company_id: company.id,
                lead_source_id: None,
            })
        }
        None => Err(FieldlineError::NoCompanyAvailable),
    }
}
