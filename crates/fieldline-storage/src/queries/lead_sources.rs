// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead source operations.
//!
//! Claimed numbers are stored as a JSON array column and matched with
//! `json_each`, so lookups are exact string comparisons against normalized
//! numbers. Callers must normalize before querying, never after.

use fieldline_core::{FieldlineError, PhoneNumber};
use rusqlite::params;

use crate::database::Database;
use crate::models::LeadSource;

fn lead_source_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LeadSource> {
    let numbers_json: String = row.get(3)?;
    let numbers: Vec<String> = serde_json::from_str(&numbers_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(LeadSource {
        id: row.get(0)?,
        company_id: row.get(1)?,
        name: row.get(2)?,
        numbers,
        created_at: row.get(4)?,
    })
}

/// Create a new lead source with its claimed-number set.
pub async fn create_lead_source(
    db: &Database,
    source: &LeadSource,
) -> Result<(), FieldlineError> {
    let source = source.clone();
    db.connection()
        .call(move |conn| {
            let numbers_json = serde_json::to_string(&source.numbers)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            conn.execute(
                "INSERT INTO lead_sources (id, company_id, name, numbers, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    source.id,
                    source.company_id,
                    source.name,
                    numbers_json,
                    source.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_boxed_err)
}

/// Find the lead source claiming `number`, if any.
///
/// The same number should map to at most one lead source; if configuration
/// drifts and several claim it, the earliest-created one wins so the answer
/// stays deterministic.
pub async fn find_lead_source_by_number(
    db: &Database,
    number: &PhoneNumber,
) -> Result<Option<LeadSource>, FieldlineError> {
    let number = number.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT ls.id, ls.company_id, ls.name, ls.numbers, ls.created_at
                 FROM lead_sources ls, json_each(ls.numbers) je
                 WHERE je.value = ?1
                 ORDER BY ls.created_at ASC, ls.id ASC
                 LIMIT 1",
            )?;
            let result = stmt.query_row(params![number], lead_source_from_row);
            match result {
                Ok(source) => Ok(Some(source)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List lead sources for a company, creation order.
pub async fn list_lead_sources(
    db: &Database,
    company_id: &str,
) -> Result<Vec<LeadSource>, FieldlineError> {
    let company_id = company_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, company_id, name, numbers, created_at
                 FROM lead_sources WHERE company_id = ?1
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![company_id], lead_source_from_row)?;
            let mut sources = Vec::new();
            for row in rows {
                sources.push(row?);
            }
            Ok(sources)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
