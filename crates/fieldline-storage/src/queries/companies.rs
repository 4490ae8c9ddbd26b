// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company (tenant) operations.
//!
//! Companies are provisioned out-of-band; the reconcile pipeline only reads
//! them. The ordered listing backs the documented earliest-company fallback
//! rule, so the ORDER BY here is a business rule, not a convenience.

use fieldline_core::FieldlineError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Company;

/// Create a new company.
pub async fn create_company(db: &Database, company: &Company) -> Result<(), FieldlineError> {
    let company = company.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO companies (id, name, created_at) VALUES (?1, ?2, ?3)",
                params![company.id, company.name, company.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All companies in creation order (earliest first), id as tiebreak.
pub async fn list_companies_ordered_by_creation(
    db: &Database,
) -> Result<Vec<Company>, FieldlineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, created_at FROM companies
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Company {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            let mut companies = Vec::new();
            for row in rows {
                companies.push(row?);
            }
            Ok(companies)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The earliest-created company, the deterministic fallback tenant.
pub async fn first_company(db: &Database) -> Result<Option<Company>, FieldlineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, created_at FROM companies
                 ORDER BY created_at ASC, id ASC LIMIT 1",
            )?;
            let result = stmt.query_row([], |row| {
                Ok(Company {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            });
            match result {
                Ok(company) => Ok(Some(company)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_company(id: &str, created_at: &str) -> Company {
        Company {
            id: id.to_string(),
            name: format!("Company {id}"),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn list_orders_by_creation_time() {
        let (db, _dir) = setup_db().await;

        // Insert out of chronological order.
        create_company(&db, &make_company("c2", "2026-02-01T00:00:00.000Z"))
            .await
            .unwrap();
        create_company(&db, &make_company("c1", "2026-01-01T00:00:00.000Z"))
            .await
            .unwrap();
        create_company(&db, &make_company("c3", "2026-03-01T00:00:00.000Z"))
            .await
            .unwrap();

        let companies = list_companies_ordered_by_creation(&db).await.unwrap();
        let ids: Vec<&str> = companies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn first_company_is_earliest_and_stable() {
        let (db, _dir) = setup_db().await;

        create_company(&db, &make_company("c2", "2026-02-01T00:00:00.000Z"))
            .await
            .unwrap();
        create_company(&db, &make_company("c1", "2026-01-01T00:00:00.000Z"))
            .await
            .unwrap();

        // Repeated calls always pick the same earliest company.
        for _ in 0..3 {
            let first = first_company(&db).await.unwrap().unwrap();
            assert_eq!(first.id, "c1");
        }

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn first_company_ties_break_on_id() {
        let (db, _dir) = setup_db().await;

        let ts = "2026-01-01T00:00:00.000Z";
        create_company(&db, &make_company("cb", ts)).await.unwrap();
        create_company(&db, &make_company("ca", ts)).await.unwrap();

        let first = first_company(&db).await.unwrap().unwrap();
        assert_eq!(first.id, "ca");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn first_company_empty_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(first_company(&db).await.unwrap().is_none());
        db.close().await.unwrap();
    }
}
