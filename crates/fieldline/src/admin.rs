// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin subcommands for provisioning tenants and inspecting jobs.
//!
//! These operate directly against the configured database; the gateway does
//! not need to be running.

use chrono::{DateTime, SecondsFormat, Utc};
use clap::Subcommand;
use uuid::Uuid;

use fieldline_config::FieldlineConfig;
use fieldline_core::types::{Company, LeadSource};
use fieldline_core::{FieldlineError, PhoneNumber, Store};
use fieldline_storage::SqliteStore;

/// Company management subcommands.
#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Create a company.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
    },
    /// List companies in creation order.
    List,
}

/// Lead source management subcommands.
#[derive(Subcommand, Debug)]
pub enum SourceCommands {
    /// Create a lead source claiming one or more tracking numbers.
    Add {
        /// Owning company id.
        #[arg(long)]
        company_id: String,
        /// Display name, e.g. the campaign name.
        #[arg(long)]
        name: String,
        /// Tracking numbers claimed by this source (normalized on input).
        #[arg(long = "number", required = true)]
        numbers: Vec<String>,
    },
}

/// Job inspection and scheduling subcommands.
#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// List a company's jobs, newest first.
    List {
        /// Company id.
        #[arg(long)]
        company_id: String,
    },
    /// Show one job and its audit log.
    Show {
        /// Six-character job code.
        code: String,
    },
    /// Set a job's visit time and move it to scheduled.
    Schedule {
        /// Six-character job code.
        code: String,
        /// Visit time, RFC 3339 (e.g. 2026-09-01T09:00:00Z).
        #[arg(long)]
        at: String,
    },
}

async fn open_store(config: &FieldlineConfig) -> Result<SqliteStore, FieldlineError> {
    let store = SqliteStore::new(config.storage.clone());
    store.initialize().await?;
    Ok(store)
}

fn now_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn run_company(
    config: &FieldlineConfig,
    command: CompanyCommands,
) -> Result<(), FieldlineError> {
    let store = open_store(config).await?;
    match command {
        CompanyCommands::Add { name } => {
            let company = Company {
                id: Uuid::new_v4().to_string(),
                name,
                created_at: now_millis(),
            };
            store.create_company(&company).await?;
            println!("created company {} ({})", company.name, company.id);
        }
        CompanyCommands::List => {
            let companies = store.list_companies_ordered_by_creation().await?;
            if companies.is_empty() {
                println!("no companies");
            }
            for company in companies {
                println!("{}  {}  {}", company.id, company.created_at, company.name);
            }
        }
    }
    store.close().await
}

pub async fn run_source(
    config: &FieldlineConfig,
    command: SourceCommands,
) -> Result<(), FieldlineError> {
    let store = open_store(config).await?;
    match command {
        SourceCommands::Add {
            company_id,
            name,
            numbers,
        } => {
            let mut normalized = Vec::with_capacity(numbers.len());
            for raw in &numbers {
                let number = PhoneNumber::normalize(Some(raw)).ok_or_else(|| {
                    FieldlineError::InvalidInput(format!("cannot normalize number {raw:?}"))
                })?;
                normalized.push(number.into_string());
            }
            let source = LeadSource {
                id: Uuid::new_v4().to_string(),
                company_id,
                name,
                numbers: normalized,
                created_at: now_millis(),
            };
            store.create_lead_source(&source).await?;
            println!(
                "created lead source {} ({}) claiming {}",
                source.name,
                source.id,
                source.numbers.join(", ")
            );
        }
    }
    store.close().await
}

pub async fn run_job(config: &FieldlineConfig, command: JobCommands) -> Result<(), FieldlineError> {
    let store = open_store(config).await?;
    match command {
        JobCommands::List { company_id } => {
            let jobs = store.list_jobs(&company_id).await?;
            if jobs.is_empty() {
                println!("no jobs");
            }
            for job in jobs {
                println!(
                    "{}  {}  {}  {}",
                    job.code, job.status, job.created_at, job.title
                );
            }
        }
        JobCommands::Show { code } => {
            let job = store.get_job_by_code(&code).await?.ok_or_else(|| {
                FieldlineError::InvalidInput(format!("no job with code {code}"))
            })?;
            println!("job {} ({})", job.code, job.id);
            println!("  company     {}", job.company_id);
            println!(
                "  lead source {}",
                job.lead_source_id.as_deref().unwrap_or("(none)")
            );
            println!("  customer    {}", job.customer_phone);
            println!("  status      {}", job.status);
            println!(
                "  scheduled   {}",
                job.scheduled_at.as_deref().unwrap_or("(unscheduled)")
            );
            println!("  created     {}", job.created_at);
            println!("  title       {}", job.title);
            for entry in store.list_job_logs(&job.id).await? {
                println!("  log [{}] {}  {}", entry.entry_type, entry.created_at, entry.message);
            }
        }
        JobCommands::Schedule { code, at } => {
            let parsed = DateTime::parse_from_rfc3339(&at).map_err(|e| {
                FieldlineError::InvalidInput(format!("invalid RFC 3339 time {at:?}: {e}"))
            })?;
            let scheduled_at = parsed
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true);
            let job = store.get_job_by_code(&code).await?.ok_or_else(|| {
                FieldlineError::InvalidInput(format!("no job with code {code}"))
            })?;
            store.schedule_job(&job.id, &scheduled_at).await?;
            println!("job {} scheduled for {}", job.code, scheduled_at);
        }
    }
    store.close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldline_config::model::StorageConfig;
    use tempfile::tempdir;

    fn config_for(dir: &tempfile::TempDir) -> FieldlineConfig {
        let mut config = FieldlineConfig::default();
        config.storage = StorageConfig {
            database_path: dir.path().join("admin.db").to_str().unwrap().to_string(),
        };
        config
    }

    #[tokio::test]
    async fn source_add_rejects_unnormalizable_number() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir);
        run_company(
            &config,
            CompanyCommands::Add {
                name: "Acme Plumbing".to_string(),
            },
        )
        .await
        .unwrap();

        let companies = {
            let store = open_store(&config).await.unwrap();
            let companies = store.list_companies_ordered_by_creation().await.unwrap();
            store.close().await.unwrap();
            companies
        };
        let result = run_source(
            &config,
            SourceCommands::Add {
                company_id: companies[0].id.clone(),
                name: "Billboard".to_string(),
                numbers: vec!["abc".to_string()],
            },
        )
        .await;
        assert!(matches!(result, Err(FieldlineError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn source_add_normalizes_claimed_numbers() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir);
        run_company(
            &config,
            CompanyCommands::Add {
                name: "Acme Plumbing".to_string(),
            },
        )
        .await
        .unwrap();
        let companies = {
            let store = open_store(&config).await.unwrap();
            let companies = store.list_companies_ordered_by_creation().await.unwrap();
            store.close().await.unwrap();
            companies
        };
        run_source(
            &config,
            SourceCommands::Add {
                company_id: companies[0].id.clone(),
                name: "Billboard".to_string(),
                numbers: vec!["(407) 555-1234".to_string()],
            },
        )
        .await
        .unwrap();

        let store = open_store(&config).await.unwrap();
        let number = PhoneNumber::normalize(Some("+14075551234")).unwrap();
        let found = store.find_lead_source_by_number(&number).await.unwrap();
        assert_eq!(found.unwrap().name, "Billboard");
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn schedule_rejects_unknown_code() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir);
        let result = run_job(
            &config,
            JobCommands::Schedule {
                code: "ZZZZZZ".to_string(),
                at: "2026-09-01T09:00:00Z".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(FieldlineError::InvalidInput(_))));
    }
}
