// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fieldline - a field-service CRM that turns inbound SMS into jobs.
//!
//! This is the binary entry point for the Fieldline service.

mod admin;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fieldline_config::FieldlineConfig;

/// Fieldline - a field-service CRM that turns inbound SMS into jobs.
#[derive(Parser, Debug)]
#[command(name = "fieldline", version, about, long_about = None)]
struct Cli {
    /// Path to an explicit config file (overrides the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook gateway and reminder sweep.
    Serve,
    /// Validate configuration and print the effective settings.
    Config,
    /// Manage companies.
    Company {
        #[command(subcommand)]
        command: admin::CompanyCommands,
    },
    /// Manage lead sources.
    Source {
        #[command(subcommand)]
        command: admin::SourceCommands,
    },
    /// Inspect and schedule jobs.
    Job {
        #[command(subcommand)]
        command: admin::JobCommands,
    },
}

fn load_config(path: Option<&PathBuf>) -> FieldlineConfig {
    let result = match path {
        Some(path) => match fieldline_config::load_config_from_path(path) {
            Ok(config) => fieldline_config::validation::validate_config(&config).map(|()| config),
            Err(err) => Err(vec![fieldline_config::ConfigError::Parse(Box::new(err))]),
        },
        None => fieldline_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            fieldline_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.service.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run(config).await,
        Some(Commands::Config) => {
            println!("configuration OK");
            println!("  service.name      = {}", config.service.name);
            println!("  service.log_level = {}", config.service.log_level);
            println!("  storage.database_path = {}", config.storage.database_path);
            println!(
                "  gateway           = {}:{} (token {})",
                config.gateway.host,
                config.gateway.port,
                if config.gateway.webhook_token.is_some() {
                    "set"
                } else {
                    "unset"
                }
            );
            println!("  notify.enabled    = {}", config.notify.enabled);
            Ok(())
        }
        Some(Commands::Company { command }) => admin::run_company(&config, command).await,
        Some(Commands::Source { command }) => admin::run_source(&config, command).await,
        Some(Commands::Job { command }) => admin::run_job(&config, command).await,
        None => {
            println!("fieldline: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("fieldline: {e}");
        std::process::exit(1);
    }
}
