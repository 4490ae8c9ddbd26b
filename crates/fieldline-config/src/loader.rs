// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./fieldline.toml` >
//! `~/.config/fieldline/fieldline.toml` > `/etc/fieldline/fieldline.toml`,
//! with environment variable overrides via the `FIELDLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FieldlineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fieldline/fieldline.toml` (system-wide)
/// 3. `~/.config/fieldline/fieldline.toml` (user XDG config)
/// 4. `./fieldline.toml` (local directory)
/// 5. `FIELDLINE_*` environment variables
pub fn load_config() -> Result<FieldlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldlineConfig::default()))
        .merge(Toml::file("/etc/fieldline/fieldline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fieldline/fieldline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fieldline.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FieldlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FieldlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `FIELDLINE_STORAGE_DATABASE_PATH` must
/// map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("FIELDLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: FIELDLINE_GATEWAY_WEBHOOK_TOKEN -> "gateway_webhook_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("notify_", "notify.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_str_applies_defaults_under_partial_toml() {
        let config = load_config_from_str("[gateway]\nport = 3999\n").unwrap();
        assert_eq!(config.gateway.port, 3999);
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.service.name, "fieldline");
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldline.toml");
        std::fs::write(&path, "[service]\nname = \"from-file\"\n").unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.service.name, "from-file");
    }

    #[test]
    fn env_mapping_targets_dotted_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FIELDLINE_STORAGE_DATABASE_PATH", "/tmp/env-override.db");
            jail.set_env("FIELDLINE_NOTIFY_REMINDER_WINDOW_HOURS", "6");
            let config: FieldlineConfig = Figment::new()
                .merge(Serialized::defaults(FieldlineConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.storage.database_path, "/tmp/env-override.db");
            assert_eq!(config.notify.reminder_window_hours, 6);
            Ok(())
        });
    }
}
