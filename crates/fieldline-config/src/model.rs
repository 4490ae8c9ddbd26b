// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Fieldline CRM service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Fieldline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldlineConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Inbound webhook gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Outbound SMS and reminder sweep settings.
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "fieldline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "fieldline.db".to_string()
}

/// Inbound webhook gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Shared secret required in the `X-Fieldline-Token` header on webhook
    /// requests. `None` disables the check (e.g. behind a trusted proxy).
    #[serde(default)]
    pub webhook_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            webhook_token: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

/// Outbound SMS and reminder sweep configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Enable the reminder sweep and outbound SMS sending.
    #[serde(default)]
    pub enabled: bool,

    /// Twilio account SID. Required when `enabled`.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token. Required when `enabled`.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Sender number for outbound SMS, in E.164 form. Required when `enabled`.
    #[serde(default)]
    pub from_number: Option<String>,

    /// Twilio API base URL. Overridable for testing against a mock server.
    #[serde(default = "default_twilio_base_url")]
    pub base_url: String,

    /// How far ahead the reminder sweep looks for scheduled jobs, in hours.
    #[serde(default = "default_reminder_window_hours")]
    pub reminder_window_hours: i64,

    /// Seconds between reminder sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            account_sid: None,
            auth_token: None,
            from_number: None,
            base_url: default_twilio_base_url(),
            reminder_window_hours: default_reminder_window_hours(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_twilio_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_reminder_window_hours() -> i64 {
    24
}

fn default_sweep_interval_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = FieldlineConfig::default();
        assert_eq!(config.service.name, "fieldline");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.gateway.port, 8080);
        assert!(!config.notify.enabled);
        assert_eq!(config.notify.reminder_window_hours, 24);
    }

    #[test]
    fn toml_sections_deserialize() {
        let toml_str = r#"
[service]
name = "fieldline-staging"
log_level = "debug"

[storage]
database_path = "/var/lib/fieldline/fieldline.db"

[gateway]
host = "0.0.0.0"
port = 9000
webhook_token = "hunter2"

[notify]
enabled = true
account_sid = "AC123"
auth_token = "tok"
from_number = "+15550001111"
reminder_window_hours = 12
"#;
        let config: FieldlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.name, "fieldline-staging");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.webhook_token.as_deref(), Some("hunter2"));
        assert!(config.notify.enabled);
        assert_eq!(config.notify.reminder_window_hours, 12);
        // base_url keeps its default when not given
        assert_eq!(config.notify.base_url, "https://api.twilio.com");
    }

    #[test]
    fn unknown_section_key_fails() {
        let result = toml::from_str::<FieldlineConfig>("[gateway]\nprot = 9000\n");
        assert!(result.is_err());
    }
}
