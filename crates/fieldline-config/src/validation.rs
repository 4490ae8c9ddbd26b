// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and credential completeness.

use crate::model::FieldlineConfig;
use crate::ConfigError;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FieldlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.notify.enabled {
        for (field, value) in [
            ("notify.account_sid", &config.notify.account_sid),
            ("notify.auth_token", &config.notify.auth_token),
            ("notify.from_number", &config.notify.from_number),
        ] {
            if value.as_deref().map(str::trim).unwrap_or("").is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{field} is required when notify.enabled = true"),
                });
            }
        }
    }

    if config.notify.reminder_window_hours < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "notify.reminder_window_hours must be at least 1, got {}",
                config.notify.reminder_window_hours
            ),
        });
    }

    if config.notify.sweep_interval_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "notify.sweep_interval_secs must be at least 1, got {}",
                config.notify.sweep_interval_secs
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = FieldlineConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = FieldlineConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn notify_enabled_requires_credentials() {
        let mut config = FieldlineConfig::default();
        config.notify.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "sid, token, and from_number all missing");

        config.notify.account_sid = Some("AC123".to_string());
        config.notify.auth_token = Some("tok".to_string());
        config.notify.from_number = Some("+15550001111".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_reminder_window_fails_validation() {
        let mut config = FieldlineConfig::default();
        config.notify.reminder_window_hours = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("reminder_window_hours"))
        ));
    }

    #[test]
    fn bad_gateway_host_fails_validation() {
        let mut config = FieldlineConfig::default();
        config.gateway.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("gateway.host"))
        ));
    }
}
