// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fieldline CRM service.

use thiserror::Error;

/// The primary error type used across all Fieldline crates.
#[derive(Debug, Error)]
pub enum FieldlineError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, constraint violation).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Outbound SMS transport errors (connection failure, provider rejection).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Inbound payload cannot be attributed or persisted (blank body, unnormalizable number).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The system has zero companies provisioned, so no fallback tenant exists.
    #[error("no company available to receive inbound messages")]
    NoCompanyAvailable,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_render() {
        let e = FieldlineError::Config("bad port".to_string());
        assert_eq!(e.to_string(), "configuration error: bad port");

        let e = FieldlineError::NoCompanyAvailable;
        assert!(e.to_string().contains("no company available"));

        let e = FieldlineError::Transport {
            message: "twilio returned 401".to_string(),
            source: None,
        };
        assert!(e.to_string().contains("twilio returned 401"));
    }
}
