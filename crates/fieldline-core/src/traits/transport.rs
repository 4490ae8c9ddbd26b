// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound SMS transport capability.

use async_trait::async_trait;

use crate::error::FieldlineError;

/// Outbound notification transport: `send(to, body)`.
///
/// Used by the reminder dispatch flow, never by the reconciler. Failures
/// surface as [`FieldlineError::Transport`]; no implementation retries.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<(), FieldlineError>;
}

/// Transport that drops every message. Used when notifications are disabled
/// and in tests that only care about the sweep logic.
#[derive(Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl SmsTransport for NoopTransport {
    async fn send(&self, to: &str, _body: &str) -> Result<(), FieldlineError> {
        tracing::debug!(to = %to, "notify disabled; dropping outbound SMS");
        Ok(())
    }
}
