// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared-secret authentication for the webhook route.
//!
//! When a token is configured, webhook requests must carry it in the
//! `X-Fieldline-Token` header. When no token is configured the check is
//! disabled — deployments behind a trusted proxy or relying on provider
//! signature validation at the edge run without it.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Authentication configuration for the webhook route.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected shared secret. `None` disables the check.
    pub webhook_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "webhook_token",
                &self.webhook_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Middleware validating the shared-secret header when one is configured.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(ref expected) = auth.webhook_token else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get("x-fieldline-token")
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => {
            tracing::warn!("webhook request rejected: missing or wrong token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let config = AuthConfig {
            webhook_token: Some("hunter2".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
