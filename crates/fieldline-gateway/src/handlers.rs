// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /webhooks/sms and GET /health.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use fieldline_core::FieldlineError;
use fieldline_reconcile::{handle_inbound, ReconcileOutcome, RejectReason};

use crate::server::GatewayState;

/// Empty TwiML document: the minimal well-formed acknowledgement the SMS
/// provider expects.
const EMPTY_TWIML: &str = "<Response></Response>";

/// Form body of an inbound SMS webhook (Twilio field names).
#[derive(Debug, Deserialize)]
pub struct SmsWebhookRequest {
    /// Sender phone number as reported by the provider.
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
}

/// POST /webhooks/sms
///
/// Runs the reconcile pipeline and acknowledges the transport with empty
/// TwiML for every business outcome. Only a persistence failure produces a
/// 500; invalid input and a mis-provisioned system (no companies) are
/// acknowledged so the provider does not retry.
pub async fn post_sms_webhook(
    State(state): State<GatewayState>,
    Form(payload): Form<SmsWebhookRequest>,
) -> Response {
    let body = payload.body.as_deref().unwrap_or("");
    match handle_inbound(state.store.as_ref(), payload.from.as_deref(), body).await {
        Ok(ReconcileOutcome::Created(job)) => {
            tracing::info!(job_code = %job.code, company_id = %job.company_id, "webhook created job");
        }
        Ok(ReconcileOutcome::Rejected(reason)) => {
            let reason = match reason {
                RejectReason::BlankBody => "blank body",
                RejectReason::InvalidNumber => "unnormalizable sender number",
            };
            tracing::debug!(reason, "webhook message dropped");
        }
        Err(FieldlineError::NoCompanyAvailable) => {
            tracing::error!("inbound message received but no company is provisioned");
        }
        Err(e) => {
            tracing::error!(error = %e, "webhook reconcile failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "reconcile failed").into_response();
        }
    }
    twiml_ack()
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

fn twiml_ack() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml")],
        EMPTY_TWIML,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_request_deserializes_from_form_fields() {
        let req: SmsWebhookRequest =
            serde_urlencoded::from_str("From=%2B14075551234&Body=Need+a+plumber").unwrap();
        assert_eq!(req.from.as_deref(), Some("+14075551234"));
        assert_eq!(req.body.as_deref(), Some("Need a plumber"));
    }

    #[test]
    fn webhook_request_tolerates_missing_fields() {
        let req: SmsWebhookRequest = serde_urlencoded::from_str("").unwrap();
        assert!(req.from.is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
