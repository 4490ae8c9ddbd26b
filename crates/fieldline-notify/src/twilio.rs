// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio REST implementation of the SmsTransport trait.

use async_trait::async_trait;
use fieldline_core::{FieldlineError, SmsTransport};

/// SMS transport backed by the Twilio Messages API.
pub struct TwilioTransport {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioTransport {
    /// Create a transport for the given account.
    ///
    /// `base_url` is normally `https://api.twilio.com`; tests point it at a
    /// mock server.
    pub fn new(
        base_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        }
    }
}

impl std::fmt::Debug for TwilioTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioTransport")
            .field("base_url", &self.base_url)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[redacted]")
            .field("from_number", &self.from_number)
            .finish()
    }
}

#[async_trait]
impl SmsTransport for TwilioTransport {
    async fn send(&self, to: &str, body: &str) -> Result<(), FieldlineError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let form = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| FieldlineError::Transport {
                message: format!("twilio request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FieldlineError::Transport {
                message: format!("twilio returned {status}: {detail}"),
                source: None,
            });
        }

        tracing::debug!(to = %to, "outbound SMS accepted by twilio");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> TwilioTransport {
        TwilioTransport::new(server.uri(), "AC123", "secret-token", "+15550001111")
    }

    #[tokio::test]
    async fn send_posts_form_encoded_message_with_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(basic_auth("AC123", "secret-token"))
            .and(body_string_contains("To=%2B14075551234"))
            .and(body_string_contains("From=%2B15550001111"))
            .and(body_string_contains("Body=Reminder"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        transport.send("+14075551234", "Reminder").await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("auth failure"))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let err = transport.send("+14075551234", "hi").await.unwrap_err();
        assert!(matches!(err, FieldlineError::Transport { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn debug_redacts_auth_token() {
        let transport =
            TwilioTransport::new("https://api.twilio.com", "AC123", "secret", "+15550001111");
        let debug = format!("{transport:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[redacted]"));
    }
}
