// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decision notification dispatch.
//!
//! Notifications are sent after the database transaction commits, and a
//! failed send never fails the call: the outcome travels back to the
//! client as `{email_sent, email_error}` response data.
//!
//! The provider is configured from the environment (`SENDGRID_API_KEY`,
//! `MAIL_FROM`). When either variable is absent, dispatch is disabled
//! and every send reports a soft error.

use async_trait::async_trait;
use tracing::warn;

/// Environment variable holding the `SendGrid` API key.
const API_KEY_VAR: &str = "SENDGRID_API_KEY";
/// Environment variable holding the sender address.
const MAIL_FROM_VAR: &str = "MAIL_FROM";

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Errors raised by notification dispatch.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// Dispatch is disabled because provider credentials are missing.
    #[error("email dispatch disabled: {API_KEY_VAR} or {MAIL_FROM_VAR} not configured")]
    Disabled,
    /// The provider rejected the request.
    #[error("mail provider rejected the request: {0}")]
    Provider(String),
    /// The request never reached the provider.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// A notification sender.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a plain-text message.
    ///
    /// # Errors
    ///
    /// Returns an error if dispatch is disabled or the provider refuses
    /// the message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// `SendGrid`-backed mailer.
pub struct SendgridMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
}

impl SendgridMailer {
    /// Builds a mailer from the environment, or `None` when credentials
    /// are missing.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok()?;
        let from = std::env::var(MAIL_FROM_VAR).ok()?;
        if api_key.is_empty() || from.is_empty() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            from,
        })
    }
}

#[async_trait]
impl Mailer for SendgridMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "Mail provider rejected notification");
            Err(MailerError::Provider(format!("{status}: {detail}")))
        }
    }
}

/// Mailer used when provider credentials are absent. Every send reports
/// a soft error.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), MailerError> {
        Err(MailerError::Disabled)
    }
}
