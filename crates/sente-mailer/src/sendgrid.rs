//! [`SendgridMailer`] — SendGrid v3 `mail/send` over HTTP.

use serde_json::json;

use crate::{Error, Mailer, Message, Result};

/// Production API host; overridable for tests.
pub const DEFAULT_API_BASE: &str = "https://api.sendgrid.com";

#[derive(Clone)]
pub struct SendgridMailer {
  client:   reqwest::Client,
  api_key:  String,
  base_url: String,
}

impl SendgridMailer {
  pub fn new(api_key: String) -> Self {
    Self::with_base_url(api_key, DEFAULT_API_BASE.to_string())
  }

  pub fn with_base_url(api_key: String, base_url: String) -> Self {
    Self { client: reqwest::Client::new(), api_key, base_url }
  }
}

/// The v3 `mail/send` request body for a single plain-text message.
fn payload(message: &Message) -> serde_json::Value {
  let mut body = json!({
    "personalizations": [{ "to": [{ "email": message.to }] }],
    "from": { "email": message.from },
    "subject": message.subject,
    "content": [{ "type": "text/plain", "value": message.body }],
  });
  if let Some(reply_to) = &message.reply_to {
    body["reply_to"] =
      json!({ "email": reply_to.email, "name": reply_to.name });
  }
  body
}

impl Mailer for SendgridMailer {
  type Error = Error;

  async fn send(&self, message: &Message) -> Result<()> {
    let response = self
      .client
      .post(format!("{}/v3/mail/send", self.base_url))
      .bearer_auth(&self.api_key)
      .json(&payload(message))
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::Status(status.as_u16()));
    }
    tracing::debug!(to = %message.to, status = %status, "email accepted");
    Ok(())
  }
}
