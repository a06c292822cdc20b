//! Outbound notification emails.
//!
//! One provider call per participant event. A failed send is logged and
//! otherwise ignored: the participant record is already committed and the
//! request must still succeed. The operator notice is the recovery path
//! when a participant notice is lost.

use askama::Template;
use sente_core::participant::Participant;
use sente_mailer::{Mailer, Message, ReplyTo};

use crate::ServerConfig;

// ─── Email bodies ────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "pending_email.txt")]
struct PendingEmail<'a> {
  name:       &'a str,
  tournament: &'a str,
}

#[derive(Template)]
#[template(path = "admin_email.txt")]
struct AdminEmail<'a> {
  first_name:  &'a str,
  last_name:   &'a str,
  email:       &'a str,
  kind:        &'a str,
  level:       &'a str,
  club:        &'a str,
  confirm_url: &'a str,
}

#[derive(Template)]
#[template(path = "confirm_email.txt")]
struct ConfirmEmail<'a> {
  name:       &'a str,
  tournament: &'a str,
}

// ─── Notices ─────────────────────────────────────────────────────────────────

/// After a successful submission: a pending notice to the participant and
/// a validation-needed notice (with the confirmation link) to the
/// operator.
pub async fn submission_notices<M: Mailer>(
  mailer: &M,
  config: &ServerConfig,
  participant: &Participant,
) {
  let pending_body = PendingEmail {
    name:       &participant.first_name,
    tournament: &config.tournament_name,
  }
  .render();

  let confirm_url = format!(
    "{}/confirm/{}/{}",
    config.base_url.trim_end_matches('/'),
    participant.participant_id,
    participant.salt,
  );
  let admin_body = AdminEmail {
    first_name:  &participant.first_name,
    last_name:   &participant.last_name,
    email:       &participant.email,
    kind:        participant.kind.as_str(),
    level:       participant.level.as_deref().unwrap_or("-"),
    club:        participant.club.as_deref().unwrap_or("-"),
    confirm_url: &confirm_url,
  }
  .render();

  deliver(
    mailer,
    config,
    &participant.email,
    format!(
      "Inscription en cours de validation pour {}",
      config.tournament_name
    ),
    pending_body,
  )
  .await;

  deliver(
    mailer,
    config,
    &config.admin_email,
    "Validation d'inscription nécessaire".to_string(),
    admin_body,
  )
  .await;
}

/// After a successful confirmation: a confirmation notice to the
/// participant.
pub async fn confirmation_notice<M: Mailer>(
  mailer: &M,
  config: &ServerConfig,
  participant: &Participant,
) {
  let body = ConfirmEmail {
    name:       &participant.first_name,
    tournament: &config.tournament_name,
  }
  .render();

  deliver(
    mailer,
    config,
    &participant.email,
    "Validation d'inscription".to_string(),
    body,
  )
  .await;
}

async fn deliver<M: Mailer>(
  mailer: &M,
  config: &ServerConfig,
  to: &str,
  subject: String,
  body: Result<String, askama::Error>,
) {
  let body = match body {
    Ok(body) => body,
    Err(e) => {
      tracing::error!(to, %subject, error = %e, "could not render email");
      return;
    }
  };

  let message = Message {
    from: config.from_email.clone(),
    to: to.to_string(),
    reply_to: Some(ReplyTo {
      email: config.reply_to_email.clone(),
      name:  config.reply_to_name.clone(),
    }),
    subject,
    body,
  };

  match mailer.send(&message).await {
    Ok(()) => {
      tracing::info!(to = %message.to, subject = %message.subject, "sent email");
    }
    Err(e) => {
      // Deliberately swallowed: the record is persisted either way.
      tracing::error!(to = %message.to, error = %e, "could not send email");
    }
  }
}
