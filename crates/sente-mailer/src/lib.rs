//! Transactional email for the Sente registration service.
//!
//! The [`Mailer`] trait is the seam between the web layer and the email
//! provider; [`SendgridMailer`] is the production implementation. Tests use
//! a recording mailer instead, so no handler logic depends on the network.

pub mod error;

mod sendgrid;

pub use error::{Error, Result};
pub use sendgrid::SendgridMailer;

use std::future::Future;

// ─── Message ─────────────────────────────────────────────────────────────────

/// A fixed reply-to identity attached to every outbound message.
#[derive(Debug, Clone)]
pub struct ReplyTo {
  pub email: String,
  pub name:  String,
}

/// A plain-text transactional email.
#[derive(Debug, Clone)]
pub struct Message {
  pub from:     String,
  pub to:       String,
  pub reply_to: Option<ReplyTo>,
  pub subject:  String,
  pub body:     String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a transactional email provider.
pub trait Mailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Send one message. No retries; the caller decides whether a failure
  /// is fatal.
  fn send<'a>(
    &'a self,
    message: &'a Message,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
