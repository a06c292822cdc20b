//! Participant — the single persisted entity of the service.
//!
//! A participant is created by a validated form submission with
//! `pending = true` and a server-issued confirmation token (`salt`), and
//! flips to `pending = false` exactly once when the matching token arrives.
//! Records are never deleted.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Subscription kind ───────────────────────────────────────────────────────

/// Whether the subscriber plays in the tournament or accompanies someone
/// who does. Serialized as `player` / `non-player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionKind {
  Player,
  NonPlayer,
}

impl SubscriptionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Player => "player",
      Self::NonPlayer => "non-player",
    }
  }
}

impl FromStr for SubscriptionKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "player" => Ok(Self::Player),
      "non-player" => Ok(Self::NonPlayer),
      other => Err(Error::UnknownSubscriptionKind(other.to_string())),
    }
  }
}

impl fmt::Display for SubscriptionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Participant ─────────────────────────────────────────────────────────────

/// A persisted participant record, internal fields included.
///
/// Invariant: `level` and `club` are `Some` if and only if
/// `kind == Player`. Validation enforces this at the only write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
  pub participant_id: Uuid,
  pub created_at:     DateTime<Utc>,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  #[serde(rename = "type")]
  pub kind:           SubscriptionKind,
  pub level:          Option<String>,
  pub club:           Option<String>,
  /// Opaque random confirmation token. Never serialized publicly.
  pub salt:           String,
  pub pending:        bool,
}

impl Participant {
  /// The public projection served by the listing endpoint: no `salt`, no
  /// `pending`.
  pub fn view(&self) -> ParticipantView {
    ParticipantView {
      first_name: self.first_name.clone(),
      last_name:  self.last_name.clone(),
      email:      self.email.clone(),
      kind:       self.kind,
      level:      self.level.clone(),
      club:       self.club.clone(),
    }
  }

  #[cfg(test)]
  pub(crate) fn for_tests(input: NewParticipant) -> Self {
    Self {
      participant_id: Uuid::new_v4(),
      created_at: Utc::now(),
      first_name: input.first_name,
      last_name: input.last_name,
      email: input.email,
      kind: input.kind,
      level: input.level,
      club: input.club,
      salt: crate::token::generate_salt(),
      pending: false,
    }
  }
}

// ─── NewParticipant ──────────────────────────────────────────────────────────

/// Output of form validation; input to
/// [`crate::store::ParticipantStore::add_participant`]. The id, timestamp,
/// salt and pending flag are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewParticipant {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub kind:       SubscriptionKind,
  pub level:      Option<String>,
  pub club:       Option<String>,
}

// ─── ParticipantView ─────────────────────────────────────────────────────────

/// The public participant document: exactly the submitted fields, with
/// `level`/`club` omitted for non-players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  #[serde(rename = "type")]
  pub kind:       SubscriptionKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub club:       Option<String>,
}
