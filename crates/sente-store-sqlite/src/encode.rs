//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, the participant body as
//! compact JSON, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use sente_core::participant::{Participant, ParticipantView};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Body ────────────────────────────────────────────────────────────────────

pub fn encode_body(view: &ParticipantView) -> Result<String> {
  Ok(serde_json::to_string(view)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `participants` row.
pub struct RawParticipant {
  pub participant_id: String,
  pub body_json:      String,
  pub salt:           String,
  pub pending:        bool,
  pub created_at:     String,
}

impl RawParticipant {
  pub fn into_participant(self) -> Result<Participant> {
    let body: ParticipantView = serde_json::from_str(&self.body_json)?;
    Ok(Participant {
      participant_id: decode_uuid(&self.participant_id)?,
      created_at:     decode_dt(&self.created_at)?,
      first_name:     body.first_name,
      last_name:      body.last_name,
      email:          body.email,
      kind:           body.kind,
      level:          body.level,
      club:           body.club,
      salt:           self.salt,
      pending:        self.pending,
    })
  }
}
