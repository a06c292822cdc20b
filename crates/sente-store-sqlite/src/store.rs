//! [`SqliteStore`] — the SQLite implementation of [`ParticipantStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use sente_core::{
  participant::{NewParticipant, Participant},
  store::ParticipantStore,
  token,
};

use crate::{
  Error, Result,
  encode::{RawParticipant, encode_body, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const ROW_COLUMNS: &str =
  "participant_id, body_json, salt, pending, created_at";

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawParticipant> {
  Ok(RawParticipant {
    participant_id: row.get(0)?,
    body_json:      row.get(1)?,
    salt:           row.get(2)?,
    pending:        row.get(3)?,
    created_at:     row.get(4)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A participant store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ParticipantStore impl ───────────────────────────────────────────────────

impl ParticipantStore for SqliteStore {
  type Error = Error;

  async fn add_participant(&self, input: NewParticipant) -> Result<Participant> {
    let participant = Participant {
      participant_id: Uuid::new_v4(),
      created_at:     Utc::now(),
      first_name:     input.first_name,
      last_name:      input.last_name,
      email:          input.email,
      kind:           input.kind,
      level:          input.level,
      club:           input.club,
      salt:           token::generate_salt(),
      pending:        true,
    };

    let id_str   = encode_uuid(participant.participant_id);
    let body_str = encode_body(&participant.view())?;
    let salt     = participant.salt.clone();
    let at_str   = encode_dt(participant.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO participants (participant_id, body_json, salt, pending, created_at)
           VALUES (?1, ?2, ?3, 1, ?4)",
          rusqlite::params![id_str, body_str, salt, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(participant)
  }

  async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ROW_COLUMNS} FROM participants WHERE participant_id = ?1"
              ),
              rusqlite::params![id_str],
              row_to_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn confirm_participant(
    &self,
    id: Uuid,
    token: &str,
  ) -> Result<Option<Participant>> {
    let id_str = encode_uuid(id);
    let token = token.to_owned();

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!(
              "SELECT {ROW_COLUMNS} FROM participants WHERE participant_id = ?1"
            ),
            rusqlite::params![id_str],
            row_to_raw,
          )
          .optional()?;

        // Guard: the stored salt must match the presented token.
        let Some(mut raw) = raw else { return Ok(None) };
        if raw.salt != token {
          return Ok(None);
        }

        // One-way flip; a no-op when already confirmed.
        conn.execute(
          "UPDATE participants SET pending = 0 WHERE participant_id = ?1",
          rusqlite::params![id_str],
        )?;
        raw.pending = false;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn list_confirmed(&self) -> Result<Vec<Participant>> {
    let raws: Vec<RawParticipant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ROW_COLUMNS} FROM participants WHERE pending = 0"
        ))?;
        let rows = stmt
          .query_map([], row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawParticipant::into_participant)
      .collect()
  }
}
