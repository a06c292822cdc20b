//! The `ParticipantStore` trait.
//!
//! Implemented by storage backends (e.g. `sente-store-sqlite`). The web
//! layer depends on this abstraction, not on any concrete backend, which
//! keeps the rank and validation logic free of I/O in tests.

use std::future::Future;

use uuid::Uuid;

use crate::participant::{NewParticipant, Participant};

/// Abstraction over a participant store backend.
///
/// The only mutations are the initial insert and the one-way
/// `pending -> confirmed` flip; records are never deleted.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ParticipantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new participant. The store assigns the id, the creation
  /// timestamp, a fresh salt, and `pending = true`.
  fn add_participant(
    &self,
    input: NewParticipant,
  ) -> impl Future<Output = Result<Participant, Self::Error>> + Send + '_;

  /// Retrieve a participant by id. Returns `None` if not found.
  fn get_participant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + '_;

  /// Run the confirmation transition: if a participant with `id` exists
  /// and its stored salt equals `token`, set `pending = false` and return
  /// the updated record. Unknown id or mismatched token returns `None`
  /// and mutates nothing.
  ///
  /// Repeating a successful confirmation is harmless: the flag is already
  /// false and the participant is returned again.
  fn confirm_participant<'a>(
    &'a self,
    id: Uuid,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + 'a;

  /// All confirmed (`pending == false`) participants, in no particular
  /// order. Ordering for display is [`crate::level::by_rank_descending`].
  fn list_confirmed(
    &self,
  ) -> impl Future<Output = Result<Vec<Participant>, Self::Error>> + Send + '_;
}
