//! `GET /participants` — the public listing.

use axum::{Json, extract::State};
use sente_core::{
  level,
  participant::{Participant, ParticipantView},
  store::ParticipantStore,
};
use sente_mailer::Mailer;

use crate::{AppState, error::Error};

/// Confirmed participants only, strongest first, internal fields
/// stripped.
pub async fn handler<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Json<Vec<ParticipantView>>, Error>
where
  S: ParticipantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  M: Mailer,
{
  let confirmed = state.store.list_confirmed().await.map_err(Error::store)?;
  let sorted = level::by_rank_descending(confirmed)?;
  Ok(Json(sorted.iter().map(Participant::view).collect()))
}
