//! `GET /confirm/{participant_id}/{salt}` — the confirmation transition.

use askama::Template;
use axum::{
  extract::{Path, State},
  response::Html,
};
use sente_core::store::ParticipantStore;
use sente_mailer::Mailer;
use uuid::Uuid;

use crate::{AppState, error::Error, notify};

#[derive(Template)]
#[template(path = "confirm.html")]
struct ConfirmTemplate {
  success: bool,
}

/// Confirm if the token matches; render a success or failure view, 200
/// either way. An unparseable id takes the same failure branch as an
/// unknown one.
pub async fn handler<S, M>(
  State(state): State<AppState<S, M>>,
  Path((participant_id, salt)): Path<(String, String)>,
) -> Result<Html<String>, Error>
where
  S: ParticipantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  M: Mailer,
{
  let confirmed = match Uuid::parse_str(&participant_id) {
    Ok(id) => state
      .store
      .confirm_participant(id, &salt)
      .await
      .map_err(Error::store)?,
    Err(_) => None,
  };

  match &confirmed {
    Some(participant) => {
      tracing::info!(
        participant_id = %participant.participant_id,
        "participant confirmed"
      );
      notify::confirmation_notice(
        state.mailer.as_ref(),
        &state.config,
        participant,
      )
      .await;
    }
    None => {
      tracing::info!(participant_id = %participant_id, "confirmation rejected");
    }
  }

  let template = ConfirmTemplate { success: confirmed.is_some() };
  Ok(Html(template.render()?))
}
