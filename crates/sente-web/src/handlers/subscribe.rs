//! `POST /` — validate and persist a subscription.

use axum::{
  Form,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use sente_core::{store::ParticipantStore, validate::RegistrationInput};
use sente_mailer::Mailer;

use crate::{AppState, error::Error, handlers::pages, notify};

/// On success: persist, fire the notices, 302 to the pending page.
/// On validation failure: re-render the form with inline errors, 200.
pub async fn submit<S, M>(
  State(state): State<AppState<S, M>>,
  Form(input): Form<RegistrationInput>,
) -> Result<Response, Error>
where
  S: ParticipantStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  M: Mailer,
{
  match input.validate() {
    Ok(new_participant) => {
      tracing::info!(
        email = %new_participant.email,
        kind = %new_participant.kind,
        "persisting participant"
      );
      let participant = state
        .store
        .add_participant(new_participant)
        .await
        .map_err(Error::store)?;

      notify::submission_notices(
        state.mailer.as_ref(),
        &state.config,
        &participant,
      )
      .await;

      Ok(
        (StatusCode::FOUND, [(header::LOCATION, "/en-attente")])
          .into_response(),
      )
    }
    Err(errors) => Ok(
      pages::render_form(&state.config, &input, &errors)?.into_response(),
    ),
  }
}
