//! Page rendering: the subscription form and the static pending page.

use askama::Template;
use axum::{extract::State, response::Html};
use sente_core::{
  level::{self, Choice},
  store::ParticipantStore,
  validate::{FormErrors, RegistrationInput},
};
use sente_mailer::Mailer;

use crate::{AppState, ServerConfig, error::Error};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
  tournament: &'a str,
  form:       &'a RegistrationInput,
  errors:     &'a FormErrors,
  levels:     &'a [Choice],
}

#[derive(Template)]
#[template(path = "pending.html")]
struct PendingTemplate;

/// Render the subscription form with the given values and inline errors.
/// Shared by the blank `GET /` form and the failed-validation re-render.
pub fn render_form(
  config: &ServerConfig,
  form: &RegistrationInput,
  errors: &FormErrors,
) -> Result<Html<String>, Error> {
  let levels = level::choices();
  let template = IndexTemplate {
    tournament: &config.tournament_name,
    form,
    errors,
    levels: &levels,
  };
  Ok(Html(template.render()?))
}

/// `GET /` — the blank subscription form.
pub async fn subscription_form<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Html<String>, Error>
where
  S: ParticipantStore,
  M: Mailer,
{
  render_form(
    &state.config,
    &RegistrationInput::default(),
    &FormErrors::default(),
  )
}

/// `GET /en-attente` (and `/confirmation`) — static pending page.
pub async fn pending_page() -> Result<Html<String>, Error> {
  Ok(Html(PendingTemplate.render()?))
}
