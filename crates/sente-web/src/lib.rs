//! HTTP layer for the Sente tournament registration service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sente_core::store::ParticipantStore`] and [`sente_mailer::Mailer`].
//! TLS and reverse-proxy concerns are the caller's responsibility.

pub mod error;
pub mod handlers;
pub mod notify;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use sente_core::store::ParticipantStore;
use sente_mailer::Mailer;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{confirm, pages, participants, subscribe};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  /// Public origin used to build confirmation links, no trailing slash.
  pub base_url:         String,
  pub store_path:       PathBuf,
  pub tournament_name:  String,
  pub sendgrid_api_key: String,
  pub from_email:       String,
  pub reply_to_email:   String,
  pub reply_to_name:    String,
  /// Operator address receiving the validation notices.
  pub admin_email:      String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S, M> {
  pub store:  Arc<S>,
  pub mailer: Arc<M>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the registration service.
pub fn router<S, M>(state: AppState<S, M>) -> Router
where
  S: ParticipantStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  M: Mailer + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/",
      get(pages::subscription_form::<S, M>).post(subscribe::submit::<S, M>),
    )
    .route("/en-attente", get(pages::pending_page))
    .route("/confirmation", get(pages::pending_page))
    .route(
      "/confirm/{participant_id}/{salt}",
      get(confirm::handler::<S, M>),
    )
    .route("/participants", get(participants::handler::<S, M>))
    // The listing is consumed cross-origin by the tournament site.
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use sente_core::participant::{NewParticipant, SubscriptionKind};
  use sente_mailer::Message;
  use sente_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  // ── Test doubles ────────────────────────────────────────────────────────────

  #[derive(Clone, Default)]
  struct RecordingMailer {
    sent: Arc<Mutex<Vec<Message>>>,
  }

  impl RecordingMailer {
    fn sent(&self) -> Vec<Message> {
      self.sent.lock().unwrap().clone()
    }
  }

  impl Mailer for RecordingMailer {
    type Error = std::convert::Infallible;

    async fn send(&self, message: &Message) -> Result<(), Self::Error> {
      self.sent.lock().unwrap().push(message.clone());
      Ok(())
    }
  }

  #[derive(Debug, thiserror::Error)]
  #[error("mail provider down")]
  struct MailDown;

  #[derive(Clone)]
  struct FailingMailer;

  impl Mailer for FailingMailer {
    type Error = MailDown;

    async fn send(&self, _message: &Message) -> Result<(), Self::Error> {
      Err(MailDown)
    }
  }

  // ── Helpers ─────────────────────────────────────────────────────────────────

  fn test_config() -> ServerConfig {
    ServerConfig {
      host:             "127.0.0.1".to_string(),
      port:             8080,
      base_url:         "http://sente.test".to_string(),
      store_path:       PathBuf::from(":memory:"),
      tournament_name:  "le tournoi de Nantes".to_string(),
      sendgrid_api_key: "test-key".to_string(),
      from_email:       "ne-pas-repondre@sente.test".to_string(),
      reply_to_email:   "club@sente.test".to_string(),
      reply_to_name:    "Le club".to_string(),
      admin_email:      "operateur@sente.test".to_string(),
    }
  }

  async fn make_state_with<M: Mailer>(mailer: M) -> AppState<SqliteStore, M> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState {
      store:  Arc::new(store),
      mailer: Arc::new(mailer),
      config: Arc::new(test_config()),
    }
  }

  async fn make_state() -> AppState<SqliteStore, RecordingMailer> {
    make_state_with(RecordingMailer::default()).await
  }

  async fn get_raw<S, M>(
    state: AppState<S, M>,
    uri: &str,
  ) -> axum::response::Response
  where
    S: ParticipantStore + Clone + Send + Sync + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
  {
    let req = Request::builder()
      .method("GET")
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn post_form<S, M>(
    state: AppState<S, M>,
    body: &str,
  ) -> axum::response::Response
  where
    S: ParticipantStore + Clone + Send + Sync + 'static,
    S::Error: std::error::Error + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
  {
    let req = Request::builder()
      .method("POST")
      .uri("/")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  const VALID_PLAYER: &str = "first_name=Lila&last_name=Zereau\
    &email=lila%40lizzie.org&subscription=player&level=3d&club=44Na";

  fn player(first_name: &str, level: &str) -> NewParticipant {
    NewParticipant {
      first_name: first_name.into(),
      last_name:  "Zereau".into(),
      email:      format!("{}@lizzie.org", first_name.to_lowercase()),
      kind:       SubscriptionKind::Player,
      level:      Some(level.into()),
      club:       Some("44Na".into()),
    }
  }

  // ── Pages ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn form_page_renders() {
    let resp = get_raw(make_state().await, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("name=\"first_name\""), "{html}");
    assert!(html.contains("30 Kyu"), "{html}");
    assert!(html.contains("9 Dan Pro"), "{html}");
  }

  #[tokio::test]
  async fn pending_page_and_alias_render() {
    for uri in ["/en-attente", "/confirmation"] {
      let resp = get_raw(make_state().await, uri).await;
      assert_eq!(resp.status(), StatusCode::OK);
    }
  }

  // ── Submission ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn valid_submission_persists_and_redirects() {
    let state = make_state().await;
    let mailer = (*state.mailer).clone();
    let store = state.store.clone();

    let resp = post_form(state, VALID_PLAYER).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
      resp.headers().get(header::LOCATION).unwrap(),
      "/en-attente"
    );

    // Persisted pending with a fresh salt; not publicly listed yet.
    use sente_core::store::ParticipantStore as _;
    assert!(store.list_confirmed().await.unwrap().is_empty());

    // Pending notice to the participant, validation notice to the
    // operator, in that order.
    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "lila@lizzie.org");
    assert!(sent[0].subject.contains("en cours de validation"));
    assert_eq!(sent[1].to, "operateur@sente.test");
    assert!(
      sent[1].body.contains("http://sente.test/confirm/"),
      "admin notice must carry the confirmation link: {}",
      sent[1].body
    );
    assert!(sent[1].body.contains("3d"));
    assert!(sent[1].body.contains("44Na"));
  }

  #[tokio::test]
  async fn submission_to_listing_end_to_end() {
    let state = make_state().await;
    let mailer = (*state.mailer).clone();

    let resp = post_form(state.clone(), VALID_PLAYER).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    // Follow the confirmation link from the operator notice.
    let admin_body = mailer.sent()[1].body.clone();
    let link = admin_body
      .lines()
      .find(|line| line.starts_with("http://sente.test/confirm/"))
      .expect("operator notice carries the confirmation link")
      .to_string();
    let path = link.trim_start_matches("http://sente.test");

    let resp = get_raw(state.clone(), path).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("confirmée"));

    let resp = get_raw(state, "/participants").await;
    let json: serde_json::Value =
      serde_json::from_str(&body_string(resp).await).unwrap();
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["first_name"], "Lila");
    assert_eq!(listed[0]["level"], "3d");
    assert_eq!(listed[0]["club"], "44Na");
    assert!(listed[0].get("salt").is_none());
    assert!(listed[0].get("pending").is_none());
  }

  #[tokio::test]
  async fn player_without_level_rerenders_with_errors() {
    let state = make_state().await;
    let mailer = (*state.mailer).clone();

    let body = "first_name=Lila&last_name=Zereau&email=lila%40lizzie.org\
      &subscription=player&level=&club=";
    let resp = post_form(state, body).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(
      html.contains("obligatoire si tu t&#x27;inscris comme joueur"),
      "{html}"
    );
    // Submitted values survive the re-render.
    assert!(html.contains("value=\"Lila\""), "{html}");
    // Nothing persisted, nothing sent.
    assert!(mailer.sent().is_empty());
  }

  #[tokio::test]
  async fn non_player_with_empty_level_and_club_succeeds() {
    let body = "first_name=Max&last_name=Zereau&email=max%40lizzie.org\
      &subscription=non-player&level=&club=";
    let resp = post_form(make_state().await, body).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
  }

  #[tokio::test]
  async fn email_failure_is_swallowed() {
    let state = make_state_with(FailingMailer).await;

    // Both sends fail; the submission still succeeds and redirects.
    let resp = post_form(state, VALID_PLAYER).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
      resp.headers().get(header::LOCATION).unwrap(),
      "/en-attente"
    );
  }

  // ── Confirmation ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn confirm_with_correct_token_renders_success_and_notifies() {
    use sente_core::store::ParticipantStore as _;
    let state = make_state().await;
    let mailer = (*state.mailer).clone();

    let participant = state
      .store
      .add_participant(player("Lila", "3d"))
      .await
      .unwrap();

    let uri = format!(
      "/confirm/{}/{}",
      participant.participant_id, participant.salt
    );
    let resp = get_raw(state, &uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("confirmée"), "{html}");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "lila@lizzie.org");
    assert_eq!(sent[0].subject, "Validation d'inscription");
  }

  #[tokio::test]
  async fn confirm_with_wrong_token_renders_failure_without_mutation() {
    use sente_core::store::ParticipantStore as _;
    let state = make_state().await;
    let mailer = (*state.mailer).clone();
    let store = state.store.clone();

    let participant = state
      .store
      .add_participant(player("Lila", "3d"))
      .await
      .unwrap();

    let uri = format!("/confirm/{}/wrong-token", participant.participant_id);
    let resp = get_raw(state, &uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("échoué"), "{html}");

    let fetched = store
      .get_participant(participant.participant_id)
      .await
      .unwrap()
      .unwrap();
    assert!(fetched.pending);
    assert!(mailer.sent().is_empty());
  }

  #[tokio::test]
  async fn confirm_with_unparseable_id_renders_failure() {
    let resp = get_raw(make_state().await, "/confirm/not-a-uuid/token").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("échoué"), "{html}");
  }

  #[tokio::test]
  async fn repeated_confirmation_still_renders_success() {
    use sente_core::store::ParticipantStore as _;
    let state = make_state().await;

    let participant = state
      .store
      .add_participant(player("Lila", "3d"))
      .await
      .unwrap();
    let uri = format!(
      "/confirm/{}/{}",
      participant.participant_id, participant.salt
    );

    let first = get_raw(state.clone(), &uri).await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = get_raw(state, &uri).await;
    let html = body_string(second).await;
    assert!(html.contains("confirmée"), "{html}");
  }

  // ── Listing ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn listing_orders_by_rank_and_strips_internal_fields() {
    use sente_core::store::ParticipantStore as _;
    let state = make_state().await;

    for (name, level) in [("Deux", "2d"), ("Trois", "3d"), ("Pro", "1p")] {
      let participant = state
        .store
        .add_participant(player(name, level))
        .await
        .unwrap();
      let uri = format!(
        "/confirm/{}/{}",
        participant.participant_id, participant.salt
      );
      let resp = get_raw(state.clone(), &uri).await;
      assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = get_raw(state, "/participants").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value =
      serde_json::from_str(&body_string(resp).await).unwrap();

    let levels: Vec<&str> = json
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["level"].as_str().unwrap())
      .collect();
    assert_eq!(levels, ["1p", "3d", "2d"]);

    for entry in json.as_array().unwrap() {
      assert!(entry.get("salt").is_none());
      assert!(entry.get("pending").is_none());
      assert_eq!(entry["type"], "player");
    }
  }

  #[tokio::test]
  async fn listing_excludes_pending_participants() {
    use sente_core::store::ParticipantStore as _;
    let state = make_state().await;

    state
      .store
      .add_participant(player("Lila", "3d"))
      .await
      .unwrap();

    let resp = get_raw(state, "/participants").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value =
      serde_json::from_str(&body_string(resp).await).unwrap();
    assert!(json.as_array().unwrap().is_empty());
  }
}
