//! Form validation rules and the subscription form itself.
//!
//! Rules are plain functions returning `Option<String>` (the localized
//! error message), composed per field. The conditional-required rule is a
//! value pairing (sibling value, expected value), not a type hierarchy.

use serde::Deserialize;

use crate::{
  level::Level,
  participant::{NewParticipant, SubscriptionKind},
};

// ─── Messages ────────────────────────────────────────────────────────────────

pub const MSG_REQUIRED: &str = "Ce champ est obligatoire.";
pub const MSG_REQUIRED_IF_PLAYER: &str =
  "Ce champ est obligatoire si tu t'inscris comme joueur⋅se.";
pub const MSG_INVALID_EMAIL: &str = "Ce courriel est invalide.";
pub const MSG_INVALID_CHOICE: &str = "Ce choix est invalide.";

fn length_message(min: usize, max: usize) -> String {
  format!("La taille de ce champ est limitée de {min} à {max} caractères.")
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Non-empty after trimming.
pub fn required(value: &str, message: &str) -> Option<String> {
  if value.trim().is_empty() {
    Some(message.to_string())
  } else {
    None
  }
}

/// Character count within `min..=max`. Empty input is left to `required`.
pub fn length(value: &str, min: usize, max: usize) -> Option<String> {
  let count = value.chars().count();
  if count == 0 || (min..=max).contains(&count) {
    None
  } else {
    Some(length_message(min, max))
  }
}

/// Structural email check: a single `@`, a non-empty local part, and a
/// domain with an interior dot.
pub fn email(value: &str, message: &str) -> Option<String> {
  let mut parts = value.split('@');
  let valid = match (parts.next(), parts.next(), parts.next()) {
    (Some(local), Some(domain), None) => {
      !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
    }
    _ => false,
  };
  if valid { None } else { Some(message.to_string()) }
}

/// Required only when a sibling field holds a specific value: if
/// `sibling == expected`, apply [`required`] to `value`; otherwise `value`
/// is always valid, including empty.
pub fn required_if(
  sibling: &str,
  expected: &str,
  value: &str,
  message: &str,
) -> Option<String> {
  if sibling == expected {
    required(value, message)
  } else {
    None
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Raw subscription form data, exactly as posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationInput {
  #[serde(default)]
  pub first_name:   String,
  #[serde(default)]
  pub last_name:    String,
  #[serde(default)]
  pub email:        String,
  /// An unchecked radio group posts nothing, hence the default.
  #[serde(default)]
  pub subscription: String,
  #[serde(default)]
  pub level:        String,
  #[serde(default)]
  pub club:         String,
}

/// Per-field validation failures; `None` means the field passed. The first
/// failing rule wins per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
  pub first_name:   Option<String>,
  pub last_name:    Option<String>,
  pub email:        Option<String>,
  pub subscription: Option<String>,
  pub level:        Option<String>,
  pub club:         Option<String>,
}

impl FormErrors {
  pub fn is_empty(&self) -> bool {
    self.first_name.is_none()
      && self.last_name.is_none()
      && self.email.is_none()
      && self.subscription.is_none()
      && self.level.is_none()
      && self.club.is_none()
  }
}

impl RegistrationInput {
  /// Run every field's rule chain. On success, produce the participant to
  /// persist, with `level`/`club` carried only for players.
  pub fn validate(&self) -> Result<NewParticipant, FormErrors> {
    let first_name = self.first_name.trim();
    let last_name = self.last_name.trim();
    let email_value = self.email.trim();
    let subscription = self.subscription.trim();
    let level_value = self.level.trim();
    let club = self.club.trim();

    let mut errors = FormErrors {
      first_name: required(first_name, MSG_REQUIRED)
        .or_else(|| length(first_name, 1, 100)),
      last_name:  required(last_name, MSG_REQUIRED)
        .or_else(|| length(last_name, 1, 100)),
      email:      required(email_value, MSG_REQUIRED)
        .or_else(|| email(email_value, MSG_INVALID_EMAIL))
        .or_else(|| length(email_value, 6, 100)),
      subscription: required(subscription, MSG_REQUIRED),
      level:      required_if(
        subscription,
        SubscriptionKind::Player.as_str(),
        level_value,
        MSG_REQUIRED_IF_PLAYER,
      ),
      club:       required_if(
        subscription,
        SubscriptionKind::Player.as_str(),
        club,
        MSG_REQUIRED_IF_PLAYER,
      ),
    };

    let kind = match subscription.parse::<SubscriptionKind>() {
      Ok(kind) => Some(kind),
      Err(_) => {
        if errors.subscription.is_none() {
          errors.subscription = Some(MSG_INVALID_CHOICE.to_string());
        }
        None
      }
    };

    // A submitted level must be one of the selectable codes.
    if errors.level.is_none()
      && !level_value.is_empty()
      && level_value.parse::<Level>().is_err()
    {
      errors.level = Some(MSG_INVALID_CHOICE.to_string());
    }

    let kind = match (kind, errors.is_empty()) {
      (Some(kind), true) => kind,
      _ => return Err(errors),
    };

    let (level, club) = match kind {
      SubscriptionKind::Player => {
        (Some(level_value.to_string()), Some(club.to_string()))
      }
      SubscriptionKind::NonPlayer => (None, None),
    };

    Ok(NewParticipant {
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      email: email_value.to_string(),
      kind,
      level,
      club,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
