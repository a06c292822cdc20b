//! Error types for `sente-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A level code that is not `(digits)(k|d|p)`. Validated input can never
  /// produce this; hitting it at read time means a corrupt record.
  #[error("malformed level code: {0:?}")]
  MalformedLevel(String),

  #[error("unknown subscription kind: {0:?}")]
  UnknownSubscriptionKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
