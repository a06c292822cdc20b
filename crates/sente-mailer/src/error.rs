//! Error type for `sente-mailer`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("email API returned status {0}")]
  Status(u16),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
