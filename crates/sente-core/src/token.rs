//! Confirmation-token ("salt") generation.
//!
//! Not a password salt: an opaque, URL-safe bearer token embedded in the
//! confirmation link emailed to the operator.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand_core::{OsRng, RngCore};

/// Entropy per token, before encoding.
pub const SALT_BYTES: usize = 32;

/// Generate a fresh URL-safe confirmation token from the OS RNG.
pub fn generate_salt() -> String {
  let mut buf = [0u8; SALT_BYTES];
  OsRng.fill_bytes(&mut buf);
  URL_SAFE_NO_PAD.encode(buf)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokens_are_nonempty_and_url_safe() {
    let salt = generate_salt();
    // 32 bytes -> 43 base64 chars without padding.
    assert_eq!(salt.len(), 43);
    assert!(
      salt
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
  }

  #[test]
  fn tokens_are_distinct() {
    assert_ne!(generate_salt(), generate_salt());
  }
}
