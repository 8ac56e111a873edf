use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;

use crate::domain::types::TOKEN_BYTE_LENGTH;

/// Generate an opaque token: 32 bytes from the thread-local CSPRNG, encoded as
/// unpadded URL-safe base64 (43 characters).
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTE_LENGTH] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}
