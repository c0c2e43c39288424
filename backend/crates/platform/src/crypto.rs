//! Cryptographic Utilities
//!
//! Random bytes and HMAC-SHA256 signed tokens.
//!
//! A signed token is `base64url(payload) "." base64url(HMAC-SHA256(key, base64url(payload)))`.
//! The payload is opaque here; callers put JSON claims in it.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Sign `payload` with `key`
pub fn sign_token(key: &[u8], payload: &[u8]) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    let signature = mac_for(key, encoded.as_bytes()).finalize().into_bytes();
    format!("{}.{}", encoded, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token produced by [`sign_token`] and return its payload
///
/// Returns `None` for any malformed token or signature mismatch. The
/// comparison is constant-time (`Mac::verify_slice`).
pub fn verify_token(key: &[u8], token: &str) -> Option<Vec<u8>> {
    let (encoded, signature_b64) = token.split_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac_for(key, encoded.as_bytes())
        .verify_slice(&signature)
        .ok()?;

    URL_SAFE_NO_PAD.decode(encoded).ok()
}

fn mac_for(key: &[u8], data: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac
}
