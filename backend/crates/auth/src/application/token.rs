//! Session Token Signing
//!
//! The cookie carries `"<session_id>.<base64url(HMAC-SHA256(secret, id))>"`.
//! The HMAC makes the binding tamper-evident: a client cannot mint a token
//! for an arbitrary session ID, so the cookie is a capability reference,
//! not trusted data.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use kernel::id::SessionId;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate a signed session token for a session ID.
pub fn generate_session_token(secret: &[u8; 32], session_id: SessionId) -> String {
    let session_id = session_id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token.
///
/// Returns `None` for any malformed or tampered token; absence of a valid
/// session is a normal state, never an error.
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> Option<SessionId> {
    let (session_id_str, signature_b64) = token.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac.verify_slice(&signature).ok()?;

    let uuid = session_id_str.parse().ok()?;
    Some(SessionId::from_uuid(uuid))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [42u8; 32];

    #[test]
    fn test_roundtrip() {
        let session_id = SessionId::new();
        let token = generate_session_token(&SECRET, session_id);
        assert_eq!(parse_session_token(&SECRET, &token), Some(session_id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = generate_session_token(&SECRET, SessionId::new());
        assert_eq!(parse_session_token(&[43u8; 32], &token), None);
    }

    #[test]
    fn test_tampered_session_id_rejected() {
        let token = generate_session_token(&SECRET, SessionId::new());
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert_eq!(parse_session_token(&SECRET, &forged), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(parse_session_token(&SECRET, ""), None);
        assert_eq!(parse_session_token(&SECRET, "no-dot-here"), None);
        assert_eq!(parse_session_token(&SECRET, "not-a-uuid.c2ln"), None);
        assert_eq!(parse_session_token(&SECRET, "a.b.c"), None);
    }
}
