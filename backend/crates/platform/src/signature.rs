//! Ed25519 Signature Verification
//!
//! Thin wrapper over `ed25519-dalek` with strict length checks.
//! Verification failures are data, not faults: malformed keys and
//! signatures simply fail to verify.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Ed25519 public key length in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes
pub const SIGNATURE_LENGTH: usize = 64;

/// Verify an Ed25519 signature over `message`.
///
/// Returns `false` for wrong-length inputs, non-canonical public keys,
/// and invalid signatures alike. Never panics.
pub fn verify_ed25519(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(pk_bytes) = <[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };

    let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
        return false;
    };

    let signature = Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn test_valid_signature_verifies() {
        let key = test_key();
        let message = b"attack at dawn";
        let sig = key.sign(message);

        assert!(verify_ed25519(
            key.verifying_key().as_bytes(),
            message,
            &sig.to_bytes()
        ));
    }

    #[test]
    fn test_different_message_fails() {
        let key = test_key();
        let sig = key.sign(b"attack at dawn");

        assert!(!verify_ed25519(
            key.verifying_key().as_bytes(),
            b"attack at dusk",
            &sig.to_bytes()
        ));
    }

    #[test]
    fn test_different_key_fails() {
        let key = test_key();
        let other = SigningKey::from_bytes(&[9u8; 32]);
        let message = b"attack at dawn";
        let sig = key.sign(message);

        assert!(!verify_ed25519(
            other.verifying_key().as_bytes(),
            message,
            &sig.to_bytes()
        ));
    }

    #[test]
    fn test_malformed_inputs_fail_without_panic() {
        let key = test_key();
        let message = b"attack at dawn";
        let sig = key.sign(message).to_bytes();

        // Truncated signature
        assert!(!verify_ed25519(
            key.verifying_key().as_bytes(),
            message,
            &sig[..63]
        ));
        // Truncated public key
        assert!(!verify_ed25519(
            &key.verifying_key().as_bytes()[..31],
            message,
            &sig
        ));
        // Empty everything
        assert!(!verify_ed25519(&[], &[], &[]));
    }
}
