//! Wallet Signature Verification
//!
//! Proves that the submitter of a challenge holds the private key behind
//! a wallet address. Verification failures are data, not faults: every
//! malformed input path returns `false`, nothing panics or escapes.

use crate::domain::value_object::WalletAddress;

/// Verify that `signature` signs exactly `message` under the public key
/// embedded in `address`.
pub fn verify_wallet_signature(
    address: &WalletAddress,
    message: &[u8],
    signature: &[u8],
) -> bool {
    platform::signature::verify_ed25519(address.public_key(), message, signature)
}

/// As [`verify_wallet_signature`], but taking the encoded address form.
///
/// A syntactically invalid address verifies as `false`.
pub fn verify(address: &str, message: &[u8], signature: &[u8]) -> bool {
    match WalletAddress::parse(address) {
        Ok(address) => verify_wallet_signature(&address, message, signature),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair() -> (SigningKey, WalletAddress) {
        let key = SigningKey::from_bytes(&[11u8; 32]);
        let address = WalletAddress::from_public_key(key.verifying_key().as_bytes());
        (key, address)
    }

    #[test]
    fn test_valid_signature_accepted() {
        let (key, address) = keypair();
        let message = b"Sign this message to authenticate with Algofans.\nTimestamp: 1700000000000";
        let sig = key.sign(message).to_bytes();

        assert!(verify_wallet_signature(&address, message, &sig));
        assert!(verify(address.as_str(), message, &sig));
    }

    #[test]
    fn test_wrong_message_rejected() {
        let (key, address) = keypair();
        let sig = key.sign(b"one message").to_bytes();

        assert!(!verify_wallet_signature(&address, b"another message", &sig));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let (key, _) = keypair();
        let other = WalletAddress::from_public_key(
            SigningKey::from_bytes(&[12u8; 32]).verifying_key().as_bytes(),
        );
        let message = b"a message";
        let sig = key.sign(message).to_bytes();

        assert!(!verify_wallet_signature(&other, message, &sig));
    }

    #[test]
    fn test_malformed_address_is_false_not_panic() {
        assert!(!verify("definitely-not-an-address", b"msg", &[0u8; 64]));
        assert!(!verify("", b"msg", &[0u8; 64]));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let (key, address) = keypair();
        let message = b"a message";
        let sig = key.sign(message).to_bytes();

        assert!(!verify_wallet_signature(&address, message, &sig[..40]));
        assert!(!verify_wallet_signature(&address, message, &[]));
    }
}
