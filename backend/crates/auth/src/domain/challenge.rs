//! Challenge Validation
//!
//! The client builds a fixed textual message ending in a labeled
//! millisecond timestamp, signs it with the wallet, and submits both.
//! This module checks that the message is well-formed and fresh before
//! any cryptography runs.
//!
//! The protocol carries no server-issued nonce, only the client-embedded
//! timestamp, so the freshness window bounds replay exposure rather than
//! eliminating it. That is a documented protocol limitation; extending
//! the protocol with single-use nonces is out of scope here.

use thiserror::Error;

/// The exact text a wallet signs (timestamp appended by the client).
pub const CHALLENGE_PREFIX: &str = "Sign this message to authenticate with Algofans.";

/// Label preceding the embedded millisecond timestamp.
pub const TIMESTAMP_LABEL: &str = "Timestamp: ";

/// Challenge rejection reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("no timestamp field in message")]
    MissingTimestamp,

    #[error("timestamp is not a valid integer")]
    MalformedTimestamp,

    #[error("message is older than the freshness window")]
    Expired,

    #[error("message is dated in the future")]
    FutureDated,
}

/// Extract the embedded millisecond timestamp from the message text.
///
/// Looks for the labeled field `Timestamp: <digits>`. Only an unsigned
/// decimal run is accepted, so negative values are rejected here along
/// with non-numeric ones.
pub fn extract_timestamp_ms(message: &str) -> Result<i64, ChallengeError> {
    let start = message
        .find(TIMESTAMP_LABEL)
        .ok_or(ChallengeError::MissingTimestamp)?
        + TIMESTAMP_LABEL.len();

    let digits: &str = message[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");

    if digits.is_empty() {
        return Err(ChallengeError::MalformedTimestamp);
    }

    digits
        .parse::<i64>()
        .map_err(|_| ChallengeError::MalformedTimestamp)
}

/// Validate message freshness against the verifier's clock.
///
/// Accepts when `now - ts <= freshness_window_ms` and
/// `ts <= now + max_clock_skew_ms`. The future-dated check is deliberate
/// hardening: a message claiming to come from the future indicates clock
/// manipulation or a pre-signed replay payload, not honest skew.
pub fn validate(
    message: &str,
    now_ms: i64,
    freshness_window_ms: i64,
    max_clock_skew_ms: i64,
) -> Result<i64, ChallengeError> {
    let timestamp = extract_timestamp_ms(message)?;

    if timestamp > now_ms + max_clock_skew_ms {
        return Err(ChallengeError::FutureDated);
    }

    if now_ms - timestamp > freshness_window_ms {
        return Err(ChallengeError::Expired);
    }

    Ok(timestamp)
}

/// Build the canonical challenge message for a timestamp.
///
/// The server never issues challenges (the client assembles and signs
/// them), but tests and clients share this one source of the template.
pub fn build_message(timestamp_ms: i64) -> String {
    format!("{CHALLENGE_PREFIX}\n{TIMESTAMP_LABEL}{timestamp_ms}")
}
