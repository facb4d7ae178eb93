//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-512/256, RFC 4648 base32)
//! - Ed25519 signature verification
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod signature;
