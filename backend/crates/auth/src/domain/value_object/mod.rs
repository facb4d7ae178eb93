//! Value Object Module

pub mod user_id;
pub mod username;
pub mod wallet_address;

pub use user_id::UserId;
pub use username::Username;
pub use wallet_address::WalletAddress;
