//! User Entity
//!
//! The persisted identity behind a wallet address. Minted exactly once per
//! address on first successful authentication; never deleted by the core.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, Username, WalletAddress};

/// User entity
///
/// A fresh identity has no username and no display fields; choosing a
/// username later is what completes the profile.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Wallet address (unique, immutable once assigned)
    pub wallet_address: WalletAddress,
    /// Public handle; None until onboarding finishes
    pub username: Option<Username>,
    /// Display name shown instead of the username
    pub display_name: Option<String>,
    /// Short profile text
    pub bio: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Avatar image URL
    pub profile_image: Option<String>,
    /// Profile cover image URL
    pub cover_image: Option<String>,
    /// Whether this identity receives paid subscriptions
    pub is_creator: bool,
    /// Monthly subscription price, if a creator has set one
    pub subscription_price: Option<f64>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new identity for a first-seen wallet address.
    pub fn new(wallet_address: WalletAddress) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            wallet_address,
            username: None,
            display_name: None,
            bio: None,
            email: None,
            profile_image: None,
            cover_image: None,
            is_creator: false,
            subscription_price: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A profile is complete once a username has been chosen.
    pub fn has_complete_profile(&self) -> bool {
        self.username.is_some()
    }

    /// Set the username (onboarding or rename).
    pub fn set_username(&mut self, username: Username) {
        self.username = Some(username);
        self.updated_at = Utc::now();
    }

    /// Toggle creator status and its subscription price.
    pub fn set_creator(&mut self, is_creator: bool, subscription_price: Option<f64>) {
        self.is_creator = is_creator;
        self.subscription_price = if is_creator { subscription_price } else { None };
        self.updated_at = Utc::now();
    }

    /// Bump the updated timestamp after display-field edits.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
