//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// All fields are optional at the serde level so a missing field is
/// reported as a 400 with a useful message instead of a body-rejection.
/// The signature travels as a raw byte array, exactly as the wallet
/// produced it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub wallet_address: Option<String>,
    pub message: Option<String>,
    pub signature: Option<Vec<u8>>,
}

// ============================================================================
// Logout
// ============================================================================

/// Logout response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Current User / Profile
// ============================================================================

/// User representation returned by `/me`, login, and profile updates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub wallet_address: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_creator: bool,
    pub subscription_price: Option<f64>,
    pub created_at: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            wallet_address: user.wallet_address.as_str().to_string(),
            username: user.username.as_ref().map(|u| u.as_str().to_string()),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
            cover_image: user.cover_image.clone(),
            is_creator: user.is_creator,
            subscription_price: user.subscription_price,
            created_at: user.created_at.timestamp_millis(),
        }
    }
}

/// Update profile request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_creator: Option<bool>,
    pub subscription_price: Option<f64>,
}
