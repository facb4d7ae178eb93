//! Update Profile Use Case
//!
//! Partial profile update: only fields present in the input are touched.
//! Choosing a username here is what completes onboarding and unlocks the
//! complete-profile gate.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, Username};
use crate::error::{AuthError, AuthResult};

/// Update profile input; `None` fields are left unchanged, empty strings
/// clear the corresponding optional field.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_creator: Option<bool>,
    pub subscription_price: Option<f64>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(raw) = input.username {
            let username = Username::new(raw)
                .map_err(|e| AuthError::InvalidRequest(e.to_string()))?;

            // Taken by someone else?
            if let Some(existing) = self.user_repo.find_by_username(&username).await? {
                if existing.user_id != user.user_id {
                    return Err(AuthError::UsernameTaken);
                }
            }

            user.set_username(username);
        }

        if let Some(display_name) = input.display_name {
            user.display_name = normalize(display_name);
            user.touch();
        }

        if let Some(bio) = input.bio {
            user.bio = normalize(bio);
            user.touch();
        }

        if let Some(email) = input.email {
            let email = normalize(email);
            if let Some(ref value) = email {
                if !looks_like_email(value) {
                    return Err(AuthError::InvalidRequest(
                        "Invalid email address".to_string(),
                    ));
                }
            }
            user.email = email;
            user.touch();
        }

        if let Some(profile_image) = input.profile_image {
            user.profile_image = normalize(profile_image);
            user.touch();
        }

        if let Some(cover_image) = input.cover_image {
            user.cover_image = normalize(cover_image);
            user.touch();
        }

        if input.is_creator.is_some() || input.subscription_price.is_some() {
            if let Some(price) = input.subscription_price {
                if !price.is_finite() || price < 0.0 {
                    return Err(AuthError::InvalidRequest(
                        "Subscription price must be a non-negative number".to_string(),
                    ));
                }
            }
            let is_creator = input.is_creator.unwrap_or(user.is_creator);
            let price = input.subscription_price.or(user.subscription_price);
            user.set_creator(is_creator, price);
        }

        self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            profile_complete = user.has_complete_profile(),
            "Profile updated"
        );

        Ok(user)
    }
}

/// Trim and map empty to `None` (clearing the field).
fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Minimal shape check: `local@domain` with a dot in the domain and no
/// whitespace anywhere.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
