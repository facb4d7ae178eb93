//! Integration tests for the auth crate
//!
//! End-to-end scenarios over the in-memory repository: real Ed25519
//! keys, real addresses, the full login pipeline.

#[cfg(test)]
mod helpers {
    use chrono::Utc;
    use ed25519_dalek::{Signer, SigningKey};

    use crate::application::LoginInput;
    use crate::domain::challenge::build_message;
    use crate::domain::value_object::WalletAddress;

    pub fn test_keypair(seed: u8) -> (SigningKey, WalletAddress) {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let address = WalletAddress::from_public_key(&key.verifying_key().to_bytes());
        (key, address)
    }

    pub fn signed_login(key: &SigningKey, address: &WalletAddress, timestamp_ms: i64) -> LoginInput {
        let message = build_message(timestamp_ms);
        let signature = key.sign(message.as_bytes()).to_bytes().to_vec();

        LoginInput {
            wallet_address: address.as_str().to_string(),
            message,
            signature,
        }
    }

    pub fn fresh_login(key: &SigningKey, address: &WalletAddress) -> LoginInput {
        signed_login(key, address, Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod login_tests {
    use std::sync::Arc;

    use chrono::Utc;
    use ed25519_dalek::Signer;

    use super::helpers::{fresh_login, signed_login, test_keypair};
    use crate::application::config::AuthConfig;
    use crate::application::token::parse_session_token;
    use crate::application::{LoginInput, LoginUseCase};
    use crate::domain::repository::SessionRepository;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    fn login_use_case(
        repo: &InMemoryAuthRepository,
        config: &Arc<AuthConfig>,
    ) -> LoginUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            config.clone(),
        )
    }

    #[tokio::test]
    async fn test_login_creates_user_and_session() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let output = login_use_case(&repo, &config)
            .execute(fresh_login(&key, &address))
            .await
            .unwrap();

        assert_eq!(output.user.wallet_address, address);
        assert!(output.user.username.is_none());

        // The issued token must verify and reference a stored session
        let session_id = parse_session_token(&config.session_secret, &output.session_token)
            .expect("token should verify");
        let session = repo.find_by_id(session_id).await.unwrap().unwrap();
        assert_eq!(session.user_id, output.user.user_id);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_repeat_login_resolves_same_user() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let first = login_use_case(&repo, &config)
            .execute(fresh_login(&key, &address))
            .await
            .unwrap();
        let second = login_use_case(&repo, &config)
            .execute(fresh_login(&key, &address))
            .await
            .unwrap();

        assert_eq!(first.user.user_id, second.user.user_id);
        assert_ne!(first.session_token, second.session_token);
        assert_eq!(repo.session_count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_logins_converge() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(9);

        let mut handles = Vec::new();
        for _ in 0..2 {
            let repo = repo.clone();
            let config = config.clone();
            let input = fresh_login(&key, &address);
            handles.push(tokio::spawn(async move {
                login_use_case(&repo, &config).execute(input).await
            }));
        }

        let mut user_ids = Vec::new();
        for handle in handles {
            let output = handle.await.unwrap().unwrap();
            user_ids.push(output.user.user_id);
        }

        assert_eq!(user_ids[0], user_ids[1]);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_key() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (_, address) = test_keypair(7);
        let (other_key, _) = test_keypair(8);

        // Message signed by a key that does not match the address
        let result = login_use_case(&repo, &config)
            .execute(fresh_login(&other_key, &address))
            .await;

        assert!(matches!(result, Err(AuthError::SignatureInvalid)));
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_login_rejects_garbage_signature() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let mut input = fresh_login(&key, &address);
        input.signature = vec![0u8; 10];

        let result = login_use_case(&repo, &config).execute(input).await;
        assert!(matches!(result, Err(AuthError::SignatureInvalid)));
    }

    #[tokio::test]
    async fn test_login_rejects_tampered_message() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let mut input = fresh_login(&key, &address);
        input.message.push('!');

        let result = login_use_case(&repo, &config).execute(input).await;
        assert!(matches!(result, Err(AuthError::SignatureInvalid)));
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_address() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let mut input = fresh_login(&key, &address);
        input.wallet_address = "NOT_AN_ADDRESS".to_string();

        let result = login_use_case(&repo, &config).execute(input).await;
        assert!(matches!(result, Err(AuthError::SignatureInvalid)));
    }

    #[tokio::test]
    async fn test_login_rejects_stale_challenge() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        // Six minutes old, one past the five-minute window
        let stale = Utc::now().timestamp_millis() - 6 * 60 * 1000;
        let result = login_use_case(&repo, &config)
            .execute(signed_login(&key, &address, stale))
            .await;

        assert!(matches!(result, Err(AuthError::ChallengeRejected(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_future_challenge() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let future = Utc::now().timestamp_millis() + 60 * 1000;
        let result = login_use_case(&repo, &config)
            .execute(signed_login(&key, &address, future))
            .await;

        assert!(matches!(result, Err(AuthError::ChallengeRejected(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_epoch_timestamp() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        // A correctly signed but ancient message must not authenticate
        let result = login_use_case(&repo, &config)
            .execute(signed_login(&key, &address, 1))
            .await;

        assert!(matches!(result, Err(AuthError::ChallengeRejected(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_message_without_timestamp() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (key, address) = test_keypair(7);

        let message = "Sign this message to authenticate with Algofans.".to_string();
        let signature = key.sign(message.as_bytes()).to_bytes().to_vec();

        let result = login_use_case(&repo, &config)
            .execute(LoginInput {
                wallet_address: address.as_str().to_string(),
                message,
                signature,
            })
            .await;

        assert!(matches!(result, Err(AuthError::ChallengeRejected(_))));
    }
}

#[cfg(test)]
mod session_tests {
    use std::sync::Arc;

    use super::helpers::{fresh_login, test_keypair};
    use crate::application::config::AuthConfig;
    use crate::application::{CheckSessionUseCase, LoginUseCase, SignOutUseCase};
    use crate::infra::memory::InMemoryAuthRepository;

    async fn login(
        repo: &InMemoryAuthRepository,
        config: &Arc<AuthConfig>,
        seed: u8,
    ) -> (String, crate::domain::value_object::UserId) {
        let (key, address) = test_keypair(seed);
        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            config.clone(),
        );
        let output = use_case.execute(fresh_login(&key, &address)).await.unwrap();
        (output.session_token, output.user.user_id)
    }

    #[tokio::test]
    async fn test_check_session_resolves_identity() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (token, user_id) = login(&repo, &config, 3).await;

        let check = CheckSessionUseCase::new(Arc::new(repo.clone()), config.clone());
        let data = check.read(&token).await.unwrap().unwrap();

        assert_eq!(data.user_id, user_id);
    }

    #[tokio::test]
    async fn test_check_session_rejects_tampered_token() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (token, _) = login(&repo, &config, 3).await;

        let check = CheckSessionUseCase::new(Arc::new(repo.clone()), config.clone());

        let mut tampered = token.clone();
        tampered.pop();
        assert!(check.read(&tampered).await.unwrap().is_none());
        assert!(check.read("garbage").await.unwrap().is_none());
        assert!(check.read("").await.unwrap().is_none());

        // The untouched token still works
        assert!(check.read(&token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_check_session_rejects_foreign_secret() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (token, _) = login(&repo, &config, 3).await;

        // Same session store, different signing secret
        let other_config = Arc::new(AuthConfig::development());
        let check = CheckSessionUseCase::new(Arc::new(repo.clone()), other_config);

        assert!(check.read(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_destroys_session() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (token, _) = login(&repo, &config, 3).await;

        let sign_out = SignOutUseCase::new(Arc::new(repo.clone()), config.clone());
        sign_out.execute(Some(&token)).await.unwrap();

        let check = CheckSessionUseCase::new(Arc::new(repo.clone()), config.clone());
        assert!(check.read(&token).await.unwrap().is_none());
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let (token, _) = login(&repo, &config, 3).await;

        let sign_out = SignOutUseCase::new(Arc::new(repo.clone()), config.clone());

        sign_out.execute(Some(&token)).await.unwrap();
        sign_out.execute(Some(&token)).await.unwrap();
        sign_out.execute(Some("not-a-token")).await.unwrap();
        sign_out.execute(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_session_reads_as_none_and_is_deleted() {
        let repo = InMemoryAuthRepository::new();
        let mut config = AuthConfig::development();
        config.session_ttl = std::time::Duration::ZERO;
        let config = Arc::new(config);

        let (token, _) = login(&repo, &config, 3).await;

        // TTL zero: expired the moment it was created
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let check = CheckSessionUseCase::new(Arc::new(repo.clone()), config.clone());
        assert!(check.read(&token).await.unwrap().is_none());
        assert_eq!(repo.session_count(), 0);
    }
}

#[cfg(test)]
mod guard_tests {
    use std::sync::Arc;

    use super::helpers::{fresh_login, test_keypair};
    use crate::application::config::AuthConfig;
    use crate::application::{AuthGate, LoginUseCase, UpdateProfileInput, UpdateProfileUseCase};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;

    async fn login(repo: &InMemoryAuthRepository, config: &Arc<AuthConfig>) -> String {
        let (key, address) = test_keypair(5);
        let use_case = LoginUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            config.clone(),
        );
        use_case
            .execute(fresh_login(&key, &address))
            .await
            .unwrap()
            .session_token
    }

    #[tokio::test]
    async fn test_require_session_without_token() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let gate = AuthGate::new(Arc::new(repo), config);

        let result = gate.require_session(None).await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));

        let result = gate.require_session(Some("bogus")).await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_incomplete_profile_is_distinct_from_unauthorized() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let token = login(&repo, &config).await;

        let gate = AuthGate::new(Arc::new(repo.clone()), config.clone());

        // Session is valid, so the session-level gate passes
        let session = gate.require_session(Some(&token)).await.unwrap();

        // ...but the profile gate does not, with its own error
        let result = gate.require_complete_profile(Some(&token)).await;
        assert!(matches!(result, Err(AuthError::ProfileIncomplete)));

        // Choosing a username flips the gate without a re-login
        let update = UpdateProfileUseCase::new(Arc::new(repo.clone()));
        update
            .execute(
                &session.user_id,
                UpdateProfileInput {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = gate.require_complete_profile(Some(&token)).await.unwrap();
        assert_eq!(user.username.unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_username_conflict() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let gate = AuthGate::new(Arc::new(repo.clone()), config.clone());
        let update = UpdateProfileUseCase::new(Arc::new(repo.clone()));

        let token_a = {
            let (key, address) = test_keypair(1);
            LoginUseCase::new(
                Arc::new(repo.clone()),
                Arc::new(repo.clone()),
                config.clone(),
            )
            .execute(fresh_login(&key, &address))
            .await
            .unwrap()
            .session_token
        };
        let token_b = {
            let (key, address) = test_keypair(2);
            LoginUseCase::new(
                Arc::new(repo.clone()),
                Arc::new(repo.clone()),
                config.clone(),
            )
            .execute(fresh_login(&key, &address))
            .await
            .unwrap()
            .session_token
        };

        let user_a = gate.require_session(Some(&token_a)).await.unwrap();
        let user_b = gate.require_session(Some(&token_b)).await.unwrap();

        update
            .execute(
                &user_a.user_id,
                UpdateProfileInput {
                    username: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = update
            .execute(
                &user_b.user_id,
                UpdateProfileInput {
                    username: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));

        // Re-claiming your own username is not a conflict
        update
            .execute(
                &user_a.user_id,
                UpdateProfileInput {
                    username: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_profile_update_validation() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        let token = login(&repo, &config).await;

        let gate = AuthGate::new(Arc::new(repo.clone()), config.clone());
        let session = gate.require_session(Some(&token)).await.unwrap();

        let update = UpdateProfileUseCase::new(Arc::new(repo.clone()));

        let result = update
            .execute(
                &session.user_id,
                UpdateProfileInput {
                    username: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRequest(_))));

        let result = update
            .execute(
                &session.user_id,
                UpdateProfileInput {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRequest(_))));

        let result = update
            .execute(
                &session.user_id,
                UpdateProfileInput {
                    is_creator: Some(true),
                    subscription_price: Some(-1.0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRequest(_))));

        let user = update
            .execute(
                &session.user_id,
                UpdateProfileInput {
                    is_creator: Some(true),
                    subscription_price: Some(4.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(user.is_creator);
        assert_eq!(user.subscription_price, Some(4.99));
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::helpers::{fresh_login, test_keypair};
    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::router::auth_router_generic;

    fn test_router() -> (Router, InMemoryAuthRepository) {
        let repo = InMemoryAuthRepository::new();
        let router = auth_router_generic(repo.clone(), AuthConfig::development());
        (router, repo)
    }

    fn login_request(seed: u8) -> Request<Body> {
        let (key, address) = test_keypair(seed);
        let input = fresh_login(&key, &address);
        let body = json!({
            "walletAddress": input.wallet_address,
            "message": input.message,
            "signature": input.signature,
        });

        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(body: Body) -> Value {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_flat_user_and_cookie() {
        let (router, _repo) = test_router();
        let (_, address) = test_keypair(4);

        let response = router.oneshot(login_request(4)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login must set the session cookie")
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("algofans_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));

        // User fields at the top level, not wrapped
        let body = body_json(response.into_body()).await;
        assert_eq!(body["walletAddress"], address.as_str());
        assert_eq!(body["isCreator"], false);
        assert!(body["id"].is_string());
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn test_me_round_trip_matches_login_shape() {
        let (router, _repo) = test_router();

        let login = router.clone().oneshot(login_request(4)).await.unwrap();
        let cookie = login
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let login_body = body_json(login.into_body()).await;

        let me = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/me")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::OK);

        let me_body = body_json(me.into_body()).await;
        assert_eq!(me_body["id"], login_body["id"]);
        assert_eq!(me_body["walletAddress"], login_body["walletAddress"]);
    }

    #[tokio::test]
    async fn test_me_without_cookie_is_unauthorized() {
        let (router, _repo) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_logout_without_session_succeeds() {
        let (router, _repo) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::SET_COOKIE)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("Max-Age=0")
        );
        let body = body_json(response.into_body()).await;
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_login_missing_field_is_bad_request() {
        let (router, _repo) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"walletAddress": "ADDR"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response.into_body()).await;
        assert_eq!(body["code"], "INVALID_REQUEST");
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::entity::user::User;
    use crate::domain::value_object::{Username, WalletAddress};
    use crate::presentation::dto::{LoginRequest, UserResponse};

    #[test]
    fn test_login_request_camel_case() {
        let json = r#"{
            "walletAddress": "ADDR",
            "message": "hello",
            "signature": [1, 2, 3]
        }"#;

        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.wallet_address.as_deref(), Some("ADDR"));
        assert_eq!(req.message.as_deref(), Some("hello"));
        assert_eq!(req.signature, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        // Field presence is checked by the handler, not serde
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.wallet_address.is_none());
        assert!(req.message.is_none());
        assert!(req.signature.is_none());
    }

    #[test]
    fn test_user_response_shape() {
        let mut user = User::new(WalletAddress::from_public_key(&[1u8; 32]));
        user.set_username(Username::new("alice").unwrap());

        let value = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(value["username"], "alice");
        assert_eq!(value["walletAddress"], user.wallet_address.as_str());
        assert_eq!(value["isCreator"], false);
        assert!(value["subscriptionPrice"].is_null());
        assert!(value["createdAt"].is_i64());
    }
}
