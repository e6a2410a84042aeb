use shared_database::bson::doc;
use shared_database::{AppState, Repository, StoreError};
use shared_models::auth::User;
use shared_utils::password::{hash_password, verify_password};
use tracing::{debug, info, warn};

use crate::models::{AuthError, LoginRequest, SignupRequest};

pub struct UserService {
    users: Repository<User>,
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: Repository::new(state.store.clone()),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.users.find_all().await
    }

    /// Creates an account. Field validation and the unique email index are
    /// enforced by the save, so a bad payload surfaces as a store error.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        if !request.passwords_match() {
            return Err(AuthError::PasswordMismatch);
        }

        let password = match request.password.as_deref() {
            Some(raw) if !raw.is_empty() => {
                hash_password(raw).map_err(|e| AuthError::Hashing(e.to_string()))?
            }
            _ => String::new(),
        };

        let mut user = User {
            id: None,
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            password,
            role: request.role.unwrap_or_default(),
        };

        self.users.save(&mut user).await?;
        info!("Created {} account for {}", user.role, user.email);

        Ok(user)
    }

    /// Succeeds when some user with exactly this name has this password.
    pub async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        let (Some(username), Some(password)) = (request.username, request.password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let candidates = self.users.find(doc! { "name": username.as_str() }).await?;
        debug!("Login attempt for {} ({} candidates)", username, candidates.len());

        for user in candidates {
            match verify_password(&password, &user.password) {
                Ok(true) => return Ok(user),
                Ok(false) => {}
                Err(e) => warn!("Stored password for {} is not a valid hash: {}", username, e),
            }
        }

        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_utils::test_utils::{test_state, TestUser};

    fn signup_request(name: &str, email: &str, password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            confirm_password: Some(confirm.to_string()),
            role: Some("patient".to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let (state, _) = test_state().await;
        let service = UserService::new(&state);

        let user = service
            .signup(signup_request("Ada", "ada@example.com", "pw123", "pw123"))
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert!(user.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_signup_mismatch_writes_nothing() {
        let (state, store) = test_state().await;
        let service = UserService::new(&state);

        let result = service
            .signup(signup_request("Ada", "ada@example.com", "pw123", "pw124"))
            .await;

        assert_matches!(result, Err(AuthError::PasswordMismatch));
        assert_eq!(store.count("users").await, 0);
    }

    #[tokio::test]
    async fn test_signup_without_password_fails_validation() {
        let (state, _) = test_state().await;
        let service = UserService::new(&state);

        let request = SignupRequest {
            password: None,
            confirm_password: None,
            ..signup_request("Ada", "ada@example.com", "", "")
        };

        assert_matches!(
            service.signup(request).await,
            Err(AuthError::Store(StoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn test_login_checks_name_and_password() {
        let (state, _) = test_state().await;
        TestUser::patient("Ada", "ada@example.com").insert(&state).await;
        let service = UserService::new(&state);

        let ok = service
            .login(LoginRequest {
                username: Some("Ada".to_string()),
                password: Some("correct-horse".to_string()),
            })
            .await;
        assert!(ok.is_ok());

        let wrong_password = service
            .login(LoginRequest {
                username: Some("Ada".to_string()),
                password: Some("incorrect".to_string()),
            })
            .await;
        assert_matches!(wrong_password, Err(AuthError::InvalidCredentials));

        let wrong_name = service
            .login(LoginRequest {
                username: Some("ada".to_string()),
                password: Some("correct-horse".to_string()),
            })
            .await;
        assert_matches!(wrong_name, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_with_shared_name_checks_every_candidate() {
        let (state, _) = test_state().await;
        TestUser::patient("Sam", "sam1@example.com").insert(&state).await;
        let mut second = TestUser::doctor("Sam", "sam2@example.com");
        second.password = "other-secret".to_string();
        second.insert(&state).await;

        let user = UserService::new(&state)
            .login(LoginRequest {
                username: Some("Sam".to_string()),
                password: Some("other-secret".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "sam2@example.com");
    }
}
