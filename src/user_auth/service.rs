use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::PasswordService;
use super::token::TokenService;
use crate::account::validation::{validate_login, validate_registration};
use crate::account::{AccountRepository, NewAccount, PublicAccount};
use crate::error::{AppError, AppResult, RepositoryError};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "User with this email already exists";

/// User Registration Request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Ada")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub confirm_password: String,
}

/// User Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "user1@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Account plus a freshly issued token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: PublicAccount,
    pub token: String,
}

/// Registration, login and profile lookup
pub struct UserAuthService {
    accounts: Arc<dyn AccountRepository>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl UserAuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            passwords,
            tokens,
        }
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        let valid = validate_registration(
            &req.email,
            req.name.as_deref(),
            &req.password,
            &req.confirm_password,
        )?;

        if self.accounts.find_by_email(&valid.email).await?.is_some() {
            tracing::warn!("Registration attempt for existing email");
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let password_hash = self.passwords.hash_blocking(valid.password).await?;

        let account = match self
            .accounts
            .create(NewAccount {
                email: valid.email,
                name: valid.name,
                password_hash,
            })
            .await
        {
            Ok(account) => account,
            // lost the race against a concurrent registration
            Err(RepositoryError::Duplicate(_)) => return Err(AppError::conflict(EMAIL_TAKEN)),
            Err(e) => return Err(e.into()),
        };

        let token = self.tokens.issue(account.id, &account.email)?;
        tracing::info!(account_id = %account.id, "Account registered");

        Ok(AuthResponse {
            user: account.into(),
            token,
        })
    }

    /// Login user and issue a token. Unknown email and wrong password fail identically.
    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let valid = validate_login(&req.email, &req.password)?;

        let Some(account) = self.accounts.find_by_email(&valid.email).await? else {
            tracing::warn!("Login failed: unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .passwords
            .verify_blocking(valid.password, account.password_hash.clone())
            .await;
        if !verified {
            tracing::warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(account.id, &account.email)?;
        tracing::info!(account_id = %account.id, "Login successful");

        Ok(AuthResponse {
            user: account.into(),
            token,
        })
    }

    /// Account behind a verified token
    pub async fn profile(&self, account_id: Uuid) -> AppResult<PublicAccount> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .map(PublicAccount::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use chrono::Duration;

    fn service() -> (UserAuthService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(Some("test-secret"), Duration::days(7)).unwrap());
        let svc = UserAuthService::new(
            Arc::new(InMemoryStore::new()),
            PasswordService::new(256, 1, 1).unwrap(),
            tokens.clone(),
        );
        (svc, tokens)
    }

    fn register_req(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            name: None,
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_verifiable_token() {
        let (svc, tokens) = service();
        let resp = svc.register(register_req("U@Test.com", "secret1")).await.unwrap();
        assert_eq!(resp.user.email, "u@test.com");

        let identity = tokens.verify(&resp.token).unwrap();
        assert_eq!(identity.account_id, resp.user.id);
        assert_eq!(identity.email, "u@test.com");
    }

    #[tokio::test]
    async fn test_register_email_case_insensitive_conflict() {
        let (svc, _) = service();
        svc.register(register_req("A@x.com", "secret1")).await.unwrap();
        let err = svc
            .register(register_req("a@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn test_login_success_and_generic_failures() {
        let (svc, _) = service();
        svc.register(register_req("u@test.com", "secret1")).await.unwrap();

        let ok = svc.login(login_req("U@TEST.COM", "secret1")).await.unwrap();
        assert_eq!(ok.user.email, "u@test.com");

        let wrong_password = svc
            .login(login_req("u@test.com", "secret2"))
            .await
            .unwrap_err();
        let unknown_email = svc
            .login(login_req("nobody@test.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(wrong_password, AppError::Authentication(_)));
        assert!(matches!(unknown_email, AppError::Authentication(_)));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let (svc, _) = service();
        let err = svc.login(login_req("", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_profile() {
        let (svc, _) = service();
        let resp = svc.register(register_req("u@test.com", "secret1")).await.unwrap();
        assert_eq!(svc.profile(resp.user.id).await.unwrap(), resp.user);

        let err = svc.profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
