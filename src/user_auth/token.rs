//! Identity tokens: HS256 JWTs binding an account id and email.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // account id
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity resolved from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error("Invalid or expired token")]
    Invalid,

    #[error("Token lifetime must be a positive number of days, got {0}")]
    InvalidTtl(i64),

    #[error("Failed to generate token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => AppError::unauthorized(e.to_string()),
            TokenError::MissingSecret | TokenError::InvalidTtl(_) => AppError::Config(e.to_string()),
            TokenError::Encode(_) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Fails when no secret is configured or the ttl is not positive;
    /// callers treat both as fatal.
    pub fn new(secret: Option<&str>, ttl: Duration) -> Result<Self, TokenError> {
        let secret = secret
            .filter(|s| !s.is_empty())
            .ok_or(TokenError::MissingSecret)?;
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl(ttl.num_days()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        let days = config.token_ttl_days;
        let ttl = Duration::try_days(days).ok_or(TokenError::InvalidTtl(days))?;
        Self::new(config.jwt_secret.as_deref(), ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, account_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(account_id, email, Utc::now())
    }

    /// Issue as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        account_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// All-or-nothing: bad signature, bad shape, bad subject or expiry all fail the same way
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        let account_id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)?;
        Ok(Identity {
            account_id,
            email: data.claims.email,
        })
    }
}

/// Token from an `Authorization: Bearer <token>` value. The prefix is case-sensitive.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(Some("test-secret"), Duration::days(7)).unwrap()
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        assert!(matches!(
            TokenService::new(None, Duration::days(7)),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            TokenService::new(Some(""), Duration::days(7)),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_non_positive_or_overflowing_ttl_rejected() {
        assert!(matches!(
            TokenService::new(Some("s"), Duration::zero()),
            Err(TokenError::InvalidTtl(0))
        ));
        assert!(matches!(
            TokenService::new(Some("s"), Duration::days(-1)),
            Err(TokenError::InvalidTtl(-1))
        ));

        let mut config = AuthConfig {
            jwt_secret: Some("s".to_string()),
            ..AuthConfig::default()
        };
        config.token_ttl_days = i64::MAX;
        assert!(matches!(
            TokenService::from_config(&config),
            Err(TokenError::InvalidTtl(i64::MAX))
        ));

        config.token_ttl_days = 0;
        let err: AppError = TokenService::from_config(&config).err().unwrap().into();
        assert!(matches!(err, AppError::Config(_)));

        config.token_ttl_days = 7;
        assert_eq!(TokenService::from_config(&config).unwrap().ttl(), Duration::days(7));
    }

    #[test]
    fn test_issue_then_verify() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.issue(id, "u@test.com").unwrap();
        let identity = svc.verify(&token).unwrap();
        assert_eq!(identity.account_id, id);
        assert_eq!(identity.email, "u@test.com");
    }

    #[test]
    fn test_expiry_is_seven_days() {
        let svc = service();
        let now = Utc::now();
        let token = svc.issue_at(Uuid::new_v4(), "u@test.com", now).unwrap();
        let data = decode::<Claims>(&token, &svc.decoding_key, &svc.validation).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 7 * 24 * 60 * 60);
        assert_eq!(data.claims.iat, now.timestamp());
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let issued = Utc::now() - Duration::days(8);
        let token = svc.issue_at(Uuid::new_v4(), "u@test.com", issued).unwrap();
        assert!(matches!(svc.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), "u@test.com").unwrap();
        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let forged = format!("{}.{}{}", head, flipped, &sig[1..]);
        assert!(matches!(svc.verify(&forged), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), "u@test.com").unwrap();
        let other = svc.issue(Uuid::new_v4(), "evil@test.com").unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        // other's payload under token's signature
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);
        assert!(matches!(svc.verify(&forged), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = service().issue(Uuid::new_v4(), "u@test.com").unwrap();
        let other = TokenService::new(Some("another-secret"), Duration::days(7)).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let svc = service();
        assert!(matches!(svc.verify("garbage"), Err(TokenError::Invalid)));
        assert!(matches!(svc.verify(""), Err(TokenError::Invalid)));
        assert!(matches!(svc.verify("a.b.c"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer("bearer abc"), None);
        assert_eq!(extract_bearer("Token abc"), None);
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("Bearerabc"), None);
        assert_eq!(extract_bearer(""), None);
    }

    #[test]
    fn test_token_error_maps_to_401() {
        let err: AppError = TokenError::Invalid.into();
        assert_eq!(err.http_status(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Invalid or expired token");
    }
}
