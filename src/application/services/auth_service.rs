//! Credential issuance/verification and role authorization.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use crate::domain::entities::{Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Decoded credential claims.
///
/// `email` identifies the caller; any other caller-supplied claims are carried
/// through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Service issuing and verifying signed, time-boxed credentials (HS256 JWT),
/// and enforcing role requirements against the stored user record.
///
/// Issuance performs no identity check: trust comes from the external login
/// step that precedes it. Role lookups hit storage on every call, so a role
/// change applies to the very next request.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository used for role lookups
    /// - `secret` - HMAC signing secret shared by issuance and verification
    /// - `ttl_hours` - credential lifetime
    pub fn new(users: Arc<dyn UserRepository>, secret: &str, ttl_hours: i64) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Signs the supplied claims into a credential valid for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the claims carry no string `email`.
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, claims: Map<String, Value>) -> Result<String, AppError> {
        self.issue_at(claims, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        mut claims: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let email = match claims.remove("email") {
            Some(Value::String(email)) if !email.trim().is_empty() => email,
            _ => {
                return Err(AppError::bad_request(
                    "Credential claims must include an email",
                    json!({ "field": "email" }),
                ));
            }
        };
        claims.remove("iat");
        claims.remove("exp");

        let claims = Claims {
            email,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            extra: claims,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign credential", json!({ "reason": e.to_string() }))
        })
    }

    /// Verifies signature and expiry and returns the decoded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, tampered with
    /// or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims)
    }

    /// Allows continuation only if the stored role of `email` equals `required`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the user is unknown or holds another role.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn require_role(&self, email: &str, required: Role) -> Result<User, AppError> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.role == required => Ok(user),
            found => {
                tracing::warn!(
                    email,
                    required = %required,
                    actual = found.as_ref().map(|u| u.role.as_str()),
                    "Role check failed"
                );
                Err(AppError::forbidden(
                    "unauthorized access",
                    json!({ "requiredRole": required.as_str() }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    const SECRET: &str = "test-signing-secret";

    fn service_with(repo: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(repo), SECRET, 24)
    }

    fn claims_for(email: &str) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert("email".to_string(), json!(email));
        claims
    }

    fn user(email: &str, role: Role) -> User {
        User {
            id: 1,
            email: email.to_string(),
            name: None,
            photo_url: None,
            role,
            extra: Map::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = service_with(MockUserRepository::new());
        let mut claims = claims_for("ann@example.com");
        claims.insert("name".to_string(), json!("Ann"));

        let token = service.issue(claims).unwrap();
        let decoded = service.verify(&token).unwrap();

        assert_eq!(decoded.email, "ann@example.com");
        assert_eq!(decoded.extra["name"], "Ann");
        assert_eq!(decoded.exp - decoded.iat, 24 * 3600);
    }

    #[test]
    fn test_issue_requires_email() {
        let service = service_with(MockUserRepository::new());

        let err = service.issue(Map::new()).unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_caller_cannot_extend_expiry() {
        let service = service_with(MockUserRepository::new());
        let mut claims = claims_for("ann@example.com");
        claims.insert("exp".to_string(), json!(i64::MAX));

        let decoded = service.verify(&service.issue(claims).unwrap()).unwrap();

        assert!(decoded.exp <= (Utc::now() + Duration::hours(24)).timestamp());
        assert!(!decoded.extra.contains_key("exp"));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let service = service_with(MockUserRepository::new());
        let token = service.issue(claims_for("ann@example.com")).unwrap();
        let other = service.issue(claims_for("mallory@example.com")).unwrap();

        // Ann's header and signature around Mallory's payload.
        let ann: Vec<&str> = token.split('.').collect();
        let mallory: Vec<&str> = other.split('.').collect();
        let tampered = format!("{}.{}.{}", ann[0], mallory[1], ann[2]);

        let err = service.verify(&tampered).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issuer = AuthService::new(Arc::new(MockUserRepository::new()), "secret-a", 24);
        let verifier = AuthService::new(Arc::new(MockUserRepository::new()), "secret-b", 24);

        let token = issuer.issue(claims_for("ann@example.com")).unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = service_with(MockUserRepository::new());
        let two_days_ago = Utc::now() - Duration::hours(48);

        let token = service
            .issue_at(claims_for("ann@example.com"), two_days_ago)
            .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = service_with(MockUserRepository::new());
        assert!(service.verify("not-a-jwt").is_err());
        assert!(service.verify("").is_err());
    }

    #[tokio::test]
    async fn test_require_role_allows_matching_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "c@example.com")
            .times(1)
            .returning(|email| Ok(Some(user(email, Role::Creator))));

        let service = service_with(repo);

        let result = service.require_role("c@example.com", Role::Creator).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_require_role_denies_other_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user(email, Role::Participant))));

        let service = service_with(repo);

        let err = service
            .require_role("p@example.com", Role::Creator)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_require_role_denies_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));

        let service = service_with(repo);

        let err = service
            .require_role("ghost@example.com", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }
}
