//! JWT token issuing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (login name)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create claims for a subject valid for `validity` from now
    pub fn new(subject: impl Into<String>, validity: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Validity used when the caller does not ask for one
    pub default_validity: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, default_validity: Duration) -> Self {
        Self {
            secret: secret.into(),
            default_validity,
        }
    }
}

/// Trait for bearer token operations
pub trait TokenService: Send + Sync + Debug {
    /// Issue a signed token for `subject`, valid for `validity` or the configured default
    fn issue_token(&self, subject: &str, validity: Option<Duration>) -> Result<String, DomainError>;

    /// Validate a token and return its claims
    fn validate_token(&self, token: &str) -> Result<JwtClaims, DomainError>;

    fn default_validity(&self) -> Duration;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("default_validity", &self.config.default_validity)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenService for JwtService {
    fn issue_token(&self, subject: &str, validity: Option<Duration>) -> Result<String, DomainError> {
        let claims = JwtClaims::new(subject, validity.unwrap_or(self.config.default_validity));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate_token(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| DomainError::authentication(format!("Invalid JWT: {}", e)))?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(DomainError::authentication("Token subject is empty"));
        }

        Ok(token_data.claims)
    }

    fn default_validity(&self) -> Duration {
        self.config.default_validity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-12345";

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new(SECRET, Duration::minutes(15)))
    }

    fn sign(claims: &JwtClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_service();

        let token = service.issue_token("coach@example.com", None).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.subject(), "coach@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_default_validity_is_fifteen_minutes() {
        let service = create_service();

        let token = service.issue_token("coach@example.com", None).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_explicit_validity() {
        let service = create_service();

        let token = service
            .issue_token("coach@example.com", Some(Duration::minutes(30)))
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        let result = service.validate_token("invalid-token");
        assert!(matches!(result, Err(DomainError::Authentication { .. })));
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", Duration::minutes(15)));
        let service2 = JwtService::new(JwtConfig::new("secret-2", Duration::minutes(15)));

        let token = service1.issue_token("coach@example.com", None).unwrap();

        let result = service2.validate_token(&token);
        assert!(matches!(result, Err(DomainError::Authentication { .. })));
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();

        let past_time = Utc::now() - Duration::hours(1);
        let token = sign(&JwtClaims {
            sub: "coach@example.com".to_string(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        });

        let result = service.validate_token(&token);
        assert!(matches!(result, Err(DomainError::Authentication { .. })));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let service = create_service();

        let token = sign(&JwtClaims::new("", Duration::minutes(5)));

        let result = service.validate_token(&token);
        assert!(matches!(result, Err(DomainError::Authentication { .. })));
    }

    #[test]
    fn test_missing_subject_rejected() {
        #[derive(Serialize)]
        struct NoSubject {
            iat: i64,
            exp: i64,
        }

        let service = create_service();
        let now = Utc::now();
        let token = encode(
            &Header::default(),
            &NoSubject {
                iat: now.timestamp(),
                exp: (now + Duration::minutes(5)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", create_service());
        assert!(!debug.contains(SECRET));
    }
}
