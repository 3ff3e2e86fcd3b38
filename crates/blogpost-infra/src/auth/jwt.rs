//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blogpost_core::ports::{AuthError, TokenClaims, TokenService};

/// Secret used when none is configured. Only suitable for local development.
pub const DEFAULT_SECRET: &str = "try-it-again";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "blogpost".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Wire format of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    username: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service (HS256).
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        if config.uses_default_secret() {
            tracing::warn!("Using the default signing secret. Set SECRET_KEY outside development.");
        }

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: token_data.claims.username,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_round_trip_claims() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::now_v7();

        let token = service.generate_token(user_id, "susan").unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "susan");
    }

    #[test]
    fn test_validate_garbage_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: -2,
            ..test_config()
        });

        let token = service.generate_token(Uuid::now_v7(), "john").unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_tokens_are_bound_to_secret() {
        let signer = JwtTokenService::new(test_config());
        let other = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = signer.generate_token(Uuid::now_v7(), "john").unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_default_secret_detection() {
        assert!(JwtConfig::default().uses_default_secret());
        assert!(!test_config().uses_default_secret());
        assert_eq!(JwtTokenService::new(test_config()).expiration_seconds(), 3600);
    }
}
