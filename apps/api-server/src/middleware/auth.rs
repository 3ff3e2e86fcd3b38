//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::sync::Arc;

use blogpost_core::ports::{AuthError, TokenClaims, TokenService};
use blogpost_shared::ErrorResponse;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            _ => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_service) = req.app_data::<actix_web::web::Data<Arc<dyn TokenService>>>()
        else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))));
        };

        let result = bearer_token(req)
            .and_then(|token| token_service.validate_token(token))
            .map(Identity::from)
            .map_err(AuthenticationError);

        ready(result)
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner().ok();
        ready(Ok(OptionalIdentity(identity)))
    }
}
