//! Registration, login and the caller's own profile.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blogpost_core::DomainError;
use blogpost_core::domain::{User, validate_about_me, validate_username};
use blogpost_core::ports::{AuthError, PasswordService, TokenService};
use blogpost_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UpdateProfileRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn issue_token(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = token_service.generate_token(user.id, &user.username)?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = User::new(req.username.trim(), req.email.trim());

    let mut errors = Vec::new();
    match user.validate() {
        Ok(()) => {}
        Err(DomainError::Validation(msg)) => errors.push(msg),
        Err(e) => return Err(e.into()),
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.find_by_username(&user.username).await?.is_some() {
        return Err(DomainError::Duplicate("Please use a different username.".to_string()).into());
    }
    if state.users.find_by_email(&user.email).await?.is_some() {
        return Err(
            DomainError::Duplicate("Please use a different email address.".to_string()).into(),
        );
    }

    user.set_password(&req.password, password_service.get_ref().as_ref())?;
    let user = state.users.insert(user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(HttpResponse::Created().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !user.check_password(&req.password, password_service.get_ref().as_ref()) {
        tracing::info!(username = %user.username, "Rejected login");
        return Err(AuthError::InvalidCredentials.into());
    }

    state.users.touch_last_seen(user.id, chrono::Utc::now()).await?;

    Ok(HttpResponse::Ok().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = views::current_user(&state, &identity).await?;
    let profile = views::profile(&state, &user, Some(user.id)).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/auth/me
pub async fn update_me(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = views::current_user(&state, &identity).await?;

    let username = req.username.trim();
    validate_username(username)?;
    if username != user.username && state.users.find_by_username(username).await?.is_some() {
        return Err(DomainError::Duplicate("Please use a different username.".to_string()).into());
    }

    let about_me = req
        .about_me
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());
    if let Some(text) = &about_me {
        validate_about_me(text)?;
    }

    user.username = username.to_string();
    user.about_me = about_me;
    let user = state.users.update(user).await?;

    tracing::info!(user_id = %user.id, "Profile updated");

    let profile = views::profile(&state, &user, Some(user.id)).await?;
    Ok(HttpResponse::Ok().json(profile))
}
