//! Public profiles and the follow graph.

use actix_web::{HttpResponse, web};

use blogpost_core::domain::Follow;
use blogpost_shared::ApiResponse;
use blogpost_shared::dto::{PageQuery, UserSummary};

use super::views;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/{username}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let user = views::find_user(&state, &path).await?;
    let viewer_id = viewer.0.map(|identity| identity.user_id);

    Ok(HttpResponse::Ok().json(views::profile(&state, &user, viewer_id).await?))
}

/// GET /api/users/{username}/posts
pub async fn user_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let user = views::find_user(&state, &path).await?;
    let page = state
        .posts
        .find_by_user_id(user.id, state.page(query.page))
        .await?;

    Ok(HttpResponse::Ok().json(views::post_page(&state, page).await?))
}

/// GET /api/users/{username}/followers
pub async fn followers(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = views::find_user(&state, &path).await?;
    let users: Vec<UserSummary> = state
        .follows
        .followers(user.id)
        .await?
        .iter()
        .map(views::user_summary)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/{username}/followed
pub async fn followed(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = views::find_user(&state, &path).await?;
    let users: Vec<UserSummary> = state
        .follows
        .followed(user.id)
        .await?
        .iter()
        .map(views::user_summary)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// POST /api/users/{username}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let me = views::current_user(&state, &identity).await?;
    let target = views::find_user(&state, &path).await?;

    let created = state.follows.follow(Follow::new(me.id, target.id)?).await?;
    let message = if created {
        tracing::info!(follower = %me.username, followed = %target.username, "Followed");
        format!("You are following {}!", target.username)
    } else {
        format!("You are already following {}.", target.username)
    };

    let profile = views::profile(&state, &target, Some(me.id)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(profile, message)))
}

/// DELETE /api/users/{username}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let me = views::current_user(&state, &identity).await?;
    let target = views::find_user(&state, &path).await?;

    let removed = state.follows.unfollow(Follow::new(me.id, target.id)?).await?;
    let message = if removed {
        tracing::info!(follower = %me.username, followed = %target.username, "Unfollowed");
        format!("You are not following {}.", target.username)
    } else {
        format!("You were not following {}.", target.username)
    };

    let profile = views::profile(&state, &target, Some(me.id)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(profile, message)))
}
