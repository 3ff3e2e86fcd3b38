//! Publishing posts and reading timelines.

use actix_web::{HttpResponse, web};

use blogpost_core::domain::Post;
use blogpost_shared::dto::{CreatePostRequest, PageQuery};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let author = views::current_user(&state, &identity).await?;

    let post = Post::new(author.id, body.into_inner().body.trim());
    post.validate()?;
    let post = state.posts.insert(post).await?;

    tracing::info!(post_id = %post.id, author = %author.username, "Post published");

    Ok(HttpResponse::Created().json(views::post_response(post, views::user_summary(&author))))
}

/// GET /api/posts/timeline - the caller's posts plus posts of everyone they follow.
pub async fn timeline(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let me = views::current_user(&state, &identity).await?;
    let page = state
        .posts
        .followed_posts_page(me.id, state.page(query.page))
        .await?;

    Ok(HttpResponse::Ok().json(views::post_page(&state, page).await?))
}

/// GET /api/posts/explore - every post, newest first.
pub async fn explore(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.recent(state.page(query.page)).await?;

    Ok(HttpResponse::Ok().json(views::post_page(&state, page).await?))
}
