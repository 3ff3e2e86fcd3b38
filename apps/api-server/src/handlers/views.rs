//! Conversions from domain objects to API responses.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use blogpost_core::DomainError;
use blogpost_core::domain::{Paginated, Post, User};
use blogpost_shared::PageResponse;
use blogpost_shared::dto::{PostResponse, ProfileResponse, UserSummary};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Avatar size on profile pages.
const PROFILE_AVATAR_SIZE: u32 = 128;
/// Avatar size next to posts and in user lists.
const SUMMARY_AVATAR_SIZE: u32 = 36;

/// Load the caller's account and record the visit.
pub async fn current_user(state: &AppState, identity: &Identity) -> AppResult<User> {
    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let now = Utc::now();
    state.users.touch_last_seen(user.id, now).await?;
    user.last_seen = Some(now);

    Ok(user)
}

pub async fn find_user(state: &AppState, username: &str) -> AppResult<User> {
    state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| DomainError::not_found("User", username).into())
}

pub fn user_summary(user: &User) -> UserSummary {
    UserSummary {
        id: user.id,
        username: user.username.clone(),
        avatar: user.avatar(SUMMARY_AVATAR_SIZE),
    }
}

/// Profile of `user` as seen by `viewer` (None for anonymous callers).
pub async fn profile(
    state: &AppState,
    user: &User,
    viewer: Option<Uuid>,
) -> AppResult<ProfileResponse> {
    let followers_count = state.follows.count_followers(user.id).await?;
    let followed_count = state.follows.count_followed(user.id).await?;
    let is_following = match viewer {
        Some(viewer) if viewer != user.id => {
            Some(state.follows.is_following(viewer, user.id).await?)
        }
        Some(_) => Some(false),
        None => None,
    };

    Ok(ProfileResponse {
        id: user.id,
        username: user.username.clone(),
        about_me: user.about_me.clone(),
        last_seen: user.last_seen,
        avatar: user.avatar(PROFILE_AVATAR_SIZE),
        followers_count,
        followed_count,
        is_following,
    })
}

pub fn post_response(post: Post, author: UserSummary) -> PostResponse {
    PostResponse {
        id: post.id,
        body: post.body,
        timestamp: post.timestamp,
        author,
    }
}

/// Attach authors to a page of posts with a single user lookup.
pub async fn post_page(
    state: &AppState,
    page: Paginated<Post>,
) -> AppResult<PageResponse<PostResponse>> {
    let mut author_ids: Vec<Uuid> = page.items.iter().map(|p| p.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<Uuid, UserSummary> = state
        .users
        .find_many(&author_ids)
        .await?
        .iter()
        .map(|user| (user.id, user_summary(user)))
        .collect();

    let next_page = page.has_next().then(|| page.page + 1);
    let prev_page = page.has_prev().then(|| page.page - 1);

    let page = page.map(|post| {
        let author = authors.get(&post.user_id).cloned().unwrap_or_else(|| {
            tracing::warn!(post_id = %post.id, user_id = %post.user_id, "Post author is missing");
            UserSummary {
                id: post.user_id,
                username: String::new(),
                avatar: String::new(),
            }
        });
        post_response(post, author)
    });

    Ok(PageResponse {
        items: page.items,
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
        next_page,
        prev_page,
    })
}
