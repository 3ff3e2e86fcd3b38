use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Follow, PageRequest, Paginated, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Load several users at once. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Record activity without rewriting the rest of the row.
    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Every listing is ordered newest first; equal timestamps fall back to
/// the post id, newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts written by one user.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<Post>, RepoError>;

    /// The user's timeline: their own posts plus posts of everyone they follow.
    async fn followed_posts(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// One page of [`PostRepository::followed_posts`].
    async fn followed_posts_page(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<Post>, RepoError>;

    /// All posts from all users.
    async fn recent(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError>;
}

/// Follower graph repository.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Add the edge. Returns false if it already existed.
    async fn follow(&self, edge: Follow) -> Result<bool, RepoError>;

    /// Remove the edge. Returns false if it did not exist.
    async fn unfollow(&self, edge: Follow) -> Result<bool, RepoError>;

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError>;

    /// Users that `user_id` follows, ordered by username.
    async fn followed(&self, user_id: Uuid) -> Result<Vec<User>, RepoError>;

    /// Users following `user_id`, ordered by username.
    async fn followers(&self, user_id: Uuid) -> Result<Vec<User>, RepoError>;

    async fn count_followed(&self, user_id: Uuid) -> Result<u64, RepoError>;

    async fn count_followers(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
