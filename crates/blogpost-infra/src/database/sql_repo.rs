//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict, Query, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use blogpost_core::domain::{Follow, PageRequest, Paginated, Post, User};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{FollowRepository, PostRepository, UserRepository};

use super::entity::follower::{self, Entity as FollowerEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sql_base::{SqlBaseRepository, map_db_err};

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL follower graph repository.
pub type SqlFollowRepository = SqlBaseRepository<FollowerEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn touch_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), RepoError> {
        let at: sea_orm::prelude::DateTimeWithTimeZone = at.into();
        let result = UserEntity::update_many()
            .col_expr(user::Column::LastSeen, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// `SELECT followed_id FROM followers WHERE follower_id = :user_id`
fn followed_ids(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(follower::Column::FollowedId)
        .from(FollowerEntity)
        .and_where(follower::Column::FollowerId.eq(user_id))
        .to_owned()
}

/// `SELECT follower_id FROM followers WHERE followed_id = :user_id`
fn follower_ids(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(follower::Column::FollowerId)
        .from(FollowerEntity)
        .and_where(follower::Column::FollowedId.eq(user_id))
        .to_owned()
}

/// Posts visible on the timeline of `user_id`, newest first.
///
/// The subquery form never produces duplicates, so no DISTINCT is needed.
fn timeline(user_id: Uuid) -> Select<PostEntity> {
    PostEntity::find()
        .filter(
            Condition::any()
                .add(post::Column::UserId.in_subquery(followed_ids(user_id)))
                .add(post::Column::UserId.eq(user_id)),
        )
        .order_by_desc(post::Column::Timestamp)
        .order_by_desc(post::Column::Id)
}

impl SqlPostRepository {
    async fn fetch_page(
        &self,
        select: Select<PostEntity>,
        request: PageRequest,
    ) -> Result<Paginated<Post>, RepoError> {
        let paginator = select.paginate(&self.db, request.per_page);
        let total_items = paginator.num_items().await.map_err(map_db_err)?;
        if request.offset() >= total_items {
            return Ok(Paginated::new(Vec::new(), request, total_items));
        }

        let items = paginator
            .fetch_page(request.index())
            .await
            .map_err(map_db_err)?;

        Ok(Paginated::new(
            items.into_iter().map(Into::into).collect(),
            request,
            total_items,
        ))
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<Post>, RepoError> {
        let select = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id);

        self.fetch_page(select, page).await
    }

    async fn followed_posts(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = timeline(user_id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(%user_id, count = result.len(), "Loaded timeline");

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn followed_posts_page(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<Post>, RepoError> {
        self.fetch_page(timeline(user_id), page).await
    }

    async fn recent(&self, page: PageRequest) -> Result<Paginated<Post>, RepoError> {
        let select = PostEntity::find()
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id);

        self.fetch_page(select, page).await
    }
}

#[async_trait]
impl FollowRepository for SqlFollowRepository {
    async fn follow(&self, edge: Follow) -> Result<bool, RepoError> {
        let active_model: follower::ActiveModel = edge.into();
        let inserted = FollowerEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([follower::Column::FollowerId, follower::Column::FollowedId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            follower_id = %edge.follower_id,
            followed_id = %edge.followed_id,
            created = inserted > 0,
            "Follow"
        );

        Ok(inserted > 0)
    }

    async fn unfollow(&self, edge: Follow) -> Result<bool, RepoError> {
        let result = FollowerEntity::delete_by_id((edge.follower_id, edge.followed_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            follower_id = %edge.follower_id,
            followed_id = %edge.followed_id,
            removed = result.rows_affected > 0,
            "Unfollow"
        );

        Ok(result.rows_affected > 0)
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, RepoError> {
        let edge = FollowerEntity::find_by_id((follower_id, followed_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(edge.is_some())
    }

    async fn followed(&self, user_id: Uuid) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Id.in_subquery(followed_ids(user_id)))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn followers(&self, user_id: Uuid) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Id.in_subquery(follower_ids(user_id)))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_followed(&self, user_id: Uuid) -> Result<u64, RepoError> {
        FollowerEntity::find()
            .filter(follower::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<u64, RepoError> {
        FollowerEntity::find()
            .filter(follower::Column::FollowedId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
