use chrono::{TimeDelta, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::DbConn;
use uuid::Uuid;

use blogpost_core::domain::{Follow, PageRequest, Post, User};
use blogpost_core::error::RepoError;
use blogpost_core::ports::{FollowRepository, PostRepository, UserRepository};

use super::{
    DatabaseConfig, DatabaseConnections, SqlFollowRepository, SqlPostRepository,
    SqlUserRepository,
};

struct Repos {
    users: Box<dyn UserRepository>,
    posts: Box<dyn PostRepository>,
    follows: Box<dyn FollowRepository>,
}

async fn setup() -> Repos {
    let connections = DatabaseConnections::init(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    Migrator::up(&connections.main, None).await.unwrap();

    repos(connections.main)
}

fn repos(db: DbConn) -> Repos {
    Repos {
        users: Box::new(SqlUserRepository::new(db.clone())),
        posts: Box::new(SqlPostRepository::new(db.clone())),
        follows: Box::new(SqlFollowRepository::new(db)),
    }
}

async fn create_user(repos: &Repos, username: &str) -> User {
    repos
        .users
        .insert(User::new(username, format!("{username}@example.com")))
        .await
        .unwrap()
}

async fn follow(repos: &Repos, follower: &User, followed: &User) -> bool {
    repos
        .follows
        .follow(Follow::new(follower.id, followed.id).unwrap())
        .await
        .unwrap()
}

async fn unfollow(repos: &Repos, follower: &User, followed: &User) -> bool {
    repos
        .follows
        .unfollow(Follow::new(follower.id, followed.id).unwrap())
        .await
        .unwrap()
}

fn ids(posts: &[Post]) -> Vec<Uuid> {
    posts.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let at = Utc::now() - TimeDelta::minutes(5);

    let post = repos
        .posts
        .insert(Post::new(john.id, "Test Post").at(at))
        .await
        .unwrap();

    let found = repos.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(found.body, "Test Post");
    assert_eq!(found.id, post.id);
    assert_eq!(found.user_id, john.id);
    assert_eq!(found.timestamp.timestamp_millis(), at.timestamp_millis());

    assert!(repos.posts.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_lookup() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;

    let by_name = repos.users.find_by_username("john").await.unwrap().unwrap();
    let by_email = repos
        .users
        .find_by_email("john@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_name.id, john.id);
    assert_eq!(by_email.id, john.id);
    assert!(repos.users.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_many() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;
    create_user(&repos, "mary").await;

    let mut found = repos
        .users
        .find_many(&[john.id, susan.id, Uuid::now_v7()])
        .await
        .unwrap();
    found.sort_by(|a, b| a.username.cmp(&b.username));

    let names: Vec<_> = found.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["john", "susan"]);
    assert!(repos.users.find_many(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_username_is_a_constraint_error() {
    let repos = setup().await;
    create_user(&repos, "john").await;

    let result = repos
        .users
        .insert(User::new("john", "other@example.com"))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_duplicate_email_is_a_constraint_error() {
    let repos = setup().await;
    create_user(&repos, "john").await;

    let result = repos
        .users
        .insert(User::new("johnny", "john@example.com"))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_update_profile_and_last_seen() {
    let repos = setup().await;
    let mut john = create_user(&repos, "john").await;
    assert!(john.last_seen.is_none());

    john.about_me = Some("I write short posts".to_string());
    repos.users.update(john.clone()).await.unwrap();

    let seen_at = Utc::now();
    repos.users.touch_last_seen(john.id, seen_at).await.unwrap();

    let stored = repos.users.find_by_id(john.id).await.unwrap().unwrap();
    assert_eq!(stored.about_me.as_deref(), Some("I write short posts"));
    let last_seen = stored.last_seen.unwrap();
    assert!((last_seen - seen_at).num_milliseconds().abs() < 1000);
}

#[tokio::test]
async fn test_touch_last_seen_unknown_user() {
    let repos = setup().await;

    let result = repos.users.touch_last_seen(Uuid::now_v7(), Utc::now()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_follow() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;

    assert!(repos.follows.followed(john.id).await.unwrap().is_empty());
    assert!(repos.follows.followers(john.id).await.unwrap().is_empty());

    assert!(follow(&repos, &john, &susan).await);
    assert!(repos.follows.is_following(john.id, susan.id).await.unwrap());
    assert!(!repos.follows.is_following(susan.id, john.id).await.unwrap());
    assert_eq!(repos.follows.count_followed(john.id).await.unwrap(), 1);
    assert_eq!(repos.follows.followed(john.id).await.unwrap()[0].username, "susan");
    assert_eq!(repos.follows.count_followers(susan.id).await.unwrap(), 1);
    assert_eq!(repos.follows.followers(susan.id).await.unwrap()[0].username, "john");

    assert!(unfollow(&repos, &john, &susan).await);
    assert!(!repos.follows.is_following(john.id, susan.id).await.unwrap());
    assert_eq!(repos.follows.count_followed(john.id).await.unwrap(), 0);
    assert_eq!(repos.follows.count_followers(susan.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_follow_is_idempotent() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;

    assert!(follow(&repos, &john, &susan).await);
    assert!(!follow(&repos, &john, &susan).await);

    assert_eq!(repos.follows.count_followed(john.id).await.unwrap(), 1);
    assert_eq!(repos.follows.count_followers(susan.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unfollow_without_edge_is_a_no_op() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;

    assert!(!unfollow(&repos, &john, &susan).await);
    assert_eq!(repos.follows.count_followed(john.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_follow_unknown_user_is_a_constraint_error() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;

    let result = repos
        .follows
        .follow(Follow::new(john.id, Uuid::now_v7()).unwrap())
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_follow_posts() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;
    let mary = create_user(&repos, "mary").await;
    let david = create_user(&repos, "david").await;

    let now = Utc::now();
    let mut posts = Vec::new();
    for (author, body, offset) in [
        (&john, "post from john", 1),
        (&susan, "post from susan", 4),
        (&mary, "post from mary", 3),
        (&david, "post from david", 2),
    ] {
        let post = Post::new(author.id, body).at(now + TimeDelta::seconds(offset));
        posts.push(repos.posts.insert(post).await.unwrap());
    }
    let [p1, p2, p3, p4] = [&posts[0], &posts[1], &posts[2], &posts[3]];

    follow(&repos, &john, &susan).await;
    follow(&repos, &john, &david).await;
    follow(&repos, &susan, &mary).await;
    follow(&repos, &mary, &david).await;

    let f1 = repos.posts.followed_posts(john.id).await.unwrap();
    let f2 = repos.posts.followed_posts(susan.id).await.unwrap();
    let f3 = repos.posts.followed_posts(mary.id).await.unwrap();
    let f4 = repos.posts.followed_posts(david.id).await.unwrap();

    assert_eq!(ids(&f1), vec![p2.id, p4.id, p1.id]);
    assert_eq!(ids(&f2), vec![p2.id, p3.id]);
    assert_eq!(ids(&f3), vec![p3.id, p4.id]);
    assert_eq!(ids(&f4), vec![p4.id]);
}

#[tokio::test]
async fn test_equal_timestamps_newest_post_first() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;
    follow(&repos, &john, &susan).await;

    let when = Utc::now();
    let first = repos
        .posts
        .insert(Post::new(susan.id, "first").at(when))
        .await
        .unwrap();
    let second = repos
        .posts
        .insert(Post::new(john.id, "second").at(when))
        .await
        .unwrap();

    let timeline = repos.posts.followed_posts(john.id).await.unwrap();
    assert_eq!(ids(&timeline), vec![second.id, first.id]);
}

#[tokio::test]
async fn test_timeline_pagination() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;
    let mary = create_user(&repos, "mary").await;
    follow(&repos, &john, &susan).await;

    let now = Utc::now();
    for offset in 0..4 {
        let at = now + TimeDelta::seconds(offset);
        repos.posts.insert(Post::new(john.id, "mine").at(at)).await.unwrap();
        repos.posts.insert(Post::new(susan.id, "followed").at(at)).await.unwrap();
        repos.posts.insert(Post::new(mary.id, "hidden").at(at)).await.unwrap();
    }

    let full = repos.posts.followed_posts(john.id).await.unwrap();
    assert_eq!(full.len(), 8);
    assert!(full.iter().all(|p| p.body != "hidden"));

    let first = repos
        .posts
        .followed_posts_page(john.id, PageRequest::new(1, 3))
        .await
        .unwrap();
    assert_eq!(first.total_items, 8);
    assert_eq!(first.total_pages, 3);
    assert_eq!(ids(&first.items), ids(&full[..3]));
    assert!(first.has_next());

    let last = repos
        .posts
        .followed_posts_page(john.id, PageRequest::new(3, 3))
        .await
        .unwrap();
    assert_eq!(ids(&last.items), ids(&full[6..]));
    assert!(!last.has_next());

    let explore = repos.posts.recent(PageRequest::new(1, 100)).await.unwrap();
    assert_eq!(explore.total_items, 12);

    let own = repos
        .posts
        .find_by_user_id(mary.id, PageRequest::new(1, 3))
        .await
        .unwrap();
    assert_eq!(own.total_items, 4);
    assert!(own.items.iter().all(|p| p.user_id == mary.id));
    assert!(own.items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    repos.posts.insert(Post::new(john.id, "only")).await.unwrap();

    let page = repos.posts.recent(PageRequest::new(2, 3)).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 1);
    assert!(!page.has_next());

    let page = repos
        .posts
        .followed_posts_page(john.id, PageRequest::new(u64::MAX, 3))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let repos = setup().await;
    let john = create_user(&repos, "john").await;
    let susan = create_user(&repos, "susan").await;
    follow(&repos, &john, &susan).await;
    follow(&repos, &susan, &john).await;
    let post = repos
        .posts
        .insert(Post::new(susan.id, "soon gone"))
        .await
        .unwrap();

    repos.users.delete(susan.id).await.unwrap();

    assert!(repos.posts.find_by_id(post.id).await.unwrap().is_none());
    assert_eq!(repos.follows.count_followed(john.id).await.unwrap(), 0);
    assert_eq!(repos.follows.count_followers(john.id).await.unwrap(), 0);
    assert!(repos.posts.followed_posts(john.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_user() {
    let repos = setup().await;

    let result = repos.users.delete(Uuid::now_v7()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}
