//! Schema migrations for the Blogpost database.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_and_posts;
mod m20240101_000002_create_followers;
mod m20240101_000003_add_profile_fields_to_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_and_posts::Migration),
            Box::new(m20240101_000002_create_followers::Migration),
            Box::new(m20240101_000003_add_profile_fields_to_users::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    AboutMe,
    LastSeen,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Posts {
    Table,
    Id,
    UserId,
    Body,
    Timestamp,
}

#[derive(DeriveIden)]
pub(crate) enum Followers {
    Table,
    FollowerId,
    FollowedId,
}
