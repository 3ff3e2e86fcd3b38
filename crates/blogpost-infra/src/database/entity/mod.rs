//! SeaORM entities mirroring the migrated schema.

pub mod follower;
pub mod post;
pub mod user;
