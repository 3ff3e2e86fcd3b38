//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub about_me: Option<String>,
    pub last_seen: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for blogpost_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            about_me: model.about_me,
            last_seen: model.last_seen.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<blogpost_core::domain::User> for ActiveModel {
    fn from(user: blogpost_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            about_me: Set(user.about_me),
            last_seen: Set(user.last_seen.map(Into::into)),
            created_at: Set(user.created_at.into()),
        }
    }
}
