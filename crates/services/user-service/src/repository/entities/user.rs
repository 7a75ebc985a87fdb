//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Advert, Message, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub picture_url: Option<String>,
    pub phone_number: Option<String>,
    pub salt: String,
    pub password: String,
    pub hash_pass: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_advert::Entity")]
    UserAdvert,
    #[sea_orm(has_many = "super::user_message::Entity")]
    UserMessage,
}

impl Related<super::user_advert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAdvert.def()
    }
}

impl Related<super::user_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMessage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity with expanded references.
    pub fn into_user(self, adverts: Vec<Advert>, messages: Vec<Message>) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            picture_url: self.picture_url,
            phone_number: self.phone_number,
            salt: self.salt,
            password: self.password,
            hash_pass: self.hash_pass,
            messages,
            adverts,
            created_at: self.created_at,
        }
    }
}
