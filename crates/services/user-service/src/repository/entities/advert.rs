//! Advert database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Advert;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "adverts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Advert {
    fn from(model: Model) -> Self {
        Advert {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
