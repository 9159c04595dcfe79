use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub comments: String, // JSON array
    pub comment_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub comments: Vec<String>,
    pub comment_count: i32,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        let comments: Vec<String> = serde_json::from_str(&model.comments).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            comments,
            comment_count: model.comment_count,
        }
    }
}
