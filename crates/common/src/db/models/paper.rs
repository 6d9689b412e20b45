//! Paper entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::PaperRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,

    pub year: Option<i32>,

    #[sea_orm(column_type = "Text", nullable)]
    pub url: Option<String>,

    /// Referenced paper ids as a JSONB array of strings
    #[sea_orm(column_type = "JsonBinary")]
    pub references: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaperRecord {
    fn from(model: Model) -> Self {
        // Anything but a string in the array is not a paper id
        let references = match model.references {
            Json::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Json::String(id) => Some(id),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        PaperRecord {
            id: Some(model.id),
            title: model.title,
            year: model.year,
            url: model.url,
            references,
        }
    }
}
