use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CreateTask, Task};

/// Sea-ORM entity for the `tasks` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Task {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date.map(Into::into),
            completed: model.completed,
        }
    }
}

impl From<CreateTask> for ActiveModel {
    fn from(input: CreateTask) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            due_date: Set(input.due_date.map(Into::into)),
            completed: Set(input.completed),
        }
    }
}
