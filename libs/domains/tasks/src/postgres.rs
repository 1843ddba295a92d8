use async_trait::async_trait;
use chrono::{Duration, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::entity;
use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter};
use crate::repository::TaskRepository;

/// Postgres-backed repository built on Sea-ORM.
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn apply_filter(mut query: Select<entity::Entity>, filter: &TaskFilter) -> Select<entity::Entity> {
        if let Some(completed) = filter.completed {
            query = query.filter(entity::Column::Completed.eq(completed));
        }
        if let Some(date) = filter.due_date {
            // day-level match as a half-open timestamp range
            let start = date.and_time(NaiveTime::MIN).and_utc();
            let end = start + Duration::days(1);
            query = query
                .filter(entity::Column::DueDate.gte(start))
                .filter(entity::Column::DueDate.lt(end));
        }
        query
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;
        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let active_model = entity::ActiveModel {
            id: Set(task.id),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            due_date: Set(task.due_date.map(Into::into)),
            completed: Set(task.completed),
        };
        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(task_id = task.id, "Updated task");
                Ok(model.into())
            }
            // the row disappeared between lookup and update
            Err(DbErr::RecordNotUpdated) => Err(TaskError::NotFound(task.id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, filter: TaskFilter, limit: u64, offset: u64) -> TaskResult<Vec<Task>> {
        let models = Self::apply_filter(entity::Entity::find(), &filter)
            .order_by_asc(entity::Column::DueDate)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: TaskFilter) -> TaskResult<u64> {
        let total = Self::apply_filter(entity::Entity::find(), &filter)
            .count(&self.db)
            .await?;
        Ok(total)
    }
}
