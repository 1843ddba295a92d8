use std::sync::Arc;

use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, TaskPage};
use crate::repository::TaskRepository;

/// Business logic over a [`TaskRepository`]. Storage failures are
/// logged here and collapsed into an opaque `Internal` error so that
/// clients never see backend details.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;
        match self.repository.create(input).await {
            Ok(task) => Ok(task),
            Err(err) => {
                tracing::error!(error = %err, "Failed to create task");
                Err(TaskError::Internal)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        match self.repository.get_by_id(id).await {
            Ok(Some(task)) => Ok(task),
            Ok(None) => Err(TaskError::NotFound(id)),
            Err(err) => {
                tracing::error!(task_id = id, error = %err, "Failed to fetch task");
                Err(TaskError::Internal)
            }
        }
    }

    #[instrument(skip(self, task))]
    pub async fn update_task(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        match self.repository.update(task).await {
            Ok(updated) => Ok(updated),
            Err(TaskError::NotFound(id)) => Err(TaskError::NotFound(id)),
            Err(err) => {
                tracing::error!(task_id = id, error = %err, "Failed to update task");
                Err(TaskError::Internal)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> TaskResult<()> {
        match self.repository.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TaskError::NotFound(id)),
            Err(err) => {
                tracing::error!(task_id = id, error = %err, "Failed to delete task");
                Err(TaskError::Internal)
            }
        }
    }

    /// Serves one page of the filtered listing.
    ///
    /// The page count rounds up, a requested page past the end is
    /// clamped to the last page, and an empty result keeps both
    /// `count_page` and `cur_page` at zero. `limit` must be positive;
    /// the handler guarantees that.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, filter: TaskFilter, limit: u64, page: u64) -> TaskResult<TaskPage> {
        let total = match self.repository.count(filter).await {
            Ok(total) => total,
            Err(err) => {
                tracing::error!(error = %err, "Failed to count tasks");
                return Err(TaskError::Internal);
            }
        };

        let mut count_page = total / limit;
        if total % limit != 0 {
            count_page += 1;
        }

        let cur_page = page.min(count_page);
        let offset = if cur_page > 1 { (cur_page - 1) * limit } else { 0 };

        let tasks = match self.repository.list(filter, limit, offset).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(error = %err, "Failed to list tasks");
                return Err(TaskError::Internal);
            }
        };

        Ok(TaskPage {
            count_page,
            cur_page,
            tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTaskRepository;
    use mockall::predicate::eq;

    fn task(id: i32) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            due_date: None,
            completed: false,
        }
    }

    #[tokio::test]
    async fn list_rounds_page_count_up() {
        let mut repo = MockTaskRepository::new();
        repo.expect_count().returning(|_| Ok(11));
        repo.expect_list()
            .with(eq(TaskFilter::default()), eq(10), eq(0))
            .returning(|_, _, _| Ok(vec![task(1)]));

        let service = TaskService::new(repo);
        let page = service.list_tasks(TaskFilter::default(), 10, 1).await.unwrap();

        assert_eq!(page.count_page, 2);
        assert_eq!(page.cur_page, 1);
    }

    #[tokio::test]
    async fn list_clamps_page_past_the_end() {
        let mut repo = MockTaskRepository::new();
        repo.expect_count().returning(|_| Ok(15));
        // page 7 of 2 collapses to page 2, offset 10
        repo.expect_list()
            .with(eq(TaskFilter::default()), eq(10), eq(10))
            .returning(|_, _, _| Ok(vec![task(11)]));

        let service = TaskService::new(repo);
        let page = service.list_tasks(TaskFilter::default(), 10, 7).await.unwrap();

        assert_eq!(page.count_page, 2);
        assert_eq!(page.cur_page, 2);
    }

    #[tokio::test]
    async fn list_of_nothing_keeps_page_numbers_at_zero() {
        let mut repo = MockTaskRepository::new();
        repo.expect_count().returning(|_| Ok(0));
        repo.expect_list()
            .with(eq(TaskFilter::default()), eq(10), eq(0))
            .returning(|_, _, _| Ok(vec![]));

        let service = TaskService::new(repo);
        let page = service.list_tasks(TaskFilter::default(), 10, 1).await.unwrap();

        assert_eq!(page.count_page, 0);
        assert_eq!(page.cur_page, 0);
        assert!(page.tasks.is_empty());
    }

    #[tokio::test]
    async fn exact_multiple_does_not_add_a_page() {
        let mut repo = MockTaskRepository::new();
        repo.expect_count().returning(|_| Ok(20));
        repo.expect_list().returning(|_, _, _| Ok(vec![]));

        let service = TaskService::new(repo);
        let page = service.list_tasks(TaskFilter::default(), 10, 2).await.unwrap();

        assert_eq!(page.count_page, 2);
        assert_eq!(page.cur_page, 2);
    }

    #[tokio::test]
    async fn storage_failures_become_opaque() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .with(eq(7))
            .returning(|_| Err(TaskError::Database("oops".to_string())));

        let service = TaskService::new(repo);
        let err = service.get_task(7).await.unwrap_err();

        assert!(matches!(err, TaskError::Internal));
    }

    #[tokio::test]
    async fn missing_task_is_not_found_not_internal() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id().with(eq(7)).returning(|_| Ok(None));

        let service = TaskService::new(repo);
        let err = service.get_task(7).await.unwrap_err();

        assert!(matches!(err, TaskError::NotFound(7)));
    }

    #[tokio::test]
    async fn create_rejects_empty_title_before_storage() {
        let repo = MockTaskRepository::new();
        let service = TaskService::new(repo);

        let input = CreateTask {
            title: String::new(),
            description: None,
            due_date: Some(chrono::Utc::now()),
            completed: false,
        };

        let err = service.create_task(input).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }

    #[tokio::test]
    async fn update_passes_not_found_through() {
        let mut repo = MockTaskRepository::new();
        repo.expect_update()
            .returning(|t| Err(TaskError::NotFound(t.id)));

        let service = TaskService::new(repo);
        let err = service.update_task(task(3)).await.unwrap_err();

        assert!(matches!(err, TaskError::NotFound(3)));
    }
}
