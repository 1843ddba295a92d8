use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter};

/// Storage contract for tasks. The service layer only ever talks to
/// this trait, so storage backends can be swapped out in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Replaces the stored task with `task` wholesale. Fails with
    /// `NotFound` if no row with that id exists.
    async fn update(&self, task: Task) -> TaskResult<Task>;

    /// Returns whether a row was actually removed.
    async fn delete(&self, id: i32) -> TaskResult<bool>;

    /// One window of the filtered listing, ordered by due date
    /// ascending with tasks lacking a due date last.
    async fn list(&self, filter: TaskFilter, limit: u64, offset: u64) -> TaskResult<Vec<Task>>;

    /// Total number of tasks matching `filter`, ignoring the window.
    async fn count(&self, filter: TaskFilter) -> TaskResult<u64>;
}

/// In-memory repository used by handler tests and local experiments.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<i32, Task>>>,
    next_id: AtomicI32,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(task: &Task, filter: &TaskFilter) -> bool {
        if let Some(completed) = filter.completed {
            if task.completed != completed {
                return false;
            }
        }
        if let Some(date) = filter.due_date {
            if task.due_date.map(|d| d.date_naive()) != Some(date) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        let task = Task {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            completed: input.completed,
        };
        self.tasks.write().await.insert(id, task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id));
        }
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn list(&self, filter: TaskFilter, limit: u64, offset: u64) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|task| Self::matches(task, &filter))
            .cloned()
            .collect();
        // same ordering as Postgres: ascending, NULL due dates last
        matching.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: TaskFilter) -> TaskResult<u64> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .values()
            .filter(|task| Self::matches(task, &filter))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn input(title: &str, due_day: Option<u32>, completed: bool) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            due_date: due_day.map(|day| Utc.with_ymd_and_hms(2025, 6, day, 10, 0, 0).unwrap()),
            completed,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.create(input("a", Some(1), false)).await.unwrap();
        let second = repo.create(input("b", Some(2), false)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_id(1).await.unwrap().unwrap().title, "a");
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let repo = InMemoryTaskRepository::new();
        let ghost = Task {
            id: 99,
            title: "ghost".to_string(),
            description: None,
            due_date: None,
            completed: false,
        };

        let err = repo.update(ghost).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(99)));
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let repo = InMemoryTaskRepository::new();
        repo.create(input("a", None, false)).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_and_orders_by_due_date() {
        let repo = InMemoryTaskRepository::new();
        repo.create(input("later", Some(20), false)).await.unwrap();
        repo.create(input("sooner", Some(5), false)).await.unwrap();
        repo.create(input("done", Some(5), true)).await.unwrap();
        repo.create(input("undated", None, false)).await.unwrap();

        let open = repo
            .list(
                TaskFilter {
                    completed: Some(false),
                    due_date: None,
                },
                10,
                0,
            )
            .await
            .unwrap();

        let titles: Vec<&str> = open.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later", "undated"]);
    }

    #[tokio::test]
    async fn list_matches_due_date_by_calendar_day() {
        let repo = InMemoryTaskRepository::new();
        repo.create(input("morning", Some(5), false)).await.unwrap();
        repo.create(input("other day", Some(6), false)).await.unwrap();

        let filter = TaskFilter {
            completed: None,
            due_date: Some(chrono::NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()),
        };

        let tasks = repo.list(filter, 10, 0).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "morning");
        assert_eq!(repo.count(filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_applies_offset_and_limit() {
        let repo = InMemoryTaskRepository::new();
        for day in 1..=5 {
            repo.create(input(&format!("t{day}"), Some(day), false))
                .await
                .unwrap();
        }

        let window = repo.list(TaskFilter::default(), 2, 2).await.unwrap();

        let titles: Vec<&str> = window.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["t3", "t4"]);
    }
}
