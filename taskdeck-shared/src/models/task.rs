/// Task model and database operations
///
/// Every query is scoped by the owning user: a task that belongs to someone
/// else is indistinguishable from a task that does not exist.
///
/// # Status
///
/// ```text
/// PENDING <-> COMPLETED
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('PENDING', 'COMPLETED');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'PENDING',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task, TaskStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     user_id,
///     title: "Write report".to_string(),
///     description: None,
///     status: TaskStatus::Pending,
/// }).await?;
///
/// let toggled = Task::toggle_for_user(&pool, task.id, user_id).await?;
/// assert_eq!(toggled.map(|t| t.status), Some(TaskStatus::Completed));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Task completion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// The other status
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status must be either PENDING or COMPLETED")]
pub struct ParseTaskStatusError;

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "COMPLETED" => Ok(TaskStatus::Completed),
            _ => Err(ParseTaskStatusError),
        }
    }
}

/// A personal task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short title (3-200 characters)
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Completion status
    pub status: TaskStatus,

    /// Owning user
    pub user_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// Input for a partial update
///
/// Only `Some` fields are written. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Listing filter for a single user's tasks
#[derive(Debug, Clone)]
pub struct TaskFilter {
    /// Only tasks with this status
    pub status: Option<TaskStatus>,

    /// Case-insensitive substring of the title
    pub search: Option<String>,

    /// Page size
    pub limit: i64,

    /// Rows to skip
    pub offset: i64,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: 10,
            offset: 0,
        }
    }
}

impl TaskFilter {
    /// ILIKE pattern for `search`, with LIKE wildcards escaped
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Escapes `\`, `%` and `_` so user input matches literally in LIKE
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at, updated_at";

const FILTER_CLAUSE: &str = "user_id = $1
      AND ($2::task_status IS NULL OR status = $2)
      AND ($3::text IS NULL OR title ILIKE $3)";

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, title, description, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {TASK_COLUMNS}"
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(data.user_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .fetch_one(pool)
            .await
    }

    /// Finds a task owned by `user_id`
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lists a user's tasks, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE {FILTER_CLAUSE}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(filter.status)
            .bind(filter.search_pattern())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Counts a user's tasks matching the filter (ignores limit/offset)
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM tasks WHERE {FILTER_CLAUSE}");

        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(user_id)
            .bind(filter.status)
            .bind(filter.search_pattern())
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Applies a partial update to a task owned by `user_id`
    ///
    /// Returns None if no such task exists for the user.
    pub async fn update_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(
            " WHERE id = $1 AND user_id = $2 RETURNING {TASK_COLUMNS}"
        ));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(user_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        q.fetch_optional(pool).await
    }

    /// Flips PENDING <-> COMPLETED in one statement
    pub async fn toggle_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks
             SET status = CASE status
                     WHEN 'PENDING'::task_status THEN 'COMPLETED'::task_status
                     ELSE 'PENDING'::task_status
                 END,
                 updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {TASK_COLUMNS}"
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a task owned by `user_id`
    ///
    /// Returns false if no such task exists for the user.
    pub async fn delete_for_user(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
