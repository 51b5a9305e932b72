/// Task endpoints
///
/// Every route runs behind the access token middleware and only ever sees
/// the caller's own tasks. A task owned by someone else answers exactly like
/// a task that does not exist (404 "Task not found").
///
/// # Endpoints
///
/// - `GET    /tasks` - List with pagination, status filter and title search
/// - `POST   /tasks` - Create
/// - `GET    /tasks/:id` - Fetch one
/// - `PATCH  /tasks/:id` - Partial update
/// - `DELETE /tasks/:id` - Delete
/// - `PATCH  /tasks/:id/toggle` - Flip PENDING <-> COMPLETED

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::{trim_in_place, Normalize, ValidatedJson},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Page size when `limit` is missing or invalid
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted `limit`
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query string for `GET /tasks`
///
/// Kept as raw strings so bad values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Resolved pagination and filter for a listing
#[derive(Debug, Clone, PartialEq)]
struct ListParams {
    page: i64,
    limit: i64,
    status: Option<TaskStatus>,
    search: Option<String>,
}

impl ListTasksQuery {
    fn resolve(&self) -> ListParams {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        // Unknown statuses are ignored rather than rejected
        let status = self.status.as_deref().and_then(|s| s.parse().ok());

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ListParams {
            page,
            limit,
            status,
            search,
        }
    }
}

impl ListParams {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            search: self.search.clone(),
            limit: self.limit,
            offset: (self.page - 1).saturating_mul(self.limit),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
}

/// Pagination block of a listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// Response for `GET /tasks`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTasksResponse {
    pub tasks: Vec<Task>,
    pub pagination: Pagination,
}

/// Response for create, update and toggle
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: Task,
}

/// Response for delete
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

/// Create task request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    /// PENDING or COMPLETED, defaults to PENDING
    pub status: Option<String>,
}

impl Normalize for CreateTaskRequest {
    fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        if let Some(description) = self.description.as_mut() {
            trim_in_place(description);
        }
    }
}

/// Update task request
///
/// Absent (or null) fields are left alone. An empty `description` clears it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,

    pub status: Option<String>,
}

impl Normalize for UpdateTaskRequest {
    fn normalize(&mut self) {
        if let Some(title) = self.title.as_mut() {
            trim_in_place(title);
        }
        if let Some(description) = self.description.as_mut() {
            trim_in_place(description);
        }
    }
}

impl UpdateTaskRequest {
    fn into_update(self) -> ApiResult<UpdateTask> {
        Ok(UpdateTask {
            title: self.title,
            description: self.description.map(non_empty),
            status: parse_status(self.status.as_deref())?,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_status(raw: Option<&str>) -> ApiResult<Option<TaskStatus>> {
    raw.map(|s| s.trim().parse::<TaskStatus>())
        .transpose()
        .map_err(|e| ApiError::ValidationError(vec![ValidationErrorDetail::new("status", e.to_string())]))
}

fn parse_task_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest("Invalid task ID".to_string()))
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// List the caller's tasks, newest first
///
/// ```text
/// GET /tasks?page=2&limit=5&status=PENDING&search=milk
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<ListTasksResponse>> {
    let params = query.resolve();
    let filter = params.filter();

    let (tasks, total) = tokio::try_join!(
        Task::list_for_user(&state.db, auth.user_id, &filter),
        Task::count_for_user(&state.db, auth.user_id, &filter),
    )?;

    Ok(Json(ListTasksResponse {
        tasks,
        pagination: Pagination::new(params.page, params.limit, total),
    }))
}

/// Create a task for the caller
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let status = parse_status(req.status.as_deref())?.unwrap_or_default();

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title: req.title,
            description: req.description.and_then(non_empty),
            status,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: "Task created successfully".to_string(),
            task,
        }),
    ))
}

/// Fetch one of the caller's tasks
pub async fn get_task(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Task>> {
    let id = parse_task_id(&id)?;

    let task = Task::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Partially update one of the caller's tasks
pub async fn update_task(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_task_id(&id)?;
    let update = req.into_update()?;

    let task = if update.is_empty() {
        Task::find_for_user(&state.db, id, auth.user_id).await?
    } else {
        Task::update_for_user(&state.db, id, auth.user_id, update).await?
    }
    .ok_or_else(task_not_found)?;

    tracing::info!(task_id = %task.id, user_id = %auth.user_id, "Task updated");

    Ok(Json(TaskResponse {
        message: "Task updated successfully".to_string(),
        task,
    }))
}

/// Delete one of the caller's tasks
pub async fn delete_task(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let id = parse_task_id(&id)?;

    if !Task::delete_for_user(&state.db, id, auth.user_id).await? {
        return Err(task_not_found());
    }

    tracing::info!(task_id = %id, user_id = %auth.user_id, "Task deleted");

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Flip a task between PENDING and COMPLETED
pub async fn toggle_task(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_task_id(&id)?;

    let task = Task::toggle_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(task_not_found)?;

    tracing::debug!(task_id = %task.id, status = %task.status, "Task toggled");

    Ok(Json(TaskResponse {
        message: "Task status toggled successfully".to_string(),
        task,
    }))
}
