//! Route handlers.
//!
//! Each handler builds one use case from shared state, runs it, and maps
//! the outcome to a response.

use crate::error::ApiError;
use crate::schema::{CreateTaskRequest, HealthResponse, TaskResponse, UpdateTaskRequest};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::{
    core_version, CreateTask, DeleteTask, EventLog, GetTask, ListTasks, Task, TaskId,
    TaskRepository, UpdateTask,
};

type ApiResult<T> = Result<T, ApiError>;

fn task_response(log: EventLog, event: &str, task: Task) -> ApiResult<TaskResponse> {
    TaskResponse::try_from(task).map_err(|err| {
        log.failure(event, format_args!("error_code=unexpected error={err}"));
        err
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: core_version().to_string(),
    })
}

pub async fn create_task<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + 'static,
{
    let Json(request) = payload?;
    let task = CreateTask::new(state.repository.clone(), state.service_log)
        .execute(request.title, request.description)
        .await
        .map_err(|err| ApiError::from_repo(state.api_log, "task_create", err))?;

    Ok(Json(task_response(state.api_log, "task_create", task)?))
}

pub async fn get_task<R>(
    State(state): State<AppState<R>>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + 'static,
{
    let Path(id) = id?;
    let task = GetTask::new(state.repository.clone(), state.service_log)
        .execute(id)
        .await
        .map_err(|err| ApiError::from_repo(state.api_log, "task_get", err))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(task_response(state.api_log, "task_get", task)?))
}

pub async fn list_tasks<R>(State(state): State<AppState<R>>) -> ApiResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + Clone + 'static,
{
    let tasks = ListTasks::new(state.repository.clone(), state.service_log)
        .execute()
        .await
        .map_err(|err| ApiError::from_repo(state.api_log, "task_list", err))?;

    let responses = tasks
        .into_iter()
        .map(|task| task_response(state.api_log, "task_list", task))
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(responses))
}

pub async fn update_task<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + 'static,
{
    let Json(request) = payload?;
    let task = UpdateTask::new(state.repository.clone(), state.service_log)
        .execute(&request.into_task())
        .await
        .map_err(|err| ApiError::from_repo(state.api_log, "task_update", err))?;

    Ok(Json(task_response(state.api_log, "task_update", task)?))
}

pub async fn delete_task<R>(
    State(state): State<AppState<R>>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository + Clone + 'static,
{
    let Path(id) = id?;
    DeleteTask::new(state.repository.clone(), state.service_log)
        .execute(id)
        .await
        .map_err(|err| ApiError::from_repo(state.api_log, "task_delete", err))?;

    Ok(StatusCode::NO_CONTENT)
}
