//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use taskboard_core::TaskRepository;

/// Builds the task router.
///
/// ```ignore
/// let pool = taskboard_core::db::open_pool_in_memory()?;
/// let repository = taskboard_core::SqliteTaskRepository::try_new(pool)?;
/// let router = create_router(AppState::new(repository));
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router<R>(state: AppState<R>) -> Router
where
    R: TaskRepository + Clone + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/tasks",
            get(handlers::list_tasks::<R>)
                .post(handlers::create_task::<R>)
                .put(handlers::update_task::<R>),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task::<R>).delete(handlers::delete_task::<R>),
        )
        .with_state(state)
}
