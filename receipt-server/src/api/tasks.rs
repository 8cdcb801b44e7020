//! Task API handlers
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /tasks | GET | list eligible tasks in print order |
//! | /tasks/print | POST | print the whole eligible batch |
//! | /tasks/{id} | GET | one task's details |
//! | /tasks/{id}/print | POST | print one task, mark it printed |
//! | /tasks/{id}/unprint | POST | clear the printed flag |
//! | /tasks/{id}/done | POST | mark the task done |
//! | /summary/print | POST | print the todo summary receipt |

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::warn;

use crate::core::ServerState;
use crate::printing::{BatchOutcome, PrintFailure};
use crate::taskstore::Task;
use crate::utils::{AppResponse, AppResult, ok_with_message};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tasks", get(list))
        .route("/tasks/print", post(print_all))
        .route("/tasks/{id}", get(get_by_id))
        .route("/tasks/{id}/print", post(print_one))
        .route("/tasks/{id}/unprint", post(unprint))
        .route("/tasks/{id}/done", post(done))
        .route("/summary/print", post(print_summary))
}

/// GET /api/v1/tasks - eligible tasks, already in print order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Task>>>> {
    let tasks = state.store.eligible_tasks().await?;
    Ok(ok_with_message(tasks, "Tasks have been retrieved"))
}

/// POST /api/v1/tasks/print - print the whole eligible batch
///
/// Per-item failures never abort the batch. Each task is marked printed
/// right after its own receipt is cut, so a crash mid-batch cannot reprint
/// the tasks that already came out. All-success answers 200; anything less
/// answers 500 with the full outcome (successes plus a list of per-id
/// failures) so the caller can re-request just the losers.
pub async fn print_all(State(state): State<ServerState>) -> AppResult<Response> {
    let tasks = state.store.eligible_tasks().await?;

    let mut outcome = BatchOutcome {
        attempted: tasks.len(),
        succeeded: 0,
        failures: Vec::new(),
    };

    for task in &tasks {
        match state.print.print_task(task).await {
            Ok(_) => {
                // A failed flag update degrades the task to a failure: it
                // will be re-fetched (and re-printed) by the next batch.
                if let Err(e) = state.store.mark_printed(&task.id).await {
                    warn!(task_id = %task.id, error = %e, "Printed but failed to mark as printed");
                    outcome.failures.push(PrintFailure {
                        id: task.id.clone(),
                        error: e.to_string(),
                    });
                } else {
                    outcome.succeeded += 1;
                }
            }
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "Task print failed");
                outcome.failures.push(PrintFailure {
                    id: task.id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let noun = if outcome.succeeded == 1 { "task" } else { "tasks" };
    if outcome.all_ok() {
        let message = format!("{} {} printed", outcome.succeeded, noun);
        return Ok(ok_with_message(outcome, message).into_response());
    }

    let message = format!(
        "{} {} printed, {} failed",
        outcome.succeeded,
        noun,
        outcome.failures.len()
    );
    let body = Json(AppResponse {
        message,
        data: Some(outcome),
    });
    Ok((StatusCode::INTERNAL_SERVER_ERROR, body).into_response())
}

/// GET /api/v1/tasks/{id} - one task's details
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Task>>> {
    let task = state.store.task_details(&id).await?;
    Ok(ok_with_message(task, "Task data has been retrieved"))
}

/// POST /api/v1/tasks/{id}/print - print one task and mark it printed
pub async fn print_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let task = state.store.task_details(&id).await?;
    let number = state.print.print_task(&task).await?;
    state.store.mark_printed(&task.id).await?;

    Ok(ok_with_message(
        json!({ "receipt_number": number }),
        "Task printed",
    ))
}

/// POST /api/v1/tasks/{id}/unprint - clear the printed flag
///
/// One-shot operation against the external store; the counter is untouched.
pub async fn unprint(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.store.unmark_printed(&id).await?;
    Ok(ok_with_message((), "Task unmarked as printed"))
}

/// POST /api/v1/tasks/{id}/done - mark the task done
pub async fn done(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.store.mark_done(&id).await?;
    Ok(ok_with_message((), "Task marked as done"))
}

/// POST /api/v1/summary/print - print the todo summary receipt
pub async fn print_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let tasks = state.store.summary_tasks().await?;
    state.print.print_summary(&tasks).await?;

    Ok(ok_with_message(
        json!({ "task_count": tasks.len() }),
        "Summary printed",
    ))
}
