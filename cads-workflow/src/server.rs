//! The HTTP façade: one stateless endpoint that runs a workflow per request.
//!
//! `POST /run` with `{"workflow": "<path>"}` answers `200` with the result
//! store on success, `400` for malformed input, `500` with the error message
//! for any downstream failure, and `404` for every other path or method.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::executor::RunResults;
use crate::runner::Runner;

#[derive(Debug, Deserialize)]
struct RunRequest {
    #[serde(default)]
    workflow: String,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    workflow: String,
    results: RunResults,
}

/// Build the router. The runner is shared across requests; admission control
/// is the host's concern.
pub fn router(runner: Arc<Runner>) -> Router {
    Router::new().fallback(dispatch).with_state(runner)
}

async fn dispatch(
    State(runner): State<Arc<Runner>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    if method != Method::POST || uri.path() != "/run" {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }

    let request: RunRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid JSON payload").into_response(),
    };
    if request.workflow.is_empty() {
        return (StatusCode::BAD_REQUEST, "workflow is required").into_response();
    }

    let workflow = request.workflow.clone();
    let result = tokio::task::spawn_blocking(move || runner.run(&workflow)).await;

    match result {
        Ok(Ok(results)) => Json(RunResponse {
            workflow: request.workflow,
            results,
        })
        .into_response(),
        Ok(Err(err)) => {
            log::error!("workflow {} failed: {err}", request.workflow);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
        Err(join_err) => {
            log::error!("workflow task panicked: {join_err}");
            (StatusCode::INTERNAL_SERVER_ERROR, join_err.to_string()).into_response()
        }
    }
}
