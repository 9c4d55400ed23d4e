//! HTTP webhook listener. Runs as its own axum server sharing the store
//! with the scheduler; it does not go through a [`TriggerSource`] since it
//! must answer synchronously with a result-specific status code rather than
//! silently skipping a busy or unknown script.

use std::sync::Arc;

use axum::extract::{Path as AxumPath, State};
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde_json::json;

use crate::executor::run_command;
use crate::lock::{owner_id, script_lock_key, try_acquire};
use crate::store::Store;

#[derive(Clone)]
struct WebhookState {
    store: Arc<Store>,
    owner: String,
}

pub fn router(store: Arc<Store>) -> Router {
    let state = WebhookState {
        store,
        owner: owner_id(),
    };
    Router::new()
        .route("/trigger/:name", post(trigger))
        .with_state(state)
}

pub async fn serve(store: Arc<Store>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = router(store);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "webhook server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn trigger(
    State(state): State<WebhookState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let webhook = match state.store.get_webhook(&name).await {
        Ok(Some(wh)) => wh,
        Ok(None) => {
            return (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({ "ok": false, "error": "unknown webhook", "name": name })),
            )
        }
        Err(e) => {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        }
    };

    let script = match state.store.get_script(webhook.script_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({ "ok": false, "error": "script not found" })),
            )
        }
        Err(e) => {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        }
    };

    let lock_key = script_lock_key(script.id);
    match try_acquire(&state.store, &lock_key, &state.owner).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                axum::http::StatusCode::CONFLICT,
                Json(json!({ "ok": false, "error": "script is already running" })),
            )
        }
        Err(e) => {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
        }
    }

    let trigger_id = format!("webhook:{name}");
    let run_id = match state.store.create_run(script.id, Some(&trigger_id)).await {
        Ok(id) => id,
        Err(e) => {
            let _ = crate::lock::release(&state.store, &lock_key, &state.owner).await;
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            );
        }
    };

    let response = match run_command(&script.command, script.working_dir.as_deref(), None).await {
        Ok(result) => {
            let status = if result.exit_code == Some(0) {
                "success"
            } else {
                "failed"
            };
            let _ = state
                .store
                .finish_run(run_id, status, result.exit_code, &result.stdout, &result.stderr)
                .await;
            (
                axum::http::StatusCode::OK,
                Json(json!({ "ok": true, "run_id": run_id, "status": status })),
            )
        }
        Err(e) => {
            let _ = state
                .store
                .finish_run(run_id, "failed", None, "", &e.to_string())
                .await;
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "run_id": run_id, "error": e.to_string() })),
            )
        }
    };

    let _ = crate::lock::release(&state.store, &lock_key, &state.owner).await;
    response
}
