//! REST endpoints — submission intake and the admin listing feed.
//!
//! `POST /api/onboard` validates and persists a profile, then fires the
//! best-effort notification. `GET /api/users` returns every stored record.
//! Non-validation failures are collapsed into a generic 500 body; internal
//! detail stays in the logs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::notify::Notifier;
use crate::profile::{Profile, validate};
use crate::store::ProfileStore;

/// Shared state for the API routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    /// Absent when SMTP is not configured.
    pub notifier: Option<Arc<dyn Notifier>>,
}

/// POST /api/onboard
///
/// Persists a validated submission. Responds 201 with the new record's id,
/// 400 with the validation message, or a generic 500.
async fn onboard(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    // Deserialize manually so enum/shape mismatches produce our 400 body
    // rather than axum's rejection.
    let profile: Profile = match serde_json::from_value(body) {
        Ok(profile) => profile,
        Err(e) => return validation_failure(e.to_string()),
    };

    if let Err(e) = validate::validate(&profile) {
        return validation_failure(e.to_string());
    }

    let stored = match state.store.insert_profile(&profile).await {
        Ok(stored) => stored,
        Err(e) => {
            error!(error = %e, "Failed to persist submission");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Failed to onboard user",
                })),
            );
        }
    };
    info!(id = %stored.id, name = %stored.profile.name, "New user onboarded");

    // Best effort; the notifier's verdict never reaches the response.
    if let Some(notifier) = &state.notifier {
        if let Err(e) = notifier.new_submission(&stored).await {
            warn!(id = %stored.id, error = %e, "Onboarding notification dropped");
        }
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "User onboarded successfully",
            "userId": stored.id,
        })),
    )
}

fn validation_failure(detail: String) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "message": "Validation error",
            "error": detail,
        })),
    )
}

/// GET /api/users
///
/// Returns the full persisted record set; the admin view filters and
/// paginates client-side.
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_profiles().await {
        Ok(profiles) => (StatusCode::OK, Json(serde_json::json!(profiles))),
        Err(e) => {
            error!(error = %e, "Failed to list profiles");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Failed to fetch users",
                })),
            )
        }
    }
}

/// Build the API router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/onboard", post(onboard))
        .route("/api/users", get(list_users))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
