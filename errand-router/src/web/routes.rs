//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{ErrandDescriptor, PlanError, RouteStop};
use crate::optimizer::{OptimizeRequest, OptimizerError};

use super::dto::*;
use super::state::AppState;
use super::templates::ItineraryTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route(
            "/api/errands",
            get(list_errands).put(replace_errands).post(add_errand),
        )
        .route(
            "/api/route",
            get(route_snapshot).post(start_route).delete(cancel_route),
        )
        .route("/api/route/optimize", post(optimize_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Itinerary page.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let map = state.routes.with_surface(|view| view.snapshot());
    let status = state.routes.status();
    Html(
        ItineraryTemplate::new(&map, status.as_ref())
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

async fn list_errands(State(state): State<AppState>) -> Json<ErrandListResponse> {
    Json(ErrandListResponse {
        errands: state.routes.errands().list_known_errands().await,
    })
}

/// Replace the whole errand list.
async fn replace_errands(
    State(state): State<AppState>,
    Json(errands): Json<Vec<ErrandDescriptor>>,
) -> Json<ErrandListResponse> {
    let registry = state.routes.errands();
    registry.replace(errands).await;
    Json(ErrandListResponse {
        errands: registry.list_known_errands().await,
    })
}

async fn add_errand(
    State(state): State<AppState>,
    Json(errand): Json<ErrandDescriptor>,
) -> (StatusCode, Json<ErrandListResponse>) {
    let registry = state.routes.errands();
    registry.add(errand).await;
    (
        StatusCode::CREATED,
        Json(ErrandListResponse {
            errands: registry.list_known_errands().await,
        }),
    )
}

/// Start a session for an already-ordered route response.
async fn start_route(
    State(state): State<AppState>,
    Json(stops): Json<Vec<RouteStop>>,
) -> Result<(StatusCode, Json<RouteStarted>), AppError> {
    begin(&state, stops).await
}

/// Order errands with the optimizer, then start a session for the result.
async fn optimize_route(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRouteRequest>,
) -> Result<(StatusCode, Json<RouteStarted>), AppError> {
    let optimizer = state.optimizer.as_ref().ok_or_else(|| AppError::Unavailable {
        message: "no optimizer configured".to_string(),
    })?;

    let request = OptimizeRequest::round_trip(req.origin, &req.errands, req.algorithm);
    let stops = optimizer.solve(&request).await?;

    begin(&state, stops).await
}

async fn begin(
    state: &AppState,
    stops: Vec<RouteStop>,
) -> Result<(StatusCode, Json<RouteStarted>), AppError> {
    let count = stops.len();
    let session = state.routes.compute_route(stops).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(RouteStarted {
            session,
            stops: count,
            legs: count - 1,
        }),
    ))
}

async fn route_snapshot(State(state): State<AppState>) -> Json<RouteSnapshotResponse> {
    // Status first: a leg drawn in between shows up in `map` a moment early
    // rather than the other way round.
    let session = state.routes.status();
    let map = state.routes.with_surface(|view| view.snapshot());
    Json(RouteSnapshotResponse { session, map })
}

/// Stop the active session and clear the map.
async fn cancel_route(State(state): State<AppState>) -> StatusCode {
    state.routes.cancel();
    StatusCode::NO_CONTENT
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Unavailable { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<OptimizerError> for AppError {
    fn from(e: OptimizerError) -> Self {
        match e {
            OptimizerError::NoErrands => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
