//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::StationId;
use crate::ndbc::ReportSource;
use crate::poller::RegistrationError;
use crate::sensors::readings;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: ReportSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/stations",
            get(list_stations::<S>).post(register_station::<S>),
        )
        .route(
            "/api/stations/:station",
            get(get_station::<S>).delete(delete_station::<S>),
        )
        .route("/api/stations/:station/sensors", get(get_sensors::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List registered stations.
async fn list_stations<S: ReportSource>(
    State(state): State<AppState<S>>,
) -> Json<StationListResponse> {
    let registry = &state.registry;
    let mut stations = Vec::new();

    for station in registry.stations().await {
        // Skip stations unregistered since the listing
        if let Some(status) = registry.status(&station).await {
            stations.push(StationSummary::new(&station, status));
        }
    }

    Json(StationListResponse { stations })
}

/// Register a station. Blocks until the validation fetch finishes.
async fn register_station<S: ReportSource>(
    State(state): State<AppState<S>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let registration = state.registry.register(&req.station_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            station_id: registration.station.to_string(),
            title: registration.title,
        }),
    ))
}

/// Current snapshot of a station.
async fn get_station<S: ReportSource>(
    State(state): State<AppState<S>>,
    Path(station): Path<String>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let station = parse_station(&station)?;
    let registry = &state.registry;

    let (Some(snapshot), Some(status)) = (
        registry.current(&station).await,
        registry.status(&station).await,
    ) else {
        return Err(AppError::not_registered(&station));
    };

    Ok(Json(SnapshotResponse::new(&snapshot, status)))
}

/// Sensor readings of a station.
async fn get_sensors<S: ReportSource>(
    State(state): State<AppState<S>>,
    Path(station): Path<String>,
) -> Result<Json<SensorsResponse>, AppError> {
    let station = parse_station(&station)?;

    let snapshot = state
        .registry
        .current(&station)
        .await
        .ok_or_else(|| AppError::not_registered(&station))?;

    Ok(Json(SensorsResponse::new(
        snapshot.station(),
        &readings(&snapshot),
    )))
}

/// Stop polling a station.
async fn delete_station<S: ReportSource>(
    State(state): State<AppState<S>>,
    Path(station): Path<String>,
) -> Result<StatusCode, AppError> {
    let station = parse_station(&station)?;

    if state.registry.unregister(&station).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_registered(&station))
    }
}

fn parse_station(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        code: "invalid_station",
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { code: &'static str, message: String },
    NotFound { message: String },
    Conflict { code: &'static str, message: String },
    Unprocessable { code: &'static str, message: String },
    BadGateway { code: &'static str, message: String },
}

impl AppError {
    fn not_registered(station: &StationId) -> Self {
        AppError::NotFound {
            message: format!("station {} is not registered", station),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(e: RegistrationError) -> Self {
        let code = e.code();
        let message = e.to_string();
        match e {
            RegistrationError::InvalidStation(_) => AppError::BadRequest { code, message },
            RegistrationError::AlreadyConfigured(_) => AppError::Conflict { code, message },
            RegistrationError::NoData(_) => AppError::Unprocessable { code, message },
            RegistrationError::Unreachable(_) => AppError::BadGateway { code, message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, code, message),
            AppError::Unprocessable { code, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, code, message)
            }
            AppError::BadGateway { code, message } => (StatusCode::BAD_GATEWAY, code, message),
        };

        warn!(status = %status, code, "{message}");

        let body = Json(ErrorResponse {
            error: message,
            code,
        });
        (status, body).into_response()
    }
}
