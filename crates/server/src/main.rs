// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use roomboard::{FeedClient, StaticFeed};
use roomboard_api::{
    ActivityListResponse, ActivityRecordedResponse, ApiError, CompleteTaskRequest,
    CompleteTaskResponse, CompletionListResponse, Housekeeping, LinenSubmissionRequest,
    PollUpdatesRequest, PollUpdatesResponse, PurgeActivityResponse, RoomDayViewRequest,
    RoomDayViewResponse, RoomDetailResponse, SettingsRegistry,
};
use roomboard_domain::Timestamp;
use roomboard_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// Roomboard Server - housekeeping board backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to the JSON location settings file
    #[arg(short, long)]
    settings: String,

    /// Path to a JSON feed snapshot served in place of the upstream system
    #[arg(long)]
    feed_fixture: Option<String>,

    /// Seconds between activity log retention sweeps
    #[arg(long, default_value_t = 3600)]
    sweep_interval_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The local ledger.
    persistence: Arc<Mutex<Persistence>>,
    /// The housekeeping operations.
    service: Arc<Housekeeping>,
    /// Live hint fan-out.
    live: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Query parameters naming an optional service date.
#[derive(Debug, Default, Deserialize)]
struct DateQuery {
    /// The service date. Defaults to today at the location.
    #[serde(default)]
    date: Option<Date>,
}

/// A configured location.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationInfo {
    /// The location identifier.
    id: String,
    /// The display name.
    name: String,
    /// The IANA timezone.
    timezone: String,
}

/// API response for listing locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListLocationsResponse {
    /// Every configured location.
    locations: Vec<LocationInfo>,
}

/// The completion a repeat attempt collided with.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExistingCompletion {
    /// The ledger identifier.
    completion_id: i64,
    /// Display name of the completer.
    completed_by: String,
    /// When it was completed.
    completed_at: Timestamp,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Present when the task was already completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    existing: Option<ExistingCompletion>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// The winning completion, for `409` responses.
    existing: Option<ExistingCompletion>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            existing: self.existing,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        let (status, existing): (StatusCode, Option<ExistingCompletion>) = match err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::AlreadyCompleted {
                completion_id,
                completed_by,
                completed_at,
            } => (
                StatusCode::CONFLICT,
                Some(ExistingCompletion {
                    completion_id,
                    completed_by,
                    completed_at,
                }),
            ),
            ApiError::RemoteSyncFailed { .. } => (StatusCode::BAD_GATEWAY, None),
            ApiError::FeedUnavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, None),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        Self {
            status,
            message,
            existing,
        }
    }
}

/// Handler for GET `/locations`.
#[allow(clippy::unused_async)]
async fn handle_list_locations(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ListLocationsResponse> {
    let locations: Vec<LocationInfo> = app_state
        .service
        .settings()
        .iter()
        .map(|settings| LocationInfo {
            id: settings.id.clone(),
            name: settings.name.clone(),
            timezone: settings.timezone.clone(),
        })
        .collect();
    Json(ListLocationsResponse { locations })
}

/// Handler for GET `/locations/{location}/rooms`.
///
/// Returns the room-day view, narrowed by the optional filter button.
#[allow(clippy::unused_async)]
async fn handle_get_room_day_view(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Query(request): Query<RoomDayViewRequest>,
) -> Result<Json<RoomDayViewResponse>, HttpError> {
    info!(
        location = %location,
        date = ?request.date,
        filter = ?request.filter,
        "Handling room-day view request"
    );
    let response: RoomDayViewResponse = app_state.service.get_room_day_view(&location, &request)?;
    Ok(Json(response))
}

/// Handler for GET `/locations/{location}/rooms/{room_id}`.
async fn handle_get_room_detail(
    AxumState(app_state): AxumState<AppState>,
    Path((location, room_id)): Path<(String, String)>,
    Query(query): Query<DateQuery>,
) -> Result<Json<RoomDetailResponse>, HttpError> {
    info!(location = %location, room_id = %room_id, "Handling room detail request");
    let mut persistence = app_state.persistence.lock().await;
    let response: RoomDetailResponse =
        app_state
            .service
            .get_room_detail(&mut persistence, &location, &room_id, query.date)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/locations/{location}/completions`.
///
/// Records a completion and hints open boards to poll.
async fn handle_complete_task(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Json(request): Json<CompleteTaskRequest>,
) -> Result<Json<CompleteTaskResponse>, HttpError> {
    info!(
        location = %location,
        room_id = %request.room_id,
        completed_by = %request.completed_by_id,
        "Handling complete_task request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteTaskResponse =
        app_state
            .service
            .complete_task(&mut persistence, &location, request)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::TaskCompleted {
        location_id: location,
        room_id: response.room_id.clone(),
        service_date: response.service_date,
        completion_id: response.completion_id,
        completed_at: response.completed_at,
    });

    Ok(Json(response))
}

/// Handler for GET `/locations/{location}/completions`.
async fn handle_list_completions(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CompletionListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CompletionListResponse =
        app_state
            .service
            .list_completions(&mut persistence, &location, query.date)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/locations/{location}/updates`.
///
/// Returns completions newer than the client's checkpoint.
async fn handle_poll_updates(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Query(request): Query<PollUpdatesRequest>,
) -> Result<Json<PollUpdatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PollUpdatesResponse =
        app_state
            .service
            .poll_updates(&mut persistence, &location, &request)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for POST `/locations/{location}/activity/linen`.
async fn handle_record_linen(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Json(request): Json<LinenSubmissionRequest>,
) -> Result<Json<ActivityRecordedResponse>, HttpError> {
    info!(location = %location, room_id = %request.room_id, "Handling linen submission");
    let mut persistence = app_state.persistence.lock().await;
    let response: ActivityRecordedResponse =
        app_state
            .service
            .record_linen_submission(&mut persistence, &location, request)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/locations/{location}/activity`.
async fn handle_list_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(location): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ActivityListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ActivityListResponse =
        app_state
            .service
            .list_activity(&mut persistence, &location, query.date)?;
    drop(persistence);
    Ok(Json(response))
}

/// Handler for GET `/completers/{completed_by_id}/completions`.
async fn handle_list_completions_by_completer(
    AxumState(app_state): AxumState<AppState>,
    Path(completed_by_id): Path<String>,
) -> Result<Json<CompletionListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CompletionListResponse = app_state
        .service
        .list_completions_by_completer(&mut persistence, &completed_by_id)?;
    drop(persistence);
    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/locations", get(handle_list_locations))
        .route("/locations/{location}/rooms", get(handle_get_room_day_view))
        .route(
            "/locations/{location}/rooms/{room_id}",
            get(handle_get_room_detail),
        )
        .route(
            "/locations/{location}/completions",
            post(handle_complete_task).get(handle_list_completions),
        )
        .route("/locations/{location}/updates", get(handle_poll_updates))
        .route("/locations/{location}/activity", get(handle_list_activity))
        .route(
            "/locations/{location}/activity/linen",
            post(handle_record_linen),
        )
        .route(
            "/completers/{completed_by_id}/completions",
            get(handle_list_completions_by_completer),
        )
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Runs one activity log retention sweep.
async fn sweep_activity_log(app_state: &AppState) {
    let mut persistence = app_state.persistence.lock().await;
    let result: Result<PurgeActivityResponse, ApiError> = app_state
        .service
        .purge_activity_log(&mut persistence, Timestamp::now());
    drop(persistence);

    match result {
        Ok(purged) => info!(
            deleted = purged.deleted,
            cutoff = %purged.cutoff,
            "Swept activity log"
        ),
        Err(e) => error!(error = %e, "Activity log sweep failed"),
    }
}

/// Spawns the periodic activity log sweep.
fn spawn_activity_sweep(app_state: AppState, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker: tokio::time::Interval = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            sweep_activity_log(&app_state).await;
        }
    })
}

/// Loads the feed served in place of the upstream system.
///
/// Without a fixture every feed read fails, so boards show no rooms.
fn load_feed(path: Option<&str>) -> Result<StaticFeed, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        warn!("No feed fixture given; feed reads will report unavailable");
        let mut feed: StaticFeed = StaticFeed::default();
        feed.offline = true;
        return Ok(feed);
    };
    info!("Loading feed fixture from: {}", path);
    let json: String = std::fs::read_to_string(path)?;
    Ok(StaticFeed::from_json(&json)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Roomboard Server");

    let settings_json: String = std::fs::read_to_string(&args.settings)?;
    let settings: SettingsRegistry = SettingsRegistry::from_json(&settings_json)?;
    info!(locations = settings.len(), "Loaded location settings");

    let feed: Arc<dyn FeedClient> = Arc::new(load_feed(args.feed_fixture.as_deref())?);

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        service: Arc::new(Housekeeping::new(feed, settings)),
        live: Arc::new(LiveEventBroadcaster::new()),
    };

    let _sweep = spawn_activity_sweep(
        app_state.clone(),
        Duration::from_secs(args.sweep_interval_secs.max(1)),
    );

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
