//! HTTP routes for the climate dataset.
//!
//! # Responsibility
//! - Map each GET route onto one `ClimateService` call.
//! - Open one read-only session per request and release it before replying.
//!
//! # Invariants
//! - Handlers never hold a session across requests.
//! - Blocking SQLite work runs on the blocking pool, not on async workers.
//! - Date path segments are forwarded to the query layer unvalidated.
//!
//! ## Endpoints
//!
//! - `GET /`                                   - HTML route index
//! - `GET /api/v1.0/precipitation`             - `[{date, precipitation}]`
//! - `GET /api/v1.0/stations`                  - `["name", ...]`
//! - `GET /api/v1.0/tobs`                      - `[{date, temperature}]`
//! - `GET /api/v1.0/{start_date}`              - `[min, avg, max]`
//! - `GET /api/v1.0/{start_date}/{end_date}`   - `[min, avg, max]`

use crate::error::{ApiError, ApiResult};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use climate_core::db::open_session;
use climate_core::{
    ClimateService, PrecipitationRecord, RepoResult, SqliteClimateRepository, TemperatureRecord,
    TemperatureSummary, DEFAULT_ANCHOR_DATE,
};
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

const INDEX_HTML: &str = "Welcome to the Honolulu climate analysis API!<br/>\
<br/>\
Available Routes:<br/>\
<br/>\
/api/v1.0/precipitation :-- all precipitation records by date<br/>\
<br/>\
/api/v1.0/stations :-- all weather stations in the dataset<br/>\
<br/>\
/api/v1.0/tobs :-- temperature observations for the last 12 months of data<br/>\
<br/>\
/api/v1.0/start_date :-- minimum, average and maximum temperature from a start date \
through the most recent record (date format yyyy-mm-dd)<br/>\
<br/>\
/api/v1.0/start_date/end_date :-- minimum, average and maximum temperature between a start \
date and an end date, inclusive (date format yyyy-mm-dd)<br/>";

/// Shared, immutable state for climate handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
    anchor_date: NaiveDate,
}

impl AppState {
    /// State serving the dataset at `db_path` with the default anchor date.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self::with_anchor(db_path, DEFAULT_ANCHOR_DATE)
    }

    pub fn with_anchor(db_path: impl Into<PathBuf>, anchor_date: NaiveDate) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
            anchor_date,
        }
    }

    /// Runs `query` against a fresh read-only session.
    ///
    /// The session is opened on the blocking pool and dropped as soon as
    /// `query` returns, before the response is built.
    async fn with_climate_service<T, F>(&self, route: &'static str, query: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ClimateService<SqliteClimateRepository<'_>>) -> RepoResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let db_path = Arc::clone(&self.db_path);
        let anchor_date = self.anchor_date;

        let result = tokio::task::spawn_blocking(move || -> ApiResult<T> {
            let conn = open_session(db_path.as_path())?;
            let service =
                ClimateService::with_anchor(SqliteClimateRepository::new(&conn), anchor_date);
            let value = query(&service)?;
            Ok(value)
        })
        .await
        .map_err(ApiError::from)
        .and_then(|inner| inner);

        match &result {
            Ok(_) => info!(
                "event=route_query module=api status=ok route={} duration_ms={}",
                route,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=route_query module=api status=error route={} duration_ms={} error_code={} error={}",
                route,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }

        result
    }
}

/// Builds the router for every climate route.
///
/// Static segments take priority over the `{start_date}` capture, so
/// `/api/v1.0/tobs` never reaches the summary handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(recent_temperatures))
        .route("/api/v1.0/:start_date", get(summary_since))
        .route("/api/v1.0/:start_date/:end_date", get(summary_between))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn precipitation(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PrecipitationRecord>>> {
    let records = state
        .with_climate_service("precipitation", |service| service.precipitation())
        .await?;
    Ok(Json(records))
}

async fn stations(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = state
        .with_climate_service("stations", |service| service.station_names())
        .await?;
    Ok(Json(names))
}

async fn recent_temperatures(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TemperatureRecord>>> {
    let records = state
        .with_climate_service("tobs", |service| service.recent_temperatures())
        .await?;
    Ok(Json(records))
}

async fn summary_since(
    State(state): State<AppState>,
    Path(start_date): Path<String>,
) -> ApiResult<Json<TemperatureSummary>> {
    let summary = state
        .with_climate_service("summary_since", move |service| {
            service.temperature_summary_since(&start_date)
        })
        .await?;
    Ok(Json(summary))
}

async fn summary_between(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> ApiResult<Json<TemperatureSummary>> {
    let summary = state
        .with_climate_service("summary_between", move |service| {
            service.temperature_summary_between(&start_date, &end_date)
        })
        .await?;
    Ok(Json(summary))
}
