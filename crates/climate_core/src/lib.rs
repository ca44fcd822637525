//! Core domain logic for the Honolulu climate API.
//! This crate owns the dataset schema, typed queries and route semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_session, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use model::observation::{
    Observation, PrecipitationRecord, Station, StationId, TemperatureRecord, TemperatureSummary,
};
pub use repo::climate_repo::{
    ClimateRepository, DateRange, RepoError, RepoResult, SqliteClimateRepository,
};
pub use service::climate_service::{ClimateService, DEFAULT_ANCHOR_DATE, LOOKBACK_DAYS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
