//! Climate use-case service.
//!
//! # Responsibility
//! - Turn repository reads into the projections served by each route.
//! - Own the "last 12 months" window policy.
//!
//! # Invariants
//! - The recent-temperature window is anchored on a configured date, never
//!   on the server clock.
//! - Service APIs stay storage-agnostic and issue one repository call each.

use crate::model::observation::{PrecipitationRecord, TemperatureRecord, TemperatureSummary};
use crate::repo::climate_repo::{ClimateRepository, DateRange, RepoResult};
use chrono::{Days, NaiveDate};

/// Most recent date in the Honolulu dataset.
pub const DEFAULT_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid anchor date literal"),
};

/// Length of the recent-temperature window, counted back from the anchor.
pub const LOOKBACK_DAYS: u64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Use-case service for the climate routes.
pub struct ClimateService<R: ClimateRepository> {
    repo: R,
    anchor_date: NaiveDate,
}

impl<R: ClimateRepository> ClimateService<R> {
    /// Creates a service anchored on [`DEFAULT_ANCHOR_DATE`].
    pub fn new(repo: R) -> Self {
        Self::with_anchor(repo, DEFAULT_ANCHOR_DATE)
    }

    /// Creates a service with a caller-provided anchor date.
    pub fn with_anchor(repo: R, anchor_date: NaiveDate) -> Self {
        Self { repo, anchor_date }
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// First date (inclusive) of the recent-temperature window.
    pub fn window_start(&self) -> NaiveDate {
        self.anchor_date
            .checked_sub_days(Days::new(LOOKBACK_DAYS))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Every observation's `{date, precipitation}`, in storage order.
    pub fn precipitation(&self) -> RepoResult<Vec<PrecipitationRecord>> {
        self.repo.list_precipitation()
    }

    /// Names of all stations, in storage order.
    pub fn station_names(&self) -> RepoResult<Vec<String>> {
        let stations = self.repo.list_stations()?;
        Ok(stations.into_iter().map(|station| station.name).collect())
    }

    /// `{date, temperature}` for every observation on or after
    /// [`Self::window_start`], across all stations.
    pub fn recent_temperatures(&self) -> RepoResult<Vec<TemperatureRecord>> {
        let since = self.window_start().format(DATE_FORMAT).to_string();
        let observations = self.repo.list_observations(&DateRange::since(since))?;
        Ok(observations.into_iter().map(TemperatureRecord::from).collect())
    }

    /// MIN/AVG/MAX temperature for `date >= start`.
    ///
    /// `start` is passed to the query unvalidated.
    pub fn temperature_summary_since(&self, start: &str) -> RepoResult<TemperatureSummary> {
        self.repo.temperature_summary(&DateRange::since(start))
    }

    /// MIN/AVG/MAX temperature for `start <= date <= end`.
    ///
    /// No ordering check: `start > end` yields an empty summary.
    pub fn temperature_summary_between(
        &self,
        start: &str,
        end: &str,
    ) -> RepoResult<TemperatureSummary> {
        self.repo.temperature_summary(&DateRange::between(start, end))
    }
}
