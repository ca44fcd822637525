//! Climate repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide typed read queries over the `measurement` and `station` tables.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every method issues exactly one statement and never writes.
//! - Rows come back in storage order; no `ORDER BY` is applied.
//! - Read paths reject invalid persisted state instead of masking it, but
//!   only for the columns they actually select.

use crate::db::DbError;
use crate::model::observation::{
    Observation, PrecipitationRecord, Station, TemperatureSummary,
};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const OBSERVATION_SELECT_SQL: &str = "SELECT
    station,
    date,
    prcp,
    tobs
FROM measurement";

const PRECIPITATION_SELECT_SQL: &str = "SELECT
    date,
    prcp
FROM measurement";

const STATION_SELECT_SQL: &str = "SELECT
    station,
    name
FROM station";

const TEMPERATURE_SUMMARY_SQL: &str = "SELECT
    MIN(tobs),
    AVG(tobs),
    MAX(tobs)
FROM measurement";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for climate queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted climate data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Inclusive date bounds for observation queries.
///
/// Bounds are compared as text against `measurement.date`; they are not
/// parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Range with only a lower bound.
    pub fn since(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Range with both bounds. `start > end` is allowed and matches nothing.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

/// Repository interface for climate reads.
pub trait ClimateRepository {
    fn list_observations(&self, range: &DateRange) -> RepoResult<Vec<Observation>>;
    /// `{date, precipitation}` of every row; never reads `tobs`.
    fn list_precipitation(&self) -> RepoResult<Vec<PrecipitationRecord>>;
    fn list_stations(&self) -> RepoResult<Vec<Station>>;
    fn temperature_summary(&self, range: &DateRange) -> RepoResult<TemperatureSummary>;
}

/// SQLite-backed climate repository bound to one session.
pub struct SqliteClimateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClimateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClimateRepository for SqliteClimateRepository<'_> {
    fn list_observations(&self, range: &DateRange) -> RepoResult<Vec<Observation>> {
        let (filter, bind_values) = date_filter(range);
        let mut stmt = self
            .conn
            .prepare(&format!("{OBSERVATION_SELECT_SQL}{filter};"))?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut observations = Vec::new();

        while let Some(row) = rows.next()? {
            observations.push(parse_observation_row(row)?);
        }

        Ok(observations)
    }

    fn list_precipitation(&self) -> RepoResult<Vec<PrecipitationRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRECIPITATION_SELECT_SQL};"))?;
        let records = stmt
            .query_map([], |row| {
                Ok(PrecipitationRecord {
                    date: row.get("date")?,
                    precipitation: row.get("prcp")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn list_stations(&self) -> RepoResult<Vec<Station>> {
        let mut stmt = self.conn.prepare(&format!("{STATION_SELECT_SQL};"))?;
        let stations = stmt
            .query_map([], |row| {
                Ok(Station {
                    station: row.get("station")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stations)
    }

    fn temperature_summary(&self, range: &DateRange) -> RepoResult<TemperatureSummary> {
        let (filter, bind_values) = date_filter(range);
        let summary = self.conn.query_row(
            &format!("{TEMPERATURE_SUMMARY_SQL}{filter};"),
            params_from_iter(bind_values),
            |row| {
                Ok(TemperatureSummary {
                    min: row.get(0)?,
                    avg: row.get(1)?,
                    max: row.get(2)?,
                })
            },
        )?;

        Ok(summary)
    }
}

fn date_filter(range: &DateRange) -> (String, Vec<Value>) {
    let mut filter = String::new();
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(start) = &range.start {
        filter.push_str(" WHERE date >= ?");
        bind_values.push(Value::Text(start.clone()));
    }

    if let Some(end) = &range.end {
        filter.push_str(if bind_values.is_empty() {
            " WHERE date <= ?"
        } else {
            " AND date <= ?"
        });
        bind_values.push(Value::Text(end.clone()));
    }

    (filter, bind_values)
}

fn parse_observation_row(row: &Row<'_>) -> RepoResult<Observation> {
    let station: String = row.get("station")?;
    let date: String = row.get("date")?;

    let temperature = row.get::<_, Option<f64>>("tobs")?.ok_or_else(|| {
        RepoError::InvalidData(format!(
            "missing tobs value in measurement row for station `{station}` on `{date}`"
        ))
    })?;

    Ok(Observation {
        station,
        date,
        precipitation: row.get("prcp")?,
        temperature,
    })
}
