//! Observation and station records.
//!
//! # Invariants
//! - `date` is kept as the ISO 8601 text stored in the dataset.
//! - `temperature` is always present on an `Observation`; precipitation may
//!   be missing.

use serde::{Deserialize, Serialize, Serializer};

/// Identifier of a weather station, e.g. `USC00519397`.
pub type StationId = String;

/// One station's reading for one date (`measurement` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station: StationId,
    /// ISO 8601 calendar date, `yyyy-mm-dd`.
    pub date: String,
    /// Precipitation in inches. `None` when the station reported nothing.
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit.
    pub temperature: f64,
}

/// A weather-recording location (`station` row).
///
/// Metadata columns the API never serves are not mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: StationId,
    pub name: String,
}

/// `{date, precipitation}` projection of an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    pub date: String,
    pub precipitation: Option<f64>,
}

impl From<Observation> for PrecipitationRecord {
    fn from(value: Observation) -> Self {
        Self {
            date: value.date,
            precipitation: value.precipitation,
        }
    }
}

/// `{date, temperature}` projection of an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub date: String,
    pub temperature: f64,
}

impl From<Observation> for TemperatureRecord {
    fn from(value: Observation) -> Self {
        Self {
            date: value.date,
            temperature: value.temperature,
        }
    }
}

/// MIN/AVG/MAX of observed temperature over a date range.
///
/// All three are `None` when the range matched no rows. Serialized as the
/// array `[min, avg, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// Returns whether the aggregate covered no observations.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

impl Serialize for TemperatureSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.min, self.avg, self.max).serialize(serializer)
    }
}
