//! SQLite session bootstrap and schema check entry points.
//!
//! # Responsibility
//! - Open read-only SQLite sessions over the climate dataset.
//! - Verify the tables and columns the query layer depends on.
//!
//! # Invariants
//! - Sessions never write: they are opened read-only with `query_only` set.
//! - The schema check runs on the startup open (`open_db`); per-request
//!   sessions (`open_session`) skip it and run only their own query.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_session};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MissingTable {
        table: &'static str,
    },
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingTable { table } => {
                write!(f, "dataset is missing required table `{table}`")
            }
            Self::MissingColumn { table, column } => {
                write!(f, "dataset table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingTable { .. } | Self::MissingColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
