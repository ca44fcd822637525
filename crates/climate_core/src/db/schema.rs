//! Explicit schema of the external climate dataset.
//!
//! The dataset is created elsewhere; this module only names the tables and
//! columns the query layer reads and checks that they exist.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

#[derive(Debug, Clone, Copy)]
struct TableSpec {
    name: &'static str,
    columns: &'static [&'static str],
}

const REQUIRED_TABLES: &[TableSpec] = &[
    TableSpec {
        name: MEASUREMENT_TABLE,
        columns: &["station", "date", "prcp", "tobs"],
    },
    TableSpec {
        name: STATION_TABLE,
        columns: &["station", "name"],
    },
];

/// Checks that every table and column read by the repository is present.
///
/// Extra tables and metadata columns are ignored.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        let columns = table_columns(conn, table.name)?;
        if columns.is_empty() {
            return Err(DbError::MissingTable { table: table.name });
        }

        for &column in table.columns {
            if !columns.iter().any(|existing| existing.eq_ignore_ascii_case(column)) {
                return Err(DbError::MissingColumn {
                    table: table.name,
                    column,
                });
            }
        }
    }

    Ok(())
}

// `table_info` yields no rows for an unknown table.
fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
