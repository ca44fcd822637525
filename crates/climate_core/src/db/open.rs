//! Session bootstrap for the climate dataset.
//!
//! # Responsibility
//! - Open a read-only SQLite session over an existing dataset file.
//! - Configure connection pragmas; run the schema check when asked to.
//!
//! # Invariants
//! - Returned sessions have `query_only=ON`.
//! - A missing dataset file is an error; it is never created.
//! - `open_session` issues no statements besides pragmas, so a request
//!   session runs only its own query.

use super::schema::verify_schema;
use super::DbResult;
use log::{debug, error};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a read-only session on the dataset at `path` and verifies its schema.
///
/// Used once at startup; request handlers use [`open_session`].
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_mode(path.as_ref(), OpenMode::Checked)
}

/// Opens a read-only session on the dataset at `path` without the schema check.
///
/// The session is released when the returned `Connection` is dropped.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_session(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_mode(path.as_ref(), OpenMode::Session)
}

#[derive(Debug, Clone, Copy)]
enum OpenMode {
    Checked,
    Session,
}

impl OpenMode {
    fn label(self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Session => "session",
        }
    }
}

fn open_with_mode(path: &Path, mode: OpenMode) -> DbResult<Connection> {
    let started_at = Instant::now();

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} path={} duration_ms={} error_code=db_open_failed error={}",
                mode.label(),
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, mode) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={} path={} duration_ms={}",
                mode.label(),
                path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} path={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode.label(),
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, mode: OpenMode) -> DbResult<()> {
    conn.execute_batch("PRAGMA query_only = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    if let OpenMode::Checked = mode {
        verify_schema(conn)?;
    }
    Ok(())
}
