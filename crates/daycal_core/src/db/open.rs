//! Opening the calendar database, on disk or in memory.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::fmt::Display;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a write waits on another daycal process holding the lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the daycal database at `path`.
///
/// The connection comes back with the schema upgraded to
/// [`latest_version`](super::migrations::latest_version). Each call logs a
/// `db_open` start event and one `ok` or `error` event with its duration.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Fresh, fully migrated database that lives only as long as the connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = connect().map_err(|err| {
        log_open_failure(mode, started_at, "db_open_failed", &err);
        err
    })?;
    if let Err(err) = prepare(&mut conn) {
        log_open_failure(mode, started_at, "db_bootstrap_failed", &err);
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    // tasks.category_id must point at a live category.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

fn log_open_failure(mode: &str, started_at: Instant, code: &str, err: &dyn Display) {
    error!(
        "event=db_open module=db status=error mode={mode} duration_ms={} error_code={code} error={err}",
        started_at.elapsed().as_millis()
    );
}
