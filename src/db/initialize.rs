use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database schema.
///
/// No direct CREATE TABLE here: the whole schema is guaranteed by the
/// migration chain, so a fresh database and an upgraded one end up identical.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}
