use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration ledger,
/// so it must be created before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check the ledger for an already-applied migration.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn record_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the meal-planning tables with the modern schema.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS residents (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL DEFAULT '',
            room        TEXT NOT NULL DEFAULT '',
            returned_on TEXT,
            returned_at TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS meal_days (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            resident_id     TEXT NOT NULL,
            date            TEXT NOT NULL,
            breakfast       INTEGER NOT NULL DEFAULT 0 CHECK (breakfast IN (0,1)),
            early_breakfast INTEGER NOT NULL DEFAULT 0 CHECK (early_breakfast IN (0,1)),
            supper          INTEGER NOT NULL DEFAULT 0 CHECK (supper IN (0,1)),
            away            INTEGER NOT NULL DEFAULT 0 CHECK (away IN (0,1)),
            updated_at      TEXT NOT NULL,
            UNIQUE (resident_id, date)
        );

        CREATE TABLE IF NOT EXISTS away_periods (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            resident_id TEXT NOT NULL,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            CHECK (start_date <= end_date)
        );

        CREATE INDEX IF NOT EXISTS idx_meal_days_date ON meal_days(date);
        CREATE INDEX IF NOT EXISTS idx_meal_days_resident_date ON meal_days(resident_id, date);
        CREATE INDEX IF NOT EXISTS idx_away_periods_lookup ON away_periods(resident_id, start_date, end_date);
        "#,
    )?;
    Ok(())
}

/// Databases created before return tracking lack the `returned_on` and
/// `returned_at` columns on `residents`.
fn migrate_add_return_columns(conn: &Connection) -> Result<()> {
    let version = "20250614_0003_add_resident_return_columns";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "residents", "returned_on")? {
        conn.execute("ALTER TABLE residents ADD COLUMN returned_on TEXT;", [])?;
        conn.execute("ALTER TABLE residents ADD COLUMN returned_at TEXT;", [])?;
        success(format!(
            "Migration applied: {} (return tracking on residents)",
            version
        ));
    }

    record_migration(conn, version, "Added returned_on/returned_at to residents")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::init_db() and from `mealwarden db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ledger first
    ensure_log_table(conn)?;

    // 2) Fresh install → full modern schema
    let had_residents = table_exists(conn, "residents")?;
    create_core_tables(conn)?;
    if !had_residents {
        success("Created meal-planning tables (modern schema).");
    }

    // 3) Column-level upgrades for older databases
    migrate_add_return_columns(conn)?;

    Ok(())
}
