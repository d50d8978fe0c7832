use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Initialize configuration and database.
///
/// The loaded config is ignored on purpose: init writes a fresh one rather
/// than trusting a possibly stale file.
pub fn handle(cli: &Cli, _cfg: &Config) -> AppResult<()> {
    // Resolve the DB path first: an explicit --db wins, and in test mode the
    // real config file is left untouched.
    let db_path = if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
        custom.clone()
    } else {
        let p = Config::init_all(None, cli.test)?;
        p.to_string_lossy().to_string()
    };

    let pool = DbPool::new(&db_path)?;
    db::init_db(&pool.conn)?;

    if !cli.test {
        success(format!("Config file: {}", Config::config_file().display()));
    }
    success(format!("Database initialized at {}", db_path));

    if let Err(e) = db::ttlog(
        &pool.conn,
        "init",
        &db_path,
        "Database and configuration initialized",
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    Ok(())
}
