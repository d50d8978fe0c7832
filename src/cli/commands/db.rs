use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::residents;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::OptionalExtension;
use std::fs;

/// Database maintenance: migrations, VACUUM, and a quick info summary.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        vacuum,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations are up to date.");
        }

        if *vacuum {
            pool.conn.execute_batch("VACUUM;")?;
            success("Database vacuumed.");
        }

        if *info {
            print_db_info(&pool, &cfg.database)?;
        }
    }

    Ok(())
}

fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("• File: {}", db_path);
    println!("• Size: {:.2} MB", file_mb);

    let meal_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM meal_days", [], |row| row.get(0))?;
    let period_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM away_periods", [], |row| row.get(0))?;
    println!("• Meal records: {}", meal_rows);
    println!("• Away periods: {}", period_rows);
    println!("• Residents:    {}", residents::count(&pool.conn)?);

    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM meal_days ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM meal_days ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("• Date range:");
    println!("    from: {}", first.unwrap_or_else(|| "--".to_string()));
    println!("    to:   {}", last.unwrap_or_else(|| "--".to_string()));

    Ok(())
}
