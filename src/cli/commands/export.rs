use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::csv::write_kitchen_csv;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;
use std::path::Path;

/// Export one day's meal list as CSV for the kitchen.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Export { date, file, force } = cmd {
        let d = match date {
            Some(s) => parse_date_arg(s)?,
            None => clock.today(),
        };

        if Path::new(file).exists() && !force {
            return Err(AppError::Export(format!(
                "{} already exists (use --force to overwrite)",
                file
            )));
        }

        let pool = DbPool::new(&cfg.database)?;
        let rows = write_kitchen_csv(&pool.conn, d, file)?;

        success(format!("Exported {} record(s) for {} to {}", rows, d, file));

        db::ttlog(
            &pool.conn,
            "export",
            file,
            &format!("Exported {} meal record(s) for {}", rows, d),
        )?;
    }

    Ok(())
}
