use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::report::weekly_trend;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;

/// Trailing 7-day breakfast/supper series.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Trend { end, json } = cmd {
        let end_d = match end {
            Some(s) => parse_date_arg(s)?,
            None => clock.today(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let series = weekly_trend(&pool.conn, end_d)?;

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&series)
                    .map_err(|e| AppError::Other(format!("serialize trend: {e}")))?
            );
            return Ok(());
        }

        let mut table = Table::new(vec!["Date", "Day", "Breakfast", "Supper"]);
        for point in &series {
            table.add_row(vec![
                point.date.to_string(),
                point.date.format("%a").to_string(),
                point.breakfast_count.to_string(),
                point.supper_count.to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
